//! Signer-set and policy mutations
//!
//! Every function here is reachable only from the execute path of an approved
//! governance proposal; quorum was already enforced one layer up, so the
//! guards below protect structural invariants (threshold vs. signer count,
//! duration bounds), not authorization.

use soroban_sdk::{Address, Env, Vec};

use crate::error::TreasuryError;
use crate::storage;
use crate::types::{
    GovernanceAction, SignerInfo, MAX_EXECUTION_DELAY, MAX_PROPOSAL_DURATION,
    MIN_PROPOSAL_DURATION,
};
use crate::{
    ExecutionDelayUpdated, ProposalDurationUpdated, SignerAdded, SignerRemoved, ThresholdUpdated,
};

/// Apply a governance action in the context of an executing proposal
pub fn apply(env: &Env, proposal_id: u64, action: &GovernanceAction) -> Result<(), TreasuryError> {
    match action {
        GovernanceAction::AddSigner(signer) => add_signer(env, proposal_id, signer),
        GovernanceAction::RemoveSigner(signer) => remove_signer(env, proposal_id, signer),
        GovernanceAction::SetThreshold(threshold) => set_threshold(env, proposal_id, *threshold),
        GovernanceAction::SetProposalDuration(duration) => {
            set_proposal_duration(env, proposal_id, *duration)
        }
        GovernanceAction::SetExecutionDelay(delay) => set_execution_delay(env, proposal_id, *delay),
    }
}

fn add_signer(env: &Env, proposal_id: u64, new_signer: &Address) -> Result<(), TreasuryError> {
    if storage::get_signer_info(env, new_signer).is_some() {
        return Err(TreasuryError::SignerAlreadyExists);
    }

    let config = storage::get_config(env);
    let current_count = storage::get_signer_count(env);
    if current_count >= config.max_signers {
        return Err(TreasuryError::MaxSignersReached);
    }

    let info = SignerInfo {
        address: new_signer.clone(),
        added_at: env.ledger().timestamp(),
    };
    storage::set_signer_info(env, new_signer, &info);

    let mut signer_list = storage::get_signer_list(env);
    signer_list.push_back(new_signer.clone());
    storage::set_signer_list(env, &signer_list);

    let new_count = current_count + 1;
    storage::set_signer_count(env, new_count);

    SignerAdded {
        signer: new_signer.clone(),
        proposal_id,
        new_count,
    }
    .publish(env);

    Ok(())
}

fn remove_signer(env: &Env, proposal_id: u64, signer: &Address) -> Result<(), TreasuryError> {
    if storage::get_signer_info(env, signer).is_none() {
        return Err(TreasuryError::SignerNotFound);
    }

    let current_count = storage::get_signer_count(env);
    if current_count <= 1 {
        return Err(TreasuryError::CannotRemoveLastSigner);
    }

    // Removal must not leave the threshold unsatisfiable
    let new_count = current_count - 1;
    let config = storage::get_config(env);
    if config.required_signatures > new_count {
        return Err(TreasuryError::ThresholdExceedsSigners);
    }

    // Votes already cast by this signer stay on record
    storage::remove_signer_info(env, signer);

    let signer_list = storage::get_signer_list(env);
    let mut new_list: Vec<Address> = Vec::new(env);
    for addr in signer_list.iter() {
        if addr != *signer {
            new_list.push_back(addr);
        }
    }
    storage::set_signer_list(env, &new_list);
    storage::set_signer_count(env, new_count);

    SignerRemoved {
        signer: signer.clone(),
        proposal_id,
        new_count,
    }
    .publish(env);

    Ok(())
}

fn set_threshold(env: &Env, proposal_id: u64, new_threshold: u32) -> Result<(), TreasuryError> {
    if new_threshold == 0 {
        return Err(TreasuryError::InvalidThreshold);
    }
    if new_threshold > storage::get_signer_count(env) {
        return Err(TreasuryError::ThresholdExceedsSigners);
    }

    let mut config = storage::get_config(env);
    let old_threshold = config.required_signatures;
    config.required_signatures = new_threshold;
    storage::set_config(env, &config);

    ThresholdUpdated {
        old: old_threshold,
        new: new_threshold,
        proposal_id,
    }
    .publish(env);

    Ok(())
}

fn set_proposal_duration(env: &Env, proposal_id: u64, duration: u64) -> Result<(), TreasuryError> {
    if !(MIN_PROPOSAL_DURATION..=MAX_PROPOSAL_DURATION).contains(&duration) {
        return Err(TreasuryError::InvalidDuration);
    }

    let mut config = storage::get_config(env);
    let old_duration = config.proposal_duration;
    config.proposal_duration = duration;
    storage::set_config(env, &config);

    ProposalDurationUpdated {
        old: old_duration,
        new: duration,
        proposal_id,
    }
    .publish(env);

    Ok(())
}

fn set_execution_delay(env: &Env, proposal_id: u64, delay: u64) -> Result<(), TreasuryError> {
    if delay > MAX_EXECUTION_DELAY {
        return Err(TreasuryError::InvalidDuration);
    }

    let mut config = storage::get_config(env);
    let old_delay = config.execution_delay;
    config.execution_delay = delay;
    storage::set_config(env, &config);

    ExecutionDelayUpdated {
        old: old_delay,
        new: delay,
        proposal_id,
    }
    .publish(env);

    Ok(())
}
