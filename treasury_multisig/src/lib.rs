#![no_std]

//! # Multisig Treasury & Authorization Engine
//!
//! A Soroban smart contract holding a pool of funds under the joint control of
//! a set of signers. Any outbound action - a token transfer, an arbitrary
//! contract call, or a change to the signer set itself - is a proposal that
//! must collect a threshold of yes votes inside a fixed voting window and then
//! sit through a cooling-off delay before it can be executed.
//!
//! ## Features
//! - M-of-N vote threshold over a time-boxed voting window
//! - Mandatory execution delay after the window closes
//! - Submitter-chosen hard deadline, independent of the protocol timing
//! - Self-governance via the same proposal pipeline (add/remove signers,
//!   change threshold, change durations)
//! - Batch submission and voting (atomic) and batch execution (best effort)
//! - Owner-only emergency pause
//! - Comprehensive event emission for transparency
//!
//! ## Security
//! - Adversarial design: assumes hostile inputs
//! - Proposals are marked executed before the outbound call is dispatched
//! - Votes are final: no revocation, no re-voting
//! - A failed outbound call leaves the proposal retryable; nothing else does
//! - Threshold invariants enforced at all times

use soroban_sdk::{contract, contractevent, contractimpl, token, Address, Env, Val, Vec};

mod error;
mod registry;
mod status;
mod storage;
mod types;

pub use error::TreasuryError;
pub use types::{
    GovernanceAction, InvokeAction, Proposal, ProposalAction, ProposalState, SignerInfo,
    TransferAction, TreasuryConfig,
};

use types::{
    MAX_EXECUTION_DELAY, MAX_PROPOSAL_DURATION, MAX_SIGNERS, MIN_DEADLINE_WINDOW,
    MIN_PROPOSAL_DURATION,
};

// ============================================================================
// Events
// ============================================================================

#[contractevent(topics = ["MeridianTreasury", "INIT"])]
pub struct TreasuryInitialized {
    pub signers_count: u32,
    pub threshold: u32,
    pub timestamp: u64,
}

#[contractevent(topics = ["MeridianTreasury", "PROPOSED"])]
pub struct ProposalSubmitted {
    pub proposal_id: u64,
    pub proposer: Address,
    pub deadline: u64,
}

#[contractevent(topics = ["MeridianTreasury", "VOTED"])]
pub struct VoteCast {
    pub proposal_id: u64,
    pub voter: Address,
    pub support: bool,
    pub yes_votes: u32,
    pub no_votes: u32,
}

#[contractevent(topics = ["MeridianTreasury", "EXECUTED"])]
pub struct ProposalExecuted {
    pub proposal_id: u64,
    pub executor: Address,
    pub timestamp: u64,
}

#[contractevent(topics = ["MeridianTreasury", "SIGNER_ADD"])]
pub struct SignerAdded {
    pub signer: Address,
    pub proposal_id: u64,
    pub new_count: u32,
}

#[contractevent(topics = ["MeridianTreasury", "SIGNER_REM"])]
pub struct SignerRemoved {
    pub signer: Address,
    pub proposal_id: u64,
    pub new_count: u32,
}

#[contractevent(topics = ["MeridianTreasury", "THRESH_UPD"])]
pub struct ThresholdUpdated {
    pub old: u32,
    pub new: u32,
    pub proposal_id: u64,
}

#[contractevent(topics = ["MeridianTreasury", "DUR_UPD"])]
pub struct ProposalDurationUpdated {
    pub old: u64,
    pub new: u64,
    pub proposal_id: u64,
}

#[contractevent(topics = ["MeridianTreasury", "DELAY_UPD"])]
pub struct ExecutionDelayUpdated {
    pub old: u64,
    pub new: u64,
    pub proposal_id: u64,
}

#[contractevent(topics = ["MeridianTreasury", "PAUSE"])]
pub struct PauseToggled {
    pub paused: bool,
    pub by: Address,
}

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct TreasuryMultisig;

#[contractimpl]
impl TreasuryMultisig {
    // ========================================================================
    // Initialization
    // ========================================================================

    /// Initialize the treasury with its signer set and policy parameters
    ///
    /// # Arguments
    /// * `owner` - Identity allowed to toggle the emergency pause
    /// * `signers` - Initial list of signer addresses, order preserved
    /// * `threshold` - Number of yes votes required to execute (M-of-N)
    /// * `proposal_duration` - Voting-window length in seconds
    /// * `execution_delay` - Wait after the window closes, in seconds
    ///
    /// # Errors
    /// * `AlreadyInitialized` - Contract has already been initialized
    /// * `EmptySignerList` - Signers list is empty
    /// * `InvalidThreshold` - Threshold is zero
    /// * `ThresholdExceedsSigners` - Threshold exceeds number of signers
    /// * `MaxSignersReached` - Signer list is larger than the cap
    /// * `SignerAlreadyExists` - Signer list contains a duplicate
    /// * `InvalidDuration` - Duration or delay outside the allowed bounds
    pub fn initialize(
        env: Env,
        owner: Address,
        signers: Vec<Address>,
        threshold: u32,
        proposal_duration: u64,
        execution_delay: u64,
    ) -> Result<(), TreasuryError> {
        if storage::is_initialized(&env) {
            return Err(TreasuryError::AlreadyInitialized);
        }

        owner.require_auth();

        if signers.is_empty() {
            return Err(TreasuryError::EmptySignerList);
        }
        if threshold == 0 {
            return Err(TreasuryError::InvalidThreshold);
        }
        if threshold > signers.len() {
            return Err(TreasuryError::ThresholdExceedsSigners);
        }
        if signers.len() > MAX_SIGNERS {
            return Err(TreasuryError::MaxSignersReached);
        }
        if !(MIN_PROPOSAL_DURATION..=MAX_PROPOSAL_DURATION).contains(&proposal_duration) {
            return Err(TreasuryError::InvalidDuration);
        }
        if execution_delay > MAX_EXECUTION_DELAY {
            return Err(TreasuryError::InvalidDuration);
        }

        let timestamp = env.ledger().timestamp();

        for signer in signers.iter() {
            if storage::get_signer_info(&env, &signer).is_some() {
                return Err(TreasuryError::SignerAlreadyExists);
            }
            let info = SignerInfo {
                address: signer.clone(),
                added_at: timestamp,
            };
            storage::set_signer_info(&env, &signer, &info);
        }

        storage::set_signer_list(&env, &signers);
        storage::set_signer_count(&env, signers.len());
        storage::set_owner(&env, &owner);

        let config = TreasuryConfig {
            required_signatures: threshold,
            proposal_duration,
            execution_delay,
            max_signers: MAX_SIGNERS,
        };
        storage::set_config(&env, &config);

        storage::set_initialized(&env);

        TreasuryInitialized {
            signers_count: signers.len(),
            threshold,
            timestamp,
        }
        .publish(&env);

        Ok(())
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Submit a proposal, returning its id
    ///
    /// Ids are dense and monotonically increasing, starting at 0.
    ///
    /// # Errors
    /// * `NotInitialized` - Contract not initialized
    /// * `ContractPaused` - Contract is paused
    /// * `NotASigner` - Submitter is not a signer
    /// * `InvalidDeadline` - Deadline is not in the future
    /// * `DeadlineTooShort` - Deadline leaves no usable voting window
    /// * `InvalidAmount` - Transfer amount is not positive
    /// * `InvalidTarget` - Invoke aimed at this contract itself
    pub fn submit(
        env: Env,
        submitter: Address,
        action: ProposalAction,
        deadline: u64,
    ) -> Result<u64, TreasuryError> {
        require_active_signer(&env, &submitter)?;

        let now = env.ledger().timestamp();
        validate_submission(&env, &action, deadline, now)?;

        Ok(create_proposal(&env, &submitter, action, deadline, now))
    }

    /// Submit several proposals in one call, all or nothing
    ///
    /// Every entry is validated before any proposal is created; one invalid
    /// entry rejects the whole batch.
    ///
    /// # Errors
    /// * `LengthMismatch` - Argument vectors have differing lengths
    /// * Plus every error `submit` can return
    pub fn submit_batch(
        env: Env,
        submitter: Address,
        actions: Vec<ProposalAction>,
        deadlines: Vec<u64>,
    ) -> Result<Vec<u64>, TreasuryError> {
        require_active_signer(&env, &submitter)?;

        if actions.len() != deadlines.len() {
            return Err(TreasuryError::LengthMismatch);
        }

        let now = env.ledger().timestamp();

        for i in 0..actions.len() {
            let action = actions.get(i).unwrap();
            let deadline = deadlines.get(i).unwrap();
            validate_submission(&env, &action, deadline, now)?;
        }

        let mut ids: Vec<u64> = Vec::new(&env);
        for i in 0..actions.len() {
            let action = actions.get(i).unwrap();
            let deadline = deadlines.get(i).unwrap();
            ids.push_back(create_proposal(&env, &submitter, action, deadline, now));
        }

        Ok(ids)
    }

    // ========================================================================
    // Voting
    // ========================================================================

    /// Cast a vote on an open proposal
    ///
    /// Votes are final: they cannot be changed or revoked, and they stay on
    /// record even if the voter is later removed from the signer set.
    ///
    /// # Errors
    /// * `NotInitialized` - Contract not initialized
    /// * `ContractPaused` - Contract is paused
    /// * `NotASigner` - Voter is not a signer
    /// * `ProposalNotFound` - Proposal does not exist
    /// * `AlreadyVoted` - Voter has already voted on this proposal
    /// * `VotingClosed` - Voting window is over, or the proposal is expired
    ///   or executed
    pub fn vote(
        env: Env,
        voter: Address,
        proposal_id: u64,
        support: bool,
    ) -> Result<(), TreasuryError> {
        require_active_signer(&env, &voter)?;

        let now = env.ledger().timestamp();
        cast_vote(&env, &voter, proposal_id, support, now)
    }

    /// Cast votes on several proposals in one call, all or nothing
    ///
    /// One rejected vote fails the whole batch and no tally moves.
    ///
    /// # Errors
    /// * `LengthMismatch` - Argument vectors have differing lengths
    /// * Plus every error `vote` can return
    pub fn vote_batch(
        env: Env,
        voter: Address,
        proposal_ids: Vec<u64>,
        supports: Vec<bool>,
    ) -> Result<(), TreasuryError> {
        require_active_signer(&env, &voter)?;

        if proposal_ids.len() != supports.len() {
            return Err(TreasuryError::LengthMismatch);
        }

        let now = env.ledger().timestamp();

        // A failed invocation rolls its storage writes back, so erroring out
        // mid-loop leaves no partial tallies behind.
        for i in 0..proposal_ids.len() {
            let proposal_id = proposal_ids.get(i).unwrap();
            let support = supports.get(i).unwrap();
            cast_vote(&env, &voter, proposal_id, support, now)?;
        }

        Ok(())
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Execute an approved proposal
    ///
    /// Eligibility is checked in a fixed order so the reported error is
    /// deterministic: voting window, quorum, delay, deadline, executed flag.
    /// The proposal is marked executed before the outbound call is dispatched;
    /// if the call fails the mark is rolled back and the proposal stays
    /// executable.
    ///
    /// # Errors
    /// * `NotInitialized` - Contract not initialized
    /// * `ContractPaused` - Contract is paused
    /// * `NotASigner` - Executor is not a signer
    /// * `ProposalNotFound` - Proposal does not exist
    /// * `VotingPeriodNotEnded` - Voting window is still open
    /// * `InsufficientApprovals` - Not enough yes votes
    /// * `ExecutionTooEarly` - Execution delay has not elapsed
    /// * `ProposalExpired` - Deadline has passed
    /// * `ProposalAlreadyExecuted` - Proposal has already been executed
    /// * `ExecutionFailed` - The outbound call failed; proposal retryable
    /// * Registry errors when a governance action violates its guards
    pub fn execute(env: Env, executor: Address, proposal_id: u64) -> Result<(), TreasuryError> {
        require_active_signer(&env, &executor)?;

        let now = env.ledger().timestamp();
        execute_proposal(&env, &executor, proposal_id, now)
    }

    /// Execute several proposals in one call, best effort
    ///
    /// Each proposal is checked and dispatched independently; one failure
    /// never blocks its siblings. Returns one success flag per input id.
    pub fn execute_batch(
        env: Env,
        executor: Address,
        proposal_ids: Vec<u64>,
    ) -> Result<Vec<bool>, TreasuryError> {
        require_active_signer(&env, &executor)?;

        let now = env.ledger().timestamp();

        let mut results: Vec<bool> = Vec::new(&env);
        for proposal_id in proposal_ids.iter() {
            let outcome = execute_proposal(&env, &executor, proposal_id, now);
            results.push_back(outcome.is_ok());
        }

        Ok(results)
    }

    // ========================================================================
    // Emergency Stop
    // ========================================================================

    /// Toggle the pause flag, returning the new value
    ///
    /// Owner only. This is the one operation that bypasses the proposal
    /// pipeline, and the only mutating operation allowed while paused.
    ///
    /// # Errors
    /// * `NotInitialized` - Contract not initialized
    /// * `Unauthorized` - Caller is not the owner
    pub fn toggle_pause(env: Env, caller: Address) -> Result<bool, TreasuryError> {
        if !storage::is_initialized(&env) {
            return Err(TreasuryError::NotInitialized);
        }

        caller.require_auth();

        if caller != storage::get_owner(&env) {
            return Err(TreasuryError::Unauthorized);
        }

        let paused = !storage::is_paused(&env);
        storage::set_paused(&env, paused);

        PauseToggled { paused, by: caller }.publish(&env);

        Ok(paused)
    }

    // ========================================================================
    // Query Functions
    // ========================================================================

    /// Get a proposal record by id
    pub fn get_proposal(env: Env, proposal_id: u64) -> Result<Proposal, TreasuryError> {
        if !storage::is_initialized(&env) {
            return Err(TreasuryError::NotInitialized);
        }
        storage::get_proposal(&env, proposal_id).ok_or(TreasuryError::ProposalNotFound)
    }

    /// Get the derived, time-sensitive view of a proposal
    ///
    /// Computed against the current configuration and the current timestamp;
    /// never cached.
    pub fn get_proposal_state(env: Env, proposal_id: u64) -> Result<ProposalState, TreasuryError> {
        if !storage::is_initialized(&env) {
            return Err(TreasuryError::NotInitialized);
        }
        let proposal =
            storage::get_proposal(&env, proposal_id).ok_or(TreasuryError::ProposalNotFound)?;
        let config = storage::get_config(&env);
        Ok(status::state(&proposal, &config, env.ledger().timestamp()))
    }

    /// Get the vote a signer cast on a proposal, if any
    pub fn get_vote(
        env: Env,
        proposal_id: u64,
        voter: Address,
    ) -> Result<Option<bool>, TreasuryError> {
        if !storage::is_initialized(&env) {
            return Err(TreasuryError::NotInitialized);
        }
        if storage::get_proposal(&env, proposal_id).is_none() {
            return Err(TreasuryError::ProposalNotFound);
        }
        Ok(storage::get_vote(&env, proposal_id, &voter))
    }

    /// Get the number of proposals ever submitted
    pub fn get_proposal_count(env: Env) -> Result<u64, TreasuryError> {
        if !storage::is_initialized(&env) {
            return Err(TreasuryError::NotInitialized);
        }
        Ok(storage::get_proposal_count(&env))
    }

    /// Check if an address is a registered signer
    pub fn is_signer(env: Env, address: Address) -> bool {
        if !storage::is_initialized(&env) {
            return false;
        }
        storage::is_signer(&env, &address)
    }

    /// Get all signer addresses, in insertion order
    pub fn get_signers(env: Env) -> Result<Vec<Address>, TreasuryError> {
        if !storage::is_initialized(&env) {
            return Err(TreasuryError::NotInitialized);
        }
        Ok(storage::get_signer_list(&env))
    }

    /// Get signer count
    pub fn get_signer_count(env: Env) -> Result<u32, TreasuryError> {
        if !storage::is_initialized(&env) {
            return Err(TreasuryError::NotInitialized);
        }
        Ok(storage::get_signer_count(&env))
    }

    /// Get the full treasury configuration
    pub fn get_config(env: Env) -> Result<TreasuryConfig, TreasuryError> {
        if !storage::is_initialized(&env) {
            return Err(TreasuryError::NotInitialized);
        }
        Ok(storage::get_config(&env))
    }

    /// Check if the contract is paused
    pub fn is_paused(env: Env) -> bool {
        if !storage::is_initialized(&env) {
            return false;
        }
        storage::is_paused(&env)
    }

    /// Get the owner address
    pub fn get_owner(env: Env) -> Result<Address, TreasuryError> {
        if !storage::is_initialized(&env) {
            return Err(TreasuryError::NotInitialized);
        }
        Ok(storage::get_owner(&env))
    }
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Common prologue for every mutating signer operation: initialized, caller
/// authenticated, not paused, caller registered.
fn require_active_signer(env: &Env, caller: &Address) -> Result<(), TreasuryError> {
    if !storage::is_initialized(env) {
        return Err(TreasuryError::NotInitialized);
    }

    caller.require_auth();

    if storage::is_paused(env) {
        return Err(TreasuryError::ContractPaused);
    }
    if !storage::is_signer(env, caller) {
        return Err(TreasuryError::NotASigner);
    }

    Ok(())
}

/// Validate a submission without touching storage
fn validate_submission(
    env: &Env,
    action: &ProposalAction,
    deadline: u64,
    now: u64,
) -> Result<(), TreasuryError> {
    if deadline <= now {
        return Err(TreasuryError::InvalidDeadline);
    }
    if deadline - now < MIN_DEADLINE_WINDOW {
        return Err(TreasuryError::DeadlineTooShort);
    }

    match action {
        ProposalAction::Transfer(transfer) => {
            if transfer.amount <= 0 {
                return Err(TreasuryError::InvalidAmount);
            }
        }
        ProposalAction::Invoke(invoke) => {
            // The typed Governance variant is the only self-call channel
            if invoke.target == env.current_contract_address() {
                return Err(TreasuryError::InvalidTarget);
            }
        }
        ProposalAction::Governance(_) => {}
    }

    Ok(())
}

/// Store a new proposal under the next dense id
fn create_proposal(
    env: &Env,
    proposer: &Address,
    action: ProposalAction,
    deadline: u64,
    now: u64,
) -> u64 {
    let id = storage::get_proposal_count(env);

    let proposal = Proposal {
        id,
        proposer: proposer.clone(),
        action,
        created_at: now,
        deadline,
        yes_votes: 0,
        no_votes: 0,
        executed: false,
        executed_at: None,
    };
    storage::set_proposal(env, &proposal);
    storage::set_proposal_count(env, id + 1);

    ProposalSubmitted {
        proposal_id: id,
        proposer: proposer.clone(),
        deadline,
    }
    .publish(env);

    id
}

/// Record a single vote and update the tallies
fn cast_vote(
    env: &Env,
    voter: &Address,
    proposal_id: u64,
    support: bool,
    now: u64,
) -> Result<(), TreasuryError> {
    let mut proposal =
        storage::get_proposal(env, proposal_id).ok_or(TreasuryError::ProposalNotFound)?;

    if storage::has_voted(env, proposal_id, voter) {
        return Err(TreasuryError::AlreadyVoted);
    }

    let config = storage::get_config(env);
    if !status::state(&proposal, &config, now).can_vote {
        return Err(TreasuryError::VotingClosed);
    }

    storage::set_vote(env, proposal_id, voter, support);

    if support {
        proposal.yes_votes += 1;
    } else {
        proposal.no_votes += 1;
    }
    storage::set_proposal(env, &proposal);

    VoteCast {
        proposal_id,
        voter: voter.clone(),
        support,
        yes_votes: proposal.yes_votes,
        no_votes: proposal.no_votes,
    }
    .publish(env);

    Ok(())
}

/// Check eligibility, mark executed, dispatch, and roll the mark back if the
/// dispatch fails
///
/// The mark is written before the outbound call so a reentrant `execute` on
/// the same proposal fails with `ProposalAlreadyExecuted` instead of
/// double-dispatching. The explicit rollback keeps `execute_batch` siblings
/// unaffected by one item's failure.
fn execute_proposal(
    env: &Env,
    executor: &Address,
    proposal_id: u64,
    now: u64,
) -> Result<(), TreasuryError> {
    let mut proposal =
        storage::get_proposal(env, proposal_id).ok_or(TreasuryError::ProposalNotFound)?;

    let config = storage::get_config(env);
    status::check_executable(&proposal, &config, now)?;

    proposal.executed = true;
    proposal.executed_at = Some(now);
    storage::set_proposal(env, &proposal);

    if let Err(err) = dispatch(env, &proposal) {
        // The call's fault, not the protocol's: leave the proposal executable
        proposal.executed = false;
        proposal.executed_at = None;
        storage::set_proposal(env, &proposal);
        return Err(err);
    }

    ProposalExecuted {
        proposal_id,
        executor: executor.clone(),
        timestamp: now,
    }
    .publish(env);

    Ok(())
}

/// Dispatch a proposal's action, observing success or failure
fn dispatch(env: &Env, proposal: &Proposal) -> Result<(), TreasuryError> {
    match &proposal.action {
        ProposalAction::Transfer(transfer) => {
            let client = token::TokenClient::new(env, &transfer.token);
            client
                .try_transfer(&env.current_contract_address(), &transfer.to, &transfer.amount)
                .map_err(|_| TreasuryError::ExecutionFailed)?
                .map_err(|_| TreasuryError::ExecutionFailed)?;
            Ok(())
        }
        ProposalAction::Invoke(invoke) => {
            env.try_invoke_contract::<Val, soroban_sdk::Error>(
                &invoke.target,
                &invoke.function,
                invoke.args.clone(),
            )
            .map_err(|_| TreasuryError::ExecutionFailed)?
            .map_err(|_| TreasuryError::ExecutionFailed)?;
            Ok(())
        }
        ProposalAction::Governance(action) => registry::apply(env, proposal.id, action),
    }
}
