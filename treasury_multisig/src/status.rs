//! Derived proposal status
//!
//! A proposal's lifecycle position (open, executable, expired, failed) is
//! never persisted. Everything is recomputed here from the stored record, the
//! current configuration and the current timestamp, so a status read is
//! always consistent with the clock.

use crate::error::TreasuryError;
use crate::types::{Proposal, ProposalState, TreasuryConfig};

/// Instant at which the voting window closes
///
/// The boundary instant itself is still votable; `now > voting_ends_at` is
/// the closed condition, applied identically by `vote` and `state`.
pub fn voting_ends_at(proposal: &Proposal, config: &TreasuryConfig) -> u64 {
    proposal.created_at.saturating_add(config.proposal_duration)
}

/// Earliest instant at which execution is permitted
pub fn executable_at(proposal: &Proposal, config: &TreasuryConfig) -> u64 {
    voting_ends_at(proposal, config).saturating_add(config.execution_delay)
}

/// Compute the derived, time-sensitive view of a proposal
///
/// Threshold, duration and delay are read from the current configuration, so
/// a policy change applies retroactively to open proposals.
pub fn state(proposal: &Proposal, config: &TreasuryConfig, now: u64) -> ProposalState {
    let voting_ends = voting_ends_at(proposal, config);
    let is_expired = now > proposal.deadline;
    let voting_period_over = now > voting_ends;
    let has_quorum = proposal.yes_votes >= config.required_signatures;
    let execution_ready = voting_period_over && now >= executable_at(proposal, config);

    ProposalState {
        can_vote: !proposal.executed && !voting_period_over && !is_expired,
        can_execute: !proposal.executed && has_quorum && execution_ready && !is_expired,
        is_expired,
        voting_time_left: voting_ends.saturating_sub(now),
    }
}

/// Check execution eligibility, surfacing the most specific blocking error
///
/// Checks run in a fixed order so the reported error is deterministic:
/// voting window, quorum, delay, deadline, executed flag.
pub fn check_executable(
    proposal: &Proposal,
    config: &TreasuryConfig,
    now: u64,
) -> Result<(), TreasuryError> {
    if now <= voting_ends_at(proposal, config) {
        return Err(TreasuryError::VotingPeriodNotEnded);
    }
    if proposal.yes_votes < config.required_signatures {
        return Err(TreasuryError::InsufficientApprovals);
    }
    if now < executable_at(proposal, config) {
        return Err(TreasuryError::ExecutionTooEarly);
    }
    if now > proposal.deadline {
        return Err(TreasuryError::ProposalExpired);
    }
    if proposal.executed {
        return Err(TreasuryError::ProposalAlreadyExecuted);
    }
    Ok(())
}
