//! Data types for the Treasury Multisig contract

use soroban_sdk::{contracttype, Address, Symbol, Val, Vec};

/// Lower bound on the voting-window duration (1 hour, in seconds)
pub const MIN_PROPOSAL_DURATION: u64 = 60 * 60;

/// Upper bound on the voting-window duration (30 days, in seconds)
pub const MAX_PROPOSAL_DURATION: u64 = 30 * 24 * 60 * 60;

/// Upper bound on the post-voting execution delay (30 days, in seconds)
pub const MAX_EXECUTION_DELAY: u64 = 30 * 24 * 60 * 60;

/// Minimum gap between submission and deadline (1 hour, in seconds)
pub const MIN_DEADLINE_WINDOW: u64 = 60 * 60;

/// Maximum number of signers allowed
pub const MAX_SIGNERS: u32 = 20;

/// Information about a signer
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignerInfo {
    /// Address of the signer
    pub address: Address,
    /// Timestamp when the signer was added
    pub added_at: u64,
}

/// A token transfer out of the treasury
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferAction {
    /// Token contract to transfer
    pub token: Address,
    /// Recipient of the funds
    pub to: Address,
    /// Amount to transfer
    pub amount: i128,
}

/// An arbitrary call against an external contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvokeAction {
    /// Target contract address to call
    pub target: Address,
    /// Function name to invoke on the target
    pub function: Symbol,
    /// Arguments for the function call
    pub args: Vec<Val>,
}

/// A change to the signer set or policy parameters
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GovernanceAction {
    /// Add a new signer
    AddSigner(Address),
    /// Remove an existing signer
    RemoveSigner(Address),
    /// Change the approval threshold
    SetThreshold(u32),
    /// Change the voting-window duration (seconds)
    SetProposalDuration(u64),
    /// Change the post-voting execution delay (seconds)
    SetExecutionDelay(u64),
}

/// The payload a proposal dispatches on execution
///
/// Fund transfers, external calls and self-governance all flow through the
/// same submit/vote/execute pipeline; only the dispatch step differs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProposalAction {
    /// Send tokens from the treasury
    Transfer(TransferAction),
    /// Call an external contract
    Invoke(InvokeAction),
    /// Mutate the signer set or policy parameters
    Governance(GovernanceAction),
}

/// A treasury proposal
///
/// Lifecycle state (open, executable, expired, failed) is not stored; it is
/// derived from the tallies and timestamps on every read. Only `executed` and
/// the vote counts are persisted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    /// Dense, monotonically increasing identifier
    pub id: u64,
    /// Address of the signer who submitted the proposal
    pub proposer: Address,
    /// What the proposal does when executed
    pub action: ProposalAction,
    /// Timestamp when the proposal was submitted
    pub created_at: u64,
    /// Hard outer bound after which the proposal can never execute
    pub deadline: u64,
    /// Number of yes votes
    pub yes_votes: u32,
    /// Number of no votes
    pub no_votes: u32,
    /// Whether the proposal has been executed
    pub executed: bool,
    /// Timestamp when the proposal was executed
    pub executed_at: Option<u64>,
}

/// Configuration for the treasury contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasuryConfig {
    /// Number of yes votes required to execute a proposal
    pub required_signatures: u32,
    /// Voting-window length in seconds
    pub proposal_duration: u64,
    /// Mandatory wait after the voting window closes, in seconds
    pub execution_delay: u64,
    /// Maximum number of signers allowed
    pub max_signers: u32,
}

/// Derived, time-sensitive view of a proposal
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalState {
    /// Whether a vote can still be cast
    pub can_vote: bool,
    /// Whether the proposal can be executed right now
    pub can_execute: bool,
    /// Whether the deadline has passed
    pub is_expired: bool,
    /// Seconds of voting window remaining
    pub voting_time_left: u64,
}
