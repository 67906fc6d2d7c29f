//! Error types for the Treasury Multisig contract

use soroban_sdk::contracterror;

/// Treasury contract errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TreasuryError {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Contract has not been initialized
    NotInitialized = 2,
    /// Caller is not authorized for this operation
    Unauthorized = 3,
    /// Caller is not a registered signer
    NotASigner = 4,
    /// Contract is paused; mutating operations are rejected
    ContractPaused = 5,
    /// Proposal with given ID was not found
    ProposalNotFound = 6,
    /// Proposal has already been executed
    ProposalAlreadyExecuted = 7,
    /// Proposal deadline has passed
    ProposalExpired = 8,
    /// Signer has already voted on this proposal
    AlreadyVoted = 9,
    /// Voting window for this proposal is closed
    VotingClosed = 10,
    /// Voting window for this proposal is still open
    VotingPeriodNotEnded = 11,
    /// Proposal does not have enough yes votes to execute
    InsufficientApprovals = 12,
    /// Execution delay has not elapsed yet
    ExecutionTooEarly = 13,
    /// The dispatched call failed; proposal remains executable
    ExecutionFailed = 14,
    /// Deadline is not in the future
    InvalidDeadline = 15,
    /// Deadline leaves no usable voting window
    DeadlineTooShort = 16,
    /// Invoke target is not a valid external contract
    InvalidTarget = 17,
    /// Transfer amount must be positive
    InvalidAmount = 18,
    /// Batch argument vectors have differing lengths
    LengthMismatch = 19,
    /// Threshold must be greater than zero
    InvalidThreshold = 20,
    /// Threshold would exceed the number of signers
    ThresholdExceedsSigners = 21,
    /// Signer already exists in the signer list
    SignerAlreadyExists = 22,
    /// Signer was not found in the signer list
    SignerNotFound = 23,
    /// Cannot remove the last signer
    CannotRemoveLastSigner = 24,
    /// Maximum number of signers has been reached
    MaxSignersReached = 25,
    /// Duration is outside the allowed bounds
    InvalidDuration = 26,
    /// Signer list cannot be empty
    EmptySignerList = 27,
}
