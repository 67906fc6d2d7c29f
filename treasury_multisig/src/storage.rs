//! Storage keys and helpers for the Treasury Multisig contract

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Proposal, SignerInfo, TreasuryConfig};

/// Storage keys for the treasury contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Boolean flag indicating contract initialization
    Initialized,
    /// Address allowed to toggle the pause flag (instance storage)
    Owner,
    /// Boolean emergency-stop flag (instance storage)
    Paused,
    /// Treasury configuration (instance storage)
    Config,
    /// Total number of signers (instance storage)
    SignerCount,
    /// Number of proposals ever submitted; also the next id (instance storage)
    ProposalCount,
    /// Information about a specific signer (persistent storage)
    Signer(Address),
    /// List of all signer addresses, in insertion order (persistent storage)
    SignerList,
    /// A treasury proposal (persistent storage)
    Proposal(u64),
    /// A cast vote, keyed by proposal id and voter (persistent storage)
    Vote(u64, Address),
}

// ============================================================================
// Initialization Helpers
// ============================================================================

/// Check if the contract is initialized
pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Initialized)
        .unwrap_or(false)
}

/// Mark the contract as initialized
pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

// ============================================================================
// Owner / Pause Helpers
// ============================================================================

/// Get the owner address
pub fn get_owner(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .expect("owner not found")
}

/// Set the owner address
pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

/// Check if the contract is paused
pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Paused)
        .unwrap_or(false)
}

/// Set the pause flag
pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

// ============================================================================
// Configuration Helpers
// ============================================================================

/// Get the treasury configuration
pub fn get_config(env: &Env) -> TreasuryConfig {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .expect("config not found")
}

/// Set the treasury configuration
pub fn set_config(env: &Env, config: &TreasuryConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

// ============================================================================
// Signer Helpers
// ============================================================================

/// Get the current signer count
pub fn get_signer_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get::<DataKey, u32>(&DataKey::SignerCount)
        .unwrap_or(0)
}

/// Set the signer count
pub fn set_signer_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::SignerCount, &count);
}

/// Get the list of all signer addresses, in insertion order
pub fn get_signer_list(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::SignerList)
        .unwrap_or_else(|| Vec::new(env))
}

/// Set the list of all signer addresses
pub fn set_signer_list(env: &Env, signers: &Vec<Address>) {
    env.storage().persistent().set(&DataKey::SignerList, signers);
}

/// Get signer info for a specific address
pub fn get_signer_info(env: &Env, address: &Address) -> Option<SignerInfo> {
    env.storage()
        .persistent()
        .get(&DataKey::Signer(address.clone()))
}

/// Set signer info for a specific address
pub fn set_signer_info(env: &Env, address: &Address, info: &SignerInfo) {
    env.storage()
        .persistent()
        .set(&DataKey::Signer(address.clone()), info);
}

/// Remove signer info
pub fn remove_signer_info(env: &Env, address: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Signer(address.clone()));
}

/// Check if an address is a registered signer
pub fn is_signer(env: &Env, address: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Signer(address.clone()))
}

// ============================================================================
// Proposal Helpers
// ============================================================================

/// Get the number of proposals ever submitted
pub fn get_proposal_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get::<DataKey, u64>(&DataKey::ProposalCount)
        .unwrap_or(0)
}

/// Set the proposal count
pub fn set_proposal_count(env: &Env, count: u64) {
    env.storage().instance().set(&DataKey::ProposalCount, &count);
}

/// Get a proposal by id
pub fn get_proposal(env: &Env, proposal_id: u64) -> Option<Proposal> {
    env.storage()
        .persistent()
        .get(&DataKey::Proposal(proposal_id))
}

/// Set a proposal
pub fn set_proposal(env: &Env, proposal: &Proposal) {
    env.storage()
        .persistent()
        .set(&DataKey::Proposal(proposal.id), proposal);
}

// ============================================================================
// Vote Helpers
// ============================================================================

/// Get the vote cast by a signer on a proposal, if any
pub fn get_vote(env: &Env, proposal_id: u64, voter: &Address) -> Option<bool> {
    env.storage()
        .persistent()
        .get(&DataKey::Vote(proposal_id, voter.clone()))
}

/// Record a vote; write-once by construction of the callers
pub fn set_vote(env: &Env, proposal_id: u64, voter: &Address, support: bool) {
    env.storage()
        .persistent()
        .set(&DataKey::Vote(proposal_id, voter.clone()), &support);
}

/// Check if a signer has voted on a proposal
pub fn has_voted(env: &Env, proposal_id: u64, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Vote(proposal_id, voter.clone()))
}
