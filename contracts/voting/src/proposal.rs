//! Append-only proposal list.
//!
//! Proposals are addressed by their 0-based insertion index. The counter in
//! instance storage doubles as the next free index, so indices stay dense.

use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

use crate::VotingError;

pub(crate) const PROPOSAL_CTR: Symbol = symbol_short!("PROP_CTR");
pub(crate) const PROPOSAL: Symbol = symbol_short!("PROP");

/// Upper bound on a proposal description, in bytes.
pub const MAX_DESCRIPTION_LEN: u32 = 256;

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub description: String,
    pub vote_count: u32,
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub(crate) fn count(env: &Env) -> u32 {
    env.storage().instance().get(&PROPOSAL_CTR).unwrap_or(0u32)
}

fn proposal_key(id: u32) -> (Symbol, u32) {
    (PROPOSAL, id)
}

pub(crate) fn store(env: &Env, id: u32, proposal: &Proposal) {
    let key = proposal_key(id);
    env.storage().persistent().set(&key, proposal);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u32) -> Option<Proposal> {
    if id >= count(env) {
        return None;
    }
    env.storage().persistent().get(&proposal_key(id))
}

/// Vote count of proposal `id`, zero for an index past the end.
pub(crate) fn vote_count(env: &Env, id: u32) -> u32 {
    load(env, id).map_or(0, |p| p.vote_count)
}

/// Appends a fresh proposal and returns its index.
pub(crate) fn append(env: &Env, description: String) -> u32 {
    let id = count(env);
    store(
        env,
        id,
        &Proposal {
            description,
            vote_count: 0,
        },
    );
    env.storage()
        .instance()
        .set(&PROPOSAL_CTR, &id.saturating_add(1));
    id
}

/// Every proposal in index order.
pub(crate) fn load_all(env: &Env) -> Result<Vec<Proposal>, VotingError> {
    let mut proposals = Vec::new(env);
    for id in 0..count(env) {
        proposals.push_back(load(env, id).ok_or(VotingError::NotFound)?);
    }
    Ok(proposals)
}

/// Rejects empty or oversized descriptions.
pub fn validate_description(description: &String) -> Result<(), VotingError> {
    let len = description.len();
    if len == 0 || len > MAX_DESCRIPTION_LEN {
        return Err(VotingError::InvalidArgument);
    }
    Ok(())
}
