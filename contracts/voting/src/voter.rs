//! Voter registry keyed by address.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

const VOTER: Symbol = symbol_short!("VOTER");

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// Per-address ballot record. Unknown addresses read as the default record.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Voter {
    pub is_whitelisted: bool,
    pub has_voted: bool,
    /// Index of the proposal this voter chose, once they have voted.
    pub voted_proposal_id: Option<u32>,
}

fn voter_key(address: &Address) -> (Symbol, Address) {
    (VOTER, address.clone())
}

pub(crate) fn load(env: &Env, address: &Address) -> Voter {
    let key = voter_key(address);
    match env.storage().persistent().get::<_, Voter>(&key) {
        Some(voter) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            voter
        }
        None => Voter::default(),
    }
}

pub(crate) fn store(env: &Env, address: &Address, voter: &Voter) {
    let key = voter_key(address);
    env.storage().persistent().set(&key, voter);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn is_whitelisted(env: &Env, address: &Address) -> bool {
    load(env, address).is_whitelisted
}
