//! Structured event publishing for the voting contract.
#![allow(deprecated)]

use soroban_sdk::{symbol_short, Address, Env, String};

use crate::workflow::WorkflowStatus;

pub fn publish_initialized(env: &Env, admin: &Address) {
    env.events()
        .publish((symbol_short!("INIT"),), admin.clone());
}

pub fn publish_voter_registered(env: &Env, voter: &Address) {
    env.events()
        .publish((symbol_short!("VOTER_REG"),), voter.clone());
}

pub fn publish_status_change(env: &Env, previous: WorkflowStatus, new_status: WorkflowStatus) {
    env.events()
        .publish((symbol_short!("STATUS"),), (previous, new_status));
}

pub fn publish_proposal_registered(env: &Env, proposal_id: u32, description: &String) {
    env.events().publish(
        (symbol_short!("PROP_REG"), proposal_id),
        description.clone(),
    );
}

pub fn publish_voted(env: &Env, voter: &Address, proposal_id: u32) {
    env.events()
        .publish((symbol_short!("VOTED"), proposal_id), voter.clone());
}

pub fn publish_votes_tallied(env: &Env, winning_proposal_id: u32, vote_count: u32) {
    env.events().publish(
        (symbol_short!("TALLIED"), winning_proposal_id),
        vote_count,
    );
}
