//! Ballot workflow status and its storage.
//!
//! ```text
//! RegisteringVoters ──► ProposalsRegistrationStarted ──► ProposalsRegistrationEnded
//!         ──► VotingSessionStarted ──► VotingSessionEnded ──► VotesTallied
//! ```
//!
//! The machine is strictly linear. Each admin transition moves exactly one
//! step forward; there is no reset.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::VotingError;

const STATUS: Symbol = symbol_short!("STATUS");

/// Stage of the ballot. Discriminants are the values clients see.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum WorkflowStatus {
    RegisteringVoters = 0,
    ProposalsRegistrationStarted = 1,
    ProposalsRegistrationEnded = 2,
    VotingSessionStarted = 3,
    VotingSessionEnded = 4,
    VotesTallied = 5,
}

impl WorkflowStatus {
    /// The single successor status, `None` once votes are tallied.
    pub fn next(self) -> Option<WorkflowStatus> {
        match self {
            WorkflowStatus::RegisteringVoters => Some(WorkflowStatus::ProposalsRegistrationStarted),
            WorkflowStatus::ProposalsRegistrationStarted => {
                Some(WorkflowStatus::ProposalsRegistrationEnded)
            }
            WorkflowStatus::ProposalsRegistrationEnded => Some(WorkflowStatus::VotingSessionStarted),
            WorkflowStatus::VotingSessionStarted => Some(WorkflowStatus::VotingSessionEnded),
            WorkflowStatus::VotingSessionEnded => Some(WorkflowStatus::VotesTallied),
            WorkflowStatus::VotesTallied => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub(crate) fn load(env: &Env) -> WorkflowStatus {
    env.storage()
        .instance()
        .get(&STATUS)
        .unwrap_or(WorkflowStatus::RegisteringVoters)
}

pub(crate) fn store(env: &Env, status: WorkflowStatus) {
    env.storage().instance().set(&STATUS, &status);
}

/// Fails with `InvalidPhase` unless the ballot is exactly at `expected`.
pub(crate) fn require(env: &Env, expected: WorkflowStatus) -> Result<(), VotingError> {
    if load(env) != expected {
        return Err(VotingError::InvalidPhase);
    }
    Ok(())
}

/// Moves from `from` to its successor and returns the new status.
///
/// Callers have already checked roles; this only enforces the exact-match
/// gate and the forward-only edge.
pub(crate) fn advance(env: &Env, from: WorkflowStatus) -> Result<WorkflowStatus, VotingError> {
    require(env, from)?;
    let to = from.next().ok_or(VotingError::InvalidPhase)?;
    store(env, to);
    Ok(to)
}
