#![no_std]

//! # Voting
//!
//! A single-ballot voting contract run by one administrator:
//!
//! - **Whitelist**: the administrator registers the addresses allowed to take part
//! - **Proposals**: whitelisted voters submit free-text proposals
//! - **Votes**: each whitelisted voter casts exactly one vote
//! - **Tally**: the administrator closes the ballot and a single winner is stored
//!
//! The ballot moves through a strictly linear [`WorkflowStatus`]; every
//! operation is gated on an exact status match. On an exact tie in vote
//! count the proposal registered later wins.

pub mod events;
pub mod proposal;
pub mod tally;
pub mod voter;
pub mod workflow;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec};

pub use proposal::{Proposal, MAX_DESCRIPTION_LEN};
pub use voter::Voter;
pub use workflow::WorkflowStatus;

// ── Storage key constants ─────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const WINNER: Symbol = symbol_short!("WINNER");

// TTL: ~30 days at 5s/ledger
const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
const INSTANCE_TTL_EXTEND_TO: u32 = 1_036_800;

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VotingError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// The administrator address cannot run a ballot.
    ConfigurationError = 3,
    /// Caller is not the administrator, or not a whitelisted voter.
    Unauthorized = 4,
    /// Operation attempted outside its required workflow status.
    InvalidPhase = 5,
    InvalidArgument = 6,
    /// Unknown proposal index, or a tally over zero proposals.
    NotFound = 7,
    AlreadyVoted = 8,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct VotingContract;

#[contractimpl]
impl VotingContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Open a new ballot administered by `admin`.
    ///
    /// The ballot starts in `RegisteringVoters` with no proposals and no
    /// voters. The administrator must sign the call; the contract's own
    /// address is rejected as administrator.
    pub fn initialize(env: Env, admin: Address) -> Result<(), VotingError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(VotingError::AlreadyInitialized);
        }
        if admin == env.current_contract_address() {
            return Err(VotingError::ConfigurationError);
        }
        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        workflow::store(&env, WorkflowStatus::RegisteringVoters);
        env.storage().instance().set(&INITIALIZED, &true);
        Self::extend_instance_ttl(&env);

        events::publish_initialized(&env, &admin);
        Ok(())
    }

    // ── Voter registration ────────────────────────────────────────────────────

    /// Allow `voter` to submit proposals and cast one vote.
    ///
    /// Idempotent: whitelisting an address twice leaves it whitelisted.
    pub fn whitelist_voter(env: Env, caller: Address, voter: Address) -> Result<(), VotingError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        workflow::require(&env, WorkflowStatus::RegisteringVoters)?;

        let mut record = voter::load(&env, &voter);
        record.is_whitelisted = true;
        voter::store(&env, &voter, &record);
        Self::extend_instance_ttl(&env);

        events::publish_voter_registered(&env, &voter);
        Ok(())
    }

    // ── Phase transitions ─────────────────────────────────────────────────────

    pub fn start_proposal_registration(env: Env, caller: Address) -> Result<(), VotingError> {
        Self::advance(&env, &caller, WorkflowStatus::RegisteringVoters)
    }

    pub fn end_proposal_registration(env: Env, caller: Address) -> Result<(), VotingError> {
        Self::advance(&env, &caller, WorkflowStatus::ProposalsRegistrationStarted)
    }

    pub fn start_voting_session(env: Env, caller: Address) -> Result<(), VotingError> {
        Self::advance(&env, &caller, WorkflowStatus::ProposalsRegistrationEnded)
    }

    pub fn end_voting_session(env: Env, caller: Address) -> Result<(), VotingError> {
        Self::advance(&env, &caller, WorkflowStatus::VotingSessionStarted)
    }

    // ── Proposals ─────────────────────────────────────────────────────────────

    /// Register a proposal and return its index.
    ///
    /// Indices are assigned in submission order starting at 0.
    pub fn add_proposal(env: Env, caller: Address, description: String) -> Result<u32, VotingError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_whitelisted(&env, &caller)?;
        workflow::require(&env, WorkflowStatus::ProposalsRegistrationStarted)?;
        proposal::validate_description(&description)?;

        let id = proposal::append(&env, description.clone());
        Self::extend_instance_ttl(&env);

        events::publish_proposal_registered(&env, id, &description);
        Ok(id)
    }

    // ── Voting ────────────────────────────────────────────────────────────────

    /// Cast the caller's single vote for `proposal_id`.
    pub fn vote(env: Env, caller: Address, proposal_id: u32) -> Result<(), VotingError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut record = voter::load(&env, &caller);
        if !record.is_whitelisted {
            return Err(VotingError::Unauthorized);
        }
        workflow::require(&env, WorkflowStatus::VotingSessionStarted)?;
        if record.has_voted {
            return Err(VotingError::AlreadyVoted);
        }
        let mut chosen = proposal::load(&env, proposal_id).ok_or(VotingError::NotFound)?;

        chosen.vote_count = chosen.vote_count.saturating_add(1);
        proposal::store(&env, proposal_id, &chosen);

        record.has_voted = true;
        record.voted_proposal_id = Some(proposal_id);
        voter::store(&env, &caller, &record);
        Self::extend_instance_ttl(&env);

        events::publish_voted(&env, &caller, proposal_id);
        Ok(())
    }

    // ── Tally ─────────────────────────────────────────────────────────────────

    /// Close the ballot: pick the winner and move to `VotesTallied`.
    ///
    /// Returns the winning proposal index. On an exact tie the higher index
    /// wins. Fails with `NotFound` when no proposal was ever registered, in
    /// which case the ballot stays in `VotingSessionEnded`.
    pub fn tally_votes(env: Env, caller: Address) -> Result<u32, VotingError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        workflow::require(&env, WorkflowStatus::VotingSessionEnded)?;

        let counts = (0..proposal::count(&env)).map(|id| proposal::vote_count(&env, id));
        let winner = tally::leader(counts).ok_or(VotingError::NotFound)?;

        env.storage().instance().set(&WINNER, &winner.proposal_id);
        let new_status = workflow::advance(&env, WorkflowStatus::VotingSessionEnded)?;
        Self::extend_instance_ttl(&env);

        events::publish_status_change(&env, WorkflowStatus::VotingSessionEnded, new_status);
        events::publish_votes_tallied(&env, winner.proposal_id, winner.vote_count);
        Ok(winner.proposal_id)
    }

    // ── View functions ────────────────────────────────────────────────────────

    /// Description of the winning proposal.
    pub fn get_winner_info(env: Env) -> Result<String, VotingError> {
        Ok(Self::get_winner(env)?.description)
    }

    /// Full record of the winning proposal.
    pub fn get_winner(env: Env) -> Result<Proposal, VotingError> {
        Self::require_initialized(&env)?;
        workflow::require(&env, WorkflowStatus::VotesTallied)?;
        let id: u32 = env
            .storage()
            .instance()
            .get(&WINNER)
            .ok_or(VotingError::NotFound)?;
        proposal::load(&env, id).ok_or(VotingError::NotFound)
    }

    pub fn winning_proposal_id(env: Env) -> Result<Option<u32>, VotingError> {
        Self::require_initialized(&env)?;
        Ok(env.storage().instance().get(&WINNER))
    }

    pub fn owner(env: Env) -> Result<Address, VotingError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(VotingError::NotInitialized)
    }

    pub fn status(env: Env) -> Result<WorkflowStatus, VotingError> {
        Self::require_initialized(&env)?;
        Ok(workflow::load(&env))
    }

    pub fn get_proposal(env: Env, proposal_id: u32) -> Result<Proposal, VotingError> {
        Self::require_initialized(&env)?;
        proposal::load(&env, proposal_id).ok_or(VotingError::NotFound)
    }

    pub fn get_proposals(env: Env) -> Result<Vec<Proposal>, VotingError> {
        Self::require_initialized(&env)?;
        proposal::load_all(&env)
    }

    pub fn proposal_count(env: Env) -> Result<u32, VotingError> {
        Self::require_initialized(&env)?;
        Ok(proposal::count(&env))
    }

    /// Ballot record of `address`; unknown addresses read as the default.
    pub fn get_voter(env: Env, address: Address) -> Result<Voter, VotingError> {
        Self::require_initialized(&env)?;
        Ok(voter::load(&env, &address))
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Shared body of the four plain admin transitions.
    fn advance(env: &Env, caller: &Address, from: WorkflowStatus) -> Result<(), VotingError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        Self::require_admin(env, caller)?;

        let to = workflow::advance(env, from)?;
        Self::extend_instance_ttl(env);

        events::publish_status_change(env, from, to);
        Ok(())
    }

    fn require_initialized(env: &Env) -> Result<(), VotingError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(VotingError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), VotingError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(VotingError::NotInitialized)?;
        if *caller != admin {
            return Err(VotingError::Unauthorized);
        }
        Ok(())
    }

    fn require_whitelisted(env: &Env, caller: &Address) -> Result<(), VotingError> {
        if !voter::is_whitelisted(env, caller) {
            return Err(VotingError::Unauthorized);
        }
        Ok(())
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
