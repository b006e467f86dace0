#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, Env, String};
use voting::{VotingContract, VotingContractClient, WorkflowStatus};

/// Actions covering every state-changing entry point.
///
/// `caller` picks from a pool of five addresses where index 0 is the
/// administrator, so admin-only calls are exercised from both sides.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Whitelist { caller: u8, voter: u8 },
    StartProposalRegistration { caller: u8 },
    AddProposal { caller: u8, len: u16 },
    EndProposalRegistration { caller: u8 },
    StartVotingSession { caller: u8 },
    Vote { caller: u8, proposal_id: u8 },
    EndVotingSession { caller: u8 },
    TallyVotes { caller: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(VotingContract, ());
    let client = VotingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    if client.try_initialize(&admin).is_err() {
        return;
    }

    let mut users = vec![admin.clone()];
    for _ in 0..4 {
        users.push(Address::generate(&env));
    }
    let pick = |i: u8| &users[i as usize % users.len()];

    let mut previous = client.status();

    for action in actions {
        match action {
            FuzzAction::Whitelist { caller, voter } => {
                let _ = client.try_whitelist_voter(pick(caller), pick(voter));
            }
            FuzzAction::StartProposalRegistration { caller } => {
                let _ = client.try_start_proposal_registration(pick(caller));
            }
            FuzzAction::AddProposal { caller, len } => {
                let text = "p".repeat(len as usize % 300);
                let _ = client.try_add_proposal(pick(caller), &String::from_str(&env, &text));
            }
            FuzzAction::EndProposalRegistration { caller } => {
                let _ = client.try_end_proposal_registration(pick(caller));
            }
            FuzzAction::StartVotingSession { caller } => {
                let _ = client.try_start_voting_session(pick(caller));
            }
            FuzzAction::Vote { caller, proposal_id } => {
                let _ = client.try_vote(pick(caller), &(proposal_id as u32 % 8));
            }
            FuzzAction::EndVotingSession { caller } => {
                let _ = client.try_end_voting_session(pick(caller));
            }
            FuzzAction::TallyVotes { caller } => {
                let _ = client.try_tally_votes(pick(caller));
            }
        }

        // ── Post-action invariant checks ──
        let status = client.status();
        assert!(
            status == previous || previous.next() == Some(status),
            "INVARIANT VIOLATION: status moved {:?} -> {:?}",
            previous,
            status
        );
        previous = status;

        let counts: Vec<u32> = client.get_proposals().iter().map(|p| p.vote_count).collect();
        let total: u32 = counts.iter().sum();
        let voted = users
            .iter()
            .filter(|u| {
                let v = client.get_voter(u);
                assert!(
                    !v.has_voted || v.is_whitelisted,
                    "INVARIANT VIOLATION: non-whitelisted voter voted"
                );
                v.has_voted
            })
            .count() as u32;
        assert_eq!(total, voted, "INVARIANT VIOLATION: vote count mismatch");

        let winner = client.winning_proposal_id();
        assert_eq!(
            winner.is_some(),
            status == WorkflowStatus::VotesTallied,
            "INVARIANT VIOLATION: winner stored outside VotesTallied"
        );
        if let Some(id) = winner {
            let top = counts.iter().copied().max().unwrap_or(0);
            let expected = counts.iter().rposition(|c| *c == top).map(|i| i as u32);
            assert_eq!(Some(id), expected, "INVARIANT VIOLATION: tie-break broken");
        }
    }
});
