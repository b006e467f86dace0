//! # Scenario DSL
//!
//! A declarative, builder-pattern API for defining readable ballot scenarios
//! in a Given-When-Then style.
//!
//! ## Example
//!
//! ```rust,ignore
//! Scenario::new("Tie goes to the later proposal")
//!     .with_voters(2)
//!     .given(|ctx| {
//!         ctx.harness.advance_to(WorkflowStatus::ProposalsRegistrationStarted);
//!         ctx.harness.add_proposal(&ctx.voters[0], "Proposal 1");
//!         ctx.harness.add_proposal(&ctx.voters[0], "Proposal 2");
//!     })
//!     .when("each proposal gets one vote", |ctx| {
//!         ctx.harness.advance_to(WorkflowStatus::VotingSessionStarted);
//!         ctx.harness.vote(&ctx.voters[0], 0);
//!         ctx.harness.vote(&ctx.voters[1], 1);
//!     })
//!     .then("the later proposal wins", |ctx| {
//!         ctx.harness.advance_to(WorkflowStatus::VotesTallied);
//!         assert!(ctx.harness.winner_is("Proposal 2"));
//!     })
//!     .run();
//! ```

extern crate std;

use soroban_sdk::Address;
use std::string::String;
use std::vec::Vec;

use super::invariants::InvariantSet;
use super::{TestEnv, VotingTestHarness};

// ── Scenario Context ─────────────────────────────────────────────────────────

/// Mutable context passed to scenario steps.
///
/// Holds a reference to the harness plus the addresses whitelisted for the
/// scenario. Steps may push further addresses to have them included in
/// invariant snapshots.
pub struct ScenarioContext<'a, 'b> {
    pub harness: &'a VotingTestHarness<'b>,
    pub voters: Vec<Address>,
    /// Storage for values carried between steps (proposal ids, counts).
    pub data: std::collections::HashMap<String, u32>,
}

impl<'a, 'b> ScenarioContext<'a, 'b> {
    fn new(harness: &'a VotingTestHarness<'b>) -> Self {
        Self {
            harness,
            voters: Vec::new(),
            data: std::collections::HashMap::new(),
        }
    }

    /// Store a named value for use in later steps.
    pub fn store(&mut self, key: &str, value: u32) {
        self.data.insert(key.into(), value);
    }

    /// Retrieve a named value stored by a previous step.
    pub fn load(&self, key: &str) -> u32 {
        *self
            .data
            .get(key)
            .unwrap_or_else(|| panic!("Scenario variable '{}' not found", key))
    }
}

// ── Step Types ───────────────────────────────────────────────────────────────

type StepFn = Box<dyn FnOnce(&mut ScenarioContext<'_, '_>)>;

struct GivenStep {
    action: StepFn,
}

struct WhenStep {
    description: String,
    action: StepFn,
}

struct ThenStep {
    description: String,
    assertion: StepFn,
}

// ── Scenario Builder ─────────────────────────────────────────────────────────

/// A declarative test scenario with Given-When-Then structure.
///
/// Steps are collected via the builder and executed in order during `run()`.
/// Invariants can optionally be checked between When and Then phases.
pub struct Scenario {
    name: String,
    voters: usize,
    given_steps: Vec<GivenStep>,
    when_steps: Vec<WhenStep>,
    then_steps: Vec<ThenStep>,
    invariants: Option<InvariantSet>,
}

impl Scenario {
    /// Create a new scenario with a descriptive name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            voters: 0,
            given_steps: Vec::new(),
            when_steps: Vec::new(),
            then_steps: Vec::new(),
            invariants: None,
        }
    }

    /// Whitelist `n` fresh voters before the first Given step runs.
    pub fn with_voters(mut self, n: usize) -> Self {
        self.voters = n;
        self
    }

    /// Add a precondition/setup step.
    pub fn given<F>(mut self, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.given_steps.push(GivenStep {
            action: Box::new(action),
        });
        self
    }

    /// Add an action step with a description.
    pub fn when<F>(mut self, description: &str, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.when_steps.push(WhenStep {
            description: description.into(),
            action: Box::new(action),
        });
        self
    }

    /// Add an assertion step with a description.
    pub fn then<F>(mut self, description: &str, assertion: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.then_steps.push(ThenStep {
            description: description.into(),
            assertion: Box::new(assertion),
        });
        self
    }

    /// Attach invariants to check between when and then phases.
    pub fn with_invariants(mut self, invariants: InvariantSet) -> Self {
        self.invariants = Some(invariants);
        self
    }

    /// Execute the scenario.
    ///
    /// Deploys a fresh ballot, runs all steps in order and panics on the
    /// first failed assertion or invariant, naming the failing step.
    pub fn run(self) {
        let mut env = TestEnv::new();
        let harness = VotingTestHarness::new(&mut env);
        let mut ctx = ScenarioContext::new(&harness);
        ctx.voters = harness.create_voters(self.voters);

        for step in self.given_steps {
            (step.action)(&mut ctx);
        }

        for step in self.when_steps {
            run_step(&self.name, "when", &step.description, step.action, &mut ctx);
        }

        if let Some(ref invariants) = self.invariants {
            let snapshot = harness.snapshot(&ctx.voters);
            let violations = invariants.check_all(&snapshot);
            if !violations.is_empty() {
                let mut report = std::format!(
                    "Scenario '{}': invariant violations after actions:\n",
                    self.name
                );
                for (name, msg) in &violations {
                    report.push_str(&std::format!("  ✗ [{}]: {}\n", name, msg));
                }
                panic!("{}", report);
            }
        }

        for step in self.then_steps {
            run_step(&self.name, "then", &step.description, step.assertion, &mut ctx);
        }
    }
}

/// Run one described step, re-raising a failure with the step named.
fn run_step(
    scenario: &str,
    phase: &str,
    description: &str,
    step: StepFn,
    ctx: &mut ScenarioContext<'_, '_>,
) {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| step(ctx)));
    if let Err(payload) = result {
        let cause = payload
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| payload.downcast_ref::<&str>().copied())
            .unwrap_or("non-string panic");
        panic!(
            "Scenario '{}' failed at {} step '{}': {}",
            scenario, phase, description, cause
        );
    }
}

// ── Assertion Helpers ────────────────────────────────────────────────────────

/// Assert that an action fails with the expected contract error.
///
/// Uses `try_*` client methods that return `Result`.
#[macro_export]
macro_rules! assert_contract_error {
    ($result:expr, $expected:expr) => {
        match $result {
            Err(Ok(e)) => assert_eq!(
                e, $expected,
                "Expected error {:?}, got {:?}",
                $expected, e
            ),
            Err(Err(e)) => panic!("Unexpected SDK error: {:?}", e),
            Ok(_) => panic!("Expected error {:?}, but operation succeeded", $expected),
        }
    };
}

// ── Batch Scenario Runner ────────────────────────────────────────────────────

/// Run multiple scenarios and collect results.
///
/// Returns the number of passed and failed scenarios.
pub fn run_scenarios(scenarios: Vec<Scenario>) -> (usize, usize) {
    let total = scenarios.len();
    let mut failures = 0;

    for scenario in scenarios {
        let name = scenario.name.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            scenario.run();
        }));

        match result {
            Ok(()) => std::eprintln!("  ✓ {}", name),
            Err(_) => {
                std::eprintln!("  ✗ {}", name);
                failures += 1;
            }
        }
    }

    (total - failures, failures)
}
