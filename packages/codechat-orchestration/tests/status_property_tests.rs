//! Property-based tests for the analysis state machine
//!
//! For any sequence of stage calls, valid or not:
//! - progress never decreases
//! - rejected calls leave the state unchanged
//! - a terminal state accepts no further transition

use codechat_analysis::ExtractionBatch;
use codechat_orchestration::{AnalysisState, AnalysisStateMachine};
use proptest::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone)]
enum Step {
    Start,
    Fetched(usize),
    Extracted,
    GraphBuilt(usize, usize),
    Indexed(usize),
    Complete,
    Fail,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Start),
        (0usize..50).prop_map(Step::Fetched),
        Just(Step::Extracted),
        (0usize..50, 0usize..50).prop_map(|(n, e)| Step::GraphBuilt(n, e)),
        (0usize..10).prop_map(Step::Indexed),
        Just(Step::Complete),
        Just(Step::Fail),
    ]
}

fn apply(sm: &mut AnalysisStateMachine, step: &Step) -> bool {
    let result = match step {
        Step::Start => sm.start(),
        Step::Fetched(n) => sm.fetched(*n),
        Step::Extracted => sm.extracted(&ExtractionBatch::default()),
        Step::GraphBuilt(n, e) => sm.graph_built(*n, *e),
        Step::Indexed(n) => sm.record_indexed(*n),
        Step::Complete => sm.complete(),
        Step::Fail => sm.fail("stopped"),
    };
    result.is_ok()
}

proptest! {
    #[test]
    fn prop_progress_is_monotone(steps in prop::collection::vec(arb_step(), 0..30)) {
        let mut sm = AnalysisStateMachine::for_run("repo", Uuid::new_v4());
        let mut last = sm.status().progress;
        for step in &steps {
            apply(&mut sm, step);
            let progress = sm.status().progress;
            prop_assert!(progress >= last);
            prop_assert!(progress <= 100);
            last = progress;
        }
    }

    #[test]
    fn prop_rejected_steps_keep_state(steps in prop::collection::vec(arb_step(), 0..30)) {
        let mut sm = AnalysisStateMachine::for_run("repo", Uuid::new_v4());
        for step in &steps {
            let before = sm.status().state;
            let was_terminal = before.is_terminal();
            let accepted = apply(&mut sm, step);
            if !accepted {
                prop_assert_eq!(sm.status().state, before);
            }
            if was_terminal {
                prop_assert!(!accepted);
            }
        }
    }

    #[test]
    fn prop_completed_runs_reach_full_progress(steps in prop::collection::vec(arb_step(), 0..30)) {
        let mut sm = AnalysisStateMachine::for_run("repo", Uuid::new_v4());
        for step in &steps {
            apply(&mut sm, step);
        }
        let status = sm.status();
        if status.state == AnalysisState::Completed {
            prop_assert_eq!(status.progress, 100);
            prop_assert!(status.success);
        }
        if status.state == AnalysisState::Failed {
            prop_assert!(!status.success);
            prop_assert_eq!(status.error.as_deref(), Some("stopped"));
        }
    }
}
