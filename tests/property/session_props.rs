//! Random scripts over a small name pool.
//!
//! Verifies that:
//! 1. A script that passes `check` never fails at run time with a name-level
//!    violation (unknown, consumed, wrong kind, shadowed)
//! 2. A failing step leaves every binding exactly as it was
//! 3. `check` and `run` agree on the first name-level failure

use linear_extern::{LinearError, Script, Session, SessionConfig, Step, Violation};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// STRATEGIES
// ============================================================================

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "m", "n"]).prop_map(String::from)
}

fn step() -> impl Strategy<Value = Step> {
    let len = 0u64..4;
    let idx = 0u64..5;
    let val = any::<i8>().prop_map(|v| json!(v));
    prop_oneof![
        (name(), len.clone()).prop_map(|(name, length)| Step::Alloc { name, length }),
        (name(), idx.clone()).prop_map(|(seq, index)| Step::Get { seq, index }),
        (name(), idx.clone(), val.clone())
            .prop_map(|(seq, index, value)| Step::Set { seq, index, value }),
        name().prop_map(|seq| Step::Free { seq }),
        (name(), name()).prop_map(|(seq, into)| Step::Unleash { seq, into }),
        (name(), idx.clone()).prop_map(|(sequence, index)| Step::Select { sequence, index }),
        (name(), val.clone()).prop_map(|(name, value)| Step::Give { name, value }),
        name().prop_map(|name| Step::Empty { name }),
        name().prop_map(|maybe| Step::Peek { maybe }),
        name().prop_map(|maybe| Step::Unwrap { maybe }),
        name().prop_map(|maybe| Step::Discard { maybe }),
        (name(), len).prop_map(|(name, length)| Step::AllocRaw { name, length }),
        (name(), idx.clone(), name(), name())
            .prop_map(|(lseq, index, from, into)| Step::SwapRaw { lseq, index, from, into }),
        (name(), idx.clone()).prop_map(|(lseq, index)| Step::ShareRaw { lseq, index }),
        (name(), idx.clone()).prop_map(|(lseq, index)| Step::Take { lseq, index }),
        (name(), idx, val).prop_map(|(lseq, index, value)| Step::Put { lseq, index, value }),
        name().prop_map(|lseq| Step::FreeRaw { lseq }),
        name().prop_map(|lseq| Step::FreeLseq { lseq }),
    ]
}

fn is_name_level(error: &LinearError) -> bool {
    matches!(
        error,
        LinearError::ContractViolation(
            Violation::UnknownBinding { .. }
                | Violation::UseAfterConsume { .. }
                | Violation::KindMismatch { .. }
                | Violation::Shadowed { .. }
        )
    )
}

fn script(steps: Vec<Step>) -> Script {
    Script {
        config: SessionConfig::default(),
        steps,
    }
}

/// Scripts that pass `check` by construction: each candidate step is kept
/// only if the script still checks with it appended.
fn checked_script() -> impl Strategy<Value = Script> {
    prop::collection::vec(step(), 0..80).prop_map(|candidates| {
        let mut script = script(Vec::new());
        for step in candidates {
            script.steps.push(step);
            if script.check().is_err() {
                script.steps.pop();
            }
        }
        script
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_checked_scripts_never_misuse_names(script in checked_script()) {
        prop_assert!(script.check().is_ok());

        let report = Session::new(script.config.clone()).run(&script.steps);
        if let Some(failure) = &report.failure {
            prop_assert!(!is_name_level(&failure.error), "{}", failure);
        }
    }

    #[test]
    fn prop_failed_step_changes_nothing(steps in prop::collection::vec(step(), 1..30)) {
        let mut session = Session::default();
        for step in &steps {
            let before = session.snapshot();
            if session.execute(step).is_err() {
                prop_assert_eq!(session.snapshot(), before);
            }
        }
    }

    #[test]
    fn prop_check_finds_the_first_name_failure(steps in prop::collection::vec(step(), 1..30)) {
        let script = script(steps);
        let report = Session::default().run(&script.steps);
        let Some(failure) = report.failure else {
            // A clean run cannot have a name-level problem.
            prop_assert!(script.check().is_ok());
            return Ok(());
        };
        if is_name_level(&failure.error) {
            let checked = script.check().unwrap_err();
            prop_assert_eq!(checked.step, failure.step);
            prop_assert_eq!(checked.error, failure.error);
        }
    }
}
