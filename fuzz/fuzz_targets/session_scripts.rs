// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the session interpreter.
//!
//! Arbitrary bytes are parsed as a script. Parsing may fail; running a parsed
//! script must not panic, and a script that passes `check` must never hit a
//! name-level violation at run time.

#![no_main]

use libfuzzer_sys::fuzz_target;
use linear_extern::{LinearError, Script, Session, Violation};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut script) = Script::from_json(text) else {
        return;
    };
    // Keep allocations small whatever the script asks for.
    script.config.limits.max_slots = script.config.limits.max_slots.min(4096);

    let checked = script.check();
    let report = Session::new(script.config.clone()).run(&script.steps);

    if checked.is_ok() {
        if let Some(failure) = &report.failure {
            assert!(
                !matches!(
                    failure.error,
                    LinearError::ContractViolation(
                        Violation::UnknownBinding { .. }
                            | Violation::UseAfterConsume { .. }
                            | Violation::KindMismatch { .. }
                            | Violation::Shadowed { .. }
                    )
                ),
                "checked script failed at run time: {}",
                failure
            );
        }
    }
});
