// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal rendering for run reports.
//!
//! Colors only when stdout is a terminal and `NO_COLOR` is unset, so piped
//! output stays plain.

use std::io::IsTerminal;
use std::sync::OnceLock;

use linear_extern::{Report, StepFailure};
use serde_json::Value;

static COLOR: OnceLock<bool> = OnceLock::new();

fn color_enabled() -> bool {
    *COLOR.get_or_init(|| std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal())
}

fn paint(code: &str, text: &str) -> String {
    if color_enabled() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

pub fn green(text: &str) -> String {
    paint("32", text)
}

pub fn red(text: &str) -> String {
    paint("31", text)
}

pub fn dim(text: &str) -> String {
    paint("2", text)
}

/// One line per executed step, then the failure if there was one.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    for outcome in &report.outcomes {
        let value = outcome
            .value
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_default();
        out.push_str(&format!(
            "{} {:>4}  {:<10} {}\n",
            green("✓"),
            outcome.step,
            outcome.op,
            value
        ));
    }
    if let Some(failure) = &report.failure {
        out.push_str(&render_failure(failure));
        out.push('\n');
    }
    out
}

pub fn render_failure(failure: &StepFailure) -> String {
    format!(
        "{} {:>4}  {:<10} {}",
        red("✗"),
        failure.step,
        failure.op,
        failure.error
    )
}

/// Pretty-printed binding table from a session snapshot.
pub fn render_bindings(snapshot: &Value) -> String {
    let Some(map) = snapshot.as_object() else {
        return String::new();
    };
    let mut out = String::new();
    for (name, binding) in map {
        out.push_str(&format!("  {:<12} {}\n", name, dim(&binding.to_string())));
    }
    out
}
