//! The `linear-extern` binary.

use super::common::script_file;
use std::io::Write;
use std::process::{Command, Output, Stdio};

const SCENARIO: &str = r#"{
  "config": { "defaultValue": 0 },
  "steps": [
    { "op": "alloc", "name": "s", "length": 3 },
    { "op": "set", "seq": "s", "index": 1, "value": 7 },
    { "op": "get", "seq": "s", "index": 1 },
    { "op": "unleash", "seq": "s", "into": "t" }
  ]
}"#;

const USE_AFTER_FREE: &str = r#"{ "steps": [
  { "op": "alloc", "name": "s", "length": 1 },
  { "op": "free", "seq": "s" },
  { "op": "length", "seq": "s" }
] }"#;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_linear-extern"));
    cmd.env_remove("LINEAR_EXTERN_LOG").env("NO_COLOR", "1");
    cmd
}

fn run(args: &[&str]) -> Output {
    bin().args(args).output().expect("spawn linear-extern")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn run_prints_a_json_report() {
    let file = script_file(SCENARIO);
    let output = run(&["run", file.path().to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));

    let report: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    let outcomes = report["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[2]["op"], "get");
    assert_eq!(outcomes[2]["value"], 7);
    assert_eq!(outcomes[3]["value"], serde_json::json!([0, 7, 0]));
    assert!(report.get("failure").is_none());
}

#[test]
fn run_with_bindings_includes_the_table() {
    let file = script_file(SCENARIO);
    let output = run(&["run", file.path().to_str().unwrap(), "--bindings"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(report["bindings"]["s"]["consumedBy"], "unleash");
    assert_eq!(report["bindings"]["t"]["kind"], "sequence");
}

#[test]
fn run_text_format() {
    let file = script_file(SCENARIO);
    let output = run(&["run", file.path().to_str().unwrap(), "--format", "text"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 4);
    assert!(text.contains("get"));
    assert!(!text.contains('\x1b'), "piped output must be uncolored");
}

#[test]
fn run_reports_the_failing_step() {
    let file = script_file(USE_AFTER_FREE);
    let output = run(&["run", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(report["failure"]["step"], 2);
    assert_eq!(report["failure"]["op"], "length");
    assert!(report["failure"]["error"]
        .as_str()
        .unwrap()
        .contains("consumed by free"));
    assert!(stderr(&output).contains("step 2 (length)"));
}

#[test]
fn run_max_slots_override() {
    let file = script_file(SCENARIO);
    let output = run(&["run", file.path().to_str().unwrap(), "--max-slots", "2"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot allocate 3 slots"));
}

#[test]
fn run_reads_stdin() {
    let mut child = bin()
        .args(["run", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn linear-extern");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(SCENARIO.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("\"outcomes\""));
}

#[test]
fn check_accepts_a_linear_script() {
    let file = script_file(SCENARIO);
    let output = run(&["check", file.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("ok 4 steps"));
}

#[test]
fn check_rejects_use_after_free() {
    let file = script_file(USE_AFTER_FREE);
    let output = run(&["check", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("'s' was consumed by free"));
}

#[test]
fn check_warns_about_leaked_values() {
    let file = script_file(r#"{ "steps": [{ "op": "alloc_raw", "name": "l", "length": 1 }] }"#);
    let output = run(&["check", file.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("still live"));
}

#[test]
fn malformed_script_exits_with_2() {
    let file = script_file(r#"{ "steps": [{ "op": "no_such_op" }] }"#);
    let output = run(&["run", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("parsing script"));
}

#[test]
fn missing_file_exits_with_2() {
    let output = run(&["run", "/definitely/not/here.json"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("reading script"));
}

#[test]
fn demo_runs_both_scenarios() {
    let output = run(&["demo"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("swap_raw"));
    assert!(text.contains("unleash"));
    assert!(text.contains("[0,7,0]"));
}
