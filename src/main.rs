// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use linear_extern::{Script, Session};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::display::{green, render_bindings, render_failure, render_report};
use cli::{Cli, Commands, Format};

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "LINEAR_EXTERN_LOG";

const DEMO_SEQ: &str = r#"{
  "config": { "defaultValue": 0 },
  "steps": [
    { "op": "alloc", "name": "s", "length": 3 },
    { "op": "set", "seq": "s", "index": 1, "value": 7 },
    { "op": "get", "seq": "s", "index": 1 },
    { "op": "unleash", "seq": "s", "into": "frozen" }
  ]
}"#;

const DEMO_LSEQ: &str = r#"{
  "steps": [
    { "op": "alloc_raw", "name": "l", "length": 2 },
    { "op": "give", "name": "five", "value": 5 },
    { "op": "swap_raw", "lseq": "l", "index": 0, "from": "five", "into": "old" },
    { "op": "discard", "maybe": "old" },
    { "op": "give", "name": "nine", "value": 9 },
    { "op": "swap_raw", "lseq": "l", "index": 0, "from": "nine", "into": "old" },
    { "op": "share_raw", "lseq": "l", "index": 0 }
  ]
}"#;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    // Ignore the error: a subscriber may already be installed in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn dispatch(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Run {
            script,
            format,
            pretty,
            strict_free,
            max_slots,
            bindings,
        } => {
            let mut script = load_script(&script)?;
            if strict_free {
                script.config.strict_free = true;
            }
            if let Some(max_slots) = max_slots {
                script.config.limits.max_slots = max_slots;
            }
            run_script(&script, format, pretty, bindings)
        }
        Commands::Check { script } => {
            let script = load_script(&script)?;
            match script.check() {
                Ok(()) => {
                    for name in script.leaked() {
                        tracing::warn!(binding = %name, "linear value still live at end of script");
                    }
                    println!("{} {} steps", green("ok"), script.steps.len());
                    Ok(ExitCode::SUCCESS)
                }
                Err(failure) => {
                    eprintln!("{}", render_failure(&failure));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Demo => {
            for text in [DEMO_SEQ, DEMO_LSEQ] {
                let script = Script::from_json(text).context("built-in demo script")?;
                run_script(&script, Format::Text, false, true)?;
                println!();
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_script(path: &str) -> Result<Script> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading script from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading script {}", path))?
    };
    Script::from_json(&text).with_context(|| format!("parsing script {}", path))
}

fn run_script(script: &Script, format: Format, pretty: bool, bindings: bool) -> Result<ExitCode> {
    let mut session = Session::new(script.config.clone());
    let report = session.run(&script.steps);

    for name in session.live_linear() {
        tracing::warn!(binding = %name, "linear value still live at end of run");
    }

    match format {
        Format::Json => {
            let mut doc = serde_json::to_value(&report)?;
            if bindings {
                doc["bindings"] = session.snapshot();
            }
            let out = if pretty {
                serde_json::to_string_pretty(&doc)?
            } else {
                serde_json::to_string(&doc)?
            };
            println!("{}", out);
        }
        Format::Text => {
            print!("{}", render_report(&report));
            if bindings {
                print!("{}", render_bindings(&session.snapshot()));
            }
        }
    }

    match &report.failure {
        None => Ok(ExitCode::SUCCESS),
        Some(failure) => {
            eprintln!("❌ {}", failure);
            Ok(ExitCode::FAILURE)
        }
    }
}
