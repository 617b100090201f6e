// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the linear-extern command-line interface.
//!
//! Three subcommands: `run` executes a JSON script against a fresh session,
//! `check` runs the name-level linearity check without executing, and `demo`
//! walks through the two reference scenarios.

pub mod display;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "linear-extern",
    about = "Run and check scripts against the linear sequence runtime",
    version
)]
pub struct Cli {
    /// More logging on stderr (-v debug, -vv trace). `LINEAR_EXTERN_LOG` wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a script and print the outcome of each step
    Run {
        /// Path to the JSON script, or `-` for stdin
        script: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Reject free_raw on an lseq with occupied slots
        #[arg(long)]
        strict_free: bool,

        /// Override the script's allocation limit
        #[arg(long)]
        max_slots: Option<u64>,

        /// Also print every binding after the run
        #[arg(long)]
        bindings: bool,
    },

    /// Check a script's bindings without running it
    Check {
        /// Path to the JSON script, or `-` for stdin
        script: String,
    },

    /// Run the reference alloc/set/unleash and swap scenarios
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Text,
}
