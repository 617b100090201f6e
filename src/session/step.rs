// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Script steps and the name-level linearity check.
//!
//! Every step declares which bindings it reads, which it consumes, and which
//! it defines. The same declarations drive both the static
//! [`Script::check`] pass and the validation `Session` runs before touching
//! any value, so a script that passes `check` cannot hit a use-after-consume
//! at runtime.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{SessionConfig, StepFailure};
use crate::error::Violation;

/// What a binding holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Seq,
    LSeq,
    Maybe,
    Sequence,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Seq => "linear seq",
            Kind::LSeq => "lseq",
            Kind::Maybe => "maybe",
            Kind::Sequence => "sequence",
        }
    }

    /// Immutable sequences may be dropped or shadowed freely.
    pub fn is_linear(self) -> bool {
        !matches!(self, Kind::Sequence)
    }
}

/// Name-level view of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameState {
    Live(Kind),
    Consumed(&'static str),
}

/// One operation in a script. Tagged by `"op"` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Alloc { name: String, length: u64 },
    AllocInit { name: String, length: u64, value: Value },
    Get { seq: String, index: u64 },
    Set { seq: String, index: u64, value: Value },
    Length { seq: String },
    Free { seq: String },
    Unleash { seq: String, into: String },
    Select { sequence: String, index: u64 },
    Give { name: String, value: Value },
    Empty { name: String },
    Peek { maybe: String },
    Unwrap { maybe: String },
    Discard { maybe: String },
    AllocRaw { name: String, length: u64 },
    LengthRaw { lseq: String },
    /// Swap the maybe bound to `from` into the slot; bind the old content to `into`.
    SwapRaw {
        lseq: String,
        index: u64,
        from: String,
        into: String,
    },
    ShareRaw { lseq: String, index: u64 },
    Take { lseq: String, index: u64 },
    Put { lseq: String, index: u64, value: Value },
    FreeRaw { lseq: String },
    FreeLseq { lseq: String },
}

/// A binding a step touches.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Use<'a> {
    pub name: &'a str,
    pub kind: Kind,
    pub consumes: bool,
}

impl<'a> Use<'a> {
    fn reads(name: &'a str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            consumes: false,
        }
    }

    fn consumes(name: &'a str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            consumes: true,
        }
    }
}

impl Step {
    /// Operation name, as spelled in scripts.
    pub fn op(&self) -> &'static str {
        match self {
            Step::Alloc { .. } => "alloc",
            Step::AllocInit { .. } => "alloc_init",
            Step::Get { .. } => "get",
            Step::Set { .. } => "set",
            Step::Length { .. } => "length",
            Step::Free { .. } => "free",
            Step::Unleash { .. } => "unleash",
            Step::Select { .. } => "select",
            Step::Give { .. } => "give",
            Step::Empty { .. } => "empty",
            Step::Peek { .. } => "peek",
            Step::Unwrap { .. } => "unwrap",
            Step::Discard { .. } => "discard",
            Step::AllocRaw { .. } => "alloc_raw",
            Step::LengthRaw { .. } => "length_raw",
            Step::SwapRaw { .. } => "swap_raw",
            Step::ShareRaw { .. } => "share_raw",
            Step::Take { .. } => "take",
            Step::Put { .. } => "put",
            Step::FreeRaw { .. } => "free_raw",
            Step::FreeLseq { .. } => "free_lseq",
        }
    }

    /// Bindings this step reads or consumes.
    ///
    /// Operations that consume a sequence and hand the same storage back
    /// (`set`, `swap_raw`, `take`, `put`) rebind it under the same name, so at
    /// the name level they only read it.
    pub(crate) fn uses(&self) -> Vec<Use<'_>> {
        match self {
            Step::Alloc { .. }
            | Step::AllocInit { .. }
            | Step::Give { .. }
            | Step::Empty { .. }
            | Step::AllocRaw { .. } => Vec::new(),
            Step::Get { seq, .. } | Step::Set { seq, .. } | Step::Length { seq } => {
                vec![Use::reads(seq, Kind::Seq)]
            }
            Step::Free { seq } | Step::Unleash { seq, .. } => vec![Use::consumes(seq, Kind::Seq)],
            Step::Select { sequence, .. } => vec![Use::reads(sequence, Kind::Sequence)],
            Step::Peek { maybe } => vec![Use::reads(maybe, Kind::Maybe)],
            Step::Unwrap { maybe } | Step::Discard { maybe } => {
                vec![Use::consumes(maybe, Kind::Maybe)]
            }
            Step::LengthRaw { lseq }
            | Step::ShareRaw { lseq, .. }
            | Step::Take { lseq, .. }
            | Step::Put { lseq, .. } => vec![Use::reads(lseq, Kind::LSeq)],
            Step::SwapRaw { lseq, from, .. } => vec![
                Use::reads(lseq, Kind::LSeq),
                Use::consumes(from, Kind::Maybe),
            ],
            Step::FreeRaw { lseq } | Step::FreeLseq { lseq } => {
                vec![Use::consumes(lseq, Kind::LSeq)]
            }
        }
    }

    /// The binding this step introduces, if any.
    pub(crate) fn defines(&self) -> Option<(&str, Kind)> {
        match self {
            Step::Alloc { name, .. } | Step::AllocInit { name, .. } => {
                Some((name.as_str(), Kind::Seq))
            }
            Step::Unleash { into, .. } => Some((into.as_str(), Kind::Sequence)),
            Step::Give { name, .. } | Step::Empty { name } => Some((name.as_str(), Kind::Maybe)),
            Step::AllocRaw { name, .. } => Some((name.as_str(), Kind::LSeq)),
            Step::SwapRaw { into, .. } => Some((into.as_str(), Kind::Maybe)),
            _ => None,
        }
    }

    /// Check this step's bindings against the current name states.
    pub(crate) fn validate(
        &self,
        state: impl Fn(&str) -> Option<NameState>,
    ) -> Result<(), Violation> {
        let uses = self.uses();
        for used in &uses {
            match state(used.name) {
                None => {
                    return Err(Violation::UnknownBinding {
                        name: used.name.to_string(),
                    })
                }
                Some(NameState::Consumed(op)) => {
                    return Err(Violation::UseAfterConsume {
                        name: used.name.to_string(),
                        consumed_by: op,
                    })
                }
                Some(NameState::Live(kind)) if kind != used.kind => {
                    return Err(Violation::KindMismatch {
                        name: used.name.to_string(),
                        expected: used.kind.name(),
                        found: kind.name(),
                    })
                }
                Some(NameState::Live(_)) => {}
            }
        }

        if let Some((name, _)) = self.defines() {
            let released = uses.iter().any(|u| u.consumes && u.name == name);
            if let Some(NameState::Live(kind)) = state(name) {
                if kind.is_linear() && !released {
                    return Err(Violation::Shadowed {
                        name: name.to_string(),
                        kind: kind.name(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Record this step's effect on the name table.
    pub(crate) fn apply_names(&self, names: &mut BTreeMap<String, NameState>) {
        let op = self.op();
        for used in self.uses().into_iter().filter(|u| u.consumes) {
            names.insert(used.name.to_string(), NameState::Consumed(op));
        }
        if let Some((name, kind)) = self.defines() {
            names.insert(name.to_string(), NameState::Live(kind));
        }
    }
}

/// A configuration plus an ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: SessionConfig,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Check name-level linearity without executing anything.
    ///
    /// Catches unknown names, kind mismatches, uses after consume and
    /// shadowed linear values. Index and slot-state errors depend on runtime
    /// values and only surface when the script runs.
    pub fn check(&self) -> Result<(), StepFailure> {
        let mut names = BTreeMap::new();
        for (i, step) in self.steps.iter().enumerate() {
            step.validate(|name| names.get(name).copied())
                .map_err(|violation| StepFailure::new(i, step.op(), violation.into()))?;
            step.apply_names(&mut names);
        }
        Ok(())
    }

    /// Linear bindings still live after the last step.
    pub fn leaked(&self) -> Vec<String> {
        let mut names = BTreeMap::new();
        for step in &self.steps {
            step.apply_names(&mut names);
        }
        names
            .into_iter()
            .filter(|(_, state)| matches!(state, NameState::Live(kind) if kind.is_linear()))
            .map(|(name, _)| name)
            .collect()
    }
}
