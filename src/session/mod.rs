// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime-checked linear bindings for dynamic callers.
//!
//! The typed API enforces "consume exactly once" through moves. Callers that
//! cannot lean on the borrow checker (scripts, fuzzers, foreign bindings)
//! use a [`Session`] instead: named bindings over JSON values where consuming
//! a binding leaves a tombstone, and any later use reports a
//! `ContractViolation` naming the operation that consumed it.
//!
//! A step either completes or fails with the session unchanged. [`Session::run`]
//! stops at the first failing step.

mod step;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::Limits;
use crate::default::ConstDefault;
use crate::error::{LinearError, Violation};
use crate::lseq::LSeq;
use crate::maybe::Maybe;
use crate::seq::LinearSeq;
use crate::sequence::ImmutableSequence;

pub use step::{Kind, NameState, Script, Step};

/// Session settings, usually read from a script's `config` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Value fresh `alloc` slots are filled with.
    pub default_value: Value,
    pub limits: Limits,
    /// Treat `free_raw` as the checked free that rejects occupied slots.
    pub strict_free: bool,
}

/// A failed step: its position, its operation and the error.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("step {step} ({op}): {error}")]
pub struct StepFailure {
    pub step: usize,
    pub op: &'static str,
    #[serde(serialize_with = "display")]
    #[source]
    pub error: LinearError,
}

impl StepFailure {
    pub(crate) fn new(step: usize, op: &'static str, error: LinearError) -> Self {
        Self { step, op, error }
    }
}

fn display<S: Serializer>(error: &LinearError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Result of one executed step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub step: usize,
    pub op: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StepFailure>,
}

impl Report {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

enum Binding {
    Seq(LinearSeq<Value>),
    LSeq(LSeq<Value>),
    Maybe(Maybe<Value>),
    Sequence(ImmutableSequence<Value>),
}

impl Binding {
    fn kind(&self) -> Kind {
        match self {
            Binding::Seq(_) => Kind::Seq,
            Binding::LSeq(_) => Kind::LSeq,
            Binding::Maybe(_) => Kind::Maybe,
            Binding::Sequence(_) => Kind::Sequence,
        }
    }

    fn describe(&self) -> Value {
        match self {
            Binding::Seq(s) => json!({ "kind": "seq", "elements": s.as_slice() }),
            Binding::LSeq(s) => {
                let slots: Vec<Value> = (0..s.length_raw())
                    .map(|i| s.share_raw(i).map_or(Value::Null, maybe_json))
                    .collect();
                json!({ "kind": "lseq", "slots": slots })
            }
            Binding::Maybe(m) => json!({ "kind": "maybe", "slot": maybe_json(m.as_ref()) }),
            Binding::Sequence(s) => json!({ "kind": "sequence", "elements": s.as_slice() }),
        }
    }
}

enum Entry {
    Live(Binding),
    Consumed(&'static str),
}

fn maybe_json(m: Maybe<&Value>) -> Value {
    match m {
        Maybe::Full(value) => json!({ "full": value }),
        Maybe::Empty => json!("empty"),
    }
}

fn index(i: u64) -> usize {
    // Saturate: anything past usize is out of range for every sequence.
    usize::try_from(i).unwrap_or(usize::MAX)
}

/// Named linear bindings with runtime consumption tracking.
#[derive(Default)]
pub struct Session {
    config: SessionConfig,
    bindings: BTreeMap<String, Entry>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            bindings: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run every step in order, stopping at the first failure.
    pub fn run(&mut self, steps: &[Step]) -> Report {
        let mut outcomes = Vec::with_capacity(steps.len());
        for (i, step) in steps.iter().enumerate() {
            match self.execute(step) {
                Ok(value) => outcomes.push(Outcome {
                    step: i,
                    op: step.op(),
                    value,
                }),
                Err(error) => {
                    tracing::debug!(step = i, op = step.op(), %error, "step failed");
                    return Report {
                        outcomes,
                        failure: Some(StepFailure::new(i, step.op(), error)),
                    };
                }
            }
        }
        Report {
            outcomes,
            failure: None,
        }
    }

    /// Execute one step. On error the session is unchanged.
    pub fn execute(&mut self, step: &Step) -> Result<Option<Value>, LinearError> {
        // INVARIANT: NAMES_BEFORE_VALUES
        // Every name-level check happens here, before any binding moves.
        step.validate(|name| self.state(name))?;
        tracing::debug!(op = step.op(), "execute");

        let op = step.op();
        match step {
            Step::Alloc { name, length } => {
                let provider = ConstDefault(self.config.default_value.clone());
                let seq = LinearSeq::alloc_with(*length, &provider, &self.config.limits)?;
                self.bind(name, Binding::Seq(seq));
                Ok(None)
            }
            Step::AllocInit {
                name,
                length,
                value,
            } => {
                let length = self.config.limits.admit(*length)?;
                let seq = LinearSeq::alloc_init(length, value.clone())?;
                self.bind(name, Binding::Seq(seq));
                Ok(None)
            }
            Step::Get { seq, index: i } => {
                let value = self.seq(seq)?.get_cloned(index(*i))?;
                Ok(Some(value))
            }
            Step::Set {
                seq,
                index: i,
                value,
            } => {
                let s = self.take_seq(seq)?;
                match s.set(index(*i), value.clone()) {
                    Ok(s) => {
                        self.bind(seq, Binding::Seq(s));
                        Ok(None)
                    }
                    Err(rejected) => {
                        let (error, (s, _value)) = rejected.into_parts();
                        self.bind(seq, Binding::Seq(s));
                        Err(error)
                    }
                }
            }
            Step::Length { seq } => Ok(Some(Value::from(self.seq(seq)?.length()))),
            Step::Free { seq } => {
                self.take_seq(seq)?.free();
                self.consume(seq, op);
                Ok(None)
            }
            Step::Unleash { seq, into } => {
                let frozen = self.take_seq(seq)?.unleash();
                self.consume(seq, op);
                let elements = Value::from(frozen.as_slice().to_vec());
                self.bind(into, Binding::Sequence(frozen));
                Ok(Some(elements))
            }
            Step::Select { sequence, index: i } => {
                let s = self.sequence(sequence)?;
                let value = s
                    .select(index(*i))
                    .cloned()
                    .ok_or_else(|| LinearError::IndexOutOfRange {
                        index: *i,
                        length: s.len(),
                    })?;
                Ok(Some(value))
            }
            Step::Give { name, value } => {
                self.bind(name, Binding::Maybe(Maybe::give(value.clone())));
                Ok(None)
            }
            Step::Empty { name } => {
                self.bind(name, Binding::Maybe(Maybe::empty()));
                Ok(None)
            }
            Step::Peek { maybe } => Ok(Some(self.maybe(maybe)?.try_peek()?.clone())),
            Step::Unwrap { maybe } => {
                if self.maybe(maybe)?.is_empty() {
                    return Err(Violation::UnwrapEmpty.into());
                }
                let value = self.take_maybe(maybe)?.try_unwrap()?;
                self.consume(maybe, op);
                Ok(Some(value))
            }
            Step::Discard { maybe } => {
                self.take_maybe(maybe)?.discard();
                self.consume(maybe, op);
                Ok(None)
            }
            Step::AllocRaw { name, length } => {
                let lseq = LSeq::alloc_raw_with(*length, &self.config.limits)?;
                self.bind(name, Binding::LSeq(lseq));
                Ok(None)
            }
            Step::LengthRaw { lseq } => Ok(Some(Value::from(self.lseq(lseq)?.length_raw()))),
            Step::SwapRaw {
                lseq,
                index: i,
                from,
                into,
            } => {
                let l = self.take_lseq(lseq)?;
                let new = match self.take_maybe(from) {
                    Ok(new) => new,
                    Err(error) => {
                        self.bind(lseq, Binding::LSeq(l));
                        return Err(error);
                    }
                };
                match l.swap_raw(index(*i), new) {
                    Ok((l, old)) => {
                        let shown = maybe_json(old.as_ref());
                        self.bind(lseq, Binding::LSeq(l));
                        self.consume(from, op);
                        self.bind(into, Binding::Maybe(old));
                        Ok(Some(shown))
                    }
                    Err(rejected) => {
                        let (error, (l, new)) = rejected.into_parts();
                        self.bind(lseq, Binding::LSeq(l));
                        self.bind(from, Binding::Maybe(new));
                        Err(error)
                    }
                }
            }
            Step::ShareRaw { lseq, index: i } => {
                let shared = self.lseq(lseq)?.share_raw(index(*i))?;
                Ok(Some(maybe_json(shared)))
            }
            Step::Take { lseq, index: i } => {
                let l = self.take_lseq(lseq)?;
                match l.take(index(*i)) {
                    Ok((l, value)) => {
                        self.bind(lseq, Binding::LSeq(l));
                        Ok(Some(value))
                    }
                    Err(rejected) => {
                        let (error, l) = rejected.into_parts();
                        self.bind(lseq, Binding::LSeq(l));
                        Err(error)
                    }
                }
            }
            Step::Put {
                lseq,
                index: i,
                value,
            } => {
                let l = self.take_lseq(lseq)?;
                match l.give(index(*i), value.clone()) {
                    Ok(l) => {
                        self.bind(lseq, Binding::LSeq(l));
                        Ok(None)
                    }
                    Err(rejected) => {
                        let (error, (l, _value)) = rejected.into_parts();
                        self.bind(lseq, Binding::LSeq(l));
                        Err(error)
                    }
                }
            }
            Step::FreeRaw { lseq } if !self.config.strict_free => {
                self.take_lseq(lseq)?.free_raw();
                self.consume(lseq, op);
                Ok(None)
            }
            Step::FreeRaw { lseq } | Step::FreeLseq { lseq } => {
                match self.take_lseq(lseq)?.free() {
                    Ok(()) => {
                        self.consume(lseq, op);
                        Ok(None)
                    }
                    Err(rejected) => {
                        let (error, l) = rejected.into_parts();
                        self.bind(lseq, Binding::LSeq(l));
                        Err(error)
                    }
                }
            }
        }
    }

    /// Name-level state of `name`.
    pub fn state(&self, name: &str) -> Option<NameState> {
        self.bindings.get(name).map(|entry| match entry {
            Entry::Live(binding) => NameState::Live(binding.kind()),
            Entry::Consumed(op) => NameState::Consumed(*op),
        })
    }

    /// Linear bindings that are still live (would leak if the session ended).
    pub fn live_linear(&self) -> Vec<String> {
        self.bindings
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::Live(b) if b.kind().is_linear()))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// JSON description of every binding, live or consumed.
    pub fn snapshot(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .bindings
            .iter()
            .map(|(name, entry)| {
                let described = match entry {
                    Entry::Live(binding) => binding.describe(),
                    Entry::Consumed(op) => json!({ "consumedBy": op }),
                };
                (name.clone(), described)
            })
            .collect();
        Value::Object(map)
    }

    // ========================================================================
    // BINDING ACCESS
    // ========================================================================

    fn bind(&mut self, name: &str, binding: Binding) {
        self.bindings.insert(name.to_string(), Entry::Live(binding));
    }

    fn consume(&mut self, name: &str, op: &'static str) {
        self.bindings.insert(name.to_string(), Entry::Consumed(op));
    }

    fn live(&self, name: &str, expected: Kind) -> Result<&Binding, LinearError> {
        match self.bindings.get(name) {
            Some(Entry::Live(binding)) if binding.kind() == expected => Ok(binding),
            _ => Err(self.access_error(name, expected)),
        }
    }

    /// Move a binding out of the table. Put it back with `bind` or mark it
    /// with `consume` before returning.
    fn remove(&mut self, name: &str, expected: Kind) -> Result<Binding, LinearError> {
        self.live(name, expected)?;
        match self.bindings.remove(name) {
            Some(Entry::Live(binding)) => Ok(binding),
            _ => Err(Violation::UnknownBinding {
                name: name.to_string(),
            }
            .into()),
        }
    }

    fn access_error(&self, name: &str, expected: Kind) -> LinearError {
        let violation = match self.state(name) {
            None => Violation::UnknownBinding {
                name: name.to_string(),
            },
            Some(NameState::Consumed(op)) => Violation::UseAfterConsume {
                name: name.to_string(),
                consumed_by: op,
            },
            Some(NameState::Live(found)) => Violation::KindMismatch {
                name: name.to_string(),
                expected: expected.name(),
                found: found.name(),
            },
        };
        violation.into()
    }

    fn seq(&self, name: &str) -> Result<&LinearSeq<Value>, LinearError> {
        match self.live(name, Kind::Seq)? {
            Binding::Seq(s) => Ok(s),
            _ => Err(self.access_error(name, Kind::Seq)),
        }
    }

    fn lseq(&self, name: &str) -> Result<&LSeq<Value>, LinearError> {
        match self.live(name, Kind::LSeq)? {
            Binding::LSeq(s) => Ok(s),
            _ => Err(self.access_error(name, Kind::LSeq)),
        }
    }

    fn maybe(&self, name: &str) -> Result<&Maybe<Value>, LinearError> {
        match self.live(name, Kind::Maybe)? {
            Binding::Maybe(m) => Ok(m),
            _ => Err(self.access_error(name, Kind::Maybe)),
        }
    }

    fn sequence(&self, name: &str) -> Result<&ImmutableSequence<Value>, LinearError> {
        match self.live(name, Kind::Sequence)? {
            Binding::Sequence(s) => Ok(s),
            _ => Err(self.access_error(name, Kind::Sequence)),
        }
    }

    fn take_seq(&mut self, name: &str) -> Result<LinearSeq<Value>, LinearError> {
        match self.remove(name, Kind::Seq)? {
            Binding::Seq(s) => Ok(s),
            other => Err(self.restore(name, other, Kind::Seq)),
        }
    }

    fn take_lseq(&mut self, name: &str) -> Result<LSeq<Value>, LinearError> {
        match self.remove(name, Kind::LSeq)? {
            Binding::LSeq(s) => Ok(s),
            other => Err(self.restore(name, other, Kind::LSeq)),
        }
    }

    fn take_maybe(&mut self, name: &str) -> Result<Maybe<Value>, LinearError> {
        match self.remove(name, Kind::Maybe)? {
            Binding::Maybe(m) => Ok(m),
            other => Err(self.restore(name, other, Kind::Maybe)),
        }
    }

    fn restore(&mut self, name: &str, binding: Binding, expected: Kind) -> LinearError {
        self.bind(name, binding);
        self.access_error(name, expected)
    }
}
