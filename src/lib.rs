// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Host-native backing store for linear values.
//!
//! A verification language with a native "consume exactly once" discipline
//! compiles to this crate for its linear arrays and optional slots. The crate
//! keeps that discipline: every value has one owner, consuming operations take
//! their argument by value, and a failed precondition is reported before any
//! state changes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌─────────────────────┐
//! │  default.rs  │────▶│   seq.rs     │────▶│    sequence.rs      │
//! │ (Default-    │     │ (LinearSeq:  │     │ (ImmutableSequence, │
//! │  Provider)   │     │  alloc/set/  │     │  result of unleash) │
//! └──────────────┘     │  unleash)    │     └─────────────────────┘
//!        │             └──────────────┘
//!        ▼                    │
//! ┌──────────────┐     ┌──────────────┐
//! │   maybe.rs   │────▶│   lseq.rs    │
//! │ (Full/Empty) │     │ (slots of    │
//! └──────────────┘     │  Maybe<T>)   │
//!                      └──────────────┘
//!        │                    │
//!        ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │  externs.rs (u64-indexed calls from generated code) │
//! │  session/   (runtime-checked named bindings)        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Extern Correspondence
//!
//! | Extern              | Rust API                  | Consumes |
//! |---------------------|---------------------------|----------|
//! | `seq_alloc`         | `LinearSeq::alloc`        | -        |
//! | `seq_get`           | `LinearSeq::get`          | no       |
//! | `seq_set`           | `LinearSeq::set`          | yes      |
//! | `seq_length`        | `LinearSeq::length`       | no       |
//! | `seq_free`          | `LinearSeq::free`         | yes      |
//! | `seq_unleash`       | `LinearSeq::unleash`      | yes      |
//! | `give` / `empty`    | `Maybe::give` / `empty`   | -        |
//! | `peek` / `unwrap`   | `Maybe::peek` / `unwrap`  | no / yes |
//! | `discard`           | `Maybe::discard`          | yes      |
//! | `lseq_alloc_raw`    | `LSeq::alloc_raw`         | -        |
//! | `lseq_length_raw`   | `LSeq::length_raw`        | no       |
//! | `lseq_swap_raw_fun` | `LSeq::swap_raw`          | yes      |
//! | `lseq_share_raw`    | `LSeq::share_raw`         | no       |
//! | `lseq_free_raw`     | `LSeq::free_raw`          | yes      |
//!
//! # Usage
//!
//! ```
//! use linear_extern::{LSeq, Maybe};
//!
//! let s: LSeq<u32> = LSeq::alloc_raw(2)?;
//! let (s, old) = s.swap_raw(0, Maybe::give(5)).map_err(|r| r.error)?;
//! assert_eq!(old, Maybe::Empty);
//! let (s, old) = s.swap_raw(0, Maybe::give(9)).map_err(|r| r.error)?;
//! assert_eq!(old.unwrap(), 5);
//! assert_eq!(s.share_raw(0)?, Maybe::Full(&9));
//! s.free_raw();
//! # Ok::<(), linear_extern::LinearError>(())
//! ```

// Module declarations
pub mod config;
pub mod contracts;
pub mod default;
pub mod error;
pub mod externs;
mod lseq;
mod maybe;
mod seq;
mod sequence;
pub mod session;
#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use config::Limits;
pub use default::{ConstDefault, DefaultProvider, FnDefault, StdDefault};
pub use error::{LinearError, Rejected, Violation};
pub use lseq::LSeq;
pub use maybe::Maybe;
pub use seq::LinearSeq;
pub use sequence::ImmutableSequence;
pub use session::{Report, Script, Session, SessionConfig, Step, StepFailure};
