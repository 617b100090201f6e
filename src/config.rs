// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Allocation limits and session configuration.

use serde::{Deserialize, Serialize};

use crate::error::LinearError;

/// Upper bounds applied to every allocation that goes through `*_with`.
///
/// The default imposes no limit beyond what the allocator grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Limits {
    /// Largest slot count a single sequence may have.
    pub max_slots: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_slots: u64::MAX,
        }
    }
}

impl Limits {
    pub fn with_max_slots(max_slots: u64) -> Self {
        Self { max_slots }
    }

    /// Validate a requested length and narrow it to `usize`.
    pub(crate) fn admit(&self, requested: u64) -> Result<usize, LinearError> {
        if requested > self.max_slots {
            return Err(LinearError::Allocation {
                requested,
                reason: format!("exceeds configured limit of {} slots", self.max_slots),
            });
        }
        usize::try_from(requested).map_err(|_| LinearError::Allocation {
            requested,
            reason: "exceeds the platform address space".to_string(),
        })
    }
}

/// Reserve exactly `length` slots, reporting refusal instead of aborting.
pub(crate) fn reserve<T>(length: usize) -> Result<Vec<T>, LinearError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(length)
        .map_err(|e| LinearError::Allocation {
            requested: length as u64,
            reason: e.to_string(),
        })?;
    Ok(buf)
}
