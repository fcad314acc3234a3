//! VersionId - checkpoint identity
//!
//! Ids are millisecond timestamps taken from chrono, bumped forward when
//! two checkpoints land in the same millisecond. The source is process-wide
//! so ids never repeat within a process and never move backwards.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Last id handed out by `next_version_id`
static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Checkpoint identity of a version state.
///
/// Compared by mediators against the version persisted alongside a row
/// to detect concurrent modification.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(i64);

impl VersionId {
    /// Creates a VersionId with the given value.
    #[inline]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[inline]
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for VersionId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Issues the next version id, strictly greater than `floor`.
///
/// The result is `max(now_millis, last_issued + 1, floor + 1)`.
pub fn next_version_id(floor: VersionId) -> VersionId {
    let now = Utc::now().timestamp_millis();
    let pick = |last: i64| now.max(last.saturating_add(1)).max(floor.0.saturating_add(1));

    let previous = match LAST_ISSUED.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        Some(pick(last))
    }) {
        Ok(prev) | Err(prev) => prev,
    };

    VersionId(pick(previous))
}
