use std::fmt;

/// A span or point in time, in whole milliseconds.
///
/// Used both for config durations and for readings of a monotonic [`crate::Clock`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// Zero milliseconds.
    pub const ZERO: Self = Self(0);

    /// Return `true` for a zero span.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `self - earlier`, clamped at zero.
    pub fn saturating_sub(self, earlier: Self) -> Self {
        Self(self.0.saturating_sub(earlier.0))
    }

    /// `self + other`, clamped at `u64::MAX`.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl From<u64> for Millis {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Map any signed index onto `[0, len)` with circular wraparound.
///
/// Returns `None` only when `len == 0`.
pub fn wrap_index(index: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let n = i64::try_from(len).unwrap_or(i64::MAX);
    Some(index.rem_euclid(n) as usize)
}

/// Completion ratio of a countdown, clamped to `[0, 1]`.
///
/// A zero `duration` counts as already complete.
pub fn progress_ratio(elapsed: Millis, duration: Millis) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.0 as f64 / duration.0 as f64).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
