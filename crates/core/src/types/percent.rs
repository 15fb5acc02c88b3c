//! Integer percentages for scores and progress indicators.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A percentage in `0..=100`.
///
/// Scores arrive as plain integers from data providers; every progress
/// indicator goes through [`Percent::clamped`] so nothing outside the range
/// is ever rendered. Deserializing clamps too.
///
/// ```
/// use easemyform_core::Percent;
///
/// assert_eq!(Percent::clamped(145).value(), 100);
/// assert_eq!(Percent::clamped(-10).value(), 0);
/// assert_eq!(Percent::clamped(45).to_string(), "45%");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "i64", into = "u8")]
pub struct Percent(u8);

impl Percent {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const FULL: Self = Self(100);

    /// Clamp an arbitrary integer into `0..=100`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        // clamp() guarantees the value fits in u8
        Self(value.clamp(0, 100) as u8)
    }

    /// The percentage as an integer.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<i64> for Percent {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Percent> for u8 {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
