// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scheme type for light effects.

use std::fmt;

use crate::error::ValueError;

/// Effect names exposed for color lights, indexed by Tasmota scheme number.
pub const EFFECT_LIST: [&str; 5] = ["None", "Wake up", "Cycle up", "Cycle down", "Random"];

/// Light scheme/effect (0-4).
///
/// | Value | Effect |
/// |-------|--------|
/// | 0 | None (fixed color) |
/// | 1 | Wake up |
/// | 2 | Cycle up |
/// | 3 | Cycle down |
/// | 4 | Random |
///
/// # Examples
///
/// ```
/// use tasmor_light::types::Scheme;
///
/// let scheme = Scheme::from_effect("Random").unwrap();
/// assert_eq!(scheme.value(), 4);
/// assert_eq!(Scheme::new(3).unwrap().effect(), "Cycle down");
///
/// assert!(Scheme::new(5).is_err());
/// assert!(Scheme::from_effect("Strobe").is_none());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8")]
pub struct Scheme(u8);

impl Scheme {
    /// Fixed color.
    pub const NONE: Self = Self(0);

    /// Gradual brightness increase.
    pub const WAKEUP: Self = Self(1);

    /// Color cycling with increasing brightness.
    pub const CYCLE_UP: Self = Self(2);

    /// Color cycling with decreasing brightness.
    pub const CYCLE_DOWN: Self = Self(3);

    /// Random color changes.
    pub const RANDOM: Self = Self(4);

    // EFFECT_LIST has 5 entries
    const MAX: u8 = 4;

    /// Creates a new scheme value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 4.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::MAX {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u16::from(Self::MAX),
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Looks up a scheme by its effect name (exact match).
    #[must_use]
    pub fn from_effect(name: &str) -> Option<Self> {
        EFFECT_LIST
            .iter()
            .position(|effect| *effect == name)
            .and_then(|i| u8::try_from(i).ok())
            .map(Self)
    }

    /// Returns the scheme value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the effect name.
    #[must_use]
    pub const fn effect(&self) -> &'static str {
        EFFECT_LIST[self.0 as usize]
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.effect(), self.0)
    }
}

impl TryFrom<u8> for Scheme {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
