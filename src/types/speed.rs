// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fade speed type for light transitions.

use std::fmt;

use crate::error::ValueError;
use crate::scale;
use crate::types::Dimmer;

/// Fade speed for light transitions (1-40), in half-second steps.
///
/// # Examples
///
/// ```
/// use tasmor_light::types::{Dimmer, FadeSpeed};
///
/// let speed = FadeSpeed::for_transition(4.0, Dimmer::MIN, Dimmer::MAX);
/// assert_eq!(speed.value(), 8);
///
/// assert!(FadeSpeed::new(41).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FadeSpeed(u8);

impl FadeSpeed {
    /// Minimum speed value (fastest transition).
    pub const MIN: u8 = 1;

    /// Maximum speed value (slowest transition).
    pub const MAX: u8 = 40;

    /// Creates a new fade speed value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [1, 40].
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: u16::from(Self::MIN),
                max: u16::from(Self::MAX),
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Speed that fades from `from` to `to` in roughly `transition_secs`.
    #[must_use]
    pub fn for_transition(transition_secs: f64, from: Dimmer, to: Dimmer) -> Self {
        Self(scale::transition_speed(transition_secs, from.distance(to)))
    }

    /// Returns the speed value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for FadeSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
