// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power-related types for Tasmota devices.
//!
//! This module provides the on/off state of a light or relay and the
//! 1-based relay number used to address it in `Power<N>` commands.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Represents the power state of a light or relay.
///
/// # Examples
///
/// ```
/// use tasmor_light::types::PowerState;
///
/// assert_eq!("on".parse::<PowerState>().unwrap(), PowerState::On);
/// assert_eq!(PowerState::Off.as_str(), "OFF");
/// assert!("TOGGLE".parse::<PowerState>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PowerState {
    /// Power is off.
    Off,
    /// Power is on.
    On,
}

impl PowerState {
    /// Returns the Tasmota command string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns `true` for [`PowerState::On`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValueError;

    /// Accepts `ON` and `OFF` in any case; Tasmota reports nothing else in
    /// state telemetry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ON") {
            Ok(Self::On)
        } else if s.eq_ignore_ascii_case("OFF") {
            Ok(Self::Off)
        } else {
            Err(ValueError::InvalidPowerState(s.to_string()))
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

/// 1-based relay number on a Tasmota device.
///
/// Tasmota addresses up to 32 power outputs as `Power1`..`Power32`. The
/// index doubles as the suffix of `Channel<N>` commands for lights split
/// into single channels.
///
/// # Examples
///
/// ```
/// use tasmor_light::types::PowerIndex;
///
/// let idx = PowerIndex::from_relay(0).unwrap();
/// assert_eq!(idx.value(), 1);
/// assert_eq!(idx.power_key(), "POWER1");
///
/// assert!(PowerIndex::new(0).is_err());
/// assert!(PowerIndex::new(33).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PowerIndex(u8);

impl PowerIndex {
    /// Maximum valid power index.
    pub const MAX: u8 = 32;

    /// Creates a new power index.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if index is outside [1, 32].
    pub fn new(index: u8) -> Result<Self, ValueError> {
        if !(1..=Self::MAX).contains(&index) {
            return Err(ValueError::OutOfRange {
                min: 1,
                max: u16::from(Self::MAX),
                actual: u16::from(index),
            });
        }
        Ok(Self(index))
    }

    /// Creates the power index for a zero-based position in the `rl` array.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the position is beyond relay 32.
    pub fn from_relay(position: usize) -> Result<Self, ValueError> {
        let index = u8::try_from(position + 1).map_err(|_| ValueError::OutOfRange {
            min: 1,
            max: u16::from(Self::MAX),
            actual: u16::try_from(position + 1).unwrap_or(u16::MAX),
        })?;
        Self::new(index)
    }

    /// Creates a power index for relay 1.
    #[must_use]
    pub const fn one() -> Self {
        Self(1)
    }

    /// Returns the numeric value of the index.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the zero-based position in the `rl` array.
    #[must_use]
    pub fn relay(&self) -> usize {
        usize::from(self.0) - 1
    }

    /// State telemetry key for this relay (`POWER<N>`).
    #[must_use]
    pub fn power_key(&self) -> String {
        format!("POWER{}", self.0)
    }
}

impl fmt::Display for PowerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
