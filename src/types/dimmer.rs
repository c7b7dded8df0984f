// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimmer type for device-side brightness.

use std::fmt;

use crate::error::ValueError;
use crate::scale;

/// Brightness level as a device percentage (0-100).
///
/// Tasmota reports and accepts `Dimmer`, `Channel` and `White` values on this
/// scale. Use [`Dimmer::from_brightness`] and [`Dimmer::to_brightness`] to
/// move between this scale and the 0-255 host scale.
///
/// # Examples
///
/// ```
/// use tasmor_light::types::Dimmer;
///
/// let dim = Dimmer::from_brightness(192).unwrap();
/// assert_eq!(dim.value(), 75);
/// assert_eq!(Dimmer::new(50).unwrap().to_brightness(), 128);
///
/// assert!(Dimmer::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dimmer(u8);

impl Dimmer {
    /// Minimum dimmer value (0%).
    pub const MIN: Self = Self(0);

    /// Maximum dimmer value (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new dimmer value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Converts a 0-255 host brightness into a dimmer percentage.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `brightness` exceeds 255.
    pub fn from_brightness(brightness: u16) -> Result<Self, ValueError> {
        scale::to_device_percent(brightness).map(Self)
    }

    /// Returns the 0-255 host brightness for this percentage.
    #[must_use]
    pub fn to_brightness(self) -> u8 {
        // Infallible: the percentage is validated on construction.
        scale::from_device_percent(u16::from(self.0)).unwrap_or(u8::MAX)
    }

    /// Returns the brightness percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Absolute distance to another dimmer level, in percent.
    #[must_use]
    pub const fn distance(&self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for Dimmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Dimmer {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
