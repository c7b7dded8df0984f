// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color temperature types.
//!
//! Color temperature travels unscaled in mireds between host and device;
//! the only transformation is clamping into the range a light accepts.

use std::fmt;

use crate::error::ValueError;

/// Color temperature in mireds (153-500).
///
/// Lower values are cooler (bluer), higher values are warmer.
///
/// - 153 (6500K) - Cool daylight
/// - 500 (2000K) - Warm candlelight
///
/// # Examples
///
/// ```
/// use tasmor_light::types::ColorTemp;
///
/// let ct = ColorTemp::new(300).unwrap();
/// assert_eq!(ct.value(), 300);
/// assert!(ColorTemp::new(600).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct ColorTemp(u16);

impl ColorTemp {
    /// Minimum color temperature (coolest, ~6500K).
    pub const MIN: u16 = 153;

    /// Maximum color temperature (warmest, ~2000K).
    pub const MAX: u16 = 500;

    /// Creates a new color temperature value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [153, 500].
    pub fn new(value: u16) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Returns the color temperature value in mireds.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns the approximate color temperature in Kelvin.
    #[must_use]
    pub fn to_kelvin(&self) -> u32 {
        1_000_000 / u32::from(self.0)
    }
}

impl fmt::Display for ColorTemp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mireds", self.0)
    }
}

/// Inclusive mired range a light accepts.
///
/// Tasmota lights use the full 153-500 range unless `SetOption82` reduces
/// it to 200-380 for bulbs that cannot reach the extremes.
///
/// # Examples
///
/// ```
/// use tasmor_light::types::CtRange;
///
/// assert_eq!(CtRange::REDUCED.clamp(500).value(), 380);
/// assert_eq!(CtRange::FULL.clamp(100).value(), 153);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct CtRange {
    min: u16,
    max: u16,
}

impl CtRange {
    /// Full Tasmota range.
    pub const FULL: Self = Self {
        min: ColorTemp::MIN,
        max: ColorTemp::MAX,
    };

    /// Range used when `SetOption82` is enabled.
    pub const REDUCED: Self = Self { min: 200, max: 380 };

    /// Coolest accepted temperature, in mireds.
    #[must_use]
    pub const fn min_mireds(&self) -> u16 {
        self.min
    }

    /// Warmest accepted temperature, in mireds.
    #[must_use]
    pub const fn max_mireds(&self) -> u16 {
        self.max
    }

    /// Clamps a mired value into this range.
    #[must_use]
    pub fn clamp(&self, mireds: u16) -> ColorTemp {
        ColorTemp(mireds.clamp(self.min, self.max))
    }

    /// Returns `true` if the value lies within the range.
    #[must_use]
    pub const fn contains(&self, mireds: u16) -> bool {
        mireds >= self.min && mireds <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_temp_valid() {
        assert_eq!(ColorTemp::new(153).unwrap().value(), 153);
        assert_eq!(ColorTemp::new(500).unwrap().value(), 500);
    }

    #[test]
    fn color_temp_invalid() {
        assert!(ColorTemp::new(152).is_err());
        assert!(ColorTemp::new(501).is_err());
    }

    #[test]
    fn color_temp_kelvin() {
        assert_eq!(ColorTemp::new(250).unwrap().to_kelvin(), 4000);
    }

    #[test]
    fn ct_range_bounds() {
        assert_eq!(CtRange::FULL.min_mireds(), 153);
        assert_eq!(CtRange::FULL.max_mireds(), 500);
        assert_eq!(CtRange::REDUCED.min_mireds(), 200);
        assert_eq!(CtRange::REDUCED.max_mireds(), 380);
    }

    #[test]
    fn ct_range_clamp() {
        assert_eq!(CtRange::FULL.clamp(300).value(), 300);
        assert_eq!(CtRange::REDUCED.clamp(153).value(), 200);
        assert_eq!(CtRange::REDUCED.clamp(450).value(), 380);
        assert!(CtRange::REDUCED.contains(300));
        assert!(!CtRange::REDUCED.contains(190));
    }
}
