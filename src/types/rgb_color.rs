// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with Tasmota's comma-separated wire format.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// RGB color with 8-bit channels (0-255).
///
/// Tasmota (with `SetOption17` enabled) reports `Color` as a decimal,
/// comma-separated list, and `Color2` accepts the same format. Lights with
/// white channels append one or two extra components, which this type
/// ignores when parsing.
///
/// # Examples
///
/// ```
/// use tasmor_light::types::RgbColor;
///
/// let color: RgbColor = "255,128,0".parse().unwrap();
/// assert_eq!(color, RgbColor::new(255, 128, 0));
/// assert_eq!(color.to_command_string(), "255,128,0");
///
/// // RGBCW report, white components are dropped
/// let color: RgbColor = "10,20,30,0,255".parse().unwrap();
/// assert_eq!(color.blue(), 30);
///
/// assert!("255,128".parse::<RgbColor>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the components as a tuple.
    #[must_use]
    pub const fn as_tuple(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Formats the color as a `Color2` argument (`r,g,b`).
    #[must_use]
    pub fn to_command_string(&self) -> String {
        format!("{},{},{}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        // 3 color components, optionally followed by 1-2 white components
        if !(3..=5).contains(&parts.len()) {
            return Err(ValueError::InvalidColor(s.to_string()));
        }

        let component = |part: &str| {
            part.parse::<u8>()
                .map_err(|_| ValueError::InvalidColor(s.to_string()))
        };

        for extra in &parts[3..] {
            component(extra)?;
        }

        Ok(Self::new(
            component(parts[0])?,
            component(parts[1])?,
            component(parts[2])?,
        ))
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_triple() {
        let color: RgbColor = "255,128,0".parse().unwrap();
        assert_eq!(color.as_tuple(), (255, 128, 0));
    }

    #[test]
    fn parse_with_spaces() {
        let color: RgbColor = " 1, 2 ,3".parse().unwrap();
        assert_eq!(color.as_tuple(), (1, 2, 3));
    }

    #[test]
    fn parse_with_white_components() {
        let rgbw: RgbColor = "1,2,3,4".parse().unwrap();
        assert_eq!(rgbw.as_tuple(), (1, 2, 3));
        let rgbcw: RgbColor = "1,2,3,4,5".parse().unwrap();
        assert_eq!(rgbcw.as_tuple(), (1, 2, 3));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!("".parse::<RgbColor>().is_err());
        assert!("255,128".parse::<RgbColor>().is_err());
        assert!("256,0,0".parse::<RgbColor>().is_err());
        assert!("-1,0,0".parse::<RgbColor>().is_err());
        assert!("FF8000".parse::<RgbColor>().is_err());
        assert!("1,2,3,4,5,6".parse::<RgbColor>().is_err());
        assert!("1,2,3,x".parse::<RgbColor>().is_err());
    }

    #[test]
    fn command_string() {
        assert_eq!(RgbColor::new(0, 0, 255).to_command_string(), "0,0,255");
    }

    #[test]
    fn display() {
        assert_eq!(RgbColor::new(1, 2, 3).to_string(), "rgb(1, 2, 3)");
    }
}
