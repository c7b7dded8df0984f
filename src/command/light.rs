// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light control commands.
//!
//! This module provides commands for brightness (per light, per unlinked
//! half or per PWM channel), RGB color, color temperature, white level,
//! scheme and transition speed.

use crate::command::Command;
use crate::types::{ColorTemp, Dimmer, FadeSpeed, PowerIndex, RgbColor, Scheme};

/// Command to set brightness.
///
/// # Examples
///
/// ```
/// use tasmor_light::command::{Command, DimmerCommand};
/// use tasmor_light::types::Dimmer;
///
/// let cmd = DimmerCommand::Set(Dimmer::new(75).unwrap());
/// assert_eq!(cmd.to_command_string(), "Dimmer 75");
///
/// // White half of an unlinked RGBCW light
/// let cmd = DimmerCommand::Unlinked { index: 2, value: Dimmer::new(20).unwrap() };
/// assert_eq!(cmd.to_command_string(), "Dimmer2 20");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimmerCommand {
    /// Set the brightness of the whole light.
    Set(Dimmer),
    /// Set the brightness of the RGB (1) or white (2) part of an unlinked light.
    Unlinked {
        /// 1 or 2.
        index: u8,
        /// Brightness level.
        value: Dimmer,
    },
}

impl DimmerCommand {
    /// Creates a command to set a specific brightness.
    #[must_use]
    pub const fn set(value: Dimmer) -> Self {
        Self::Set(value)
    }
}

impl Command for DimmerCommand {
    fn name(&self) -> String {
        match self {
            Self::Set(_) => "Dimmer".to_string(),
            Self::Unlinked { index, .. } => format!("Dimmer{index}"),
        }
    }

    fn payload(&self) -> Option<String> {
        match self {
            Self::Set(value) | Self::Unlinked { value, .. } => Some(value.value().to_string()),
        }
    }
}

/// Command to set the level of a single PWM channel (`SetOption68`).
///
/// # Examples
///
/// ```
/// use tasmor_light::command::{ChannelCommand, Command};
/// use tasmor_light::types::{Dimmer, PowerIndex};
///
/// let cmd = ChannelCommand::new(PowerIndex::new(3).unwrap(), Dimmer::new(10).unwrap());
/// assert_eq!(cmd.to_command_string(), "Channel3 10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelCommand {
    index: PowerIndex,
    value: Dimmer,
}

impl ChannelCommand {
    #[must_use]
    pub const fn new(index: PowerIndex, value: Dimmer) -> Self {
        Self { index, value }
    }
}

impl Command for ChannelCommand {
    fn name(&self) -> String {
        format!("Channel{}", self.index)
    }

    fn payload(&self) -> Option<String> {
        Some(self.value.value().to_string())
    }
}

/// Command to set the RGB color (`Color2`, keeps the current brightness).
///
/// # Examples
///
/// ```
/// use tasmor_light::command::{ColorCommand, Command};
/// use tasmor_light::types::RgbColor;
///
/// let cmd = ColorCommand::Set(RgbColor::new(255, 128, 0));
/// assert_eq!(cmd.to_command_string(), "Color2 255,128,0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCommand {
    /// Set the color.
    Set(RgbColor),
}

impl Command for ColorCommand {
    fn name(&self) -> String {
        "Color2".to_string()
    }

    fn payload(&self) -> Option<String> {
        let Self::Set(color) = self;
        Some(color.to_command_string())
    }
}

/// Command to set color temperature in mireds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTempCommand {
    /// Set color temperature to a specific value.
    Set(ColorTemp),
}

impl Command for ColorTempCommand {
    fn name(&self) -> String {
        "CT".to_string()
    }

    fn payload(&self) -> Option<String> {
        let Self::Set(ct) = self;
        Some(ct.value().to_string())
    }
}

/// Command to set the white channel level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhiteCommand {
    /// Set the white level.
    Set(Dimmer),
}

impl Command for WhiteCommand {
    fn name(&self) -> String {
        "White".to_string()
    }

    fn payload(&self) -> Option<String> {
        let Self::Set(level) = self;
        Some(level.value().to_string())
    }
}

/// Command to select a light scheme (effect).
///
/// # Examples
///
/// ```
/// use tasmor_light::command::{Command, SchemeCommand};
/// use tasmor_light::types::Scheme;
///
/// let cmd = SchemeCommand::Set(Scheme::RANDOM);
/// assert_eq!(cmd.to_command_string(), "Scheme 4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeCommand {
    /// Set the scheme.
    Set(Scheme),
}

impl Command for SchemeCommand {
    fn name(&self) -> String {
        "Scheme".to_string()
    }

    fn payload(&self) -> Option<String> {
        let Self::Set(scheme) = self;
        Some(scheme.value().to_string())
    }
}

/// Command to set the fade speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedCommand {
    /// Set the speed.
    Set(FadeSpeed),
}

impl Command for SpeedCommand {
    fn name(&self) -> String {
        "Speed".to_string()
    }

    fn payload(&self) -> Option<String> {
        let Self::Set(speed) = self;
        Some(speed.value().to_string())
    }
}
