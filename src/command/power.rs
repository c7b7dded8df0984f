// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power and fade commands.

use crate::command::Command;
use crate::types::{PowerIndex, PowerState};

/// Command to set the power state of a relay.
///
/// # Examples
///
/// ```
/// use tasmor_light::command::{Command, PowerCommand};
/// use tasmor_light::types::PowerIndex;
///
/// let cmd = PowerCommand::on(PowerIndex::new(3).unwrap());
/// assert_eq!(cmd.name(), "Power3");
/// assert_eq!(cmd.payload(), Some("ON".to_string()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerCommand {
    /// Set the power state.
    Set {
        /// The relay to control.
        index: PowerIndex,
        /// The desired power state.
        state: PowerState,
    },
}

impl PowerCommand {
    /// Creates a command to turn on a relay.
    #[must_use]
    pub const fn on(index: PowerIndex) -> Self {
        Self::Set {
            index,
            state: PowerState::On,
        }
    }

    /// Creates a command to turn off a relay.
    #[must_use]
    pub const fn off(index: PowerIndex) -> Self {
        Self::Set {
            index,
            state: PowerState::Off,
        }
    }
}

impl Command for PowerCommand {
    fn name(&self) -> String {
        let Self::Set { index, .. } = self;
        format!("Power{index}")
    }

    fn payload(&self) -> Option<String> {
        let Self::Set { state, .. } = self;
        Some(state.as_str().to_string())
    }
}

/// Command to enable or disable fade transitions.
///
/// # Examples
///
/// ```
/// use tasmor_light::command::{Command, FadeCommand};
///
/// assert_eq!(FadeCommand::Enable.to_command_string(), "Fade 1");
/// assert_eq!(FadeCommand::Disable.to_command_string(), "Fade 0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeCommand {
    /// Enable fade transitions.
    Enable,
    /// Disable fade transitions.
    Disable,
}

impl Command for FadeCommand {
    fn name(&self) -> String {
        "Fade".to_string()
    }

    fn payload(&self) -> Option<String> {
        match self {
            Self::Enable => Some("1".to_string()),
            Self::Disable => Some("0".to_string()),
        }
    }
}
