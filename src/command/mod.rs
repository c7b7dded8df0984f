// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tasmota command definitions and light request encoding.
//!
//! This module provides typed representations of the Tasmota commands used
//! to drive lights and relays, the [`CommandBatch`] that groups them into a
//! single `Backlog` message, and [`encode_command`] which translates a
//! [`LightRequest`] for one discovered light.
//!
//! # Available Commands
//!
//! | Command Type | Purpose | Example |
//! |-------------|---------|---------|
//! | [`PowerCommand`] | Set relay power state | `Power3 ON` |
//! | [`FadeCommand`] | Enable/disable fading | `Fade 1` |
//! | [`SpeedCommand`] | Fade speed (1-40) | `Speed 8` |
//! | [`DimmerCommand`] | Brightness of a light or unlinked half | `Dimmer 75`, `Dimmer2 20` |
//! | [`ChannelCommand`] | Level of a single PWM channel | `Channel3 10` |
//! | [`ColorCommand`] | RGB color | `Color2 255,128,0` |
//! | [`ColorTempCommand`] | Color temperature in mireds | `CT 200` |
//! | [`WhiteCommand`] | White channel level | `White 50` |
//! | [`SchemeCommand`] | Light effect (0-4) | `Scheme 4` |
//!
//! # Examples
//!
//! ```
//! use tasmor_light::command::{Command, PowerCommand};
//! use tasmor_light::types::{PowerIndex, PowerState};
//!
//! let cmd = PowerCommand::Set {
//!     index: PowerIndex::one(),
//!     state: PowerState::On,
//! };
//!
//! assert_eq!(cmd.name(), "Power1");
//! assert_eq!(cmd.payload(), Some("ON".to_string()));
//! ```

mod batch;
mod encoder;
mod light;
mod power;
mod request;

pub use batch::{CommandBatch, CommandBatchBuilder, CommandToken, MAX_BATCH_COMMANDS};
pub use encoder::encode_command;
pub use light::{
    ChannelCommand, ColorCommand, ColorTempCommand, DimmerCommand, SchemeCommand, SpeedCommand,
    WhiteCommand,
};
pub use power::{FadeCommand, PowerCommand};
pub use request::LightRequest;

/// A command that can be sent to a Tasmota device.
pub trait Command {
    /// Returns the command name with any index suffix.
    ///
    /// For example, `"Power1"`, `"Dimmer"`, `"Channel3"`.
    fn name(&self) -> String;

    /// Returns the command payload, if any.
    fn payload(&self) -> Option<String>;

    /// Returns the command as it appears inside a `Backlog`.
    ///
    /// Format: `<name> <payload>` or just `<name>` if no payload.
    fn to_command_string(&self) -> String {
        match self.payload() {
            Some(p) => format!("{} {}", self.name(), p),
            None => self.name(),
        }
    }

    /// Returns the MQTT topic suffix for this command.
    ///
    /// This is the part after the command prefix, e.g. `Power1`.
    fn mqtt_topic_suffix(&self) -> String {
        self.name()
    }

    /// Returns the MQTT payload for this command.
    fn mqtt_payload(&self) -> String {
        self.payload().unwrap_or_default()
    }
}
