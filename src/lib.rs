// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `TasmoR` Light - Tasmota light integration over MQTT.
//!
//! This library turns Tasmota discovery announcements into logical light and
//! switch entities, keeps their state from `STATE`/`RESULT` payloads, and
//! encodes light requests into a single `Backlog` command.
//!
//! # Supported Features
//!
//! - **Discovery**: relay typing, light subtypes, `SetOption30/68/82`, unlinked channels
//! - **Capabilities**: brightness, color, white value, color temperature, effects, transitions
//! - **State decoding**: `POWER<N>`, `Dimmer<k>`, `Channel[i]`, `Color`, `White`, `CT`, `Scheme`
//! - **Command encoding**: `Fade`/`Speed` transitions, `Power<N>`, `Dimmer`, `Channel<N>`,
//!   `Color2`, `CT`, `White`, `Scheme` batched with `NoDelay`
//!
//! The core is synchronous and transport free. Outbound messages go through
//! the [`Publisher`] trait; the optional `mqtt` feature (on by default)
//! provides an implementation on top of `rumqttc`.
//!
//! # Quick Start
//!
//! ```
//! use tasmor_light::command::{encode_command, LightRequest};
//! use tasmor_light::config::DeviceConfig;
//! use tasmor_light::discovery;
//! use tasmor_light::state::LightState;
//! use tasmor_light::telemetry;
//!
//! let config = DeviceConfig::from_json(
//!     r#"{"mac":"00000049A3BC","rl":[2],"lt_st":5,"so":{"82":1}}"#,
//! )?;
//! let entities = discovery::discover(&config);
//! let light = &entities.lights()[0];
//!
//! let mut state = LightState::new();
//! telemetry::on_state_received(r#"{"POWER":"OFF","Dimmer":50}"#, light, &mut state)?;
//!
//! let request = LightRequest::turn_on().transition(4.0);
//! let batch = encode_command(&request, light, &state)?;
//! assert_eq!(config.backlog_topic(), "tasmota_49A3BC/cmnd/Backlog");
//! assert_eq!(
//!     batch.to_backlog(),
//!     "NoDelay;Fade 1;NoDelay;Speed 4;NoDelay;Power1 ON"
//! );
//! # Ok::<(), tasmor_light::Error>(())
//! ```
//!
//! For hosts that prefer not to track entities themselves, the
//! [`LightManager`] routes raw MQTT messages and publishes commands.

pub mod capabilities;
pub mod command;
pub mod config;
pub mod discovery;
pub mod error;
pub mod manager;
pub mod protocol;
pub mod scale;
pub mod state;
pub mod telemetry;
pub mod types;

pub use capabilities::{Attribute, Capabilities, LightFeatures, LightKind};
pub use command::{CommandBatch, LightRequest, encode_command};
pub use config::DeviceConfig;
pub use discovery::{DiscoveredEntities, EntitySink, LightDescriptor, SwitchDescriptor};
pub use error::{
    ConfigError, DecodeError, EncodeError, Error, ProtocolError, Result, ValueError,
};
pub use manager::{LightManager, ManagerOptions};
#[cfg(feature = "mqtt")]
pub use protocol::{MqttPublisher, MqttPublisherBuilder};
pub use protocol::Publisher;
pub use state::{LightState, StateChange};
pub use telemetry::{DecodeOutcome, on_state_received};
pub use types::{ColorTemp, CtRange, Dimmer, PowerIndex, PowerState, RgbColor, Scheme};
