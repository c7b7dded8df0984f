// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity discovery from Tasmota device configuration.
//!
//! One discovery announcement describes a whole device. This module turns a
//! validated [`DeviceConfig`] into the logical entities a host exposes: a
//! [`SwitchDescriptor`] per plain relay and a [`LightDescriptor`] per light.
//!
//! # Splitting Rules
//!
//! Relays of type 1 become switches, or on/off lights when `SetOption30` is
//! set. Relays of type 2 are driven by the light engine and are split as
//! follows (first match wins):
//!
//! - `SetOption68`: one single-channel dimmer per light relay (`Channel<N>`)
//! - `lk = 0` on RGBW/RGBCW: an RGB light and a white light (`Dimmer1`/`Dimmer2`)
//! - otherwise: one light on the first light relay owning every channel (`Dimmer`)
//!
//! Switches are emitted before lights; each group is in relay order.
//!
//! # Examples
//!
//! ```
//! use tasmor_light::config::DeviceConfig;
//! use tasmor_light::discovery;
//!
//! let config = DeviceConfig::from_json(
//!     r#"{"mac":"00000049A3BC","rl":[1,1,2,2],"lt_st":5,"lk":0}"#,
//! ).unwrap();
//!
//! let entities = discovery::discover(&config);
//! assert_eq!(entities.switches().len(), 2);
//! assert_eq!(entities.lights().len(), 2);
//! assert_eq!(entities.lights()[0].relay().value(), 3);
//! ```

mod descriptor;
mod splitter;

pub use descriptor::{Addressing, LightDescriptor, SwitchDescriptor};

use crate::config::DeviceConfig;
use crate::error::ConfigError;

/// Receiver of discovered entities.
///
/// Discovery pushes descriptors into a sink instead of registering them
/// anywhere itself, so the host decides how entities are stored.
pub trait EntitySink {
    /// Called once per switch, in relay order.
    fn add_switch(&mut self, switch: SwitchDescriptor);

    /// Called once per light, in relay order, after all switches.
    fn add_light(&mut self, light: LightDescriptor);
}

/// Sink that collects discovered entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredEntities {
    switches: Vec<SwitchDescriptor>,
    lights: Vec<LightDescriptor>,
}

impl DiscoveredEntities {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn switches(&self) -> &[SwitchDescriptor] {
        &self.switches
    }

    #[must_use]
    pub fn lights(&self) -> &[LightDescriptor] {
        &self.lights
    }

    /// Returns `true` if the device exposes no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.switches.is_empty() && self.lights.is_empty()
    }

    /// Splits into switch and light lists.
    #[must_use]
    pub fn into_parts(self) -> (Vec<SwitchDescriptor>, Vec<LightDescriptor>) {
        (self.switches, self.lights)
    }
}

impl EntitySink for DiscoveredEntities {
    fn add_switch(&mut self, switch: SwitchDescriptor) {
        self.switches.push(switch);
    }

    fn add_light(&mut self, light: LightDescriptor) {
        self.lights.push(light);
    }
}

/// Emits the entities of a device into `sink`.
///
/// Switches are emitted first. If the light layout is invalid the error is
/// logged and returned, and no lights are emitted; switches already emitted
/// stay valid.
///
/// # Errors
///
/// Returns `ConfigError::MissingLightSubtype` or
/// `ConfigError::ChannelMismatch` if the light relays cannot be mapped to
/// the device's channels.
pub fn on_config_received<S: EntitySink>(
    config: &DeviceConfig,
    sink: &mut S,
) -> Result<(), ConfigError> {
    let switches = splitter::switches(config)?;
    let switch_count = switches.len();
    for switch in switches {
        sink.add_switch(switch);
    }

    let lights = match splitter::lights(config) {
        Ok(lights) => lights,
        Err(e) => {
            tracing::warn!(
                mac = %config.mac(),
                error = %e,
                "Invalid light configuration, no lights discovered"
            );
            return Err(e);
        }
    };

    tracing::debug!(
        mac = %config.mac(),
        switches = switch_count,
        lights = lights.len(),
        "Discovered entities"
    );
    for light in lights {
        sink.add_light(light);
    }
    Ok(())
}

/// Collects the entities of a device.
///
/// Configuration errors are logged and leave the device without lights.
#[must_use]
pub fn discover(config: &DeviceConfig) -> DiscoveredEntities {
    let mut entities = DiscoveredEntities::new();
    // Logged inside; a bad light layout still leaves the switches usable
    let _ = on_config_received(config, &mut entities);
    entities
}
