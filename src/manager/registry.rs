// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discovered devices and the topics that route to them.

use std::collections::HashMap;

use crate::config::DeviceConfig;
use crate::discovery::{DiscoveredEntities, LightDescriptor, SwitchDescriptor};
use crate::error::Error;
use crate::state::LightState;
use crate::telemetry::{self, Payload};
use crate::types::PowerState;

/// A discovered light and its last reported state.
#[derive(Debug, Clone)]
pub(crate) struct ManagedLight {
    pub(crate) descriptor: LightDescriptor,
    pub(crate) state: LightState,
}

/// A discovered switch and its last reported power state.
#[derive(Debug, Clone)]
pub(crate) struct ManagedSwitch {
    pub(crate) descriptor: SwitchDescriptor,
    pub(crate) power: Option<PowerState>,
}

/// Everything known about one device.
#[derive(Debug, Clone)]
pub(crate) struct DeviceEntry {
    pub(crate) config: DeviceConfig,
    pub(crate) lights: Vec<ManagedLight>,
    pub(crate) switches: Vec<ManagedSwitch>,
}

impl DeviceEntry {
    /// Creates an entry with every state unknown.
    pub(crate) fn new(config: DeviceConfig, entities: DiscoveredEntities) -> Self {
        let (switches, lights) = entities.into_parts();
        Self {
            config,
            lights: lights
                .into_iter()
                .map(|descriptor| ManagedLight {
                    descriptor,
                    state: LightState::new(),
                })
                .collect(),
            switches: switches
                .into_iter()
                .map(|descriptor| ManagedSwitch {
                    descriptor,
                    power: None,
                })
                .collect(),
        }
    }

    pub(crate) fn light(&self, index: usize) -> Result<&ManagedLight, Error> {
        self.lights.get(index).ok_or_else(|| self.not_found(index))
    }

    pub(crate) fn switch(&self, index: usize) -> Result<&ManagedSwitch, Error> {
        self.switches.get(index).ok_or_else(|| self.not_found(index))
    }

    /// Applies a state payload to every entity. Returns the number of
    /// entities whose state changed.
    pub(crate) fn apply(&mut self, payload: &Payload) -> usize {
        let mut changed = 0;
        for light in &mut self.lights {
            if telemetry::decode_state(payload, &light.descriptor, &mut light.state).is_changed() {
                changed += 1;
            }
        }
        for switch in &mut self.switches {
            match telemetry::decode_switch(payload, &switch.descriptor) {
                Ok(Some(power)) if switch.power != Some(power) => {
                    switch.power = Some(power);
                    changed += 1;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        mac = %self.config.mac(),
                        relay = %switch.descriptor.relay(),
                        error = %e,
                        "Dropped invalid switch state"
                    );
                }
            }
        }
        changed
    }

    /// Topics on which the device reports state.
    fn state_topics(&self) -> [String; 2] {
        [self.config.state_topic(), self.config.result_topic()]
    }

    fn not_found(&self, index: usize) -> Error {
        Error::EntityNotFound {
            mac: self.config.mac().to_string(),
            index,
        }
    }
}

/// Devices keyed by MAC, plus a reverse map from state topics to MACs.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    devices: HashMap<String, DeviceEntry>,
    routes: HashMap<String, String>,
}

impl Registry {
    /// Inserts or fully replaces a device.
    pub(crate) fn insert(&mut self, entry: DeviceEntry) {
        let mac = entry.config.mac().to_string();
        self.remove(&mac);
        for topic in entry.state_topics() {
            if let Some(previous) = self.routes.insert(topic.clone(), mac.clone()) {
                tracing::warn!(
                    topic = %topic,
                    previous = %previous,
                    mac = %mac,
                    "State topic taken over by another device"
                );
                self.remove(&previous);
            }
        }
        self.devices.insert(mac, entry);
    }

    /// Removes a device and its routes.
    pub(crate) fn remove(&mut self, mac: &str) -> Option<DeviceEntry> {
        let entry = self.devices.remove(mac)?;
        self.routes.retain(|_, owner| owner != mac);
        Some(entry)
    }

    pub(crate) fn device(&self, mac: &str) -> Result<&DeviceEntry, Error> {
        self.devices
            .get(mac)
            .ok_or_else(|| Error::DeviceNotFound(mac.to_string()))
    }

    /// The device reporting state on `topic`, if any.
    pub(crate) fn route_mut(&mut self, topic: &str) -> Option<&mut DeviceEntry> {
        let mac = self.routes.get(topic)?;
        self.devices.get_mut(mac)
    }

    pub(crate) fn routed_topics(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub(crate) fn macs(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }
}
