// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The light manager.

use parking_lot::RwLock;

use crate::command::{Command, CommandBatch, LightRequest, encode_command};
use crate::config::{self, DeviceConfig};
use crate::discovery::{self, DiscoveredEntities, LightDescriptor, SwitchDescriptor};
use crate::error::Error;
use crate::manager::ManagerOptions;
use crate::manager::registry::{DeviceEntry, Registry};
use crate::protocol::Publisher;
use crate::state::LightState;
use crate::telemetry;
use crate::types::PowerState;

/// Tracks discovered Tasmota devices and drives their lights.
///
/// Feed every incoming MQTT message to [`handle_message`](Self::handle_message);
/// control lights with [`send`](Self::send) and friends. State is only
/// updated from what devices report, never from what was sent.
#[derive(Debug)]
pub struct LightManager<P> {
    publisher: P,
    options: ManagerOptions,
    registry: RwLock<Registry>,
}

impl<P: Publisher> LightManager<P> {
    /// Creates a manager with default options.
    #[must_use]
    pub fn new(publisher: P) -> Self {
        Self::with_options(publisher, ManagerOptions::default())
    }

    #[must_use]
    pub fn with_options(publisher: P, options: ManagerOptions) -> Self {
        Self {
            publisher,
            options,
            registry: RwLock::new(Registry::default()),
        }
    }

    #[must_use]
    pub const fn options(&self) -> &ManagerOptions {
        &self.options
    }

    #[must_use]
    pub const fn publisher(&self) -> &P {
        &self.publisher
    }

    // ========== Inbound ==========

    /// Routes an incoming MQTT message.
    ///
    /// Discovery announcements add, replace or (with an empty payload)
    /// remove a device. `STATE` and `RESULT` payloads update the entities of
    /// the device publishing on that topic. Returns `true` if the message
    /// was handled.
    pub fn handle_message(&self, topic: &str, payload: &str) -> bool {
        if let Some(mac) = self.options.discovery_mac(topic) {
            if payload.trim().is_empty() {
                self.remove_device(mac);
            } else if let Ok(config) = parse_config(payload) {
                if config::normalize_mac(mac).is_ok_and(|m| m == config.mac()) {
                    self.register(config);
                } else {
                    tracing::warn!(
                        topic = %topic,
                        mac = %config.mac(),
                        "Discovery topic and payload MAC differ, announcement ignored"
                    );
                }
            }
            return true;
        }

        let mut registry = self.registry.write();
        let Some(device) = registry.route_mut(topic) else {
            tracing::trace!(topic = %topic, "Ignoring unrouted topic");
            return false;
        };

        let parsed = match telemetry::parse_payload(payload) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(
                    mac = %device.config.mac(),
                    topic = %topic,
                    error = %e,
                    "Dropped undecodable state payload"
                );
                return true;
            }
        };

        let changed = device.apply(&parsed);
        tracing::debug!(
            mac = %device.config.mac(),
            topic = %topic,
            payload = %payload,
            changed,
            "Applied state payload"
        );
        true
    }

    /// Ingests a discovery announcement.
    ///
    /// The device's entities and states are fully replaced; every state
    /// starts unknown. A device whose light layout is invalid keeps its
    /// switches and gets no lights.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the payload is not a valid announcement.
    /// Any previously known device stays untouched in that case.
    pub fn on_config_received(&self, payload: &str) -> Result<DiscoveredEntities, Error> {
        Ok(self.register(parse_config(payload)?))
    }

    /// Replaces a device with a freshly discovered one.
    fn register(&self, config: DeviceConfig) -> DiscoveredEntities {
        let entities = discovery::discover(&config);

        tracing::debug!(
            mac = %config.mac(),
            topic = %config.topic(),
            lights = entities.lights().len(),
            switches = entities.switches().len(),
            "Registered device"
        );
        self.registry
            .write()
            .insert(DeviceEntry::new(config, entities.clone()));
        entities
    }

    /// Forgets a device. Returns `true` if it was known.
    pub fn remove_device(&self, mac: &str) -> bool {
        let Ok(mac) = config::normalize_mac(mac) else {
            return false;
        };
        let removed = self.registry.write().remove(&mac).is_some();
        if removed {
            tracing::debug!(mac = %mac, "Removed device");
        }
        removed
    }

    /// Topic filters the host must be subscribed to.
    ///
    /// Always includes the discovery filter. The state topics of known
    /// devices are added as they are discovered, so hosts should refresh
    /// their subscriptions after each announcement.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<String> {
        let registry = self.registry.read();
        let mut topics: Vec<String> = registry.routed_topics().map(str::to_string).collect();
        topics.sort_unstable();
        topics.insert(0, self.options.discovery_filter());
        topics
    }

    // ========== Queries ==========

    /// MACs of every known device, sorted.
    #[must_use]
    pub fn devices(&self) -> Vec<String> {
        let mut macs: Vec<String> = self.registry.read().macs().map(str::to_string).collect();
        macs.sort_unstable();
        macs
    }

    /// The announced configuration of a device.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if the device is unknown.
    pub fn device_config(&self, mac: &str) -> Result<DeviceConfig, Error> {
        self.with_device(mac, |device| Ok(device.config.clone()))
    }

    /// The lights of a device, in index order.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if the device is unknown.
    pub fn lights(&self, mac: &str) -> Result<Vec<LightDescriptor>, Error> {
        self.with_device(mac, |device| {
            Ok(device.lights.iter().map(|l| l.descriptor.clone()).collect())
        })
    }

    /// The switches of a device, in index order.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if the device is unknown.
    pub fn switches(&self, mac: &str) -> Result<Vec<SwitchDescriptor>, Error> {
        self.with_device(mac, |device| {
            Ok(device.switches.iter().map(|s| s.descriptor.clone()).collect())
        })
    }

    /// Last reported state of a light.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` or `Error::EntityNotFound`.
    pub fn light_state(&self, mac: &str, index: usize) -> Result<LightState, Error> {
        self.with_device(mac, |device| Ok(device.light(index)?.state.clone()))
    }

    /// Last reported power state of a switch.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` or `Error::EntityNotFound`.
    pub fn switch_state(&self, mac: &str, index: usize) -> Result<Option<PowerState>, Error> {
        self.with_device(mac, |device| Ok(device.switch(index)?.power))
    }

    // ========== Control ==========

    /// Turns a light on, leaving its attributes unchanged.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn turn_on(&self, mac: &str, index: usize) -> Result<CommandBatch, Error> {
        self.send(mac, index, &LightRequest::turn_on()).await
    }

    /// Turns a light off.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn turn_off(&self, mac: &str, index: usize) -> Result<CommandBatch, Error> {
        self.send(mac, index, &LightRequest::turn_off()).await
    }

    /// Encodes a request against the light's last reported state and
    /// publishes it as a single Backlog message.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` or `Error::EntityNotFound` for an
    /// unknown light, `Error::Encode` if the request cannot be expressed
    /// (nothing is published), or `Error::Protocol` if publishing fails.
    pub async fn send(
        &self,
        mac: &str,
        index: usize,
        request: &LightRequest,
    ) -> Result<CommandBatch, Error> {
        let (topic, batch) = self.with_device(mac, |device| {
            let light = device.light(index)?;
            let batch = encode_command(request, &light.descriptor, &light.state)?;
            Ok((device.config.backlog_topic(), batch))
        })?;

        let payload = batch.to_backlog();
        tracing::debug!(mac = %mac, index, topic = %topic, payload = %payload, "Sending light command");
        self.publisher.publish(&topic, &payload).await?;
        Ok(batch)
    }

    /// Sets the power state of a switch.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` or `Error::EntityNotFound` for an
    /// unknown switch, or `Error::Protocol` if publishing fails.
    pub async fn set_switch(&self, mac: &str, index: usize, state: PowerState) -> Result<(), Error> {
        let (topic, command) = self.with_device(mac, |device| {
            let command = device.switch(index)?.descriptor.power_command(state);
            Ok((device.config.command_topic(&command.mqtt_topic_suffix()), command))
        })?;

        let payload = command.mqtt_payload();
        tracing::debug!(mac = %mac, index, topic = %topic, payload = %payload, "Sending switch command");
        self.publisher.publish(&topic, &payload).await?;
        Ok(())
    }

    /// Runs `f` on a device under the read lock.
    fn with_device<T>(
        &self,
        mac: &str,
        f: impl FnOnce(&DeviceEntry) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mac = config::normalize_mac(mac).map_err(|_| Error::DeviceNotFound(mac.to_string()))?;
        let registry = self.registry.read();
        f(registry.device(&mac)?)
    }
}

fn parse_config(payload: &str) -> Result<DeviceConfig, Error> {
    DeviceConfig::from_json(payload)
        .inspect_err(|e| tracing::warn!(error = %e, "Rejected discovery payload"))
        .map_err(Error::from)
}
