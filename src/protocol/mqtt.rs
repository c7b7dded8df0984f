// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `rumqttc`-backed publisher.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rumqttc::{AsyncClient, EventLoop, MqttOptions, QoS};
use tokio::sync::mpsc;

use crate::error::ProtocolError;
use crate::protocol::Publisher;

/// Global counter for generating unique client IDs.
static CLIENT_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

const DEFAULT_PORT: u16 = 1883;
const INBOX_CAPACITY: usize = 64;

/// An incoming MQTT message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MqttMessage {
    pub topic: String,
    pub payload: String,
}

/// [`Publisher`] on top of a `rumqttc` client.
///
/// Incoming publishes on subscribed topics are forwarded to the receiver
/// returned by [`MqttPublisherBuilder::build`], ready to be fed to
/// [`LightManager::handle_message`](crate::manager::LightManager::handle_message).
///
/// # Examples
///
/// ```ignore
/// use tasmor_light::protocol::MqttPublisherBuilder;
/// use tasmor_light::manager::LightManager;
///
/// let (publisher, mut inbox) = MqttPublisherBuilder::new()
///     .broker("mqtt://192.168.1.50:1883")
///     .build()
///     .await?;
///
/// let manager = LightManager::new(publisher.clone());
/// publisher.subscribe(&manager.subscriptions()).await?;
///
/// while let Some(message) = inbox.recv().await {
///     manager.handle_message(&message.topic, &message.payload);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
}

impl MqttPublisher {
    /// Subscribes to each topic filter.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Mqtt` if a request cannot be queued.
    pub async fn subscribe(&self, filters: &[String]) -> Result<(), ProtocolError> {
        for filter in filters {
            tracing::debug!(filter = %filter, "Subscribing");
            self.client
                .subscribe(filter, QoS::AtMostOnce)
                .await
                .map_err(ProtocolError::Mqtt)?;
        }
        Ok(())
    }

    /// Disconnects from the broker.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Mqtt` if the request cannot be queued.
    pub async fn disconnect(&self) -> Result<(), ProtocolError> {
        self.client.disconnect().await.map_err(ProtocolError::Mqtt)
    }
}

impl Publisher for MqttPublisher {
    async fn publish(&self, topic: &str, payload: &str) -> Result<(), ProtocolError> {
        tracing::debug!(topic = %topic, payload = %payload, "Publishing MQTT message");

        self.client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .await
            .map_err(ProtocolError::Mqtt)
    }
}

/// Parses an MQTT URL into host and port.
fn parse_mqtt_url(url: &str) -> Result<(String, u16), ProtocolError> {
    let url = url
        .strip_prefix("mqtt://")
        .or_else(|| url.strip_prefix("tcp://"))
        .unwrap_or(url);

    let (host, port) = if let Some((h, p)) = url.rsplit_once(':') {
        let port = p
            .parse()
            .map_err(|_| ProtocolError::InvalidAddress(format!("Invalid port: {p}")))?;
        (h.to_string(), port)
    } else {
        (url.to_string(), DEFAULT_PORT)
    };

    if host.is_empty() {
        return Err(ProtocolError::InvalidAddress("Empty host".to_string()));
    }
    Ok((host, port))
}

fn next_client_id() -> String {
    let counter = CLIENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("tasmor_light_{}_{}", std::process::id(), counter)
}

/// Drives the connection and forwards incoming publishes.
async fn handle_mqtt_events(mut event_loop: EventLoop, inbox: mpsc::Sender<MqttMessage>) {
    use rumqttc::{Event, Packet};

    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(connack))) => {
                tracing::debug!(?connack, "MQTT connected");
            }
            Ok(Event::Incoming(Packet::SubAck(suback))) => {
                tracing::debug!(?suback, "MQTT subscription acknowledged");
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                let Ok(payload) = String::from_utf8(publish.payload.to_vec()) else {
                    tracing::warn!(topic = %publish.topic, "Dropped non UTF-8 payload");
                    continue;
                };
                tracing::trace!(topic = %publish.topic, payload = %payload, "Received MQTT message");
                let message = MqttMessage {
                    topic: publish.topic,
                    payload,
                };
                if inbox.send(message).await.is_err() {
                    tracing::debug!("Inbox closed, stopping MQTT event loop");
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "MQTT event loop error");
                break;
            }
        }
    }
}

/// Builder for an [`MqttPublisher`].
#[derive(Debug, Default)]
pub struct MqttPublisherBuilder {
    broker: Option<String>,
    username: Option<String>,
    password: Option<String>,
    client_id: Option<String>,
    keep_alive: Option<Duration>,
}

impl MqttPublisherBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the MQTT broker URL.
    #[must_use]
    pub fn broker(mut self, broker: impl Into<String>) -> Self {
        self.broker = Some(broker.into());
        self
    }

    /// Sets authentication credentials for the MQTT broker.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets a custom client ID.
    #[must_use]
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Sets the keep-alive interval.
    #[must_use]
    pub fn keep_alive(mut self, duration: Duration) -> Self {
        self.keep_alive = Some(duration);
        self
    }

    /// Connects and returns the publisher with its inbox.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the broker is missing or
    /// malformed.
    pub async fn build(self) -> Result<(MqttPublisher, mpsc::Receiver<MqttMessage>), ProtocolError> {
        let broker = self
            .broker
            .ok_or_else(|| ProtocolError::InvalidAddress("broker is required".to_string()))?;
        let (host, port) = parse_mqtt_url(&broker)?;
        let client_id = self.client_id.unwrap_or_else(next_client_id);

        let mut mqtt_options = MqttOptions::new(&client_id, host, port);
        mqtt_options.set_keep_alive(self.keep_alive.unwrap_or(Duration::from_secs(30)));
        mqtt_options.set_clean_session(true);
        if let (Some(username), Some(password)) = (self.username, self.password) {
            mqtt_options.set_credentials(username, password);
        }

        let (client, event_loop) = AsyncClient::new(mqtt_options, 10);
        let (inbox_tx, inbox_rx) = mpsc::channel(INBOX_CAPACITY);

        tokio::spawn(handle_mqtt_events(event_loop, inbox_tx));

        // Let the broker process CONNECT before the first publish
        tokio::time::sleep(Duration::from_millis(500)).await;

        tracing::debug!(client_id = %client_id, broker = %broker, "MQTT publisher ready");
        Ok((MqttPublisher { client }, inbox_rx))
    }
}
