// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound message transport.
//!
//! The library never talks to a broker on its own. Everything it sends goes
//! through a [`Publisher`], which the host implements on top of its MQTT
//! connection. With the `mqtt` feature enabled, [`MqttPublisher`] provides a
//! ready-made implementation backed by `rumqttc`.

#[cfg(feature = "mqtt")]
mod mqtt;

#[cfg(feature = "mqtt")]
pub use mqtt::{MqttMessage, MqttPublisher, MqttPublisherBuilder};

use std::sync::Arc;

use crate::error::ProtocolError;

/// Publishes MQTT messages on behalf of the library.
///
/// Messages are fire-and-forget: QoS 0, not retained. Implementations only
/// report whether the message was handed to the transport.
#[allow(async_fn_in_trait)]
pub trait Publisher {
    /// Publishes `payload` on `topic`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the message cannot be queued.
    async fn publish(&self, topic: &str, payload: &str) -> Result<(), ProtocolError>;
}

impl<P: Publisher> Publisher for Arc<P> {
    async fn publish(&self, topic: &str, payload: &str) -> Result<(), ProtocolError> {
        (**self).publish(topic, payload).await
    }
}

impl<P: Publisher> Publisher for &P {
    async fn publish(&self, topic: &str, payload: &str) -> Result<(), ProtocolError> {
        (**self).publish(topic, payload).await
    }
}
