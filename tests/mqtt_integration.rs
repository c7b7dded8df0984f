// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the MQTT publisher using mockforge-mqtt.

#![cfg(feature = "mqtt")]

use std::sync::Arc;
use std::time::Duration;

use mockforge_mqtt::broker::MqttConfig;
use mockforge_mqtt::start_mqtt_server;
use tasmor_light::ProtocolError;
use tasmor_light::manager::LightManager;
use tasmor_light::protocol::{MqttPublisherBuilder, Publisher};
use tokio::time::sleep;

/// Helper to find an available port for testing.
fn get_test_port() -> u16 {
    use std::sync::atomic::{AtomicU16, Ordering};
    static PORT_COUNTER: AtomicU16 = AtomicU16::new(18950);
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Starts a mock MQTT broker on the given port.
async fn start_mock_broker(port: u16) {
    let config = MqttConfig {
        port,
        host: "127.0.0.1".to_string(),
        ..Default::default()
    };

    tokio::spawn(async move {
        let _ = start_mqtt_server(config).await;
    });

    // Give the broker time to bind before clients connect
    sleep(Duration::from_millis(500)).await;
}

// ============================================================================
// Connection Tests
// ============================================================================

mod connection {
    use super::*;

    #[tokio::test]
    async fn connect_to_broker() {
        let port = get_test_port();
        start_mock_broker(port).await;

        let result = MqttPublisherBuilder::new()
            .broker(format!("mqtt://127.0.0.1:{port}"))
            .build()
            .await;

        assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
    }

    #[tokio::test]
    async fn connect_with_tcp_scheme_and_credentials() {
        let port = get_test_port();
        start_mock_broker(port).await;

        let result = MqttPublisherBuilder::new()
            .broker(format!("tcp://127.0.0.1:{port}"))
            .credentials("user", "pass")
            .client_id("tasmor_light_test")
            .keep_alive(Duration::from_secs(10))
            .build()
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn invalid_port_fails() {
        let result = MqttPublisherBuilder::new()
            .broker("mqtt://127.0.0.1:notaport")
            .build()
            .await;

        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }
}

// ============================================================================
// Publishing Tests
// ============================================================================

mod publishing {
    use super::*;

    #[tokio::test]
    async fn publish_and_subscribe() {
        let port = get_test_port();
        start_mock_broker(port).await;

        let (publisher, _inbox) = MqttPublisherBuilder::new()
            .broker(format!("mqtt://127.0.0.1:{port}"))
            .build()
            .await
            .unwrap();

        publisher
            .subscribe(&["tasmota/discovery/+/config".to_string()])
            .await
            .unwrap();
        publisher
            .publish("tasmota_49A3BC/cmnd/Backlog", "NoDelay;Fade 0;NoDelay;Power1 ON")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn manager_sends_through_mqtt() {
        let port = get_test_port();
        start_mock_broker(port).await;

        let (publisher, _inbox) = MqttPublisherBuilder::new()
            .broker(format!("mqtt://127.0.0.1:{port}"))
            .build()
            .await
            .unwrap();
        let publisher = Arc::new(publisher);
        let manager = LightManager::new(Arc::clone(&publisher));

        manager
            .on_config_received(r#"{"mac":"00000049A3BC","rl":[2],"lt_st":5}"#)
            .unwrap();
        publisher.subscribe(&manager.subscriptions()).await.unwrap();

        let batch = manager.turn_on("00000049A3BC", 0).await.unwrap();
        assert_eq!(batch.to_backlog(), "NoDelay;Fade 0;NoDelay;Power1 ON");

        publisher.disconnect().await.unwrap();
    }
}
