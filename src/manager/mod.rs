// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device tracking and message routing.
//!
//! The [`LightManager`] glues discovery, state decoding and command encoding
//! together for hosts that do not want to keep descriptors and states
//! themselves.
//!
//! # Architecture
//!
//! ```text
//! tasmota/discovery/<MAC>/config ──▶ discover ──▶ registry (replace)
//! <ft tele>STATE, <ft stat>RESULT ──▶ registry lookup ──▶ decode every entity
//! send(mac, index, request) ──▶ encode vs. last state ──▶ Publisher (Backlog)
//! ```
//!
//! # Examples
//!
//! ```
//! use tasmor_light::command::LightRequest;
//! use tasmor_light::error::ProtocolError;
//! use tasmor_light::manager::LightManager;
//! use tasmor_light::protocol::Publisher;
//!
//! struct Stdout;
//!
//! impl Publisher for Stdout {
//!     async fn publish(&self, topic: &str, payload: &str) -> Result<(), ProtocolError> {
//!         println!("{topic} {payload}");
//!         Ok(())
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let manager = LightManager::new(Stdout);
//! manager.handle_message(
//!     "tasmota/discovery/00000049A3BC/config",
//!     r#"{"mac":"00000049A3BC","rl":[2],"lt_st":5}"#,
//! );
//! manager.handle_message("tasmota_49A3BC/tele/STATE", r#"{"POWER":"ON","Dimmer":50}"#);
//! assert_eq!(manager.light_state("00000049A3BC", 0).unwrap().brightness(), Some(128));
//!
//! let batch = manager
//!     .send("00000049A3BC", 0, &LightRequest::turn_on().brightness(255))
//!     .await
//!     .unwrap();
//! assert_eq!(batch.to_backlog(), "NoDelay;Fade 0;NoDelay;Dimmer 100");
//! # }
//! ```

mod light_manager;
mod options;
mod registry;

pub use light_manager::LightManager;
pub use options::{DEFAULT_DISCOVERY_PREFIX, ManagerOptions};
