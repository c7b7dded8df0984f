// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State decoding for Tasmota MQTT messages.
//!
//! Tasmota reports light state as a flat JSON object, both periodically on
//! `tele/<topic>/STATE` and in reply to commands on `stat/<topic>/RESULT`.
//! This module decodes such a payload for one discovered light and applies
//! it to that light's [`LightState`].
//!
//! | Key | Feature | Canonical value |
//! |-----|---------|-----------------|
//! | `POWER<N>`, `POWER` (relay 1) | always | on/off |
//! | `Dimmer`, `Dimmer<k>`, `Channel[i]` | brightness | 0-255 |
//! | `Color` | color | RGB |
//! | `White` | white value | 0-255 |
//! | `CT` | color temp | mireds, clamped |
//! | `Scheme` | effect | effect name |
//!
//! Keys for features the light lacks are ignored. A key that fails to
//! decode is dropped and reported; the remaining keys still apply.
//!
//! # Examples
//!
//! ```
//! use tasmor_light::config::DeviceConfig;
//! use tasmor_light::discovery;
//! use tasmor_light::state::LightState;
//! use tasmor_light::telemetry;
//!
//! let config = DeviceConfig::from_json(r#"{"mac":"00000049A3BC","rl":[2],"lt_st":5}"#).unwrap();
//! let entities = discovery::discover(&config);
//! let light = &entities.lights()[0];
//!
//! let mut state = LightState::new();
//! let outcome = telemetry::on_state_received(
//!     r#"{"POWER":"ON","Dimmer":50,"Color":"255,128,0","Scheme":3}"#,
//!     light,
//!     &mut state,
//! ).unwrap();
//!
//! assert!(outcome.errors().is_empty());
//! assert!(state.is_on());
//! assert_eq!(state.brightness(), Some(128));
//! assert_eq!(state.effect_name(), Some("Cycle down"));
//! ```

mod state_parser;

pub use state_parser::Payload;
pub(crate) use state_parser::parse_payload;

use chrono::Utc;

use crate::capabilities::LightFeatures;
use crate::discovery::{LightDescriptor, SwitchDescriptor};
use crate::error::DecodeError;
use crate::state::{LightState, StateChange};
use crate::types::PowerState;

/// Result of decoding one payload for one light.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeOutcome {
    changes: Vec<StateChange>,
    errors: Vec<DecodeError>,
}

impl DecodeOutcome {
    /// Changes that modified the state, in application order.
    #[must_use]
    pub fn changes(&self) -> &[StateChange] {
        &self.changes
    }

    /// Keys that failed to decode.
    #[must_use]
    pub fn errors(&self) -> &[DecodeError] {
        &self.errors
    }

    /// Returns `true` if the state was modified.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Decodes a state payload and applies it to `state`.
///
/// # Errors
///
/// Returns `DecodeError::InvalidJson` or `DecodeError::NotAnObject` if the
/// payload is not a JSON object. Per-key failures are reported in the
/// [`DecodeOutcome`] instead.
pub fn on_state_received(
    payload: &str,
    descriptor: &LightDescriptor,
    state: &mut LightState,
) -> Result<DecodeOutcome, DecodeError> {
    let payload = parse_payload(payload)?;
    Ok(decode_state(&payload, descriptor, state))
}

/// Applies an already parsed state payload to `state`.
///
/// `last_updated` is stamped if at least one attribute changed.
pub fn decode_state(
    payload: &Payload,
    descriptor: &LightDescriptor,
    state: &mut LightState,
) -> DecodeOutcome {
    let mut decoded = Vec::new();
    let mut errors = Vec::new();

    let mut collect = |result: Result<Option<StateChange>, DecodeError>| match result {
        Ok(Some(change)) => decoded.push(change),
        Ok(None) => {}
        Err(e) => errors.push(e),
    };

    collect(state_parser::power(payload, descriptor.relay()).map(|p| p.map(StateChange::Power)));

    if descriptor.supports(LightFeatures::BRIGHTNESS) {
        collect(
            state_parser::brightness(payload, descriptor)
                .map(|b| b.map(StateChange::Brightness)),
        );
    }
    if descriptor.supports(LightFeatures::COLOR) {
        collect(state_parser::color(payload).map(|c| c.map(StateChange::Color)));
    }
    if descriptor.supports(LightFeatures::WHITE_VALUE) {
        collect(state_parser::white(payload).map(|w| w.map(StateChange::WhiteValue)));
    }
    if let Some(range) = descriptor.ct_range() {
        collect(state_parser::color_temp(payload, range).map(|ct| ct.map(StateChange::ColorTemp)));
    }
    if descriptor.supports(LightFeatures::EFFECT) {
        collect(state_parser::scheme(payload).map(|s| s.map(StateChange::Effect)));
    }

    let changes: Vec<StateChange> = decoded
        .into_iter()
        .filter(|change| state.apply(change))
        .collect();
    if !changes.is_empty() {
        state.mark_updated(Utc::now());
    }

    for error in &errors {
        tracing::warn!(
            relay = %descriptor.relay(),
            error = %error,
            "Dropped invalid state value"
        );
    }

    DecodeOutcome { changes, errors }
}

/// Decodes the power state of a switch.
///
/// # Errors
///
/// Returns `DecodeError::InvalidPower` if the power key holds anything
/// other than `ON` or `OFF`.
pub fn decode_switch(
    payload: &Payload,
    descriptor: &SwitchDescriptor,
) -> Result<Option<PowerState>, DecodeError> {
    state_parser::power(payload, descriptor.relay())
}
