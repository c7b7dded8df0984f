// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light request encoding.
//!
//! Turns a [`LightRequest`] into the ordered [`CommandBatch`] Tasmota
//! expects for one light. Encoding is pure: it reads the last known
//! [`LightState`] for transition speed and never updates it. The device
//! state only changes once the light reports back.

use crate::capabilities::{Attribute, LightFeatures};
use crate::command::{CommandBatch, LightRequest};
use crate::discovery::{Addressing, LightDescriptor};
use crate::error::EncodeError;
use crate::scale;
use crate::state::LightState;
use crate::types::{Dimmer, FadeSpeed, Scheme};

/// Encodes a light request into a command batch.
///
/// Commands are emitted in this order:
///
/// 1. `Fade 1` and `Speed <s>` for a supported transition, otherwise `Fade 0`
/// 2. `Power<N> ON|OFF`, omitted when turning on with a brightness
/// 3. `Dimmer`, `Dimmer<k>` or `Channel<N>` for brightness
/// 4. `Color2 r,g,b`
/// 5. `CT <mireds>`, clamped to the light's range
/// 6. `White <pct>`
/// 7. `Scheme <n>`
///
/// # Errors
///
/// Nothing is emitted if any check fails:
/// - `EncodeError::InvalidTransition` for a negative or non-finite transition
/// - `EncodeError::AttributesWhileOff` if a turn-off request carries attributes
/// - `EncodeError::Unsupported` if an attribute is not supported by the light
/// - `EncodeError::UnknownEffect` if the effect name is not in the effect list
///
/// # Examples
///
/// ```
/// use tasmor_light::command::{encode_command, LightRequest};
/// use tasmor_light::config::DeviceConfig;
/// use tasmor_light::discovery;
/// use tasmor_light::state::LightState;
///
/// let config = DeviceConfig::from_json(r#"{"mac":"00000049A3BC","rl":[2],"lt_st":5}"#).unwrap();
/// let entities = discovery::discover(&config);
/// let light = &entities.lights()[0];
///
/// let request = LightRequest::turn_on().brightness(255).transition(4.0);
/// let batch = encode_command(&request, light, &LightState::new()).unwrap();
/// assert_eq!(batch.to_backlog(), "NoDelay;Fade 1;NoDelay;Speed 8;NoDelay;Dimmer 100");
/// ```
pub fn encode_command(
    request: &LightRequest,
    descriptor: &LightDescriptor,
    state: &LightState,
) -> Result<CommandBatch, EncodeError> {
    let transition = validate_transition(request.get_transition())?;

    let attributes = request.attributes();
    if !request.is_on()
        && let Some(attr) = attributes.first()
    {
        return Err(EncodeError::AttributesWhileOff(*attr));
    }
    if let Some(attr) = attributes
        .iter()
        .find(|attr| !descriptor.supports(attr.feature()))
    {
        return Err(EncodeError::Unsupported(*attr));
    }

    let scheme = request
        .get_effect()
        .map(|name| {
            Scheme::from_effect(name).ok_or_else(|| EncodeError::UnknownEffect(name.to_string()))
        })
        .transpose()?;
    let dimmer = request
        .get_brightness()
        .map(|b| scale::to_device_percent(u16::from(b)).and_then(Dimmer::new))
        .transpose()?;
    let white = request
        .get_white_value()
        .map(|w| scale::to_device_percent(u16::from(w)).and_then(Dimmer::new))
        .transpose()?;

    let relay = descriptor.relay();
    let mut batch = CommandBatch::builder();

    // ========== Transition ==========
    if transition > 0.0 && descriptor.supports(LightFeatures::TRANSITION) {
        let (from, to) = fade_levels(request, dimmer, state);
        batch = batch
            .enable_fade()
            .speed(FadeSpeed::for_transition(transition, from, to));
    } else {
        batch = batch.disable_fade();
    }

    // ========== Power ==========
    if !request.is_on() {
        batch = batch.power_off(relay);
    } else if dimmer.is_none() {
        batch = batch.power_on(relay);
    }

    // ========== Attributes ==========
    if let Some(level) = dimmer {
        batch = match descriptor.addressing() {
            Addressing::Merged | Addressing::Relay => batch.dimmer(level),
            Addressing::Unlinked { index } => batch.unlinked_dimmer(index, level),
            Addressing::Channel => batch.channel(relay, level),
        };
    }
    if let Some(color) = request.get_rgb() {
        batch = batch.color(color);
    }
    if let (Some(mireds), Some(range)) = (request.get_color_temp(), descriptor.ct_range()) {
        batch = batch.color_temp(range.clamp(mireds));
    }
    if let Some(level) = white {
        batch = batch.white(level);
    }
    if let Some(scheme) = scheme {
        batch = batch.scheme(scheme);
    }

    let batch = batch.build()?;
    tracing::trace!(
        relay = %relay,
        commands = batch.len(),
        "Encoded light request"
    );
    Ok(batch)
}

fn validate_transition(transition: Option<f64>) -> Result<f64, EncodeError> {
    match transition {
        None => Ok(0.0),
        Some(t) if t.is_finite() && t >= 0.0 => Ok(t),
        Some(t) => Err(EncodeError::InvalidTransition(t)),
    }
}

/// Start and end levels of a fade, in device percent.
fn fade_levels(
    request: &LightRequest,
    dimmer: Option<Dimmer>,
    state: &LightState,
) -> (Dimmer, Dimmer) {
    let current = if state.is_on() {
        state.dimmer().unwrap_or(Dimmer::MAX)
    } else {
        Dimmer::MIN
    };

    let target = if !request.is_on() {
        Dimmer::MIN
    } else if let Some(level) = dimmer {
        level
    } else if state.is_on() {
        current
    } else {
        state
            .dimmer()
            .filter(|d| *d != Dimmer::MIN)
            .unwrap_or(Dimmer::MAX)
    };

    (current, target)
}
