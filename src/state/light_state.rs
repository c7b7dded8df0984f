// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Last known attributes of a light entity.

use chrono::{DateTime, Utc};

use crate::scale;
use crate::state::StateChange;
use crate::types::{ColorTemp, Dimmer, PowerState, RgbColor, Scheme};

/// Last known state of one light.
///
/// Every field is `None` until the device reports it. Brightness and white
/// level are stored on the 0-255 scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct LightState {
    power: Option<PowerState>,
    brightness: Option<u8>,
    rgb: Option<RgbColor>,
    white_value: Option<u8>,
    color_temp: Option<ColorTemp>,
    effect: Option<Scheme>,
    last_updated: Option<DateTime<Utc>>,
}

impl LightState {
    /// Creates a new empty state (all unknown).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Getters ==========

    #[must_use]
    pub const fn power(&self) -> Option<PowerState> {
        self.power
    }

    /// Returns `true` only if the light is known to be on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self.power, Some(PowerState::On))
    }

    #[must_use]
    pub const fn brightness(&self) -> Option<u8> {
        self.brightness
    }

    /// Last brightness converted back to a device percentage.
    #[must_use]
    pub fn dimmer(&self) -> Option<Dimmer> {
        self.brightness
            .and_then(|b| scale::to_device_percent(u16::from(b)).ok())
            .and_then(|pct| Dimmer::new(pct).ok())
    }

    #[must_use]
    pub const fn rgb(&self) -> Option<RgbColor> {
        self.rgb
    }

    #[must_use]
    pub const fn white_value(&self) -> Option<u8> {
        self.white_value
    }

    #[must_use]
    pub const fn color_temp(&self) -> Option<ColorTemp> {
        self.color_temp
    }

    #[must_use]
    pub const fn effect(&self) -> Option<Scheme> {
        self.effect
    }

    /// Effect name, if known.
    #[must_use]
    pub fn effect_name(&self) -> Option<&'static str> {
        self.effect.map(|s| s.effect())
    }

    /// When a device report last changed this state.
    #[must_use]
    pub const fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    // ========== State Changes ==========

    /// Applies a state change and returns whether the state actually changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match *change {
            StateChange::Power(state) => replace(&mut self.power, state),
            StateChange::Brightness(value) => replace(&mut self.brightness, value),
            StateChange::Color(color) => replace(&mut self.rgb, color),
            StateChange::WhiteValue(value) => replace(&mut self.white_value, value),
            StateChange::ColorTemp(ct) => replace(&mut self.color_temp, ct),
            StateChange::Effect(scheme) => replace(&mut self.effect, scheme),
        }
    }

    /// Records the time of the latest applied report.
    pub fn mark_updated(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }

    /// Clears all state, resetting to unknown.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

fn replace<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        false
    } else {
        *slot = Some(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = LightState::new();
        assert!(state.power().is_none());
        assert!(state.brightness().is_none());
        assert!(state.rgb().is_none());
        assert!(state.white_value().is_none());
        assert!(state.color_temp().is_none());
        assert!(state.effect().is_none());
        assert!(state.last_updated().is_none());
        assert!(!state.is_on());
    }

    #[test]
    fn apply_reports_changes() {
        let mut state = LightState::new();
        assert!(state.apply(&StateChange::power_on()));
        assert!(!state.apply(&StateChange::power_on()));
        assert!(state.apply(&StateChange::power_off()));
        assert_eq!(state.power(), Some(PowerState::Off));
    }

    #[test]
    fn apply_each_attribute() {
        let mut state = LightState::new();
        state.apply(&StateChange::Brightness(191));
        state.apply(&StateChange::Color(RgbColor::new(255, 128, 0)));
        state.apply(&StateChange::WhiteValue(128));
        state.apply(&StateChange::ColorTemp(ColorTemp::new(300).unwrap()));
        state.apply(&StateChange::Effect(Scheme::CYCLE_DOWN));

        assert_eq!(state.brightness(), Some(191));
        assert_eq!(state.dimmer().map(|d| d.value()), Some(75));
        assert_eq!(state.rgb(), Some(RgbColor::new(255, 128, 0)));
        assert_eq!(state.white_value(), Some(128));
        assert_eq!(state.color_temp().map(|ct| ct.value()), Some(300));
        assert_eq!(state.effect_name(), Some("Cycle down"));
    }

    #[test]
    fn mark_updated_and_clear() {
        let mut state = LightState::new();
        state.apply(&StateChange::power_on());
        let now = Utc::now();
        state.mark_updated(now);
        assert_eq!(state.last_updated(), Some(now));

        state.clear();
        assert_eq!(state, LightState::new());
    }
}
