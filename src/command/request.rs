// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-level light requests.

use crate::capabilities::Attribute;
use crate::types::{PowerState, RgbColor};

/// A turn-on or turn-off request in canonical units.
///
/// Brightness and white level use the 0-255 scale, color temperature is in
/// mireds and the transition is in seconds. Values are validated against a
/// light's capabilities when encoded, not here.
///
/// # Examples
///
/// ```
/// use tasmor_light::command::LightRequest;
/// use tasmor_light::types::RgbColor;
///
/// let request = LightRequest::turn_on()
///     .brightness(192)
///     .rgb(RgbColor::new(255, 128, 0))
///     .transition(2.0);
///
/// assert!(request.is_on());
/// assert_eq!(request.get_brightness(), Some(192));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LightRequest {
    power: PowerState,
    brightness: Option<u8>,
    rgb: Option<RgbColor>,
    white_value: Option<u8>,
    color_temp: Option<u16>,
    effect: Option<String>,
    transition: Option<f64>,
}

impl LightRequest {
    fn new(power: PowerState) -> Self {
        Self {
            power,
            brightness: None,
            rgb: None,
            white_value: None,
            color_temp: None,
            effect: None,
            transition: None,
        }
    }

    /// Creates a turn-on request.
    #[must_use]
    pub fn turn_on() -> Self {
        Self::new(PowerState::On)
    }

    /// Creates a turn-off request.
    #[must_use]
    pub fn turn_off() -> Self {
        Self::new(PowerState::Off)
    }

    // ========== Builder ==========

    #[must_use]
    pub const fn brightness(mut self, value: u8) -> Self {
        self.brightness = Some(value);
        self
    }

    #[must_use]
    pub const fn rgb(mut self, color: RgbColor) -> Self {
        self.rgb = Some(color);
        self
    }

    #[must_use]
    pub const fn white_value(mut self, value: u8) -> Self {
        self.white_value = Some(value);
        self
    }

    /// Sets the color temperature in mireds.
    #[must_use]
    pub const fn color_temp(mut self, mireds: u16) -> Self {
        self.color_temp = Some(mireds);
        self
    }

    #[must_use]
    pub fn effect(mut self, name: impl Into<String>) -> Self {
        self.effect = Some(name.into());
        self
    }

    /// Sets the transition duration in seconds.
    #[must_use]
    pub const fn transition(mut self, seconds: f64) -> Self {
        self.transition = Some(seconds);
        self
    }

    // ========== Accessors ==========

    #[must_use]
    pub const fn power(&self) -> PowerState {
        self.power
    }

    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.power.is_on()
    }

    #[must_use]
    pub const fn get_brightness(&self) -> Option<u8> {
        self.brightness
    }

    #[must_use]
    pub const fn get_rgb(&self) -> Option<RgbColor> {
        self.rgb
    }

    #[must_use]
    pub const fn get_white_value(&self) -> Option<u8> {
        self.white_value
    }

    #[must_use]
    pub const fn get_color_temp(&self) -> Option<u16> {
        self.color_temp
    }

    #[must_use]
    pub fn get_effect(&self) -> Option<&str> {
        self.effect.as_deref()
    }

    #[must_use]
    pub const fn get_transition(&self) -> Option<f64> {
        self.transition
    }

    /// Attributes set on this request, transition excluded, in encoding order.
    #[must_use]
    pub fn attributes(&self) -> Vec<Attribute> {
        [
            (self.brightness.is_some(), Attribute::Brightness),
            (self.rgb.is_some(), Attribute::Color),
            (self.color_temp.is_some(), Attribute::ColorTemp),
            (self.white_value.is_some(), Attribute::WhiteValue),
            (self.effect.is_some(), Attribute::Effect),
        ]
        .into_iter()
        .filter_map(|(set, attr)| set.then_some(attr))
        .collect()
    }
}
