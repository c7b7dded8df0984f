// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversions between host-facing and device-facing scales.
//!
//! Hosts express brightness and white level on a 0-255 scale, Tasmota uses
//! a 0-100 percent scale. Both directions round half-up, so converting a
//! value to percent and back never drifts by more than one unit.
//!
//! ```
//! use tasmor_light::scale::{from_device_percent, to_device_percent};
//!
//! assert_eq!(to_device_percent(192).unwrap(), 75);
//! assert_eq!(from_device_percent(50).unwrap(), 128);
//! ```

use crate::error::ValueError;

/// Largest host-facing brightness value.
pub const BRIGHTNESS_MAX: u16 = 255;

/// Largest device percent value.
pub const PERCENT_MAX: u16 = 100;

/// Converts a 0-255 host value to a 0-100 device percentage.
///
/// # Errors
///
/// Returns `ValueError::OutOfRange` if `value` exceeds 255.
pub fn to_device_percent(value: u16) -> Result<u8, ValueError> {
    if value > BRIGHTNESS_MAX {
        return Err(ValueError::OutOfRange {
            min: 0,
            max: BRIGHTNESS_MAX,
            actual: value,
        });
    }
    Ok(rescale(value, BRIGHTNESS_MAX, PERCENT_MAX))
}

/// Converts a 0-100 device percentage to a 0-255 host value.
///
/// # Errors
///
/// Returns `ValueError::OutOfRange` if `percent` exceeds 100.
pub fn from_device_percent(percent: u16) -> Result<u8, ValueError> {
    if percent > PERCENT_MAX {
        return Err(ValueError::OutOfRange {
            min: 0,
            max: PERCENT_MAX,
            actual: percent,
        });
    }
    Ok(rescale(percent, PERCENT_MAX, BRIGHTNESS_MAX))
}

/// Rounds half-up; `value <= from` and `to <= 255` keep the result in `u8`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rescale(value: u16, from: u16, to: u16) -> u8 {
    (f64::from(value) * f64::from(to) / f64::from(from)).round() as u8
}

/// Computes the Tasmota `Speed` for a transition.
///
/// `Speed` counts half-second steps, scaled by the fraction of the full
/// dimmer range the light actually travels. A zero `delta_percent` counts as
/// a full-range step. The result is clamped to Tasmota's 1-40.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn transition_speed(transition_secs: f64, delta_percent: u8) -> u8 {
    let delta = if delta_percent == 0 {
        f64::from(PERCENT_MAX)
    } else {
        f64::from(delta_percent.min(100))
    };
    let speed = (transition_secs * 2.0 * delta / f64::from(PERCENT_MAX)).round();
    speed.clamp(1.0, 40.0) as u8
}
