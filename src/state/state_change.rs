// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes are the building blocks for updating a
//! [`LightState`](super::LightState). The telemetry decoder produces one
//! change per recognized payload key, already converted to canonical units.

use crate::types::{ColorTemp, PowerState, RgbColor, Scheme};

/// A single attribute update for a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum StateChange {
    /// Power state changed.
    Power(PowerState),

    /// Brightness changed (0-255).
    Brightness(u8),

    /// RGB color changed.
    Color(RgbColor),

    /// White channel level changed (0-255).
    WhiteValue(u8),

    /// Color temperature changed.
    ColorTemp(ColorTemp),

    /// Effect changed.
    Effect(Scheme),
}

impl StateChange {
    /// Creates a power-on change.
    #[must_use]
    pub const fn power_on() -> Self {
        Self::Power(PowerState::On)
    }

    /// Creates a power-off change.
    #[must_use]
    pub const fn power_off() -> Self {
        Self::Power(PowerState::Off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_constructors() {
        assert_eq!(StateChange::power_on(), StateChange::Power(PowerState::On));
        assert_eq!(StateChange::power_off(), StateChange::Power(PowerState::Off));
    }

    #[test]
    fn serializes_with_variant_name() {
        let json = serde_json::to_string(&StateChange::Brightness(128)).unwrap();
        assert_eq!(json, r#"{"Brightness":128}"#);
    }
}
