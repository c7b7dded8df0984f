// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light capability resolution.
//!
//! A Tasmota discovery announcement does not list features directly. They
//! are inferred from the relay type, the light subtype (`lt_st`) and a few
//! `SetOption` flags. This module maps those inputs to a [`LightKind`], the
//! set of [`LightFeatures`] an entity exposes and, for white-tunable lights,
//! the supported [`CtRange`].
//!
//! | Kind | Features |
//! |------|----------|
//! | `OnOff` (relay as light) | none |
//! | `Dimmer` | brightness, transition |
//! | `ColdWarm` | brightness, color temp, transition |
//! | `Rgb` | brightness, color, effect, transition |
//! | `Rgbw` | brightness, color, effect, transition, white value |
//! | `Rgbww` | all of the above |

use std::fmt;

use bitflags::bitflags;

use crate::config::{DeviceConfig, LightSubtype, RelayType, SetOption};
use crate::error::ConfigError;
use crate::types::{CtRange, EFFECT_LIST};

bitflags! {
    /// Features supported by a light entity.
    ///
    /// Bit values match Home Assistant's `SUPPORT_*` light constants so the
    /// set can be handed to a host without translation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LightFeatures: u32 {
        /// Brightness control.
        const BRIGHTNESS = 1;
        /// Color temperature in mireds.
        const COLOR_TEMP = 2;
        /// Named effects (Tasmota schemes).
        const EFFECT = 4;
        /// RGB color.
        const COLOR = 16;
        /// Fading transitions.
        const TRANSITION = 32;
        /// Separate white channel level.
        const WHITE_VALUE = 128;
    }
}

/// A single controllable light attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Brightness (0-255).
    Brightness,
    /// Color temperature (mireds).
    ColorTemp,
    /// Effect name.
    Effect,
    /// RGB color.
    Color,
    /// Transition duration.
    Transition,
    /// White channel level (0-255).
    WhiteValue,
}

impl Attribute {
    /// The feature bit required to use this attribute.
    #[must_use]
    pub const fn feature(&self) -> LightFeatures {
        match self {
            Self::Brightness => LightFeatures::BRIGHTNESS,
            Self::ColorTemp => LightFeatures::COLOR_TEMP,
            Self::Effect => LightFeatures::EFFECT,
            Self::Color => LightFeatures::COLOR,
            Self::Transition => LightFeatures::TRANSITION,
            Self::WhiteValue => LightFeatures::WHITE_VALUE,
        }
    }

    /// Returns the attribute name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::ColorTemp => "color_temp",
            Self::Effect => "effect",
            Self::Color => "rgb_color",
            Self::Transition => "transition",
            Self::WhiteValue => "white_value",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical kind of a light entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    /// Relay exposed as a light; on/off only.
    OnOff,
    /// Single channel dimmer.
    Dimmer,
    /// Cold/warm white.
    ColdWarm,
    /// RGB.
    Rgb,
    /// RGB plus one white channel.
    Rgbw,
    /// RGB plus cold and warm white.
    Rgbww,
}

impl LightKind {
    /// Maps a light subtype to the kind of a merged light.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingLightSubtype` for [`LightSubtype::None`].
    pub const fn from_subtype(subtype: LightSubtype) -> Result<Self, ConfigError> {
        match subtype {
            LightSubtype::None => Err(ConfigError::MissingLightSubtype),
            LightSubtype::Dimmer => Ok(Self::Dimmer),
            LightSubtype::ColdWarm => Ok(Self::ColdWarm),
            LightSubtype::Rgb => Ok(Self::Rgb),
            LightSubtype::Rgbw => Ok(Self::Rgbw),
            LightSubtype::Rgbcw => Ok(Self::Rgbww),
        }
    }

    /// Number of PWM channels a light of this kind drives.
    #[must_use]
    pub const fn channel_count(&self) -> u8 {
        match self {
            Self::OnOff | Self::Dimmer => 1,
            Self::ColdWarm => 2,
            Self::Rgb => 3,
            Self::Rgbw => 4,
            Self::Rgbww => 5,
        }
    }

    /// Features a light of this kind exposes.
    #[must_use]
    pub const fn features(&self) -> LightFeatures {
        let dimmable = LightFeatures::BRIGHTNESS.union(LightFeatures::TRANSITION);
        let color = dimmable
            .union(LightFeatures::COLOR)
            .union(LightFeatures::EFFECT);
        match self {
            Self::OnOff => LightFeatures::empty(),
            Self::Dimmer => dimmable,
            Self::ColdWarm => dimmable.union(LightFeatures::COLOR_TEMP),
            Self::Rgb => color,
            Self::Rgbw => color.union(LightFeatures::WHITE_VALUE),
            Self::Rgbww => color
                .union(LightFeatures::WHITE_VALUE)
                .union(LightFeatures::COLOR_TEMP),
        }
    }
}

/// Resolved capabilities of one light entity.
///
/// # Examples
///
/// ```
/// use tasmor_light::capabilities::{Capabilities, LightFeatures, LightKind};
/// use tasmor_light::types::CtRange;
///
/// let caps = Capabilities::resolve(LightKind::ColdWarm, true);
/// assert!(caps.supports(LightFeatures::COLOR_TEMP));
/// assert_eq!(caps.ct_range(), Some(CtRange::REDUCED));
/// assert!(caps.effect_list().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    kind: LightKind,
    features: LightFeatures,
    ct_range: Option<CtRange>,
}

impl Capabilities {
    /// Resolves the capabilities of a light of the given kind.
    ///
    /// `reduced_ct` selects the 200-380 mired range (`SetOption82`).
    #[must_use]
    pub const fn resolve(kind: LightKind, reduced_ct: bool) -> Self {
        let features = kind.features();
        let ct_range = if features.contains(LightFeatures::COLOR_TEMP) {
            Some(if reduced_ct {
                CtRange::REDUCED
            } else {
                CtRange::FULL
            })
        } else {
            None
        };
        Self {
            kind,
            features,
            ct_range,
        }
    }

    /// Capabilities of a relay exposed as a light.
    #[must_use]
    pub const fn relay_light() -> Self {
        Self::resolve(LightKind::OnOff, false)
    }

    /// Returns the light kind.
    #[must_use]
    pub const fn kind(&self) -> LightKind {
        self.kind
    }

    /// Returns the supported feature set.
    #[must_use]
    pub const fn features(&self) -> LightFeatures {
        self.features
    }

    /// Returns `true` if every feature in `features` is supported.
    #[must_use]
    pub const fn supports(&self, features: LightFeatures) -> bool {
        self.features.contains(features)
    }

    /// Supported color temperature range, present iff color temp is supported.
    #[must_use]
    pub const fn ct_range(&self) -> Option<CtRange> {
        self.ct_range
    }

    /// Effect names, empty unless effects are supported.
    #[must_use]
    pub fn effect_list(&self) -> &'static [&'static str] {
        if self.supports(LightFeatures::EFFECT) {
            &EFFECT_LIST
        } else {
            &[]
        }
    }
}

/// What a single `rl` entry turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayRole {
    /// Plain switch entity.
    Switch,
    /// On/off light backed by a relay (`SetOption30`).
    RelayLight,
    /// Output driven by the light engine.
    Light,
    /// Not exposed (empty slot or shutter).
    Ignored,
}

impl RelayRole {
    /// Resolves the role of one relay of a device.
    #[must_use]
    pub fn resolve(config: &DeviceConfig, relay: RelayType) -> Self {
        match relay {
            RelayType::Relay if config.option(SetOption::ForceLightDiscovery) => Self::RelayLight,
            RelayType::Relay => Self::Switch,
            RelayType::Light => Self::Light,
            RelayType::None | RelayType::Shutter => Self::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> DeviceConfig {
        DeviceConfig::from_json(json).unwrap()
    }

    #[test]
    fn feature_bits_match_host_values() {
        assert_eq!(LightFeatures::BRIGHTNESS.bits(), 1);
        assert_eq!(LightFeatures::COLOR_TEMP.bits(), 2);
        assert_eq!(LightFeatures::EFFECT.bits(), 4);
        assert_eq!(LightFeatures::COLOR.bits(), 16);
        assert_eq!(LightFeatures::TRANSITION.bits(), 32);
        assert_eq!(LightFeatures::WHITE_VALUE.bits(), 128);
    }

    #[test]
    fn kind_from_subtype() {
        assert!(matches!(
            LightKind::from_subtype(LightSubtype::None),
            Err(ConfigError::MissingLightSubtype)
        ));
        assert_eq!(
            LightKind::from_subtype(LightSubtype::Rgbcw).unwrap(),
            LightKind::Rgbww
        );
        assert_eq!(
            LightKind::from_subtype(LightSubtype::Dimmer).unwrap(),
            LightKind::Dimmer
        );
    }

    #[test]
    fn features_per_kind() {
        assert_eq!(LightKind::OnOff.features(), LightFeatures::empty());
        assert_eq!(LightKind::Dimmer.features().bits(), 1 | 32);
        assert_eq!(LightKind::ColdWarm.features().bits(), 1 | 2 | 32);
        assert_eq!(LightKind::Rgb.features().bits(), 1 | 4 | 16 | 32);
        assert_eq!(LightKind::Rgbw.features().bits(), 1 | 4 | 16 | 32 | 128);
        assert_eq!(LightKind::Rgbww.features().bits(), 1 | 2 | 4 | 16 | 32 | 128);
    }

    #[test]
    fn ct_range_only_with_color_temp() {
        assert_eq!(
            Capabilities::resolve(LightKind::ColdWarm, false).ct_range(),
            Some(CtRange::FULL)
        );
        assert_eq!(
            Capabilities::resolve(LightKind::Rgbww, true).ct_range(),
            Some(CtRange::REDUCED)
        );
        assert_eq!(Capabilities::resolve(LightKind::Rgb, true).ct_range(), None);
        assert_eq!(Capabilities::resolve(LightKind::Dimmer, false).ct_range(), None);
    }

    #[test]
    fn effect_list_only_with_effect() {
        assert_eq!(
            Capabilities::resolve(LightKind::Rgb, false).effect_list(),
            &["None", "Wake up", "Cycle up", "Cycle down", "Random"]
        );
        assert!(Capabilities::resolve(LightKind::ColdWarm, false)
            .effect_list()
            .is_empty());
    }

    #[test]
    fn relay_light_has_no_features() {
        let caps = Capabilities::relay_light();
        assert_eq!(caps.kind(), LightKind::OnOff);
        assert!(caps.features().is_empty());
        assert_eq!(caps.ct_range(), None);
    }

    #[test]
    fn relay_roles() {
        let plain = config(r#"{"mac":"00000049A3BC","rl":[1,2,3,0]}"#);
        assert_eq!(RelayRole::resolve(&plain, RelayType::Relay), RelayRole::Switch);
        assert_eq!(RelayRole::resolve(&plain, RelayType::Light), RelayRole::Light);
        assert_eq!(RelayRole::resolve(&plain, RelayType::Shutter), RelayRole::Ignored);
        assert_eq!(RelayRole::resolve(&plain, RelayType::None), RelayRole::Ignored);

        let forced = config(r#"{"mac":"00000049A3BC","rl":[1],"so":{"30":1}}"#);
        assert_eq!(
            RelayRole::resolve(&forced, RelayType::Relay),
            RelayRole::RelayLight
        );
    }

    #[test]
    fn attribute_display() {
        assert_eq!(Attribute::Effect.to_string(), "effect");
        assert_eq!(Attribute::ColorTemp.to_string(), "color_temp");
        assert_eq!(Attribute::WhiteValue.feature(), LightFeatures::WHITE_VALUE);
    }
}
