// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device configuration from Tasmota discovery announcements.
//!
//! Tasmota publishes its configuration once to
//! `tasmota/discovery/<MAC>/config`. This module validates that payload into
//! a [`DeviceConfig`] up front: a malformed announcement is rejected with a
//! [`ConfigError`] at ingest instead of failing later during decoding or
//! encoding.
//!
//! # Examples
//!
//! ```
//! use tasmor_light::config::{DeviceConfig, LightSubtype, RelayType, SetOption};
//!
//! let json = r#"{
//!     "mac": "00000049A3BC",
//!     "rl": [2, 0, 0],
//!     "lt_st": 5,
//!     "so": {"82": 1},
//!     "t": "tasmota_49A3BC",
//!     "ft": "%topic%/%prefix%/",
//!     "tp": ["cmnd", "stat", "tele"]
//! }"#;
//!
//! let config = DeviceConfig::from_json(json).unwrap();
//! assert_eq!(config.relay(0), Some(RelayType::Light));
//! assert_eq!(config.light_subtype(), LightSubtype::Rgbcw);
//! assert!(config.option(SetOption::ReducedCtRange));
//! assert_eq!(config.backlog_topic(), "tasmota_49A3BC/cmnd/Backlog");
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::PowerIndex;

/// Default Tasmota full topic when the announcement carries none.
pub const DEFAULT_FULL_TOPIC: &str = "%topic%/%prefix%/";

/// Type tag of one entry of the `rl` relay array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayType {
    /// No output at this index.
    None,
    /// Plain relay, exposed as a switch.
    Relay,
    /// Output driven by the light engine.
    Light,
    /// Relay owned by a shutter; neither switch nor light.
    Shutter,
}

impl RelayType {
    fn from_tag(index: usize, tag: u8) -> Result<Self, ConfigError> {
        match tag {
            0 => Ok(Self::None),
            1 => Ok(Self::Relay),
            2 => Ok(Self::Light),
            3 => Ok(Self::Shutter),
            kind => Err(ConfigError::UnknownRelayType { index, kind }),
        }
    }
}

/// Light subtype (`lt_st`): how many PWM channels the light engine drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LightSubtype {
    /// No light.
    #[default]
    None,
    /// Single channel dimmer.
    Dimmer,
    /// Cold/warm white.
    ColdWarm,
    /// Red, green, blue.
    Rgb,
    /// RGB plus one white channel.
    Rgbw,
    /// RGB plus cold and warm white.
    Rgbcw,
}

impl LightSubtype {
    /// Number of PWM channels for this subtype.
    #[must_use]
    pub const fn channel_count(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Dimmer => 1,
            Self::ColdWarm => 2,
            Self::Rgb => 3,
            Self::Rgbw => 4,
            Self::Rgbcw => 5,
        }
    }

    /// Returns `true` if the subtype has RGB channels and separate white ones.
    #[must_use]
    pub const fn has_separate_white(&self) -> bool {
        matches!(self, Self::Rgbw | Self::Rgbcw)
    }
}

impl TryFrom<u8> for LightSubtype {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Dimmer),
            2 => Ok(Self::ColdWarm),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgbw),
            5 => Ok(Self::Rgbcw),
            other => Err(ConfigError::UnknownLightSubtype(other)),
        }
    }
}

/// `SetOption` flags that influence light discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOption {
    /// `SetOption30`: announce relays as lights instead of switches.
    ForceLightDiscovery,
    /// `SetOption68`: drive each PWM channel as an independent light.
    PwmMultiChannel,
    /// `SetOption82`: limit color temperature to 200-380 mireds.
    ReducedCtRange,
}

impl SetOption {
    /// Numeric key of the option in the `so` map.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::ForceLightDiscovery => "30",
            Self::PwmMultiChannel => "68",
            Self::ReducedCtRange => "82",
        }
    }
}

/// Raw discovery payload; only used to feed validation.
#[derive(Debug, Deserialize)]
struct RawConfig {
    mac: Option<String>,
    rl: Option<Vec<u8>>,
    #[serde(default)]
    lt_st: u8,
    #[serde(default)]
    so: HashMap<String, u8>,
    #[serde(default = "linked_by_default")]
    lk: u8,
    t: Option<String>,
    ft: Option<String>,
    tp: Option<Vec<String>>,
    dn: Option<String>,
}

const fn linked_by_default() -> u8 {
    1
}

/// Validated device configuration.
///
/// Immutable once parsed. A new announcement for the same device produces
/// a new `DeviceConfig` that replaces the old one entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    mac: String,
    relays: Vec<RelayType>,
    light_subtype: LightSubtype,
    options: HashMap<String, u8>,
    linked: bool,
    topic: String,
    full_topic: String,
    prefixes: [String; 3],
    device_name: Option<String>,
}

impl DeviceConfig {
    /// Parses and validates a discovery payload.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JSON is malformed, `mac` or `rl` is
    /// missing, the MAC is not 12 hex digits, or a relay/subtype tag is
    /// unknown.
    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(payload)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mac = raw.mac.ok_or(ConfigError::MissingField("mac"))?;
        let mac = normalize_mac(&mac)?;

        let relays = raw
            .rl
            .ok_or(ConfigError::MissingField("rl"))?
            .into_iter()
            .enumerate()
            .map(|(index, tag)| RelayType::from_tag(index, tag))
            .collect::<Result<Vec<_>, _>>()?;
        if relays.len() > usize::from(PowerIndex::MAX) {
            return Err(ConfigError::TooManyRelays(relays.len()));
        }

        let light_subtype = LightSubtype::try_from(raw.lt_st)?;

        let topic = raw
            .t
            .unwrap_or_else(|| format!("tasmota_{}", &mac[mac.len() - 6..]));

        let prefixes = match raw.tp.as_deref() {
            Some([cmnd, stat, tele, ..]) => [cmnd.clone(), stat.clone(), tele.clone()],
            _ => [
                "cmnd".to_string(),
                "stat".to_string(),
                "tele".to_string(),
            ],
        };

        Ok(Self {
            mac,
            relays,
            light_subtype,
            options: raw.so,
            linked: raw.lk != 0,
            topic,
            full_topic: raw.ft.unwrap_or_else(|| DEFAULT_FULL_TOPIC.to_string()),
            prefixes,
            device_name: raw.dn,
        })
    }

    /// Upper-case MAC address without separators.
    #[must_use]
    pub fn mac(&self) -> &str {
        &self.mac
    }

    /// All relay entries in `rl` order.
    #[must_use]
    pub fn relays(&self) -> &[RelayType] {
        &self.relays
    }

    /// Relay type at a zero-based position.
    #[must_use]
    pub fn relay(&self, index: usize) -> Option<RelayType> {
        self.relays.get(index).copied()
    }

    /// Light subtype (`lt_st`).
    #[must_use]
    pub const fn light_subtype(&self) -> LightSubtype {
        self.light_subtype
    }

    /// Returns whether a `SetOption` flag is enabled; absent flags are off.
    #[must_use]
    pub fn option(&self, option: SetOption) -> bool {
        self.options.get(option.key()).is_some_and(|v| *v != 0)
    }

    /// Returns `true` if RGB and white channels are linked (`lk`).
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.linked
    }

    /// Device MQTT topic (`t`).
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Friendly device name (`dn`), if announced.
    #[must_use]
    pub fn device_name(&self) -> Option<&str> {
        self.device_name.as_deref()
    }

    /// Expands the full topic for one prefix (`cmnd`, `stat` or `tele`).
    fn expand(&self, prefix: &str) -> String {
        self.full_topic
            .replace("%topic%", &self.topic)
            .replace("%prefix%", prefix)
            .replace("%id%", &self.mac[self.mac.len() - 6..])
    }

    /// Topic for a single command, e.g. `tasmota_49A3BC/cmnd/Power1`.
    #[must_use]
    pub fn command_topic(&self, command: &str) -> String {
        format!("{}{command}", self.expand(&self.prefixes[0]))
    }

    /// Topic that accepts batched commands.
    #[must_use]
    pub fn backlog_topic(&self) -> String {
        self.command_topic("Backlog")
    }

    /// Topic carrying command results (`stat/RESULT`).
    #[must_use]
    pub fn result_topic(&self) -> String {
        format!("{}RESULT", self.expand(&self.prefixes[1]))
    }

    /// Topic carrying periodic state telemetry (`tele/STATE`).
    #[must_use]
    pub fn state_topic(&self) -> String {
        format!("{}STATE", self.expand(&self.prefixes[2]))
    }
}

pub(crate) fn normalize_mac(mac: &str) -> Result<String, ConfigError> {
    let cleaned: String = mac.chars().filter(|c| !matches!(c, ':' | '-')).collect();
    if cleaned.len() != 12 || !cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidMac(mac.to_string()));
    }
    Ok(cleaned.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"{"mac":"00000049A3BC","rl":[1,0,0,0,0,0,0,0],"lt_st":0,"so":{},"lk":1}"#;

    #[test]
    fn parse_minimal_config() {
        let config = DeviceConfig::from_json(BASE).unwrap();
        assert_eq!(config.mac(), "00000049A3BC");
        assert_eq!(config.relays().len(), 8);
        assert_eq!(config.relay(0), Some(RelayType::Relay));
        assert_eq!(config.relay(1), Some(RelayType::None));
        assert_eq!(config.relay(8), None);
        assert_eq!(config.light_subtype(), LightSubtype::None);
        assert!(config.is_linked());
    }

    #[test]
    fn absent_options_default_off() {
        let config = DeviceConfig::from_json(r#"{"mac":"00000049A3BC","rl":[2]}"#).unwrap();
        assert!(!config.option(SetOption::ForceLightDiscovery));
        assert!(!config.option(SetOption::PwmMultiChannel));
        assert!(!config.option(SetOption::ReducedCtRange));
        assert!(config.is_linked());
    }

    #[test]
    fn options_by_numeric_key() {
        let config = DeviceConfig::from_json(
            r#"{"mac":"00000049A3BC","rl":[2],"so":{"30":1,"68":0,"82":1},"lk":0}"#,
        )
        .unwrap();
        assert!(config.option(SetOption::ForceLightDiscovery));
        assert!(!config.option(SetOption::PwmMultiChannel));
        assert!(config.option(SetOption::ReducedCtRange));
        assert!(!config.is_linked());
    }

    #[test]
    fn missing_required_fields() {
        assert!(matches!(
            DeviceConfig::from_json(r#"{"rl":[1]}"#),
            Err(ConfigError::MissingField("mac"))
        ));
        assert!(matches!(
            DeviceConfig::from_json(r#"{"mac":"00000049A3BC"}"#),
            Err(ConfigError::MissingField("rl"))
        ));
    }

    #[test]
    fn invalid_mac_rejected() {
        assert!(matches!(
            DeviceConfig::from_json(r#"{"mac":"nope","rl":[1]}"#),
            Err(ConfigError::InvalidMac(_))
        ));
    }

    #[test]
    fn mac_normalized() {
        let config =
            DeviceConfig::from_json(r#"{"mac":"aa:bb:cc:dd:ee:ff","rl":[1]}"#).unwrap();
        assert_eq!(config.mac(), "AABBCCDDEEFF");
        assert_eq!(config.topic(), "tasmota_DDEEFF");
    }

    #[test]
    fn unknown_tags_rejected() {
        assert!(matches!(
            DeviceConfig::from_json(r#"{"mac":"00000049A3BC","rl":[1,7]}"#),
            Err(ConfigError::UnknownRelayType { index: 1, kind: 7 })
        ));
        assert!(matches!(
            DeviceConfig::from_json(r#"{"mac":"00000049A3BC","rl":[2],"lt_st":9}"#),
            Err(ConfigError::UnknownLightSubtype(9))
        ));
    }

    #[test]
    fn too_many_relays_rejected() {
        let rl = vec!["1"; 33].join(",");
        let json = format!(r#"{{"mac":"00000049A3BC","rl":[{rl}]}}"#);
        assert!(matches!(
            DeviceConfig::from_json(&json),
            Err(ConfigError::TooManyRelays(33))
        ));
    }

    #[test]
    fn wrong_field_type_is_json_error() {
        assert!(matches!(
            DeviceConfig::from_json(r#"{"mac":"00000049A3BC","rl":"nope"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn default_topics() {
        let config = DeviceConfig::from_json(BASE).unwrap();
        assert_eq!(config.topic(), "tasmota_49A3BC");
        assert_eq!(config.backlog_topic(), "tasmota_49A3BC/cmnd/Backlog");
        assert_eq!(config.state_topic(), "tasmota_49A3BC/tele/STATE");
        assert_eq!(config.result_topic(), "tasmota_49A3BC/stat/RESULT");
    }

    #[test]
    fn custom_full_topic_and_prefixes() {
        let config = DeviceConfig::from_json(
            r#"{"mac":"00000049A3BC","rl":[1],"t":"kitchen","ft":"%prefix%/%topic%/","tp":["c","s","t"]}"#,
        )
        .unwrap();
        assert_eq!(config.command_topic("Power1"), "c/kitchen/Power1");
        assert_eq!(config.state_topic(), "t/kitchen/STATE");
        assert_eq!(config.result_topic(), "s/kitchen/RESULT");
    }

    #[test]
    fn full_topic_id_token() {
        let config = DeviceConfig::from_json(
            r#"{"mac":"00000049A3BC","rl":[1],"ft":"%prefix%/dev_%id%/"}"#,
        )
        .unwrap();
        assert_eq!(config.backlog_topic(), "cmnd/dev_49A3BC/Backlog");
    }

    #[test]
    fn subtype_channel_counts() {
        assert_eq!(LightSubtype::None.channel_count(), 0);
        assert_eq!(LightSubtype::Rgbcw.channel_count(), 5);
        assert!(LightSubtype::Rgbw.has_separate_white());
        assert!(!LightSubtype::Rgb.has_separate_white());
    }
}
