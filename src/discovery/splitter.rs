// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Splitting of a device's outputs into logical entities.

use std::ops::RangeInclusive;

use crate::capabilities::{Capabilities, LightKind, RelayRole};
use crate::config::{DeviceConfig, LightSubtype, SetOption};
use crate::discovery::{Addressing, LightDescriptor, SwitchDescriptor};
use crate::error::ConfigError;
use crate::types::PowerIndex;

/// A light before its list index is known.
struct Pending {
    relay: PowerIndex,
    capabilities: Capabilities,
    addressing: Addressing,
    channels: Option<RangeInclusive<u8>>,
}

/// Switch entities for plain relays, in relay order.
pub(crate) fn switches(config: &DeviceConfig) -> Result<Vec<SwitchDescriptor>, ConfigError> {
    let mut switches = Vec::new();
    for (position, relay) in config.relays().iter().enumerate() {
        if RelayRole::resolve(config, *relay) == RelayRole::Switch {
            let index = relay_index(position)?;
            switches.push(SwitchDescriptor::new(switches.len(), index));
        }
    }
    Ok(switches)
}

/// Light entities (relay lights and light engine outputs), in relay order.
pub(crate) fn lights(config: &DeviceConfig) -> Result<Vec<LightDescriptor>, ConfigError> {
    let mut pending = Vec::new();
    let mut light_relays = Vec::new();

    for (position, relay) in config.relays().iter().enumerate() {
        match RelayRole::resolve(config, *relay) {
            RelayRole::RelayLight => pending.push(Pending {
                relay: relay_index(position)?,
                capabilities: Capabilities::relay_light(),
                addressing: Addressing::Relay,
                channels: None,
            }),
            RelayRole::Light => light_relays.push(relay_index(position)?),
            RelayRole::Switch | RelayRole::Ignored => {}
        }
    }

    if !light_relays.is_empty() {
        pending.extend(split_light_engine(config, &light_relays)?);
    }

    pending.sort_by_key(|p| p.relay);
    Ok(pending
        .into_iter()
        .enumerate()
        .map(|(index, p)| {
            LightDescriptor::new(index, p.relay, p.capabilities, p.addressing, p.channels)
        })
        .collect())
}

fn split_light_engine(
    config: &DeviceConfig,
    relays: &[PowerIndex],
) -> Result<Vec<Pending>, ConfigError> {
    let subtype = config.light_subtype();
    let kind = LightKind::from_subtype(subtype)?;
    let reduced_ct = config.option(SetOption::ReducedCtRange);
    let channel_count = subtype.channel_count();

    // PWM split takes precedence over unlinked channels
    if config.option(SetOption::PwmMultiChannel) {
        if relays.len() > usize::from(channel_count) {
            return Err(mismatch(relays, channel_count, "pwm split"));
        }
        return Ok(relays
            .iter()
            .zip(1..=channel_count)
            .map(|(relay, channel)| Pending {
                relay: *relay,
                capabilities: Capabilities::resolve(LightKind::Dimmer, reduced_ct),
                addressing: Addressing::Channel,
                channels: Some(channel..=channel),
            })
            .collect());
    }

    if !config.is_linked() && subtype.has_separate_white() {
        // Extra light relays share the two halves
        let [rgb_relay, white_relay, ..] = relays else {
            return Err(mismatch(relays, channel_count, "unlinked"));
        };
        let white_kind = if subtype == LightSubtype::Rgbcw {
            LightKind::ColdWarm
        } else {
            LightKind::Dimmer
        };
        return Ok(vec![
            Pending {
                relay: *rgb_relay,
                capabilities: Capabilities::resolve(LightKind::Rgb, reduced_ct),
                addressing: Addressing::Unlinked { index: 1 },
                channels: Some(1..=3),
            },
            Pending {
                relay: *white_relay,
                capabilities: Capabilities::resolve(white_kind, reduced_ct),
                addressing: Addressing::Unlinked { index: 2 },
                channels: Some(4..=channel_count),
            },
        ]);
    }

    // All light relays drive the same channels; the first one addresses them
    let Some(relay) = relays.first() else {
        return Err(mismatch(relays, channel_count, "merged"));
    };
    Ok(vec![Pending {
        relay: *relay,
        capabilities: Capabilities::resolve(kind, reduced_ct),
        addressing: Addressing::Merged,
        channels: Some(1..=channel_count),
    }])
}

fn relay_index(position: usize) -> Result<PowerIndex, ConfigError> {
    PowerIndex::from_relay(position).map_err(|_| ConfigError::TooManyRelays(position + 1))
}

const fn mismatch(relays: &[PowerIndex], channels: u8, layout: &'static str) -> ConfigError {
    ConfigError::ChannelMismatch {
        relays: relays.len(),
        channels,
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::LightFeatures;
    use crate::types::CtRange;

    fn config(json: &str) -> DeviceConfig {
        DeviceConfig::from_json(json).unwrap()
    }

    #[test]
    fn merged_light_owns_all_channels() {
        let lights = lights(&config(r#"{"mac":"00000049A3BC","rl":[2,0],"lt_st":4}"#)).unwrap();
        assert_eq!(lights.len(), 1);
        assert_eq!(lights[0].kind(), LightKind::Rgbw);
        assert_eq!(lights[0].addressing(), Addressing::Merged);
        assert_eq!(lights[0].channels(), Some(&(1..=4)));
    }

    #[test]
    fn merged_light_on_first_of_several_relays() {
        let lights = lights(&config(r#"{"mac":"00000049A3BC","rl":[1,2,2],"lt_st":5}"#)).unwrap();
        assert_eq!(lights.len(), 1);
        assert_eq!(lights[0].relay().value(), 2);
        assert_eq!(lights[0].kind(), LightKind::Rgbww);
        assert_eq!(lights[0].addressing(), Addressing::Merged);
        assert_eq!(lights[0].channels(), Some(&(1..=5)));
    }

    #[test]
    fn pwm_split_one_dimmer_per_channel() {
        let lights = lights(&config(
            r#"{"mac":"00000049A3BC","rl":[1,1,2,2,2,2,2],"lt_st":5,"so":{"68":1}}"#,
        ))
        .unwrap();
        assert_eq!(lights.len(), 5);
        for (i, light) in lights.iter().enumerate() {
            assert_eq!(light.index(), i);
            assert_eq!(usize::from(light.relay().value()), i + 3);
            assert_eq!(light.kind(), LightKind::Dimmer);
            assert_eq!(
                light.features(),
                LightFeatures::BRIGHTNESS | LightFeatures::TRANSITION
            );
            assert_eq!(light.addressing(), Addressing::Channel);
            let channel = u8::try_from(i + 1).unwrap();
            assert_eq!(light.channels(), Some(&(channel..=channel)));
        }
    }

    #[test]
    fn pwm_split_too_many_relays() {
        let err = lights(&config(
            r#"{"mac":"00000049A3BC","rl":[2,2,2,2],"lt_st":3,"so":{"68":1}}"#,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ChannelMismatch {
                layout: "pwm split",
                ..
            }
        ));
    }

    #[test]
    fn pwm_split_wins_over_unlinked() {
        let lights = lights(&config(
            r#"{"mac":"00000049A3BC","rl":[2,2],"lt_st":5,"lk":0,"so":{"68":1}}"#,
        ))
        .unwrap();
        assert!(lights.iter().all(|l| l.addressing() == Addressing::Channel));
    }

    #[test]
    fn unlinked_rgbcw() {
        let lights = lights(&config(
            r#"{"mac":"00000049A3BC","rl":[1,1,2,2],"lt_st":5,"lk":0,"so":{"82":1}}"#,
        ))
        .unwrap();
        assert_eq!(lights.len(), 2);

        let rgb = &lights[0];
        assert_eq!(rgb.relay().value(), 3);
        assert_eq!(rgb.kind(), LightKind::Rgb);
        assert_eq!(rgb.addressing(), Addressing::Unlinked { index: 1 });
        assert_eq!(rgb.channels(), Some(&(1..=3)));

        let white = &lights[1];
        assert_eq!(white.relay().value(), 4);
        assert_eq!(white.kind(), LightKind::ColdWarm);
        assert_eq!(white.ct_range(), Some(CtRange::REDUCED));
        assert_eq!(white.addressing(), Addressing::Unlinked { index: 2 });
        assert_eq!(white.channels(), Some(&(4..=5)));
    }

    #[test]
    fn unlinked_rgbw_white_is_dimmer() {
        let lights = lights(&config(
            r#"{"mac":"00000049A3BC","rl":[2,2],"lt_st":4,"lk":0}"#,
        ))
        .unwrap();
        assert_eq!(lights[1].kind(), LightKind::Dimmer);
        assert_eq!(lights[1].channels(), Some(&(4..=4)));
    }

    #[test]
    fn unlinked_four_relays_still_two_lights() {
        let lights = lights(&config(
            r#"{"mac":"00000049A3BC","rl":[2,2,2,2],"lt_st":5,"lk":0}"#,
        ))
        .unwrap();
        assert_eq!(lights.len(), 2);
        assert_eq!(lights[0].relay().value(), 1);
        assert_eq!(lights[0].addressing(), Addressing::Unlinked { index: 1 });
        assert_eq!(lights[1].relay().value(), 2);
        assert_eq!(lights[1].addressing(), Addressing::Unlinked { index: 2 });
    }

    #[test]
    fn unlinked_needs_two_relays() {
        let err = lights(&config(
            r#"{"mac":"00000049A3BC","rl":[2],"lt_st":5,"lk":0}"#,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ChannelMismatch {
                relays: 1,
                layout: "unlinked",
                ..
            }
        ));
    }

    #[test]
    fn unlinked_flag_ignored_without_white_channels() {
        let lights = lights(&config(r#"{"mac":"00000049A3BC","rl":[2],"lt_st":3,"lk":0}"#))
            .unwrap();
        assert_eq!(lights[0].addressing(), Addressing::Merged);
    }

    #[test]
    fn missing_subtype() {
        let err = lights(&config(r#"{"mac":"00000049A3BC","rl":[2]}"#)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingLightSubtype));
    }

    #[test]
    fn relay_lights_and_switches() {
        let forced = config(r#"{"mac":"00000049A3BC","rl":[1,1,3],"so":{"30":1}}"#);
        assert!(switches(&forced).unwrap().is_empty());
        let lights = lights(&forced).unwrap();
        assert_eq!(lights.len(), 2);
        assert_eq!(lights[1].relay().value(), 2);
        assert_eq!(lights[1].addressing(), Addressing::Relay);
        assert!(lights[1].features().is_empty());

        let plain = config(r#"{"mac":"00000049A3BC","rl":[1,0,1]}"#);
        let switches = switches(&plain).unwrap();
        assert_eq!(switches.len(), 2);
        assert_eq!(switches[1].index(), 1);
        assert_eq!(switches[1].relay().value(), 3);
    }

    #[test]
    fn relay_lights_sorted_with_engine_lights() {
        let lights = lights(&config(
            r#"{"mac":"00000049A3BC","rl":[2,1],"lt_st":1,"so":{"30":1}}"#,
        ))
        .unwrap();
        assert_eq!(lights[0].relay().value(), 1);
        assert_eq!(lights[0].addressing(), Addressing::Merged);
        assert_eq!(lights[1].relay().value(), 2);
        assert_eq!(lights[1].addressing(), Addressing::Relay);
        assert_eq!(lights[1].index(), 1);
    }
}
