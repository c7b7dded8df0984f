// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-key decoding of Tasmota state payloads.
//!
//! Each function reads one key and converts it to canonical units. Absent
//! keys yield `Ok(None)`.

use serde_json::{Map, Value};

use crate::discovery::{Addressing, LightDescriptor};
use crate::error::{DecodeError, ValueError};
use crate::scale;
use crate::types::{ColorTemp, CtRange, PowerIndex, PowerState, RgbColor, Scheme};

/// A decoded STATE or RESULT payload.
pub type Payload = Map<String, Value>;

/// Parses a STATE or RESULT payload into a JSON object.
pub(crate) fn parse_payload(payload: &str) -> Result<Payload, DecodeError> {
    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DecodeError::NotAnObject),
        Err(e) => Err(DecodeError::InvalidJson(e.to_string())),
    }
}

/// Reads `POWER<N>`, or plain `POWER` for relay 1.
pub(crate) fn power(payload: &Payload, relay: PowerIndex) -> Result<Option<PowerState>, DecodeError> {
    let indexed = relay.power_key();
    let entry = payload.get_key_value(indexed.as_str()).or_else(|| {
        if relay == PowerIndex::one() {
            payload.get_key_value("POWER")
        } else {
            None
        }
    });
    let Some((key, value)) = entry else {
        return Ok(None);
    };

    let invalid = || DecodeError::InvalidPower {
        key: key.clone(),
        value: value.to_string(),
    };
    let text = value.as_str().ok_or_else(invalid)?;
    text.parse::<PowerState>().map(Some).map_err(|_| invalid())
}

/// Reads the brightness key matching the light's addressing, as 0-255.
pub(crate) fn brightness(
    payload: &Payload,
    descriptor: &LightDescriptor,
) -> Result<Option<u8>, DecodeError> {
    match descriptor.addressing() {
        Addressing::Merged => percent(payload, "Dimmer"),
        Addressing::Unlinked { index } => percent(payload, &format!("Dimmer{index}")),
        Addressing::Channel => {
            let Some(value) = payload.get("Channel") else {
                return Ok(None);
            };
            let Some(channel) = descriptor.channels().map(|c| *c.start()) else {
                return Ok(None);
            };
            let values = value
                .as_array()
                .ok_or_else(|| DecodeError::UnexpectedType("Channel".to_string()))?;
            match values.get(usize::from(channel).saturating_sub(1)) {
                Some(element) => percent_value("Channel", element).map(Some),
                None => Ok(None),
            }
        }
        Addressing::Relay => Ok(None),
    }
}

/// Reads `Color` (`r,g,b[,c[,w]]`).
pub(crate) fn color(payload: &Payload) -> Result<Option<RgbColor>, DecodeError> {
    let Some(value) = payload.get("Color") else {
        return Ok(None);
    };
    let text = value
        .as_str()
        .ok_or_else(|| DecodeError::MalformedColor(value.to_string()))?;
    text.parse::<RgbColor>()
        .map(Some)
        .map_err(|_| DecodeError::MalformedColor(text.to_string()))
}

/// Reads `White` as 0-255.
pub(crate) fn white(payload: &Payload) -> Result<Option<u8>, DecodeError> {
    percent(payload, "White")
}

/// Reads `CT`, clamped into `range`.
pub(crate) fn color_temp(payload: &Payload, range: CtRange) -> Result<Option<ColorTemp>, DecodeError> {
    let Some(value) = payload.get("CT") else {
        return Ok(None);
    };
    let mireds = value
        .as_u64()
        .ok_or_else(|| DecodeError::UnexpectedType("CT".to_string()))?;
    Ok(Some(range.clamp(u16::try_from(mireds).unwrap_or(u16::MAX))))
}

/// Reads `Scheme`.
pub(crate) fn scheme(payload: &Payload) -> Result<Option<Scheme>, DecodeError> {
    let Some(value) = payload.get("Scheme") else {
        return Ok(None);
    };
    let index = value
        .as_u64()
        .ok_or_else(|| DecodeError::UnexpectedType("Scheme".to_string()))?;
    u8::try_from(index)
        .ok()
        .and_then(|i| Scheme::new(i).ok())
        .map(Some)
        .ok_or(DecodeError::SchemeOutOfRange(index))
}

fn percent(payload: &Payload, key: &str) -> Result<Option<u8>, DecodeError> {
    payload
        .get(key)
        .map(|value| percent_value(key, value))
        .transpose()
}

fn percent_value(key: &str, value: &Value) -> Result<u8, DecodeError> {
    let raw = value
        .as_u64()
        .ok_or_else(|| DecodeError::UnexpectedType(key.to_string()))?;
    let out_of_range = || DecodeError::Value {
        key: key.to_string(),
        source: ValueError::OutOfRange {
            min: 0,
            max: scale::PERCENT_MAX,
            actual: u16::try_from(raw).unwrap_or(u16::MAX),
        },
    };
    let pct = u16::try_from(raw).map_err(|_| out_of_range())?;
    scale::from_device_percent(pct).map_err(|source| DecodeError::Value {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;
    use crate::discovery;

    fn payload(json: &str) -> Payload {
        parse_payload(json).unwrap()
    }

    #[test]
    fn parse_rejects_non_objects() {
        assert_eq!(parse_payload("[1,2]"), Err(DecodeError::NotAnObject));
        assert_eq!(parse_payload("\"ON\""), Err(DecodeError::NotAnObject));
        assert!(matches!(
            parse_payload("{not json"),
            Err(DecodeError::InvalidJson(_))
        ));
    }

    #[test]
    fn parse_power_plain_and_indexed() {
        let one = PowerIndex::one();
        let two = PowerIndex::new(2).unwrap();
        assert_eq!(power(&payload(r#"{"POWER":"ON"}"#), one), Ok(Some(PowerState::On)));
        assert_eq!(power(&payload(r#"{"POWER1":"off"}"#), one), Ok(Some(PowerState::Off)));
        assert_eq!(power(&payload(r#"{"POWER":"ON"}"#), two), Ok(None));
        assert_eq!(power(&payload(r#"{"POWER2":"ON"}"#), two), Ok(Some(PowerState::On)));
    }

    #[test]
    fn parse_power_indexed_wins() {
        let p = payload(r#"{"POWER":"OFF","POWER1":"ON"}"#);
        assert_eq!(power(&p, PowerIndex::one()), Ok(Some(PowerState::On)));
    }

    #[test]
    fn parse_power_invalid() {
        let err = power(&payload(r#"{"POWER":"TOGGLE"}"#), PowerIndex::one()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidPower {
                key: "POWER".to_string(),
                value: "\"TOGGLE\"".to_string()
            }
        );
        assert!(power(&payload(r#"{"POWER":1}"#), PowerIndex::one()).is_err());
    }

    #[test]
    fn parse_brightness_by_addressing() {
        let merged = DeviceConfig::from_json(r#"{"mac":"00000049A3BC","rl":[2],"lt_st":1}"#).unwrap();
        let light = discovery::discover(&merged).lights()[0].clone();
        assert_eq!(brightness(&payload(r#"{"Dimmer":50}"#), &light), Ok(Some(128)));
        assert_eq!(brightness(&payload(r#"{"Dimmer1":50}"#), &light), Ok(None));

        let split = DeviceConfig::from_json(
            r#"{"mac":"00000049A3BC","rl":[1,2,2,2],"lt_st":3,"so":{"68":1}}"#,
        )
        .unwrap();
        let entities = discovery::discover(&split);
        let third = &entities.lights()[2];
        assert_eq!(
            brightness(&payload(r#"{"Channel":[0,10,100]}"#), third),
            Ok(Some(255))
        );
        assert_eq!(brightness(&payload(r#"{"Channel":[0]}"#), third), Ok(None));
    }

    #[test]
    fn parse_brightness_out_of_range() {
        let config = DeviceConfig::from_json(r#"{"mac":"00000049A3BC","rl":[2],"lt_st":1}"#).unwrap();
        let light = discovery::discover(&config).lights()[0].clone();
        assert!(matches!(
            brightness(&payload(r#"{"Dimmer":150}"#), &light),
            Err(DecodeError::Value { .. })
        ));
        assert_eq!(
            brightness(&payload(r#"{"Dimmer":"50"}"#), &light),
            Err(DecodeError::UnexpectedType("Dimmer".to_string()))
        );
    }

    #[test]
    fn parse_color() {
        assert_eq!(
            color(&payload(r#"{"Color":"255,128,0"}"#)),
            Ok(Some(RgbColor::new(255, 128, 0)))
        );
        assert_eq!(
            color(&payload(r#"{"Color":"255,128,0,0,255"}"#)),
            Ok(Some(RgbColor::new(255, 128, 0)))
        );
        assert_eq!(
            color(&payload(r#"{"Color":"FF8000"}"#)),
            Err(DecodeError::MalformedColor("FF8000".to_string()))
        );
    }

    #[test]
    fn parse_color_temp_clamped() {
        let p = payload(r#"{"CT":153}"#);
        assert_eq!(color_temp(&p, CtRange::FULL).unwrap().map(|c| c.value()), Some(153));
        assert_eq!(color_temp(&p, CtRange::REDUCED).unwrap().map(|c| c.value()), Some(200));
    }

    #[test]
    fn parse_scheme() {
        assert_eq!(scheme(&payload(r#"{"Scheme":3}"#)), Ok(Some(Scheme::CYCLE_DOWN)));
        assert_eq!(
            scheme(&payload(r#"{"Scheme":7}"#)),
            Err(DecodeError::SchemeOutOfRange(7))
        );
    }

    #[test]
    fn parse_white() {
        assert_eq!(white(&payload(r#"{"White":50}"#)), Ok(Some(128)));
        assert_eq!(white(&payload("{}")), Ok(None));
    }
}
