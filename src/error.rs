// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `tasmor_light` library.
//!
//! Errors are split by the stage that produces them: value validation,
//! discovery configuration, state decoding, command encoding and publishing.
//! Each stage has its own enum so callers can decide how far a failure
//! should travel; [`Error`] wraps all of them.

use thiserror::Error;

use crate::capabilities::Attribute;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The discovery payload could not be turned into entities.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A state payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A light request could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Error occurred while publishing a message.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// No device with this MAC address has been discovered.
    #[error("device {0} not found")]
    DeviceNotFound(String),

    /// The device has no entity at this index.
    #[error("entity {index} not found on device {mac}")]
    EntityNotFound {
        /// MAC address of the device.
        mac: String,
        /// Requested entity index.
        index: usize,
    },
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

/// Errors raised while ingesting a discovery (`config`) payload.
///
/// A device whose configuration fails is treated as having no lights.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The payload is not valid JSON or a field has the wrong type.
    #[error("invalid config payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is missing.
    #[error("missing field in config: {0}")]
    MissingField(&'static str),

    /// The MAC address is not 12 hex digits.
    #[error("invalid MAC address: {0}")]
    InvalidMac(String),

    /// A relay entry has an unknown type tag.
    #[error("unknown relay type {kind} at relay index {index}")]
    UnknownRelayType {
        /// Zero-based relay index.
        index: usize,
        /// The unknown type tag.
        kind: u8,
    },

    /// `lt_st` is outside the known subtypes.
    #[error("unknown light subtype {0}")]
    UnknownLightSubtype(u8),

    /// A light relay is announced but no light subtype is set.
    #[error("light relay present but light subtype is missing")]
    MissingLightSubtype,

    /// More relays are announced than Tasmota can address.
    #[error("{0} relays announced, at most 32 are supported")]
    TooManyRelays(usize),

    /// The number of light relays does not fit the channel layout.
    #[error("{relays} light relays do not fit a {channels}-channel light ({layout})")]
    ChannelMismatch {
        /// Number of light relays announced.
        relays: usize,
        /// Number of PWM channels of the light subtype.
        channels: u8,
        /// Layout that was being built.
        layout: &'static str,
    },
}

/// Errors raised for a single key of a state payload.
///
/// The offending key is skipped; the remaining keys still apply.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// The payload is not a JSON object.
    #[error("state payload is not a JSON object")]
    NotAnObject,

    /// The payload is not valid JSON.
    #[error("invalid state payload: {0}")]
    InvalidJson(String),

    /// A power key carries something other than `ON`/`OFF`.
    #[error("invalid power value for {key}: {value}")]
    InvalidPower {
        /// The power key (`POWER`, `POWER2`, ...).
        key: String,
        /// The rejected value.
        value: String,
    },

    /// `Scheme` index is outside the effect table.
    #[error("scheme index {0} is out of range")]
    SchemeOutOfRange(u64),

    /// `Color` is not a comma separated RGB triple.
    #[error("malformed color: {0}")]
    MalformedColor(String),

    /// A numeric field is missing its number or out of range.
    #[error("invalid value for {key}: {source}")]
    Value {
        /// The payload key.
        key: String,
        /// What was wrong with it.
        source: ValueError,
    },

    /// A field has the wrong JSON type.
    #[error("unexpected type for {0}")]
    UnexpectedType(String),
}

/// Errors raised while encoding a light request.
///
/// Encoding fails fast: no partial command is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EncodeError {
    /// The light does not support the requested attribute.
    #[error("light does not support {0}")]
    Unsupported(Attribute),

    /// A turn-off request carried attributes other than a transition.
    #[error("turn off cannot carry {0}")]
    AttributesWhileOff(Attribute),

    /// The effect name is not in the effect list.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// The transition duration is negative or not a number.
    #[error("invalid transition: {0}")]
    InvalidTransition(f64),

    /// An attribute value failed validation.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// The batch exceeds the Backlog limit.
    #[error("batch exceeds maximum of {max} commands (got {actual})")]
    TooManyCommands {
        /// Maximum allowed commands.
        max: usize,
        /// Number of commands in the batch.
        actual: usize,
    },
}

/// Errors related to the messaging collaborator.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// MQTT client rejected the publish.
    #[cfg(feature = "mqtt")]
    #[error("MQTT error: {0}")]
    Mqtt(#[from] rumqttc::ClientError),

    /// Invalid broker address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The publisher's channel is closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
