// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity descriptors produced by discovery.

use std::ops::RangeInclusive;

use crate::capabilities::{Capabilities, LightFeatures, LightKind};
use crate::command::PowerCommand;
use crate::types::{CtRange, PowerIndex, PowerState};

/// How brightness of a light is addressed on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Addressing {
    /// Whole light engine: `Dimmer`.
    Merged,
    /// One half of an unlinked RGB/white light: `Dimmer<index>`.
    Unlinked {
        /// 1 for the RGB part, 2 for the white part.
        index: u8,
    },
    /// Single PWM channel: `Channel<relay>`.
    Channel,
    /// Relay exposed as a light; power only.
    Relay,
}

/// Immutable description of one logical light.
///
/// # Examples
///
/// ```
/// use tasmor_light::config::DeviceConfig;
/// use tasmor_light::discovery::{self, Addressing};
///
/// let config = DeviceConfig::from_json(
///     r#"{"mac":"00000049A3BC","rl":[2],"lt_st":3}"#,
/// ).unwrap();
/// let entities = discovery::discover(&config);
/// let light = &entities.lights()[0];
///
/// assert_eq!(light.relay().value(), 1);
/// assert_eq!(light.addressing(), Addressing::Merged);
/// assert_eq!(light.channels(), Some(&(1..=3)));
/// assert!(!light.is_split());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightDescriptor {
    index: usize,
    relay: PowerIndex,
    capabilities: Capabilities,
    addressing: Addressing,
    channels: Option<RangeInclusive<u8>>,
}

impl LightDescriptor {
    pub(crate) const fn new(
        index: usize,
        relay: PowerIndex,
        capabilities: Capabilities,
        addressing: Addressing,
        channels: Option<RangeInclusive<u8>>,
    ) -> Self {
        Self {
            index,
            relay,
            capabilities,
            addressing,
            channels,
        }
    }

    /// Position in the device's light list.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Relay number used for `Power<N>` (and `Channel<N>` when split per channel).
    #[must_use]
    pub const fn relay(&self) -> PowerIndex {
        self.relay
    }

    /// Resolved capabilities.
    #[must_use]
    pub const fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[must_use]
    pub const fn kind(&self) -> LightKind {
        self.capabilities.kind()
    }

    #[must_use]
    pub const fn features(&self) -> LightFeatures {
        self.capabilities.features()
    }

    /// Returns `true` if every feature in `features` is supported.
    #[must_use]
    pub const fn supports(&self, features: LightFeatures) -> bool {
        self.capabilities.supports(features)
    }

    #[must_use]
    pub const fn ct_range(&self) -> Option<CtRange> {
        self.capabilities.ct_range()
    }

    #[must_use]
    pub fn effect_list(&self) -> &'static [&'static str] {
        self.capabilities.effect_list()
    }

    #[must_use]
    pub const fn addressing(&self) -> Addressing {
        self.addressing
    }

    /// Physical PWM channels owned by this light, if it drives any.
    #[must_use]
    pub const fn channels(&self) -> Option<&RangeInclusive<u8>> {
        self.channels.as_ref()
    }

    /// Returns `true` if this light owns only part of the device's channels.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        matches!(
            self.addressing,
            Addressing::Unlinked { .. } | Addressing::Channel
        )
    }
}

/// Immutable description of one switch (plain relay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwitchDescriptor {
    index: usize,
    relay: PowerIndex,
}

impl SwitchDescriptor {
    pub(crate) const fn new(index: usize, relay: PowerIndex) -> Self {
        Self { index, relay }
    }

    /// Position in the device's switch list.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn relay(&self) -> PowerIndex {
        self.relay
    }

    /// Builds the `Power<N>` command that sets this switch.
    #[must_use]
    pub const fn power_command(&self, state: PowerState) -> PowerCommand {
        PowerCommand::Set {
            index: self.relay,
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    #[test]
    fn split_addressing() {
        let caps = Capabilities::resolve(LightKind::Dimmer, false);
        let relay = PowerIndex::new(3).unwrap();
        let channel = LightDescriptor::new(0, relay, caps, Addressing::Channel, Some(1..=1));
        let unlinked =
            LightDescriptor::new(0, relay, caps, Addressing::Unlinked { index: 2 }, Some(4..=4));
        let merged = LightDescriptor::new(0, relay, caps, Addressing::Merged, Some(1..=1));
        let relay_light =
            LightDescriptor::new(0, relay, Capabilities::relay_light(), Addressing::Relay, None);

        assert!(channel.is_split());
        assert!(unlinked.is_split());
        assert!(!merged.is_split());
        assert!(!relay_light.is_split());
        assert_eq!(relay_light.channels(), None);
    }

    #[test]
    fn switch_power_command() {
        let switch = SwitchDescriptor::new(1, PowerIndex::new(2).unwrap());
        let cmd = switch.power_command(PowerState::On);
        assert_eq!(cmd.name(), "Power2");
        assert_eq!(cmd.payload(), Some("ON".to_string()));
    }
}
