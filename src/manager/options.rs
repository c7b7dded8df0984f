// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Options for the light manager.

/// Default topic prefix of Tasmota discovery announcements.
pub const DEFAULT_DISCOVERY_PREFIX: &str = "tasmota/discovery";

/// Configuration for a [`LightManager`](super::LightManager).
///
/// # Examples
///
/// ```
/// use tasmor_light::manager::ManagerOptions;
///
/// let options = ManagerOptions::default();
/// assert_eq!(options.discovery_prefix(), "tasmota/discovery");
///
/// let options = ManagerOptions::default().with_discovery_prefix("lab/discovery/");
/// assert_eq!(options.discovery_prefix(), "lab/discovery");
/// assert_eq!(options.discovery_filter(), "lab/discovery/+/config");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerOptions {
    discovery_prefix: String,
}

impl ManagerOptions {
    /// Sets the topic prefix discovery announcements are published under.
    ///
    /// A trailing `/` is ignored.
    #[must_use]
    pub fn with_discovery_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.discovery_prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn discovery_prefix(&self) -> &str {
        &self.discovery_prefix
    }

    /// Subscription filter matching every discovery announcement.
    #[must_use]
    pub fn discovery_filter(&self) -> String {
        format!("{}/+/config", self.discovery_prefix)
    }

    /// Extracts the MAC segment of a discovery topic.
    pub(crate) fn discovery_mac<'a>(&self, topic: &'a str) -> Option<&'a str> {
        let mac = topic
            .strip_prefix(self.discovery_prefix.as_str())?
            .strip_prefix('/')?
            .strip_suffix("/config")?;
        (!mac.is_empty() && !mac.contains('/')).then_some(mac)
    }
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            discovery_prefix: DEFAULT_DISCOVERY_PREFIX.to_string(),
        }
    }
}
