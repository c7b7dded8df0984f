// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light state tracking.
//!
//! [`LightState`] holds the last known attributes of one light entity, and
//! [`StateChange`] is a single attribute update decoded from telemetry.
//! State starts out unknown and is only ever updated from device reports.
//!
//! # Examples
//!
//! ```
//! use tasmor_light::state::{LightState, StateChange};
//! use tasmor_light::types::PowerState;
//!
//! let mut state = LightState::new();
//! assert!(state.apply(&StateChange::Power(PowerState::On)));
//! assert!(state.apply(&StateChange::Brightness(128)));
//!
//! assert!(state.is_on());
//! assert_eq!(state.brightness(), Some(128));
//! assert_eq!(state.dimmer().map(|d| d.value()), Some(50));
//! ```

mod light_state;
mod state_change;

pub use light_state::LightState;
pub use state_change::StateChange;
