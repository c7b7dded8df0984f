// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Tasmota light control.
//!
//! Each type ensures its value is within the range Tasmota accepts at
//! construction time, so encoded commands never carry invalid arguments.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off state of a relay or light
//! - [`PowerIndex`] - 1-based relay number used in `Power<N>` commands
//! - [`Dimmer`] - Device brightness percentage (0-100)
//! - [`ColorTemp`] / [`CtRange`] - Color temperature in mireds and the range a light accepts
//! - [`RgbColor`] - 8-bit RGB triple
//! - [`Scheme`] - Built-in light effect (0-4)
//! - [`FadeSpeed`] - Transition speed (1-40)

mod color;
mod dimmer;
mod power;
mod rgb_color;
mod scheme;
mod speed;

pub use color::{ColorTemp, CtRange};
pub use dimmer::Dimmer;
pub use power::{PowerIndex, PowerState};
pub use rgb_color::RgbColor;
pub use scheme::{EFFECT_LIST, Scheme};
pub use speed::FadeSpeed;
