// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strip configuration types.
//!
//! The record types ([`Strip`], [`Animation`], [`GradientStop`], [`Rgb`])
//! mirror the JSON the front-end exchanges with the server. Decoding keeps
//! keys it does not know, and an animation whose fields do not fit its kind
//! is kept as a [`RawAnimation`]. [`RgbColor`] is checked at construction and
//! is what the strict validation policy converts into.
//!
//! # Types
//!
//! - [`Strip`] - One LED-strip controller entry
//! - [`Animation`] - Preset keyed by [`AnimationKind`]
//! - [`GradientStop`] - `#RRGGBB` color at a 0-100 position
//! - [`Rgb`] - Raw color triple for audio-reactive presets
//! - [`RgbColor`] - Validated color

mod animation;
mod gradient;
mod rgb_color;
mod strip;

pub use animation::{
    Animation, AnimationCategory, AnimationKind, AudioAnimation, BounceWaveAnimation,
    RawAnimation, SolidAnimation, WaveAnimation,
};
pub use gradient::{GradientStop, Rgb};
pub use rgb_color::RgbColor;
pub use strip::{Strip, decode_strips};
