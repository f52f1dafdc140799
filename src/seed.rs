// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Default presets and the strips the registry starts with.
//!
//! The seed is never loaded from disk: every process starts from
//! [`seed_strips`], even if an earlier run left a `data.json` behind.

use crate::types::{
    Animation, AudioAnimation, BounceWaveAnimation, GradientStop, Rgb, RgbColor, SolidAnimation,
    Strip, WaveAnimation,
};

/// Red to amber to blue.
#[must_use]
pub fn three_stop_gradient() -> Vec<GradientStop> {
    vec![
        GradientStop::new(0, "#FF0000"),
        GradientStop::new(56, "#EEBB00"),
        GradientStop::new(100, "#0000FF"),
    ]
}

/// A gradient that is red end to end.
#[must_use]
pub fn single_color_gradient() -> Vec<GradientStop> {
    vec![
        GradientStop::from_rgb(GradientStop::START, RgbColor::red_color()),
        GradientStop::from_rgb(GradientStop::END, RgbColor::red_color()),
    ]
}

fn audio_palette() -> Vec<Rgb> {
    vec![Rgb::new(255, 0, 0), Rgb::new(255, 255, 0)]
}

/// Default solid preset.
#[must_use]
pub fn solid() -> Animation {
    Animation::Solid(SolidAnimation::new(three_stop_gradient()))
}

/// Default wave preset.
#[must_use]
pub fn wave() -> Animation {
    Animation::Wave(WaveAnimation::new(4, true, 10, single_color_gradient()))
}

/// Default reversed wave preset.
#[must_use]
pub fn reverse_wave() -> Animation {
    Animation::ReverseWave(WaveAnimation::new(4, true, 1, three_stop_gradient()))
}

/// Default bounce wave preset.
#[must_use]
pub fn bounce_wave() -> Animation {
    Animation::BounceWave(BounceWaveAnimation::new(4, 1, single_color_gradient()))
}

/// Default bass-reactive preset.
#[must_use]
pub fn audio_bass() -> Animation {
    Animation::AudioBass(AudioAnimation::new(-20, 500, audio_palette()))
}

/// Default high-frequency-reactive preset.
#[must_use]
pub fn audio_high_frequency() -> Animation {
    Animation::AudioHighFrequency(AudioAnimation::new(-20, 500, audio_palette()))
}

/// Every default preset, in discriminant order.
#[must_use]
pub fn default_animations() -> Vec<Animation> {
    vec![
        solid(),
        wave(),
        reverse_wave(),
        bounce_wave(),
        audio_bass(),
        audio_high_frequency(),
    ]
}

/// The three strips the registry holds at startup.
///
/// # Examples
///
/// ```
/// let strips = ledstrip_store::seed::seed_strips();
/// let names: Vec<&str> = strips.iter().map(|s| s.name.as_str()).collect();
/// assert_eq!(names, ["Bal ajtó", "Jobb ajtó", "Hátsó üléssor"]);
/// ```
#[must_use]
pub fn seed_strips() -> Vec<Strip> {
    let strip = |id, name: &str, pin, led_count, power, animation| Strip {
        id,
        name: name.to_string(),
        pin,
        led_count,
        power,
        animation,
        animations: default_animations(),
        extra: serde_json::Map::new(),
    };

    vec![
        strip(0, "Bal ajtó", 3, 40, true, 0),
        strip(1, "Jobb ajtó", 4, 50, false, 1),
        strip(2, "Hátsó üléssor", 5, 60, true, 100),
    ]
}
