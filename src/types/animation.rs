// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Animation presets, keyed by an integer discriminant.
//!
//! On the wire every animation is a flat JSON object whose `id` selects the
//! remaining fields:
//!
//! | id  | kind                 | fields                                        |
//! |-----|----------------------|-----------------------------------------------|
//! | 0   | Solid                | `colors` (gradient)                           |
//! | 1   | Wave                 | `length`, `distance`, `speed`, `colors`       |
//! | 2   | Reversed Wave        | `length`, `distance`, `speed`, `colors`       |
//! | 3   | Bounce Wave          | `length`, `speed`, `colors`                   |
//! | 100 | Basic Bass           | `decibelThreshold`, `fadeOut`, `colors` (RGB) |
//! | 101 | High Frequency       | `decibelThreshold`, `fadeOut`, `colors` (RGB) |
//!
//! Objects with any other `id`, or whose fields do not fit the kind their
//! `id` names, decode to [`Animation::Raw`] and are written back unchanged.
//! Keys a kind does not define are kept in its `extra` map.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{GradientStop, Rgb};

/// The known animation kinds.
///
/// # Examples
///
/// ```
/// use ledstrip_store::types::AnimationKind;
///
/// let kind = AnimationKind::from_id(100).unwrap();
/// assert_eq!(kind, AnimationKind::AudioBass);
/// assert_eq!(kind.name(), "Basic Bass");
/// assert!(kind.is_audio_reactive());
///
/// assert!(AnimationKind::from_id(42).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnimationKind {
    /// Static gradient.
    Solid,
    /// Gradient wave travelling along the strip.
    Wave,
    /// Wave travelling in the opposite direction.
    ReverseWave,
    /// Wave that bounces between the strip ends.
    BounceWave,
    /// Flashes on bass energy above a threshold.
    AudioBass,
    /// Flashes on high-frequency energy above a threshold.
    AudioHighFrequency,
}

/// Grouping used by the front-end when listing animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCategory {
    /// Runs without any input.
    Idle,
    /// Driven by the audio signal.
    Audio,
}

impl AnimationKind {
    /// All known kinds, in discriminant order.
    pub const ALL: [Self; 6] = [
        Self::Solid,
        Self::Wave,
        Self::ReverseWave,
        Self::BounceWave,
        Self::AudioBass,
        Self::AudioHighFrequency,
    ];

    /// Discriminants from this value upwards are audio-reactive.
    pub const FIRST_AUDIO_ID: i64 = 100;

    /// Looks up the kind for a discriminant.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(Self::Solid),
            1 => Some(Self::Wave),
            2 => Some(Self::ReverseWave),
            3 => Some(Self::BounceWave),
            100 => Some(Self::AudioBass),
            101 => Some(Self::AudioHighFrequency),
            _ => None,
        }
    }

    /// Returns the wire discriminant.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Solid => 0,
            Self::Wave => 1,
            Self::ReverseWave => 2,
            Self::BounceWave => 3,
            Self::AudioBass => 100,
            Self::AudioHighFrequency => 101,
        }
    }

    /// Returns the display name shown in the front-end.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Solid => "Solid",
            Self::Wave => "Wave",
            Self::ReverseWave => "Reversed Wave",
            Self::BounceWave => "Bounce Wave",
            Self::AudioBass => "Basic Bass",
            Self::AudioHighFrequency => "High Frequency",
        }
    }

    /// Returns the category of this kind.
    #[must_use]
    pub const fn category(&self) -> AnimationCategory {
        if self.id() >= Self::FIRST_AUDIO_ID {
            AnimationCategory::Audio
        } else {
            AnimationCategory::Idle
        }
    }

    /// Returns whether the animation reacts to audio.
    #[must_use]
    pub const fn is_audio_reactive(&self) -> bool {
        matches!(self.category(), AnimationCategory::Audio)
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fields of a solid animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidAnimation {
    /// Gradient spread over the whole strip.
    pub colors: Vec<GradientStop>,
    /// Keys the server does not interpret, written back as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SolidAnimation {
    /// Creates a solid animation with no extra keys.
    #[must_use]
    pub fn new(colors: Vec<GradientStop>) -> Self {
        Self {
            colors,
            extra: Map::new(),
        }
    }
}

/// Fields shared by the wave and reversed wave animations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveAnimation {
    /// Wave length in LEDs.
    pub length: i32,
    /// Whether the gradient is laid out by distance along the strip.
    pub distance: bool,
    /// Travel speed.
    pub speed: i32,
    /// Gradient carried by the wave.
    pub colors: Vec<GradientStop>,
    /// Keys the server does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WaveAnimation {
    /// Creates a wave animation with no extra keys.
    #[must_use]
    pub fn new(length: i32, distance: bool, speed: i32, colors: Vec<GradientStop>) -> Self {
        Self {
            length,
            distance,
            speed,
            colors,
            extra: Map::new(),
        }
    }
}

/// Fields of a bounce wave animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BounceWaveAnimation {
    /// Wave length in LEDs.
    pub length: i32,
    /// Travel speed.
    pub speed: i32,
    /// Gradient carried by the wave.
    pub colors: Vec<GradientStop>,
    /// Keys the server does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BounceWaveAnimation {
    /// Creates a bounce wave animation with no extra keys.
    #[must_use]
    pub fn new(length: i32, speed: i32, colors: Vec<GradientStop>) -> Self {
        Self {
            length,
            speed,
            colors,
            extra: Map::new(),
        }
    }
}

/// Fields shared by the audio-reactive animations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioAnimation {
    /// Trigger level in dB (negative).
    pub decibel_threshold: i32,
    /// Fade-out time in milliseconds.
    pub fade_out: i32,
    /// Colors cycled through on each trigger.
    pub colors: Vec<Rgb>,
    /// Keys the server does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AudioAnimation {
    /// Creates an audio-reactive animation with no extra keys.
    #[must_use]
    pub fn new(decibel_threshold: i32, fade_out: i32, colors: Vec<Rgb>) -> Self {
        Self {
            decibel_threshold,
            fade_out,
            colors,
            extra: Map::new(),
        }
    }
}

/// An animation kept exactly as it was sent.
///
/// Holds records whose `id` is not a known kind, and records whose `id` is
/// known but whose fields do not fit that kind (the front-end's own
/// defaults send bare `[r, g, b]` arrays, for instance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAnimation {
    /// The discriminant as sent.
    pub id: i64,
    /// Every field except `id`.
    pub fields: Map<String, Value>,
}

impl RawAnimation {
    /// Returns the known kind this record's id names, if any.
    #[must_use]
    pub const fn claimed_kind(&self) -> Option<AnimationKind> {
        AnimationKind::from_id(self.id)
    }

    /// Explains why a record with a known id does not fit its kind.
    ///
    /// Returns `None` for unknown ids, and for records that do fit (which
    /// only happens when one is built by hand).
    #[must_use]
    pub fn shape_error(&self) -> Option<serde_json::Error> {
        let kind = self.claimed_kind()?;
        decode_typed(kind, &Value::Object(self.fields.clone())).err()
    }
}

/// One lighting-effect preset assignable to a strip.
///
/// Decoding never fails on the fields next to `id`: a record that does not
/// fit a known kind becomes [`Animation::Raw`] and is written back unchanged.
///
/// # Examples
///
/// ```
/// use ledstrip_store::types::{Animation, AnimationKind};
///
/// let json = r##"{"id": 0, "colors": [{"position": 0, "color": "#FF0000"}]}"##;
/// let animation: Animation = serde_json::from_str(json).unwrap();
/// assert_eq!(animation.kind(), Some(AnimationKind::Solid));
/// assert_eq!(animation.gradient().unwrap().len(), 1);
///
/// let raw: Animation = serde_json::from_str(r#"{"id": 0, "colors": [255, 255, 255]}"#).unwrap();
/// assert_eq!(raw.kind(), None);
/// assert_eq!(raw.id(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Animation {
    /// id 0.
    Solid(SolidAnimation),
    /// id 1.
    Wave(WaveAnimation),
    /// id 2.
    ReverseWave(WaveAnimation),
    /// id 3.
    BounceWave(BounceWaveAnimation),
    /// id 100.
    AudioBass(AudioAnimation),
    /// id 101.
    AudioHighFrequency(AudioAnimation),
    /// Any other id, or a known id with fields of another shape.
    Raw(RawAnimation),
}

impl Animation {
    /// Returns the discriminant written to the wire.
    #[must_use]
    pub fn id(&self) -> i64 {
        match self {
            Self::Raw(raw) => raw.id,
            typed => typed.kind().map_or(0, |kind| kind.id()),
        }
    }

    /// Returns the kind of a typed animation, or `None` for raw records.
    #[must_use]
    pub const fn kind(&self) -> Option<AnimationKind> {
        match self {
            Self::Solid(_) => Some(AnimationKind::Solid),
            Self::Wave(_) => Some(AnimationKind::Wave),
            Self::ReverseWave(_) => Some(AnimationKind::ReverseWave),
            Self::BounceWave(_) => Some(AnimationKind::BounceWave),
            Self::AudioBass(_) => Some(AnimationKind::AudioBass),
            Self::AudioHighFrequency(_) => Some(AnimationKind::AudioHighFrequency),
            Self::Raw(_) => None,
        }
    }

    /// Returns the gradient of the idle animations.
    #[must_use]
    pub fn gradient(&self) -> Option<&[GradientStop]> {
        match self {
            Self::Solid(solid) => Some(&solid.colors),
            Self::Wave(wave) | Self::ReverseWave(wave) => Some(&wave.colors),
            Self::BounceWave(bounce) => Some(&bounce.colors),
            _ => None,
        }
    }

    /// Returns the color list of the audio-reactive animations.
    #[must_use]
    pub fn palette(&self) -> Option<&[Rgb]> {
        match self {
            Self::AudioBass(audio) | Self::AudioHighFrequency(audio) => Some(&audio.colors),
            _ => None,
        }
    }
}

fn decode_typed(kind: AnimationKind, body: &Value) -> serde_json::Result<Animation> {
    match kind {
        AnimationKind::Solid => SolidAnimation::deserialize(body).map(Animation::Solid),
        AnimationKind::Wave => WaveAnimation::deserialize(body).map(Animation::Wave),
        AnimationKind::ReverseWave => WaveAnimation::deserialize(body).map(Animation::ReverseWave),
        AnimationKind::BounceWave => {
            BounceWaveAnimation::deserialize(body).map(Animation::BounceWave)
        }
        AnimationKind::AudioBass => AudioAnimation::deserialize(body).map(Animation::AudioBass),
        AnimationKind::AudioHighFrequency => {
            AudioAnimation::deserialize(body).map(Animation::AudioHighFrequency)
        }
    }
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    id: i64,
    #[serde(flatten)]
    body: &'a T,
}

impl Serialize for Animation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let id = self.id();
        match self {
            Self::Solid(body) => Tagged { id, body }.serialize(serializer),
            Self::Wave(body) | Self::ReverseWave(body) => Tagged { id, body }.serialize(serializer),
            Self::BounceWave(body) => Tagged { id, body }.serialize(serializer),
            Self::AudioBass(body) | Self::AudioHighFrequency(body) => {
                Tagged { id, body }.serialize(serializer)
            }
            Self::Raw(raw) => {
                let fields = raw.fields.iter().filter(|(key, _)| *key != "id");
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("id", &raw.id)?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Animation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        let id = match fields.remove("id") {
            Some(value) => value.as_i64().ok_or_else(|| {
                de::Error::custom(format!("animation id must be an integer, found {value}"))
            })?,
            None => return Err(de::Error::missing_field("id")),
        };

        let Some(kind) = AnimationKind::from_id(id) else {
            return Ok(Self::Raw(RawAnimation { id, fields }));
        };

        let body = Value::Object(fields);
        match decode_typed(kind, &body) {
            Ok(animation) => Ok(animation),
            Err(err) => {
                tracing::debug!(id, kind = %kind, error = %err, "Keeping animation as sent");
                let Value::Object(fields) = body else {
                    return Err(de::Error::custom("animation must be an object"));
                };
                Ok(Self::Raw(RawAnimation { id, fields }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn kind_ids_roundtrip() {
        for kind in AnimationKind::ALL {
            assert_eq!(AnimationKind::from_id(kind.id()), Some(kind));
        }
    }

    #[test]
    fn kind_categories() {
        assert_eq!(AnimationKind::Wave.category(), AnimationCategory::Idle);
        assert_eq!(
            AnimationKind::AudioHighFrequency.category(),
            AnimationCategory::Audio
        );
        assert!(!AnimationKind::BounceWave.is_audio_reactive());
    }

    #[test]
    fn decode_wave_variants_share_fields() {
        let wave = json!({"id": 1, "length": 4, "distance": true, "speed": 10, "colors": []});
        let reverse = json!({"id": 2, "length": 4, "distance": true, "speed": 10, "colors": []});

        let wave: Animation = serde_json::from_value(wave).unwrap();
        let reverse: Animation = serde_json::from_value(reverse).unwrap();

        assert!(matches!(wave, Animation::Wave(ref w) if w.speed == 10));
        assert!(matches!(reverse, Animation::ReverseWave(ref w) if w.distance));
    }

    #[test]
    fn decode_audio_uses_camel_case() {
        let value = json!({
            "id": 101,
            "decibelThreshold": -20,
            "fadeOut": 500,
            "colors": [{"r": 255, "g": 0, "b": 0}]
        });
        let animation: Animation = serde_json::from_value(value).unwrap();

        let Animation::AudioHighFrequency(audio) = &animation else {
            panic!("expected high frequency animation, got {animation:?}");
        };
        assert_eq!(audio.decibel_threshold, -20);
        assert_eq!(audio.fade_out, 500);
        assert_eq!(animation.palette().unwrap(), &[Rgb::new(255, 0, 0)]);
    }

    #[test]
    fn encode_puts_id_first() {
        let animation = Animation::BounceWave(BounceWaveAnimation::new(
            4,
            1,
            vec![GradientStop::new(0, "#FF0000")],
        ));
        assert_eq!(
            serde_json::to_string(&animation).unwrap(),
            r##"{"id":3,"length":4,"speed":1,"colors":[{"position":0,"color":"#FF0000"}]}"##
        );
    }

    #[test]
    fn unknown_kind_is_preserved() {
        let value = json!({"id": 7, "sparkle": 3, "colors": ["#FFFFFF"]});
        let animation: Animation = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(animation.id(), 7);
        assert_eq!(animation.kind(), None);
        assert_eq!(serde_json::to_value(&animation).unwrap(), value);
    }

    #[test]
    fn missing_id_is_rejected() {
        let err = serde_json::from_value::<Animation>(json!({"colors": []})).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[test]
    fn non_integer_id_is_rejected() {
        let err = serde_json::from_value::<Animation>(json!({"id": "solid"})).unwrap_err();
        assert!(err.to_string().contains("must be an integer"));
    }

    #[test]
    fn known_kind_with_wrong_shape_is_kept_raw() {
        let value = json!({"id": 0, "colors": [255, 255, 255]});
        let animation: Animation = serde_json::from_value(value.clone()).unwrap();

        let Animation::Raw(raw) = &animation else {
            panic!("expected raw animation, got {animation:?}");
        };
        assert_eq!(raw.claimed_kind(), Some(AnimationKind::Solid));
        assert!(raw.shape_error().is_some());
        assert_eq!(serde_json::to_value(&animation).unwrap(), value);
    }

    #[test]
    fn front_end_high_frequency_default_is_kept_raw() {
        let value = json!({
            "id": 101,
            "decibelThreshold": -20,
            "maxFrequency": 8000,
            "colors": [255, 0, 0]
        });
        let animation: Animation = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(animation.id(), 101);
        assert_eq!(animation.kind(), None);
        assert_eq!(serde_json::to_value(&animation).unwrap(), value);
    }

    #[test]
    fn extra_keys_survive_typed_decode() {
        let value = json!({
            "id": 1,
            "length": 4,
            "distance": true,
            "speed": 10,
            "colors": [],
            "brightness": 80
        });
        let animation: Animation = serde_json::from_value(value.clone()).unwrap();

        let Animation::Wave(wave) = &animation else {
            panic!("expected wave animation, got {animation:?}");
        };
        assert_eq!(wave.extra.get("brightness"), Some(&json!(80)));
        assert_eq!(serde_json::to_value(&animation).unwrap(), value);
    }

    #[test]
    fn unknown_id_has_no_shape_error() {
        let raw = RawAnimation {
            id: 42,
            fields: Map::new(),
        };
        assert!(raw.claimed_kind().is_none());
        assert!(raw.shape_error().is_none());
    }

    #[test]
    fn bounce_wave_has_no_distance() {
        let animation = Animation::BounceWave(BounceWaveAnimation::new(1, 1, Vec::new()));
        let value = serde_json::to_value(&animation).unwrap();
        assert!(value.get("distance").is_none());
    }
}
