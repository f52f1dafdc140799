// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The strip record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DecodeError;

use super::{Animation, AnimationKind};

/// One configured LED-strip controller.
///
/// Nothing here is checked on decode: ids may repeat, `animation` may point
/// at an animation the strip does not list, and `led_count` may be zero.
/// See [`StrictPolicy`](crate::validation::StrictPolicy) for the checks that
/// can be enabled.
///
/// # Examples
///
/// ```
/// use ledstrip_store::types::Strip;
///
/// let strip = Strip::with_defaults(4);
/// assert_eq!(strip.name, "New LedStrip (4)");
/// assert_eq!(strip.animations.len(), 6);
/// assert!(strip.active_animation().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strip {
    /// Caller-assigned identifier.
    pub id: i64,
    /// Human-readable label.
    pub name: String,
    /// Data pin the strip is wired to.
    pub pin: i32,
    /// Number of LEDs on the strip.
    pub led_count: i32,
    /// Whether the strip is switched on.
    pub power: bool,
    /// Id of the active entry in `animations`.
    pub animation: i64,
    /// Animations available on this strip.
    pub animations: Vec<Animation>,
    /// Keys the server does not interpret, written back as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Strip {
    /// Creates an empty placeholder strip named `New LedStrip (<id>)`:
    /// powered off, unwired, carrying the seeded presets from
    /// [`default_animations`](crate::seed::default_animations) with the solid
    /// one selected.
    #[must_use]
    pub fn with_defaults(id: i64) -> Self {
        Self {
            id,
            name: format!("New LedStrip ({id})"),
            pin: 0,
            led_count: 0,
            power: false,
            animation: AnimationKind::Solid.id(),
            animations: crate::seed::default_animations(),
            extra: Map::new(),
        }
    }

    /// Returns the animation selected by `animation`, if the strip lists it.
    #[must_use]
    pub fn active_animation(&self) -> Option<&Animation> {
        self.animations.iter().find(|a| a.id() == self.animation)
    }
}

/// Decodes a JSON array of strips.
///
/// # Errors
///
/// Returns [`DecodeError::Syntax`] for malformed JSON and
/// [`DecodeError::Data`] when the JSON is not a list of strips.
///
/// # Examples
///
/// ```
/// use ledstrip_store::types::decode_strips;
///
/// assert!(decode_strips(b"[]").unwrap().is_empty());
/// assert!(decode_strips(b"[{").is_err());
/// ```
pub fn decode_strips(body: &[u8]) -> Result<Vec<Strip>, DecodeError> {
    serde_json::from_slice(body).map_err(DecodeError::from)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> serde_json::Value {
        json!({
            "id": 0,
            "name": "Bal ajtó",
            "pin": 3,
            "ledCount": 40,
            "power": true,
            "animation": 0,
            "animations": [{"id": 0, "colors": [{"position": 0, "color": "#FF0000"}]}]
        })
    }

    #[test]
    fn decode_uses_camel_case_keys() {
        let strip: Strip = serde_json::from_value(sample()).unwrap();
        assert_eq!(strip.led_count, 40);
        assert_eq!(strip.name, "Bal ajtó");
        assert_eq!(
            strip.active_animation().and_then(Animation::kind),
            Some(AnimationKind::Solid)
        );
    }

    #[test]
    fn encode_keeps_field_order() {
        let strip: Strip = serde_json::from_value(sample()).unwrap();
        let encoded = serde_json::to_string(&strip).unwrap();
        let keys = [
            "\"id\"",
            "\"name\"",
            "\"pin\"",
            "\"ledCount\"",
            "\"power\"",
            "\"animation\"",
            "\"animations\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| encoded.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{encoded}");
    }

    #[test]
    fn dangling_animation_is_not_an_error() {
        let mut value = sample();
        value["animation"] = json!(55);
        let strip: Strip = serde_json::from_value(value).unwrap();
        assert!(strip.active_animation().is_none());
    }

    #[test]
    fn decode_strips_classifies_failures() {
        assert!(matches!(decode_strips(b"[1,"), Err(DecodeError::Syntax(_))));
        assert!(matches!(
            decode_strips(br#"[{"id": 1}]"#),
            Err(DecodeError::Data(_))
        ));
        assert!(matches!(decode_strips(b"{}"), Err(DecodeError::Data(_))));
    }

    #[test]
    fn extra_keys_are_written_back() {
        let mut value = sample();
        value["color"] = json!("#fff");
        let strip: Strip = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(strip.extra.get("color"), Some(&json!("#fff")));
        assert_eq!(serde_json::to_value(&strip).unwrap(), value);
    }

    #[test]
    fn with_defaults_selects_solid() {
        let strip = Strip::with_defaults(9);
        assert_eq!(strip.animation, 0);
        assert!(!strip.power);
        assert_eq!(strip.led_count, 0);
    }
}
