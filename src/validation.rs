// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Checks applied to a replacement before it reaches the registry.
//!
//! The server trusts its client by default and uses [`AcceptAll`]. Switching
//! to [`StrictPolicy`] turns the conventions documented on the types into
//! hard requirements.

use std::collections::HashSet;

use crate::error::{ValidationError, ValueError};
use crate::types::{Animation, Strip};

/// Decides whether a replacement strip list is accepted.
pub trait ValidationPolicy: Send + Sync + 'static {
    /// Checks the complete replacement.
    ///
    /// # Errors
    ///
    /// Returns the first rule the list breaks.
    fn validate(&self, strips: &[Strip]) -> Result<(), ValidationError>;
}

/// Accepts every well-formed list, however inconsistent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ValidationPolicy for AcceptAll {
    fn validate(&self, _strips: &[Strip]) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Enforces id uniqueness, referential integrity and value ranges.
///
/// # Examples
///
/// ```
/// use ledstrip_store::types::Strip;
/// use ledstrip_store::validation::{StrictPolicy, ValidationPolicy};
///
/// let mut strip = Strip::with_defaults(0);
/// strip.led_count = 30;
/// assert!(StrictPolicy.validate(&[strip.clone()]).is_ok());
///
/// // Same id twice.
/// assert!(StrictPolicy.validate(&[strip.clone(), strip]).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictPolicy;

impl ValidationPolicy for StrictPolicy {
    fn validate(&self, strips: &[Strip]) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(strips.len());
        for strip in strips {
            if !seen.insert(strip.id) {
                return Err(ValidationError::DuplicateStripId(strip.id));
            }
            check_strip(strip)?;
        }
        Ok(())
    }
}

fn check_strip(strip: &Strip) -> Result<(), ValidationError> {
    if strip.led_count <= 0 {
        return Err(ValidationError::InvalidLedCount {
            strip: strip.id,
            count: strip.led_count,
        });
    }

    let mut seen = HashSet::with_capacity(strip.animations.len());
    for animation in &strip.animations {
        let id = animation.id();
        if let Animation::Raw(raw) = animation {
            return Err(match raw.shape_error() {
                Some(err) => ValidationError::MalformedAnimation {
                    strip: strip.id,
                    animation: id,
                    reason: err.to_string(),
                },
                None => ValidationError::UnknownAnimation {
                    strip: strip.id,
                    animation: id,
                },
            });
        }
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateAnimationId {
                strip: strip.id,
                animation: id,
            });
        }
        check_colors(strip.id, animation)?;
    }

    if !seen.contains(&strip.animation) {
        return Err(ValidationError::DanglingAnimation {
            strip: strip.id,
            animation: strip.animation,
        });
    }

    Ok(())
}

fn check_colors(strip: i64, animation: &Animation) -> Result<(), ValidationError> {
    let invalid = |source: ValueError| ValidationError::InvalidValue {
        strip,
        animation: animation.id(),
        source,
    };

    if let Some(stops) = animation.gradient() {
        for stop in stops {
            stop.check_position().map_err(invalid)?;
            stop.rgb().map_err(invalid)?;
        }
        if stops.windows(2).any(|pair| pair[0].position > pair[1].position) {
            return Err(ValidationError::UnorderedGradient {
                strip,
                animation: animation.id(),
            });
        }
    }

    if let Some(palette) = animation.palette() {
        for color in palette {
            color.to_color().map_err(invalid)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_strips;
    use crate::types::{GradientStop, RawAnimation, Rgb, SolidAnimation};

    #[test]
    fn accept_all_accepts_anything() {
        let mut strips = seed_strips();
        strips.push(strips[0].clone());
        strips[0].animation = 999;
        assert!(AcceptAll.validate(&strips).is_ok());
    }

    #[test]
    fn strict_accepts_seed() {
        assert!(StrictPolicy.validate(&seed_strips()).is_ok());
    }

    #[test]
    fn strict_rejects_duplicate_strip_ids() {
        let mut strips = seed_strips();
        strips[2].id = 0;
        assert_eq!(
            StrictPolicy.validate(&strips),
            Err(ValidationError::DuplicateStripId(0))
        );
    }

    #[test]
    fn strict_rejects_dangling_animation() {
        let mut strips = seed_strips();
        strips[1].animation = 42;
        assert_eq!(
            StrictPolicy.validate(&strips),
            Err(ValidationError::DanglingAnimation {
                strip: 1,
                animation: 42
            })
        );
    }

    #[test]
    fn strict_rejects_empty_strip() {
        let mut strips = seed_strips();
        strips[0].led_count = 0;
        assert!(matches!(
            StrictPolicy.validate(&strips),
            Err(ValidationError::InvalidLedCount { strip: 0, count: 0 })
        ));
    }

    #[test]
    fn strict_rejects_duplicate_animation() {
        let mut strips = seed_strips();
        let first = strips[0].animations[0].clone();
        strips[0].animations.push(first);
        assert!(matches!(
            StrictPolicy.validate(&strips),
            Err(ValidationError::DuplicateAnimationId {
                strip: 0,
                animation: 0
            })
        ));
    }

    #[test]
    fn strict_rejects_unknown_kind() {
        let mut strips = seed_strips();
        strips[0].animations.push(Animation::Raw(RawAnimation {
            id: 55,
            fields: serde_json::Map::new(),
        }));
        assert!(matches!(
            StrictPolicy.validate(&strips),
            Err(ValidationError::UnknownAnimation { animation: 55, .. })
        ));
    }

    #[test]
    fn strict_rejects_known_id_with_wrong_shape() {
        let mut strips = seed_strips();
        strips[0].animations[0] =
            serde_json::from_value(serde_json::json!({"id": 0, "colors": [255, 255, 255]}))
                .unwrap();
        assert!(matches!(
            StrictPolicy.validate(&strips),
            Err(ValidationError::MalformedAnimation {
                strip: 0,
                animation: 0,
                ..
            })
        ));
    }

    #[test]
    fn accept_all_keeps_front_end_defaults() {
        let mut strips = seed_strips();
        strips[0].animations[0] =
            serde_json::from_value(serde_json::json!({"id": 0, "colors": [255, 255, 255]}))
                .unwrap();
        assert!(AcceptAll.validate(&strips).is_ok());
    }

    #[test]
    fn strict_rejects_bad_gradient_color() {
        let mut strips = seed_strips();
        strips[0].animations[0] =
            Animation::Solid(SolidAnimation::new(vec![GradientStop::new(0, "red")]));
        assert_eq!(
            StrictPolicy.validate(&strips),
            Err(ValidationError::InvalidValue {
                strip: 0,
                animation: 0,
                source: ValueError::InvalidHexColor("red".to_string()),
            })
        );
    }

    #[test]
    fn strict_rejects_position_out_of_range() {
        let mut strips = seed_strips();
        strips[0].animations[0] =
            Animation::Solid(SolidAnimation::new(vec![GradientStop::new(120, "#FF0000")]));
        assert!(matches!(
            StrictPolicy.validate(&strips),
            Err(ValidationError::InvalidValue {
                source: ValueError::OutOfRange { actual: 120, .. },
                ..
            })
        ));
    }

    #[test]
    fn strict_rejects_unordered_gradient() {
        let mut strips = seed_strips();
        strips[0].animations[0] = Animation::Solid(SolidAnimation::new(vec![
            GradientStop::new(80, "#FF0000"),
            GradientStop::new(20, "#0000FF"),
        ]));
        assert!(matches!(
            StrictPolicy.validate(&strips),
            Err(ValidationError::UnorderedGradient { strip: 0, .. })
        ));
    }

    #[test]
    fn strict_rejects_channel_out_of_range() {
        let mut strips = seed_strips();
        if let Animation::AudioBass(audio) = &mut strips[2].animations[4] {
            audio.colors.push(Rgb::new(0, 0, 300));
        }
        assert!(matches!(
            StrictPolicy.validate(&strips),
            Err(ValidationError::InvalidValue {
                strip: 2,
                animation: 100,
                ..
            })
        ));
    }
}
