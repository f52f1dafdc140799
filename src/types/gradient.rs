// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color records as they appear on the wire.
//!
//! Neither type checks its ranges on decode: a stop at position 140 or a
//! channel of 300 is stored and echoed back as sent. Use the accessors to
//! get a checked [`RgbColor`].

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

use super::RgbColor;

/// A color anchored at a percentage position along a strip.
///
/// # Examples
///
/// ```
/// use ledstrip_store::types::{GradientStop, RgbColor};
///
/// let stop = GradientStop::new(56, "#EEBB00");
/// assert_eq!(stop.rgb().unwrap(), RgbColor::new(0xEE, 0xBB, 0x00));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the strip, conventionally 0-100.
    pub position: i32,
    /// Color as `#RRGGBB`.
    pub color: String,
}

impl GradientStop {
    /// Lowest conventional position.
    pub const START: i32 = 0;

    /// Highest conventional position.
    pub const END: i32 = 100;

    /// Creates a gradient stop.
    #[must_use]
    pub fn new(position: i32, color: impl Into<String>) -> Self {
        Self {
            position,
            color: color.into(),
        }
    }

    /// Creates a gradient stop from a checked color.
    #[must_use]
    pub fn from_rgb(position: i32, color: RgbColor) -> Self {
        Self::new(position, color.to_hex_with_hash())
    }

    /// Parses the stop's color.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the color is not `#RRGGBB`.
    pub fn rgb(&self) -> Result<RgbColor, ValueError> {
        RgbColor::from_hex(&self.color)
    }

    /// Checks that the position lies within 0-100.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` otherwise.
    pub fn check_position(&self) -> Result<(), ValueError> {
        if (Self::START..=Self::END).contains(&self.position) {
            Ok(())
        } else {
            Err(ValueError::OutOfRange {
                min: i64::from(Self::START),
                max: i64::from(Self::END),
                actual: i64::from(self.position),
            })
        }
    }
}

/// An RGB triple used by the audio-reactive animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel, conventionally 0-255.
    pub r: i32,
    /// Green channel, conventionally 0-255.
    pub g: i32,
    /// Blue channel, conventionally 0-255.
    pub b: i32,
}

impl Rgb {
    /// Creates an RGB triple.
    #[must_use]
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Converts to a checked color.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for the first channel outside 0-255.
    pub fn to_color(&self) -> Result<RgbColor, ValueError> {
        let channel = |value: i32| {
            u8::try_from(value).map_err(|_| ValueError::OutOfRange {
                min: 0,
                max: 255,
                actual: i64::from(value),
            })
        };
        Ok(RgbColor::new(
            channel(self.r)?,
            channel(self.g)?,
            channel(self.b)?,
        ))
    }
}

impl From<RgbColor> for Rgb {
    fn from(color: RgbColor) -> Self {
        Self::new(
            i32::from(color.red()),
            i32::from(color.green()),
            i32::from(color.blue()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_serializes_position_then_color() {
        let stop = GradientStop::new(0, "#FF0000");
        assert_eq!(
            serde_json::to_string(&stop).unwrap(),
            r##"{"position":0,"color":"#FF0000"}"##
        );
    }

    #[test]
    fn stop_keeps_out_of_range_values() {
        let stop: GradientStop =
            serde_json::from_str(r#"{"position": 140, "color": "teal"}"#).unwrap();
        assert_eq!(stop.position, 140);
        assert_eq!(stop.color, "teal");
        assert!(stop.check_position().is_err());
        assert!(stop.rgb().is_err());
    }

    #[test]
    fn stop_from_rgb_formats_hex() {
        let stop = GradientStop::from_rgb(100, RgbColor::new(0, 0, 255));
        assert_eq!(stop.color, "#0000FF");
        assert!(stop.check_position().is_ok());
    }

    #[test]
    fn rgb_to_color_checks_channels() {
        assert_eq!(
            Rgb::new(255, 255, 0).to_color().unwrap(),
            RgbColor::new(255, 255, 0)
        );
        assert_eq!(
            Rgb::new(0, 256, 0).to_color(),
            Err(ValueError::OutOfRange {
                min: 0,
                max: 255,
                actual: 256
            })
        );
        assert!(Rgb::new(-1, 0, 0).to_color().is_err());
    }

    #[test]
    fn rgb_wire_shape() {
        let rgb: Rgb = serde_json::from_str(r#"{"r": 255, "g": 0, "b": 0}"#).unwrap();
        assert_eq!(rgb, Rgb::from(RgbColor::red_color()));
    }
}
