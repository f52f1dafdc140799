// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validated RGB color values.
//!
//! The wire types in [`gradient`](super::gradient) carry colors exactly as the
//! client sent them. [`RgbColor`] is the checked form: it can only hold 8-bit
//! channels and parses the `#RRGGBB` strings used by gradient stops.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use ledstrip_store::types::RgbColor;
///
/// let amber = RgbColor::from_hex("#EEBB00").unwrap();
/// assert_eq!(amber.red(), 0xEE);
/// assert_eq!(amber.green(), 0xBB);
/// assert_eq!(amber.blue(), 0x00);
///
/// assert_eq!(amber.to_hex_with_hash(), "#EEBB00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses an RGB color from a six digit hex string.
    ///
    /// Accepts `#RRGGBB` and `RRGGBB`, in either case. Shorthand `#RGB` is
    /// rejected, as the front-end never produces it.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the string is not six hex
    /// digits after the optional hash.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledstrip_store::types::RgbColor;
    ///
    /// let color = RgbColor::from_hex("0000ff").unwrap();
    /// assert_eq!(color.blue(), 255);
    ///
    /// assert!(RgbColor::from_hex("#F00").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ValueError::InvalidHexColor(hex.to_string()));
        }

        let pair = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ValueError::InvalidHexColor(hex.to_string()))
        };

        Ok(Self::new(pair(0..2)?, pair(2..4)?, pair(4..6)?))
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the color as an uppercase hex string with the hash prefix.
    #[must_use]
    pub fn to_hex_with_hash(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Pure red, the first color of every seeded gradient.
    #[must_use]
    pub const fn red_color() -> Self {
        Self::new(255, 0, 0)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_with_hash())
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_with_and_without_hash() {
        let color = RgbColor::from_hex("#FF5733").unwrap();
        assert_eq!(color, RgbColor::new(255, 87, 51));

        let color = RgbColor::from_hex("00ff00").unwrap();
        assert_eq!(color, RgbColor::new(0, 255, 0));
    }

    #[test]
    fn from_hex_rejects_malformed() {
        assert!(RgbColor::from_hex("#GG0000").is_err());
        assert!(RgbColor::from_hex("#FF00").is_err());
        assert!(RgbColor::from_hex("#F00").is_err());
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#ÉÉÉ").is_err());
    }

    #[test]
    fn from_hex_error_keeps_input() {
        assert_eq!(
            RgbColor::from_hex("#12345Z"),
            Err(ValueError::InvalidHexColor("#12345Z".to_string()))
        );
    }

    #[test]
    fn hex_formatting_is_uppercase_and_padded() {
        let color = RgbColor::new(0, 15, 255);
        assert_eq!(color.to_hex_with_hash(), "#000FFF");
        assert_eq!(color.to_string(), "#000FFF");
    }

    #[test]
    fn parse_via_from_str() {
        let color: RgbColor = "#0000FF".parse().unwrap();
        assert_eq!(color, RgbColor::new(0, 0, 255));
    }
}
