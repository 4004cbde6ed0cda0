use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MinichartError, MinichartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    /// Parses `#rgb` or `#rrggbb`.
    pub fn from_hex(text: &str) -> MinichartResult<Self> {
        let invalid =
            || MinichartError::invalid_option("color", format!("`{text}` is not a hex color"));
        let digits = text.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| invalid());
        let (red, green, blue) = match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..=i].repeat(2));
                (expand(0)?, expand(1)?, expand(2)?)
            }
            6 => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ),
            _ => return Err(invalid()),
        };

        Ok(Self::from_rgb8(red, green, blue))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }

    /// WCAG relative luminance in `[0, 1]`.
    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        let linear = |channel: f64| {
            if channel <= 0.039_28 {
                channel / 12.92
            } else {
                ((channel + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * linear(self.red) + 0.7152 * linear(self.green) + 0.0722 * linear(self.blue)
    }

    /// Text color that stays readable on top of `self`.
    #[must_use]
    pub fn contrast_text(self) -> Self {
        if self.relative_luminance() > 0.179 {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }

    pub fn validate(self) -> MinichartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(MinichartError::invalid_option(
                    "color",
                    format!("channel `{channel}` must be finite and in [0, 1]"),
                ));
            }
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = MinichartError;

    fn from_str(text: &str) -> MinichartResult<Self> {
        Self::from_hex(text)
    }
}

impl TryFrom<String> for Color {
    type Error = MinichartError;

    fn try_from(text: String) -> MinichartResult<Self> {
        Self::from_hex(&text)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Color::from_hex("#fff"), Ok(Color::WHITE));
        assert_eq!(Color::from_hex("#000000"), Ok(Color::BLACK));
        assert_eq!(Color::from_hex("#1f77b4").map(Color::to_hex).as_deref(), Ok("#1f77b4"));
    }

    #[test]
    fn rejects_malformed_hex() {
        for text in ["1f77b4", "#12345", "#gggggg", "#ffé"] {
            assert!(Color::from_hex(text).is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn contrast_text_picks_dark_on_light_fills() {
        assert_eq!(Color::WHITE.contrast_text(), Color::BLACK);
        assert_eq!(Color::BLACK.contrast_text(), Color::WHITE);
    }
}
