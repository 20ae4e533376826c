//! Minimal color handling for fragment styling.
//!
//! Colors travel through the pipeline as [`Rgb`] values, a thin wrapper over
//! an 8-bit [`Srgb`], and are printed as lowercase `#rrggbb` strings when
//! handed to the rendering layer.

use std::fmt::{self, Display};
use std::str::FromStr;

use palette::{Mix, Srgb, named};

use crate::errors::CoreError;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Rgb(Srgb<u8>);

impl Default for Rgb {
    fn default() -> Self {
        Rgb::BLACK
    }
}

impl Rgb {
    pub const BLACK: Rgb = Rgb(named::BLACK);
    pub const WHITE: Rgb = Rgb(named::WHITE);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb(Srgb::new(r, g, b))
    }

    pub fn r(&self) -> u8 {
        self.0.red
    }

    pub fn g(&self) -> u8 {
        self.0.green
    }

    pub fn b(&self) -> u8 {
        self.0.blue
    }

    ///
    /// Blend two colors along a gradient.
    ///
    /// # Arguments
    /// - from: color at `t = 0`
    /// - to: color at `t = 1`
    /// - t: position on the gradient, clamped to [0, 1]
    pub fn interpolate(from: Rgb, to: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) as f32 };
        let from: Srgb<f32> = from.0.into_format();
        let to: Srgb<f32> = to.0.into_format();
        Rgb(from.mix(to, t).into_format())
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(color: Srgb<u8>) -> Self {
        Rgb(color)
    }
}

impl From<Rgb> for Srgb<u8> {
    fn from(color: Rgb) -> Self {
        color.0
    }
}

impl FromStr for Rgb {
    type Err = CoreError;

    /// Accepts `#rrggbb`, `#rgb` and CSS color names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || CoreError::InvalidColor(s.to_string());

        match trimmed.strip_prefix('#') {
            Some(hex) if hex.is_ascii() => hex.parse::<Srgb<u8>>().map(Rgb).map_err(|_| invalid()),
            Some(_) => Err(invalid()),
            None => named::from_str(&trimmed.to_ascii_lowercase())
                .map(Rgb)
                .ok_or_else(invalid),
        }
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Rgb::from_str(&raw).map_err(serde::de::Error::custom)
    }
}
