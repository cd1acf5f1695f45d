use std::fmt;

/// Straight (non-premultiplied) sRGB color without alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Color used whenever a hex string cannot be parsed.
    pub const FALLBACK: Rgb8 = Rgb8::new(38, 97, 86);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` / `#RRGGBB` (leading `#` optional, surrounding whitespace ignored).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return None;
        }

        let expanded;
        let s = if s.len() == 3 {
            expanded = s.chars().flat_map(|c| [c, c]).collect::<String>();
            expanded.as_str()
        } else {
            s
        };
        if s.len() != 6 {
            return None;
        }

        let byte = |pair: &str| u8::from_str_radix(pair, 16).ok();
        Some(Self::new(byte(&s[0..2])?, byte(&s[2..4])?, byte(&s[4..6])?))
    }

    /// Parse a hex color, substituting [`Rgb8::FALLBACK`] on failure.
    pub fn from_hex_or_fallback(s: &str) -> Self {
        Self::parse_hex(s).unwrap_or(Self::FALLBACK)
    }

    /// Straight RGBA8 with `opacity` (clamped to `[0, 1]`) as alpha.
    pub fn with_opacity(self, opacity: f32) -> [u8; 4] {
        [self.r, self.g, self.b, opacity_to_u8(opacity)]
    }

    /// ITU-R 601 luma, matching the usual `L` conversion of RGB rasters.
    pub fn luma(self) -> u8 {
        let l =
            (u32::from(self.r) * 299 + u32::from(self.g) * 587 + u32::from(self.b) * 114) / 1000;
        l as u8
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

pub(crate) fn opacity_to_u8(opacity: f32) -> u8 {
    if !opacity.is_finite() {
        return 0;
    }
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
