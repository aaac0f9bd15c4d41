use std::ops::Mul;

/// Straight-alpha RGBA, each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`. Invalid input yields
    /// transparent.
    pub fn hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        if bytes.is_empty() || bytes[0] != b'#' || !bytes[1..].iter().all(u8::is_ascii_hexdigit) {
            return Self::TRANSPARENT;
        }
        let nibble = |b: u8| (b as char).to_digit(16).unwrap_or(0) as u8;
        let pair = |hi: u8, lo: u8| nibble(hi) * 16 + nibble(lo);
        match bytes.len() {
            4 => Self::from_rgba8(
                nibble(bytes[1]) * 17,
                nibble(bytes[2]) * 17,
                nibble(bytes[3]) * 17,
                255,
            ),
            5 => Self::from_rgba8(
                nibble(bytes[1]) * 17,
                nibble(bytes[2]) * 17,
                nibble(bytes[3]) * 17,
                nibble(bytes[4]) * 17,
            ),
            7 => Self::from_rgba8(
                pair(bytes[1], bytes[2]),
                pair(bytes[3], bytes[4]),
                pair(bytes[5], bytes[6]),
                255,
            ),
            9 => Self::from_rgba8(
                pair(bytes[1], bytes[2]),
                pair(bytes[3], bytes[4]),
                pair(bytes[5], bytes[6]),
                pair(bytes[7], bytes[8]),
            ),
            _ => Self::TRANSPARENT,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    /// Alpha scaling, `Color::BLACK * 0.4` style.
    fn mul(self, factor: f32) -> Color {
        Color {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(Color::hex("#fff"), Color::WHITE);
        assert_eq!(Color::hex("#000000"), Color::BLACK);
        let c = Color::hex("#ff000080");
        assert_eq!(c.r, 1.0);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(Color::hex("nope"), Color::TRANSPARENT);
        assert_eq!(Color::hex("#12345"), Color::TRANSPARENT);
    }

    #[test]
    fn alpha_scaling() {
        let c = Color::BLACK * 0.4;
        assert_eq!(c.r, 0.0);
        assert!((c.a - 0.4).abs() < 1e-6);
        assert!((Color::WHITE * 2.0).a <= 1.0);
    }
}
