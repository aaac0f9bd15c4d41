use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UnitKind {
    Pixels,
    Percent,
    Fraction,
}

static UNIT_SUFFIXES: Lazy<Vec<(&'static str, UnitKind)>> = Lazy::new(|| {
    vec![
        ("px", UnitKind::Pixels),
        ("%", UnitKind::Percent),
        ("fr", UnitKind::Fraction),
    ]
});

/// One length along one axis. Pixel and percent parts are additive:
/// `resolve` yields `pixels + percent * container`. The fraction part is
/// carried through parsing but resolves to nothing; no track-sizing pass
/// consumes it yet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutValue {
    pub pixels: f32,
    pub percent: f32,
    pub fraction: f32,
}

impl LayoutValue {
    pub const ZERO: Self = Self {
        pixels: 0.0,
        percent: 0.0,
        fraction: 0.0,
    };

    pub const fn px(pixels: f32) -> Self {
        Self {
            pixels,
            percent: 0.0,
            fraction: 0.0,
        }
    }

    /// `percent` is a factor, `0.5` meaning 50% of the container.
    pub const fn percent(percent: f32) -> Self {
        Self {
            pixels: 0.0,
            percent,
            fraction: 0.0,
        }
    }

    pub const fn fr(fraction: f32) -> Self {
        Self {
            pixels: 0.0,
            percent: 0.0,
            fraction,
        }
    }

    pub const fn new(pixels: f32, percent: f32) -> Self {
        Self {
            pixels,
            percent,
            fraction: 0.0,
        }
    }

    pub fn resolve(&self, container: f32) -> f32 {
        self.pixels + self.percent * container
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseUnitError {
    #[error("empty layout value")]
    Empty,
    #[error("invalid number in layout value `{0}`")]
    InvalidNumber(String),
}

impl FromStr for LayoutValue {
    type Err = ParseUnitError;

    /// Accepts `"12px"`, `"50%"`, `"1fr"` and a bare number (pixels).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseUnitError::Empty);
        }
        let (number, kind) = UNIT_SUFFIXES
            .iter()
            .find_map(|(suffix, kind)| s.strip_suffix(suffix).map(|rest| (rest, *kind)))
            .unwrap_or((s, UnitKind::Pixels));
        let value: f32 = number
            .trim_end()
            .parse()
            .map_err(|_| ParseUnitError::InvalidNumber(s.to_owned()))?;
        Ok(match kind {
            UnitKind::Pixels => Self::px(value),
            UnitKind::Percent => Self::percent(value / 100.0),
            UnitKind::Fraction => Self::fr(value),
        })
    }
}

impl fmt::Display for LayoutValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.percent != 0.0 && self.pixels != 0.0 {
            write!(f, "{}px + {}%", self.pixels, self.percent * 100.0)
        } else if self.percent != 0.0 {
            write!(f, "{}%", self.percent * 100.0)
        } else if self.fraction != 0.0 {
            write!(f, "{}fr", self.fraction)
        } else {
            write!(f, "{}px", self.pixels)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_additive() {
        let v = LayoutValue::new(10.0, 0.5);
        assert_eq!(v.resolve(200.0), 110.0);
        assert_eq!(v.resolve(0.0), 10.0);
    }

    #[test]
    fn fraction_resolves_to_zero() {
        let v = LayoutValue::fr(2.0);
        assert_eq!(v.resolve(500.0), 0.0);
        assert_eq!(v.fraction, 2.0);
    }

    #[test]
    fn parses_suffixes() {
        assert_eq!("12px".parse::<LayoutValue>().unwrap(), LayoutValue::px(12.0));
        assert_eq!(
            "50%".parse::<LayoutValue>().unwrap(),
            LayoutValue::percent(0.5)
        );
        assert_eq!("1fr".parse::<LayoutValue>().unwrap(), LayoutValue::fr(1.0));
        assert_eq!("-4".parse::<LayoutValue>().unwrap(), LayoutValue::px(-4.0));
        assert_eq!(
            " 2.5px ".parse::<LayoutValue>().unwrap(),
            LayoutValue::px(2.5)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!("".parse::<LayoutValue>(), Err(ParseUnitError::Empty));
        assert!(matches!(
            "abcpx".parse::<LayoutValue>(),
            Err(ParseUnitError::InvalidNumber(_))
        ));
    }
}
