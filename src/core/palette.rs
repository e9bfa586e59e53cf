//! Deterministic colour shading for chart series.

use anyhow::{Result, anyhow};
use std::fmt::Display;
use std::str::FromStr;

/// Spread between the lightest and darkest shade handed out to one category.
pub const COLOR_WEIGHT: usize = 125;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

impl Rgb {
    /// Moves `weight` percent of the way from `self` towards `target`.
    pub fn mix(self, target: Rgb, weight: f64) -> Rgb {
        let w = (weight / 100.0).clamp(0.0, 1.0);
        let channel = |from: u8, to: u8| {
            let from = f64::from(from);
            (from + (f64::from(to) - from) * w).round() as u8
        };
        Rgb {
            r: channel(self.r, target.r),
            g: channel(self.g, target.g),
            b: channel(self.b, target.b),
        }
    }

    pub fn tint(self, weight: f64) -> Rgb {
        self.mix(WHITE, weight)
    }

    pub fn shade(self, weight: f64) -> Rgb {
        self.mix(BLACK, weight)
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(anyhow!("Invalid hex colour: {s}"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| anyhow!("Invalid hex colour {s}: {e}"))
        };
        Ok(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// `count` colours around `base`, lightest first.
///
/// The ladder runs from tints through the base colour into shades, in steps
/// of `COLOR_WEIGHT / count` percent. A single series gets the base colour.
pub fn shades(base: Rgb, count: usize) -> Vec<Rgb> {
    if count == 0 {
        return Vec::new();
    }
    let step = COLOR_WEIGHT as f64 / count as f64;
    // As many tints as fit in 100%, the base colour, then shades
    let tints = (100 * count / COLOR_WEIGHT).min(count - 1);
    (0..count)
        .map(|i| match i.cmp(&tints) {
            std::cmp::Ordering::Less => base.tint((tints - i) as f64 * step),
            std::cmp::Ordering::Equal => base,
            std::cmp::Ordering::Greater => base.shade((i - tints) as f64 * step),
        })
        .collect()
}
