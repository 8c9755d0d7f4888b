use serde::{Serialize, Serializer};
use std::fmt;

use super::linear::normalize;

/// Nine-class Orange-Red scheme, light to dark
const OR_RD: [&str; 9] = [
    "#fff7ec", "#fee8c8", "#fdd49e", "#fdbb84", "#fc8d59", "#ef6548", "#d7301f", "#b30000",
    "#7f0000",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;

        Some(Rgb(r, g, b))
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let channel = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t).round() as u8;
        Rgb(
            channel(self.0, other.0),
            channel(self.1, other.1),
            channel(self.2, other.2),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Maps a temperature domain onto a light-to-dark color ramp.
#[derive(Debug, Clone)]
pub struct SequentialColorScale {
    domain: (f64, f64),
    stops: Vec<Rgb>,
}

impl SequentialColorScale {
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            stops: OR_RD.iter().filter_map(|hex| Rgb::from_hex(hex)).collect(),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Color for `value`; values outside the domain clamp to the ends
    pub fn color(&self, value: f64) -> Rgb {
        self.interpolate(normalize(self.domain, value))
    }

    /// Piecewise-linear blend between neighbouring stops, `t` in [0, 1]
    pub fn interpolate(&self, t: f64) -> Rgb {
        let n = self.stops.len();
        match n {
            0 => Rgb(128, 128, 128),
            1 => self.stops[0],
            _ => {
                let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
                let pos = t * (n - 1) as f64;
                let low = (pos.floor() as usize).min(n - 2);
                self.stops[low].lerp(self.stops[low + 1], pos - low as f64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(Rgb::from_hex("#fc8d59"), Some(Rgb(0xfc, 0x8d, 0x59)));
        assert_eq!(Rgb(0xfc, 0x8d, 0x59).to_string(), "#fc8d59");
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("zzzzzz"), None);
    }

    #[test]
    fn test_domain_ends_hit_palette_ends() {
        let scale = SequentialColorScale::new((-10.0, 30.0));

        assert_eq!(scale.color(-10.0).to_string(), "#fff7ec");
        assert_eq!(scale.color(30.0).to_string(), "#7f0000");
        assert_eq!(scale.color(10.0).to_string(), "#fc8d59");
    }

    #[test]
    fn test_out_of_domain_clamps() {
        let scale = SequentialColorScale::new((0.0, 10.0));
        assert_eq!(scale.color(-50.0), scale.color(0.0));
        assert_eq!(scale.color(99.0), scale.color(10.0));
    }

    #[test]
    fn test_blend_between_stops() {
        let scale = SequentialColorScale::new((0.0, 8.0));
        // Halfway between #fff7ec and #fee8c8
        assert_eq!(scale.color(0.5), Rgb(0xff, 0xf0, 0xda));
    }

    #[test]
    fn test_serializes_as_hex() {
        let json = serde_json::to_string(&Rgb(0, 128, 255)).unwrap();
        assert_eq!(json, "\"#0080ff\"");
    }
}
