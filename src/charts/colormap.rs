//! Colormap Module
//! Matplotlib-style color ramps for the heat layer and colorbar.

use std::str::FromStr;

use plotters::style::RGBColor;

/// Viridis anchor colors at evenly spaced stops.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (72, 40, 120),
    (62, 74, 137),
    (49, 104, 142),
    (38, 130, 142),
    (31, 158, 137),
    (53, 183, 121),
    (109, 205, 89),
    (253, 231, 37),
];

/// Inferno anchor colors at evenly spaced stops.
const INFERNO: [(u8, u8, u8); 9] = [
    (0, 0, 4),
    (40, 11, 84),
    (101, 21, 110),
    (159, 42, 99),
    (212, 72, 66),
    (245, 125, 21),
    (250, 193, 39),
    (245, 235, 97),
    (252, 255, 164),
];

/// The color ramps accepted by `--cmap`. Jet matches the reference figure's
/// default; the perceptually uniform ramps are offered as alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Jet,
    Viridis,
    Inferno,
}

impl Colormap {
    /// Sample the ramp at `t` in [0, 1] (clamped).
    pub fn sample(&self, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        match self {
            Colormap::Jet => jet(t),
            Colormap::Viridis => interpolate(&VIRIDIS, t),
            Colormap::Inferno => interpolate(&INFERNO, t),
        }
    }
}

impl FromStr for Colormap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jet" => Ok(Colormap::Jet),
            "viridis" => Ok(Colormap::Viridis),
            "inferno" => Ok(Colormap::Inferno),
            other => Err(format!(
                "unknown colormap '{other}' (expected jet, viridis, or inferno)"
            )),
        }
    }
}

/// Classic MATLAB jet: blue through cyan, yellow, and red.
fn jet(t: f64) -> RGBColor {
    let channel = |offset: f64| ((1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0) * 255.0) as u8;
    RGBColor(channel(3.0), channel(2.0), channel(1.0))
}

fn interpolate(anchors: &[(u8, u8, u8)], t: f64) -> RGBColor {
    let scaled = t * (anchors.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(anchors.len() - 1);
    let frac = scaled - lower as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (r0, g0, b0) = anchors[lower];
    let (r1, g1, b1) = anchors[upper];
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jet_endpoints_are_dark_blue_and_dark_red() {
        assert_eq!(Colormap::Jet.sample(0.0), RGBColor(0, 0, 127));
        assert_eq!(Colormap::Jet.sample(0.5), RGBColor(127, 255, 127));
        assert_eq!(Colormap::Jet.sample(1.0), RGBColor(127, 0, 0));
    }

    #[test]
    fn viridis_endpoints_match_anchors() {
        assert_eq!(Colormap::Viridis.sample(0.0), RGBColor(68, 1, 84));
        assert_eq!(Colormap::Viridis.sample(1.0), RGBColor(253, 231, 37));
    }

    #[test]
    fn samples_are_clamped() {
        assert_eq!(
            Colormap::Inferno.sample(-1.0),
            Colormap::Inferno.sample(0.0)
        );
        assert_eq!(Colormap::Inferno.sample(2.0), Colormap::Inferno.sample(1.0));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Viridis".parse::<Colormap>().unwrap(), Colormap::Viridis);
        assert!("magma".parse::<Colormap>().is_err());
    }
}
