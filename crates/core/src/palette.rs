//! Ink palettes: named sets of colors drops are inked with.
//!
//! The simulation driver picks a random stop for each new drop and a second
//! random stop as its gradual blend target. `sample` interpolates across
//! the stops for callers that want a continuous gradient instead.

use crate::color::Rgba;
use crate::error::MarblingError;
use crate::prng::Xorshift64;

/// Names accepted by [`Palette::from_name`].
const PALETTE_NAMES: &[&str] = &["suminagashi", "ebru", "sunset", "ocean", "midnight"];

/// A non-empty list of ink colors.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Creates a palette from a vector of colors. Requires at least one.
    pub fn new(colors: Vec<Rgba>) -> Result<Self, MarblingError> {
        if colors.is_empty() {
            return Err(MarblingError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing hex color strings.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, MarblingError> {
        let colors: Result<Vec<Rgba>, MarblingError> =
            hexes.iter().map(|h| Rgba::from_hex(h)).collect();
        Self::new(colors?)
    }

    /// Looks up a built-in palette by name.
    ///
    /// Returns `MarblingError::UnknownPalette` for names not in
    /// [`Palette::list_names`].
    pub fn from_name(name: &str) -> Result<Self, MarblingError> {
        match name {
            "suminagashi" => Ok(Self::suminagashi()),
            "ebru" => Ok(Self::ebru()),
            "sunset" => Ok(Self::sunset()),
            "ocean" => Ok(Self::ocean()),
            "midnight" => Ok(Self::midnight()),
            _ => Err(MarblingError::UnknownPalette(name.to_string())),
        }
    }

    /// Returns the names of all built-in palettes.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    /// Number of color stops.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Read-only access to the stops.
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Draws a uniformly random stop.
    pub fn pick(&self, rng: &mut Xorshift64) -> Rgba {
        self.colors[rng.next_index(self.colors.len())]
    }

    /// Samples the palette at `t` in [0, 1] by piecewise-linear
    /// interpolation between stops. `t` is clamped; NaN is treated as 0.
    /// A single-stop palette returns its one color for any `t`.
    pub fn sample(&self, t: f64) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.colors.len();
        if n == 1 {
            return self.colors[0];
        }
        let scaled = t * (n - 1) as f64;
        let idx = (scaled as usize).min(n - 2);
        let frac = scaled - idx as f64;
        self.colors[idx].lerp(self.colors[idx + 1], frac)
    }

    // -- Built-in palettes --

    /// Traditional Japanese suminagashi: indigo and slate grays.
    pub fn suminagashi() -> Self {
        Self::from_hex(&["#2d3748", "#4a5568", "#a0aec0", "#edf2f7", "#cbd5e0"])
            .expect("suminagashi palette hex values are valid")
    }

    /// Classic Turkish ebru: rose, dark blue, gold, red, emerald.
    pub fn ebru() -> Self {
        Self::from_hex(&["#b83b5e", "#34495e", "#f1c40f", "#e74c3c", "#2ecc71"])
            .expect("ebru palette hex values are valid")
    }

    /// Coral, orange, golden, peach, pink.
    pub fn sunset() -> Self {
        Self::from_hex(&["#ff5e4d", "#ff9a00", "#ffce54", "#ff8a65", "#f06292"])
            .expect("sunset palette hex values are valid")
    }

    /// Sky blue through deep blue and teal.
    pub fn ocean() -> Self {
        Self::from_hex(&["#48cae4", "#0077be", "#00b4d8", "#90e0ef", "#219ebc"])
            .expect("ocean palette hex values are valid")
    }

    /// Midnight blues into plum.
    pub fn midnight() -> Self {
        Self::from_hex(&["#191970", "#483d8b", "#6a5acd", "#9370db", "#dda0dd"])
            .expect("midnight palette hex values are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty() {
        assert!(Palette::new(vec![]).is_err());
    }

    #[test]
    fn from_hex_rejects_bad_color() {
        assert!(Palette::from_hex(&["#xyzxyz"]).is_err());
    }

    #[test]
    fn from_name_resolves_every_listed_name() {
        for name in Palette::list_names() {
            let palette = Palette::from_name(name).unwrap();
            assert!(!palette.is_empty(), "{name} is empty");
        }
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert!(matches!(
            Palette::from_name("chartreuse"),
            Err(MarblingError::UnknownPalette(_))
        ));
    }

    #[test]
    fn pick_is_deterministic_under_seeded_rng() {
        let palette = Palette::ebru();
        let mut a = Xorshift64::new(42);
        let mut b = Xorshift64::new(42);
        for _ in 0..50 {
            assert_eq!(palette.pick(&mut a), palette.pick(&mut b));
        }
    }

    #[test]
    fn pick_always_returns_a_stop() {
        let palette = Palette::sunset();
        let mut rng = Xorshift64::new(7);
        for _ in 0..100 {
            let c = palette.pick(&mut rng);
            assert!(palette.colors().contains(&c));
        }
    }

    #[test]
    fn sample_endpoints_are_first_and_last_stops() {
        let palette = Palette::midnight();
        assert_eq!(palette.sample(0.0), palette.colors()[0]);
        assert_eq!(palette.sample(1.0), *palette.colors().last().unwrap());
    }

    #[test]
    fn sample_clamps_t_and_handles_nan() {
        let palette = Palette::ocean();
        assert_eq!(palette.sample(-1.0), palette.colors()[0]);
        assert_eq!(palette.sample(2.0), *palette.colors().last().unwrap());
        assert_eq!(palette.sample(f64::NAN), palette.colors()[0]);
    }

    #[test]
    fn sample_single_stop_palette_is_constant() {
        let palette = Palette::new(vec![Rgba::opaque(9, 9, 9)]).unwrap();
        for t in [0.0, 0.3, 0.99, 1.0] {
            assert_eq!(palette.sample(t), Rgba::opaque(9, 9, 9));
        }
    }

    #[test]
    fn sample_midpoint_of_two_stop_palette() {
        let palette =
            Palette::new(vec![Rgba::opaque(0, 0, 0), Rgba::opaque(200, 100, 50)]).unwrap();
        assert_eq!(palette.sample(0.5), Rgba::opaque(100, 50, 25));
    }
}
