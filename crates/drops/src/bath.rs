//! The bath: an ordered collection of drops and the frame contract.
//!
//! New ink must marble every drop already floating in the bath *before* it
//! joins the collection, and before any animation pass runs for the same
//! frame; otherwise the new drop visibly fails to push the old ones that
//! frame. [`Bath::drop_ink`] owns that ordering.

use crate::drop::InkDrop;
use marbling_core::params::{param_f64, param_usize};
use serde_json::Value;

/// Default edge-noise amplitude (fraction of drop radius).
const DEFAULT_NOISE_AMPLITUDE: f64 = 0.16;
/// Default edge-noise angular frequency (bumps around the circumference).
const DEFAULT_NOISE_FREQUENCY: f64 = 6.0;
/// Default harmonic-wave amplitude (fraction of drop radius).
const DEFAULT_WAVE_AMPLITUDE: f64 = 0.12;
/// Default harmonic phase speed.
const DEFAULT_WAVE_SPEED: f64 = 2.0;
/// Default harmonic count.
const DEFAULT_HARMONICS: u32 = 3;

/// Per-frame animation settings shared by every drop in the bath.
#[derive(Debug, Clone, Copy)]
pub struct AnimationParams {
    /// Edge-noise amplitude as a fraction of each drop's radius.
    pub noise_amplitude: f64,
    /// Edge-noise frequency: bump count around the circumference.
    pub noise_frequency: f64,
    /// Harmonic-wave amplitude as a fraction of each drop's radius.
    pub wave_amplitude: f64,
    /// Harmonic phase speed.
    pub wave_speed: f64,
    /// Number of sine harmonics (clamped to 1..=5 at application).
    pub harmonics: u32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            noise_frequency: DEFAULT_NOISE_FREQUENCY,
            wave_amplitude: DEFAULT_WAVE_AMPLITUDE,
            wave_speed: DEFAULT_WAVE_SPEED,
            harmonics: DEFAULT_HARMONICS,
        }
    }
}

impl AnimationParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            noise_amplitude: param_f64(params, "noise_amplitude", DEFAULT_NOISE_AMPLITUDE),
            noise_frequency: param_f64(params, "noise_frequency", DEFAULT_NOISE_FREQUENCY),
            wave_amplitude: param_f64(params, "wave_amplitude", DEFAULT_WAVE_AMPLITUDE),
            wave_speed: param_f64(params, "wave_speed", DEFAULT_WAVE_SPEED),
            harmonics: param_usize(params, "harmonics", DEFAULT_HARMONICS as usize) as u32,
        }
    }
}

/// Ordered collection of ink drops.
#[derive(Debug, Default)]
pub struct Bath {
    drops: Vec<InkDrop>,
}

impl Bath {
    /// Creates an empty bath.
    pub fn new() -> Self {
        Self::default()
    }

    /// Introduces new ink: marbles every existing drop against it (each
    /// committing its warped outline as the new base shape), then appends
    /// it to the collection.
    pub fn drop_ink(&mut self, drop: InkDrop) {
        for existing in &mut self.drops {
            existing.marble(&drop, true);
        }
        self.drops.push(drop);
    }

    /// Runs one animation frame at time `time` (seconds): edge noise
    /// first, then harmonic waves, for every drop.
    ///
    /// Both passes displace from the base shape, so the harmonic pass is
    /// the one that determines the outline for the frame; the order is
    /// fixed here so frames are deterministic.
    pub fn animate(&mut self, time: f64, params: &AnimationParams) {
        for drop in &mut self.drops {
            drop.apply_edge_noise(params.noise_amplitude, params.noise_frequency, time);
            drop.animate_shape(time, params.wave_amplitude, params.wave_speed, params.harmonics);
        }
    }

    /// Drags a vertical tine through the whole bath at horizontal
    /// position `x`. Cumulative: bases are left untouched so repeated
    /// strokes keep deepening the drag (with diminishing returns).
    pub fn tine(&mut self, x: f64, strength: f64, sharpness: f64) {
        for drop in &mut self.drops {
            drop.apply_vertical_tine(x, strength, sharpness, false);
        }
    }

    /// Advances every drop's gradual color blend by `step`.
    pub fn update_colors(&mut self, step: f64) {
        for drop in &mut self.drops {
            drop.update_color(step);
        }
    }

    /// The drops, oldest first.
    pub fn drops(&self) -> &[InkDrop] {
        &self.drops
    }

    /// Number of drops in the bath.
    pub fn len(&self) -> usize {
        self.drops.len()
    }

    /// True when the bath holds no drops.
    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Removes every drop.
    pub fn clear(&mut self) {
        self.drops.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use marbling_core::Rgba;

    fn drop_at(x: f64, y: f64, radius: f64) -> InkDrop {
        InkDrop::new(DVec2::new(x, y), Rgba::opaque(60, 60, 60), radius, 16).unwrap()
    }

    #[test]
    fn drop_ink_marbles_existing_drops_before_appending() {
        let mut bath = Bath::new();
        bath.drop_ink(drop_at(0.0, 0.0, 50.0));
        let before: Vec<DVec2> = bath.drops()[0].vertices().to_vec();

        bath.drop_ink(drop_at(20.0, 0.0, 30.0));
        assert_eq!(bath.len(), 2);

        let after = bath.drops()[0].vertices();
        let moved = after.iter().zip(&before).any(|(a, b)| a.distance(*b) > 1e-9);
        assert!(moved, "existing drop was not marbled");

        // The new drop itself is untouched: still a regular polygon.
        let new_drop = &bath.drops()[1];
        for v in new_drop.vertices() {
            assert!((v.distance(new_drop.center()) - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn drop_ink_keeps_insertion_order() {
        let mut bath = Bath::new();
        bath.drop_ink(drop_at(0.0, 0.0, 50.0));
        bath.drop_ink(drop_at(100.0, 0.0, 40.0));
        bath.drop_ink(drop_at(200.0, 0.0, 30.0));
        let radii: Vec<f64> = bath.drops().iter().map(InkDrop::radius).collect();
        assert_eq!(radii, vec![50.0, 40.0, 30.0]);
    }

    #[test]
    fn animate_is_deterministic_for_equal_time() {
        let build = || {
            let mut bath = Bath::new();
            bath.drop_ink(drop_at(0.0, 0.0, 50.0));
            bath.drop_ink(drop_at(30.0, 10.0, 40.0));
            bath
        };
        let params = AnimationParams::default();
        let mut a = build();
        let mut b = build();
        a.animate(1.25, &params);
        b.animate(1.25, &params);
        for (da, db) in a.drops().iter().zip(b.drops()) {
            for (p, q) in da.vertices().iter().zip(db.vertices()) {
                assert_eq!(p.x.to_bits(), q.x.to_bits());
                assert_eq!(p.y.to_bits(), q.y.to_bits());
            }
        }
    }

    #[test]
    fn animate_does_not_drift_when_time_is_repeated() {
        let mut bath = Bath::new();
        bath.drop_ink(drop_at(0.0, 0.0, 50.0));
        let params = AnimationParams::default();
        bath.animate(2.0, &params);
        let once: Vec<DVec2> = bath.drops()[0].vertices().to_vec();
        bath.animate(2.0, &params);
        assert_eq!(bath.drops()[0].vertices(), once.as_slice());
    }

    #[test]
    fn tine_reaches_every_drop_in_range() {
        let mut bath = Bath::new();
        bath.drop_ink(drop_at(0.0, 0.0, 50.0));
        bath.drop_ink(drop_at(10.0, 100.0, 50.0));
        let before: Vec<Vec<DVec2>> = bath
            .drops()
            .iter()
            .map(|d| d.vertices().to_vec())
            .collect();
        bath.tine(0.0, 10.0, 40.0);
        for (drop, orig) in bath.drops().iter().zip(&before) {
            let moved = drop.vertices().iter().zip(orig).any(|(a, b)| a != b);
            assert!(moved, "a drop in range was untouched");
        }
    }

    #[test]
    fn update_colors_advances_blends() {
        let mut bath = Bath::new();
        let mut drop = drop_at(0.0, 0.0, 50.0);
        drop.set_target_color(Rgba::opaque(255, 255, 255), 0.6);
        bath.drop_ink(drop);
        let before = bath.drops()[0].color();
        bath.update_colors(0.1);
        assert_ne!(bath.drops()[0].color(), before);
    }

    #[test]
    fn clear_empties_the_bath() {
        let mut bath = Bath::new();
        bath.drop_ink(drop_at(0.0, 0.0, 50.0));
        assert!(!bath.is_empty());
        bath.clear();
        assert!(bath.is_empty());
        assert_eq!(bath.len(), 0);
    }

    #[test]
    fn animation_params_from_json_overrides_and_defaults() {
        let params = AnimationParams::from_json(&serde_json::json!({
            "noise_amplitude": 0.3,
            "harmonics": 5,
        }));
        assert!((params.noise_amplitude - 0.3).abs() < f64::EPSILON);
        assert_eq!(params.harmonics, 5);
        assert!((params.noise_frequency - DEFAULT_NOISE_FREQUENCY).abs() < f64::EPSILON);
        assert!((params.wave_amplitude - DEFAULT_WAVE_AMPLITUDE).abs() < f64::EPSILON);
    }
}
