//! One deformable ink drop: geometry, deformation operations, color state.

use crate::blend::ColorBlend;
use glam::DVec2;
use marbling_core::ease::smootherstep;
use marbling_core::error::MarblingError;
use marbling_core::noise::value_noise_2d;
use marbling_core::params::{param_f64, param_usize};
use marbling_core::Rgba;
use serde_json::Value;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Default nominal drop radius.
pub const DEFAULT_RADIUS: f64 = 100.0;
/// Default perimeter vertex count.
pub const DEFAULT_VERTEX_COUNT: usize = 100;
/// Minimum perimeter vertex count; anything smaller cannot be
/// fan-triangulated.
pub const MIN_VERTEX_COUNT: usize = 3;

/// Squared-distance floor below which a vertex is treated as coincident
/// with the influencing drop's center.
const MARBLE_EPS: f64 = 1e-12;
/// Cap on the marble radial scale factor, bounding worst-case stretching.
const MAX_MARBLE_SCALE: f64 = 6.0;
/// Perpendicular jitter applied after marbling, as a fraction of the
/// influencing drop's radius. Breaks exact vertex coincidence that would
/// otherwise produce zero-area fan triangles after repeated marbling.
const MARBLE_JITTER: f64 = 0.0005;
/// Temporal scale for the edge-noise field.
const NOISE_TIME_SCALE: f64 = 0.35;
/// Harmonic count bounds for shape animation.
const MAX_HARMONICS: u32 = 5;
/// Influence-radius floor for the vertical tine.
const TINE_MIN_RADIUS: f64 = 8.0;
/// Influence-radius cap for the vertical tine, as a multiple of the drop
/// radius.
const TINE_MAX_RADIUS_FACTOR: f64 = 2.5;
/// Cumulative-displacement cap factors: `max(0.65 * radius, 1.2 * strength)`.
const TINE_CAP_RADIUS_FACTOR: f64 = 0.65;
const TINE_CAP_STRENGTH_FACTOR: f64 = 1.2;
/// Blend factor for the one-pass Laplacian y-smoothing after a tine stroke.
const TINE_SMOOTH_FACTOR: f64 = 0.25;
/// Strength below which a tine call is a no-op.
const TINE_MIN_STRENGTH: f64 = 1e-5;
/// Per-vertex displacements below this are discarded as negligible.
const TINE_MIN_DISPLACEMENT: f64 = 5e-4;
/// Fraction of the mean tine displacement applied to `center.y` so later
/// radial deformations stay coherent with the dragged shape.
const TINE_CENTER_BIAS: f64 = 0.2;

/// Construction parameters for an [`InkDrop`].
#[derive(Debug, Clone, Copy)]
pub struct DropConfig {
    /// Nominal initial radius; the scale reference for every later
    /// deformation amplitude.
    pub radius: f64,
    /// Number of perimeter vertices.
    pub vertex_count: usize,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            vertex_count: DEFAULT_VERTEX_COUNT,
        }
    }
}

impl DropConfig {
    /// Extracts a config from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            radius: param_f64(params, "radius", DEFAULT_RADIUS),
            vertex_count: param_usize(params, "vertex_count", DEFAULT_VERTEX_COUNT),
        }
    }
}

/// One deformable polygon of ink.
///
/// The polygon always has exactly `vertex_count` distinct vertices, with no
/// duplicated closing vertex (a duplicate degenerates into a zero-area fan
/// triangle once the outline is heavily distorted). `base_vertices` holds
/// the reference shape that the per-frame animation operations displace
/// *from*, so repeated relative deformation never compounds float error.
#[derive(Debug, Clone)]
pub struct InkDrop {
    center: DVec2,
    radius: f64,
    vertex_count: usize,
    vertices: Vec<DVec2>,
    base_vertices: Vec<DVec2>,
    color: Rgba,
    blend: Option<ColorBlend>,
}

impl InkDrop {
    /// Creates a regular `vertex_count`-gon of the given radius around
    /// `center`, with `base_vertices` an exact copy.
    ///
    /// Errors on `vertex_count < 3` or a non-finite/non-positive radius.
    pub fn new(
        center: DVec2,
        color: Rgba,
        radius: f64,
        vertex_count: usize,
    ) -> Result<Self, MarblingError> {
        if vertex_count < MIN_VERTEX_COUNT {
            return Err(MarblingError::InvalidVertexCount { got: vertex_count });
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MarblingError::InvalidRadius(radius));
        }
        let vertices: Vec<DVec2> = (0..vertex_count)
            .map(|i| {
                let angle = TAU * i as f64 / vertex_count as f64;
                center + DVec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect();
        Ok(Self {
            center,
            radius,
            vertex_count,
            base_vertices: vertices.clone(),
            vertices,
            color,
            blend: None,
        })
    }

    /// Creates a drop from a [`DropConfig`].
    pub fn with_config(center: DVec2, color: Rgba, config: &DropConfig) -> Result<Self, MarblingError> {
        Self::new(center, color, config.radius, config.vertex_count)
    }

    // -- Read accessors (the surface a rasterizer consumes) --

    /// Current outline, ordered, length == `vertex_count`.
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    /// Current center. Tracks the vertex centroid after marbling.
    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Nominal construction radius (fixed for the drop's lifetime).
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Perimeter vertex count (fixed for the drop's lifetime).
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Current displayed color.
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// True while a gradual color blend is in progress.
    pub fn has_target_color(&self) -> bool {
        self.blend.is_some()
    }

    /// Accumulated blend fraction, if a blend is in progress.
    pub fn blend_progress(&self) -> Option<f64> {
        self.blend.as_ref().map(ColorBlend::progress)
    }

    // -- Base-shape management --

    /// Copies the current vertices into the base shape. Call after a
    /// permanent geometry change so the per-frame animation displaces
    /// from the new outline.
    pub fn commit_base(&mut self) {
        self.base_vertices.clear();
        self.base_vertices.extend_from_slice(&self.vertices);
    }

    /// Restores the current vertices from the base shape. Idempotent.
    pub fn reset_to_base(&mut self) {
        if self.base_vertices.len() == self.vertices.len() {
            self.vertices.copy_from_slice(&self.base_vertices);
        }
    }

    /// Re-syncs `base_vertices` from `vertices` when the lengths disagree.
    fn sync_base(&mut self) {
        if self.base_vertices.len() != self.vertices.len() {
            self.base_vertices.clear();
            self.base_vertices.extend_from_slice(&self.vertices);
        }
    }

    // -- Marble transform --

    /// Warps this drop's outline in response to `other` being dropped into
    /// the bath. Reads only the other drop's center and radius.
    pub fn marble(&mut self, other: &InkDrop, commit_base: bool) {
        self.marble_at(other.center, other.radius, commit_base);
    }

    /// Marble displacement away from an influence at `c` with radius `r`.
    ///
    /// Each vertex `p` moves radially: with `d = p - c` and `m = |d|`, the
    /// new distance is `m + r^2 / (m + r)`, a smooth rational mapping that
    /// approaches `m` for large `m` and stays bounded as `m -> 0`. The
    /// radial scale is capped at 6; a vertex sitting on `c` itself is
    /// pushed out along +x by `r` instead of dividing by zero. A tiny
    /// perpendicular jitter keeps adjacent vertices from coinciding after
    /// repeated marbling.
    ///
    /// Afterwards `center` is recomputed as the vertex centroid: later
    /// radial deformations measure angle and radius from `center`, and a
    /// stale center shows up as visibly uneven stretching. With
    /// `commit_base` the warped outline becomes the new base shape;
    /// callers chaining several marbles before the next animation frame
    /// should commit only on the last one.
    pub fn marble_at(&mut self, c: DVec2, r: f64, commit_base: bool) {
        for vertex in &mut self.vertices {
            let d = *vertex - c;
            let m2 = d.length_squared();
            if m2 < MARBLE_EPS {
                *vertex = c + DVec2::X * r;
                continue;
            }
            let m = m2.sqrt();
            let new_dist = m + (r * r) / (m + r);
            let scale = (new_dist / m).min(MAX_MARBLE_SCALE);
            let angle = d.y.atan2(d.x);
            let jitter = MARBLE_JITTER * r;
            let perp = DVec2::new((angle + FRAC_PI_2).cos(), (angle + FRAC_PI_2).sin());
            *vertex = c + d * scale + perp * jitter;
        }
        self.center = centroid(&self.vertices);
        if commit_base {
            self.commit_base();
        }
    }

    // -- Per-frame edge animation --

    /// Perturbs the outline radius with smooth 2-D value noise sampled at
    /// `(normalized angle * frequency, time * 0.35)`.
    ///
    /// Base-relative: displaces from `base_vertices`, so the perturbation
    /// is stable for a given `time` and never accumulates. `amplitude` is
    /// a fraction of the drop radius.
    pub fn apply_edge_noise(&mut self, amplitude: f64, frequency: f64, time: f64) {
        self.sync_base();
        let amp = self.radius * amplitude;
        for i in 0..self.vertices.len() {
            let d = self.base_vertices[i] - self.center;
            let angle = d.y.atan2(d.x);
            let angle_norm = (angle + PI) / TAU;
            let n = value_noise_2d(angle_norm * frequency, time * NOISE_TIME_SCALE);
            let n = n * 2.0 - 1.0;
            let nr = d.length() + n * amp;
            self.vertices[i] = self.center + DVec2::new(angle.cos(), angle.sin()) * nr;
        }
    }

    /// Ripples the outline with a sum of sine harmonics (count clamped to
    /// 1..=5), each phase-shifted by `time * speed * (0.4 + 0.2h)` and
    /// weighted `1/h`, scaled by `amplitude * radius / harmonics`.
    ///
    /// Base-relative like [`apply_edge_noise`](Self::apply_edge_noise);
    /// when both run in the same frame the later call's output replaces
    /// the earlier one's, so apply them in a fixed order each frame.
    pub fn animate_shape(&mut self, time: f64, amplitude: f64, speed: f64, harmonics: u32) {
        self.sync_base();
        let harmonics = harmonics.clamp(1, MAX_HARMONICS);
        let amp = self.radius * amplitude;
        for i in 0..self.vertices.len() {
            let d = self.base_vertices[i] - self.center;
            let angle = d.y.atan2(d.x);
            let mut deform = 0.0;
            for h in 1..=harmonics {
                let h = f64::from(h);
                deform += (angle * h + time * speed * (0.4 + 0.2 * h)).sin() / h;
            }
            deform *= amp / f64::from(harmonics);
            let nr = d.length() + deform;
            self.vertices[i] = self.center + DVec2::new(angle.cos(), angle.sin()) * nr;
        }
    }

    // -- Vertical tine --

    /// Drags a vertical tine (comb tooth) through the drop at horizontal
    /// position `x`, displacing nearby vertices by up to `strength`
    /// downward (upward for negative strength). Cumulative: unlike the
    /// per-frame animation this does not reset to the base shape.
    ///
    /// `sharpness` sets the influence radius, clamped to
    /// `[8, 2.5 * radius]`, and sharpens the falloff peak via a weight
    /// exponent in [1, 3]. The falloff itself is a quintic smoothstep;
    /// displacement saturates with quintic-eased diminishing returns
    /// against a cap of `max(0.65 * radius, 1.2 * strength)` measured
    /// against the base shape. One pass of Laplacian y-smoothing (factor
    /// 0.25) over the affected band removes the ridge at the stroke
    /// center, and `center.y` follows 20% of the mean displacement.
    ///
    /// No-op when `|strength| < 1e-5` or no vertex lies inside the
    /// influence radius.
    pub fn apply_vertical_tine(&mut self, x: f64, strength: f64, sharpness: f64, commit_base: bool) {
        if strength.abs() < TINE_MIN_STRENGTH {
            return;
        }
        let r_eff = sharpness
            .max(TINE_MIN_RADIUS)
            .min(self.radius * TINE_MAX_RADIUS_FACTOR);
        if !self.vertices.iter().any(|v| (v.x - x).abs() < r_eff) {
            return;
        }
        self.sync_base();

        let weight_exp = 1.0 + sharpness.clamp(1.0, 512.0) / 512.0 * 2.0;
        let cumulative_cap = (self.radius * TINE_CAP_RADIUS_FACTOR)
            .max(strength * TINE_CAP_STRENGTH_FACTOR);

        let mut total_delta = 0.0;
        let mut affected = 0usize;
        for i in 0..self.vertices.len() {
            let dx = (self.vertices[i].x - x).abs();
            if dx >= r_eff {
                continue;
            }
            let u = dx / r_eff;
            let w = (1.0 - smootherstep(u)).max(0.0).powf(weight_exp);
            if w < 1e-4 {
                continue;
            }
            let mut disp = strength * w;
            // Diminishing returns: ease the remaining allowed displacement
            // for vertices already dragged below their base position.
            let already = self.vertices[i].y - self.base_vertices[i].y;
            if already > 0.0 {
                let remaining = 1.0 - already / cumulative_cap;
                if remaining <= 0.0 {
                    continue; // saturated
                }
                disp *= smootherstep(remaining);
            }
            if disp.abs() < TINE_MIN_DISPLACEMENT {
                continue;
            }
            self.vertices[i].y += disp;
            total_delta += disp;
            affected += 1;
        }

        if affected > 3 && self.vertices.len() > 4 {
            self.smooth_band_y(x, r_eff);
        }

        if affected > 0 {
            self.center.y += (total_delta / affected as f64) * TINE_CENTER_BIAS;
        }

        if commit_base {
            self.commit_base();
        }
    }

    /// One pass of Laplacian smoothing on vertex y inside the tine band.
    /// Two-phase so every smoothed value reads the same pre-smoothing
    /// neighborhood.
    fn smooth_band_y(&mut self, x: f64, r_eff: f64) {
        let n = self.vertices.len();
        let new_y: Vec<f64> = (0..n)
            .map(|i| {
                let v = self.vertices[i];
                if (v.x - x).abs() >= r_eff {
                    return v.y;
                }
                let prev = self.vertices[(i + n - 1) % n];
                let next = self.vertices[(i + 1) % n];
                let avg = (prev.y + v.y + next.y) / 3.0;
                v.y * (1.0 - TINE_SMOOTH_FACTOR) + avg * TINE_SMOOTH_FACTOR
            })
            .collect();
        for i in 0..n {
            if (self.vertices[i].x - x).abs() < r_eff {
                self.vertices[i].y = new_y[i];
            }
        }
    }

    // -- Color operations --

    /// Starts a gradual blend toward `target`, capped at `max_blend`
    /// (clamped to [0, 1]). Snapshots the current color as the blend
    /// start and resets the accumulator.
    pub fn set_target_color(&mut self, target: Rgba, max_blend: f64) {
        self.blend = Some(ColorBlend::new(self.color, target, max_blend));
    }

    /// Advances the gradual blend by `step` (clamped to [0, 0.2]) and
    /// updates the displayed color. No-op when no blend is active; the
    /// blend deactivates itself on reaching its cap.
    pub fn update_color(&mut self, step: f64) {
        if let Some(blend) = self.blend.as_mut() {
            self.color = blend.advance(step);
            if !blend.is_active() {
                self.blend = None;
            }
        }
    }

    /// Instantaneous one-shot lerp of the displayed color toward `target`
    /// by `t` (clamped to [0, 1]). Does not touch the gradual-blend state.
    pub fn blend_color(&mut self, target: Rgba, t: f64) {
        self.color = self.color.lerp(target, t);
    }

    /// Overwrites the alpha channel.
    pub fn set_alpha(&mut self, a: u8) {
        self.color = self.color.with_alpha(a);
    }
}

/// Arithmetic centroid of a vertex set.
fn centroid(vertices: &[DVec2]) -> DVec2 {
    let sum: DVec2 = vertices.iter().copied().sum();
    sum / vertices.len() as f64
}
