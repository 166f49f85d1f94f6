#![deny(unsafe_code)]
//! Deformable ink-drop engine for suminagashi-style marbling.
//!
//! An [`InkDrop`] owns one convex polygon's geometry (current and base
//! vertices) plus its color state. Dropping new ink into a [`Bath`] warps
//! every earlier drop through the marble transform; each frame the drop
//! outlines are re-animated from their base shape with value noise and
//! harmonic waves, and an optional vertical tine drag deforms them
//! cumulatively. Rasterization of the resulting polygons is the caller's
//! concern; [`snapshot`] exports the geometry as JSON for that purpose.

pub mod bath;
pub mod blend;
pub mod drop;
pub mod snapshot;

pub use bath::{AnimationParams, Bath};
pub use blend::ColorBlend;
pub use drop::{DropConfig, InkDrop};
