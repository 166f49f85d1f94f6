//! Geometry export for a downstream rasterizer.
//!
//! The bath's read surface (per drop: center, radius, color, ordered
//! outline) serialized as JSON. One-way: nothing here is ever read back
//! into a live drop.

use crate::bath::Bath;
use crate::drop::InkDrop;
use marbling_core::error::MarblingError;
use serde_json::{json, Value};
use std::path::Path;

/// Serializes the bath's current geometry and colors.
pub fn bath_to_json(bath: &Bath) -> Value {
    let drops: Vec<Value> = bath.drops().iter().map(drop_to_json).collect();
    json!({ "drops": drops })
}

fn drop_to_json(drop: &InkDrop) -> Value {
    let vertices: Vec<Value> = drop
        .vertices()
        .iter()
        .map(|v| json!([v.x, v.y]))
        .collect();
    json!({
        "center": [drop.center().x, drop.center().y],
        "radius": drop.radius(),
        "color": drop.color(),
        "vertices": vertices,
    })
}

/// Writes the bath's geometry as pretty-printed JSON.
///
/// Returns `MarblingError::Io` on serialization or write failure.
pub fn write_json(bath: &Bath, path: &Path) -> Result<(), MarblingError> {
    let text = serde_json::to_string_pretty(&bath_to_json(bath))
        .map_err(|e| MarblingError::Io(e.to_string()))?;
    std::fs::write(path, text).map_err(|e| MarblingError::Io(e.to_string()))
}
