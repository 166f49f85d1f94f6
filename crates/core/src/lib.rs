#![deny(unsafe_code)]
//! Core types for the marbling engine.
//!
//! Provides the `Rgba` color type, `Palette`, the deterministic 2-D value
//! noise field used for edge animation, easing curves, the `Xorshift64`
//! PRNG, and JSON parameter helpers.

pub mod color;
pub mod ease;
pub mod error;
pub mod noise;
pub mod palette;
pub mod params;
pub mod prng;

pub use color::Rgba;
pub use error::MarblingError;
pub use palette::Palette;
pub use prng::Xorshift64;
