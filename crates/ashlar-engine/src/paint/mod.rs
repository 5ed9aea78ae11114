//! Paint model shared between the scene, the geometry builder, and the
//! backends.
//!
//! Scope in v0 is solid color only; the command model routes everything else
//! (glyph coverage, image sampling) through the backend directly.

mod color;

pub use color::Color;
