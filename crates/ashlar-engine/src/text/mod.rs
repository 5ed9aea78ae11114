//! Text: font ownership, measurement, and glyph access for backends.
//!
//! The font store is owned by the application (the Resource Owner) and
//! borrowed read-only by backends for the duration of a draw; the layout
//! engine calls back into [`FontSystem::measure_text`] while computing
//! element sizes.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
