//! Geometry builder: converts rounded-rectangle fills and rounded borders
//! into anti-aliased triangle meshes.
//!
//! Both generators are pure functions — identical inputs produce bit-identical
//! meshes — and share one convention: solid geometry is flanked by a fringe
//! band whose outer ring carries the fill color's transparent twin, so the
//! rasterizer's linear interpolation yields a one-pixel alpha ramp along every
//! curved or straight silhouette edge. The fringe half-width is a fixed
//! 0.5 px, independent of DPI.
//!
//! Per-corner data is held in fixed 4-element arrays walked with modular
//! next-corner indexing (TL → TR → BR → BL → TL), which keeps arc generation
//! and seam stitching loop-driven instead of corner-by-corner copy/paste.

mod border;
mod rounded_rect;

pub use border::stroke_rounded_border;
pub use rounded_rect::fill_rounded_rect;

/// Half-width of the anti-aliasing fringe, in logical pixels.
pub(crate) const AA_HALF_WIDTH: f32 = 0.5;
