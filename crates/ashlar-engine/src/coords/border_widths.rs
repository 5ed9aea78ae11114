/// Per-side stroke widths for a border (logical pixels).
///
/// Sides may differ; a corner arc interpolates between the widths of the two
/// sides it connects. Negative values are treated as zero by the geometry
/// builder.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BorderWidths {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl BorderWidths {
    #[inline]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Uniform width on all four sides.
    #[inline]
    pub const fn all(w: f32) -> Self {
        Self { top: w, right: w, bottom: w, left: w }
    }
}
