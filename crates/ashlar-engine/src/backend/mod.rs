//! Backend adapters: the thin binding between the command dispatcher and a
//! concrete drawing surface.
//!
//! The contract is intentionally small and stable — five calls. Anything that
//! can field them (GPU renderer, software rasterizer, recording test double)
//! can sit behind the dispatcher unchanged.

pub mod gpu;
pub mod software;

pub use gpu::WgpuBackend;
pub use software::SoftwareBackend;

use crate::coords::{Rect, Vec2};
use crate::mesh::Mesh;
use crate::paint::Color;
use crate::text::FontId;
use crate::textures::TextureId;

/// Drawing-surface contract consumed by [`crate::render::Dispatcher`].
///
/// Calls arrive strictly in paint order. Implementations may batch internally
/// but must not let later calls overtake earlier ones on screen.
pub trait Backend {
    /// Draws a triangle mesh produced by the geometry builder. Vertex colors
    /// are straight-alpha RGBA; blending is SrcAlpha/OneMinusSrcAlpha.
    fn draw_mesh(&mut self, mesh: &Mesh);

    /// Fills an axis-aligned rectangle with a solid color.
    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Draws a text run with its top-left corner at `origin`. Shaping and
    /// rasterization are the backend's concern.
    fn draw_text(&mut self, origin: Vec2, font: FontId, size: f32, color: Color, text: &str);

    /// Stretches the referenced texture over `dest`.
    fn draw_image(&mut self, texture: TextureId, dest: Rect);

    /// Restricts subsequent drawing to `clip` (whole pixels), or lifts the
    /// restriction when `None`.
    fn set_clip(&mut self, clip: Option<Rect>);
}
