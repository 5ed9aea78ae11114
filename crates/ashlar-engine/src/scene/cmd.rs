use crate::coords::{BorderWidths, CornerRadius, Rect};
use crate::paint::Color;
use crate::text::FontId;
use crate::textures::TextureId;

/// One instruction in a frame's draw stream.
///
/// Every command carries its bounding box in screen pixels; the payload
/// selects what gets drawn inside (or, for the clip markers, how subsequent
/// commands are scoped).
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub bounds: Rect,
    pub data: CommandData,
}

/// Per-command render payload.
///
/// Extending the stream:
/// - add a new variant here
/// - add a push helper on [`CommandList`](crate::scene::CommandList)
/// - handle the variant in [`Dispatcher::dispatch`](crate::render::Dispatcher)
///
/// The enum is non-exhaustive so a dispatcher built against an older payload
/// set skips commands it does not know instead of failing the frame.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CommandData {
    /// Solid fill; rounded when the corner radius is non-zero.
    Rectangle {
        color: Color,
        corner_radius: CornerRadius,
    },
    /// Text run, laid out from the bounding box's top-left corner.
    Text {
        font: FontId,
        size: f32,
        color: Color,
        text: String,
    },
    /// Stroked outline with per-side widths and per-corner radii.
    Border {
        radii: CornerRadius,
        widths: BorderWidths,
        color: Color,
    },
    /// Texture stretched over the bounding box.
    Image { texture: TextureId },
    /// Restricts subsequent drawing to the bounding box.
    ClipStart,
    /// Lifts the active clip restriction.
    ClipEnd,
}
