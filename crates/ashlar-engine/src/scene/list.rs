use crate::coords::{BorderWidths, CornerRadius, Rect};
use crate::paint::Color;
use crate::text::FontId;
use crate::textures::TextureId;

use super::{CommandData, DrawCommand};

/// Recorded draw stream for a frame.
///
/// Commands are kept strictly in insertion order; the producer is expected to
/// emit back-to-front paint order, so no sorting happens here. `clear()`
/// keeps allocated capacity for reuse across frames.
#[derive(Debug, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Commands in insertion (= paint) order.
    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[inline]
    pub fn push(&mut self, bounds: Rect, data: CommandData) {
        self.commands.push(DrawCommand { bounds, data });
    }

    /// Records a solid rectangle; rounded when `corner_radius` is non-zero.
    #[inline]
    pub fn push_rectangle(&mut self, bounds: Rect, color: Color, corner_radius: CornerRadius) {
        self.push(bounds, CommandData::Rectangle { color, corner_radius });
    }

    /// Records a text run anchored at the bounding box's top-left corner.
    #[inline]
    pub fn push_text(
        &mut self,
        bounds: Rect,
        font: FontId,
        size: f32,
        color: Color,
        text: impl Into<String>,
    ) {
        self.push(
            bounds,
            CommandData::Text { font, size, color, text: text.into() },
        );
    }

    /// Records a stroked border.
    #[inline]
    pub fn push_border(
        &mut self,
        bounds: Rect,
        radii: CornerRadius,
        widths: BorderWidths,
        color: Color,
    ) {
        self.push(bounds, CommandData::Border { radii, widths, color });
    }

    /// Records a texture stretched over `bounds`.
    #[inline]
    pub fn push_image(&mut self, bounds: Rect, texture: TextureId) {
        self.push(bounds, CommandData::Image { texture });
    }

    /// Begins a clip region covering `bounds`.
    ///
    /// Must be balanced by [`push_clip_end`](Self::push_clip_end); the
    /// dispatcher tracks a single active clip, not a nesting stack.
    #[inline]
    pub fn push_clip_start(&mut self, bounds: Rect) {
        self.push(bounds, CommandData::ClipStart);
    }

    /// Ends the active clip region.
    #[inline]
    pub fn push_clip_end(&mut self) {
        self.push(Rect::default(), CommandData::ClipEnd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;

    #[test]
    fn commands_preserve_insertion_order() {
        let mut list = CommandList::new();
        list.push_rectangle(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Color::WHITE,
            CornerRadius::zero(),
        );
        list.push_clip_start(Rect::new(1.0, 1.0, 5.0, 5.0));
        list.push_clip_end();

        let kinds: Vec<_> = list
            .commands()
            .iter()
            .map(|c| core::mem::discriminant(&c.data))
            .collect();
        assert_eq!(kinds.len(), 3);
        assert_ne!(kinds[0], kinds[1]);
        assert_ne!(kinds[1], kinds[2]);
    }

    #[test]
    fn clear_empties_the_list() {
        let mut list = CommandList::new();
        list.push_clip_start(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(!list.is_empty());
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn push_text_stores_content_and_bounds() {
        let mut list = CommandList::new();
        let bounds = Rect::from_origin_size(Vec2::new(4.0, 8.0), Vec2::new(120.0, 24.0));
        list.push_text(bounds, FontId(0), 24.0, Color::BLACK, "hello");

        let cmd = &list.commands()[0];
        assert_eq!(cmd.bounds, bounds);
        match &cmd.data {
            CommandData::Text { size, text, .. } => {
                assert_eq!(*size, 24.0);
                assert_eq!(text, "hello");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }
}
