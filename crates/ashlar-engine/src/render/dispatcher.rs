use crate::backend::Backend;
use crate::coords::Rect;
use crate::scene::{CommandData, DrawCommand};
use crate::tessellate::{fill_rounded_rect, stroke_rounded_border};

/// Walks one frame's command list and routes each command to the backend.
///
/// The dispatcher owns the only piece of state that crosses commands: the
/// active clip rectangle. `ClipStart` overwrites it, `ClipEnd` clears it —
/// the command producer guarantees balanced markers and never needs nesting
/// deeper than one, so no stack is kept. Dispatch cost is O(1) per command
/// plus O(segments) for rounded shapes.
#[derive(Debug, Default)]
pub struct Dispatcher {
    clip: Option<Rect>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active clip rectangle after the most recent dispatch step.
    pub fn clip(&self) -> Option<Rect> {
        self.clip
    }

    /// Renders one frame's command list, strictly in order.
    ///
    /// Commands arrive back-to-front from the layout engine; skipping or
    /// reordering any of them would break visual stacking and clip scoping,
    /// so the only command that is ever dropped is an unknown payload (which
    /// is logged and skipped without aborting the frame).
    pub fn dispatch<B: Backend>(&mut self, backend: &mut B, commands: &[DrawCommand]) {
        // Every frame starts unclipped regardless of how the previous stream
        // ended.
        self.clip = None;
        backend.set_clip(None);

        for command in commands {
            let bounds = command.bounds;

            match &command.data {
                CommandData::Rectangle { color, corner_radius } => {
                    // The fill path uses a single radius for all corners; the
                    // producer signals rounding through the top-left value.
                    if corner_radius.top_left > 0.0 {
                        let mesh = fill_rounded_rect(bounds, corner_radius.top_left, *color);
                        backend.draw_mesh(&mesh);
                    } else {
                        backend.draw_rect(bounds, *color);
                    }
                }

                CommandData::Text { font, size, color, text } => {
                    backend.draw_text(bounds.origin, *font, *size, *color, text);
                }

                CommandData::Border { radii, widths, color } => {
                    let mesh = stroke_rounded_border(bounds, *radii, *widths, *color);
                    backend.draw_mesh(&mesh);
                }

                CommandData::Image { texture } => {
                    backend.draw_image(*texture, bounds);
                }

                CommandData::ClipStart => {
                    self.clip = Some(bounds.rounded_to_pixels());
                    backend.set_clip(self.clip);
                }

                CommandData::ClipEnd => {
                    self.clip = None;
                    backend.set_clip(None);
                }

                // `CommandData` is non-exhaustive; payloads added after this
                // dispatcher was written are skipped, not fatal.
                #[allow(unreachable_patterns)]
                other => log::warn!("skipping unknown draw command: {other:?}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{BorderWidths, CornerRadius, Vec2};
    use crate::paint::Color;
    use crate::scene::CommandList;
    use crate::text::FontId;
    use crate::textures::TextureId;

    /// Headless test double: records every backend call in order.
    #[derive(Debug, Default)]
    struct RecordingBackend {
        events: Vec<Event>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Mesh { vertices: usize, triangles: usize },
        Rect(Rect, Color),
        Text { origin: Vec2, size: f32, text: String },
        Image(TextureId, Rect),
        Clip(Option<Rect>),
    }

    impl Backend for RecordingBackend {
        fn draw_mesh(&mut self, mesh: &crate::mesh::Mesh) {
            assert!(mesh.indices_in_bounds());
            self.events.push(Event::Mesh {
                vertices: mesh.vertex_count(),
                triangles: mesh.triangle_count(),
            });
        }

        fn draw_rect(&mut self, rect: Rect, color: Color) {
            self.events.push(Event::Rect(rect, color));
        }

        fn draw_text(
            &mut self,
            origin: Vec2,
            _font: FontId,
            size: f32,
            _color: Color,
            text: &str,
        ) {
            self.events.push(Event::Text { origin, size, text: text.to_owned() });
        }

        fn draw_image(&mut self, texture: TextureId, dest: Rect) {
            self.events.push(Event::Image(texture, dest));
        }

        fn set_clip(&mut self, clip: Option<Rect>) {
            self.events.push(Event::Clip(clip));
        }
    }

    fn red() -> Color {
        Color::from_srgb_u8(255, 0, 0, 255)
    }

    // ── routing ───────────────────────────────────────────────────────────

    #[test]
    fn sharp_rectangle_takes_the_direct_path() {
        let mut list = CommandList::new();
        let bounds = Rect::new(0.0, 0.0, 50.0, 20.0);
        list.push_rectangle(bounds, red(), CornerRadius::zero());

        let mut backend = RecordingBackend::default();
        Dispatcher::new().dispatch(&mut backend, list.commands());

        assert_eq!(
            backend.events,
            vec![Event::Clip(None), Event::Rect(bounds, red())]
        );
    }

    #[test]
    fn rounded_rectangle_becomes_one_mesh() {
        let mut list = CommandList::new();
        list.push_rectangle(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            red(),
            CornerRadius::all(10.0),
        );

        let mut backend = RecordingBackend::default();
        Dispatcher::new().dispatch(&mut backend, list.commands());

        assert!(matches!(backend.events[1], Event::Mesh { .. }));
        assert_eq!(backend.events.len(), 2);
    }

    // ── clip discipline ───────────────────────────────────────────────────

    #[test]
    fn clip_start_then_end_restores_no_clip() {
        let mut list = CommandList::new();
        list.push_clip_start(Rect::new(10.0, 10.0, 50.0, 50.0));
        list.push_clip_end();

        let mut backend = RecordingBackend::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.dispatch(&mut backend, list.commands());

        assert_eq!(dispatcher.clip(), None);
        assert_eq!(
            backend.events,
            vec![
                Event::Clip(None),
                Event::Clip(Some(Rect::new(10.0, 10.0, 50.0, 50.0))),
                Event::Clip(None),
            ]
        );
    }

    #[test]
    fn consecutive_clip_starts_overwrite_without_stacking() {
        let mut list = CommandList::new();
        list.push_clip_start(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip_start(Rect::new(20.0, 20.0, 30.0, 30.0));

        let mut backend = RecordingBackend::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.dispatch(&mut backend, list.commands());

        // The second ClipStart replaced the first; a single ClipEnd would
        // clear straight to "none".
        assert_eq!(dispatcher.clip(), Some(Rect::new(20.0, 20.0, 30.0, 30.0)));
    }

    #[test]
    fn clip_bounds_are_rounded_to_whole_pixels() {
        let mut list = CommandList::new();
        list.push_clip_start(Rect::new(10.4, 10.6, 49.7, 50.2));

        let mut backend = RecordingBackend::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.dispatch(&mut backend, list.commands());

        assert_eq!(dispatcher.clip(), Some(Rect::new(10.0, 11.0, 50.0, 50.0)));
    }

    // ── end-to-end ────────────────────────────────────────────────────────

    #[test]
    fn frame_dispatches_in_paint_order() {
        let blue = Color::from_srgb_u8(0, 0, 255, 255);

        let mut list = CommandList::new();
        list.push_rectangle(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            red(),
            CornerRadius::all(10.0),
        );
        list.push_clip_start(Rect::new(10.0, 10.0, 50.0, 50.0));
        list.push_text(
            Rect::new(12.0, 12.0, 40.0, 24.0),
            FontId(0),
            16.0,
            Color::BLACK,
            "hi",
        );
        list.push_clip_end();
        list.push_border(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            CornerRadius::all(5.0),
            BorderWidths::all(2.0),
            blue,
        );

        let mut backend = RecordingBackend::default();
        Dispatcher::new().dispatch(&mut backend, list.commands());

        // frame reset, rect mesh, clip on, text, clip off, border mesh
        assert_eq!(backend.events.len(), 6);
        assert_eq!(backend.events[0], Event::Clip(None));
        assert!(matches!(backend.events[1], Event::Mesh { .. }));
        assert_eq!(
            backend.events[2],
            Event::Clip(Some(Rect::new(10.0, 10.0, 50.0, 50.0)))
        );
        assert!(
            matches!(&backend.events[3], Event::Text { origin, text, .. }
                if *origin == Vec2::new(12.0, 12.0) && text == "hi")
        );
        assert_eq!(backend.events[4], Event::Clip(None));
        assert!(matches!(backend.events[5], Event::Mesh { .. }));
    }

    #[test]
    fn image_command_maps_to_textured_quad() {
        let mut list = CommandList::new();
        let dest = Rect::new(40.0, 40.0, 60.0, 60.0);
        list.push_image(dest, TextureId(3));

        let mut backend = RecordingBackend::default();
        Dispatcher::new().dispatch(&mut backend, list.commands());

        assert_eq!(backend.events[1], Event::Image(TextureId(3), dest));
    }
}
