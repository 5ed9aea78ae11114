//! Software backend adapter.
//!
//! Rasterizes the command stream into a `tiny_skia::Pixmap` on the CPU — the
//! same dispatcher, the same meshes, no GPU. Used headless (frame dumps,
//! golden tests) and as the reference for what the wgpu backend should
//! produce.
//!
//! Limitation: tiny-skia has no per-vertex color interpolation, so a mesh
//! triangle is filled flat with the average of its three vertex colors. Solid
//! geometry is exact; the one-pixel anti-aliasing fringe renders as a stepped
//! band instead of a gradient.

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use tiny_skia::{
    FillRule, FilterQuality, IntSize, Mask, Paint, PathBuilder, Pixmap, PixmapPaint,
    PremultipliedColorU8, Transform,
};

use crate::coords::{Rect, Vec2};
use crate::mesh::Mesh;
use crate::paint::Color;
use crate::text::{FontId, FontSystem};
use crate::textures::{TextureId, TextureStore};

use super::Backend;

fn to_skia(color: Color) -> tiny_skia::Color {
    let c = color.clamped();
    tiny_skia::Color::from_rgba(c.r, c.g, c.b, c.a).unwrap_or(tiny_skia::Color::TRANSPARENT)
}

/// CPU adapter drawing into an owned pixmap.
///
/// Borrows the Resource Owner's fonts and textures read-only for its
/// lifetime; one instance renders one or more frames into the same pixmap.
pub struct SoftwareBackend<'a> {
    pixmap: Pixmap,
    clip: Option<Rect>,
    mask: Option<Mask>,
    fonts: &'a FontSystem,
    textures: &'a TextureStore,
    warned_missing_font: bool,
    warned_missing_texture: bool,
}

impl<'a> SoftwareBackend<'a> {
    /// Creates a backend with a `width` × `height` target pixmap.
    ///
    /// Returns `None` for a zero-sized target.
    pub fn new(
        width: u32,
        height: u32,
        fonts: &'a FontSystem,
        textures: &'a TextureStore,
    ) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            clip: None,
            mask: None,
            fonts,
            textures,
            warned_missing_font: false,
            warned_missing_texture: false,
        })
    }

    /// Fills the whole target, ignoring the clip. Call once per frame before
    /// dispatching.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(to_skia(color));
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    fn blit_coverage(
        &mut self,
        left: i32,
        top: i32,
        width: usize,
        height: usize,
        coverage: &[u8],
        color: Color,
    ) {
        let pm_w = self.pixmap.width() as i32;
        let pm_h = self.pixmap.height() as i32;
        let clip = self.clip;
        let color = color.clamped();
        let pixels = self.pixmap.pixels_mut();

        for row in 0..height as i32 {
            let py = top + row;
            if py < 0 || py >= pm_h {
                continue;
            }
            for col in 0..width as i32 {
                let px = left + col;
                if px < 0 || px >= pm_w {
                    continue;
                }
                if let Some(c) = clip {
                    if !c.contains(Vec2::new(px as f32 + 0.5, py as f32 + 0.5)) {
                        continue;
                    }
                }

                let cov = coverage[row as usize * width + col as usize] as f32 / 255.0;
                let sa = color.a * cov;
                if sa <= 0.0 {
                    continue;
                }

                // Source-over in premultiplied space.
                let idx = (py * pm_w + px) as usize;
                let dst = pixels[idx];
                let inv = 1.0 - sa;
                let r = color.r * sa + dst.red() as f32 / 255.0 * inv;
                let g = color.g * sa + dst.green() as f32 / 255.0 * inv;
                let b = color.b * sa + dst.blue() as f32 / 255.0 * inv;
                let a = sa + dst.alpha() as f32 / 255.0 * inv;

                let a8 = (a * 255.0 + 0.5) as u8;
                let quant = |v: f32| ((v * 255.0 + 0.5) as u8).min(a8);
                if let Some(out) = PremultipliedColorU8::from_rgba(quant(r), quant(g), quant(b), a8)
                {
                    pixels[idx] = out;
                }
            }
        }
    }
}

impl Backend for SoftwareBackend<'_> {
    fn draw_mesh(&mut self, mesh: &Mesh) {
        let mut paint = Paint::default();
        // The mesh carries its own fringe; path-edge anti-aliasing would
        // double up along the silhouette and crack along shared edges.
        paint.anti_alias = false;

        for tri in &mesh.triangles {
            let [a, b, c] = tri.map(|i| mesh.vertices[i as usize]);

            let color = Color::new(
                (a.color[0] + b.color[0] + c.color[0]) / 3.0,
                (a.color[1] + b.color[1] + c.color[1]) / 3.0,
                (a.color[2] + b.color[2] + c.color[2]) / 3.0,
                (a.color[3] + b.color[3] + c.color[3]) / 3.0,
            );
            if color.a <= 0.0 {
                continue;
            }

            let mut pb = PathBuilder::new();
            pb.move_to(a.pos[0], a.pos[1]);
            pb.line_to(b.pos[0], b.pos[1]);
            pb.line_to(c.pos[0], c.pos[1]);
            pb.close();
            let Some(path) = pb.finish() else { continue };

            paint.set_color(to_skia(color));
            self.pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                self.mask.as_ref(),
            );
        }
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        let r = rect.normalized();
        if r.is_empty() {
            return;
        }
        let Some(sk) = tiny_skia::Rect::from_xywh(r.origin.x, r.origin.y, r.size.x, r.size.y)
        else {
            return;
        };

        let mut paint = Paint::default();
        paint.anti_alias = false;
        paint.set_color(to_skia(color));
        self.pixmap
            .fill_rect(sk, &paint, Transform::identity(), self.mask.as_ref());
    }

    fn draw_text(&mut self, origin: Vec2, font: FontId, size: f32, color: Color, text: &str) {
        let Some(face) = self.fonts.get(font) else {
            if !self.warned_missing_font {
                log::warn!("unknown {font:?}, skipping its text runs");
                self.warned_missing_font = true;
            }
            return;
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings {
            x: origin.x,
            y: origin.y,
            ..LayoutSettings::default()
        });
        layout.append(&[face], &TextStyle::new(text, size, 0));

        // Collect before blitting; `blit_coverage` needs `&mut self`.
        let placed: Vec<_> = layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y))
            .collect();

        for (key, x, y) in placed {
            let (metrics, bitmap) = face.rasterize_config(key);
            if metrics.width == 0 || metrics.height == 0 {
                continue;
            }
            self.blit_coverage(
                x.round() as i32,
                y.round() as i32,
                metrics.width,
                metrics.height,
                &bitmap,
                color,
            );
        }
    }

    fn draw_image(&mut self, texture: TextureId, dest: Rect) {
        let Some(data) = self.textures.get(texture) else {
            if !self.warned_missing_texture {
                log::warn!("unknown {texture:?}, skipping its image draws");
                self.warned_missing_texture = true;
            }
            return;
        };

        let dest = dest.normalized();
        if dest.is_empty() {
            return;
        }

        // tiny-skia pixmaps are premultiplied; the store is straight alpha.
        let mut bytes = data.pixels().to_vec();
        for px in bytes.chunks_exact_mut(4) {
            let a = px[3] as u16;
            px[0] = (px[0] as u16 * a / 255) as u8;
            px[1] = (px[1] as u16 * a / 255) as u8;
            px[2] = (px[2] as u16 * a / 255) as u8;
        }
        let Some(size) = IntSize::from_wh(data.width(), data.height()) else { return };
        let Some(src) = Pixmap::from_vec(bytes, size) else { return };

        let sx = dest.size.x / data.width() as f32;
        let sy = dest.size.y / data.height() as f32;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, dest.origin.x, dest.origin.y);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, src.as_ref(), &paint, transform, self.mask.as_ref());
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
        self.mask = clip.and_then(|r| {
            let r = r.normalized();
            let sk = tiny_skia::Rect::from_xywh(r.origin.x, r.origin.y, r.size.x, r.size.y)?;
            let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height())?;
            mask.fill_path(
                &PathBuilder::from_rect(sk),
                FillRule::Winding,
                false,
                Transform::identity(),
            );
            Some(mask)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_resources() -> (FontSystem, TextureStore) {
        (FontSystem::new(), TextureStore::new())
    }

    fn px(backend: &SoftwareBackend<'_>, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let p = backend.pixmap().pixel(x, y).unwrap();
        (p.red(), p.green(), p.blue(), p.alpha())
    }

    #[test]
    fn rect_fill_covers_interior_only() {
        let (fonts, textures) = empty_resources();
        let mut backend = SoftwareBackend::new(10, 10, &fonts, &textures).unwrap();
        backend.clear(Color::BLACK);
        backend.draw_rect(Rect::new(2.0, 2.0, 4.0, 4.0), Color::new(1.0, 0.0, 0.0, 1.0));

        assert_eq!(px(&backend, 3, 3), (255, 0, 0, 255));
        assert_eq!(px(&backend, 0, 0), (0, 0, 0, 255));
        assert_eq!(px(&backend, 8, 8), (0, 0, 0, 255));
    }

    #[test]
    fn clip_suppresses_drawing_outside() {
        let (fonts, textures) = empty_resources();
        let mut backend = SoftwareBackend::new(10, 10, &fonts, &textures).unwrap();
        backend.clear(Color::BLACK);

        backend.set_clip(Some(Rect::new(0.0, 0.0, 2.0, 2.0)));
        backend.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(px(&backend, 1, 1), (255, 0, 0, 255));
        assert_eq!(px(&backend, 5, 5), (0, 0, 0, 255));

        backend.set_clip(None);
        backend.draw_rect(Rect::new(4.0, 4.0, 2.0, 2.0), Color::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(px(&backend, 5, 5), (0, 255, 0, 255));
    }

    #[test]
    fn mesh_triangle_rasterizes_flat() {
        let (fonts, textures) = empty_resources();
        let mut backend = SoftwareBackend::new(8, 8, &fonts, &textures).unwrap();
        backend.clear(Color::BLACK);

        let mut mesh = Mesh::default();
        let blue = Color::new(0.0, 0.0, 1.0, 1.0);
        let a = mesh.push_vertex(Vec2::new(0.0, 0.0), blue);
        let b = mesh.push_vertex(Vec2::new(8.0, 0.0), blue);
        let c = mesh.push_vertex(Vec2::new(0.0, 8.0), blue);
        mesh.push_triangle(a, b, c);
        backend.draw_mesh(&mesh);

        assert_eq!(px(&backend, 1, 1), (0, 0, 255, 255));
        // Far corner lies outside the triangle.
        assert_eq!(px(&backend, 7, 7), (0, 0, 0, 255));
    }

    #[test]
    fn dispatched_rounded_rect_reaches_the_pixels() {
        use crate::coords::CornerRadius;
        use crate::render::Dispatcher;
        use crate::scene::CommandList;

        let (fonts, textures) = empty_resources();
        let mut backend = SoftwareBackend::new(64, 64, &fonts, &textures).unwrap();
        backend.clear(Color::BLACK);

        let mut list = CommandList::new();
        list.push_rectangle(
            Rect::new(8.0, 8.0, 48.0, 48.0),
            Color::new(1.0, 0.0, 0.0, 1.0),
            CornerRadius::all(12.0),
        );
        Dispatcher::new().dispatch(&mut backend, list.commands());

        // Center is solid fill; the rect's sharp corner is rounded away.
        assert_eq!(px(&backend, 32, 32), (255, 0, 0, 255));
        assert_eq!(px(&backend, 9, 9), (0, 0, 0, 255));
        assert_eq!(px(&backend, 0, 0), (0, 0, 0, 255));
    }

    #[test]
    fn image_stretches_over_destination() {
        let fonts = FontSystem::new();
        let mut textures = TextureStore::new();
        let id = textures.add_rgba8(1, 1, vec![0, 0, 255, 255]).unwrap();

        let mut backend = SoftwareBackend::new(8, 8, &fonts, &textures).unwrap();
        backend.clear(Color::BLACK);
        backend.draw_image(id, Rect::new(0.0, 0.0, 4.0, 4.0));

        assert_eq!(px(&backend, 1, 1), (0, 0, 255, 255));
        assert_eq!(px(&backend, 6, 6), (0, 0, 0, 255));
    }
}
