//! wgpu backend adapter.
//!
//! The dispatcher hands this backend meshes, text runs, images and clip
//! changes in paint order. GPU submission wants the opposite shape — few
//! pipeline switches, buffers uploaded before the pass begins — so the
//! adapter records lightweight ops during dispatch and replays them in
//! `flush`: one upload step per pipeline, then a single render pass that
//! walks the ops in recorded order, batching only consecutive mesh ops that
//! share a clip. Paint order is never violated; batching never crosses an op
//! of a different kind.

mod common;
mod glyphs;
mod images;
mod mesh;

use std::ops::Range;

use crate::coords::{Rect, Vec2, Viewport};
use crate::mesh::{Mesh, Vertex};
use crate::paint::Color;
use crate::text::{FontId, FontSystem};
use crate::textures::{TextureId, TextureStore};

use common::logical_clip_to_scissor;
use glyphs::GlyphPipeline;
use images::ImagePipeline;
use mesh::MeshPipeline;

use super::Backend;

// ── renderer-facing context ───────────────────────────────────────────────

/// Device/queue plus the frame's coordinate basis.
///
/// This is intentionally small and stable; the application shell owns the
/// surface and constructs one of these per frame.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Viewport in logical pixels.
    pub viewport: Viewport,
    /// Physical pixels per logical pixel (DPI scale).
    pub scale_factor: f32,
}

/// Target for drawing (encoder + color view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

// ── recorded ops ──────────────────────────────────────────────────────────

pub(crate) struct TextRun {
    pub(crate) origin: Vec2,
    pub(crate) font: FontId,
    pub(crate) size: f32,
    pub(crate) color: Color,
    pub(crate) text: String,
}

pub(crate) struct ImageQuad {
    pub(crate) texture: TextureId,
    pub(crate) dest: Rect,
}

enum DrawOp {
    /// A range into the frame's shared mesh index buffer.
    Mesh { indices: Range<u32>, clip: Option<Rect> },
    /// An entry in `text_runs`.
    Text { run: usize, clip: Option<Rect> },
    /// An entry in `image_quads`.
    Image { quad: usize, clip: Option<Rect> },
}

// ── backend ───────────────────────────────────────────────────────────────

/// GPU adapter: records during dispatch, renders on [`flush`](Self::flush).
pub struct WgpuBackend {
    ops: Vec<DrawOp>,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    text_runs: Vec<TextRun>,
    image_quads: Vec<ImageQuad>,
    clip: Option<Rect>,

    mesh: MeshPipeline,
    glyphs: GlyphPipeline,
    images: ImagePipeline,
}

impl Default for WgpuBackend {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            vertices: Vec::new(),
            indices: Vec::new(),
            text_runs: Vec::new(),
            image_quads: Vec::new(),
            clip: None,
            mesh: MeshPipeline::new(),
            glyphs: GlyphPipeline::new(),
            images: ImagePipeline::new(),
        }
    }
}

impl WgpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the per-frame recording. Call before dispatching a frame's
    /// command list; allocated capacity is kept for reuse.
    pub fn begin_frame(&mut self) {
        self.ops.clear();
        self.vertices.clear();
        self.indices.clear();
        self.text_runs.clear();
        self.image_quads.clear();
        self.clip = None;
    }

    /// Uploads the frame's data and replays the recorded ops into one render
    /// pass, clearing the target to `clear` first.
    pub fn flush(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        clear: Color,
        fonts: &FontSystem,
        textures: &TextureStore,
    ) {
        self.mesh.prepare(ctx, &self.vertices, &self.indices);
        let glyph_ranges = self.glyphs.prepare(ctx, &self.text_runs, fonts);
        self.images.prepare(ctx, &self.image_quads, textures);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ashlar frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear.r as f64,
                        g: clear.g as f64,
                        b: clear.b as f64,
                        a: clear.a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for op in &self.ops {
            let clip = match op {
                DrawOp::Mesh { clip, .. } | DrawOp::Text { clip, .. } | DrawOp::Image { clip, .. } => {
                    *clip
                }
            };
            // A zero-area scissor means nothing inside can be visible.
            let Some((sx, sy, sw, sh)) =
                logical_clip_to_scissor(clip, ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };
            rpass.set_scissor_rect(sx, sy, sw, sh);

            match op {
                DrawOp::Mesh { indices, .. } => self.mesh.draw(&mut rpass, indices.clone()),
                DrawOp::Text { run, .. } => {
                    if let Some(range) = glyph_ranges.get(*run) {
                        self.glyphs.draw(&mut rpass, range.clone());
                    }
                }
                DrawOp::Image { quad, .. } => {
                    self.images
                        .draw(&mut rpass, *quad as u32, self.image_quads[*quad].texture);
                }
            }
        }
    }

    fn push_mesh_indices(&mut self, range: Range<u32>) {
        // Merge with the previous op when nothing changed in between; this is
        // the only batching flush performs, and it cannot reorder anything.
        if let Some(DrawOp::Mesh { indices, clip }) = self.ops.last_mut() {
            if *clip == self.clip && indices.end == range.start {
                indices.end = range.end;
                return;
            }
        }
        self.ops.push(DrawOp::Mesh { indices: range, clip: self.clip });
    }
}

impl Backend for WgpuBackend {
    fn draw_mesh(&mut self, mesh: &Mesh) {
        if mesh.vertices.is_empty() || mesh.triangles.is_empty() {
            return;
        }

        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&mesh.vertices);

        let start = self.indices.len() as u32;
        for t in &mesh.triangles {
            self.indices.extend_from_slice(&[base + t[0], base + t[1], base + t[2]]);
        }
        let end = self.indices.len() as u32;

        self.push_mesh_indices(start..end);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        let r = rect.normalized();
        if r.is_empty() {
            return;
        }

        let base = self.vertices.len() as u32;
        let (min, max) = (r.min(), r.max());
        let col = color.to_array();
        for pos in [
            [min.x, min.y],
            [max.x, min.y],
            [max.x, max.y],
            [min.x, max.y],
        ] {
            self.vertices.push(Vertex { pos, color: col, uv: [0.0, 0.0] });
        }

        let start = self.indices.len() as u32;
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        self.push_mesh_indices(start..start + 6);
    }

    fn draw_text(&mut self, origin: Vec2, font: FontId, size: f32, color: Color, text: &str) {
        if text.is_empty() {
            return;
        }
        self.text_runs.push(TextRun {
            origin,
            font,
            size,
            color,
            text: text.to_owned(),
        });
        self.ops.push(DrawOp::Text { run: self.text_runs.len() - 1, clip: self.clip });
    }

    fn draw_image(&mut self, texture: TextureId, dest: Rect) {
        if dest.normalized().is_empty() {
            return;
        }
        self.image_quads.push(ImageQuad { texture, dest });
        self.ops.push(DrawOp::Image { quad: self.image_quads.len() - 1, clip: self.clip });
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }
}
