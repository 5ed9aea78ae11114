//! Shared GPU types and utilities used by the wgpu backend's pipelines.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Viewport};

// ── blend ─────────────────────────────────────────────────────────────────

/// Blend state for straight-alpha colors (SrcAlpha / OneMinusSrcAlpha).
///
/// Mesh vertex colors and glyph/image samples are NOT premultiplied; the
/// anti-aliasing fringe depends on interpolating straight-alpha colors, so
/// every pipeline blends the same way.
pub(super) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState::ALPHA_BLENDING
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

/// Minimum binding size for the viewport uniform buffer.
///
/// `ViewportUniform` is 16 bytes by construction, so the size is always
/// non-zero; centralising this avoids `.unwrap()` at each pipeline-creation
/// site.
pub(super) fn viewport_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
        .expect("ViewportUniform has non-zero size by construction")
}

// ── quad vertex ───────────────────────────────────────────────────────────

/// Unit-quad corner in `[0, 1]²`, expanded per instance in the glyph and
/// image vertex shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── scissor rect ──────────────────────────────────────────────────────────

/// Converts a logical-pixel clip rect to physical scissor rect arguments.
///
/// Returns `None` if the clip rect has zero area after clamping (the caller
/// should skip the draw call). `clip = None` means "no scissor" and returns
/// the full viewport rect.
pub(super) fn logical_clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_vw = (viewport.width * scale).max(1.0) as u32;
    let phys_vh = (viewport.height * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_vw, phys_vh),
        Some(r) => {
            let x = ((r.origin.x * scale).max(0.0) as u32).min(phys_vw);
            let y = ((r.origin.y * scale).max(0.0) as u32).min(phys_vh);
            let x2 = (((r.origin.x + r.size.x) * scale).max(0.0) as u32).min(phys_vw);
            let y2 = (((r.origin.y + r.size.y) * scale).max(0.0) as u32).min(phys_vh);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport { width: 800.0, height: 600.0 };

    #[test]
    fn no_clip_covers_the_viewport() {
        assert_eq!(
            logical_clip_to_scissor(None, VP, 1.0),
            Some((0, 0, 800, 600))
        );
    }

    #[test]
    fn clip_scales_with_the_dpi_factor() {
        let clip = Rect::new(10.0, 10.0, 50.0, 50.0);
        assert_eq!(
            logical_clip_to_scissor(Some(clip), VP, 2.0),
            Some((20, 20, 100, 100))
        );
    }

    #[test]
    fn off_screen_clip_is_skipped() {
        let clip = Rect::new(900.0, 0.0, 50.0, 50.0);
        assert_eq!(logical_clip_to_scissor(Some(clip), VP, 1.0), None);
    }

    #[test]
    fn clip_is_clamped_to_the_viewport() {
        let clip = Rect::new(-20.0, 590.0, 100.0, 100.0);
        assert_eq!(
            logical_clip_to_scissor(Some(clip), VP, 1.0),
            Some((0, 590, 80, 10))
        );
    }
}
