use std::f32::consts::PI;

use crate::coords::{BorderWidths, CornerRadius, Rect, Vec2};
use crate::mesh::Mesh;
use crate::paint::Color;

use super::AA_HALF_WIDTH;

/// Arc floor: even a zero-radius corner gets two steps so the width
/// interpolation has somewhere to happen.
const MIN_ARC_SEGMENTS: usize = 2;
const MAX_ARC_SEGMENTS: usize = 16;

/// One corner of the stroke path: arc geometry plus the side widths the
/// stroke interpolates between while walking the arc.
///
/// The path cycles TL → TR → BR → BL, so each corner's incoming side is the
/// outgoing side of its predecessor (left → top → right → bottom → left).
#[derive(Debug, Copy, Clone)]
struct CornerArc {
    center: Vec2,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    /// Stroke width where the arc begins (incoming side).
    width_start: f32,
    /// Stroke width where the arc ends (outgoing side).
    width_end: f32,
}

impl CornerArc {
    #[inline]
    fn segments(&self) -> usize {
        ((self.radius * 0.5) as usize).clamp(MIN_ARC_SEGMENTS, MAX_ARC_SEGMENTS)
    }

    #[inline]
    fn angle_at(&self, t: f32) -> f32 {
        self.start_angle + t * (self.end_angle - self.start_angle)
    }

    /// Interpolated stroke width at parameter `t ∈ [0, 1]` along the arc.
    /// At `t = 0.5` this is the arithmetic mean of the two side widths.
    #[inline]
    fn width_at(&self, t: f32) -> f32 {
        self.width_start + t * (self.width_end - self.width_start)
    }
}

/// Radii of the four concentric rings at one arc sample, innermost first:
/// inner fringe, inner solid, outer solid, outer fringe. The two solid rings
/// bound the stroke body; each fringe ring carries zero alpha.
///
/// `width >= outer` collapses the inner rings to the corner center — the
/// stroke degenerates to a filled pie slice, which is accepted.
#[inline]
fn ring_radii(outer: f32, width: f32) -> [f32; 4] {
    let inner = outer - width;
    [
        (inner - AA_HALF_WIDTH).max(0.0),
        (inner + AA_HALF_WIDTH).max(0.0),
        (outer - AA_HALF_WIDTH).max(0.0),
        outer + AA_HALF_WIDTH,
    ]
}

/// Connects two consecutive 4-vertex ring slices with the inner-fringe,
/// solid-body and outer-fringe quads (6 triangles).
fn connect_slices(mesh: &mut Mesh, prev: u32, curr: u32) {
    for ring in 0..3 {
        let a = prev + ring;
        let b = curr + ring;
        mesh.push_triangle(a, b, b + 1);
        mesh.push_triangle(a, b + 1, a + 1);
    }
}

/// Tessellates a rounded border (stroke) with anti-aliased edges on both
/// silhouettes.
///
/// Each corner gets its own radius (independently clamped to half the shorter
/// side) and interpolates the stroke width across its quarter-turn arc from
/// the incoming side's width to the outgoing side's, so sides of different
/// thickness meet in a miter-like taper. Every arc sample emits four ring
/// vertices; samples within a corner are connected as they are generated, and
/// a closing pass stitches the four corner-to-corner gaps — the straight
/// sides — exactly once each.
pub fn stroke_rounded_border(
    rect: Rect,
    radii: CornerRadius,
    widths: BorderWidths,
    color: Color,
) -> Mesh {
    let rect = rect.normalized();
    let half_min = rect.size.x.min(rect.size.y) / 2.0;
    let clamp = |r: f32| r.clamp(0.0, half_min);

    let (x, y) = (rect.origin.x, rect.origin.y);
    let (w, h) = (rect.size.x, rect.size.y);

    let (r_tl, r_tr) = (clamp(radii.top_left), clamp(radii.top_right));
    let (r_br, r_bl) = (clamp(radii.bottom_right), clamp(radii.bottom_left));

    let corners = [
        CornerArc {
            center: Vec2::new(x + r_tl, y + r_tl),
            radius: r_tl,
            start_angle: PI,
            end_angle: 1.5 * PI,
            width_start: widths.left,
            width_end: widths.top,
        },
        CornerArc {
            center: Vec2::new(x + w - r_tr, y + r_tr),
            radius: r_tr,
            start_angle: 1.5 * PI,
            end_angle: 2.0 * PI,
            width_start: widths.top,
            width_end: widths.right,
        },
        CornerArc {
            center: Vec2::new(x + w - r_br, y + h - r_br),
            radius: r_br,
            start_angle: 0.0,
            end_angle: 0.5 * PI,
            width_start: widths.right,
            width_end: widths.bottom,
        },
        CornerArc {
            center: Vec2::new(x + r_bl, y + h - r_bl),
            radius: r_bl,
            start_angle: 0.5 * PI,
            end_angle: PI,
            width_start: widths.bottom,
            width_end: widths.left,
        },
    ];

    let solid = color;
    let fringe = color.transparent();

    let total_samples: usize = corners.iter().map(|c| c.segments() + 1).sum();
    // 6 triangles per within-corner step, 6 per corner-to-corner seam.
    let mut mesh = Mesh::with_capacity(total_samples * 4, (total_samples - 4) * 6 + 4 * 6);

    // Index of the first ring slice of each corner, and of its last, captured
    // for the seam pass.
    let mut ring_start = [0u32; 4];
    let mut ring_end = [0u32; 4];

    for (c, corner) in corners.iter().enumerate() {
        let segments = corner.segments();

        for i in 0..=segments {
            let t = i as f32 / segments as f32;
            let (sin, cos) = corner.angle_at(t).sin_cos();
            let dir = Vec2::new(cos, sin);
            let [r0, r1, r2, r3] = ring_radii(corner.radius, corner.width_at(t).max(0.0));

            let base = mesh.push_vertex(corner.center + dir * r0, fringe);
            mesh.push_vertex(corner.center + dir * r1, solid);
            mesh.push_vertex(corner.center + dir * r2, solid);
            mesh.push_vertex(corner.center + dir * r3, fringe);

            if i == 0 {
                ring_start[c] = base;
            } else {
                connect_slices(&mut mesh, base - 4, base);
            }
            ring_end[c] = base;
        }
    }

    // Stitch the straight sides between adjacent corners, wrapping from the
    // last corner back to the first. Each of the four seams closes exactly
    // once; the ring positions at a seam's two slices already agree on width,
    // so the quads are planar bands along the side.
    for c in 0..4 {
        connect_slices(&mut mesh, ring_end[c], ring_start[(c + 1) % 4]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_border() -> Mesh {
        stroke_rounded_border(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            CornerRadius::all(5.0),
            BorderWidths::all(2.0),
            Color::from_srgb_u8(0, 0, 255, 255),
        )
    }

    // ── width interpolation ───────────────────────────────────────────────

    #[test]
    fn width_at_midpoint_is_mean_of_adjacent_sides() {
        let corner = CornerArc {
            center: Vec2::zero(),
            radius: 8.0,
            start_angle: PI,
            end_angle: 1.5 * PI,
            width_start: 2.0,
            width_end: 6.0,
        };
        assert_eq!(corner.width_at(0.5), 4.0);
        assert_eq!(corner.width_at(0.0), 2.0);
        assert_eq!(corner.width_at(1.0), 6.0);
    }

    // ── ring radii ────────────────────────────────────────────────────────

    #[test]
    fn ring_radii_are_monotonic() {
        let [r0, r1, r2, r3] = ring_radii(10.0, 3.0);
        assert!(r0 <= r1 && r1 <= r2 && r2 <= r3);
        assert_eq!(r3, 10.5);
        assert_eq!(r0, 6.5);
    }

    #[test]
    fn width_exceeding_radius_collapses_inner_rings() {
        // Pie-slice case: the inner rings floor at the corner center.
        let [r0, r1, _, _] = ring_radii(4.0, 10.0);
        assert_eq!(r0, 0.0);
        assert!(r1 <= AA_HALF_WIDTH);
    }

    // ── counts and bounds ─────────────────────────────────────────────────

    #[test]
    fn counts_match_per_corner_segment_sums() {
        let radii = CornerRadius::new(5.0, 20.0, 40.0, 0.0);
        let mesh = stroke_rounded_border(
            Rect::new(0.0, 0.0, 200.0, 200.0),
            radii,
            BorderWidths::all(3.0),
            Color::WHITE,
        );

        // Segment counts: (r * 0.5) clamped to [2, 16] per corner.
        let segs = [2usize, 10, 16, 2];
        let samples: usize = segs.iter().map(|s| s + 1).sum();
        assert_eq!(mesh.vertex_count(), samples * 4);
        assert_eq!(
            mesh.triangle_count(),
            segs.iter().sum::<usize>() * 6 + 4 * 6
        );
        assert!(mesh.indices_in_bounds());
    }

    #[test]
    fn exact_capacity_no_reallocation() {
        let mesh = sample_border();
        assert_eq!(mesh.vertices.capacity(), mesh.vertices.len());
        assert_eq!(mesh.triangles.capacity(), mesh.triangles.len());
    }

    // ── seam discipline ───────────────────────────────────────────────────

    #[test]
    fn each_seam_is_stitched_exactly_once() {
        // Count triangles that reference vertices from two different corner
        // ranges; each of the 4 seams contributes exactly 6.
        let radii = CornerRadius::all(5.0);
        let mesh = stroke_rounded_border(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            radii,
            BorderWidths::all(2.0),
            Color::WHITE,
        );

        let samples_per_corner = 2 + 1; // radius 5 → 2 segments
        let corner_of = |v: u32| (v as usize) / (samples_per_corner * 4);
        let cross_corner = mesh
            .triangles
            .iter()
            .filter(|t| {
                let c = t.map(corner_of);
                c[0] != c[1] || c[1] != c[2]
            })
            .count();
        assert_eq!(cross_corner, 4 * 6);
    }

    // ── colors ────────────────────────────────────────────────────────────

    #[test]
    fn fringe_rings_are_transparent_solid_rings_are_not() {
        let mesh = sample_border();
        for slice in mesh.vertices.chunks_exact(4) {
            assert_eq!(slice[0].color[3], 0.0);
            assert!(slice[1].color[3] > 0.0);
            assert!(slice[2].color[3] > 0.0);
            assert_eq!(slice[3].color[3], 0.0);
        }
    }

    // ── purity ────────────────────────────────────────────────────────────

    #[test]
    fn identical_inputs_produce_identical_meshes() {
        let a = sample_border();
        let b = sample_border();
        assert_eq!(a, b);
    }
}
