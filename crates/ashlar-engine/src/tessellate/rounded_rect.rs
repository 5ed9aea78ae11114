use std::f32::consts::PI;

use crate::coords::{Rect, Vec2};
use crate::mesh::Mesh;
use crate::paint::Color;

use super::AA_HALF_WIDTH;

/// Visual smoothness floor for a quarter-circle arc.
const MIN_ARC_SEGMENTS: usize = 6;
/// Cost ceiling; beyond this a larger radius gains nothing visible.
const MAX_ARC_SEGMENTS: usize = 24;

/// Quarter-turn angle ranges per corner in y-down screen space, ordered
/// TL → TR → BR → BL.
const CORNER_ARCS: [(f32, f32); 4] = [
    (PI, 1.5 * PI),
    (1.5 * PI, 2.0 * PI),
    (0.0, 0.5 * PI),
    (0.5 * PI, PI),
];

/// Arc step count for a corner of the given radius: proportional to the
/// radius, bounded below for smoothness and above for cost.
#[inline]
fn arc_segments(radius: f32) -> usize {
    ((radius * 0.5) as usize).clamp(MIN_ARC_SEGMENTS, MAX_ARC_SEGMENTS)
}

/// Tessellates a filled rounded rectangle with an anti-aliasing fringe.
///
/// One radius applies to all four corners; it is clamped to half the shorter
/// side so opposing corners cannot overlap. The mesh is built around four
/// "hub" vertices — the rectangle inset by the radius — which pivot the
/// per-corner triangle fans and corner the central quad:
///
/// - central quad between the four hubs (full opacity)
/// - per corner, a fan from the hub over the arc's inner ring plus a
///   two-triangle strip per step between the inner (full alpha) and outer
///   (zero alpha) rings
/// - four straight-edge seams closing the loop, each a fill quad between
///   adjacent hubs and a fringe quad between the adjoining arc endpoints
///
/// Callers should short-circuit `radius == 0` to a plain rectangle fill; the
/// degenerate mesh is valid but wasted cost. Negative or non-finite rectangle
/// dimensions are a caller contract violation.
pub fn fill_rounded_rect(rect: Rect, corner_radius: f32, color: Color) -> Mesh {
    let rect = rect.normalized();
    let half_min = rect.size.x.min(rect.size.y) / 2.0;
    let r = corner_radius.clamp(0.0, half_min);
    let segments = arc_segments(r);

    let r_inner = (r - AA_HALF_WIDTH).max(0.0);
    let r_outer = r + AA_HALF_WIDTH;

    let fill = color;
    let fringe = color.transparent();

    // 4 hubs plus (segments + 1) inner/outer pairs per corner.
    let vertex_count = 4 + 4 * (segments + 1) * 2;
    // Central quad, 4 corner fans + fringe strips, 4 two-quad seams.
    let triangle_count = 2 + 4 * segments * 3 + 16;
    let mut mesh = Mesh::with_capacity(vertex_count, triangle_count);

    let (x, y) = (rect.origin.x, rect.origin.y);
    let (w, h) = (rect.size.x, rect.size.y);
    let hubs = [
        Vec2::new(x + r, y + r),
        Vec2::new(x + w - r, y + r),
        Vec2::new(x + w - r, y + h - r),
        Vec2::new(x + r, y + h - r),
    ];

    let hub_ids = hubs.map(|p| mesh.push_vertex(p, fill));
    mesh.push_quad(hub_ids[0], hub_ids[1], hub_ids[2], hub_ids[3]);

    // First and last (inner, outer) pair of each corner's arc, captured for
    // the seam pass below.
    let mut arc_start = [(0u32, 0u32); 4];
    let mut arc_end = [(0u32, 0u32); 4];

    for (c, &(start_angle, end_angle)) in CORNER_ARCS.iter().enumerate() {
        let step = (end_angle - start_angle) / segments as f32;

        for i in 0..=segments {
            let angle = start_angle + step * i as f32;
            let (sin, cos) = angle.sin_cos();
            let dir = Vec2::new(cos, sin);

            let inner = mesh.push_vertex(hubs[c] + dir * r_inner, fill);
            let outer = mesh.push_vertex(hubs[c] + dir * r_outer, fringe);

            if i == 0 {
                arc_start[c] = (inner, outer);
            } else {
                // Core fill fan from the hub, then the fringe strip between
                // the previous and current ring pairs.
                mesh.push_triangle(hub_ids[c], inner - 2, inner);
                mesh.push_quad(inner - 2, outer - 2, outer, inner);
            }
            arc_end[c] = (inner, outer);
        }
    }

    // Straight edges between adjacent corners, wrapping from the last corner
    // back to the first: a fill quad spanning hub-to-hub and a fringe quad
    // spanning the adjoining inner/outer arc endpoints.
    for c in 0..4 {
        let next = (c + 1) % 4;
        let (end_inner, end_outer) = arc_end[c];
        let (start_inner, start_outer) = arc_start[next];

        mesh.push_quad(hub_ids[c], hub_ids[next], start_inner, end_inner);
        mesh.push_quad(end_inner, end_outer, start_outer, start_inner);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area2(mesh: &Mesh, tri: [u32; 3]) -> f32 {
        let p = |i: u32| mesh.vertices[i as usize].pos;
        let [a, b, c] = tri.map(p);
        (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
    }

    // ── counts and bounds ─────────────────────────────────────────────────

    #[test]
    fn vertex_and_triangle_counts_match_segment_formula() {
        for r in [4.0, 10.0, 25.0, 60.0] {
            let mesh = fill_rounded_rect(Rect::new(0.0, 0.0, 200.0, 160.0), r, Color::WHITE);
            let segments = arc_segments(r.min(80.0));

            assert_eq!(mesh.vertex_count(), 4 + 8 * (segments + 1), "r = {r}");
            assert_eq!(mesh.triangle_count(), 2 + 12 * segments + 16, "r = {r}");
            assert!(mesh.indices_in_bounds(), "r = {r}");
        }
    }

    #[test]
    fn exact_capacity_no_reallocation() {
        let mesh = fill_rounded_rect(Rect::new(0.0, 0.0, 100.0, 100.0), 10.0, Color::WHITE);
        assert_eq!(mesh.vertices.capacity(), mesh.vertices.len());
        assert_eq!(mesh.triangles.capacity(), mesh.triangles.len());
    }

    // ── clamping ──────────────────────────────────────────────────────────

    #[test]
    fn radius_clamps_to_half_shorter_side() {
        // Requested radius 80 on a 100×60 rect clamps to 30: the top-left hub
        // must sit at exactly (x + 30, y + 30).
        let mesh = fill_rounded_rect(Rect::new(10.0, 20.0, 100.0, 60.0), 80.0, Color::WHITE);
        assert_eq!(mesh.vertices[0].pos, [40.0, 50.0]);
    }

    // ── geometry quality ──────────────────────────────────────────────────

    #[test]
    fn no_degenerate_triangles_for_positive_radius() {
        let mesh = fill_rounded_rect(Rect::new(0.0, 0.0, 120.0, 90.0), 16.0, Color::WHITE);
        for &tri in &mesh.triangles {
            assert!(
                area2(&mesh, tri).abs() > 1e-4,
                "degenerate triangle {tri:?}"
            );
        }
    }

    #[test]
    fn fringe_ring_carries_transparent_twin() {
        let color = Color::from_srgb_u8(110, 110, 255, 255);
        let mesh = fill_rounded_rect(Rect::new(0.0, 0.0, 100.0, 100.0), 8.0, color);

        let mut saw_fringe = false;
        for v in &mesh.vertices {
            if v.color[3] == 0.0 {
                saw_fringe = true;
                assert_eq!(&v.color[..3], &color.to_array()[..3]);
            } else {
                assert_eq!(v.color, color.to_array());
            }
        }
        assert!(saw_fringe);
    }

    // ── purity ────────────────────────────────────────────────────────────

    #[test]
    fn identical_inputs_produce_identical_meshes() {
        let rect = Rect::new(3.5, 7.25, 140.0, 90.0);
        let a = fill_rounded_rect(rect, 12.0, Color::from_srgb_u8(200, 30, 30, 255));
        let b = fill_rounded_rect(rect, 12.0, Color::from_srgb_u8(200, 30, 30, 255));
        assert_eq!(a, b);
    }
}
