//! Triangle-mesh currency between the geometry builder and the backends.

use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;

/// A single mesh vertex (32 bytes):
///
///  offset  0  pos    [f32; 2]
///  offset  8  color  [f32; 4]   straight-alpha RGBA
///  offset 24  uv     [f32; 2]   zero for solid fills
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl Vertex {
    #[inline]
    pub fn new(pos: Vec2, color: Color) -> Self {
        Self {
            pos: [pos.x, pos.y],
            color: color.to_array(),
            uv: [0.0, 0.0],
        }
    }
}

/// Indexed triangle soup in logical pixels.
///
/// Invariants:
/// - every index is `< vertices.len()`
/// - triangle winding is consistent across the mesh, so a backend can rely on
///   one front-face convention
///
/// Meshes are scratch data: built for one draw call, sized exactly from the
/// shape's segment counts, and discarded afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh with buffers pre-sized to the exact counts the caller
    /// is about to push.
    #[inline]
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Appends a solid-colored vertex and returns its index.
    #[inline]
    pub fn push_vertex(&mut self, pos: Vec2, color: Color) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices.push(Vertex::new(pos, color));
        idx
    }

    /// Appends one triangle. All three indices must already be pushed.
    #[inline]
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        debug_assert!(
            (a as usize) < self.vertices.len()
                && (b as usize) < self.vertices.len()
                && (c as usize) < self.vertices.len(),
            "triangle index out of bounds"
        );
        self.triangles.push([a, b, c]);
    }

    /// Appends a quad `a b c d` (counter-clockwise perimeter) as the two
    /// triangles `a b c` and `a c d`.
    #[inline]
    pub fn push_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Checks the index-bounds invariant. Cheap enough for asserts in tests
    /// and debug paths.
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.vertices.len() as u32;
        self.triangles.iter().all(|t| t.iter().all(|&i| i < n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_vertex_returns_sequential_indices() {
        let mut mesh = Mesh::default();
        let a = mesh.push_vertex(Vec2::new(0.0, 0.0), Color::WHITE);
        let b = mesh.push_vertex(Vec2::new(1.0, 0.0), Color::WHITE);
        assert_eq!((a, b), (0, 1));
    }

    #[test]
    fn quad_is_two_triangles_sharing_a_diagonal() {
        let mut mesh = Mesh::default();
        let ids: Vec<u32> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .map(|&(x, y)| mesh.push_vertex(Vec2::new(x, y), Color::WHITE))
            .collect();
        mesh.push_quad(ids[0], ids[1], ids[2], ids[3]);

        assert_eq!(mesh.triangles, vec![[0, 1, 2], [0, 2, 3]]);
        assert!(mesh.indices_in_bounds());
    }
}
