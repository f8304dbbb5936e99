/// Geometry primitives for wireframe rendering
use nalgebra::Point3;

/// Which part of the cube an edge belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeGroup {
    /// The `z = -h` face, drawn first
    Bottom,
    /// The `z = +h` face
    Top,
    /// Edges joining the two faces
    Connecting,
}

/// An edge between two entries of the vertex array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
    pub group: EdgeGroup,
}

impl Edge {
    pub const fn new(start: usize, end: usize, group: EdgeGroup) -> Self {
        Self { start, end, group }
    }
}

pub const CUBE_VERTEX_COUNT: usize = 8;

/// Bottom face, top face, then the four connecting edges
pub const CUBE_EDGES: [Edge; 12] = [
    Edge::new(0, 1, EdgeGroup::Bottom),
    Edge::new(1, 2, EdgeGroup::Bottom),
    Edge::new(2, 3, EdgeGroup::Bottom),
    Edge::new(3, 0, EdgeGroup::Bottom),
    Edge::new(4, 5, EdgeGroup::Top),
    Edge::new(5, 6, EdgeGroup::Top),
    Edge::new(6, 7, EdgeGroup::Top),
    Edge::new(7, 4, EdgeGroup::Top),
    Edge::new(0, 4, EdgeGroup::Connecting),
    Edge::new(1, 5, EdgeGroup::Connecting),
    Edge::new(2, 6, EdgeGroup::Connecting),
    Edge::new(3, 7, EdgeGroup::Connecting),
];

/// Static topology of an axis-aligned cube centered at the origin.
///
/// There is no mutation API: renderers copy the vertices before rotating them.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidMesh {
    half_extent: f32,
    vertices: [Point3<f32>; CUBE_VERTEX_COUNT],
}

impl SolidMesh {
    /// Create a cube whose faces sit `half_extent` away from the origin
    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent;
        Self {
            half_extent,
            vertices: [
                Point3::new(-h, -h, -h),
                Point3::new(h, -h, -h),
                Point3::new(h, h, -h),
                Point3::new(-h, h, -h),
                Point3::new(-h, -h, h),
                Point3::new(h, -h, h),
                Point3::new(h, h, h),
                Point3::new(-h, h, h),
            ],
        }
    }

    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }

    pub fn center(&self) -> Point3<f32> {
        Point3::origin()
    }

    pub fn vertices(&self) -> &[Point3<f32>; CUBE_VERTEX_COUNT] {
        &self.vertices
    }

    pub fn edges(&self) -> &'static [Edge; 12] {
        &CUBE_EDGES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_topology() {
        let mesh = SolidMesh::cube(50.0);
        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.edges().len(), 12);
        assert!(mesh
            .edges()
            .iter()
            .all(|e| e.start < CUBE_VERTEX_COUNT && e.end < CUBE_VERTEX_COUNT && e.start != e.end));

        let count = |group| mesh.edges().iter().filter(|e| e.group == group).count();
        assert_eq!(count(EdgeGroup::Bottom), 4);
        assert_eq!(count(EdgeGroup::Top), 4);
        assert_eq!(count(EdgeGroup::Connecting), 4);
    }

    #[test]
    fn test_edges_have_cube_side_length() {
        let mesh = SolidMesh::cube(50.0);
        for edge in mesh.edges() {
            let a = mesh.vertices()[edge.start];
            let b = mesh.vertices()[edge.end];
            assert!(((b - a).norm() - 100.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_vertices_are_equidistant_from_center() {
        let mesh = SolidMesh::cube(200.0);
        let expected = (3.0f32).sqrt() * 200.0;
        for v in mesh.vertices() {
            assert!((nalgebra::distance(v, &mesh.center()) - expected).abs() < 1e-3);
        }
    }
}
