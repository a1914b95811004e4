/// Geometry primitives for the cube puzzle
use nalgebra::{Matrix4, Point3, Vector3};

/// Fixed display palette.
///
/// Six puzzle colors, `Empty` for interior faces and `Text` for overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Empty,
    Red,
    Orange,
    Blue,
    Green,
    Yellow,
    White,
    Text,
}

impl Color {
    pub fn is_empty(self) -> bool {
        self == Color::Empty
    }
}

/// A flat-colored triangle.
///
/// Never mutated; [`Triangle::transformed`] produces a moved copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Point3<f32>; 3],
    pub color: Color,
}

impl Triangle {
    pub fn new(p0: Point3<f32>, p1: Point3<f32>, p2: Point3<f32>, color: Color) -> Self {
        Self {
            points: [p0, p1, p2],
            color,
        }
    }

    /// Geometric normal from the winding order (not normalized).
    pub fn normal(&self) -> Vector3<f32> {
        let [p0, p1, p2] = self.points;
        (p1 - p0).cross(&(p2 - p0))
    }

    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        Self {
            points: self.points.map(|p| matrix.transform_point(&p)),
            color: self.color,
        }
    }
}

/// One square face of a unit, split into two triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub triangles: [Triangle; 2],
    /// Center of the face relative to its unit.
    pub position: Vector3<f32>,
    /// Orients the local +Z axis along the face's outward direction.
    pub rotation: Matrix4<f32>,
}

impl Plane {
    pub fn color(&self) -> Color {
        self.triangles[0].color
    }

    /// Plane-local to unit-local transform.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.position) * self.rotation
    }
}

/// One of the 27 small cubes.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeUnit {
    pub planes: [Plane; 6],
    /// Current center in world space.
    pub position: Vector3<f32>,
    /// Cumulative orientation.
    pub rotation: Matrix4<f32>,
}

impl CubeUnit {
    /// Unit-local to world transform.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.position) * self.rotation
    }

    /// The unit's 12 triangles in world space.
    pub fn world_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        let model = self.model_matrix();
        self.planes.iter().flat_map(move |plane| {
            let matrix = model * plane.model_matrix();
            plane.triangles.iter().map(move |tri| tri.transformed(&matrix))
        })
    }

    /// Faces that carry a puzzle color.
    pub fn colored_faces(&self) -> usize {
        self.planes.iter().filter(|p| !p.color().is_empty()).count()
    }
}

/// The whole 3x3x3 puzzle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    pub units: Vec<CubeUnit>,
    spacing: f32,
}

impl Cube {
    pub const UNIT_COUNT: usize = 27;

    pub fn new(units: Vec<CubeUnit>, spacing: f32) -> Self {
        Self { units, spacing }
    }

    /// Distance between adjacent lattice slots.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn units(&self) -> &[CubeUnit] {
        &self.units
    }

    pub fn world_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.units.iter().flat_map(CubeUnit::world_triangles)
    }
}
