/// Construction of the 27-unit cube.
use nalgebra::{Matrix4, Point3, Unit, Vector3};

use crate::config::CubeConfig;
use crate::geometry::{Color, Cube, CubeUnit, Plane, Triangle};

/// Outward normals and the color each face gets when it is on the exterior.
const FACES: [([f32; 3], Color); 6] = [
    ([0.0, 0.0, 1.0], Color::Red),
    ([0.0, 0.0, -1.0], Color::Orange),
    ([-1.0, 0.0, 0.0], Color::Blue),
    ([1.0, 0.0, 0.0], Color::Green),
    ([0.0, 1.0, 0.0], Color::Yellow),
    ([0.0, -1.0, 0.0], Color::White),
];

/// Rotation taking local +Z onto `normal`.
///
/// Falls back to identity when the two are (anti)parallel.
pub fn align_z_to(normal: &Vector3<f32>) -> Matrix4<f32> {
    let z = Vector3::z();
    let axis = z.cross(normal);
    if axis.norm() <= 1e-3 {
        return Matrix4::identity();
    }
    let angle = normal.normalize().dot(&z).clamp(-1.0, 1.0).acos();
    Matrix4::from_axis_angle(&Unit::new_normalize(axis), angle)
}

/// A unit square face pointing along `normal`, offset `offset` from the unit center.
///
/// The triangles are wound so their geometric normal points back into the
/// unit, which is what the rasterizer's culling test keeps.
pub fn make_plane(normal: Vector3<f32>, offset: f32, color: Color) -> Plane {
    let p0 = Point3::new(-0.5, -0.5, 0.0);
    let p1 = Point3::new(0.5, -0.5, 0.0);
    let p2 = Point3::new(0.5, 0.5, 0.0);
    let p3 = Point3::new(-0.5, 0.5, 0.0);

    let rotation = align_z_to(&normal);
    let local_z_outward = rotation.transform_vector(&Vector3::z()).dot(&normal) > 0.0;

    let triangles = if local_z_outward {
        [
            Triangle::new(p2, p1, p0, color),
            Triangle::new(p0, p3, p2, color),
        ]
    } else {
        [
            Triangle::new(p0, p1, p2, color),
            Triangle::new(p2, p3, p0, color),
        ]
    };

    Plane {
        triangles,
        position: normal.normalize() * offset,
        rotation,
    }
}

/// A unit at integer lattice coordinates `lattice` (each in `-1..=1`).
///
/// A face is colored only when the unit sits on the outermost layer in that
/// face's direction. This is decided here, once.
pub fn make_cube_unit(lattice: Vector3<i32>, config: &CubeConfig) -> CubeUnit {
    let offset = 0.5 * (1.0 + config.face_padding);
    let planes = FACES.map(|(normal, color)| {
        let normal = Vector3::from(normal);
        let exterior = (0..3).any(|axis| normal[axis] != 0.0 && lattice[axis] as f32 == normal[axis]);
        let color = if exterior { color } else { Color::Empty };
        make_plane(normal, offset, color)
    });

    CubeUnit {
        planes,
        position: lattice.map(|c| c as f32) * config.spacing(),
        rotation: Matrix4::identity(),
    }
}

/// Build the solved cube.
pub fn make_cube(config: &CubeConfig) -> Cube {
    let units = (0..Cube::UNIT_COUNT as i32)
        .map(|i| {
            let lattice = Vector3::new(i % 3 - 1, i / 3 % 3 - 1, i / 9 - 1);
            make_cube_unit(lattice, config)
        })
        .collect();
    Cube::new(units, config.spacing())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_z_to_axes() {
        for (normal, _) in FACES {
            let normal = Vector3::from(normal);
            let rotation = align_z_to(&normal);
            let mapped = rotation.transform_vector(&Vector3::z());
            // -Z keeps identity; everything else lands exactly on the normal.
            if normal.z < 0.0 {
                assert_eq!(rotation, Matrix4::identity());
            } else {
                assert!((mapped - normal).norm() < 1e-5, "{normal:?} -> {mapped:?}");
            }
        }
    }

    #[test]
    fn test_plane_winding_points_inward() {
        for (normal, color) in FACES {
            let normal = Vector3::from(normal);
            let plane = make_plane(normal, 0.6, color);
            let matrix = plane.model_matrix();
            for tri in &plane.triangles {
                let world = tri.transformed(&matrix);
                assert!(world.normal().dot(&normal) < 0.0, "face {normal:?}");
            }
        }
    }

    #[test]
    fn test_plane_offset() {
        let plane = make_plane(Vector3::new(0.0, 1.0, 0.0), 0.6, Color::Yellow);
        assert!((plane.position - Vector3::new(0.0, 0.6, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_edge_unit_colors() {
        let unit = make_cube_unit(Vector3::new(1, 1, 0), &CubeConfig::default());
        let colors: Vec<Color> = unit.planes.iter().map(Plane::color).collect();
        assert_eq!(
            colors,
            vec![
                Color::Empty,
                Color::Empty,
                Color::Empty,
                Color::Green,
                Color::Yellow,
                Color::Empty,
            ]
        );
    }
}
