//! CPU-side geometry builders
//!
//! All mesh data is generated on the CPU and handed to the render device as
//! plain vertex/index slices; the device decides how to upload and draw it.

use crate::foundation::math::{Vec2, Vec3, Vec4};

/// UV-sphere geometry with per-vertex normals and texture coordinates.
#[derive(Debug, Clone)]
pub struct SphereGeometry {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Unit-length vertex normals
    pub normals: Vec<Vec3>,
    /// Equirectangular texture coordinates
    pub tex_coords: Vec<Vec2>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl SphereGeometry {
    /// Number of triangle-list indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// Builds a UV sphere of the given radius.
///
/// `slices` are longitudinal segments, `stacks` latitudinal; both are
/// clamped to a minimum of 3 so degenerate parameters still yield a closed
/// surface.
pub fn build_uv_sphere(radius: f32, slices: u32, stacks: u32) -> SphereGeometry {
    let radius = radius.max(f32::EPSILON);
    let slices = slices.max(3);
    let stacks = stacks.max(3);

    let mut positions = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());
    let mut tex_coords = Vec::with_capacity(positions.capacity());

    for stack in 0..=stacks {
        let v = stack as f32 / stacks as f32;
        let phi = v * std::f32::consts::PI;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for slice in 0..=slices {
            let u = slice as f32 / slices as f32;
            let theta = u * std::f32::consts::TAU;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let normal = Vec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta);
            positions.push(normal * radius);
            normals.push(normal);
            tex_coords.push(Vec2::new(1.0 - u, v));
        }
    }

    let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
    let row_stride = slices + 1;
    for stack in 0..stacks {
        for slice in 0..slices {
            let top_left = stack * row_stride + slice;
            let bottom_left = top_left + row_stride;

            indices.extend_from_slice(&[top_left, bottom_left, top_left + 1]);
            indices.extend_from_slice(&[top_left + 1, bottom_left, bottom_left + 1]);
        }
    }

    SphereGeometry {
        positions,
        normals,
        tex_coords,
        indices,
    }
}

/// Unit cube used for the camera-centered skybox.
#[derive(Debug, Clone)]
pub struct SkyboxGeometry {
    /// Corner positions of a cube spanning [-1, 1] on each axis
    pub positions: Vec<Vec3>,
    /// Triangle list indices, wound for front-face culling
    pub indices: Vec<u16>,
}

impl SkyboxGeometry {
    /// Number of triangle-list indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// Builds the unit skybox cube.
pub fn build_skybox_cube() -> SkyboxGeometry {
    let positions = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
    ];

    let indices = vec![
        0, 1, 2, 2, 3, 0, // -Z
        5, 4, 7, 7, 6, 5, // +Z
        4, 0, 3, 3, 7, 4, // -X
        1, 5, 6, 6, 2, 1, // +X
        3, 2, 6, 6, 7, 3, // +Y
        4, 5, 1, 1, 0, 4, // -Y
    ];

    SkyboxGeometry { positions, indices }
}

/// Position + color vertex used by the debug axis geometry.
#[derive(Debug, Clone, Copy)]
pub struct ColorVertex {
    /// Position in node-local space
    pub position: Vec3,
    /// RGBA vertex color
    pub color: Vec4,
}

/// Debug axis geometry: three colored lines plus arrowhead triangles.
#[derive(Debug, Clone)]
pub struct AxisGeometry {
    /// Line vertices first, then arrowhead triangle vertices
    pub vertices: Vec<ColorVertex>,
    /// Number of leading vertices drawn as lines
    pub line_vertex_count: usize,
    /// Number of trailing vertices drawn as triangles
    pub triangle_vertex_count: usize,
}

/// Builds XYZ axis lines of the given length with arrowhead tips.
///
/// X is red, Y green, Z blue; each axis gets a small four-triangle pyramid
/// at its positive end.
pub fn build_axis_geometry(length: f32) -> AxisGeometry {
    let length = length.max(f32::EPSILON);
    let head_length = length * 0.06;
    let head_radius = length * 0.02;

    let axes = [
        (Vec3::x(), Vec4::new(1.0, 0.0, 0.0, 1.0)),
        (Vec3::y(), Vec4::new(0.0, 1.0, 0.0, 1.0)),
        (Vec3::z(), Vec4::new(0.0, 0.0, 1.0, 1.0)),
    ];

    let mut vertices = Vec::new();
    for (axis, color) in &axes {
        vertices.push(ColorVertex {
            position: Vec3::zeros(),
            color: *color,
        });
        vertices.push(ColorVertex {
            position: axis * length,
            color: *color,
        });
    }
    let line_vertex_count = vertices.len();

    for (axis, color) in &axes {
        let tip = axis * (length + head_length);
        let base_center = axis * length;
        // Any vector not parallel to the axis works for the base frame.
        let helper = if axis.x.abs() > 0.5 { Vec3::y() } else { Vec3::x() };
        let side = axis.cross(&helper).normalize() * head_radius;
        let other = axis.cross(&side).normalize() * head_radius;

        let base = [
            base_center + side,
            base_center + other,
            base_center - side,
            base_center - other,
        ];
        for i in 0..4 {
            vertices.push(ColorVertex {
                position: tip,
                color: *color,
            });
            vertices.push(ColorVertex {
                position: base[i],
                color: *color,
            });
            vertices.push(ColorVertex {
                position: base[(i + 1) % 4],
                color: *color,
            });
        }
    }
    let triangle_vertex_count = vertices.len() - line_vertex_count;

    AxisGeometry {
        vertices,
        line_vertex_count,
        triangle_vertex_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sphere_has_expected_vertex_and_index_counts() {
        let sphere = build_uv_sphere(1.0, 8, 6);
        let expected_vertices = (8 + 1) * (6 + 1);
        assert_eq!(sphere.positions.len(), expected_vertices);
        assert_eq!(sphere.normals.len(), expected_vertices);
        assert_eq!(sphere.tex_coords.len(), expected_vertices);
        assert_eq!(sphere.indices.len(), 8 * 6 * 6);
    }

    #[test]
    fn sphere_normals_are_unit_length_and_radial() {
        let radius = 2.5;
        let sphere = build_uv_sphere(radius, 12, 9);
        for (position, normal) in sphere.positions.iter().zip(&sphere.normals) {
            assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(position.norm(), radius, epsilon = 1e-4);
            assert_relative_eq!((position / radius), *normal, epsilon = 1e-5);
        }
    }

    #[test]
    fn sphere_indices_stay_in_bounds() {
        let sphere = build_uv_sphere(1.0, 5, 4);
        let vertex_count = sphere.positions.len() as u32;
        assert!(sphere.indices.iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn degenerate_sphere_parameters_are_clamped() {
        let sphere = build_uv_sphere(-1.0, 0, 0);
        assert!(!sphere.positions.is_empty());
        assert!(!sphere.indices.is_empty());
    }

    #[test]
    fn skybox_cube_is_a_closed_box() {
        let cube = build_skybox_cube();
        assert_eq!(cube.positions.len(), 8);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube.indices.iter().all(|&i| (i as usize) < 8));
    }

    #[test]
    fn axis_geometry_splits_lines_and_triangles() {
        let axes = build_axis_geometry(10.0);
        assert_eq!(axes.line_vertex_count, 6);
        assert_eq!(axes.triangle_vertex_count, 3 * 4 * 3);
        assert_eq!(
            axes.vertices.len(),
            axes.line_vertex_count + axes.triangle_vertex_count
        );
    }
}
