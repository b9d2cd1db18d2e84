//! UV-sphere mesh component

use crate::render::mesh::{build_uv_sphere, SphereGeometry};
use crate::scenegraph::component::{Component, NodeContext};

/// How a mesh is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Filled triangles
    Normal,
    /// Edges only
    Wireframe,
}

/// Renderable UV sphere.
///
/// Geometry is built lazily on first use and rebuilt when the shape
/// parameters change, so resizing a body mid-run stays cheap until the
/// next draw actually needs the mesh.
pub struct SphereMeshComponent {
    radius: f32,
    slices: u32,
    stacks: u32,
    /// Fill or wireframe rasterization for this mesh
    pub render_mode: RenderMode,
    geometry: Option<SphereGeometry>,
}

impl Default for SphereMeshComponent {
    fn default() -> Self {
        Self {
            radius: 1.0,
            slices: 64,
            stacks: 64,
            render_mode: RenderMode::Normal,
            geometry: None,
        }
    }
}

impl SphereMeshComponent {
    /// Unit sphere at default tessellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sphere of the given radius at default tessellation.
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Builder-style tessellation override.
    #[must_use]
    pub fn with_tessellation(mut self, slices: u32, stacks: u32) -> Self {
        self.slices = slices;
        self.stacks = stacks;
        self.geometry = None;
        self
    }

    /// Current sphere radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Changes the radius, invalidating cached geometry.
    pub fn set_radius(&mut self, radius: f32) {
        if (radius - self.radius).abs() > f32::EPSILON {
            self.radius = radius;
            self.geometry = None;
        }
    }

    /// Geometry for the current parameters, building it if needed.
    pub fn geometry(&mut self) -> &SphereGeometry {
        let (radius, slices, stacks) = (self.radius, self.slices, self.stacks);
        self.geometry
            .get_or_insert_with(|| build_uv_sphere(radius, slices, stacks))
    }
}

impl Component for SphereMeshComponent {
    fn on_detach(&mut self, _node: &NodeContext<'_>) {
        self.geometry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_is_cached_until_radius_changes() {
        let mut mesh = SphereMeshComponent::with_radius(2.0).with_tessellation(8, 8);
        let indices = mesh.geometry().indices.len();
        assert_eq!(mesh.geometry().indices.len(), indices);

        mesh.set_radius(2.0);
        assert!(mesh.geometry.is_some());

        mesh.set_radius(3.0);
        assert!(mesh.geometry.is_none());
        let rebuilt = mesh.geometry();
        assert!(rebuilt.positions.iter().any(|p| p.norm() > 2.5));
    }
}
