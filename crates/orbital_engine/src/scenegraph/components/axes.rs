//! Debug coordinate-axes component

use crate::render::mesh::{build_axis_geometry, AxisGeometry};
use crate::scenegraph::component::Component;

/// RGB world-axis gizmo with arrowhead tips.
///
/// Disabled by default; the scene toggles it at runtime. Drawn unlit on
/// the vertex-color path.
pub struct AxesComponent {
    /// Whether the gizmo is drawn this frame
    pub enabled: bool,
    /// Line width in pixels
    pub line_width: f32,
    length: f32,
    geometry: Option<AxisGeometry>,
}

impl Default for AxesComponent {
    fn default() -> Self {
        Self {
            enabled: false,
            line_width: 2.0,
            length: 1.0,
            geometry: None,
        }
    }
}

impl AxesComponent {
    /// Disabled gizmo with unit-length axes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disabled gizmo with the given axis length.
    pub fn with_length(length: f32) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    /// Current axis length.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Changes the axis length, invalidating cached geometry.
    pub fn set_length(&mut self, length: f32) {
        if (length - self.length).abs() > f32::EPSILON {
            self.length = length;
            self.geometry = None;
        }
    }

    /// Line and arrowhead geometry, built on first use.
    pub fn geometry(&mut self) -> &AxisGeometry {
        let length = self.length;
        self.geometry
            .get_or_insert_with(|| build_axis_geometry(length))
    }
}

impl Component for AxesComponent {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_by_default() {
        assert!(!AxesComponent::new().enabled);
    }

    #[test]
    fn length_change_rebuilds_geometry() {
        let mut axes = AxesComponent::with_length(10.0);
        let tip = axes.geometry().vertices.iter().map(|v| v.position.x).fold(0.0, f32::max);
        assert!((tip - 10.6).abs() < 1e-4);

        axes.set_length(5.0);
        let tip = axes.geometry().vertices.iter().map(|v| v.position.x).fold(0.0, f32::max);
        assert!((tip - 5.3).abs() < 1e-4);
    }
}
