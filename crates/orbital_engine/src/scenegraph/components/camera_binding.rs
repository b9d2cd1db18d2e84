//! Camera binding component

use std::cell::RefCell;
use std::rc::Rc;

use crate::camera::OrbitCamera;
use crate::scenegraph::component::Component;

/// Marks a node as the scene's camera mount.
///
/// The camera itself is driven by the scene (orbit input, cinematic
/// playback) outside the graph walk, so every hook is a no-op; the
/// component exists to make the camera discoverable through the graph.
pub struct CameraBindingComponent {
    camera: Rc<RefCell<OrbitCamera>>,
}

impl CameraBindingComponent {
    /// Binds a shared camera to the owning node.
    pub fn new(camera: Rc<RefCell<OrbitCamera>>) -> Self {
        Self { camera }
    }

    /// The bound camera.
    pub fn camera(&self) -> Rc<RefCell<OrbitCamera>> {
        Rc::clone(&self.camera)
    }
}

impl Component for CameraBindingComponent {}
