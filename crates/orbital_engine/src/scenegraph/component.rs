//! Component contract
//!
//! A component is a self-contained capability attached to a scene node:
//! mesh, material, light, camera binding, and so on. All lifecycle hooks
//! default to no-ops so concrete components override only what they need.

use std::any::Any;

use crate::foundation::math::Mat4;
use crate::render::device::RenderDevice;
use crate::scenegraph::node::NodeKey;

/// Borrowed view of the owning node handed to component hooks.
pub struct NodeContext<'a> {
    /// Key of the owning node in its graph
    pub key: NodeKey,
    /// Debug/editor name of the owning node
    pub name: &'a str,
    /// Local transform of the owning node at hook time
    pub local_transform: Mat4,
}

/// Blanket `Any` access for component downcasting.
pub trait AsAny: Any {
    /// Upcast to `&dyn Any` for dynamic capability lookup.
    fn as_any(&self) -> &dyn Any;
    /// Upcast to `&mut dyn Any` for dynamic capability lookup.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Polymorphic behavior unit owned by exactly one [`SceneNode`].
///
/// Hooks never signal errors; a component that lost its resources renders
/// nothing instead of aborting the traversal.
///
/// [`SceneNode`]: crate::scenegraph::SceneNode
pub trait Component: AsAny {
    /// Called exactly once when the owning node enters the active graph.
    ///
    /// Components on one node attach in insertion order; no other ordering
    /// is guaranteed.
    fn on_attach(&mut self, _node: &NodeContext<'_>) {}

    /// Called exactly once on graph teardown; releases anything
    /// `on_attach` acquired.
    fn on_detach(&mut self, _node: &NodeContext<'_>) {}

    /// Per-frame update hook; `delta_seconds` is never negative and may
    /// be zero.
    fn on_update(&mut self, _node: &NodeContext<'_>, _delta_seconds: f64) {}

    /// Render hook for the generic render pass; side effects are draw
    /// calls only.
    fn on_render(&mut self, _node: &NodeContext<'_>, _device: &mut dyn RenderDevice) {}

    /// Local transform supplied by this component, if it has the
    /// Transform capability.
    ///
    /// A Transform-capability component always returns `Some`; at most one
    /// such component may live on a node.
    fn local_transform(&self) -> Option<Mat4> {
        None
    }
}
