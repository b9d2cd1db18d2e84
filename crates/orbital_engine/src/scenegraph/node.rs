//! Scene node: named container of components and child links

use slotmap::new_key_type;

use crate::foundation::math::Mat4;
use crate::scenegraph::component::Component;

new_key_type! {
    /// Non-owning index of a node inside its [`SceneGraph`].
    ///
    /// Keys are the parent/child references of the tree; ownership of the
    /// nodes themselves stays with the graph's arena.
    ///
    /// [`SceneGraph`]: crate::scenegraph::SceneGraph
    pub struct NodeKey;
}

/// Entity in the scene hierarchy.
///
/// A node owns an ordered set of components and links to its children by
/// key. Names are for lookup and editor display only; they need not be
/// unique and never participate in identity.
#[derive(Default)]
pub struct SceneNode {
    name: String,
    components: Vec<Box<dyn Component>>,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) parent: Option<NodeKey>,
}

impl SceneNode {
    /// Create an unnamed node with no components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with a debug/editor name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the tooling-friendly name of this node.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the tooling/debug name of the node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a component, preserving insertion order.
    ///
    /// A second Transform-capability component is stored but warned about;
    /// only the first ever supplies the local transform.
    pub fn add_component(&mut self, component: Box<dyn Component>) {
        if component.local_transform().is_some()
            && self
                .components
                .iter()
                .any(|existing| existing.local_transform().is_some())
        {
            log::warn!(
                "SceneNode '{}': duplicate transform component added; the first one wins",
                self.name
            );
        }
        self.components.push(component);
    }

    /// Builder-style [`add_component`](Self::add_component).
    #[must_use]
    pub fn with_component(mut self, component: Box<dyn Component>) -> Self {
        self.add_component(component);
        self
    }

    /// First component of type `T`, or `None` if the node has none.
    ///
    /// Linear in the number of components on this node.
    pub fn component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|component| component.as_any().downcast_ref::<T>())
    }

    /// Mutable variant of [`component`](Self::component).
    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|component| component.as_any_mut().downcast_mut::<T>())
    }

    /// All components in insertion order.
    pub fn components(&self) -> &[Box<dyn Component>] {
        &self.components
    }

    /// Mutable access to the component list.
    pub fn components_mut(&mut self) -> &mut Vec<Box<dyn Component>> {
        &mut self.components
    }

    /// The node's local transform: whatever its Transform-capability
    /// component produces, identity if it has none.
    ///
    /// World composition (parent x local) is the render walk's job, not
    /// the node's.
    pub fn local_transform(&self) -> Mat4 {
        self.components
            .iter()
            .find_map(|component| component.local_transform())
            .unwrap_or_else(Mat4::identity)
    }

    /// Key of the parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Child keys in insertion order.
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub(crate) fn take_components(&mut self) -> Vec<Box<dyn Component>> {
        std::mem::take(&mut self.components)
    }

    pub(crate) fn put_components(&mut self, components: Vec<Box<dyn Component>>) {
        debug_assert!(self.components.is_empty());
        self.components = components;
    }
}
