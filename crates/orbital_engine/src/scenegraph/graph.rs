//! Scene graph: arena-backed tree with pre-order traversal
//!
//! The graph owns every node in a slotmap arena; parent and child links are
//! keys, so the parent back-reference can never own or free anything.
//! Removing a node removes its whole subtree, and re-parenting is only
//! expressible as remove-then-reinsert, which keeps the structure a tree by
//! construction.

use slotmap::SlotMap;

use crate::foundation::math::Mat4;
use crate::render::device::RenderDevice;
use crate::scenegraph::component::{Component, NodeContext};
use crate::scenegraph::node::{NodeKey, SceneNode};

/// Single-rooted scene hierarchy with deterministic pre-order traversal.
#[derive(Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
    root: Option<NodeKey>,
}

impl SceneGraph {
    /// Create an empty graph with no root node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire tree with a new root node.
    ///
    /// The previous hierarchy is dropped; the new root has no parent.
    pub fn set_root(&mut self, root: SceneNode) -> NodeKey {
        self.nodes.clear();
        let mut root = root;
        root.parent = None;
        root.children.clear();
        let key = self.nodes.insert(root);
        self.root = Some(key);
        key
    }

    /// Empties the graph, dropping every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Key of the root node, if the graph is non-empty.
    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    /// Number of live nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node by key.
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Mutably borrow a node by key.
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    /// Inserts `child` under `parent`, appending to the child order and
    /// setting the parent back-reference.
    ///
    /// Returns `None` (and logs) if the parent key is stale.
    pub fn add_child(&mut self, parent: NodeKey, child: SceneNode) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            log::warn!("SceneGraph: add_child on a stale parent key; node dropped");
            return None;
        }
        let mut child = child;
        child.parent = Some(parent);
        child.children.clear();
        let key = self.nodes.insert(child);
        self.nodes[parent].children.push(key);
        Some(key)
    }

    /// Removes a node and its entire subtree.
    ///
    /// Returns `false` if the key was stale. Removing the root empties the
    /// graph.
    pub fn remove_subtree(&mut self, key: NodeKey) -> bool {
        if !self.nodes.contains_key(key) {
            return false;
        }

        if let Some(parent) = self.nodes[key].parent {
            self.nodes[parent].children.retain(|&child| child != key);
        }

        let mut doomed = Vec::new();
        self.collect_preorder(key, &mut doomed);
        for key in doomed {
            self.nodes.remove(key);
        }

        if self.root == Some(key) {
            self.root = None;
        }
        true
    }

    /// First node whose name matches, in pre-order.
    ///
    /// Names are not unique; this is a debugging/editor convenience, not an
    /// identity lookup.
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.traversal_order()
            .into_iter()
            .find(|&key| self.nodes[key].name() == name)
    }

    /// World transform of a node: the composition of every ancestor's
    /// local transform with its own.
    pub fn world_transform(&self, key: NodeKey) -> Mat4 {
        let mut chain = Vec::new();
        let mut cursor = Some(key);
        while let Some(current) = cursor {
            let Some(node) = self.nodes.get(current) else {
                break;
            };
            chain.push(node.local_transform());
            cursor = node.parent;
        }
        chain
            .into_iter()
            .rev()
            .fold(Mat4::identity(), |world, local| world * local)
    }

    /// Keys of all nodes in pre-order: parent before children, siblings in
    /// insertion order.
    pub fn traversal_order(&self) -> Vec<NodeKey> {
        let mut order = Vec::with_capacity(self.nodes.len());
        if let Some(root) = self.root {
            self.collect_preorder(root, &mut order);
        }
        order
    }

    /// Pre-order depth-first read-only visit; no-op on an empty graph.
    pub fn traverse(&self, mut visitor: impl FnMut(NodeKey, &SceneNode)) {
        for key in self.traversal_order() {
            visitor(key, &self.nodes[key]);
        }
    }

    /// Pre-order depth-first mutable visit; no-op on an empty graph.
    pub fn traverse_mut(&mut self, mut visitor: impl FnMut(NodeKey, &mut SceneNode)) {
        for key in self.traversal_order() {
            if let Some(node) = self.nodes.get_mut(key) {
                visitor(key, node);
            }
        }
    }

    /// Calls `on_attach` across the whole tree, pre-order.
    ///
    /// Used exactly once at scene setup.
    pub fn attach(&mut self) {
        for key in self.traversal_order() {
            self.dispatch(key, |component, ctx| component.on_attach(ctx));
        }
    }

    /// Calls `on_detach` across the whole tree, pre-order.
    ///
    /// Paired inverse of [`attach`](Self::attach), used once at teardown.
    pub fn detach(&mut self) {
        for key in self.traversal_order() {
            self.dispatch(key, |component, ctx| component.on_detach(ctx));
        }
    }

    /// Calls `on_update` on every component of every node, pre-order,
    /// components in insertion order.
    pub fn update(&mut self, delta_seconds: f64) {
        let dt = delta_seconds.max(0.0);
        for key in self.traversal_order() {
            self.dispatch(key, |component, ctx| component.on_update(ctx, dt));
        }
    }

    /// Generic pre-order render pass calling every component's `on_render`.
    ///
    /// The shader-based [`SceneRenderer`] replaces this with a context-aware
    /// pass but preserves the same traversal order.
    ///
    /// [`SceneRenderer`]: crate::render::SceneRenderer
    pub fn render(&mut self, device: &mut dyn RenderDevice) {
        for key in self.traversal_order() {
            self.dispatch(key, |component, ctx| component.on_render(ctx, device));
        }
    }

    fn collect_preorder(&self, key: NodeKey, out: &mut Vec<NodeKey>) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        out.push(key);
        for &child in &node.children {
            self.collect_preorder(child, out);
        }
    }

    fn dispatch(
        &mut self,
        key: NodeKey,
        mut hook: impl FnMut(&mut dyn Component, &NodeContext<'_>),
    ) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        let local_transform = node.local_transform();
        let mut components = node.take_components();
        {
            let node = &self.nodes[key];
            let ctx = NodeContext {
                key,
                name: node.name(),
                local_transform,
            };
            for component in &mut components {
                hook(component.as_mut(), &ctx);
            }
        }
        self.nodes[key].put_components(components);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scenegraph::components::TransformComponent;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Component that records which hooks ran, in order.
    struct HookRecorder {
        label: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl HookRecorder {
        fn new(label: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Box<Self> {
            Box::new(Self {
                label,
                log: Rc::clone(log),
            })
        }

        fn record(&self, event: &str) {
            self.log.borrow_mut().push(format!("{}:{}", self.label, event));
        }
    }

    impl Component for HookRecorder {
        fn on_attach(&mut self, _node: &NodeContext<'_>) {
            self.record("attach");
        }

        fn on_detach(&mut self, _node: &NodeContext<'_>) {
            self.record("detach");
        }

        fn on_update(&mut self, _node: &NodeContext<'_>, _delta_seconds: f64) {
            self.record("update");
        }
    }

    fn build_family() -> (SceneGraph, NodeKey, NodeKey, NodeKey) {
        let mut graph = SceneGraph::new();
        let root = graph.set_root(SceneNode::named("root"));
        let first = graph.add_child(root, SceneNode::named("first")).unwrap();
        let second = graph.add_child(root, SceneNode::named("second")).unwrap();
        (graph, root, first, second)
    }

    #[test]
    fn add_child_links_parent_and_child_exactly_once() {
        let (graph, root, first, _) = build_family();
        assert_eq!(graph.node(first).unwrap().parent(), Some(root));
        let occurrences = graph
            .node(root)
            .unwrap()
            .children()
            .iter()
            .filter(|&&key| key == first)
            .count();
        assert_eq!(occurrences, 1);
    }

    #[test]
    fn root_has_no_parent() {
        let (graph, root, _, _) = build_family();
        assert_eq!(graph.node(root).unwrap().parent(), None);
    }

    #[test]
    fn traversal_is_preorder_with_sibling_insertion_order() {
        let (mut graph, _, first, second) = build_family();
        let grandchild = graph.add_child(first, SceneNode::named("grand")).unwrap();

        let mut visited = Vec::new();
        graph.traverse(|_, node| visited.push(node.name().to_string()));
        assert_eq!(visited, ["root", "first", "grand", "second"]);

        let order = graph.traversal_order();
        assert!(order.iter().position(|&k| k == grandchild) < order.iter().position(|&k| k == second));
    }

    #[test]
    fn empty_graph_traversal_is_a_noop() {
        let mut graph = SceneGraph::new();
        let mut visits = 0;
        graph.traverse(|_, _| visits += 1);
        graph.update(0.016);
        assert_eq!(visits, 0);
    }

    #[test]
    fn attach_update_detach_reach_every_component_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut graph = SceneGraph::new();
        let root = graph.set_root(
            SceneNode::named("root").with_component(HookRecorder::new("root", &log)),
        );
        graph.add_child(
            root,
            SceneNode::named("child")
                .with_component(HookRecorder::new("child_a", &log))
                .with_component(HookRecorder::new("child_b", &log)),
        );

        graph.attach();
        graph.update(0.5);
        graph.detach();

        let events = log.borrow();
        assert_eq!(
            *events,
            [
                "root:attach",
                "child_a:attach",
                "child_b:attach",
                "root:update",
                "child_a:update",
                "child_b:update",
                "root:detach",
                "child_a:detach",
                "child_b:detach",
            ]
        );
    }

    #[test]
    fn set_root_replaces_the_entire_tree() {
        let (mut graph, _, _, _) = build_family();
        assert_eq!(graph.len(), 3);
        graph.set_root(SceneNode::named("fresh"));
        assert_eq!(graph.len(), 1);
        assert!(graph.find_by_name("first").is_none());
    }

    #[test]
    fn remove_subtree_cascades_and_unlinks() {
        let (mut graph, root, first, _) = build_family();
        graph.add_child(first, SceneNode::named("grand"));

        assert!(graph.remove_subtree(first));
        assert_eq!(graph.len(), 2);
        assert!(graph.find_by_name("grand").is_none());
        assert!(!graph.node(root).unwrap().children().contains(&first));
        assert!(!graph.remove_subtree(first));
    }

    #[test]
    fn world_transform_composes_ancestors() {
        let mut graph = SceneGraph::new();
        let mut parent_transform = TransformComponent::new();
        parent_transform.position = Vec3::new(10.0, 0.0, 0.0);
        let root = graph.set_root(
            SceneNode::named("root").with_component(Box::new(parent_transform)),
        );

        let mut child_transform = TransformComponent::new();
        child_transform.position = Vec3::new(0.0, 5.0, 0.0);
        let child = graph
            .add_child(
                root,
                SceneNode::named("child").with_component(Box::new(child_transform)),
            )
            .unwrap();

        let world = graph.world_transform(child);
        let position = world.column(3);
        assert!((position[0] - 10.0).abs() < 1e-5);
        assert!((position[1] - 5.0).abs() < 1e-5);
    }

    #[test]
    fn missing_component_query_returns_none() {
        let (graph, root, _, _) = build_family();
        assert!(graph.node(root).unwrap().component::<TransformComponent>().is_none());
    }
}
