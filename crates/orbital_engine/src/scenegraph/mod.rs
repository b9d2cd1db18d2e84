//! Scene graph core
//!
//! Retained-mode hierarchy of named nodes, each carrying an ordered list of
//! polymorphic components. The graph walks the tree in pre-order for
//! attach, update, and render; components implement behavior through the
//! lifecycle hooks of [`Component`].

pub mod component;
pub mod components;
pub mod graph;
pub mod node;

pub use component::{Component, NodeContext};
pub use graph::SceneGraph;
pub use node::{NodeKey, SceneNode};
