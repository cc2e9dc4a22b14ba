//! Scene module
//!
//! Provides the node arena (scene graph), the static/dynamic scene
//! container, the bounding volume hierarchy builder and culling strategies.

mod node;
mod scene_graph;
mod hierarchy;
mod culler;
mod scene;

pub use node::{NodeKey, NodeKind, NodeFlags, SceneNode};
pub use scene_graph::SceneGraph;
pub use hierarchy::{build_hierarchy, HierarchyBuilder, HierarchyConfig, HierarchyStats};
pub use culler::{Culler, VisibilityCuller, BruteForceCuller, VisibleNodeCache};
pub use scene::Scene;
