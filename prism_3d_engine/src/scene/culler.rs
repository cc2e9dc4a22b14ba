/// Visibility culling strategies.
///
/// A Culler walks a subtree of the scene graph and appends the StaticMesh
/// nodes that may be visible from a frustum to a caller-owned cache. The
/// cache is NOT cleared, so several roots can be culled into one list.

use crate::camera::Frustum;
use crate::utils::ArrayCache;
use super::node::NodeKey;
use super::scene_graph::SceneGraph;

/// Reusable list of visible node keys, owned by the renderer
pub type VisibleNodeCache = ArrayCache<NodeKey>;

/// Strategy for determining visible mesh nodes.
///
/// `&mut self` allows stateful implementations to keep data across frames.
pub trait Culler: Send + Sync {
    /// Append the potentially visible StaticMesh nodes under `root`
    fn cull(
        &mut self,
        graph: &SceneGraph,
        root: NodeKey,
        frustum: &Frustum,
        visible: &mut VisibleNodeCache,
    );
}

/// Returns every StaticMesh node of the subtree (no actual culling).
///
/// Baseline for comparison and for debugging culling issues.
pub struct BruteForceCuller;

impl BruteForceCuller {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BruteForceCuller {
    fn default() -> Self {
        Self::new()
    }
}

impl Culler for BruteForceCuller {
    fn cull(
        &mut self,
        graph: &SceneGraph,
        root: NodeKey,
        _frustum: &Frustum,
        visible: &mut VisibleNodeCache,
    ) {
        graph.for_each_pre_order(root, |key, node| {
            if node.is_static_mesh() {
                visible.push(key);
            }
        });
    }
}

/// Hierarchical frustum culler.
///
/// Depth-first from `root`: a node whose cached world bounds are outside
/// the frustum is skipped together with its whole subtree. Otherwise a
/// StaticMesh node is appended and the children are visited, whatever the
/// node kind. Output order is pre-order, children in insertion order.
///
/// Relies on cached bounds, so both recompute passes must have run.
pub struct VisibilityCuller {
    stack: Vec<NodeKey>,
}

impl VisibilityCuller {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }
}

impl Default for VisibilityCuller {
    fn default() -> Self {
        Self::new()
    }
}

impl Culler for VisibilityCuller {
    fn cull(
        &mut self,
        graph: &SceneGraph,
        root: NodeKey,
        frustum: &Frustum,
        visible: &mut VisibleNodeCache,
    ) {
        self.stack.clear();
        self.stack.push(root);

        while let Some(key) = self.stack.pop() {
            let Some(node) = graph.node(key) else { continue };
            if frustum.is_aabb_outside(node.bounds()) {
                continue;
            }
            if node.is_static_mesh() {
                visible.push(key);
            }
            self.stack.extend(node.children().iter().rev().copied());
        }
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
