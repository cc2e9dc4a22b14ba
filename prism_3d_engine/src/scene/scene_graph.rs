/// Arena-backed scene graph.
///
/// Nodes are stored in a SlotMap and addressed by `NodeKey`. Each node has
/// at most one parent; `add_child` refuses any edit that would give a node a
/// second parent or close a cycle, so every subtree is a tree.
///
/// World transforms and world bounds are cached per node and refreshed
/// lazily by `recompute_transforms` (pre-order) and `recompute_bounds`
/// (post-order). Invariants between passes:
///
/// - a node whose `TRANSFORM_DIRTY` flag is clear has
///   `global = parent.global * local` (or `local` for a parentless node);
/// - a node whose `BOUNDS_DIRTY` flag is clear has bounds equal to the union
///   of its children's bounds, plus its own mesh bounds for a StaticMesh.

use slotmap::SlotMap;
use glam::Mat4;
use crate::error::Result;
use crate::{engine_bail, engine_trace};
use crate::math::Aabb;
use super::node::{NodeFlags, NodeKey, NodeKind, SceneNode};

pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    // ===== NODE STORAGE =====

    /// Store a detached node and return its key
    pub fn insert(&mut self, mut node: SceneNode) -> NodeKey {
        node.parent = None;
        node.children.clear();
        self.nodes.insert(node)
    }

    /// Store `node` and attach it as the last child of `parent`
    pub fn insert_child(&mut self, parent: NodeKey, node: SceneNode) -> Result<NodeKey> {
        if !self.nodes.contains_key(parent) {
            engine_bail!(InvalidNode, "prism3d::SceneGraph",
                "Parent node {:?} not found", parent);
        }
        let key = self.insert(node);
        self.add_child(parent, key)?;
        Ok(key)
    }

    /// Append `child` to `parent`'s child list.
    ///
    /// Nothing is recomputed here: the child keeps its dirty flags and the
    /// caller marks bounds dirty when it needs the parent chain refreshed.
    ///
    /// Fails with `Error::InvalidNode` when either key is stale, when the
    /// child already has a parent, or when the edit would create a cycle.
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            engine_bail!(InvalidNode, "prism3d::SceneGraph",
                "Parent node {:?} not found", parent);
        }
        let Some(child_node) = self.nodes.get(child) else {
            engine_bail!(InvalidNode, "prism3d::SceneGraph",
                "Child node {:?} not found", child);
        };
        if let Some(current) = child_node.parent {
            engine_bail!(InvalidNode, "prism3d::SceneGraph",
                "Node {:?} already has parent {:?}", child, current);
        }
        if child == parent || self.is_ancestor(child, parent) {
            engine_bail!(InvalidNode, "prism3d::SceneGraph",
                "Attaching {:?} under {:?} would create a cycle", child, parent);
        }

        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Remove `key` and its whole subtree. The former parent's bounds are
    /// marked dirty. Returns the number of removed nodes.
    pub fn remove_subtree(&mut self, key: NodeKey) -> Result<usize> {
        let Some(node) = self.nodes.get(key) else {
            engine_bail!(InvalidNode, "prism3d::SceneGraph",
                "Node {:?} not found", key);
        };

        if let Some(parent) = node.parent {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|c| *c != key);
            }
            self.propagate_bounds_dirty(parent);
        }

        let doomed = self.descendants(key);
        for k in &doomed {
            self.nodes.remove(*k);
        }
        engine_trace!("prism3d::SceneGraph", "Removed subtree {:?} ({} nodes)", key, doomed.len());
        Ok(doomed.len())
    }

    /// Swap the child list of `parent` for `children`, updating back-links.
    ///
    /// The caller guarantees that `children` is a permutation of nodes that
    /// are either current children of `parent` or children of nodes in the
    /// new list. Used by the hierarchy builder.
    pub(super) fn replace_children(&mut self, parent: NodeKey, children: Vec<NodeKey>) {
        for child in &children {
            if let Some(node) = self.nodes.get_mut(*child) {
                node.parent = Some(parent);
            }
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children = children;
        }
    }

    // ===== QUERIES =====

    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `key` in insertion order (empty for a stale key)
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|n| n.parent)
    }

    /// True if `ancestor` is a strict ancestor of `key`
    pub fn is_ancestor(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = self.parent(key);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.parent(k);
        }
        false
    }

    /// Number of nodes on the longest root-to-leaf path of the subtree
    pub fn height(&self, root: NodeKey) -> usize {
        if !self.contains(root) {
            return 0;
        }
        let mut height = 0;
        let mut stack = vec![(root, 1usize)];
        while let Some((key, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(self.children(key).iter().map(|c| (*c, depth + 1)));
        }
        height
    }

    // ===== TRAVERSAL =====

    /// Visit `root` and its descendants, each node before its children,
    /// children in insertion order
    pub fn for_each_pre_order<F: FnMut(NodeKey, &SceneNode)>(&self, root: NodeKey, mut f: F) {
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            if let Some(node) = self.nodes.get(key) {
                f(key, node);
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }

    /// Visit `root` and its descendants, each node after all of its children
    pub fn for_each_post_order<F: FnMut(NodeKey, &SceneNode)>(&self, root: NodeKey, mut f: F) {
        // (key, children already pushed)
        let mut stack = vec![(root, false)];
        while let Some((key, expanded)) = stack.pop() {
            let Some(node) = self.nodes.get(key) else { continue };
            if expanded {
                f(key, node);
            } else {
                stack.push((key, true));
                stack.extend(node.children.iter().rev().map(|c| (*c, false)));
            }
        }
    }

    /// Keys of `root` and all its descendants in pre-order
    pub fn descendants(&self, root: NodeKey) -> Vec<NodeKey> {
        let mut keys = Vec::new();
        self.for_each_pre_order(root, |key, _| keys.push(key));
        keys
    }

    // ===== EDITS =====

    /// Replace the local transform. The node becomes transform-dirty and
    /// bounds-dirty (propagated to its ancestors).
    pub fn set_transform(&mut self, key: NodeKey, transform: Mat4) -> Result<()> {
        let Some(node) = self.nodes.get_mut(key) else {
            engine_bail!(InvalidNode, "prism3d::SceneGraph",
                "Node {:?} not found", key);
        };
        node.transform = transform;
        node.flags.insert(NodeFlags::TRANSFORM_DIRTY);
        self.mark_bounds_dirty(key)
    }

    /// Flag the node's world transform as stale. Descendants are refreshed
    /// by the next `recompute_transforms` pass without being flagged here.
    pub fn mark_transform_dirty(&mut self, key: NodeKey) -> Result<()> {
        let Some(node) = self.nodes.get_mut(key) else {
            engine_bail!(InvalidNode, "prism3d::SceneGraph",
                "Node {:?} not found", key);
        };
        node.flags.insert(NodeFlags::TRANSFORM_DIRTY);
        Ok(())
    }

    /// Flag the node's bounds as stale and propagate up the parent chain,
    /// stopping at the first ancestor that is already bounds-dirty
    pub fn mark_bounds_dirty(&mut self, key: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(key) {
            engine_bail!(InvalidNode, "prism3d::SceneGraph",
                "Node {:?} not found", key);
        }
        if let Some(node) = self.nodes.get_mut(key) {
            node.flags.insert(NodeFlags::BOUNDS_DIRTY);
        }
        if let Some(parent) = self.parent(key) {
            self.propagate_bounds_dirty(parent);
        }
        Ok(())
    }

    fn propagate_bounds_dirty(&mut self, start: NodeKey) {
        let mut current = Some(start);
        while let Some(key) = current {
            let Some(node) = self.nodes.get_mut(key) else { break };
            if node.flags.contains(NodeFlags::BOUNDS_DIRTY) {
                break;
            }
            node.flags.insert(NodeFlags::BOUNDS_DIRTY);
            current = node.parent;
        }
    }

    // ===== RECOMPUTE PASSES =====

    /// Pre-order transform pass over the subtree of `root`.
    ///
    /// A dirty node recomputes `global = parent.global * local` and forces
    /// the same recomputation on its entire subtree. Clean nodes under clean
    /// ancestors are skipped. Every recomputed node is also marked
    /// bounds-dirty, since its world bounds moved with it.
    ///
    /// Returns the number of recomputed nodes.
    pub fn recompute_transforms(&mut self, root: NodeKey) -> usize {
        let mut recomputed = 0;
        // (key, an ancestor was recomputed in this pass)
        let mut stack = vec![(root, false)];

        while let Some((key, forced)) = stack.pop() {
            let Some(node) = self.nodes.get(key) else { continue };
            let recompute = forced || node.flags.contains(NodeFlags::TRANSFORM_DIRTY);

            if recompute {
                let parent_global = node.parent
                    .and_then(|p| self.nodes.get(p))
                    .map(|p| p.global_transform);
                if let Some(node) = self.nodes.get_mut(key) {
                    node.global_transform = match parent_global {
                        Some(parent_global) => parent_global * node.transform,
                        None => node.transform,
                    };
                    node.flags.remove(NodeFlags::TRANSFORM_DIRTY);
                    node.flags.insert(NodeFlags::BOUNDS_DIRTY);
                }
                if let Some(parent) = self.parent(key) {
                    self.propagate_bounds_dirty(parent);
                }
                recomputed += 1;
            }

            if let Some(node) = self.nodes.get(key) {
                stack.extend(node.children.iter().rev().map(|c| (*c, recompute)));
            }
        }

        if recomputed > 0 {
            engine_trace!("prism3d::SceneGraph",
                "Recomputed {} world transforms under {:?}", recomputed, root);
        }
        recomputed
    }

    /// Post-order bounds pass over the subtree of `root`.
    ///
    /// Every bounds-dirty node recomputes its world bounds after all of its
    /// children have been refreshed. Returns the number of recomputed nodes.
    pub fn recompute_bounds(&mut self, root: NodeKey) -> usize {
        let order = self.descendants(root);
        let mut recomputed = 0;

        // Reverse pre-order visits every child before its parent
        for key in order.iter().rev() {
            let dirty = self.nodes.get(*key).map_or(false, |n| n.is_bounds_dirty());
            if !dirty {
                continue;
            }
            let bounds = self.compute_bounds(*key);
            if let Some(node) = self.nodes.get_mut(*key) {
                node.bounds = bounds;
                node.flags.remove(NodeFlags::BOUNDS_DIRTY);
            }
            recomputed += 1;
        }

        if recomputed > 0 {
            engine_trace!("prism3d::SceneGraph",
                "Recomputed {} bounding volumes under {:?}", recomputed, root);
        }
        recomputed
    }

    /// World bounds of one node from its children's cached bounds
    fn compute_bounds(&self, key: NodeKey) -> Aabb {
        let Some(node) = self.nodes.get(key) else { return Aabb::EMPTY };
        let children = Aabb::union_all(
            node.children.iter().filter_map(|c| self.nodes.get(*c)).map(|c| &c.bounds),
        );

        match &node.kind {
            NodeKind::StaticMesh { mesh, .. } => {
                let own = mesh.bounding_box().transform(&node.global_transform);
                Aabb::union(&own, &children)
            }
            NodeKind::Root | NodeKind::Region | NodeKind::Transform => children,
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
