/// Scene - a scene graph split into a static and a dynamic subtree.
///
/// Static content is placed once (level geometry, props), partitioned by
/// the hierarchy builder and refreshed only when edited. Dynamic content is
/// refreshed every frame by `update`. The scene also owns the active camera.

use glam::Mat4;
use crate::camera::Camera;
use crate::error::Result;
use crate::engine_bail;
use super::hierarchy::{HierarchyBuilder, HierarchyConfig, HierarchyStats};
use super::node::{NodeKey, SceneNode};
use super::scene_graph::SceneGraph;

pub struct Scene {
    graph: SceneGraph,
    static_root: NodeKey,
    dynamic_root: NodeKey,
    active_camera: Camera,
}

impl Scene {
    /// Empty scene with both roots and a default camera
    pub fn new() -> Self {
        let mut graph = SceneGraph::new();
        let static_root = graph.insert(SceneNode::root());
        let dynamic_root = graph.insert(SceneNode::root());
        Self {
            graph,
            static_root,
            dynamic_root,
            active_camera: Camera::default(),
        }
    }

    // ===== ACCESSORS =====

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Direct arena access for structural edits (`add_child`,
    /// `set_transform`, `mark_bounds_dirty`, ...)
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn static_root(&self) -> NodeKey {
        self.static_root
    }

    pub fn dynamic_root(&self) -> NodeKey {
        self.dynamic_root
    }

    pub fn active_camera(&self) -> &Camera {
        &self.active_camera
    }

    pub fn active_camera_mut(&mut self) -> &mut Camera {
        &mut self.active_camera
    }

    pub fn set_active_camera(&mut self, camera: Camera) {
        self.active_camera = camera;
    }

    // ===== EDITS =====

    /// Attach `node` under `parent` (the static root when `None`) and mark
    /// the new node's bounds dirty up to its root
    pub fn add_node(&mut self, node: SceneNode, parent: Option<NodeKey>) -> Result<NodeKey> {
        let parent = parent.unwrap_or(self.static_root);
        let key = self.graph.insert_child(parent, node)?;
        self.graph.mark_bounds_dirty(key)?;
        Ok(key)
    }

    /// Move a node by replacing its local transform
    pub fn set_node_transform(&mut self, key: NodeKey, transform: Mat4) -> Result<()> {
        self.graph.set_transform(key, transform)
    }

    /// Remove a node and its subtree. The two roots cannot be removed.
    pub fn remove_node(&mut self, key: NodeKey) -> Result<usize> {
        if key == self.static_root || key == self.dynamic_root {
            engine_bail!(InvalidNode, "prism3d::Scene",
                "Scene root {:?} cannot be removed", key);
        }
        self.graph.remove_subtree(key)
    }

    // ===== PASSES =====

    /// Refresh the static subtree: transforms (pre-order) then bounds
    /// (post-order)
    pub fn process_static_scene_graph(&mut self) {
        self.graph.recompute_transforms(self.static_root);
        self.graph.recompute_bounds(self.static_root);
    }

    /// Per-frame refresh of the dynamic subtree
    pub fn update(&mut self) {
        self.graph.recompute_transforms(self.dynamic_root);
        self.graph.recompute_bounds(self.dynamic_root);
    }

    /// Partition the static root's children into a Region tree, then
    /// refresh the static subtree
    pub fn build_static_hierarchy(&mut self, config: HierarchyConfig) -> Result<HierarchyStats> {
        self.process_static_scene_graph();
        let stats = HierarchyBuilder::new(config).build(&mut self.graph, self.static_root)?;
        self.process_static_scene_graph();
        Ok(stats)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
