/// Bounding volume hierarchy builder.
///
/// Turns a flat list of children into a binary tree of Region nodes so the
/// culler can reject whole groups at once. Each split:
///
/// 1. boxes the children's bounds centers,
/// 2. picks the largest axis of that box (ties: X, then Y, then Z),
/// 3. sends children whose center is strictly below the box midpoint to the
///    first group and everything else to the second,
/// 4. re-attaches single-member groups directly and wraps larger groups in
///    a new Region, which is split recursively.
///
/// Only nodes with more than two children are split. Leaf membership is
/// preserved: every original child ends up exactly once under the node.
///
/// The builder reads cached world bounds, so the subtree must have been
/// through both recompute passes. New regions come out bounds-dirty and the
/// caller runs a bounds pass afterwards.

use glam::Vec3;
use crate::error::Result;
use crate::{engine_bail, engine_debug};
use crate::math::Aabb;
use super::node::{NodeFlags, NodeKey, SceneNode};
use super::scene_graph::SceneGraph;

// ===== CONFIG =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyConfig {
    /// Depth at which splitting stops and the remaining children are left
    /// as an unsorted group
    pub max_depth: u32,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

// ===== STATS =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HierarchyStats {
    /// Region nodes inserted
    pub regions_created: usize,
    /// Deepest split level reached (0 = the node itself)
    pub max_depth: u32,
    /// Groups left unsplit because every center fell on the same side of
    /// the midpoint or the depth limit was reached
    pub degenerate_groups: usize,
}

// ===== BUILDER =====

pub struct HierarchyBuilder {
    config: HierarchyConfig,
}

impl HierarchyBuilder {
    pub fn new(config: HierarchyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Partition the children of `node` into a binary Region tree
    pub fn build(&self, graph: &mut SceneGraph, node: NodeKey) -> Result<HierarchyStats> {
        if !graph.contains(node) {
            engine_bail!(InvalidNode, "prism3d::HierarchyBuilder",
                "Node {:?} not found", node);
        }

        let mut stats = HierarchyStats::default();
        let children = graph.children(node).len();
        self.split(graph, node, 0, &mut stats)?;

        engine_debug!("prism3d::HierarchyBuilder",
            "Partitioned {} children of {:?}: {} regions, depth {}, {} degenerate groups",
            children, node, stats.regions_created, stats.max_depth, stats.degenerate_groups);
        Ok(stats)
    }

    fn split(
        &self,
        graph: &mut SceneGraph,
        node: NodeKey,
        depth: u32,
        stats: &mut HierarchyStats,
    ) -> Result<()> {
        stats.max_depth = stats.max_depth.max(depth);

        let children = graph.children(node).to_vec();
        if children.len() <= 2 {
            return Ok(());
        }
        if depth >= self.config.max_depth {
            stats.degenerate_groups += 1;
            return Ok(());
        }

        let centers: Vec<Vec3> = children
            .iter()
            .map(|c| graph.node(*c).map_or(Vec3::NAN, |n| n.bounds().center()))
            .collect();
        let center_box = Aabb::from_points(centers.iter().copied());
        let axis = center_box.largest_axis().index();
        let midpoint = center_box.center()[axis];

        let (lower, upper): (Vec<_>, Vec<_>) = children
            .iter()
            .zip(&centers)
            .partition(|(_, center)| center[axis] < midpoint);

        // Coincident (or undefined) centers: no split makes progress
        if lower.is_empty() || upper.is_empty() {
            stats.degenerate_groups += 1;
            return Ok(());
        }

        let parent_global = graph.node(node).map(|n| *n.global_transform());
        let mut new_children = Vec::with_capacity(2);
        let mut regions = Vec::with_capacity(2);

        for group in [lower, upper] {
            let members: Vec<NodeKey> = group.into_iter().map(|(k, _)| *k).collect();
            if members.len() == 1 {
                new_children.push(members[0]);
                continue;
            }

            let mut region = SceneNode::region();
            // Identity local transform: the region's world transform is its
            // parent's, so members keep valid world transforms
            if let Some(global) = parent_global {
                region.global_transform = global;
                region.flags.remove(NodeFlags::TRANSFORM_DIRTY);
            }
            let region = graph.insert(region);
            graph.replace_children(region, members);
            new_children.push(region);
            regions.push(region);
        }

        stats.regions_created += regions.len();
        graph.replace_children(node, new_children);
        // Regions start bounds-dirty; propagate to the ancestors of `node`
        graph.mark_bounds_dirty(node)?;

        for region in regions {
            self.split(graph, region, depth + 1, stats)?;
        }
        Ok(())
    }
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new(HierarchyConfig::default())
    }
}

/// Partition the children of `node` with the default configuration
pub fn build_hierarchy(graph: &mut SceneGraph, node: NodeKey) -> Result<HierarchyStats> {
    HierarchyBuilder::default().build(graph, node)
}

#[cfg(test)]
#[path = "hierarchy_tests.rs"]
mod tests;
