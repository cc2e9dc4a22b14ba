/// Line geometry for the editor overlays (bounding volumes, grid).
///
/// Every function appends line segments to `out` as consecutive point
/// pairs, ready for `CommandList::draw_lines`.

use glam::Vec3;
use crate::camera::Frustum;
use crate::math::Aabb;
use crate::scene::{NodeKey, SceneGraph};
use super::config::EditorGridOptions;

/// Append the 12 edges of a box (24 points). Empty boxes add nothing.
pub fn box_edges(aabb: &Aabb, out: &mut Vec<Vec3>) {
    if aabb.is_empty() {
        return;
    }
    let corners = aabb.corners();
    for i in 0..8 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                out.push(corners[i]);
                out.push(corners[i | bit]);
            }
        }
    }
}

/// Append the world boxes of the non-culled part of a hierarchy.
///
/// `draw_depth` is the number of levels still to descend. A box is drawn
/// when `draw_depth < 1` or the node has no children, and children are
/// visited while `draw_depth != 0`: -1 draws every level, 0 only `root`,
/// and n draws level n plus any shallower leaves. Nodes outside the
/// frustum are skipped with their subtree.
pub fn bounding_volume_lines(
    graph: &SceneGraph,
    root: NodeKey,
    frustum: &Frustum,
    draw_depth: i32,
    out: &mut Vec<Vec3>,
) {
    let mut stack = vec![(root, draw_depth)];
    while let Some((key, depth)) = stack.pop() {
        let Some(node) = graph.node(key) else { continue };
        if frustum.is_aabb_outside(node.bounds()) {
            continue;
        }
        let children = node.children();
        if depth < 1 || children.is_empty() {
            box_edges(node.bounds(), out);
        }
        if depth != 0 {
            stack.extend(children.iter().rev().map(|c| (*c, depth - 1)));
        }
    }
}

/// Append a square grid of `2 * radius` cells per side, centered on the
/// cell containing `camera_position` and lying at `grid_height`.
///
/// Nothing is emitted for a non-positive cell size, a negative radius, or a
/// camera cell index that does not fit in an `i32`.
pub fn grid_lines(camera_position: Vec3, options: &EditorGridOptions, out: &mut Vec<Vec3>) {
    let cell = options.cell_size;
    let radius = options.grid_radius;
    if cell.is_nan() || cell <= 0.0 || radius < 0 {
        return;
    }
    let (Some(x_cell), Some(z_cell)) = (
        cell_index(camera_position.x, cell),
        cell_index(camera_position.z, cell),
    ) else {
        return;
    };

    let radius = i64::from(radius);
    let x_start = x_cell - radius;
    let z_start = z_cell - radius;
    let x_end = x_start + 2 * radius;
    let z_end = z_start + 2 * radius;
    let y = options.grid_height;

    for x in x_start..=x_end {
        out.push(Vec3::new(x as f32 * cell, y, z_start as f32 * cell));
        out.push(Vec3::new(x as f32 * cell, y, z_end as f32 * cell));
    }
    for z in z_start..=z_end {
        out.push(Vec3::new(x_start as f32 * cell, y, z as f32 * cell));
        out.push(Vec3::new(x_end as f32 * cell, y, z as f32 * cell));
    }
}

/// Index of the grid cell holding `coordinate`, if it is an `i32`
fn cell_index(coordinate: f32, cell: f32) -> Option<i64> {
    let index = (coordinate / cell).floor();
    if index.is_finite() && index >= i32::MIN as f32 && index <= i32::MAX as f32 {
        Some(index as i64)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "debug_lines_tests.rs"]
mod tests;
