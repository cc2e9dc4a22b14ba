/// Frame renderer: cull the scene, then batch and submit what is visible.
///
/// The renderer owns the per-frame reusable buffers (visible node list,
/// instance matrices, debug line vertices) and a culling strategy. It never
/// talks to a graphics API directly: every command goes through the
/// `CommandList` passed to `render`.

use glam::Vec3;
use crate::error::Result;
use crate::engine_trace;
use crate::scene::{Culler, NodeKey, Scene, VisibilityCuller, VisibleNodeCache};
use super::batcher::RenderBatcher;
use super::command_list::{CommandList, Viewport};
use super::config::{EditorGridOptions, RendererConfig, RendererStats};
use super::debug_lines::{bounding_volume_lines, grid_lines};

pub struct Renderer {
    config: RendererConfig,
    viewport: Viewport,
    culler: Box<dyn Culler>,
    visible_nodes: VisibleNodeCache,
    batcher: RenderBatcher,
    line_vertices: Vec<Vec3>,
    last_stats: RendererStats,
}

impl Renderer {
    /// Renderer for a `width` x `height` viewport, culling with a
    /// `VisibilityCuller`
    pub fn new(config: RendererConfig, width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport::from_size(width, height),
            culler: Box::new(VisibilityCuller::new()),
            visible_nodes: VisibleNodeCache::with_capacity(config.visible_cache_capacity),
            batcher: RenderBatcher::new(config.instance_cache_capacity),
            line_vertices: Vec::new(),
            last_stats: RendererStats::default(),
            config,
        }
    }

    pub fn with_culler(mut self, culler: Box<dyn Culler>) -> Self {
        self.culler = culler;
        self
    }

    pub fn set_culler(&mut self, culler: Box<dyn Culler>) {
        self.culler = culler;
    }

    // ===== CONFIGURATION =====

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn set_instancing_enabled(&mut self, enabled: bool) {
        self.config.instancing_enabled = enabled;
    }

    /// Draw hierarchy boxes instead of meshes. `draw_depth` -1 draws every
    /// level.
    pub fn set_bounding_volume_mode(&mut self, enabled: bool, draw_depth: i32) {
        self.config.bounding_volume_mode = enabled;
        self.config.bounding_volume_draw_depth = draw_depth;
    }

    pub fn set_grid(&mut self, grid: EditorGridOptions) {
        self.config.grid = grid;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::from_size(width, height);
    }

    // ===== FRAME =====

    /// Fill the visible node list from the active camera: static root
    /// first, then dynamic root
    pub fn compute_occlusion(&mut self, scene: &Scene) -> &[NodeKey] {
        let capacity = self.visible_nodes.capacity();
        self.visible_nodes.clear();

        let frustum = scene.active_camera().frustum(self.viewport.aspect());
        let graph = scene.graph();
        self.culler.cull(graph, scene.static_root(), &frustum, &mut self.visible_nodes);
        self.culler.cull(graph, scene.dynamic_root(), &frustum, &mut self.visible_nodes);

        if self.visible_nodes.capacity() != capacity {
            engine_trace!("prism3d::Renderer",
                "Visible node cache grown from {} to {}", capacity, self.visible_nodes.capacity());
        }
        self.visible_nodes.as_slice()
    }

    /// Result of the last `compute_occlusion`
    pub fn visible_nodes(&self) -> &[NodeKey] {
        self.visible_nodes.as_slice()
    }

    /// Render one frame of `scene` into `cmd`.
    ///
    /// Sets the viewport and clears, culls, draws the editor grid when
    /// enabled, then either the hierarchy boxes (bounding volume mode) or
    /// the batched meshes. The first backend error aborts the frame.
    pub fn render(&mut self, scene: &Scene, cmd: &mut dyn CommandList) -> Result<RendererStats> {
        cmd.set_viewport(self.viewport)?;
        cmd.clear()?;

        let visible_count = self.compute_occlusion(scene).len();
        let camera = scene.active_camera();
        let view_projection = camera.view_projection_matrix(self.viewport.width, self.viewport.height);
        let mut stats = RendererStats::default();

        if self.config.grid.enabled {
            self.line_vertices.clear();
            grid_lines(camera.position(), &self.config.grid, &mut self.line_vertices);
            if !self.line_vertices.is_empty() {
                cmd.draw_lines(&self.line_vertices, &view_projection)?;
                stats.draw_calls += 1;
            }
        }

        if self.config.bounding_volume_mode {
            let frustum = camera.frustum(self.viewport.aspect());
            let depth = self.config.bounding_volume_draw_depth;
            self.line_vertices.clear();
            for root in [scene.static_root(), scene.dynamic_root()] {
                bounding_volume_lines(scene.graph(), root, &frustum, depth, &mut self.line_vertices);
            }
            if !self.line_vertices.is_empty() {
                cmd.draw_lines(&self.line_vertices, &view_projection)?;
                stats.draw_calls += 1;
            }
        } else {
            let batched = self.batcher.submit(
                scene.graph(),
                self.visible_nodes.as_slice(),
                &view_projection,
                self.config.instancing_enabled,
                cmd,
            )?;
            stats.shader_changes = batched.shader_changes;
            stats.material_changes = batched.material_changes;
            stats.mesh_binds = batched.mesh_binds;
            stats.draw_calls = stats.draw_calls.saturating_add(batched.draw_calls);
            stats.instanced_draw_calls = batched.instanced_draw_calls;
            stats.instances = batched.instances;
            stats.primitives = batched.primitives;
        }

        stats.visible_nodes = visible_count;
        engine_trace!("prism3d::Renderer",
            "Frame: {} visible, {} draws ({} instanced), {} primitives",
            stats.visible_nodes, stats.draw_calls, stats.instanced_draw_calls, stats.primitives);

        self.last_stats = stats;
        Ok(stats)
    }

    pub fn last_stats(&self) -> &RendererStats {
        &self.last_stats
    }

    // ===== CACHES =====

    /// Shrink the visible node list back to its configured capacity
    pub fn reset_visible_cache(&mut self) {
        self.visible_nodes.reset(self.config.visible_cache_capacity);
    }

    pub fn reset_instance_cache(&mut self) {
        self.batcher.reset_instance_cache();
    }

    pub fn resize_instance_cache(&mut self, required: usize) {
        self.batcher.resize_instance_cache(required);
    }

    pub fn instance_capacity(&self) -> usize {
        self.batcher.instance_capacity()
    }

    pub fn visible_capacity(&self) -> usize {
        self.visible_nodes.capacity()
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
