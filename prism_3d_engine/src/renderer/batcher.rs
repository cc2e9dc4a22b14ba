/// Render batcher - turns a visible node list into grouped draw commands.
///
/// Visible StaticMesh nodes are grouped by shader, then by material, then
/// by mesh, so that each shader is bound once, each material applied once
/// and each mesh bound once per frame. Groups appear in the order their
/// first member appears in the visible list. Materials and meshes are
/// compared by `Arc` identity, shaders by handle.
///
/// Per material group the material is applied and the view-projection
/// uniform written. Per mesh group either:
/// - instancing: every world matrix is written to the instance cache,
///   uploaded once and drawn with one instanced draw; or
/// - immediate: the mesh is bound once and each instance writes its world
///   matrix uniform and issues one draw.

use std::sync::Arc;
use glam::Mat4;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::{engine_err, engine_trace};
use crate::resource::{Material, Mesh, ShaderHandle};
use crate::scene::{NodeKey, NodeKind, SceneGraph, SceneNode};
use crate::utils::ArrayCache;
use super::command_list::CommandList;
use super::config::RendererStats;

// ===== GROUPS =====

/// Nodes sharing one mesh (and one material)
pub struct MeshBatch<'a> {
    pub mesh: &'a Arc<Mesh>,
    pub nodes: Vec<&'a SceneNode>,
}

/// Mesh groups sharing one material
pub struct MaterialBatch<'a> {
    pub material: &'a Arc<Material>,
    pub meshes: Vec<MeshBatch<'a>>,
}

/// Material groups sharing one shader
pub struct ShaderBatch<'a> {
    pub shader: ShaderHandle,
    pub materials: Vec<MaterialBatch<'a>>,
}

// ===== BATCHER =====

pub struct RenderBatcher {
    instance_cache: ArrayCache<Mat4>,
    default_instance_capacity: usize,
}

impl RenderBatcher {
    pub fn new(instance_capacity: usize) -> Self {
        Self {
            instance_cache: ArrayCache::with_capacity(instance_capacity),
            default_instance_capacity: instance_capacity,
        }
    }

    /// Group the visible nodes. Stale keys and non-mesh nodes are skipped.
    pub fn group<'a>(graph: &'a SceneGraph, visible: &[NodeKey]) -> Vec<ShaderBatch<'a>> {
        let mut batches: Vec<ShaderBatch<'a>> = Vec::new();
        let mut shader_index: FxHashMap<ShaderHandle, usize> = FxHashMap::default();
        let mut material_index: FxHashMap<*const Material, usize> = FxHashMap::default();
        let mut mesh_index: FxHashMap<(*const Material, *const Mesh), usize> = FxHashMap::default();

        for key in visible {
            let Some(node) = graph.node(*key) else { continue };
            let NodeKind::StaticMesh { mesh, material } = node.kind() else { continue };

            let s = *shader_index.entry(material.shader()).or_insert_with(|| {
                batches.push(ShaderBatch { shader: material.shader(), materials: Vec::new() });
                batches.len() - 1
            });

            let material_ptr = Arc::as_ptr(material);
            let m = *material_index.entry(material_ptr).or_insert_with(|| {
                let materials = &mut batches[s].materials;
                materials.push(MaterialBatch { material, meshes: Vec::new() });
                materials.len() - 1
            });

            let g = *mesh_index.entry((material_ptr, Arc::as_ptr(mesh))).or_insert_with(|| {
                let meshes = &mut batches[s].materials[m].meshes;
                meshes.push(MeshBatch { mesh, nodes: Vec::new() });
                meshes.len() - 1
            });

            batches[s].materials[m].meshes[g].nodes.push(node);
        }

        batches
    }

    /// Group the visible nodes and submit them to `cmd`
    pub fn submit(
        &mut self,
        graph: &SceneGraph,
        visible: &[NodeKey],
        view_projection: &Mat4,
        instancing: bool,
        cmd: &mut dyn CommandList,
    ) -> Result<RendererStats> {
        let batches = Self::group(graph, visible);
        let mut stats = RendererStats::default();

        for shader_batch in &batches {
            cmd.bind_shader(shader_batch.shader)?;
            stats.shader_changes += 1;

            for material_batch in &shader_batch.materials {
                let material = material_batch.material;
                cmd.apply_material(material)?;
                cmd.set_uniform_mat4(material.view_projection_uniform(), view_projection)?;
                stats.material_changes += 1;

                for mesh_batch in &material_batch.meshes {
                    if instancing {
                        self.draw_instanced(mesh_batch, cmd, &mut stats)?;
                    } else {
                        Self::draw_immediate(material, mesh_batch, cmd, &mut stats)?;
                    }
                }
            }
        }

        Ok(stats)
    }

    fn draw_instanced(
        &mut self,
        batch: &MeshBatch<'_>,
        cmd: &mut dyn CommandList,
        stats: &mut RendererStats,
    ) -> Result<()> {
        let count = batch.nodes.len();
        let instances = instance_count(count)?;
        if count > self.instance_cache.capacity() {
            self.resize_instance_cache(count);
        }

        self.instance_cache.clear();
        for node in &batch.nodes {
            self.instance_cache.push(*node.global_transform());
        }

        let mesh = batch.mesh;
        cmd.upload_instance_data(bytemuck::cast_slice(self.instance_cache.as_slice()))?;
        cmd.bind_mesh_instanced(mesh)?;
        cmd.draw_instanced(mesh, instances)?;
        cmd.unbind_mesh(mesh)?;

        stats.mesh_binds += 1;
        stats.draw_calls += 1;
        stats.instanced_draw_calls += 1;
        stats.instances = stats.instances.saturating_add(instances);
        stats.primitives = stats.primitives
            .saturating_add(u64::from(mesh.primitive_count()) * u64::from(instances));
        Ok(())
    }

    fn draw_immediate(
        material: &Material,
        batch: &MeshBatch<'_>,
        cmd: &mut dyn CommandList,
        stats: &mut RendererStats,
    ) -> Result<()> {
        let mesh = batch.mesh;
        cmd.bind_mesh(mesh)?;
        for node in &batch.nodes {
            cmd.set_uniform_mat4(material.world_uniform(), node.global_transform())?;
            cmd.draw(mesh)?;
        }
        cmd.unbind_mesh(mesh)?;

        let count = u32::try_from(batch.nodes.len()).unwrap_or(u32::MAX);
        stats.mesh_binds += 1;
        stats.draw_calls = stats.draw_calls.saturating_add(count);
        stats.instances = stats.instances.saturating_add(count);
        stats.primitives = stats.primitives
            .saturating_add(u64::from(mesh.primitive_count()) * u64::from(count));
        Ok(())
    }

    // ===== INSTANCE CACHE =====

    pub fn instance_capacity(&self) -> usize {
        self.instance_cache.capacity()
    }

    /// Shrink the instance cache back to its default capacity
    pub fn reset_instance_cache(&mut self) {
        self.instance_cache.reset(self.default_instance_capacity);
    }

    /// Reallocate the instance cache to the smallest power-of-two multiple
    /// of the default capacity holding `required` matrices
    pub fn resize_instance_cache(&mut self, required: usize) {
        let mut capacity = self.default_instance_capacity.max(1);
        while capacity < required {
            capacity *= 2;
        }
        engine_trace!("prism3d::RenderBatcher",
            "Instance cache resized to {} matrices ({} requested)", capacity, required);
        self.instance_cache.reset(capacity);
    }
}

/// Instance count of one instanced draw. Backends take a `u32`.
fn instance_count(count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| {
        engine_err!("prism3d::RenderBatcher",
            "{} instances exceed the per-draw limit of {}", count, u32::MAX)
    })
}

#[cfg(test)]
#[path = "batcher_tests.rs"]
mod tests;
