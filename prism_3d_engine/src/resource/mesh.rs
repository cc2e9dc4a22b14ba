/// Drawable geometry shared by any number of scene nodes.
///
/// A `Mesh` only carries handles to buffers owned by the backend plus the
/// metadata the renderer needs: topology, primitive count and the
/// object-space bounding box used for culling. Nodes hold it through an
/// `Arc`, and batching groups nodes by that `Arc`'s identity.

use crate::error::Result;
use crate::engine_bail;
use crate::math::Aabb;
use super::handle::{BufferHandle, IndexType, PrimitiveTopology};

// ===== INDEX BUFFER =====

/// Index buffer binding of an indexed mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBufferBinding {
    pub buffer: BufferHandle,
    pub index_type: IndexType,
}

// ===== DESCRIPTOR =====

/// Mesh creation descriptor
#[derive(Debug, Clone)]
pub struct MeshDesc {
    /// Debug name
    pub name: String,
    /// One buffer per vertex attribute stream (at least one)
    pub vertex_buffers: Vec<BufferHandle>,
    /// Optional index buffer
    pub index_buffer: Option<IndexBufferBinding>,
    /// Topology used for every draw of this mesh
    pub topology: PrimitiveTopology,
    /// Number of primitives (triangles, lines or points)
    pub primitive_count: u32,
    /// Object-space bounds of the vertex data
    pub bounding_box: Aabb,
}

// ===== MESH =====

#[derive(Debug)]
pub struct Mesh {
    name: String,
    vertex_buffers: Vec<BufferHandle>,
    index_buffer: Option<IndexBufferBinding>,
    topology: PrimitiveTopology,
    primitive_count: u32,
    bounding_box: Aabb,
}

impl Mesh {
    /// Create a mesh from a descriptor.
    ///
    /// Fails with `Error::InvalidResource` when the descriptor has no vertex
    /// buffer, no primitives, or an empty / inverted bounding box.
    pub fn from_desc(desc: MeshDesc) -> Result<Self> {
        if desc.vertex_buffers.is_empty() {
            engine_bail!(InvalidResource, "prism3d::Mesh",
                "Mesh '{}': at least one vertex buffer is required", desc.name);
        }
        if desc.primitive_count == 0 {
            engine_bail!(InvalidResource, "prism3d::Mesh",
                "Mesh '{}': primitive count must be greater than zero", desc.name);
        }
        let bounds = desc.bounding_box;
        if bounds.is_empty() || bounds.lower.cmpgt(bounds.upper).any() {
            engine_bail!(InvalidResource, "prism3d::Mesh",
                "Mesh '{}': bounding box {:?} is empty or inverted", desc.name, bounds);
        }

        Ok(Self {
            name: desc.name,
            vertex_buffers: desc.vertex_buffers,
            index_buffer: desc.index_buffer,
            topology: desc.topology,
            primitive_count: desc.primitive_count,
            bounding_box: bounds,
        })
    }

    // ===== ACCESSORS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_buffers(&self) -> &[BufferHandle] {
        &self.vertex_buffers
    }

    pub fn index_buffer(&self) -> Option<&IndexBufferBinding> {
        self.index_buffer.as_ref()
    }

    pub fn is_indexed(&self) -> bool {
        self.index_buffer.is_some()
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    pub fn primitive_count(&self) -> u32 {
        self.primitive_count
    }

    /// Object-space bounds
    pub fn bounding_box(&self) -> &Aabb {
        &self.bounding_box
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
