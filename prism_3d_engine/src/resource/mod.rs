//! GPU-facing resources referenced by scene nodes.
//!
//! Meshes and materials are immutable once created and shared through `Arc`.

mod handle;
pub mod mesh;
pub mod material;

pub use handle::{
    ShaderHandle, BufferHandle, TextureHandle, UniformLocation,
    PrimitiveTopology, IndexType,
};
pub use mesh::{Mesh, MeshDesc, IndexBufferBinding};
pub use material::{Material, MaterialDesc, MaterialTexture};
