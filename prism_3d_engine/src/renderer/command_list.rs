/// CommandList trait - the seam between the renderer and a graphics backend
///
/// The renderer decides WHAT to draw and in which order; a backend
/// implementing this trait turns each call into API calls (or records it).
/// Every method may fail with `Error::BackendError`, which the renderer
/// propagates to its caller unchanged.

use glam::{Mat4, Vec3};
use crate::error::Result;
use crate::resource::{Material, Mesh, ShaderHandle, UniformLocation};

pub trait CommandList: Send + Sync {
    /// Set the viewport
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Clear color and depth buffers
    fn clear(&mut self) -> Result<()>;

    /// Make a shader program current
    fn bind_shader(&mut self, shader: ShaderHandle) -> Result<()>;

    /// Bind the material's textures and per-material state.
    ///
    /// Called after `bind_shader` with the material's own shader.
    fn apply_material(&mut self, material: &Material) -> Result<()>;

    /// Write a 4x4 matrix uniform of the current shader
    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &Mat4) -> Result<()>;

    /// Bind a mesh's vertex (and index) buffers for per-instance draws
    fn bind_mesh(&mut self, mesh: &Mesh) -> Result<()>;

    /// Replace the contents of the per-instance attribute buffer.
    ///
    /// `data` is a tightly packed array of column-major `Mat4` world
    /// matrices, one per instance.
    fn upload_instance_data(&mut self, data: &[u8]) -> Result<()>;

    /// Bind a mesh together with the instance buffer as a per-instance
    /// attribute stream
    fn bind_mesh_instanced(&mut self, mesh: &Mesh) -> Result<()>;

    /// Draw the bound mesh once
    fn draw(&mut self, mesh: &Mesh) -> Result<()>;

    /// Draw the bound mesh `instance_count` times, one world matrix per
    /// instance from the instance buffer
    fn draw_instanced(&mut self, mesh: &Mesh, instance_count: u32) -> Result<()>;

    /// Undo `bind_mesh` / `bind_mesh_instanced`
    fn unbind_mesh(&mut self, mesh: &Mesh) -> Result<()>;

    /// Draw unshaded debug line segments (pairs of world-space points)
    fn draw_lines(&mut self, vertices: &[Vec3], view_projection: &Mat4) -> Result<()>;
}

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-depth viewport at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// `width / height`
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}
