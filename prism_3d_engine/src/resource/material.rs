/// Shader plus the uniform locations and textures needed to draw with it.
///
/// The renderer applies a material once per material group, then writes the
/// view-projection matrix to `view_projection_uniform` and (on the immediate
/// path) each instance's world matrix to `world_uniform`.

use rustc_hash::FxHashSet;
use crate::error::Result;
use crate::engine_bail;
use super::handle::{ShaderHandle, TextureHandle, UniformLocation};

// ===== TEXTURE BINDING =====

/// Texture bound to a sampler unit when the material is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialTexture {
    pub unit: u32,
    pub texture: TextureHandle,
}

// ===== DESCRIPTOR =====

#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub name: String,
    pub shader: ShaderHandle,
    pub world_uniform: UniformLocation,
    pub view_projection_uniform: UniformLocation,
    pub textures: Vec<MaterialTexture>,
}

// ===== MATERIAL =====

#[derive(Debug)]
pub struct Material {
    name: String,
    shader: ShaderHandle,
    world_uniform: UniformLocation,
    view_projection_uniform: UniformLocation,
    textures: Vec<MaterialTexture>,
}

impl Material {
    /// Create a material from a descriptor.
    ///
    /// Two textures on the same sampler unit is an `Error::InvalidResource`.
    pub fn from_desc(desc: MaterialDesc) -> Result<Self> {
        let mut units = FxHashSet::default();
        for binding in &desc.textures {
            if !units.insert(binding.unit) {
                engine_bail!(InvalidResource, "prism3d::Material",
                    "Material '{}': texture unit {} is bound twice", desc.name, binding.unit);
            }
        }

        Ok(Self {
            name: desc.name,
            shader: desc.shader,
            world_uniform: desc.world_uniform,
            view_projection_uniform: desc.view_projection_uniform,
            textures: desc.textures,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shader(&self) -> ShaderHandle {
        self.shader
    }

    pub fn world_uniform(&self) -> UniformLocation {
        self.world_uniform
    }

    pub fn view_projection_uniform(&self) -> UniformLocation {
        self.view_projection_uniform
    }

    pub fn textures(&self) -> &[MaterialTexture] {
        &self.textures
    }

    /// Texture bound to `unit`, if any
    pub fn texture(&self, unit: u32) -> Option<TextureHandle> {
        self.textures.iter().find(|t| t.unit == unit).map(|t| t.texture)
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
