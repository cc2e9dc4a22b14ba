/// Renderer configuration and per-frame statistics

/// Editor grid drawn on a horizontal plane around the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorGridOptions {
    /// World size of one grid cell
    pub cell_size: f32,
    /// Y coordinate of the grid plane
    pub grid_height: f32,
    /// Number of cells drawn on each side of the camera
    pub grid_radius: i32,
    pub enabled: bool,
}

impl Default for EditorGridOptions {
    fn default() -> Self {
        Self {
            cell_size: 16.0,
            grid_height: 0.0,
            grid_radius: 30,
            enabled: false,
        }
    }
}

/// Renderer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    /// One instanced draw per mesh group instead of one draw per node
    pub instancing_enabled: bool,
    /// Draw the boxes of the bounding volume hierarchy instead of meshes
    pub bounding_volume_mode: bool,
    /// Hierarchy depth drawn in bounding volume mode (-1 = every level)
    pub bounding_volume_draw_depth: i32,
    pub grid: EditorGridOptions,
    /// Initial (and reset) capacity of the visible node list
    pub visible_cache_capacity: usize,
    /// Initial (and reset) capacity of the instance matrix cache
    pub instance_cache_capacity: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            instancing_enabled: true,
            bounding_volume_mode: false,
            bounding_volume_draw_depth: -1,
            grid: EditorGridOptions::default(),
            visible_cache_capacity: 128,
            instance_cache_capacity: 64,
        }
    }
}

/// Renderer statistics for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    /// Mesh nodes that passed culling
    pub visible_nodes: usize,
    /// `bind_shader` calls
    pub shader_changes: u32,
    /// `apply_material` calls
    pub material_changes: u32,
    /// `bind_mesh` / `bind_mesh_instanced` calls
    pub mesh_binds: u32,
    /// Every draw submission (plain, instanced and debug lines)
    pub draw_calls: u32,
    /// Instanced draw submissions
    pub instanced_draw_calls: u32,
    /// Mesh instances drawn
    pub instances: u32,
    /// Primitives drawn across all instances
    pub primitives: u64,
}
