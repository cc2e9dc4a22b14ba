//! Renderer module - frame pipeline from visible nodes to draw commands.
//!
//! The renderer never touches a graphics API: it culls the scene, groups
//! what is visible and emits calls on a `CommandList` supplied by the
//! backend.

mod command_list;
mod config;
mod batcher;
mod debug_lines;
mod renderer;

pub use command_list::{CommandList, Viewport};
pub use config::{RendererConfig, EditorGridOptions, RendererStats};
pub use batcher::{RenderBatcher, ShaderBatch, MaterialBatch, MeshBatch};
pub use debug_lines::{box_edges, bounding_volume_lines, grid_lines};
pub use renderer::Renderer;

// Recording command list for tests (no GPU required)
#[cfg(test)]
pub mod mock_command_list;
