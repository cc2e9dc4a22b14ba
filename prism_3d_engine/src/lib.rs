/*!
# Prism 3D Engine

Scene graph, bounding volume hierarchy, frustum culling and render batching
for a 3D engine.

The crate decides WHAT to draw each frame and in which order; turning that
into graphics API calls is left to a backend implementing
`render::CommandList`.

## Architecture

- **SceneGraph**: arena of nodes with cached world transforms and bounds
- **HierarchyBuilder**: spatial median split of static content into Regions
- **Camera / Frustum**: view parameters and the six culling planes
- **Culler**: hierarchical frustum culling into a reusable visible list
- **RenderBatcher**: shader → material → mesh grouping, instanced draws
- **Renderer**: per-frame driver owning the reusable caches

Everything goes through the `prism3d` namespace module:

```no_run
use prism_3d_engine::prism3d::{Renderer, scene::Scene, render::RendererConfig};

let mut scene = Scene::new();
scene.process_static_scene_graph();
let renderer = Renderer::new(RendererConfig::default(), 1280.0, 720.0);
```
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod utils;
pub mod resource;
pub mod scene;
pub mod camera;
pub mod renderer;

// Main prism3d namespace module
pub mod prism3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Process-wide services
    pub use crate::engine::Engine;

    // Frame driver
    pub use crate::renderer::Renderer;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod math {
        pub use crate::math::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    // Render sub-module with the frame pipeline types
    pub mod render {
        pub use crate::renderer::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod utils {
        pub use crate::utils::*;
    }
}

// Re-export math library at crate root
pub use glam;
