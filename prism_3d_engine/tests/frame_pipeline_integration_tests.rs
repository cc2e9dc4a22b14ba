//! Integration tests for the frame pipeline
//!
//! Drives `Renderer::render` with a recording backend written against the
//! public `CommandList` trait. No GPU required.
//!
//! Run with: cargo test --test frame_pipeline_integration_tests

use std::sync::Arc;
use prism_3d_engine::glam::{Mat4, Vec3};
use prism_3d_engine::prism3d::{Error, Renderer, Result};
use prism_3d_engine::prism3d::camera::Camera;
use prism_3d_engine::prism3d::math::Aabb;
use prism_3d_engine::prism3d::render::{CommandList, EditorGridOptions, RendererConfig, Viewport};
use prism_3d_engine::prism3d::resource::{
    BufferHandle, IndexBufferBinding, IndexType, Material, MaterialDesc, MaterialTexture,
    Mesh, MeshDesc, PrimitiveTopology, ShaderHandle, TextureHandle, UniformLocation,
};
use prism_3d_engine::prism3d::scene::{HierarchyConfig, NodeKey, Scene, SceneNode};

// ============================================================================
// RECORDING BACKEND
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Recorded {
    Viewport(f32, f32),
    Clear,
    Shader(ShaderHandle),
    Material(String),
    Uniform(UniformLocation),
    Bind(String),
    Upload(usize),
    BindInstanced(String),
    Draw(String),
    DrawInstanced(String, u32),
    Unbind(String),
    Lines(usize),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Recorded>,
    reject_draws: bool,
}

impl Recorder {
    fn count(&self, pred: impl Fn(&Recorded) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl CommandList for Recorder {
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.calls.push(Recorded::Viewport(viewport.width, viewport.height));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.calls.push(Recorded::Clear);
        Ok(())
    }

    fn bind_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        self.calls.push(Recorded::Shader(shader));
        Ok(())
    }

    fn apply_material(&mut self, material: &Material) -> Result<()> {
        self.calls.push(Recorded::Material(material.name().to_string()));
        Ok(())
    }

    fn set_uniform_mat4(&mut self, location: UniformLocation, _value: &Mat4) -> Result<()> {
        self.calls.push(Recorded::Uniform(location));
        Ok(())
    }

    fn bind_mesh(&mut self, mesh: &Mesh) -> Result<()> {
        self.calls.push(Recorded::Bind(mesh.name().to_string()));
        Ok(())
    }

    fn upload_instance_data(&mut self, data: &[u8]) -> Result<()> {
        self.calls.push(Recorded::Upload(data.len()));
        Ok(())
    }

    fn bind_mesh_instanced(&mut self, mesh: &Mesh) -> Result<()> {
        self.calls.push(Recorded::BindInstanced(mesh.name().to_string()));
        Ok(())
    }

    fn draw(&mut self, mesh: &Mesh) -> Result<()> {
        if self.reject_draws {
            return Err(Error::BackendError("device lost".to_string()));
        }
        self.calls.push(Recorded::Draw(mesh.name().to_string()));
        Ok(())
    }

    fn draw_instanced(&mut self, mesh: &Mesh, instance_count: u32) -> Result<()> {
        if self.reject_draws {
            return Err(Error::BackendError("device lost".to_string()));
        }
        self.calls.push(Recorded::DrawInstanced(mesh.name().to_string(), instance_count));
        Ok(())
    }

    fn unbind_mesh(&mut self, mesh: &Mesh) -> Result<()> {
        self.calls.push(Recorded::Unbind(mesh.name().to_string()));
        Ok(())
    }

    fn draw_lines(&mut self, vertices: &[Vec3], _view_projection: &Mat4) -> Result<()> {
        self.calls.push(Recorded::Lines(vertices.len()));
        Ok(())
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn mesh(name: &str, primitives: u32) -> Arc<Mesh> {
    Arc::new(Mesh::from_desc(MeshDesc {
        name: name.to_string(),
        vertex_buffers: vec![BufferHandle(1), BufferHandle(2)],
        index_buffer: Some(IndexBufferBinding { buffer: BufferHandle(3), index_type: IndexType::U16 }),
        topology: PrimitiveTopology::TriangleList,
        primitive_count: primitives,
        bounding_box: Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)),
    }).unwrap())
}

fn material(name: &str, shader: u32) -> Arc<Material> {
    Arc::new(Material::from_desc(MaterialDesc {
        name: name.to_string(),
        shader: ShaderHandle(shader),
        world_uniform: UniformLocation(4),
        view_projection_uniform: UniformLocation(5),
        textures: vec![MaterialTexture { unit: 0, texture: TextureHandle(9) }],
    }).unwrap())
}

/// A 10 x 10 field of `mesh` nodes in front of the default camera
fn field(scene: &mut Scene, mesh: &Arc<Mesh>, material: &Arc<Material>, z: f32) -> Vec<NodeKey> {
    (0..100)
        .map(|i| {
            let position = Vec3::new((i % 10) as f32 * 3.0 - 13.5, (i / 10) as f32 * 3.0 - 13.5, z);
            let node = SceneNode::static_mesh(mesh.clone(), material.clone())
                .with_transform(Mat4::from_translation(position));
            scene.add_node(node, None).unwrap()
        })
        .collect()
}

// ============================================================================
// FRAME TESTS
// ============================================================================

#[test]
fn test_integration_hundred_cubes_single_instanced_draw() {
    let mut scene = Scene::new();
    field(&mut scene, &mesh("cube", 12), &material("stone", 1), -80.0);
    scene.build_static_hierarchy(HierarchyConfig::default()).unwrap();

    let mut renderer = Renderer::new(RendererConfig::default(), 1280.0, 720.0);
    let mut backend = Recorder::default();
    let stats = renderer.render(&scene, &mut backend).unwrap();

    assert_eq!(stats.visible_nodes, 100);
    assert_eq!(stats.instanced_draw_calls, 1);
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.primitives, 1200);
    assert_eq!(backend.calls, vec![
        Recorded::Viewport(1280.0, 720.0),
        Recorded::Clear,
        Recorded::Shader(ShaderHandle(1)),
        Recorded::Material("stone".to_string()),
        Recorded::Uniform(UniformLocation(5)),
        Recorded::Upload(100 * 64),
        Recorded::BindInstanced("cube".to_string()),
        Recorded::DrawInstanced("cube".to_string(), 100),
        Recorded::Unbind("cube".to_string()),
    ]);
}

#[test]
fn test_integration_far_content_is_not_submitted() {
    let mut scene = Scene::new();
    let cube = mesh("cube", 12);
    let stone = material("stone", 1);
    field(&mut scene, &cube, &stone, -80.0);
    field(&mut scene, &cube, &stone, -5000.0);
    scene.build_static_hierarchy(HierarchyConfig::default()).unwrap();

    let mut renderer = Renderer::new(RendererConfig::default(), 1280.0, 720.0);
    let mut backend = Recorder::default();
    let stats = renderer.render(&scene, &mut backend).unwrap();

    assert_eq!(stats.visible_nodes, 100);
    assert!(backend.calls.contains(&Recorded::DrawInstanced("cube".to_string(), 100)));
}

#[test]
fn test_integration_two_materials_two_shaders() {
    let mut scene = Scene::new();
    let cube = mesh("cube", 12);
    let rock = mesh("rock", 200);
    field(&mut scene, &cube, &material("stone", 1), -80.0);
    field(&mut scene, &rock, &material("glass", 2), -90.0);
    scene.build_static_hierarchy(HierarchyConfig::default()).unwrap();

    let mut renderer = Renderer::new(RendererConfig::default(), 1280.0, 720.0);
    renderer.set_instancing_enabled(false);
    let mut backend = Recorder::default();
    let stats = renderer.render(&scene, &mut backend).unwrap();

    assert_eq!(stats.shader_changes, 2);
    assert_eq!(stats.material_changes, 2);
    assert_eq!(stats.mesh_binds, 2);
    assert_eq!(stats.draw_calls, 200);
    assert_eq!(stats.primitives, 100 * 12 + 100 * 200);
    assert_eq!(backend.count(|c| matches!(c, Recorded::Shader(_))), 2);
    assert_eq!(backend.count(|c| matches!(c, Recorded::Draw(_))), 200);
}

#[test]
fn test_integration_camera_turn_changes_visible_set() {
    let mut scene = Scene::new();
    field(&mut scene, &mesh("cube", 12), &material("stone", 1), -80.0);
    scene.build_static_hierarchy(HierarchyConfig::default()).unwrap();
    let mut renderer = Renderer::new(RendererConfig::default(), 1280.0, 720.0);

    scene.set_active_camera(Camera::new(Vec3::ZERO, Vec3::Z));
    let stats = renderer.render(&scene, &mut Recorder::default()).unwrap();
    assert_eq!(stats.visible_nodes, 0);

    scene.set_active_camera(Camera::default());
    let stats = renderer.render(&scene, &mut Recorder::default()).unwrap();
    assert_eq!(stats.visible_nodes, 100);
}

#[test]
fn test_integration_editor_overlays() {
    let mut scene = Scene::new();
    field(&mut scene, &mesh("cube", 12), &material("stone", 1), -80.0);
    scene.build_static_hierarchy(HierarchyConfig::default()).unwrap();

    let mut renderer = Renderer::new(RendererConfig::default(), 1280.0, 720.0);
    renderer.set_grid(EditorGridOptions { grid_radius: 2, enabled: true, ..EditorGridOptions::default() });
    renderer.set_bounding_volume_mode(true, 0);
    let mut backend = Recorder::default();
    let stats = renderer.render(&scene, &mut backend).unwrap();

    assert_eq!(backend.calls, vec![
        Recorded::Viewport(1280.0, 720.0),
        Recorded::Clear,
        Recorded::Lines(5 * 2 * 2),
        Recorded::Lines(24),
    ]);
    assert_eq!(stats.draw_calls, 2);
}

#[test]
fn test_integration_backend_failure_reaches_caller() {
    let mut scene = Scene::new();
    field(&mut scene, &mesh("cube", 12), &material("stone", 1), -80.0);
    scene.process_static_scene_graph();

    let mut renderer = Renderer::new(RendererConfig::default(), 1280.0, 720.0);
    let mut backend = Recorder { reject_draws: true, ..Recorder::default() };

    let err = renderer.render(&scene, &mut backend).unwrap_err();
    assert!(matches!(err, Error::BackendError(_)));
}
