use super::*;
use std::sync::Arc;
use glam::Mat4;
use crate::error::Error;
use crate::math::Aabb;
use crate::renderer::mock_command_list::MockCommandList;
use crate::resource::{
    BufferHandle, Material, MaterialDesc, Mesh, MeshDesc, PrimitiveTopology,
    ShaderHandle, UniformLocation,
};
use crate::scene::{BruteForceCuller, HierarchyConfig, SceneNode};

// ============================================================================
// Helper Functions
// ============================================================================

fn cube() -> Arc<Mesh> {
    Arc::new(Mesh::from_desc(MeshDesc {
        name: "cube".to_string(),
        vertex_buffers: vec![BufferHandle(1)],
        index_buffer: None,
        topology: PrimitiveTopology::TriangleList,
        primitive_count: 12,
        bounding_box: Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5)),
    }).unwrap())
}

fn stone() -> Arc<Material> {
    Arc::new(Material::from_desc(MaterialDesc {
        name: "stone".to_string(),
        shader: ShaderHandle(1),
        world_uniform: UniformLocation(0),
        view_projection_uniform: UniformLocation(1),
        textures: Vec::new(),
    }).unwrap())
}

fn place(scene: &mut Scene, mesh: &Arc<Mesh>, material: &Arc<Material>, at: Vec3) -> NodeKey {
    let node = SceneNode::static_mesh(mesh.clone(), material.clone())
        .with_transform(Mat4::from_translation(at));
    scene.add_node(node, None).unwrap()
}

/// One cube behind the camera's far plane, one in view
fn near_far_scene() -> (Scene, NodeKey, NodeKey) {
    let mut scene = Scene::new();
    let (mesh, material) = (cube(), stone());
    let behind = place(&mut scene, &mesh, &material, Vec3::new(0.0, 0.0, 2000.0));
    let ahead = place(&mut scene, &mesh, &material, Vec3::new(0.0, 0.0, -500.0));
    scene.process_static_scene_graph();
    (scene, behind, ahead)
}

/// `count` cubes spread in front of the camera
fn crowd_scene(count: usize) -> Scene {
    let mut scene = Scene::new();
    let (mesh, material) = (cube(), stone());
    for i in 0..count {
        let x = (i % 10) as f32 * 2.0 - 9.0;
        let y = (i / 10) as f32 * 2.0 - 9.0;
        place(&mut scene, &mesh, &material, Vec3::new(x, y, -60.0));
    }
    scene.build_static_hierarchy(HierarchyConfig::default()).unwrap();
    scene
}

// ============================================================================
// Culling
// ============================================================================

#[test]
fn test_node_beyond_far_plane_is_culled() {
    let (scene, behind, ahead) = near_far_scene();
    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0);

    let visible = renderer.compute_occlusion(&scene).to_vec();

    assert_eq!(visible, vec![ahead]);
    assert!(!visible.contains(&behind));
}

#[test]
fn test_brute_force_culler_keeps_everything() {
    let (scene, _, _) = near_far_scene();
    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0)
        .with_culler(Box::new(BruteForceCuller::new()));

    assert_eq!(renderer.compute_occlusion(&scene).len(), 2);
}

#[test]
fn test_dynamic_root_is_culled_after_static_root() {
    let (mut scene, _, ahead) = near_far_scene();
    let dynamic_root = scene.dynamic_root();
    let mover = scene.add_node(
        SceneNode::static_mesh(cube(), stone())
            .with_transform(Mat4::from_translation(Vec3::new(1.0, 0.0, -10.0))),
        Some(dynamic_root),
    ).unwrap();
    scene.update();

    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0);
    assert_eq!(renderer.compute_occlusion(&scene), &[ahead, mover]);
}

#[test]
fn test_occlusion_replaces_previous_result() {
    let (scene, _, _) = near_far_scene();
    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0);

    renderer.compute_occlusion(&scene);
    renderer.compute_occlusion(&scene);

    assert_eq!(renderer.visible_nodes().len(), 1);
}

// ============================================================================
// Frame rendering
// ============================================================================

#[test]
fn test_render_sequence_for_single_visible_node() {
    let (scene, _, _) = near_far_scene();
    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0);
    let mut cmd = MockCommandList::new();

    let stats = renderer.render(&scene, &mut cmd).unwrap();

    assert_eq!(cmd.commands, vec![
        "set_viewport(800x600)",
        "clear",
        "bind_shader(1)",
        "apply_material(stone)",
        "set_uniform_mat4(1)",
        "upload_instance_data(64 bytes)",
        "bind_mesh_instanced(cube)",
        "draw_instanced(cube, 1)",
        "unbind_mesh(cube)",
    ]);
    assert_eq!(stats.visible_nodes, 1);
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(renderer.last_stats(), &stats);
}

#[test]
fn test_hundred_visible_cubes_make_one_instanced_draw() {
    let scene = crowd_scene(100);
    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0);
    let mut cmd = MockCommandList::new();

    let stats = renderer.render(&scene, &mut cmd).unwrap();

    assert_eq!(stats.visible_nodes, 100);
    assert_eq!(cmd.count("draw_instanced"), 1);
    assert!(cmd.commands.contains(&"draw_instanced(cube, 100)".to_string()));
    assert_eq!(stats.instances, 100);
    assert_eq!(stats.primitives, 1200);
    assert_eq!(renderer.instance_capacity(), 128);
}

#[test]
fn test_disabling_instancing_draws_per_node() {
    let scene = crowd_scene(20);
    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0);
    renderer.set_instancing_enabled(false);
    let mut cmd = MockCommandList::new();

    let stats = renderer.render(&scene, &mut cmd).unwrap();

    assert_eq!(cmd.count("draw_instanced"), 0);
    assert_eq!(cmd.count("draw("), 20);
    assert_eq!(stats.draw_calls, 20);
    assert_eq!(stats.mesh_binds, 1);
}

#[test]
fn test_empty_scene_only_clears() {
    let scene = Scene::new();
    let mut renderer = Renderer::new(RendererConfig::default(), 640.0, 480.0);
    let mut cmd = MockCommandList::new();

    let stats = renderer.render(&scene, &mut cmd).unwrap();

    assert_eq!(cmd.commands, vec!["set_viewport(640x480)", "clear"]);
    assert_eq!(stats, RendererStats::default());
}

// ============================================================================
// Editor overlays
// ============================================================================

#[test]
fn test_grid_drawn_before_meshes() {
    let (scene, _, _) = near_far_scene();
    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0);
    renderer.set_grid(EditorGridOptions { enabled: true, ..EditorGridOptions::default() });
    let mut cmd = MockCommandList::new();

    let stats = renderer.render(&scene, &mut cmd).unwrap();

    assert_eq!(cmd.commands[2], "draw_lines(244)");
    assert_eq!(cmd.count("draw_instanced"), 1);
    assert_eq!(stats.draw_calls, 2);
}

#[test]
fn test_bounding_volume_mode_replaces_meshes() {
    let scene = crowd_scene(8);
    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0);
    renderer.set_bounding_volume_mode(true, 0);
    let mut cmd = MockCommandList::new();

    let stats = renderer.render(&scene, &mut cmd).unwrap();

    // Static root box only; the dynamic root is empty
    assert_eq!(cmd.commands, vec!["set_viewport(800x600)", "clear", "draw_lines(24)"]);
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.visible_nodes, 8);
    assert_eq!(stats.instances, 0);
}

#[test]
fn test_bounding_volume_mode_every_level_draws_each_mesh_box() {
    let scene = crowd_scene(8);
    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0);
    renderer.set_bounding_volume_mode(true, -1);
    let mut cmd = MockCommandList::new();

    renderer.render(&scene, &mut cmd).unwrap();

    // Root, one box per mesh, plus the regions in between
    let boxes = cmd.line_vertices.len() / 24;
    assert!(boxes > 9);
    assert_eq!(cmd.count("draw_lines"), 1);
}

// ============================================================================
// Viewport and caches
// ============================================================================

#[test]
fn test_resize_updates_viewport() {
    let (scene, _, _) = near_far_scene();
    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0);
    renderer.resize(1920.0, 1080.0);
    let mut cmd = MockCommandList::new();

    renderer.render(&scene, &mut cmd).unwrap();

    assert_eq!(renderer.viewport().width, 1920.0);
    assert_eq!(cmd.commands[0], "set_viewport(1920x1080)");
}

#[test]
fn test_cache_resets_restore_configured_capacity() {
    let config = RendererConfig {
        visible_cache_capacity: 4,
        instance_cache_capacity: 8,
        ..RendererConfig::default()
    };
    let scene = crowd_scene(30);
    let mut renderer = Renderer::new(config, 800.0, 600.0);
    let mut cmd = MockCommandList::new();

    renderer.render(&scene, &mut cmd).unwrap();
    assert!(renderer.visible_capacity() >= 30);
    assert_eq!(renderer.instance_capacity(), 32);

    renderer.reset_visible_cache();
    renderer.reset_instance_cache();
    assert_eq!(renderer.visible_capacity(), 4);
    assert_eq!(renderer.instance_capacity(), 8);

    renderer.resize_instance_cache(100);
    assert_eq!(renderer.instance_capacity(), 128);
}

#[test]
fn test_backend_error_aborts_frame() {
    let (scene, _, _) = near_far_scene();
    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0);
    let mut cmd = MockCommandList::new();
    cmd.fail_on = Some("clear");

    let err = renderer.render(&scene, &mut cmd).unwrap_err();

    assert!(matches!(err, Error::BackendError(_)));
    assert_eq!(cmd.commands, vec!["set_viewport(800x600)"]);
}

#[test]
fn test_degenerate_grid_is_skipped_not_fatal() {
    let (scene, _, _) = near_far_scene();
    let mut renderer = Renderer::new(RendererConfig::default(), 800.0, 600.0);
    renderer.set_grid(EditorGridOptions { cell_size: 0.0, enabled: true, ..EditorGridOptions::default() });
    let mut cmd = MockCommandList::new();

    let stats = renderer.render(&scene, &mut cmd).unwrap();

    assert_eq!(cmd.count("draw_lines"), 0);
    assert_eq!(stats.draw_calls, 1);
}
