//! Integration tests for cameras, hit-testing, mouse buffers and camera
//! panning driven through [`Scene::tick`].
//!
//! # Usage
//!
//! ```sh
//! cargo test --test scene_integration
//! ```

use bevy_ecs::prelude::*;
use glam::Vec2;

use planegraph::components::boundingshape::BoundingShape;
use planegraph::components::camera::{Camera, OrthographicCamera2D, ViewportBinding};
use planegraph::components::draggable::Draggable;
use planegraph::components::transformation::{Transformation, Transformation2D};
use planegraph::events::drag::{DragEnded, DragStarted};
use planegraph::resources::mousebuffer::MouseLocationBuffer;
use planegraph::resources::mouseinput::{PRIMARY_BUTTON, button_mask};
use planegraph::resources::sceneconfig::SceneConfig;
use planegraph::scene::{HierarchySystem, LayerSystem, PickingSystem, TransformSystem};
use planegraph::systems::hierarchy::set_parent;
use planegraph::systems::picking::{pick_topmost, query_at};
use planegraph::{Scene, SceneError};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Resource, Default)]
struct DragLog {
    started: Vec<Vec2>,
    ended: usize,
}

fn spawn_camera(world: &mut World, framing: OrthographicCamera2D) -> Entity {
    world
        .spawn((
            Transformation::default(),
            Camera::default(),
            framing,
            Draggable::default(),
            ViewportBinding { source: 0 },
        ))
        .id()
}

fn framing(scene: &Scene, camera: Entity) -> OrthographicCamera2D {
    *scene.world.get::<OrthographicCamera2D>(camera).unwrap()
}

// =============================================================================
// Cameras and hit-testing
// =============================================================================

#[test]
fn query_at_hits_shapes_under_a_centered_camera() {
    let mut scene = Scene::with_default_systems(SceneConfig::default()).unwrap();
    let camera = spawn_camera(&mut scene.world, OrthographicCamera2D::centered(2.0, 2.0));
    let disc = scene
        .world
        .spawn((
            Transformation::default(),
            BoundingShape::circle(Vec2::ZERO, 1.0),
        ))
        .id();
    set_parent(&mut scene.world, disc, Some(camera)).unwrap();
    scene.tick();

    assert_eq!(query_at(&mut scene.world, 0.0, 0.0, 0.0, 1.0), vec![disc]);
    assert!(query_at(&mut scene.world, 5.0, 5.0, 0.0, 1.0).is_empty());
}

#[test]
fn topmost_hit_follows_layer_order() {
    let mut scene = Scene::new();
    scene.register(HierarchySystem).unwrap();
    scene.register(TransformSystem).unwrap();
    scene.register(LayerSystem).unwrap();
    scene.register(PickingSystem).unwrap();

    let below = scene
        .world
        .spawn((
            Transformation::default(),
            BoundingShape::square(-1.0, 1.0, -1.0, 1.0),
        ))
        .id();
    let above = scene
        .world
        .spawn((
            Transformation::default(),
            Transformation2D::new(0.5, 0.0),
            BoundingShape::circle(Vec2::ZERO, 1.0),
            planegraph::components::layer::Layer(2),
        ))
        .id();
    scene.tick();

    assert_eq!(query_at(&mut scene.world, 0.25, 0.0, 0.0, 1.0), vec![above, below]);
    assert_eq!(pick_topmost(&mut scene.world, -0.9, 0.0), Some(below));
    assert_eq!(pick_topmost(&mut scene.world, 1.2, 0.0), Some(above));
}

#[test]
fn camera_matrices_follow_the_hierarchy() {
    let mut scene = Scene::with_default_systems(SceneConfig::default()).unwrap();
    let rig = scene
        .world
        .spawn((Transformation::default(), Transformation2D::new(10.0, 0.0)))
        .id();
    let camera = spawn_camera(&mut scene.world, OrthographicCamera2D::centered(2.0, 2.0));
    set_parent(&mut scene.world, camera, Some(rig)).unwrap();
    scene.tick();

    let c = scene.world.get::<Camera>(camera).unwrap();
    let view = c.world_to_view * glam::Vec4::new(10.0, 0.0, 0.0, 1.0);
    assert!(approx_eq(view.x, 0.0));
    let back = c.view_to_world * glam::Vec4::new(1.0, 1.0, 0.0, 1.0);
    assert!(approx_eq(back.x, 11.0));
    assert!(approx_eq(back.y, 1.0));
}

#[test]
fn committing_a_parent_refreshes_cameras_below_it() {
    let mut scene = Scene::with_default_systems(SceneConfig::default()).unwrap();
    let rig = scene
        .world
        .spawn((Transformation::default(), Transformation2D::default()))
        .id();
    let camera = spawn_camera(&mut scene.world, OrthographicCamera2D::centered(2.0, 2.0));
    set_parent(&mut scene.world, camera, Some(rig)).unwrap();
    scene.tick();

    scene
        .world
        .get_mut::<Transformation2D>(rig)
        .unwrap()
        .location
        .x = 10.0;
    scene.commit(rig);

    let c = scene.world.get::<Camera>(camera).unwrap();
    let view = c.world_to_view * glam::Vec4::new(10.0, 0.0, 0.0, 1.0);
    assert!(approx_eq(view.x, 0.0), "view.x = {}", view.x);
    let back = c.view_to_world * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(approx_eq(back.x, 10.0), "back.x = {}", back.x);
}

// =============================================================================
// Mouse buffers
// =============================================================================

#[test]
fn late_samples_are_inserted_by_timestamp() {
    let mut buffer = MouseLocationBuffer::with_capacity(4);
    buffer.push(0, 10.0, Vec2::new(1.0, 0.0));
    buffer.push(0, 30.0, Vec2::new(3.0, 0.0));
    buffer.push(0, 20.0, Vec2::new(2.0, 0.0));

    let stamps: Vec<f64> = (0..3).map(|k| buffer.get(k).unwrap().timestamp).collect();
    assert_eq!(stamps, vec![30.0, 20.0, 10.0]);
    assert_eq!(buffer.latest().unwrap().value, Vec2::new(3.0, 0.0));
}

#[test]
fn full_buffer_keeps_the_newest_samples() {
    let mut buffer = MouseLocationBuffer::with_capacity(3);
    for t in 0..6 {
        buffer.push(0, t as f64, Vec2::splat(t as f32));
    }
    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.get(2).unwrap().timestamp, 3.0);
    assert!(buffer.get(3).is_none());

    // older than everything kept
    assert!(!buffer.push(0, 0.5, Vec2::ZERO));
    assert_eq!(buffer.get(2).unwrap().timestamp, 3.0);
}

#[test]
fn scene_reports_dropped_samples() {
    let config = SceneConfig {
        buffer_capacity: 2,
        ..SceneConfig::default()
    };
    let mut scene = Scene::with_default_systems(config).unwrap();

    assert!(scene.push_location(0, 10.0, 0.0, 0.0));
    assert!(scene.push_location(0, 20.0, 0.0, 0.0));
    assert!(!scene.push_location(0, 5.0, 0.0, 0.0));
    assert!(scene.push_state(0, 30.0, 0));

    let mut bare = Scene::new();
    assert!(!bare.push_location(0, 1.0, 0.0, 0.0));
    assert!(!bare.push_state(0, 1.0, 0));
}

// =============================================================================
// Camera panning
// =============================================================================

fn drag_scene() -> (Scene, Entity) {
    let mut scene = Scene::with_default_systems(SceneConfig::default()).unwrap();
    scene.world.init_resource::<DragLog>();
    scene
        .world
        .add_observer(|trigger: On<DragStarted>, mut log: ResMut<DragLog>| {
            log.started.push(trigger.event().origin);
        });
    scene
        .world
        .add_observer(|_trigger: On<DragEnded>, mut log: ResMut<DragLog>| {
            log.ended += 1;
        });
    let camera = spawn_camera(
        &mut scene.world,
        OrthographicCamera2D::new(-1.0, 1.0, -1.0, 1.0),
    );
    scene.tick();
    (scene, camera)
}

#[test]
fn dragging_empty_canvas_pans_the_camera() {
    let (mut scene, camera) = drag_scene();
    let down = button_mask(PRIMARY_BUTTON);

    scene.push_location(0, 1.0, 0.0, 0.0);
    scene.push_state(0, 1.0, down);
    scene.tick();
    assert!(scene.world.get::<Draggable>(camera).unwrap().dragged);
    assert_eq!(scene.world.resource::<DragLog>().started, vec![Vec2::ZERO]);

    scene.push_location(0, 2.0, 0.5, 0.0);
    scene.tick();
    let moved = framing(&scene, camera);
    assert!(approx_eq(moved.left, -1.5), "left = {}", moved.left);
    assert!(approx_eq(moved.right, 0.5), "right = {}", moved.right);
    assert!(approx_eq(moved.bottom, -1.0));
    assert!(approx_eq(moved.top, 1.0));

    scene.push_state(0, 3.0, 0);
    scene.tick();
    assert!(!scene.world.get::<Draggable>(camera).unwrap().dragged);
    assert_eq!(framing(&scene, camera), moved);
    assert_eq!(scene.world.resource::<DragLog>().ended, 1);
}

#[test]
fn pressing_on_a_shape_does_not_pan() {
    let (mut scene, camera) = drag_scene();
    let disc = scene
        .world
        .spawn((
            Transformation::default(),
            BoundingShape::circle(Vec2::ZERO, 0.5),
        ))
        .id();
    set_parent(&mut scene.world, disc, Some(camera)).unwrap();
    scene.tick();

    scene.push_location(0, 1.0, 0.0, 0.0);
    scene.push_state(0, 1.0, button_mask(PRIMARY_BUTTON));
    scene.tick();
    scene.push_location(0, 2.0, 0.5, 0.0);
    scene.tick();

    assert!(!scene.world.get::<Draggable>(camera).unwrap().dragged);
    assert_eq!(framing(&scene, camera), OrthographicCamera2D::new(-1.0, 1.0, -1.0, 1.0));
    assert!(scene.world.resource::<DragLog>().started.is_empty());
}

#[test]
fn holding_the_button_before_a_tick_is_not_a_new_press() {
    let (mut scene, camera) = drag_scene();
    let down = button_mask(PRIMARY_BUTTON);

    // pressed while over a shape, then the shape goes away
    let disc = scene
        .world
        .spawn((
            Transformation::default(),
            BoundingShape::circle(Vec2::ZERO, 0.5),
        ))
        .id();
    scene.tick();
    scene.push_location(0, 1.0, 0.0, 0.0);
    scene.push_state(0, 1.0, down);
    scene.tick();
    scene.world.despawn(disc);
    scene.tick();

    assert!(!scene.world.get::<Draggable>(camera).unwrap().dragged);
}

#[test]
fn samples_from_other_sources_are_ignored() {
    let (mut scene, camera) = drag_scene();
    scene.push_location(7, 1.0, 0.0, 0.0);
    scene.push_state(7, 1.0, button_mask(PRIMARY_BUTTON));
    scene.tick();
    assert!(!scene.world.get::<Draggable>(camera).unwrap().dragged);
}

// =============================================================================
// System registration
// =============================================================================

#[test]
fn picking_without_layers_is_refused() {
    let mut scene = Scene::new();
    scene.register(HierarchySystem).unwrap();
    scene.register(TransformSystem).unwrap();
    assert!(matches!(
        scene.register(PickingSystem),
        Err(SceneError::MissingRequirement { .. })
    ));
}
