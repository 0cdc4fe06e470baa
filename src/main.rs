//! Planegraph demo entry point.
//!
//! Builds a small scene (a draggable camera, a unit-scaled group and a few
//! pickable shapes), replays a scripted mouse drag through the input
//! buffers, ticks the engine and prints the committed matrices as JSON.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --ticks 4 --shuffle
//! RUST_LOG=debug cargo run -- --config scene.ini
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;
use log::{debug, error, info};

use planegraph::components::boundingshape::BoundingShape;
use planegraph::components::camera::{Camera, OrthographicCamera2D, ViewportBinding};
use planegraph::components::draggable::Draggable;
use planegraph::components::layer::Layer;
use planegraph::components::transformation::{Transformation, Transformation2D};
use planegraph::components::unit::Unit;
use planegraph::events::drag::{DragEnded, DragStarted};
use planegraph::resources::mouseinput::{PRIMARY_BUTTON, button_mask};
use planegraph::resources::sceneconfig::SceneConfig;
use planegraph::snapshot::RenderSnapshot;
use planegraph::systems::hierarchy::set_parent;
use planegraph::{Scene, SceneResult};

/// Planegraph 2D scene-graph demo
#[derive(Parser)]
#[command(version, about = "Builds a demo scene, pans its camera and dumps the matrices.")]
struct Cli {
    /// INI file with scene settings. Defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of ticks to run after the scripted drag.
    #[arg(long, default_value_t = 1)]
    ticks: u32,

    /// Deliver mouse samples in random order, as coalesced host batches do.
    #[arg(long)]
    shuffle: bool,

    /// Seed for `--shuffle`.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the render snapshot as JSON.
    #[arg(long)]
    json: bool,
}

const MOUSE: u32 = 0;

fn build_scene(scene: &mut Scene) -> SceneResult<Entity> {
    let config = scene.world.resource::<SceneConfig>().clone();
    let world = &mut scene.world;

    let camera = world
        .spawn((
            Transformation::default(),
            Unit::from(config.root_unit),
            Layer(0),
            Camera::default(),
            config.camera,
            Draggable::default(),
            ViewportBinding { source: MOUSE },
        ))
        .id();

    let marker = world
        .spawn((
            Transformation::default(),
            Transformation2D::new(0.75, 0.75),
            BoundingShape::circle(Vec2::ZERO, 0.1),
        ))
        .id();
    set_parent(world, marker, Some(camera))?;

    // Centimeter frame: its children are authored in centimeters.
    let ruler = world
        .spawn((
            Transformation::default(),
            Transformation2D::new(-0.5, -0.5),
            Unit::parse("1cm")?,
            Layer(1),
        ))
        .id();
    set_parent(world, ruler, Some(camera))?;

    for i in 0..3 {
        let tick = world
            .spawn((
                Transformation::default(),
                Transformation2D::new(i as f32 * 10.0, 0.0),
                BoundingShape::square(-1.0, 1.0, -1.0, 1.0),
            ))
            .id();
        set_parent(world, tick, Some(ruler))?;
    }

    world.add_observer(|trigger: On<DragStarted>| {
        info!("drag started at {:?}", trigger.event().origin);
    });
    world.add_observer(|trigger: On<DragEnded>| {
        info!("drag ended on {:?}", trigger.event().camera);
    });

    Ok(camera)
}

enum MouseSample {
    Location(f64, Vec2),
    State(f64, u32),
}

/// A press on empty canvas, a move, and a release, one tick each.
fn scripted_drag() -> Vec<Vec<MouseSample>> {
    let down = button_mask(PRIMARY_BUTTON);
    vec![
        vec![
            MouseSample::Location(0.0, Vec2::new(0.0, 0.0)),
            MouseSample::State(1.0, down),
        ],
        vec![
            MouseSample::Location(2.0, Vec2::new(0.25, 0.0)),
            MouseSample::Location(3.0, Vec2::new(0.5, 0.0)),
        ],
        vec![MouseSample::State(4.0, 0)],
    ]
}

fn run(cli: Cli) -> SceneResult<()> {
    let mut config = match &cli.config {
        Some(path) => SceneConfig::with_path(path),
        None => SceneConfig::new(),
    };
    if cli.config.is_some() {
        config.load_from_file()?;
    }

    let mut scene = Scene::with_default_systems(config)?;
    let camera = build_scene(&mut scene)?;
    scene.tick();

    let mut rng = fastrand::Rng::with_seed(cli.seed);
    for mut batch in scripted_drag() {
        if cli.shuffle {
            rng.shuffle(&mut batch);
        }
        for sample in batch {
            let kept = match sample {
                MouseSample::Location(t, p) => scene.push_location(MOUSE, t, p.x, p.y),
                MouseSample::State(t, buttons) => scene.push_state(MOUSE, t, buttons),
            };
            if !kept {
                debug!("mouse sample dropped");
            }
        }
        scene.tick();
    }

    for _ in 0..cli.ticks {
        scene.tick();
    }

    if let Some(framing) = scene.world.get::<OrthographicCamera2D>(camera) {
        info!(
            "camera framing after drag: [{}, {}] x [{}, {}]",
            framing.left, framing.right, framing.bottom, framing.top
        );
    }

    if cli.json {
        let snapshot = RenderSnapshot::capture(&mut scene.world);
        match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => error!("failed to serialize snapshot: {}", e),
        }
    }

    scene.shutdown();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
