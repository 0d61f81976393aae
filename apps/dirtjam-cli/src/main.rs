use clap::{Parser, Subcommand};
use dirtjam_camera::FlyCamera;
use dirtjam_common::{ConfigOverrides, SceneConfig};
use dirtjam_input::{InputEvent, Key};
use dirtjam_mesh::GridMesh;
use dirtjam_render::{DebugTextRenderer, Renderer, Scene, Viewport};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dirtjam-cli", about = "CLI tool for dirtjam grid meshes and camera replays")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate a grid mesh and check its topology
    Mesh {
        /// Cells per side (1-255); defaults to the config value
        #[arg(short, long)]
        divisions: Option<u32>,
        /// Edge length of the plane in world units; defaults to the config value
        #[arg(short, long)]
        width: Option<f32>,
        /// Print the full mesh as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay a scripted flight without a window
    Fly {
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Forward key presses per frame
        #[arg(long, default_value = "1")]
        forward: u32,
        /// Horizontal pointer motion per frame
        #[arg(long, default_value = "0.0")]
        turn: f32,
    },
}

impl Commands {
    /// Flags that take precedence over the config file. Only flags given on
    /// the command line override it.
    fn overrides(&self) -> ConfigOverrides {
        match *self {
            Commands::Mesh { divisions, width, .. } => ConfigOverrides {
                divisions,
                width,
                ..ConfigOverrides::default()
            },
            Commands::Info | Commands::Fly { .. } => ConfigOverrides::default(),
        }
    }
}

#[derive(Serialize)]
struct MeshReport<'a> {
    origin: glam::Vec3,
    divisions: u32,
    width: f32,
    vertex_count: u32,
    index_count: u32,
    triangle_count: usize,
    vertices: &'a [f32],
    indices: &'a [u16],
}

impl<'a> MeshReport<'a> {
    fn new(mesh: &'a GridMesh) -> Self {
        Self {
            origin: mesh.origin(),
            divisions: mesh.divisions(),
            width: mesh.width(),
            vertex_count: mesh.vertex_count(),
            index_count: mesh.index_count(),
            triangle_count: mesh.triangles().count(),
            vertices: mesh.positions(),
            indices: mesh.indices(),
        }
    }
}

/// Check the grid invariants, returning one message per violation.
fn check_topology(mesh: &GridMesh) -> Vec<String> {
    let mut problems = Vec::new();
    let d = mesh.divisions();

    let expected_vertices = (d + 1) * (d + 1);
    if mesh.vertex_count() != expected_vertices {
        problems.push(format!(
            "vertex count {} != {expected_vertices}",
            mesh.vertex_count()
        ));
    }
    let expected_indices = 6 * d * d;
    if mesh.index_count() != expected_indices {
        problems.push(format!(
            "index count {} != {expected_indices}",
            mesh.index_count()
        ));
    }

    let vertices = mesh.vertices();
    for (i, [a, b, c]) in mesh.triangles().enumerate() {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            problems.push(format!("triangle {i} indexes past the vertex buffer"));
            continue;
        }
        if a == b || b == c || a == c {
            problems.push(format!("triangle {i} is degenerate"));
            continue;
        }
        let normal = (vertices[b] - vertices[a]).cross(vertices[c] - vertices[a]);
        if normal.y >= 0.0 {
            problems.push(format!("triangle {i} is not clockwise seen from above"));
        }
    }
    problems
}

/// Drive a scene through `frames` frames of scripted input.
fn fly(
    scene: &mut Scene,
    viewport: Viewport,
    frames: u32,
    dt: f32,
    forward: u32,
    turn: f32,
) -> String {
    // Space acts on release.
    scene.on_event(&InputEvent::KeyUp(Key::Space));

    let renderer = DebugTextRenderer::new();
    let mut last = None;
    for _ in 0..frames {
        if turn != 0.0 {
            scene.on_event(&InputEvent::PointerMove { dx: turn, dy: 0.0 });
        }
        for _ in 0..forward {
            scene.on_event(&InputEvent::KeyDown(Key::W));
        }
        last = Some(scene.frame(dt, viewport));
    }

    match last {
        Some(frame) => renderer.render(&frame),
        None => String::from("no frames rendered\n"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let overrides = cli.command.overrides();
    match cli.command {
        Commands::Info => {
            println!("dirtjam-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", dirtjam_common::crate_info());
            println!("mesh: {}", dirtjam_mesh::crate_info());
            println!("camera: {}", dirtjam_camera::crate_info());
            println!("input: {}", dirtjam_input::crate_info());
            println!("render: {}", dirtjam_render::crate_info());
            let camera = FlyCamera::default();
            println!(
                "default camera: yaw={:.1} pitch={:.1} speed={:.1}",
                camera.yaw(),
                camera.pitch(),
                camera.speed
            );
        }
        Commands::Mesh { json, .. } => {
            let config = SceneConfig::resolve(cli.config.as_deref(), &overrides)?;
            let mesh = GridMesh::generate(
                config.mesh.origin,
                config.mesh.divisions,
                config.mesh.width,
            )?;

            let problems = check_topology(&mesh);
            for problem in &problems {
                tracing::warn!("{problem}");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&MeshReport::new(&mesh))?);
            } else {
                println!(
                    "Grid: divisions={}, width={:.2}, cell={:.4}",
                    mesh.divisions(),
                    mesh.width(),
                    mesh.cell_size()
                );
                println!(
                    "Vertices: {}, indices: {}, triangles: {}",
                    mesh.vertex_count(),
                    mesh.index_count(),
                    mesh.triangles().count()
                );
                println!(
                    "Topology: {}",
                    if problems.is_empty() { "OK" } else { "INVALID" }
                );
            }

            if !problems.is_empty() {
                anyhow::bail!("{} topology problems found", problems.len());
            }
        }
        Commands::Fly {
            frames,
            dt,
            forward,
            turn,
        } => {
            let config = SceneConfig::resolve(cli.config.as_deref(), &overrides)?;
            let (mut scene, mesh) = Scene::init(&config)?;
            mesh.release();

            let viewport = Viewport::new(config.window.width, config.window.height, 1.0);
            let origin = scene.mesh_origin();
            println!("Flight: frames={frames}, dt={dt}, forward={forward}, turn={turn}");
            println!(
                "Mesh: origin=({:.2}, {:.2}, {:.2}), vertices={}",
                origin.x,
                origin.y,
                origin.z,
                scene.vertex_count()
            );
            print!("{}", fly(&mut scene, viewport, frames, dt, forward, turn));
            scene.cleanup();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn small_scene() -> Scene {
        let mut config = SceneConfig::default();
        config.mesh.divisions = 4;
        let (scene, _mesh) = Scene::init(&config).unwrap();
        scene
    }

    fn resolve_mesh_command(args: &[&str]) -> SceneConfig {
        let cli = Cli::try_parse_from(args).unwrap();
        SceneConfig::resolve(cli.config.as_deref(), &cli.command.overrides()).unwrap()
    }

    #[test]
    fn mesh_command_keeps_config_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"mesh:\n  divisions: 16\n  width: 4.0\n").unwrap();
        let path = file.path().to_str().unwrap();

        let config = resolve_mesh_command(&["dirtjam-cli", "--config", path, "mesh"]);
        assert_eq!(config.mesh.divisions, 16);
        assert_eq!(config.mesh.width, 4.0);
    }

    #[test]
    fn mesh_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"mesh:\n  divisions: 16\n  width: 4.0\n").unwrap();
        let path = file.path().to_str().unwrap();

        let config = resolve_mesh_command(&[
            "dirtjam-cli",
            "--config",
            path,
            "mesh",
            "--divisions",
            "32",
        ]);
        assert_eq!(config.mesh.divisions, 32);
        assert_eq!(config.mesh.width, 4.0);
    }

    #[test]
    fn mesh_without_config_uses_defaults() {
        let config = resolve_mesh_command(&["dirtjam-cli", "mesh"]);
        assert_eq!(config.mesh, dirtjam_common::MeshConfig::default());
    }

    #[test]
    fn generated_grids_pass_topology_check() {
        for divisions in [1, 2, 7, 64] {
            let mesh = GridMesh::generate(glam::Vec3::ZERO, divisions, 3.0).unwrap();
            assert!(check_topology(&mesh).is_empty(), "divisions={divisions}");
        }
    }

    #[test]
    fn report_carries_flat_positions() {
        let mesh = GridMesh::generate(glam::Vec3::ZERO, 2, 2.0).unwrap();
        let report = MeshReport::new(&mesh);
        assert_eq!(report.vertices.len(), 9 * 3);
        assert_eq!(report.indices.len(), 24);
        assert_eq!(report.triangle_count, 8);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["vertex_count"], 9);
        assert_eq!(json["indices"].as_array().unwrap().len(), 24);
    }

    #[test]
    fn flight_moves_camera_forward() {
        let mut scene = small_scene();
        let start = scene.camera.position();
        let out = fly(&mut scene, Viewport::new(1280, 720, 1.0), 30, 1.0 / 60.0, 1, 0.0);

        assert!(scene.camera.is_pointer_locked());
        assert!(scene.camera.position().z < start.z);
        assert_eq!(scene.frame_count(), 30);
        assert!(out.starts_with("=== Frame (mode=solid"));
    }

    #[test]
    fn flight_turn_changes_yaw() {
        let mut scene = small_scene();
        let yaw = scene.camera.yaw();
        fly(&mut scene, Viewport::new(1280, 720, 1.0), 10, 1.0 / 60.0, 0, 20.0);
        assert!(scene.camera.yaw() > yaw);
    }

    #[test]
    fn zero_frames_renders_nothing() {
        let mut scene = small_scene();
        let out = fly(&mut scene, Viewport::new(1280, 720, 1.0), 0, 1.0 / 60.0, 1, 0.0);
        assert_eq!(out, "no frames rendered\n");
    }
}
