use anyhow::Context;
use clap::Parser;
use mixed_reality::{AppConfig, PanelAction, ReplayReport, ReplayRuntime, SceneFixture, Session};
use outline::Pose;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Replay a recorded room through the mixed reality session and report the
/// outlines it produces
#[derive(Parser, Debug)]
#[command(name = "mixed-reality")]
#[command(about = "Replay a room fixture through the room outline session", long_about = None)]
struct Args {
    /// Configuration file (TOML); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scene fixture (JSON) with rooms and anchors
    #[arg(short, long)]
    scene: PathBuf,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Answer "no" to the scene permission dialog
    #[arg(long)]
    deny_permission: bool,

    /// Press the debug button on the settings panel once
    #[arg(long)]
    toggle_debug: bool,

    /// Fire this many balls from a controller at head height
    #[arg(long, default_value_t = 0)]
    shoot: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "mixed_reality=info,scene=info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let fixture = SceneFixture::from_file(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    tracing::info!(
        "Replaying {} room(s) from {}",
        fixture.rooms.len(),
        args.scene.display()
    );

    let runtime = ReplayRuntime::new(
        fixture,
        [
            config.scene.default_floor_node.clone(),
            config.scene.ball_node.clone(),
        ],
    )
    .without_permission();

    let mut session = Session::new(runtime, config);
    session.on_scene_ready();
    session.on_composition_loaded();

    if args.deny_permission {
        session.on_permission_result(false);
    } else {
        session.runtime_mut().grant_permission();
        session.on_permission_result(true);
    }
    session.update();

    if args.toggle_debug {
        session.on_panel_action(PanelAction::ToggleDebug);
    }

    let controller = Pose::from_position(glam::Vec3::new(0.0, 1.5, 0.0));
    for _ in 0..args.shoot {
        session.shoot(controller);
    }
    session.update();

    let report = ReplayReport::collect(&session)
        .to_json_pretty()
        .context("Failed to serialize report")?;

    match &args.output {
        Some(path) => {
            fs::write(path, report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", report),
    }

    session.shutdown();
    Ok(())
}
