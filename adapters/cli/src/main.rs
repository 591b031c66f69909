#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the rover surface simulation.

mod config;
mod headless;
mod session;

use std::{io, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use rover_core::SimulationConfig;
use rover_rendering::{Color, GraticulePresentation, Presentation, RenderingBackend};
use rover_rendering_macroquad::MacroquadBackend;
use rover_system_projection::GridProjection;
use rover_world::World;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::session::Session;

const WINDOW_TITLE: &str = "Rover Surface";
const CLEAR_COLOR: Color = Color::from_rgb_u8(0x1b, 0x14, 0x10);
const GRATICULE_COLOR: Color = Color::new(0.8, 0.72, 0.6, 0.25);

#[derive(Debug, Parser)]
#[command(name = "rover", about = "Drive a rover across a projected planetary surface.")]
struct CliArgs {
    /// TOML file with simulation parameters.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for obstacle placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of obstacles to scatter.
    #[arg(long, value_name = "COUNT")]
    obstacles: Option<usize>,
    /// Degrees travelled per move.
    #[arg(long, value_name = "DEGREES")]
    step: Option<f64>,
    /// Minimum distance in degrees kept from every obstacle.
    #[arg(long, value_name = "DEGREES")]
    threshold: Option<f64>,
    /// Read command keys from stdin instead of opening a window.
    #[arg(long)]
    headless: bool,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, value_name = "FILTER", default_value = "info")]
    log_level: String,
    /// Synchronise frames with the display refresh rate.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    vsync: bool,
}

impl CliArgs {
    fn apply_overrides(&self, config: &mut SimulationConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(count) = self.obstacles {
            config.obstacle_count = count;
        }
        if let Some(step) = self.step {
            config.step_degrees = step;
        }
        if let Some(threshold) = self.threshold {
            config.collision_threshold = threshold;
        }
    }
}

/// Entry point for the rover command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(&args.log_level)?;

    let mut config = config::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    debug!(?config, "resolved simulation config");

    let grid_extent = config.grid_extent;
    let world = World::from_config(config).context("invalid simulation config")?;
    let mut session = Session::new(world);

    if args.headless {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        return headless::run(&mut session, stdin.lock(), &mut stdout);
    }

    let graticule = GraticulePresentation::new(
        GridProjection::new(grid_extent),
        GraticulePresentation::DEFAULT_SPACING_DEGREES,
        GRATICULE_COLOR,
    )?;
    let presentation = Presentation::new(WINDOW_TITLE, CLEAR_COLOR, session.scene(graticule));

    info!("opening simulation window");
    MacroquadBackend::new()
        .with_vsync(args.vsync)
        .run(presentation, move |input, scene| {
            if let Some(command) = input.command {
                let outcome = session.submit(command);
                debug!(?command, committed = outcome.is_committed(), "command applied");
                session.sync_scene(scene);
            }
        })
}

fn init_logging(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to install log subscriber: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_overrides_file_values() {
        let args = CliArgs::parse_from([
            "rover",
            "--seed",
            "7",
            "--obstacles",
            "4",
            "--threshold",
            "2.5",
        ]);
        let mut config = config::parse("obstacle_count = 30\nstep_degrees = 5.0\n")
            .expect("valid toml");

        args.apply_overrides(&mut config);

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.obstacle_count, 4);
        assert_eq!(config.step_degrees, 5.0);
        assert_eq!(config.collision_threshold, 2.5);
    }

    #[test]
    fn vsync_defaults_on_and_can_be_disabled() {
        assert!(CliArgs::parse_from(["rover"]).vsync);
        assert!(!CliArgs::parse_from(["rover", "--vsync", "false"]).vsync);
    }
}
