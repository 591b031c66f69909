#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative rover session state for the surface simulation.

mod collision;
mod obstacles;

pub use collision::{first_collision, is_collision};
pub use obstacles::generate_obstacles;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rover_core::{
    wrap, Command, CommandOutcome, ConfigError, Event, Heading, MoveDirection, ObstacleField,
    Position, RoverState, SimulationConfig, WELCOME_BANNER,
};
use tracing::{debug, info};

/// Represents the authoritative state of one simulation session.
///
/// The session owns the rover and the obstacle field. The field is fixed at
/// construction and only ever lent out by shared reference.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: SimulationConfig,
    rover: Rover,
    obstacles: ObstacleField,
}

impl World {
    /// Creates a session with default parameters and randomly placed obstacles.
    #[must_use]
    pub fn new() -> Self {
        let config = SimulationConfig::default();
        let obstacles = generate_obstacles(config.obstacle_count, &mut rand::thread_rng());
        Self::assemble(config, obstacles)
    }

    /// Creates a session from validated parameters.
    ///
    /// A configured seed makes the obstacle field reproducible; otherwise the
    /// thread-local generator is used.
    pub fn from_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        match config.seed {
            Some(seed) => Self::with_rng(config, &mut ChaCha8Rng::seed_from_u64(seed)),
            None => Self::with_rng(config, &mut rand::thread_rng()),
        }
    }

    /// Creates a session whose obstacles are drawn from the provided random source.
    pub fn with_rng<R: Rng>(config: SimulationConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let obstacles = generate_obstacles(config.obstacle_count, rng);
        Ok(Self::assemble(config, obstacles))
    }

    /// Creates a session around an explicit obstacle field.
    ///
    /// The configured obstacle count and seed are ignored.
    pub fn with_obstacles(
        config: SimulationConfig,
        obstacles: ObstacleField,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config, obstacles))
    }

    /// Moves the rover to a different starting state before any command runs.
    ///
    /// The start must already satisfy the latitude/longitude bounds. It is not
    /// checked against the obstacle field, matching the fixed origin start.
    pub fn starting_at(mut self, state: RoverState) -> Result<Self, ConfigError> {
        let position = state.position;
        if !position.is_within_bounds() {
            return Err(ConfigError::StartOutOfBounds {
                lat: position.lat(),
                lon: position.lon(),
            });
        }
        self.rover = Rover::from_state(state);
        Ok(self)
    }

    fn assemble(config: SimulationConfig, obstacles: ObstacleField) -> Self {
        Self {
            banner: WELCOME_BANNER,
            config,
            rover: Rover::from_state(RoverState::INITIAL),
            obstacles,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world.
///
/// Rotations always commit. Moves commit unless the wrapped candidate lies
/// within the collision threshold of an obstacle, in which case the rover is
/// left untouched and [`Event::MoveRejected`] is emitted.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) -> CommandOutcome {
    match command {
        Command::Rotate { direction } => {
            let from = world.rover.heading;
            let to = from.turned(direction);
            world.rover.heading = to;
            debug!(?from, ?to, "rover rotated");
            out_events.push(Event::RoverRotated { from, to });
            CommandOutcome::committed()
        }
        Command::Move { direction } => {
            let from = world.rover.position;
            let candidate = world.rover.candidate(direction, world.config.step_degrees);

            if let Some(obstacle) =
                first_collision(candidate, &world.obstacles, world.config.collision_threshold)
            {
                info!(
                    lat = candidate.lat(),
                    lon = candidate.lon(),
                    obstacle_lat = obstacle.position().lat(),
                    obstacle_lon = obstacle.position().lon(),
                    "move rejected by collision"
                );
                out_events.push(Event::MoveRejected {
                    candidate,
                    obstacle: *obstacle,
                });
                return CommandOutcome::rejected_by_collision();
            }

            world.rover.position = candidate;
            debug!(
                lat = candidate.lat(),
                lon = candidate.lon(),
                heading = ?world.rover.heading,
                "rover moved"
            );
            out_events.push(Event::RoverMoved {
                from,
                to: candidate,
            });
            CommandOutcome::committed()
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use rover_core::{ObstacleField, RoverState, SimulationConfig};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Captures the rover's current position and heading.
    #[must_use]
    pub fn rover_state(world: &World) -> RoverState {
        world.rover.snapshot()
    }

    /// Provides read-only access to the session's obstacle field.
    #[must_use]
    pub fn obstacles(world: &World) -> &ObstacleField {
        &world.obstacles
    }

    /// Parameters the session was created with.
    #[must_use]
    pub fn config(world: &World) -> &SimulationConfig {
        &world.config
    }
}

#[derive(Clone, Copy, Debug)]
struct Rover {
    position: Position,
    heading: Heading,
}

impl Rover {
    fn from_state(state: RoverState) -> Self {
        Self {
            position: state.position,
            heading: state.heading,
        }
    }

    fn snapshot(&self) -> RoverState {
        RoverState::new(self.position, self.heading)
    }

    fn candidate(&self, direction: MoveDirection, step: f64) -> Position {
        let (axis, sign) = self.heading.axis();
        let stepped = self.position.offset(axis, sign * direction.sign() * step);
        wrap(stepped.lat(), stepped.lon())
    }
}
