#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the rover surface simulation.
//!
//! This crate defines the message surface that connects adapters and the
//! authoritative world. Adapters submit [`Command`] values describing the
//! rover action the player requested, the world executes those commands via
//! its `apply` entry point, reports a [`CommandOutcome`], and broadcasts
//! [`Event`] values describing what changed. The geographic value types and
//! the coordinate wrapping policy live here so every crate agrees on them.

mod config;

pub use config::{ConfigError, SimulationConfig};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the rover surface simulation.";

/// Notification presented to the player when a move is blocked.
pub const COLLISION_NOTICE: &str = "Collision detected! Rotate rover.";

/// Degrees travelled by a single move command.
pub const DEFAULT_STEP_DEGREES: f64 = 10.0;

/// Minimum degree-space distance the rover must keep from every obstacle.
pub const DEFAULT_COLLISION_THRESHOLD: f64 = 8.0;

/// Number of obstacles scattered across the surface at session start.
pub const DEFAULT_OBSTACLE_COUNT: usize = 15;

/// Side length of the square display grid measured in grid units.
pub const DEFAULT_GRID_EXTENT: f32 = 600.0;

/// Largest valid latitude in degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// Largest valid longitude in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Requests that the rover travel one step along its heading axis.
    Move {
        /// Whether the rover drives with or against its heading.
        direction: MoveDirection,
    },
    /// Requests that the rover turn in place by a quarter turn.
    Rotate {
        /// Side the rover turns towards.
        direction: TurnDirection,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the rover turned in place.
    RoverRotated {
        /// Heading before the turn.
        from: Heading,
        /// Heading after the turn.
        to: Heading,
    },
    /// Confirms that the rover committed a move.
    RoverMoved {
        /// Position occupied before the move.
        from: Position,
        /// Wrapped position occupied after the move.
        to: Position,
    },
    /// Reports that a move was blocked by an obstacle and left the rover in place.
    MoveRejected {
        /// Wrapped position the rover attempted to enter.
        candidate: Position,
        /// First obstacle found within the collision threshold.
        obstacle: Obstacle,
    },
}

/// Result of applying a single command to the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandOutcome {
    committed: bool,
    collision: bool,
}

impl CommandOutcome {
    /// Outcome reported when the rover state changed.
    #[must_use]
    pub const fn committed() -> Self {
        Self {
            committed: true,
            collision: false,
        }
    }

    /// Outcome reported when a move was blocked by an obstacle.
    #[must_use]
    pub const fn rejected_by_collision() -> Self {
        Self {
            committed: false,
            collision: true,
        }
    }

    /// Whether the command changed the rover state.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed
    }

    /// Whether the command was rejected because of a collision.
    #[must_use]
    pub const fn is_collision(&self) -> bool {
        self.collision
    }
}

/// Travel direction relative to the rover's heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDirection {
    /// Drive along the heading.
    Forward,
    /// Drive against the heading.
    Backward,
}

impl MoveDirection {
    /// Multiplier applied to the heading's axis sign.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Side the rover turns towards when rotating in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnDirection {
    /// Counter-clockwise quarter turn.
    Left,
    /// Clockwise quarter turn.
    Right,
}

/// Geographic axis a move travels along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// North-south travel.
    Latitude,
    /// East-west travel.
    Longitude,
}

/// Cardinal facing directions available to the rover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Facing increasing latitude.
    North,
    /// Facing increasing longitude.
    East,
    /// Facing decreasing latitude.
    South,
    /// Facing decreasing longitude.
    West,
}

impl Heading {
    /// Headings in clockwise order; rotation cycles through this sequence.
    pub const ALL: [Heading; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Position of the heading within [`Heading::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Heading reached after a quarter turn towards `direction`.
    #[must_use]
    pub const fn turned(self, direction: TurnDirection) -> Self {
        let offset = match direction {
            TurnDirection::Left => 3,
            TurnDirection::Right => 1,
        };
        Self::ALL[(self.index() + offset) % Self::ALL.len()]
    }

    /// Axis and sign a forward move travels along.
    #[must_use]
    pub const fn axis(self) -> (Axis, f64) {
        match self {
            Self::North => (Axis::Latitude, 1.0),
            Self::South => (Axis::Latitude, -1.0),
            Self::East => (Axis::Longitude, 1.0),
            Self::West => (Axis::Longitude, -1.0),
        }
    }
}

/// Geographic location expressed in degrees.
///
/// Committed rover positions always satisfy `-90 <= lat <= 90` and
/// `-180 <= lon <= 180`; [`wrap`] restores that range after a step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    lat: f64,
    lon: f64,
}

impl Position {
    /// The equator at the prime meridian.
    pub const ORIGIN: Position = Position::new(0.0, 0.0);

    /// Creates a position without normalising it.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Returns the position displaced by `delta` degrees along `axis`.
    ///
    /// The result is not wrapped.
    #[must_use]
    pub fn offset(self, axis: Axis, delta: f64) -> Self {
        match axis {
            Axis::Latitude => Self::new(self.lat + delta, self.lon),
            Axis::Longitude => Self::new(self.lat, self.lon + delta),
        }
    }

    /// Reports whether both coordinates lie inside the valid geographic range.
    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        (-MAX_LATITUDE..=MAX_LATITUDE).contains(&self.lat)
            && (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&self.lon)
    }

    /// Straight-line distance in raw degree space.
    ///
    /// This deliberately ignores the curvature of the surface.
    #[must_use]
    pub fn degree_distance(self, other: Position) -> f64 {
        let d_lat = other.lat - self.lat;
        let d_lon = other.lon - self.lon;
        (d_lat * d_lat + d_lon * d_lon).sqrt()
    }
}

/// Normalises a coordinate pair that stepped at most once past the valid range.
///
/// Longitude crossing the antimeridian re-enters from the opposite side.
/// Latitude crossing a pole is shifted by 180 degrees into the opposite
/// hemisphere at the same longitude; heading and longitude are not flipped,
/// so this is not a true polar reflection.
#[must_use]
pub fn wrap(lat: f64, lon: f64) -> Position {
    let lon = if lon > MAX_LONGITUDE {
        lon - 2.0 * MAX_LONGITUDE
    } else if lon < -MAX_LONGITUDE {
        lon + 2.0 * MAX_LONGITUDE
    } else {
        lon
    };

    let lat = if lat > MAX_LATITUDE {
        lat - 2.0 * MAX_LATITUDE
    } else if lat < -MAX_LATITUDE {
        lat + 2.0 * MAX_LATITUDE
    } else {
        lat
    };

    Position::new(lat, lon)
}

/// Immutable snapshot of the rover used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoverState {
    /// Current wrapped location.
    pub position: Position,
    /// Current facing direction.
    pub heading: Heading,
}

impl RoverState {
    /// State every session starts from.
    pub const INITIAL: RoverState = RoverState {
        position: Position::ORIGIN,
        heading: Heading::North,
    };

    /// Creates a rover state from its parts.
    #[must_use]
    pub const fn new(position: Position, heading: Heading) -> Self {
        Self { position, heading }
    }
}

impl Default for RoverState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Static hazard the rover must keep clear of.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    position: Position,
}

impl Obstacle {
    /// Places an obstacle at the provided coordinates.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self {
            position: Position::new(lat, lon),
        }
    }

    /// Location of the obstacle.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// Ordered, immutable set of obstacles generated once per session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    /// Creates a field from an explicit obstacle list, keeping its order.
    #[must_use]
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    /// A field without any obstacles.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Iterator over the obstacles in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Obstacles in generation order.
    #[must_use]
    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Number of obstacles in the field.
    #[must_use]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Reports whether the field holds no obstacles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wrap_shifts_latitude_across_the_north_pole() {
        let wrapped = wrap(95.0, 0.0);
        assert_eq!(wrapped, Position::new(-85.0, 0.0));
    }

    #[test]
    fn wrap_shifts_latitude_across_the_south_pole() {
        let wrapped = wrap(-95.0, 42.0);
        assert_eq!(wrapped, Position::new(85.0, 42.0));
    }

    #[test]
    fn wrap_crosses_the_antimeridian_in_both_directions() {
        assert_eq!(wrap(0.0, 185.0), Position::new(0.0, -175.0));
        assert_eq!(wrap(0.0, -185.0), Position::new(0.0, 175.0));
    }

    #[test]
    fn wrap_keeps_exact_boundaries() {
        assert_eq!(wrap(90.0, 180.0), Position::new(90.0, 180.0));
        assert_eq!(wrap(-90.0, -180.0), Position::new(-90.0, -180.0));
    }

    #[test]
    fn right_turns_follow_clockwise_order() {
        assert_eq!(Heading::North.turned(TurnDirection::Right), Heading::East);
        assert_eq!(Heading::West.turned(TurnDirection::Right), Heading::North);
        assert_eq!(Heading::North.turned(TurnDirection::Left), Heading::West);
        assert_eq!(Heading::South.turned(TurnDirection::Left), Heading::East);
    }

    #[test]
    fn heading_axes_cover_every_variant() {
        assert_eq!(Heading::North.axis(), (Axis::Latitude, 1.0));
        assert_eq!(Heading::South.axis(), (Axis::Latitude, -1.0));
        assert_eq!(Heading::East.axis(), (Axis::Longitude, 1.0));
        assert_eq!(Heading::West.axis(), (Axis::Longitude, -1.0));
    }

    #[test]
    fn degree_distance_is_euclidean() {
        let origin = Position::new(5.0, 0.0);
        let other = Position::new(8.0, 4.0);
        assert!((origin.degree_distance(other) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn command_outcome_flags_are_exclusive() {
        let committed = CommandOutcome::committed();
        assert!(committed.is_committed());
        assert!(!committed.is_collision());

        let rejected = CommandOutcome::rejected_by_collision();
        assert!(!rejected.is_committed());
        assert!(rejected.is_collision());
    }

    #[test]
    fn obstacle_field_round_trips_through_bincode() {
        let field = ObstacleField::from_obstacles(vec![
            Obstacle::new(12.5, -40.0),
            Obstacle::new(-89.0, 179.5),
        ]);
        let bytes = bincode::serialize(&field).expect("serialize");
        let restored: ObstacleField = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, field);
    }

    fn arb_heading() -> impl Strategy<Value = Heading> {
        (0usize..4).prop_map(|index| Heading::ALL[index])
    }

    proptest! {
        #[test]
        fn wrap_is_identity_on_valid_input(lat in -90.0..=90.0f64, lon in -180.0..=180.0f64) {
            prop_assert_eq!(wrap(lat, lon), Position::new(lat, lon));
        }

        #[test]
        fn wrap_restores_bounds_after_one_step(
            lat in -90.0..=90.0f64,
            lon in -180.0..=180.0f64,
            lat_step in -89.0..=89.0f64,
            lon_step in -179.0..=179.0f64,
        ) {
            let wrapped = wrap(lat + lat_step, lon + lon_step);
            prop_assert!(wrapped.is_within_bounds(), "{wrapped:?} escaped the valid range");
        }

        #[test]
        fn four_right_turns_return_to_start(heading in arb_heading()) {
            let mut current = heading;
            for _ in 0..4 {
                current = current.turned(TurnDirection::Right);
            }
            prop_assert_eq!(current, heading);
        }

        #[test]
        fn opposite_turns_cancel(heading in arb_heading()) {
            let left_right = heading.turned(TurnDirection::Left).turned(TurnDirection::Right);
            let right_left = heading.turned(TurnDirection::Right).turned(TurnDirection::Left);
            prop_assert_eq!(left_right, heading);
            prop_assert_eq!(right_left, heading);
        }
    }
}
