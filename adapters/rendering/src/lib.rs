#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for rover surface adapters.
//!
//! Adapters never read the world directly. They receive a [`Scene`] already
//! projected into grid units, translate player input into [`FrameInput`], and
//! let the caller apply the resulting command before the next frame.

use anyhow::Result as AnyResult;
use glam::Vec2;
use rover_core::{
    Command, Heading, MoveDirection, ObstacleField, RoverState, TurnDirection, MAX_LATITUDE,
    MAX_LONGITUDE,
};
use rover_system_projection::{project_latitude, GridProjection};
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with a different alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Rover command requested by the player on this frame, if any.
    pub command: Option<Command>,
}

/// Translates a command key into the rover command it is bound to.
///
/// `f` drives forward, `b` backward, `l` turns left and `r` turns right.
/// Keys are matched case-insensitively; every other key is unbound.
#[must_use]
pub fn command_for_key(key: char) -> Option<Command> {
    match key.to_ascii_lowercase() {
        'f' => Some(Command::Move {
            direction: MoveDirection::Forward,
        }),
        'b' => Some(Command::Move {
            direction: MoveDirection::Backward,
        }),
        'l' => Some(Command::Rotate {
            direction: TurnDirection::Left,
        }),
        'r' => Some(Command::Rotate {
            direction: TurnDirection::Right,
        }),
        _ => None,
    }
}

/// Human-readable summary of the rover's state.
#[must_use]
pub fn status_line(state: &RoverState) -> String {
    format!(
        "lat {:.1}, lon {:.1}, heading {:?}",
        state.position.lat(),
        state.position.lon(),
        state.heading
    )
}

/// Latitude/longitude lines drawn behind the rover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraticulePresentation {
    /// Projection used to place the lines.
    pub projection: GridProjection,
    /// Degrees between neighbouring lines on both axes.
    pub spacing_degrees: f64,
    /// Color used when drawing the lines.
    pub line_color: Color,
}

impl GraticulePresentation {
    /// Default spacing between graticule lines.
    pub const DEFAULT_SPACING_DEGREES: f64 = 30.0;

    /// Creates a new graticule descriptor.
    ///
    /// Returns an error when `spacing_degrees` is not a positive finite number.
    pub fn new(
        projection: GridProjection,
        spacing_degrees: f64,
        line_color: Color,
    ) -> Result<Self, RenderingError> {
        if !spacing_degrees.is_finite() || spacing_degrees <= 0.0 {
            return Err(RenderingError::InvalidGraticuleSpacing { spacing_degrees });
        }

        Ok(Self {
            projection,
            spacing_degrees,
            line_color,
        })
    }

    /// Side length of the square grid.
    #[must_use]
    pub const fn extent(&self) -> f32 {
        self.projection.extent()
    }

    /// Horizontal grid positions of the meridians, west to east.
    #[must_use]
    pub fn meridians(&self) -> Vec<f32> {
        line_degrees(MAX_LONGITUDE, self.spacing_degrees)
            .map(|lon| self.projection.degrees_to_units(lon + MAX_LONGITUDE))
            .collect()
    }

    /// Vertical grid positions of the parallels, south to north.
    ///
    /// Parallels bunch up towards the poles because of the Mercator-style
    /// latitude transform.
    #[must_use]
    pub fn parallels(&self) -> Vec<f32> {
        let extent = self.extent();
        line_degrees(MAX_LATITUDE, self.spacing_degrees)
            .map(|lat| project_latitude(lat) as f32 * extent)
            .collect()
    }
}

fn line_degrees(limit: f64, spacing: f64) -> impl Iterator<Item = f64> {
    let steps = (2.0 * limit / spacing).floor() as u32;
    (0..=steps).map(move |index| -limit + f64::from(index) * spacing)
}

/// Rover marker placed on the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoverPresentation {
    /// Grid-space centre of the rover.
    pub position: Vec2,
    /// Direction the rover faces.
    pub heading: Heading,
    /// Radius of the rover marker in grid units.
    pub radius: f32,
    /// Fill color of the rover marker.
    pub color: Color,
}

impl RoverPresentation {
    /// Unit vector pointing along the heading in grid space, where north is up.
    #[must_use]
    pub const fn heading_vector(&self) -> Vec2 {
        match self.heading {
            Heading::North => Vec2::new(0.0, -1.0),
            Heading::East => Vec2::new(1.0, 0.0),
            Heading::South => Vec2::new(0.0, 1.0),
            Heading::West => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Obstacle marker placed on the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstaclePresentation {
    /// Grid-space centre of the obstacle.
    pub position: Vec2,
    /// Radius of the obstacle marker in grid units.
    pub radius: f32,
    /// Radius of the collision zone in grid units, measured along longitude.
    pub clearance: f32,
    /// Fill color of the obstacle marker.
    pub color: Color,
}

/// Scene description combining the graticule, obstacles and the rover.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Background lines of the projected surface.
    pub graticule: GraticulePresentation,
    /// Rover drawn on top of everything else.
    pub rover: RoverPresentation,
    /// Obstacles in field order.
    pub obstacles: Vec<ObstaclePresentation>,
    /// Summary of the rover's state shown under the grid.
    pub status: String,
    /// Blocking notice shown after a rejected move, cleared by the next committed command.
    pub notification: Option<String>,
}

impl Scene {
    /// Rover marker radius expressed as a fraction of the grid extent.
    pub const ROVER_RADIUS_FRACTION: f32 = 1.0 / 60.0;

    /// Obstacle marker radius expressed as a fraction of the grid extent.
    pub const OBSTACLE_RADIUS_FRACTION: f32 = 1.0 / 100.0;

    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        graticule: GraticulePresentation,
        rover: RoverPresentation,
        obstacles: Vec<ObstaclePresentation>,
        status: String,
        notification: Option<String>,
    ) -> Self {
        Self {
            graticule,
            rover,
            obstacles,
            status,
            notification,
        }
    }

    /// Projects a world snapshot into a scene.
    ///
    /// `clearance_degrees` is the collision threshold; it is drawn as a ring
    /// around every obstacle.
    #[must_use]
    pub fn project(
        graticule: GraticulePresentation,
        state: &RoverState,
        obstacles: &ObstacleField,
        clearance_degrees: f64,
    ) -> Self {
        let projection = graticule.projection;
        let extent = projection.extent();
        let clearance = projection.degrees_to_units(clearance_degrees);
        let obstacles = obstacles
            .iter()
            .map(|obstacle| ObstaclePresentation {
                position: projection.project(obstacle.position()),
                radius: extent * Self::OBSTACLE_RADIUS_FRACTION,
                clearance,
                color: OBSTACLE_COLOR,
            })
            .collect();

        let rover = RoverPresentation {
            position: projection.project(state.position),
            heading: state.heading,
            radius: extent * Self::ROVER_RADIUS_FRACTION,
            color: ROVER_COLOR,
        };

        Self::new(graticule, rover, obstacles, status_line(state), None)
    }

    /// Moves the rover marker to a new state and refreshes the status line.
    pub fn update_rover(&mut self, state: &RoverState) {
        self.rover.position = self.graticule.projection.project(state.position);
        self.rover.heading = state.heading;
        self.status = status_line(state);
    }
}

const ROVER_COLOR: Color = Color::from_rgb_u8(0xe0, 0x6c, 0x2b);
const OBSTACLE_COLOR: Color = Color::from_rgb_u8(0x5a, 0x4a, 0x3c);

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting rover scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the per-frame input
    /// captured by the adapter and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Graticule spacing must be positive to avoid an endless line list.
    InvalidGraticuleSpacing {
        /// Provided spacing that failed validation.
        spacing_degrees: f64,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGraticuleSpacing { spacing_degrees } => {
                write!(
                    f,
                    "graticule spacing must be positive (received {spacing_degrees})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
