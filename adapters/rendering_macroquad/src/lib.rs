#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the rover surface simulation.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, so the dependency is declared without its default `audio`
//! feature.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use rover_core::Command;
use rover_rendering::{
    command_for_key, Color, FrameInput, GraticulePresentation, Presentation, RenderingBackend,
    RoverPresentation, Scene,
};

const WINDOW_SIZE: i32 = 720;
const MARGIN: f32 = 24.0;
const STATUS_BAND: f32 = 56.0;
const FONT_SIZE: f32 = 22.0;

const COMMAND_KEYS: [(KeyCode, char); 4] = [
    (KeyCode::F, 'f'),
    (KeyCode::B, 'b'),
    (KeyCode::L, 'l'),
    (KeyCode::R, 'r'),
];

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = if enabled { Some(1) } else { Some(0) };
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: WINDOW_SIZE,
            window_height: WINDOW_SIZE + STATUS_BAND as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);

            loop {
                if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
                    break;
                }

                let frame_input = FrameInput {
                    command: poll_command(),
                };
                update_scene(frame_input, &mut scene);

                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_graticule(&scene.graticule, &metrics);
                draw_obstacles(&scene, &metrics);
                draw_rover(&scene.rover, &metrics);
                draw_status(&scene, &metrics);

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn poll_command() -> Option<Command> {
    COMMAND_KEYS
        .iter()
        .find(|(code, _)| is_key_pressed(*code))
        .and_then(|&(_, key)| command_for_key(key))
}

/// Placement of the square grid within the window.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
    side: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let extent = scene.graticule.extent().max(f32::EPSILON);
        let available_width = (screen_width - 2.0 * MARGIN).max(0.0);
        let available_height = (screen_height - 2.0 * MARGIN - STATUS_BAND).max(0.0);
        let side = available_width.min(available_height);
        let offset = Vec2::new(
            (screen_width - side) * 0.5,
            MARGIN + (available_height - side) * 0.5,
        );

        Self {
            scale: side / extent,
            offset,
            side,
        }
    }

    fn to_screen(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }
}

fn draw_graticule(graticule: &GraticulePresentation, metrics: &SceneMetrics) {
    let color = to_macroquad_color(graticule.line_color);
    let top = metrics.offset.y;
    let bottom = metrics.offset.y + metrics.side;
    let left = metrics.offset.x;
    let right = metrics.offset.x + metrics.side;

    for x in graticule.meridians() {
        let screen_x = metrics.to_screen(Vec2::new(x, 0.0)).x;
        macroquad::shapes::draw_line(screen_x, top, screen_x, bottom, 1.0, color);
    }
    for y in graticule.parallels() {
        let screen_y = metrics.to_screen(Vec2::new(0.0, y)).y;
        macroquad::shapes::draw_line(left, screen_y, right, screen_y, 1.0, color);
    }

    macroquad::shapes::draw_rectangle_lines(
        left,
        top,
        metrics.side,
        metrics.side,
        2.0,
        to_macroquad_color(graticule.line_color.with_alpha(1.0)),
    );
}

fn draw_obstacles(scene: &Scene, metrics: &SceneMetrics) {
    for obstacle in &scene.obstacles {
        let centre = metrics.to_screen(obstacle.position);
        let ring = to_macroquad_color(obstacle.color.with_alpha(0.35));
        macroquad::shapes::draw_circle_lines(
            centre.x,
            centre.y,
            obstacle.clearance * metrics.scale,
            1.0,
            ring,
        );
        macroquad::shapes::draw_circle(
            centre.x,
            centre.y,
            obstacle.radius * metrics.scale,
            to_macroquad_color(obstacle.color),
        );
    }
}

fn draw_rover(rover: &RoverPresentation, metrics: &SceneMetrics) {
    let centre = metrics.to_screen(rover.position);
    let radius = rover.radius * metrics.scale;
    let tip = centre + rover.heading_vector() * radius * 1.8;
    let color = to_macroquad_color(rover.color);

    macroquad::shapes::draw_circle(centre.x, centre.y, radius, color);
    macroquad::shapes::draw_line(centre.x, centre.y, tip.x, tip.y, 3.0, color);
}

fn draw_status(scene: &Scene, metrics: &SceneMetrics) {
    let baseline = metrics.offset.y + metrics.side + MARGIN;
    let text_color = to_macroquad_color(Color::from_rgb_u8(0xee, 0xee, 0xee));
    let _ = macroquad::text::draw_text(
        &scene.status,
        metrics.offset.x,
        baseline,
        FONT_SIZE,
        text_color,
    );

    if let Some(notification) = &scene.notification {
        let alert = to_macroquad_color(Color::from_rgb_u8(0xff, 0x55, 0x44));
        let _ = macroquad::text::draw_text(
            notification,
            metrics.offset.x,
            baseline + FONT_SIZE,
            FONT_SIZE,
            alert,
        );
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_core::{ObstacleField, RoverState};
    use rover_system_projection::GridProjection;

    fn scene() -> Scene {
        let graticule = GraticulePresentation::new(
            GridProjection::new(600.0),
            GraticulePresentation::DEFAULT_SPACING_DEGREES,
            Color::from_rgb_u8(0, 0, 0),
        )
        .expect("valid spacing");
        Scene::project(graticule, &RoverState::INITIAL, &ObstacleField::empty(), 8.0)
    }

    #[test]
    fn metrics_fit_grid_inside_square_window() {
        let screen = WINDOW_SIZE as f32;
        let metrics = SceneMetrics::from_scene(&scene(), screen, screen + STATUS_BAND);

        let expected_side = screen - 2.0 * MARGIN;
        assert!((metrics.side - expected_side).abs() < 1e-3);
        assert!((metrics.scale - expected_side / 600.0).abs() < 1e-6);
        assert_eq!(metrics.to_screen(Vec2::ZERO), metrics.offset);
    }

    #[test]
    fn metrics_centre_grid_in_wide_windows() {
        let metrics = SceneMetrics::from_scene(&scene(), 1_200.0, 700.0);

        let centre = metrics.to_screen(Vec2::splat(300.0));
        assert!((centre.x - 600.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_window_collapses_grid() {
        let metrics = SceneMetrics::from_scene(&scene(), 10.0, 10.0);
        assert_eq!(metrics.side, 0.0);
        assert_eq!(metrics.scale, 0.0);
    }
}
