//! Glue between player input, the world and the presented scene.

use rover_core::{Command, CommandOutcome, RoverState, COLLISION_NOTICE};
use rover_rendering::{GraticulePresentation, Scene};
use rover_world::{self as world, query, World};
use tracing::trace;

/// Owns the world for the lifetime of the process and tracks the collision notice.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    notification: Option<&'static str>,
}

impl Session {
    pub(crate) fn new(world: World) -> Self {
        Self {
            world,
            notification: None,
        }
    }

    /// Applies a player command; the notice stays up until a command commits.
    pub(crate) fn submit(&mut self, command: Command) -> CommandOutcome {
        let mut events = Vec::new();
        let outcome = world::apply(&mut self.world, command, &mut events);
        for event in &events {
            trace!(?event, "world event");
        }

        self.notification = outcome.is_collision().then_some(COLLISION_NOTICE);
        outcome
    }

    pub(crate) fn state(&self) -> RoverState {
        query::rover_state(&self.world)
    }

    pub(crate) fn notification(&self) -> Option<&'static str> {
        self.notification
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn scene(&self, graticule: GraticulePresentation) -> Scene {
        let threshold = query::config(&self.world).collision_threshold;
        let mut scene = Scene::project(
            graticule,
            &self.state(),
            query::obstacles(&self.world),
            threshold,
        );
        self.sync_scene(&mut scene);
        scene
    }

    pub(crate) fn sync_scene(&self, scene: &mut Scene) {
        scene.update_rover(&self.state());
        scene.notification = self.notification.map(str::to_owned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_core::{
        Heading, MoveDirection, Obstacle, ObstacleField, Position, SimulationConfig,
        TurnDirection,
    };
    use rover_rendering::Color;
    use rover_system_projection::GridProjection;

    fn blocked_session() -> Session {
        let world = World::with_obstacles(
            SimulationConfig::default(),
            ObstacleField::from_obstacles(vec![Obstacle::new(10.0, 0.0)]),
        )
        .expect("default config is valid")
        .starting_at(RoverState::new(Position::new(5.0, 0.0), Heading::North))
        .expect("start in bounds");
        Session::new(world)
    }

    #[test]
    fn collision_raises_notice_until_next_commit() {
        let mut session = blocked_session();

        let blocked = session.submit(Command::Move {
            direction: MoveDirection::Forward,
        });
        assert!(blocked.is_collision());
        assert_eq!(session.notification(), Some(COLLISION_NOTICE));

        let rotated = session.submit(Command::Rotate {
            direction: TurnDirection::Right,
        });
        assert!(rotated.is_committed());
        assert_eq!(session.notification(), None);
    }

    #[test]
    fn scene_mirrors_session_state() {
        let mut session = blocked_session();
        let graticule = GraticulePresentation::new(
            GridProjection::new(600.0),
            GraticulePresentation::DEFAULT_SPACING_DEGREES,
            Color::from_rgb_u8(0, 0, 0),
        )
        .expect("valid spacing");

        let _ = session.submit(Command::Move {
            direction: MoveDirection::Forward,
        });
        let scene = session.scene(graticule);

        assert_eq!(scene.obstacles.len(), 1);
        assert_eq!(scene.notification.as_deref(), Some(COLLISION_NOTICE));
        assert_eq!(scene.rover.heading, Heading::North);
    }
}
