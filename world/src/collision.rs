//! Proximity checks between a candidate position and the obstacle field.

use rover_core::{Obstacle, ObstacleField, Position};

/// Returns the first obstacle, in field order, closer than `threshold` degrees.
///
/// Distances are measured in raw latitude/longitude degree space rather than
/// along the surface. An obstacle exactly `threshold` away does not collide.
#[must_use]
pub fn first_collision(
    candidate: Position,
    field: &ObstacleField,
    threshold: f64,
) -> Option<&Obstacle> {
    field
        .iter()
        .find(|obstacle| candidate.degree_distance(obstacle.position()) < threshold)
}

/// Reports whether any obstacle lies closer than `threshold` degrees.
#[must_use]
pub fn is_collision(candidate: Position, field: &ObstacleField, threshold: f64) -> bool {
    first_collision(candidate, field, threshold).is_some()
}
