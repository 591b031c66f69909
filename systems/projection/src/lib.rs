#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Geographic-to-grid projection used when presenting the rover surface.
//!
//! Longitude maps linearly onto the horizontal axis. Latitude goes through a
//! Mercator-style logarithmic transform clamped to ±89.99° so the tangent
//! stays finite at the poles. The result is an approximation rather than a
//! true EPSG:3857 projection: both axes share one square extent even though a
//! real Mercator map of ±90° latitude is not square.

use std::f64::consts::FRAC_PI_4;

use glam::Vec2;
use rover_core::{Position, MAX_LATITUDE, MAX_LONGITUDE};

/// Latitude magnitude, in degrees, at which the Mercator transform is clamped.
pub const LATITUDE_CLAMP_DEGREES: f64 = 89.99;

/// Mercator ordinate of a latitude after clamping to [`LATITUDE_CLAMP_DEGREES`].
#[must_use]
pub fn mercator(lat: f64) -> f64 {
    let clamped = lat.clamp(-LATITUDE_CLAMP_DEGREES, LATITUDE_CLAMP_DEGREES);
    (FRAC_PI_4 + clamped.to_radians() / 2.0).tan().ln()
}

/// Normalised vertical coordinate in `[0, 1]`; north maps to smaller values.
#[must_use]
pub fn project_latitude(lat: f64) -> f64 {
    let south = mercator(-MAX_LATITUDE);
    let north = mercator(MAX_LATITUDE);
    1.0 - (mercator(lat) - south) / (north - south)
}

/// Normalised horizontal coordinate in `[0, 1]`; east maps to larger values.
#[must_use]
pub fn project_longitude(lon: f64) -> f64 {
    (lon + MAX_LONGITUDE) / (2.0 * MAX_LONGITUDE)
}

/// Maps geographic positions onto a square grid of fixed extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridProjection {
    extent: f32,
}

impl GridProjection {
    /// Creates a projection onto a square grid `extent` units wide and tall.
    #[must_use]
    pub const fn new(extent: f32) -> Self {
        Self { extent }
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn extent(&self) -> f32 {
        self.extent
    }

    /// Grid-space location of a geographic position, origin at the top-left.
    #[must_use]
    pub fn project(&self, position: Position) -> Vec2 {
        let x = project_longitude(position.lon()) as f32;
        let y = project_latitude(position.lat()) as f32;
        Vec2::new(x, y) * self.extent
    }

    /// Converts a length in degrees of longitude into grid units.
    #[must_use]
    pub fn degrees_to_units(&self, degrees: f64) -> f32 {
        (degrees / (2.0 * MAX_LONGITUDE)) as f32 * self.extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn equator_projects_to_vertical_centre() {
        assert!((project_latitude(0.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn poles_project_to_grid_edges() {
        assert!(project_latitude(90.0).abs() < EPSILON);
        assert!((project_latitude(-90.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn latitudes_beyond_the_clamp_share_the_edge() {
        assert_eq!(project_latitude(89.999), project_latitude(90.0));
        assert_eq!(mercator(-90.0), mercator(-89.99));
    }

    #[test]
    fn mercator_stays_finite_at_the_poles() {
        assert!(mercator(90.0).is_finite());
        assert!(mercator(-90.0).is_finite());
    }

    #[test]
    fn longitude_maps_linearly() {
        assert!(project_longitude(-180.0).abs() < EPSILON);
        assert!((project_longitude(0.0) - 0.5).abs() < EPSILON);
        assert!((project_longitude(90.0) - 0.75).abs() < EPSILON);
        assert!((project_longitude(180.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn grid_projection_scales_both_axes_by_extent() {
        let grid = GridProjection::new(600.0);
        let centre = grid.project(Position::ORIGIN);
        assert!((centre.x - 300.0).abs() < 1e-3);
        assert!((centre.y - 300.0).abs() < 1e-3);

        let north_east = grid.project(Position::new(90.0, 180.0));
        assert!((north_east.x - 600.0).abs() < 1e-3);
        assert!(north_east.y.abs() < 1e-3);
    }

    #[test]
    fn degrees_convert_with_longitude_scale() {
        let grid = GridProjection::new(600.0);
        assert!((grid.degrees_to_units(8.0) - 600.0 * 8.0 / 360.0).abs() < 1e-3);
    }
}
