//! Random obstacle placement.

use rand::Rng;
use rover_core::{Obstacle, ObstacleField, MAX_LATITUDE, MAX_LONGITUDE};
use tracing::debug;

/// Scatters `count` obstacles uniformly over the surface.
///
/// Latitudes are sampled from `[-90, 90)` and longitudes from `[-180, 180)`.
/// Callers own the random source so sessions can be replayed from a seed.
pub fn generate_obstacles<R: Rng>(count: usize, rng: &mut R) -> ObstacleField {
    let obstacles: Vec<Obstacle> = (0..count)
        .map(|_| {
            let lat = rng.gen_range(-MAX_LATITUDE..MAX_LATITUDE);
            let lon = rng.gen_range(-MAX_LONGITUDE..MAX_LONGITUDE);
            Obstacle::new(lat, lon)
        })
        .collect();
    debug!(count = obstacles.len(), "generated obstacle field");
    ObstacleField::from_obstacles(obstacles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn generates_requested_count_within_sampling_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let field = generate_obstacles(200, &mut rng);

        assert_eq!(field.len(), 200);
        for obstacle in field.iter() {
            let position = obstacle.position();
            assert!((-90.0..90.0).contains(&position.lat()));
            assert!((-180.0..180.0).contains(&position.lon()));
        }
    }

    #[test]
    fn same_seed_yields_same_field() {
        let first = generate_obstacles(15, &mut ChaCha8Rng::seed_from_u64(11));
        let second = generate_obstacles(15, &mut ChaCha8Rng::seed_from_u64(11));
        assert_eq!(first, second);
    }

    #[test]
    fn zero_count_yields_empty_field() {
        let field = generate_obstacles(0, &mut ChaCha8Rng::seed_from_u64(3));
        assert!(field.is_empty());
    }
}
