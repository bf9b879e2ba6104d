//! Simulated distance-sensor ray against the occupancy raster.

use crate::config::SensorConfig;
use crate::core::Point2D;
use crate::raster::Environment;

/// Casts single rays against an [`Environment`] raster.
///
/// A ray walks forward in coarse hops until it samples an obstacle pixel,
/// then refines the hit by stepping backward in unit increments until the
/// sampled pixel is free again. Missing entirely (open space, out of range,
/// or leaving the raster) is an expected outcome, not an error.
#[derive(Clone, Debug)]
pub struct RayCaster {
    max_range: f32,
    hop_distance: f32,
}

impl RayCaster {
    /// Create a ray caster from sensor configuration.
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            max_range: config.max_range,
            hop_distance: config.hop_distance,
        }
    }

    /// Maximum ray range in raster units.
    #[inline]
    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    /// Cast a ray from `origin` at `radians`, returning the refined hit
    /// point or `None` when the ray reaches max range or leaves the raster.
    ///
    /// Any returned point lies within `max_range` of the origin; its pixel
    /// is free while the hop that triggered detection sampled an obstacle.
    pub fn ray<E: Environment>(
        &self,
        env: &E,
        origin: Point2D,
        radians: f32,
    ) -> Option<Point2D> {
        let (sin, cos) = radians.sin_cos();
        let hop = Point2D::new(cos * self.hop_distance, sin * self.hop_distance);
        let unit = Point2D::new(cos, sin);

        let mut position = origin;
        while origin.distance(position) < self.max_range && env.contains(position) {
            if env.is_obstacle(position.x as i32, position.y as i32) {
                return Some(self.refine(env, origin, position, unit));
            }
            position = position + hop;
        }

        None
    }

    /// Walk backward from the coarse hit in unit steps until the sampled
    /// pixel no longer matches the obstacle mask, or the walk returns to
    /// the origin pixel.
    fn refine<E: Environment>(
        &self,
        env: &E,
        origin: Point2D,
        hit: Point2D,
        unit: Point2D,
    ) -> Point2D {
        let origin_pixel = (origin.x as i32, origin.y as i32);

        let mut position = hit;
        loop {
            let pixel = (position.x as i32, position.y as i32);
            if pixel == origin_pixel
                || origin.distance(position) < 1.0
                || !env.is_obstacle(pixel.0, pixel.1)
            {
                return position;
            }
            position = position - unit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterMap;

    fn caster(max_range: f32, hop: f32) -> RayCaster {
        RayCaster::new(
            &SensorConfig::default()
                .with_max_range(max_range)
                .with_hop_distance(hop),
        )
    }

    #[test]
    fn test_open_space_returns_none() {
        let map = RasterMap::from_fn(400, 400, |_, _| false);
        let caster = caster(300.0, 5.0);

        assert!(caster
            .ray(&map, Point2D::new(200.0, 200.0), 0.0)
            .is_none());
    }

    #[test]
    fn test_wall_beyond_max_range_is_missed() {
        // Wall at x = 350, range capped at 100
        let map = RasterMap::from_fn(400, 400, |x, _| x >= 350);
        let caster = caster(100.0, 5.0);

        assert!(caster
            .ray(&map, Point2D::new(200.0, 200.0), 0.0)
            .is_none());
    }

    #[test]
    fn test_hit_is_refined_to_wall_face() {
        let map = RasterMap::from_fn(400, 400, |x, _| x >= 300);
        let caster = caster(300.0, 5.0);

        let origin = Point2D::new(100.0, 200.0);
        let hit = caster.ray(&map, origin, 0.0).expect("wall within range");

        // Within max range of the origin
        assert!(origin.distance(hit) <= 300.0);

        // The refined pixel is free, the next pixel along the ray is not
        assert!(!map.is_obstacle(hit.x as i32, hit.y as i32));
        assert!(map.is_obstacle((hit.x + 1.0) as i32, hit.y as i32));
        assert!((hit.x - 300.0).abs() <= 1.5, "hit.x = {}", hit.x);
    }

    #[test]
    fn test_ray_leaving_raster_returns_none() {
        let map = RasterMap::from_fn(100, 100, |_, _| false);
        let caster = caster(300.0, 5.0);

        // Pointing west from near the left edge
        assert!(caster
            .ray(&map, Point2D::new(10.0, 50.0), std::f32::consts::PI)
            .is_none());
    }

    #[test]
    fn test_diagonal_hit() {
        let map = RasterMap::from_fn(400, 400, |_, y| y >= 300);
        let caster = caster(300.0, 5.0);

        let origin = Point2D::new(200.0, 200.0);
        let hit = caster
            .ray(&map, origin, std::f32::consts::FRAC_PI_4)
            .expect("floor within range");

        assert!((hit.y - 300.0).abs() <= 1.5, "hit.y = {}", hit.y);
        assert!(!map.is_obstacle(hit.x as i32, hit.y as i32));
    }
}
