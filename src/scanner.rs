//! Boundary extraction from a full sensor sweep.
//!
//! One `scan` per tick: cast a fan of rays, declutter the hit points into a
//! fresh spatial index, order them with a greedy nearest-neighbor chain, and
//! merge near-collinear runs into simplified boundary segments. Everything
//! here is rebuilt from scratch each tick; the scanner carries no state
//! between ticks beyond the most recent result.

use log::debug;

use crate::config::{BoundaryConfig, SensorConfig};
use crate::core::{Point2D, Segment};
use crate::error::{NavError, Result};
use crate::point_index::PointIndex;
use crate::raster::Environment;
use crate::raycast::RayCaster;

/// Turns raw ray hits into an ordered, simplified wall outline.
pub struct Scanner {
    caster: RayCaster,
    angular_step_deg: f32,
    config: BoundaryConfig,
    index: PointIndex,
    segments: Vec<Segment>,
}

impl Scanner {
    /// Create a scanner from sensor and boundary configuration.
    pub fn new(sensor: &SensorConfig, boundary: BoundaryConfig) -> Self {
        Self {
            caster: RayCaster::new(sensor),
            angular_step_deg: sensor.angular_step_deg,
            config: boundary,
            index: PointIndex::new(),
            segments: Vec::new(),
        }
    }

    /// Run a full sweep from `origin` and rebuild the boundary.
    pub fn scan<E: Environment>(&mut self, env: &E, origin: Point2D) {
        self.index = PointIndex::new();

        // Full 360° sweep, inclusive of the final step (721 rays at 0.5°)
        let sweep_steps = (360.0 / self.angular_step_deg).round() as usize;
        for i in 0..=sweep_steps {
            let radians = (i as f32 * self.angular_step_deg).to_radians();
            let hit = match self.caster.ray(env, origin, radians) {
                Some(point) => point,
                None => continue,
            };

            // Declutter: drop hits landing within the dedupe radius of an
            // already-accepted point
            if let Some(existing) = self.index.nearest(hit.x, hit.y, false) {
                if existing.distance(hit) <= self.config.dedupe_radius {
                    continue;
                }
            }
            self.index.insert(hit);
        }

        let chained = self.chain();
        self.segments = self.merge(chained);

        debug!(
            "scan from ({:.1}, {:.1}): {} points, {} segments",
            origin.x,
            origin.y,
            self.index.len(),
            self.segments.len()
        );
    }

    /// Greedy nearest-unvisited walk over the point cloud, emitting a
    /// segment wherever consecutive tour points are close enough to belong
    /// to the same contiguous wall.
    ///
    /// The walk deliberately continues across cluster gaps; a step longer
    /// than `chain_gap` only suppresses the segment, leaving a hole in the
    /// chain instead of joining distant clusters.
    fn chain(&self) -> Vec<Segment> {
        let points = self.index.points();
        if points.len() < 2 {
            return Vec::new();
        }

        let mut segments = Vec::new();
        let mut visited: Vec<Point2D> = Vec::with_capacity(points.len());
        let mut current = points[0];

        while visited.len() != points.len() - 1 {
            visited.push(current);
            let next = match self.index.nearest_except(current.x, current.y, &visited) {
                Ok(point) => point,
                // No more boundary to chain
                Err(_) => break,
            };
            if current.distance(next) <= self.config.chain_gap {
                segments.push(Segment::new(current, next));
            }
            current = next;
        }

        segments
    }

    /// Fold runs of near-collinear, near-adjacent segments into single
    /// segments via [`Segment::join`].
    fn merge(&self, raw: Vec<Segment>) -> Vec<Segment> {
        let angle_threshold = self.config.merge_angle_deg.to_radians();

        let mut merged = Vec::new();
        let mut current: Option<Segment> = None;

        for segment in raw {
            match current {
                None => current = Some(segment),
                Some(run) => {
                    if (segment.angle() - run.angle()).abs() <= angle_threshold
                        && segment.endpoint_distance(&run) <= self.config.merge_distance
                    {
                        current = Some(run.join(&segment));
                    } else {
                        merged.push(run);
                        current = Some(segment);
                    }
                }
            }
        }
        if let Some(run) = current {
            merged.push(run);
        }

        merged
    }

    /// Whether the current boundary holds at least one segment.
    #[inline]
    pub fn has_boundary(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Closest point on the current boundary to `point`, with its distance.
    ///
    /// Fails with [`NavError::EmptyBoundary`] when no segments exist;
    /// callers must not invoke this before at least one successful scan.
    pub fn closest_point_on_boundary(&self, point: Point2D) -> Result<(f32, Point2D)> {
        let mut best: Option<(f32, Point2D)> = None;
        for segment in &self.segments {
            let (distance, closest) = segment.distance_to_point(point);
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, closest));
            }
        }
        best.ok_or(NavError::EmptyBoundary)
    }

    /// Accepted scan points of the current tick, in insertion order.
    #[inline]
    pub fn points(&self) -> &[Point2D] {
        self.index.points()
    }

    /// Simplified boundary segments of the current tick.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}
