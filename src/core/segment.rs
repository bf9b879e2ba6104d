//! Line segment between two sensed boundary points.

use std::f32::consts::FRAC_PI_2;

use super::bounds::Bounds;
use super::point::Point2D;

/// A line segment with canonicalized endpoint order.
///
/// Endpoints are stored ordered by ascending x (`left.x <= right.x`); when
/// the x coordinates tie, construction order is kept. The canonical order
/// makes slope and angle independent of the order points were sensed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Endpoint with the smaller x coordinate.
    pub left: Point2D,
    /// Endpoint with the larger x coordinate.
    pub right: Point2D,
}

impl Segment {
    /// Create a segment from two points, canonicalizing endpoint order.
    #[inline]
    pub fn new(a: Point2D, b: Point2D) -> Self {
        if b.x < a.x {
            Self { left: b, right: a }
        } else {
            Self { left: a, right: b }
        }
    }

    /// Slope of the segment, `f32::INFINITY` when vertical.
    #[inline]
    pub fn slope(&self) -> f32 {
        let dx = self.right.x - self.left.x;
        if dx == 0.0 {
            f32::INFINITY
        } else {
            (self.right.y - self.left.y) / dx
        }
    }

    /// Angle of the segment in radians, `atan(slope)` with the vertical
    /// case fixed at 90°.
    #[inline]
    pub fn angle(&self) -> f32 {
        let slope = self.slope();
        if slope.is_infinite() {
            FRAC_PI_2
        } else {
            slope.atan()
        }
    }

    /// Euclidean length of the segment.
    #[inline]
    pub fn length(&self) -> f32 {
        self.left.distance(self.right)
    }

    /// Axis-aligned bounding box of the segment.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            Point2D::new(self.left.x, self.left.y.min(self.right.y)),
            Point2D::new(self.right.x, self.left.y.max(self.right.y)),
        )
    }

    /// Distance from a point to this segment, with the closest point on it.
    ///
    /// The closest point is the perpendicular projection of `point` onto the
    /// segment, clamped to an endpoint when the projection falls outside the
    /// endpoints. The returned point always lies on the segment and the
    /// returned distance equals the Euclidean distance to it.
    pub fn distance_to_point(&self, point: Point2D) -> (f32, Point2D) {
        let dir = self.right - self.left;
        let len_sq = dir.length_squared();

        if len_sq < f32::EPSILON {
            // Degenerate segment (coincident endpoints)
            return (point.distance(self.left), self.left);
        }

        let t = ((point - self.left).dot(dir) / len_sq).clamp(0.0, 1.0);
        let closest = Point2D::new(self.left.x + t * dir.x, self.left.y + t * dir.y);
        (point.distance(closest), closest)
    }

    /// Minimum of the four endpoint-to-endpoint distances.
    ///
    /// An approximation of segment-to-segment distance, used only as a
    /// cheap merge heuristic, never for collision.
    pub fn endpoint_distance(&self, other: &Segment) -> f32 {
        let ds = [
            self.left.distance(other.left),
            self.left.distance(other.right),
            self.right.distance(other.left),
            self.right.distance(other.right),
        ];
        ds.iter().fold(f32::INFINITY, |acc, &d| acc.min(d))
    }

    /// Join with a near-collinear neighbor by taking the longest of the six
    /// segments formed from the four endpoints of both segments.
    pub fn join(&self, other: &Segment) -> Segment {
        let points = [self.left, self.right, other.left, other.right];
        let mut best = Segment::new(points[0], points[1]);
        for i in 0..3 {
            for j in (i + 1)..4 {
                let candidate = Segment::new(points[i], points[j]);
                if candidate.length() > best.length() {
                    best = candidate;
                }
            }
        }
        best
    }
}
