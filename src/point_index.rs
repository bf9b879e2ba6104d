//! Nearest-neighbor index over sensed boundary points.
//!
//! Rebuilt from scratch every tick; point counts are bounded by the ray
//! count, so the R-tree is comfortably oversized for the job. Only the
//! query contract matters: exact lookup, nearest-excluding-self, and
//! nearest-excluding-a-set.

use rstar::RTree;

use crate::core::Point2D;
use crate::error::{NavError, Result};

/// Spatial index over the current tick's accepted scan points.
///
/// Insertion order is recorded alongside the tree; chain extraction seeds
/// from the first inserted point. Exclusion-set membership is by coordinate
/// value, matching [`Point2D`] equality.
pub struct PointIndex {
    tree: RTree<[f32; 2]>,
    points: Vec<Point2D>,
}

impl PointIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            points: Vec::new(),
        }
    }

    /// Insert a point.
    pub fn insert(&mut self, point: Point2D) {
        self.tree.insert([point.x, point.y]);
        self.points.push(point);
    }

    /// Number of indexed points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Indexed points in insertion order.
    #[inline]
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// The point exactly at the given coordinates.
    pub fn get_exact(&self, x: f32, y: f32) -> Result<Point2D> {
        self.tree
            .locate_at_point(&[x, y])
            .map(|c| Point2D::new(c[0], c[1]))
            .ok_or(NavError::PointNotFound { x, y })
    }

    /// Nearest indexed point to `(x, y)`.
    ///
    /// With `exclude_self`, a point at exactly those coordinates is skipped.
    /// Returns `None` when the index (after exclusion) is empty.
    pub fn nearest(&self, x: f32, y: f32, exclude_self: bool) -> Option<Point2D> {
        self.tree
            .nearest_neighbor_iter(&[x, y])
            .find(|c| !exclude_self || c[0] != x || c[1] != y)
            .map(|c| Point2D::new(c[0], c[1]))
    }

    /// Nearest indexed point to `(x, y)` not contained in `excluded`.
    ///
    /// Fails with [`NavError::IndexExhausted`] when every indexed point is
    /// excluded; chain extraction treats that as "no more boundary to
    /// chain".
    pub fn nearest_except(&self, x: f32, y: f32, excluded: &[Point2D]) -> Result<Point2D> {
        self.tree
            .nearest_neighbor_iter(&[x, y])
            .map(|c| Point2D::new(c[0], c[1]))
            .find(|p| !excluded.contains(p))
            .ok_or(NavError::IndexExhausted)
    }
}

impl Default for PointIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PointIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointIndex")
            .field("size", &self.points.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> PointIndex {
        let mut index = PointIndex::new();
        index.insert(Point2D::new(0.0, 0.0));
        index.insert(Point2D::new(10.0, 0.0));
        index.insert(Point2D::new(0.0, 10.0));
        index
    }

    #[test]
    fn test_get_exact() {
        let index = sample_index();

        let p = index.get_exact(10.0, 0.0).unwrap();
        assert_eq!(p, Point2D::new(10.0, 0.0));

        assert!(matches!(
            index.get_exact(5.0, 5.0),
            Err(NavError::PointNotFound { .. })
        ));
    }

    #[test]
    fn test_nearest() {
        let index = sample_index();

        let p = index.nearest(1.0, 1.0, false).unwrap();
        assert_eq!(p, Point2D::new(0.0, 0.0));
    }

    #[test]
    fn test_nearest_excluding_self() {
        let index = sample_index();

        // Without exclusion, the query point itself wins
        let p = index.nearest(0.0, 0.0, false).unwrap();
        assert_eq!(p, Point2D::new(0.0, 0.0));

        // With exclusion, the closest other point wins
        let p = index.nearest(0.0, 0.0, true).unwrap();
        assert!(p == Point2D::new(10.0, 0.0) || p == Point2D::new(0.0, 10.0));
    }

    #[test]
    fn test_nearest_on_empty_index() {
        let index = PointIndex::new();
        assert!(index.nearest(0.0, 0.0, false).is_none());
    }

    #[test]
    fn test_nearest_except() {
        let index = sample_index();

        let excluded = vec![Point2D::new(0.0, 0.0)];
        let p = index.nearest_except(1.0, 1.0, &excluded).unwrap();
        assert_ne!(p, Point2D::new(0.0, 0.0));

        let all: Vec<_> = index.points().to_vec();
        assert!(matches!(
            index.nearest_except(1.0, 1.0, &all),
            Err(NavError::IndexExhausted)
        ));
    }
}
