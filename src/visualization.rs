//! SVG snapshot of a simulation state.
//!
//! Renders the occupancy raster's obstacle pixels, the current boundary
//! segments and scan points, the robot pose, and the traveled trajectory.
//! Purely a consumer of the core's accessors; the pipeline never depends on
//! it.

use std::path::PathBuf;

use svg::node::element::{Circle, Group, Line, Polyline, Rectangle};
use svg::Document;

use crate::core::Point2D;
use crate::error::Result;
use crate::raster::{Environment, RasterMap};
use crate::robot::{Action, Robot};
use crate::scanner::Scanner;

/// Colorblind-friendly color palette (Okabe-Ito).
mod colors {
    /// Background fill
    pub const BACKGROUND: &str = "#111111";
    /// Obstacle pixels - gray
    pub const OBSTACLES: &str = "#BBBBBB";
    /// Boundary segments - teal
    pub const BOUNDARY: &str = "#009E73";
    /// Accepted scan points - sky blue
    pub const SCAN_POINTS: &str = "#56B4E9";
    /// Robot footprint and heading - orange
    pub const ROBOT: &str = "#E69F00";
    /// Traveled trajectory - blue
    pub const TRAIL: &str = "#0072B2";
    /// Cached approach target - vermillion
    pub const TARGET: &str = "#D55E00";
}

/// Obstacle pixel cap; denser rasters skip the obstacle layer.
const MAX_OBSTACLE_PIXELS: usize = 20_000;

/// SVG snapshot writer.
pub struct Visualizer {
    output_path: PathBuf,
}

impl Visualizer {
    /// Create a visualizer writing to `output_path`.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    /// Render one snapshot and write it out.
    pub fn render(
        &self,
        map: &RasterMap,
        scanner: &Scanner,
        robot: &Robot,
        trail: &[Point2D],
    ) -> Result<()> {
        let (width, height) = (map.width(), map.height());
        let mut document = Document::new()
            .set("viewBox", (0u32, 0u32, width, height))
            .add(
                Rectangle::new()
                    .set("width", width)
                    .set("height", height)
                    .set("fill", colors::BACKGROUND),
            );

        if map.obstacle_count() <= MAX_OBSTACLE_PIXELS {
            let mut obstacles = Group::new().set("fill", colors::OBSTACLES);
            for (x, y) in map.obstacles() {
                obstacles = obstacles.add(
                    Rectangle::new()
                        .set("x", x)
                        .set("y", y)
                        .set("width", 1u32)
                        .set("height", 1u32),
                );
            }
            document = document.add(obstacles);
        }

        if trail.len() >= 2 {
            let points: Vec<String> = trail
                .iter()
                .map(|p| format!("{:.1},{:.1}", p.x, p.y))
                .collect();
            document = document.add(
                Polyline::new()
                    .set("points", points.join(" "))
                    .set("fill", "none")
                    .set("stroke", colors::TRAIL)
                    .set("stroke-width", 1.0),
            );
        }

        for point in scanner.points() {
            document = document.add(
                Circle::new()
                    .set("cx", point.x)
                    .set("cy", point.y)
                    .set("r", 1.5)
                    .set("fill", colors::SCAN_POINTS),
            );
        }

        for segment in scanner.segments() {
            document = document.add(
                Line::new()
                    .set("x1", segment.left.x)
                    .set("y1", segment.left.y)
                    .set("x2", segment.right.x)
                    .set("y2", segment.right.y)
                    .set("stroke", colors::BOUNDARY)
                    .set("stroke-width", 2.0),
            );
        }

        if let Action::ApproachingWall { target } = robot.action {
            document = document.add(
                Circle::new()
                    .set("cx", target.x)
                    .set("cy", target.y)
                    .set("r", 4.0)
                    .set("fill", colors::TARGET),
            );
        }

        let nose = robot.position.point_at(robot.heading, robot.radius);
        document = document
            .add(
                Circle::new()
                    .set("cx", robot.position.x)
                    .set("cy", robot.position.y)
                    .set("r", robot.radius)
                    .set("fill", "none")
                    .set("stroke", colors::ROBOT)
                    .set("stroke-width", 2.0),
            )
            .add(
                Line::new()
                    .set("x1", robot.position.x)
                    .set("y1", robot.position.y)
                    .set("x2", nose.x)
                    .set("y2", nose.y)
                    .set("stroke", colors::ROBOT)
                    .set("stroke-width", 1.5),
            );

        svg::save(&self.output_path, &document)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::simulation::Simulation;

    #[test]
    fn test_render_writes_svg() {
        let map = RasterMap::from_fn(200, 200, |x, y| x < 5 || x >= 195 || y < 5 || y >= 195);
        let config = SimConfig::default();
        let mut sim = Simulation::new(map, &config, Point2D::new(100.0, 100.0));
        sim.tick();

        let path = std::env::temp_dir().join("bhitti_nav_render_test.svg");
        let visualizer = Visualizer::new(&path);
        let trail = vec![Point2D::new(100.0, 100.0), sim.robot().position];

        visualizer
            .render(sim.environment(), sim.scanner(), sim.robot(), &trail)
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("svg"));
        let _ = std::fs::remove_file(&path);
    }
}
