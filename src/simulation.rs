//! Synchronous tick orchestration.
//!
//! One tick is: full sensor sweep, then controller logic, in that fixed
//! order, with no overlap between ticks. The scanner's index and segment
//! list live for exactly one tick; the robot pose is the only long-lived
//! mutable state. Frame timing, event handling, and drawing stay outside.

use crate::config::SimConfig;
use crate::core::Point2D;
use crate::raster::Environment;
use crate::robot::Robot;
use crate::scanner::Scanner;

/// Owns the environment, scanner, and robot for one simulation run.
pub struct Simulation<E: Environment> {
    environment: E,
    scanner: Scanner,
    robot: Robot,
    ticks: u64,
}

impl<E: Environment> Simulation<E> {
    /// Create a simulation with the robot starting at `start`.
    ///
    /// The chain gap of the boundary extractor is wired to the robot
    /// radius: chain steps longer than the robot could span are treated as
    /// breaks between walls.
    pub fn new(environment: E, config: &SimConfig, start: Point2D) -> Self {
        let boundary = config.boundary.clone().with_chain_gap(config.robot.radius);
        Self {
            environment,
            scanner: Scanner::new(&config.sensor, boundary),
            robot: Robot::new(&config.robot, start),
            ticks: 0,
        }
    }

    /// Run one simulation step: scan from the robot's position, then run
    /// one step of controller logic against the fresh boundary.
    pub fn tick(&mut self) {
        self.ticks += 1;
        self.scanner.scan(&self.environment, self.robot.position);
        self.robot.update(&self.scanner);
    }

    /// Number of ticks run so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The environment being explored.
    #[inline]
    pub fn environment(&self) -> &E {
        &self.environment
    }

    /// The scanner and its current-tick boundary.
    #[inline]
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// The robot and its pose.
    #[inline]
    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    /// Mutable access to the robot (scenario setup).
    #[inline]
    pub fn robot_mut(&mut self) -> &mut Robot {
        &mut self.robot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterMap;
    use crate::robot::Action;

    #[test]
    fn test_tick_counts_and_scans() {
        let map = RasterMap::from_fn(400, 400, |x, y| x < 10 || x >= 390 || y < 10 || y >= 390);
        let config = SimConfig::default();
        let mut sim = Simulation::new(map, &config, Point2D::new(200.0, 200.0));

        assert_eq!(sim.ticks(), 0);
        assert_eq!(sim.robot().action, Action::Initializing);

        sim.tick();

        assert_eq!(sim.ticks(), 1);
        assert!(sim.scanner().has_boundary());
        assert!(matches!(
            sim.robot().action,
            Action::ApproachingWall { .. }
        ));
    }
}
