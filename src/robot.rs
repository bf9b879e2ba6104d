//! Reactive wall-following controller.
//!
//! The robot is a point with a circular collision footprint. Each tick it
//! reads the scanner's freshly extracted boundary and advances one step of a
//! three-state machine: find the nearest wall, drive to it, then travel
//! along it at a controlled offset. Collision is always a preview against
//! the boundary segments, never against the raster itself.

use std::f32::consts::{FRAC_PI_2, PI};

use log::{debug, info};

use crate::config::RobotConfig;
use crate::core::{Point2D, Segment};
use crate::scanner::Scanner;

/// Controller state.
///
/// `ApproachingWall` carries the boundary point cached on the transition out
/// of `Initializing`; it is read (by the controller's consumers and the
/// renderer) on every approach tick until the next transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// First tick: pick the nearest wall and face along it.
    Initializing,
    /// Driving toward the cached closest boundary point.
    ApproachingWall {
        /// Closest boundary point at the time of the transition.
        target: Point2D,
    },
    /// Steady state: hugging the wall at a controlled offset.
    FollowingWall,
}

impl Action {
    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Action::Initializing => "Initializing",
            Action::ApproachingWall { .. } => "ApproachingWall",
            Action::FollowingWall => "FollowingWall",
        }
    }
}

/// The simulated robot: pose, footprint, and controller state.
#[derive(Clone, Debug)]
pub struct Robot {
    /// Collision footprint radius in raster units.
    pub radius: f32,
    /// Linear travel per tick in raster units.
    pub speed: f32,
    /// Slack beyond the radius before steering back toward the wall.
    pub extra_collision_slack: f32,
    /// Position in raster coordinates.
    pub position: Point2D,
    /// Heading in radians.
    pub heading: f32,
    /// Current controller state.
    pub action: Action,
}

impl Robot {
    /// Create a robot at `position` from configuration.
    pub fn new(config: &RobotConfig, position: Point2D) -> Self {
        Self {
            radius: config.radius,
            speed: config.speed,
            extra_collision_slack: config.extra_collision_slack,
            position,
            heading: 0.0,
            action: Action::Initializing,
        }
    }

    /// Preview the pose after a forward step of `distance` with an extra
    /// `rotation` added to the heading. Does not mutate the robot.
    #[inline]
    pub fn preview_forward(&self, distance: f32, rotation: f32) -> (Point2D, f32) {
        let heading = self.heading + rotation;
        (self.position.point_at(heading, distance), heading)
    }

    /// Whether a position's distance to the nearest boundary segment is
    /// inside the collision footprint.
    ///
    /// An empty boundary reads as open space; `update` skips the tick
    /// before that can matter.
    pub fn collision(&self, scanner: &Scanner, position: Point2D) -> bool {
        match scanner.closest_point_on_boundary(position) {
            Ok((distance, _)) => distance < self.radius,
            Err(_) => false,
        }
    }

    /// Attempt one forward step at the current heading.
    ///
    /// Returns `true` (and does not move) when the previewed position would
    /// collide; otherwise commits the move and returns `false`.
    pub fn move_forward(&mut self, scanner: &Scanner) -> bool {
        let (position, _) = self.preview_forward(self.speed, 0.0);
        if self.collision(scanner, position) {
            return true;
        }
        self.position = position;
        false
    }

    /// Run one tick of controller logic against the current scan.
    pub fn update(&mut self, scanner: &Scanner) {
        if !scanner.has_boundary() {
            debug!("no boundary this tick; holding pose");
            return;
        }

        match self.action {
            Action::Initializing => {
                let closest = match scanner.closest_point_on_boundary(self.position) {
                    Ok((_, point)) => point,
                    Err(_) => return,
                };
                // Face perpendicular to the line of sight toward the wall
                self.heading = Segment::new(self.position, closest).angle() - FRAC_PI_2;
                self.action = Action::ApproachingWall { target: closest };
                info!(
                    "{} -> {}: target ({:.1}, {:.1}), heading {:.1}°",
                    Action::Initializing.name(),
                    self.action.name(),
                    closest.x,
                    closest.y,
                    self.heading.to_degrees()
                );
            }

            Action::ApproachingWall { .. } => {
                if self.move_forward(scanner) {
                    self.heading += FRAC_PI_2;
                    self.action = Action::FollowingWall;
                    info!(
                        "wall contact at ({:.1}, {:.1}); {} with heading {:.1}°",
                        self.position.x,
                        self.position.y,
                        self.action.name(),
                        self.heading.to_degrees()
                    );
                }
            }

            Action::FollowingWall => {
                // Hug the wall: tightest leftward rotation that is still
                // about to collide
                self.min_max_turn(scanner, (-0.2f32).to_radians(), true);

                if self.move_forward(scanner) {
                    // Escape: rotate rightward until the way ahead is clear
                    self.min_max_turn(scanner, 2.0f32.to_radians(), false);
                } else if let Ok((distance, _)) = scanner.closest_point_on_boundary(self.position)
                {
                    if distance > self.radius + self.extra_collision_slack {
                        // Drifting away from the wall; steer back toward it
                        self.heading -= 0.5f32.to_radians();
                    }
                }
            }
        }
    }

    /// Turn in `step`-radian increments until a unit forward preview
    /// crosses the collision predicate, then commit the last accepted pose.
    ///
    /// With `until_collision` the turn seeks the first colliding preview;
    /// without it, the first clear one. The rotation accumulator is bounded
    /// to (-360°, 360°), so the walk terminates within `720° / step`
    /// iterations for any non-zero step. The collision predicate is
    /// evaluated at the previously accepted position, starting from the
    /// current one.
    pub fn min_max_turn(&mut self, scanner: &Scanner, step: f32, until_collision: bool) {
        let bound = 2.0 * PI;
        let mut rotation = 0.0;
        let (mut position, mut heading) = (self.position, self.heading);

        while -bound < rotation && rotation < bound {
            rotation += step;
            let (preview, previewed_heading) = self.preview_forward(1.0, rotation);

            let colliding = self.collision(scanner, position);
            if until_collision == colliding {
                break;
            }

            position = preview;
            heading = previewed_heading;
        }

        self.position = position;
        self.heading = heading;
    }
}
