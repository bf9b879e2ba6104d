//! End-to-end wall-following scenarios on synthetic rasters.

use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;

use bhitti_nav::core::Point2D;
use bhitti_nav::{Action, RasterMap, SimConfig, Simulation};

/// A straight vertical wall at x = 100 spanning the full raster height.
fn vertical_wall() -> RasterMap {
    RasterMap::from_fn(200, 800, |x, _| (98..103).contains(&x))
}

fn start() -> Point2D {
    Point2D::new(50.0, 600.0)
}

#[test]
fn initializing_transitions_after_exactly_one_tick() {
    let mut sim = Simulation::new(vertical_wall(), &SimConfig::default(), start());
    assert_eq!(sim.robot().action, Action::Initializing);

    sim.tick();

    // Exactly one tick elapses before the transition, the robot has not
    // moved, and the cached point equals this tick's closest-point query
    assert_eq!(sim.robot().position, start());
    match sim.robot().action {
        Action::ApproachingWall { target } => {
            let (distance, expected) = sim
                .scanner()
                .closest_point_on_boundary(start())
                .expect("boundary extracted on first scan");
            assert!(target.approx_eq(expected, 1e-4), "{target:?} != {expected:?}");
            // Wall face is a couple of pixels in front of x = 98
            assert!(distance > 40.0 && distance < 55.0, "distance = {distance}");
        }
        other => panic!("expected ApproachingWall, got {other:?}"),
    }
}

#[test]
fn approach_collides_and_turns_ninety_degrees() {
    let mut sim = Simulation::new(vertical_wall(), &SimConfig::default(), start());

    // Scenario setup: heading straight toward the wall
    {
        let robot = sim.robot_mut();
        robot.heading = 0.0;
        robot.action = Action::ApproachingWall {
            target: Point2D::new(97.0, 600.0),
        };
    }

    let mut transition_tick = None;
    for tick in 1..=100 {
        sim.tick();
        if sim.robot().action == Action::FollowingWall {
            transition_tick = Some(tick);
            break;
        }
        // Approach never touches the heading before contact
        assert_relative_eq!(sim.robot().heading, 0.0, epsilon = 1e-6);
    }

    assert!(transition_tick.is_some(), "never reached the wall");
    // On collision the heading rotates by exactly +90°
    assert_relative_eq!(sim.robot().heading, FRAC_PI_2, epsilon = 1e-5);

    // Stopped about one footprint radius short of the wall face
    let x = sim.robot().position.x;
    assert!(x > 70.0 && x < 90.0, "stopped at x = {x}");
}

#[test]
fn following_wall_distance_stays_in_band() {
    let mut sim = Simulation::new(vertical_wall(), &SimConfig::default(), start());
    let config = SimConfig::default();

    {
        let robot = sim.robot_mut();
        robot.heading = 0.0;
        robot.action = Action::ApproachingWall {
            target: Point2D::new(97.0, 600.0),
        };
    }

    // Drive until wall contact
    for _ in 0..100 {
        sim.tick();
        if sim.robot().action == Action::FollowingWall {
            break;
        }
    }
    assert_eq!(sim.robot().action, Action::FollowingWall);

    // Follow the wall; after a settling period the offset to the boundary
    // must stay within the target band (radius .. radius + slack), with a
    // unit-step tolerance from the hug/escape previews
    let radius = config.robot.radius;
    let slack = config.robot.extra_collision_slack;
    let mut distances = Vec::new();
    for _ in 0..50 {
        sim.tick();
        let (distance, _) = sim
            .scanner()
            .closest_point_on_boundary(sim.robot().position)
            .expect("wall stays in sensor range");
        distances.push(distance);
    }

    for (i, distance) in distances.iter().enumerate().skip(15) {
        assert!(
            *distance > radius - 2.5 && *distance < radius + slack + 2.5,
            "tick {i}: distance {distance} outside band"
        );
    }

    // The robot travels along the wall, not through it
    let position = sim.robot().position;
    assert!(position.x < 98.0 - radius + 2.5, "robot at x = {}", position.x);
    assert!((position.y - 600.0).abs() > 20.0, "robot never moved along the wall");
}

#[test]
fn empty_raster_holds_pose_indefinitely() {
    let map = RasterMap::from_fn(200, 200, |_, _| false);
    let mut sim = Simulation::new(map, &SimConfig::default(), Point2D::new(100.0, 100.0));

    for _ in 0..5 {
        sim.tick();
    }

    // Nothing sensed: no boundary, no motion, no state change
    assert!(!sim.scanner().has_boundary());
    assert_eq!(sim.robot().action, Action::Initializing);
    assert_eq!(sim.robot().position, Point2D::new(100.0, 100.0));
}
