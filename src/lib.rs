//! # Bhitti-Nav: Reactive Wall-Following over Occupancy Rasters
//!
//! A simulation of an autonomous point-robot exploring an unknown bounded
//! area whose walls are encoded as an occupancy raster. Each tick the robot
//! casts a fan of simulated distance-sensor rays against the raster,
//! reconstructs a local polyline approximation of the nearby wall boundary
//! from the hit points, and uses that boundary to drive a reactive
//! wall-following controller.
//!
//! ## Quick Start
//!
//! ```rust
//! use bhitti_nav::{RasterMap, SimConfig, Simulation};
//! use bhitti_nav::core::Point2D;
//!
//! // A 400x400 room with 10px walls
//! let map = RasterMap::from_fn(400, 400, |x, y| {
//!     x < 10 || x >= 390 || y < 10 || y >= 390
//! });
//!
//! let config = SimConfig::default();
//! let mut sim = Simulation::new(map, &config, Point2D::new(200.0, 200.0));
//!
//! for _ in 0..100 {
//!     sim.tick();
//! }
//! println!(
//!     "{} at ({:.1}, {:.1})",
//!     sim.robot().action.name(),
//!     sim.robot().position.x,
//!     sim.robot().position.y
//! );
//! ```
//!
//! ## Data Flow
//!
//! ```text
//!  ┌─────────────┐   ray per 0.5°   ┌─────────────┐
//!  │  RasterMap  │◄─────────────────│  RayCaster  │
//!  │ (obstacle   │   hit points     └──────┬──────┘
//!  │  raster)    │                         │ declutter
//!  └─────────────┘                         ▼
//!                                   ┌─────────────┐
//!                                   │ PointIndex  │  (rebuilt per tick)
//!                                   └──────┬──────┘
//!                                          │ greedy chain + merge
//!                                          ▼
//!  ┌─────────────┐  closest-point   ┌─────────────┐
//!  │    Robot    │◄─────────────────│   Scanner   │
//!  │ (3-state    │   queries        │ (segments)  │
//!  │ controller) │                  └─────────────┘
//!  └─────────────┘
//! ```
//!
//! One `Simulation::tick` runs the scanner and then one step of controller
//! logic, synchronously. The scanner's point index and segment list are
//! rebuilt from scratch every tick; the robot pose and controller state are
//! the only long-lived mutable state.

pub mod config;
pub mod core;
pub mod error;
pub mod point_index;
pub mod raster;
pub mod raycast;
pub mod robot;
pub mod scanner;
pub mod simulation;
pub mod visualization;

// Re-export main types at crate root
pub use config::{BoundaryConfig, RobotConfig, SensorConfig, SimConfig};
pub use error::{NavError, Result};
pub use point_index::PointIndex;
pub use raster::{Environment, RasterMap};
pub use raycast::RayCaster;
pub use robot::{Action, Robot};
pub use scanner::Scanner;
pub use simulation::Simulation;
pub use visualization::Visualizer;
