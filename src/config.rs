//! Configuration loading for bhitti-nav

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Distance-sensor parameters
#[derive(Clone, Debug, Deserialize)]
pub struct SensorConfig {
    /// Ray cutoff distance in raster units (default: 300)
    #[serde(default = "default_max_range")]
    pub max_range: f32,

    /// Coarse ray step size in raster units (default: 5)
    #[serde(default = "default_hop_distance")]
    pub hop_distance: f32,

    /// Angular sweep resolution in degrees (default: 0.5)
    #[serde(default = "default_angular_step")]
    pub angular_step_deg: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            max_range: default_max_range(),
            hop_distance: default_hop_distance(),
            angular_step_deg: default_angular_step(),
        }
    }
}

impl SensorConfig {
    /// Builder-style setter for max range.
    pub fn with_max_range(mut self, value: f32) -> Self {
        self.max_range = value;
        self
    }

    /// Builder-style setter for hop distance.
    pub fn with_hop_distance(mut self, value: f32) -> Self {
        self.hop_distance = value;
        self
    }

    /// Builder-style setter for angular step.
    pub fn with_angular_step_deg(mut self, value: f32) -> Self {
        self.angular_step_deg = value;
        self
    }
}

/// Boundary extraction parameters
#[derive(Clone, Debug, Deserialize)]
pub struct BoundaryConfig {
    /// Minimum distance between a new point and its nearest accepted
    /// neighbor before the new point is discarded (default: 7)
    #[serde(default = "default_dedupe_radius")]
    pub dedupe_radius: f32,

    /// Maximum chain step emitting a segment; longer steps break the chain.
    /// Wired to the robot radius by the simulation (default: 15)
    #[serde(default = "default_chain_gap")]
    pub chain_gap: f32,

    /// Maximum angle difference for merging adjacent segments, in degrees
    /// (default: 5)
    #[serde(default = "default_merge_angle")]
    pub merge_angle_deg: f32,

    /// Maximum endpoint distance for merging adjacent segments
    /// (default: 10)
    #[serde(default = "default_merge_distance")]
    pub merge_distance: f32,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            dedupe_radius: default_dedupe_radius(),
            chain_gap: default_chain_gap(),
            merge_angle_deg: default_merge_angle(),
            merge_distance: default_merge_distance(),
        }
    }
}

impl BoundaryConfig {
    /// Builder-style setter for dedupe radius.
    pub fn with_dedupe_radius(mut self, value: f32) -> Self {
        self.dedupe_radius = value;
        self
    }

    /// Builder-style setter for chain gap.
    pub fn with_chain_gap(mut self, value: f32) -> Self {
        self.chain_gap = value;
        self
    }

    /// Builder-style setter for merge angle threshold.
    pub fn with_merge_angle_deg(mut self, value: f32) -> Self {
        self.merge_angle_deg = value;
        self
    }

    /// Builder-style setter for merge distance threshold.
    pub fn with_merge_distance(mut self, value: f32) -> Self {
        self.merge_distance = value;
        self
    }
}

/// Robot physical and control parameters
#[derive(Clone, Debug, Deserialize)]
pub struct RobotConfig {
    /// Collision footprint radius in raster units (default: 15)
    #[serde(default = "default_radius")]
    pub radius: f32,

    /// Linear travel per tick in raster units (default: 2)
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Slack beyond the radius before the controller steers back toward
    /// the wall (default: 5)
    #[serde(default = "default_extra_collision_slack")]
    pub extra_collision_slack: f32,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            speed: default_speed(),
            extra_collision_slack: default_extra_collision_slack(),
        }
    }
}

impl RobotConfig {
    /// Builder-style setter for the robot radius.
    pub fn with_radius(mut self, value: f32) -> Self {
        self.radius = value;
        self
    }

    /// Builder-style setter for the per-tick speed.
    pub fn with_speed(mut self, value: f32) -> Self {
        self.speed = value;
        self
    }

    /// Builder-style setter for the wall-following slack.
    pub fn with_extra_collision_slack(mut self, value: f32) -> Self {
        self.extra_collision_slack = value;
        self
    }
}

fn default_max_range() -> f32 {
    300.0
}

fn default_hop_distance() -> f32 {
    5.0
}

fn default_angular_step() -> f32 {
    0.5
}

fn default_dedupe_radius() -> f32 {
    7.0
}

fn default_chain_gap() -> f32 {
    15.0
}

fn default_merge_angle() -> f32 {
    5.0
}

fn default_merge_distance() -> f32 {
    10.0
}

fn default_radius() -> f32 {
    15.0
}

fn default_speed() -> f32 {
    2.0
}

fn default_extra_collision_slack() -> f32 {
    5.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();

        assert_eq!(config.sensor.max_range, 300.0);
        assert_eq!(config.sensor.hop_distance, 5.0);
        assert_eq!(config.sensor.angular_step_deg, 0.5);
        assert_eq!(config.boundary.dedupe_radius, 7.0);
        assert_eq!(config.boundary.merge_angle_deg, 5.0);
        assert_eq!(config.boundary.merge_distance, 10.0);
        assert_eq!(config.robot.radius, 15.0);
        assert_eq!(config.robot.speed, 2.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SimConfig = toml::from_str(
            r#"
            [robot]
            radius = 12.0

            [sensor]
            max_range = 150.0
            "#,
        )
        .unwrap();

        assert_eq!(config.robot.radius, 12.0);
        assert_eq!(config.robot.speed, 2.0);
        assert_eq!(config.sensor.max_range, 150.0);
        assert_eq!(config.sensor.hop_distance, 5.0);
        assert_eq!(config.boundary.dedupe_radius, 7.0);
    }

    #[test]
    fn test_builders() {
        let boundary = BoundaryConfig::default()
            .with_chain_gap(20.0)
            .with_merge_distance(4.0);
        assert_eq!(boundary.chain_gap, 20.0);
        assert_eq!(boundary.merge_distance, 4.0);
        assert_eq!(boundary.dedupe_radius, 7.0);
    }
}
