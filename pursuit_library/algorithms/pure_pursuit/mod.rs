//! Pure Pursuit Path Following Algorithm
//!
//! Geometric path tracking controller for holonomic mobile robots.
//!
//! # Features
//!
//! - Speed-adaptive look-ahead distance
//! - Target search by circle / segment intersection, forward-facing points only
//! - Monotonic progress cursor: segments behind the cursor are never revisited
//! - Heading correction toward the local path direction with a dead band
//! - Terminal approach with linear speed decay near the final waypoint
//!
//! The controller itself is stateless. Progress lives in the cursor the caller
//! passes in and receives back, so one controller can serve any number of runs.
//!
//! # Example
//!
//! ```rust
//! use pursuit_library::{OmniRobot, Point2, Pose2D, PurePursuit, RobotParams};
//!
//! let pursuit = PurePursuit::default();
//! let path = vec![Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)];
//! let robot = OmniRobot::new(Pose2D::new(0.0, 0.0, 0.0), RobotParams::default());
//!
//! let out = pursuit.compute_command(Some(&robot), &path, 0);
//! assert!((out.command.vx - 2.0).abs() < 1e-9);
//! assert_eq!(out.cursor, 0);
//! ```


use crate::algorithms::intersection::circle_segment_intersections;
use crate::algorithms::omni_drive::{world_to_body, OmniRobot};
use crate::error::ConfigError;
use crate::messages::{normalize_angle, OmniCmdVel, Point2};
use serde::{Deserialize, Serialize};

/// Tunable gains and thresholds of the controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    /// Look-ahead growth per unit of current speed
    pub lookahead_gain: f64,
    pub min_lookahead: f64,
    pub max_lookahead: f64,
    /// Heading errors below this (rad) are treated as zero
    pub angle_tolerance: f64,
    /// Proportional gain from heading error to turn rate
    pub heading_gain: f64,
    /// Distance to the final waypoint below which speed starts to decay
    pub arrival_radius: f64,
    /// Creep speed floor during the terminal approach
    pub min_approach_speed: f64,
    /// Arrival threshold as a fraction of the robot radius
    pub arrival_fraction: f64,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            lookahead_gain: 10.0,
            min_lookahead: 15.0,
            max_lookahead: 50.0,
            angle_tolerance: 0.035, // ~2 degrees
            heading_gain: 0.5,
            arrival_radius: 150.0,
            min_approach_speed: 0.05,
            arrival_fraction: 0.25,
        }
    }
}

impl PursuitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_non_negative("pursuit.lookahead_gain", self.lookahead_gain)?;
        ConfigError::require_positive("pursuit.min_lookahead", self.min_lookahead)?;
        ConfigError::require_positive("pursuit.max_lookahead", self.max_lookahead)?;
        if self.min_lookahead > self.max_lookahead {
            return Err(ConfigError::LookaheadRange {
                min: self.min_lookahead,
                max: self.max_lookahead,
            });
        }
        ConfigError::require_non_negative("pursuit.angle_tolerance", self.angle_tolerance)?;
        ConfigError::require_positive("pursuit.heading_gain", self.heading_gain)?;
        ConfigError::require_positive("pursuit.arrival_radius", self.arrival_radius)?;
        ConfigError::require_positive("pursuit.min_approach_speed", self.min_approach_speed)?;
        ConfigError::require_non_negative("pursuit.arrival_fraction", self.arrival_fraction)?;
        Ok(())
    }
}

/// Which branch of the control law produced a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PursuitMode {
    /// No robot or fewer than two waypoints
    #[default]
    Inactive,
    /// Forward look-ahead target found on the path
    Searching,
    /// No forward target, steering at the final waypoint
    Approaching,
    /// Within the arrival threshold of the final waypoint
    Arrived,
}

/// Observability data for overlays and logging
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PursuitDebug {
    pub mode: PursuitMode,
    /// Look-ahead circle radius
    pub lookahead: Option<f64>,
    /// Point the robot is steering toward
    pub target: Option<Point2>,
    /// Segment the target was found on
    pub segment: Option<usize>,
}

/// Result of one controller evaluation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PursuitOutput {
    pub command: OmniCmdVel,
    /// Progress cursor to pass into the next evaluation
    pub cursor: usize,
    pub debug: PursuitDebug,
}

/// Pure Pursuit Controller
#[derive(Debug, Clone, Default)]
pub struct PurePursuit {
    config: PursuitConfig,
}

impl PurePursuit {
    pub fn new(config: PursuitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PursuitConfig {
        &self.config
    }

    /// Look-ahead distance for the given speed, bounded by the configured limits
    ///
    /// The lower bound wins if the limits are inverted.
    pub fn lookahead_distance(&self, speed: f64) -> f64 {
        let cfg = &self.config;
        let raw = speed * cfg.lookahead_gain + cfg.min_lookahead;
        cfg.min_lookahead.max(raw.min(cfg.max_lookahead))
    }

    /// Compute the body-frame command for the current tick
    ///
    /// `cursor` is the first segment the search may consider. The returned
    /// cursor is never smaller than the one passed in.
    pub fn compute_command(
        &self,
        robot: Option<&OmniRobot>,
        path: &[Point2],
        cursor: usize,
    ) -> PursuitOutput {
        let robot = match robot {
            Some(robot) if path.len() >= 2 => robot,
            _ => {
                return PursuitOutput {
                    cursor,
                    ..Default::default()
                }
            }
        };

        let lookahead = self.lookahead_distance(robot.current_speed());

        if let Some((target, segment)) = self.find_target(robot, path, cursor, lookahead) {
            return PursuitOutput {
                command: self.track(robot, path, target, segment),
                cursor: segment,
                debug: PursuitDebug {
                    mode: PursuitMode::Searching,
                    lookahead: Some(lookahead),
                    target: Some(target),
                    segment: Some(segment),
                },
            };
        }

        // Terminal approach: steer at the final waypoint
        let goal = path[path.len() - 1];
        match self.approach(robot, goal) {
            Some(command) => PursuitOutput {
                command,
                cursor,
                debug: PursuitDebug {
                    mode: PursuitMode::Approaching,
                    lookahead: Some(lookahead),
                    target: Some(goal),
                    segment: None,
                },
            },
            None => PursuitOutput {
                command: OmniCmdVel::zero(),
                cursor,
                debug: PursuitDebug {
                    mode: PursuitMode::Arrived,
                    ..Default::default()
                },
            },
        }
    }

    /// Search segments from `cursor` onward for a forward look-ahead point
    ///
    /// Stops at the first segment with a forward hit and returns the hit
    /// farthest from the robot together with that segment's index.
    pub fn find_target(
        &self,
        robot: &OmniRobot,
        path: &[Point2],
        cursor: usize,
        lookahead: f64,
    ) -> Option<(Point2, usize)> {
        let position = robot.position();

        for i in cursor..path.len().saturating_sub(1) {
            let hits = circle_segment_intersections(position, lookahead, path[i], path[i + 1]);

            let mut best: Option<(Point2, f64)> = None;
            for hit in hits.into_iter().filter(|p| robot.pose.is_ahead(*p)) {
                let dist = position.distance(hit);
                if best.map_or(true, |(_, d)| dist > d) {
                    best = Some((hit, dist));
                }
            }

            if let Some((target, _)) = best {
                return Some((target, i));
            }
        }

        None
    }

    /// Normal mode: full speed toward the target, heading toward the path direction
    fn track(
        &self,
        robot: &OmniRobot,
        path: &[Point2],
        target: Point2,
        segment: usize,
    ) -> OmniCmdVel {
        let velocity = self.body_velocity_toward(robot, target, robot.params.max_speed);

        let start = path[segment];
        let end = path.get(segment + 1).copied().unwrap_or(start);
        let path_heading = start.to(end).angle();

        OmniCmdVel::new(velocity.x, velocity.y, self.heading_correction(robot, path_heading))
    }

    /// Turn rate that rotates the robot toward `path_heading`
    pub fn heading_correction(&self, robot: &OmniRobot, path_heading: f64) -> f64 {
        let error = normalize_angle(path_heading - robot.pose.theta);
        if error.abs() < self.config.angle_tolerance {
            return 0.0;
        }

        // min/max instead of clamp: a bad turn_speed must not panic mid-tick
        let limit = robot.params.turn_speed.abs();
        (-limit).max((error * self.config.heading_gain).min(limit))
    }

    /// Terminal mode command, or `None` once the robot has arrived
    fn approach(&self, robot: &OmniRobot, goal: Point2) -> Option<OmniCmdVel> {
        let cfg = &self.config;
        let dist = robot.position().distance(goal);
        if dist < robot.params.radius * cfg.arrival_fraction {
            return None;
        }

        let max_speed = robot.params.max_speed;
        let speed = if dist < cfg.arrival_radius {
            max_speed * (dist / cfg.arrival_radius)
        } else {
            max_speed
        };
        let speed = speed.max(cfg.min_approach_speed);

        // Orientation is left as-is during the approach
        let velocity = self.body_velocity_toward(robot, goal, speed);
        Some(OmniCmdVel::new(velocity.x, velocity.y, 0.0))
    }

    fn body_velocity_toward(&self, robot: &OmniRobot, point: Point2, speed: f64) -> Point2 {
        let bearing = robot.position().to(point).angle();
        let world = Point2::new(speed * bearing.cos(), speed * bearing.sin());
        world_to_body(robot.pose.theta, world)
    }
}
