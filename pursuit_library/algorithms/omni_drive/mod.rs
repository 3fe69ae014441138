//! Omnidirectional Drive Kinematics
//!
//! Holonomic robot model: the chassis can translate in any body-frame
//! direction while turning independently.
//!
//! # Features
//!
//! - Body frame <-> world frame velocity rotation
//! - Fixed-step Euler integration (one unit of simulated time per tick)
//! - Heading kept in (-PI, PI]
//!
//! # Example
//!
//! ```rust
//! use pursuit_library::{OmniCmdVel, OmniRobot, Pose2D, RobotParams};
//!
//! let robot = OmniRobot::new(Pose2D::new(0.0, 0.0, 0.0), RobotParams::default());
//!
//! // Drive forward at 2 units/tick
//! let next = robot.advance(OmniCmdVel::new(2.0, 0.0, 0.0));
//! assert_eq!(next.pose.x, 2.0);
//! ```

use crate::error::ConfigError;
use crate::messages::{normalize_angle, OmniCmdVel, Point2, Pose2D};
use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// Fixed physical parameters of the robot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotParams {
    /// Collision radius
    pub radius: f64,
    /// Maximum linear speed (units/tick)
    pub max_speed: f64,
    /// Turn-rate cap (rad/tick)
    pub turn_speed: f64,
}

impl Default for RobotParams {
    fn default() -> Self {
        Self {
            radius: 20.0,
            max_speed: 2.0,
            turn_speed: 0.05,
        }
    }
}

impl RobotParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("robot.radius", self.radius)?;
        ConfigError::require_positive("robot.max_speed", self.max_speed)?;
        ConfigError::require_positive("robot.turn_speed", self.turn_speed)?;
        Ok(())
    }
}

/// Kinematic state of an omnidirectional robot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OmniRobot {
    pub pose: Pose2D,
    /// Last applied body-frame velocity, forward component
    pub vx: f64,
    /// Last applied body-frame velocity, lateral component
    pub vy: f64,
    pub params: RobotParams,
}

impl OmniRobot {
    /// Create a robot at rest
    pub fn new(pose: Pose2D, params: RobotParams) -> Self {
        Self {
            pose,
            vx: 0.0,
            vy: 0.0,
            params,
        }
    }

    /// Speed of the last applied command, used for adaptive lookahead
    pub fn current_speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    pub fn position(&self) -> Point2 {
        self.pose.position()
    }

    /// Apply a body-frame command for one tick and return the next state
    ///
    /// No bounds are enforced here; the controller keeps commands within
    /// `max_speed` and `turn_speed`.
    pub fn advance(&self, cmd: OmniCmdVel) -> OmniRobot {
        let world = body_to_world(self.pose.theta, Point2::new(cmd.vx, cmd.vy));

        OmniRobot {
            pose: Pose2D {
                x: self.pose.x + world.x,
                y: self.pose.y + world.y,
                theta: normalize_angle(self.pose.theta + cmd.omega),
            },
            vx: cmd.vx,
            vy: cmd.vy,
            params: self.params,
        }
    }
}

/// Rotate a body-frame vector into the world frame
pub fn body_to_world(heading: f64, body: Point2) -> Point2 {
    let v = Rotation2::new(heading) * Vector2::new(body.x, body.y);
    Point2::new(v.x, v.y)
}

/// Rotate a world-frame vector into the body frame
pub fn world_to_body(heading: f64, world: Point2) -> Point2 {
    let v = Rotation2::new(-heading) * Vector2::new(world.x, world.y);
    Point2::new(v.x, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn robot_at(theta: f64) -> OmniRobot {
        OmniRobot::new(Pose2D::new(0.0, 0.0, theta), RobotParams::default())
    }

    #[test]
    fn test_forward_motion() {
        let next = robot_at(0.0).advance(OmniCmdVel::new(2.0, 0.0, 0.0));
        assert_relative_eq!(next.pose.x, 2.0);
        assert_relative_eq!(next.pose.y, 0.0);
        assert_relative_eq!(next.pose.theta, 0.0);
    }

    #[test]
    fn test_forward_motion_rotated() {
        // Facing +y, forward in body frame is +y in world
        let next = robot_at(FRAC_PI_2).advance(OmniCmdVel::new(2.0, 0.0, 0.0));
        assert_relative_eq!(next.pose.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(next.pose.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lateral_motion() {
        // Body +y is to the left of the heading
        let next = robot_at(0.0).advance(OmniCmdVel::new(0.0, 1.5, 0.0));
        assert_relative_eq!(next.pose.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(next.pose.y, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_stores_commanded_velocity() {
        let robot = robot_at(0.3);
        assert_relative_eq!(robot.current_speed(), 0.0);

        let next = robot.advance(OmniCmdVel::new(0.6, 0.8, 0.01));
        assert_relative_eq!(next.vx, 0.6);
        assert_relative_eq!(next.vy, 0.8);
        assert_relative_eq!(next.current_speed(), 1.0);
    }

    #[test]
    fn test_heading_wraps() {
        let robot = robot_at(PI - 0.01);
        let next = robot.advance(OmniCmdVel::new(0.0, 0.0, 0.05));
        assert_relative_eq!(next.pose.theta, -PI + 0.04, epsilon = 1e-12);
        assert!(next.pose.theta > -PI && next.pose.theta <= PI);
    }

    #[test]
    fn test_advance_is_pure() {
        let robot = robot_at(0.0);
        let _ = robot.advance(OmniCmdVel::new(1.0, 1.0, 0.1));
        assert_eq!(robot, robot_at(0.0));
    }

    #[test]
    fn test_frame_rotation_inverse() {
        let heading = 1.1;
        let v = Point2::new(3.0, -2.0);
        let back = world_to_body(heading, body_to_world(heading, v));
        assert_relative_eq!(back.x, v.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, v.y, epsilon = 1e-12);
    }

    #[test]
    fn test_params_validation() {
        assert!(RobotParams::default().validate().is_ok());

        let bad = RobotParams {
            turn_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::NonPositive { field: "robot.turn_speed", .. })
        ));
    }
}
