//! Message types exchanged between the controller, the robot and the tick source
//!
//! - Geometry: spatial primitives (Point2, Pose2D) and angle normalization
//! - Control: body-frame velocity command (OmniCmdVel)
//!
//! All message types are re-exported at the crate root for convenience.

pub mod cmd_vel;
pub mod geometry;

pub use cmd_vel::OmniCmdVel;
pub use geometry::{normalize_angle, Point2, Pose2D};
