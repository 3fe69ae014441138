//! # Pursuit Library
//!
//! Path tracking for a holonomic (omnidirectional) mobile robot using the
//! Pure Pursuit steering law.
//!
//! ## Structure
//!
//! ```text
//! pursuit_library/
//! ── messages/       # Geometry primitives and velocity commands
//! ── algorithms/     # Intersection, omni kinematics, pure pursuit
//! ── simulation/     # Simulation state driven by an external tick source
//! ── tools/          # Development utilities (pursuit_sim)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pursuit_library::{Point2, SimulationConfig, SimulationState};
//!
//! let mut sim = SimulationState::new(SimulationConfig::default());
//! sim.add_waypoint(Point2::new(400.0, 550.0)).unwrap();
//! sim.add_waypoint(Point2::new(400.0, 100.0)).unwrap();
//! sim.start().unwrap();
//!
//! let report = sim.tick().expect("running");
//! assert!(report.command.vx > 0.0);
//! ```

pub mod algorithms;
pub mod error;
pub mod messages;
pub mod simulation;

pub use error::{ConfigError, SimulationError};
pub use messages::*;

pub use algorithms::omni_drive::{OmniRobot, RobotParams};
pub use algorithms::pure_pursuit::{
    PurePursuit, PursuitConfig, PursuitDebug, PursuitMode, PursuitOutput,
};
pub use simulation::{CanvasConfig, SimulationConfig, SimulationState, TickReport};

/// Prelude module for convenient imports
///
/// # Usage
/// ```rust
/// use pursuit_library::prelude::*;
/// ```
pub mod prelude {
    pub use crate::messages::{
        cmd_vel::OmniCmdVel,
        geometry::{normalize_angle, Point2, Pose2D},
    };

    pub use crate::algorithms::intersection::circle_segment_intersections;
    pub use crate::algorithms::omni_drive::{OmniRobot, RobotParams};
    pub use crate::algorithms::pure_pursuit::{
        PurePursuit, PursuitConfig, PursuitDebug, PursuitMode, PursuitOutput,
    };

    pub use crate::simulation::{SimulationConfig, SimulationState, TickReport};
    pub use crate::{ConfigError, SimulationError};
}
