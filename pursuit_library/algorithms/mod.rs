//! Pure computational algorithms for path tracking
//!
//! No I/O and no hidden state: every algorithm here is a plain function or a
//! value type, so the simulation layer decides when and how often they run.
//!
//! # Available Algorithms
//!
//! - **intersection**: circle / line segment intersection
//! - **omni_drive**: holonomic robot kinematics (body <-> world frames, Euler step)
//! - **pure_pursuit**: adaptive-lookahead Pure Pursuit path tracking

pub mod intersection;
pub mod omni_drive;
pub mod pure_pursuit;
