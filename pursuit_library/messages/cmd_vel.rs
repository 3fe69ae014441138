use serde::{Deserialize, Serialize};

/// Body-frame velocity command for an omnidirectional robot
///
/// `vx` points along the robot heading, `vy` to its left, `omega` is the
/// turn rate (positive counter-clockwise). Units are per simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OmniCmdVel {
    pub vx: f64,
    pub vy: f64,
    pub omega: f64,
}

impl OmniCmdVel {
    pub fn new(vx: f64, vy: f64, omega: f64) -> Self {
        Self { vx, vy, omega }
    }

    /// Create a zero velocity command (stop)
    pub fn zero() -> Self {
        Self::default()
    }

    /// Magnitude of the translational part
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    pub fn is_zero(&self) -> bool {
        self.vx == 0.0 && self.vy == 0.0 && self.omega == 0.0
    }
}
