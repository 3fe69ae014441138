//! Simulation state driven by an external tick source
//!
//! [`SimulationState`] owns everything one run needs: the path being edited or
//! followed, the robot, the controller's progress cursor and the running flag.
//! A tick source (render loop, headless runner, test) calls [`SimulationState::tick`]
//! at whatever rate it likes; each call performs exactly one control cycle.
//!
//! # Editing and running
//!
//! Waypoints can only be appended while the simulation is not running. Pausing
//! keeps the cursor, so appended waypoints extend the path past it and the run
//! resumes onto the new tail. [`SimulationState::reset`] clears everything.

use crate::algorithms::omni_drive::{OmniRobot, RobotParams};
use crate::algorithms::pure_pursuit::{PurePursuit, PursuitConfig, PursuitDebug, PursuitMode};
use crate::error::{ConfigError, SimulationError};
use crate::messages::{OmniCmdVel, Point2, Pose2D};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, info, trace};

/// Logical canvas the robot lives on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl CanvasConfig {
    /// Fixed start configuration: bottom center, facing up the screen
    pub fn start_pose(&self) -> Pose2D {
        Pose2D::new(self.width / 2.0, self.height - 50.0, -FRAC_PI_2)
    }
}

/// Everything needed to build a [`SimulationState`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub canvas: CanvasConfig,
    pub robot: RobotParams,
    pub pursuit: PursuitConfig,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("canvas.width", self.canvas.width)?;
        ConfigError::require_positive("canvas.height", self.canvas.height)?;
        self.robot.validate()?;
        self.pursuit.validate()?;
        Ok(())
    }
}

/// What one tick produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Ticks executed since the last reset, including this one
    pub tick: u64,
    /// Pose after applying the command
    pub pose: Pose2D,
    pub command: OmniCmdVel,
    pub cursor: usize,
    pub debug: PursuitDebug,
}

/// Simulation context passed between the tick source and the core
#[derive(Debug, Clone)]
pub struct SimulationState {
    config: SimulationConfig,
    controller: PurePursuit,
    path: Vec<Point2>,
    robot: OmniRobot,
    cursor: usize,
    running: bool,
    ticks: u64,
    mode: PursuitMode,
}

impl SimulationState {
    /// Build a state without checking the configuration
    ///
    /// Out-of-range values never panic a tick, but they can make the robot
    /// misbehave. Prefer [`SimulationState::try_new`] for external input.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            controller: PurePursuit::new(config.pursuit),
            path: Vec::new(),
            robot: OmniRobot::new(config.canvas.start_pose(), config.robot),
            cursor: 0,
            running: false,
            ticks: 0,
            mode: PursuitMode::Inactive,
            config,
        }
    }

    /// Validate the configuration, then build the state
    pub fn try_new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Append a waypoint to the path
    pub fn add_waypoint(&mut self, point: Point2) -> Result<(), SimulationError> {
        if self.running {
            return Err(SimulationError::PathLocked);
        }
        if !point.is_finite() {
            return Err(SimulationError::NonFiniteWaypoint {
                x: point.x,
                y: point.y,
            });
        }
        self.path.push(point);
        debug!("waypoint {} at ({:.1}, {:.1})", self.path.len(), point.x, point.y);
        Ok(())
    }

    /// Start (or resume) the run
    pub fn start(&mut self) -> Result<(), SimulationError> {
        if self.path.is_empty() {
            return Err(SimulationError::EmptyPath);
        }
        if !self.running {
            self.running = true;
            info!(
                "simulation started with {} waypoints at cursor {}",
                self.path.len(),
                self.cursor
            );
        }
        Ok(())
    }

    /// Stop invoking the controller without discarding any state
    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            info!("simulation paused after {} ticks", self.ticks);
        }
    }

    /// Flip between running and paused, returning the new running flag
    pub fn toggle_running(&mut self) -> Result<bool, SimulationError> {
        if self.running {
            self.pause();
        } else {
            self.start()?;
        }
        Ok(self.running)
    }

    /// Put a fresh robot at the start pose and clear the path and progress
    pub fn reset(&mut self) {
        self.running = false;
        self.path.clear();
        self.robot = OmniRobot::new(self.config.canvas.start_pose(), self.config.robot);
        self.cursor = 0;
        self.ticks = 0;
        self.mode = PursuitMode::Inactive;
        info!("simulation reset");
    }

    /// Run one control cycle; `None` while not running
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.running {
            return None;
        }

        let out = self
            .controller
            .compute_command(Some(&self.robot), &self.path, self.cursor);

        self.robot = self.robot.advance(out.command);
        self.ticks += 1;

        if out.cursor != self.cursor {
            debug!("cursor advanced {} -> {}", self.cursor, out.cursor);
            self.cursor = out.cursor;
        }
        if out.debug.mode != self.mode {
            debug!("pursuit mode {:?} -> {:?} at tick {}", self.mode, out.debug.mode, self.ticks);
            self.mode = out.debug.mode;
        }
        trace!(
            "tick {}: pose ({:.2}, {:.2}, {:.3}) cmd ({:.3}, {:.3}, {:.3})",
            self.ticks,
            self.robot.pose.x,
            self.robot.pose.y,
            self.robot.pose.theta,
            out.command.vx,
            out.command.vy,
            out.command.omega
        );

        Some(TickReport {
            tick: self.ticks,
            pose: self.robot.pose,
            command: out.command,
            cursor: self.cursor,
            debug: out.debug,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn path(&self) -> &[Point2] {
        &self.path
    }

    pub fn robot(&self) -> &OmniRobot {
        &self.robot
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Mode reported by the most recent tick
    pub fn mode(&self) -> PursuitMode {
        self.mode
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
