//! # pursuit_sim - Headless Pure Pursuit Simulator
//!
//! Drives a [`SimulationState`] from a fixed-step loop instead of a render
//! loop, recording every tick and collecting run metrics.
//!
//! ## Binary Usage
//! ```bash
//! pursuit_sim --waypoint 400,550 --waypoint 400,300 --waypoint 600,100 \
//!     --record run.csv --metrics run.json
//! pursuit_sim --config tuning.toml --waypoint 400,550 --waypoint 400,100
//! ```
//!
//! ## Library Usage
//! ```rust
//! use pursuit_sim::{SimConfig, SimRunner};
//! use pursuit_library::Point2;
//!
//! let mut runner = SimRunner::new(SimConfig::default()).unwrap();
//! runner.add_waypoints([Point2::new(400.0, 550.0), Point2::new(400.0, 400.0)]).unwrap();
//! let outcome = runner.run().unwrap();
//! assert!(outcome.arrived);
//! ```

// Performance metrics
pub mod metrics;

// Recording and CSV export
pub mod recorder;

use anyhow::{Context, Result};
use pursuit_library::{
    CanvasConfig, Point2, Pose2D, PursuitConfig, PursuitMode, RobotParams, SimulationConfig,
    SimulationState,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

pub use metrics::PerformanceMetrics;
pub use recorder::{RecordedFrame, Recording};

/// Run limits and labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Tick budget before the run is abandoned
    pub max_ticks: u64,
    pub name: String,
    pub description: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks: 5000,
            name: "Unnamed Run".to_string(),
            description: String::new(),
        }
    }
}

/// Simulator configuration file contents
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub canvas: CanvasConfig,
    pub robot: RobotParams,
    pub pursuit: PursuitConfig,
    pub run: RunConfig,
}

impl SimConfig {
    /// Load a config file, TOML for `.toml`, YAML otherwise
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: SimConfig = if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config {:?}", path))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config {:?}", path))?
        };

        Ok(config)
    }

    pub fn simulation(&self) -> SimulationConfig {
        SimulationConfig {
            canvas: self.canvas,
            robot: self.robot,
            pursuit: self.pursuit,
        }
    }
}

/// How a headless run ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOutcome {
    pub ticks: u64,
    pub arrived: bool,
    pub final_pose: Pose2D,
    pub final_cursor: usize,
}

/// Fixed-step tick source around a [`SimulationState`]
pub struct SimRunner {
    state: SimulationState,
    run: RunConfig,
    recording: Recording,
    metrics: PerformanceMetrics,
}

impl SimRunner {
    /// Validate the configuration and place the robot at the start pose
    pub fn new(config: SimConfig) -> Result<Self> {
        let state = SimulationState::try_new(config.simulation())
            .context("Invalid simulation configuration")?;

        Ok(Self {
            state,
            recording: Recording::new(&config.run.name, &config.run.description),
            metrics: PerformanceMetrics::new(&config.run.name, &config.run.description),
            run: config.run,
        })
    }

    pub fn add_waypoints(&mut self, points: impl IntoIterator<Item = Point2>) -> Result<()> {
        for point in points {
            self.state
                .add_waypoint(point)
                .with_context(|| format!("Failed to add waypoint ({}, {})", point.x, point.y))?;
        }
        Ok(())
    }

    /// Tick until the robot arrives or the tick budget runs out
    pub fn run(&mut self) -> Result<RunOutcome> {
        self.state.start().context("Failed to start simulation")?;
        info!(
            "running '{}' over {} waypoints (max {} ticks)",
            self.run.name,
            self.state.path().len(),
            self.run.max_ticks
        );

        let mut arrived = false;
        while self.state.ticks() < self.run.max_ticks {
            let Some(report) = self.state.tick() else {
                break;
            };

            self.recording.add_frame(RecordedFrame::from_report(&report));
            self.metrics.update(&report, self.state.path());

            if report.debug.mode == PursuitMode::Arrived {
                arrived = true;
                break;
            }
        }
        self.state.pause();

        let pose = self.state.robot().pose;
        if arrived {
            info!(
                "arrived after {} ticks at ({:.1}, {:.1})",
                self.state.ticks(),
                pose.x,
                pose.y
            );
        } else {
            warn!(
                "gave up after {} ticks at ({:.1}, {:.1}), last mode {:?}",
                self.state.ticks(),
                pose.x,
                pose.y,
                self.state.mode()
            );
        }

        Ok(RunOutcome {
            ticks: self.state.ticks(),
            arrived,
            final_pose: pose,
            final_cursor: self.state.cursor(),
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }
}

/// Parse a `X,Y` waypoint argument
pub fn parse_waypoint(arg: &str) -> Result<Point2, String> {
    let (x, y) = arg
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", arg))?;
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|e| format!("invalid x in '{}': {}", arg, e))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|e| format!("invalid y in '{}': {}", arg, e))?;
    Ok(Point2::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_waypoint() {
        assert_eq!(parse_waypoint("12.5, -3").unwrap(), Point2::new(12.5, -3.0));
        assert!(parse_waypoint("12.5").is_err());
        assert!(parse_waypoint("a,b").is_err());
    }

    #[test]
    fn test_default_config_matches_library() {
        let config = SimConfig::default();
        assert_eq!(config.simulation(), SimulationConfig::default());
        assert_eq!(config.run.max_ticks, 5000);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimConfig::default();
        config.pursuit.min_lookahead = 80.0;
        assert!(SimRunner::new(config).is_err());
    }
}
