//! Performance metrics for evaluating controller tuning
//!
//! Tracks distance travelled, commanded speed, cross-track error and how long
//! the controller spent in each pursuit mode.

use anyhow::{Context, Result};
use pursuit_library::algorithms::intersection::distance_to_segment;
use pursuit_library::{Point2, PursuitMode, TickReport};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ticks spent in each pursuit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeTicks {
    pub inactive: u64,
    pub searching: u64,
    pub approaching: u64,
    pub arrived: u64,
}

impl ModeTicks {
    fn count(&mut self, mode: PursuitMode) {
        match mode {
            PursuitMode::Inactive => self.inactive += 1,
            PursuitMode::Searching => self.searching += 1,
            PursuitMode::Approaching => self.approaching += 1,
            PursuitMode::Arrived => self.arrived += 1,
        }
    }
}

/// Run metrics for one path-following run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub run_name: String,
    pub run_description: String,

    pub ticks: u64,
    /// Distance covered by the robot
    pub distance_travelled: f64,
    pub avg_speed: f64,
    pub max_speed: f64,

    /// Largest distance from the robot to the path polyline
    pub max_cross_track_error: f64,
    pub mean_cross_track_error: f64,

    pub mode_ticks: ModeTicks,
    pub arrived: bool,
    pub ticks_to_arrival: Option<u64>,

    #[serde(skip)]
    last_position: Option<Point2>,
    #[serde(skip)]
    speed_sum: f64,
    #[serde(skip)]
    cross_track_sum: f64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            run_name: "Unnamed Run".to_string(),
            run_description: String::new(),
            ticks: 0,
            distance_travelled: 0.0,
            avg_speed: 0.0,
            max_speed: 0.0,
            max_cross_track_error: 0.0,
            mean_cross_track_error: 0.0,
            mode_ticks: ModeTicks::default(),
            arrived: false,
            ticks_to_arrival: None,
            last_position: None,
            speed_sum: 0.0,
            cross_track_sum: 0.0,
        }
    }
}

impl PerformanceMetrics {
    /// Create new metrics with a name and description
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            run_name: name.into(),
            run_description: description.into(),
            ..Default::default()
        }
    }

    /// Fold one tick into the metrics
    pub fn update(&mut self, report: &TickReport, path: &[Point2]) {
        self.ticks += 1;
        self.mode_ticks.count(report.debug.mode);

        let position = report.pose.position();
        if let Some(last) = self.last_position {
            self.distance_travelled += last.distance(position);
        }
        self.last_position = Some(position);

        let speed = report.command.speed();
        self.speed_sum += speed;
        self.avg_speed = self.speed_sum / self.ticks as f64;
        self.max_speed = self.max_speed.max(speed);

        if let Some(error) = cross_track_error(position, path) {
            self.cross_track_sum += error;
            self.mean_cross_track_error = self.cross_track_sum / self.ticks as f64;
            self.max_cross_track_error = self.max_cross_track_error.max(error);
        }

        if report.debug.mode == PursuitMode::Arrived && !self.arrived {
            self.arrived = true;
            self.ticks_to_arrival = Some(report.tick);
        }
    }

    /// Export metrics to JSON format
    pub fn export_to_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write metrics to {:?}", path))?;
        Ok(())
    }
}

/// Distance from `position` to the nearest segment of `path`
pub fn cross_track_error(position: Point2, path: &[Point2]) -> Option<f64> {
    path.windows(2)
        .map(|seg| distance_to_segment(position, seg[0], seg[1]))
        .min_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pursuit_library::{OmniCmdVel, Pose2D, PursuitDebug};
    use tempfile::TempDir;

    fn report(tick: u64, x: f64, y: f64, vx: f64, mode: PursuitMode) -> TickReport {
        TickReport {
            tick,
            pose: Pose2D::new(x, y, 0.0),
            command: OmniCmdVel::new(vx, 0.0, 0.0),
            cursor: 0,
            debug: PursuitDebug {
                mode,
                ..Default::default()
            },
        }
    }

    fn line() -> Vec<Point2> {
        vec![Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)]
    }

    #[test]
    fn test_metrics_creation() {
        let metrics = PerformanceMetrics::new("Test Run", "Testing metrics");
        assert_eq!(metrics.run_name, "Test Run");
        assert_eq!(metrics.run_description, "Testing metrics");
        assert_eq!(metrics.ticks, 0);
        assert_eq!(metrics.distance_travelled, 0.0);
    }

    #[test]
    fn test_metrics_update() {
        let mut metrics = PerformanceMetrics::default();
        let path = line();

        metrics.update(&report(1, 2.0, 0.0, 2.0, PursuitMode::Searching), &path);
        metrics.update(&report(2, 4.0, 3.0, 1.0, PursuitMode::Approaching), &path);

        assert_eq!(metrics.ticks, 2);
        assert_relative_eq!(metrics.distance_travelled, 13.0_f64.sqrt());
        assert_relative_eq!(metrics.avg_speed, 1.5);
        assert_relative_eq!(metrics.max_speed, 2.0);
        assert_relative_eq!(metrics.max_cross_track_error, 3.0);
        assert_relative_eq!(metrics.mean_cross_track_error, 1.5);
        assert_eq!(metrics.mode_ticks.searching, 1);
        assert_eq!(metrics.mode_ticks.approaching, 1);
        assert!(!metrics.arrived);
    }

    #[test]
    fn test_arrival_tracking() {
        let mut metrics = PerformanceMetrics::default();
        let path = line();

        metrics.update(&report(7, 100.0, 0.0, 0.0, PursuitMode::Arrived), &path);
        metrics.update(&report(8, 100.0, 0.0, 0.0, PursuitMode::Arrived), &path);

        assert!(metrics.arrived);
        assert_eq!(metrics.ticks_to_arrival, Some(7));
        assert_eq!(metrics.mode_ticks.arrived, 2);
    }

    #[test]
    fn test_cross_track_error() {
        let path = vec![
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 100.0),
        ];
        assert_relative_eq!(cross_track_error(Point2::new(90.0, 50.0), &path).unwrap(), 10.0);
        assert!(cross_track_error(Point2::new(0.0, 0.0), &path[..1]).is_none());
    }

    #[test]
    fn test_json_export() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_dir.path().join("test_metrics.json");

        let mut metrics = PerformanceMetrics::new("JSON Test", "Testing JSON export");
        metrics.update(&report(1, 2.0, 0.0, 2.0, PursuitMode::Searching), &line());
        metrics.update(&report(2, 4.0, 0.0, 2.0, PursuitMode::Arrived), &line());

        metrics.export_to_json(&temp_path).unwrap();
        let json = std::fs::read_to_string(&temp_path).unwrap();
        let loaded: PerformanceMetrics = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.run_name, metrics.run_name);
        assert_eq!(loaded.ticks, 2);
        assert_eq!(loaded.ticks_to_arrival, Some(2));
        assert_eq!(loaded.distance_travelled, metrics.distance_travelled);
    }
}
