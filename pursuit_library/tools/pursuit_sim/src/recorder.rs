//! Recording of simulation ticks
//!
//! Every tick of a run becomes one [`RecordedFrame`]. A recording can be saved
//! as YAML and loaded back, or flattened to CSV for plotting.

use anyhow::{Context, Result};
use pursuit_library::{PursuitMode, TickReport};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Robot and controller state after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub tick: u64,

    /// Pose after the command was applied
    pub x: f64,
    pub y: f64,
    pub heading: f64,

    /// Body-frame command applied during this tick
    pub vx: f64,
    pub vy: f64,
    pub omega: f64,

    pub mode: PursuitMode,
    pub cursor: usize,
    pub lookahead: Option<f64>,
    pub target_x: Option<f64>,
    pub target_y: Option<f64>,
}

impl RecordedFrame {
    pub fn from_report(report: &TickReport) -> Self {
        Self {
            tick: report.tick,
            x: report.pose.x,
            y: report.pose.y,
            heading: report.pose.theta,
            vx: report.command.vx,
            vy: report.command.vy,
            omega: report.command.omega,
            mode: report.debug.mode,
            cursor: report.cursor,
            lookahead: report.debug.lookahead,
            target_x: report.debug.target.map(|p| p.x),
            target_y: report.debug.target.map(|p| p.y),
        }
    }
}

/// Metadata about a recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    pub name: String,
    pub description: String,
    pub frame_count: u64,
    /// Recording start time (RFC 3339)
    pub recorded_at: String,
}

/// Complete recording session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub metadata: RecordingMetadata,
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    /// Create a new empty recording
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            metadata: RecordingMetadata {
                name: name.into(),
                description: description.into(),
                frame_count: 0,
                recorded_at: chrono::Utc::now().to_rfc3339(),
            },
            frames: Vec::new(),
        }
    }

    pub fn add_frame(&mut self, frame: RecordedFrame) {
        self.frames.push(frame);
        self.metadata.frame_count = self.frames.len() as u64;
    }

    /// First tick at which the controller reported `mode`
    pub fn first_tick_in_mode(&self, mode: PursuitMode) -> Option<u64> {
        self.frames.iter().find(|f| f.mode == mode).map(|f| f.tick)
    }

    /// Save recording to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize recording to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write recording to {:?}", path))?;

        Ok(())
    }

    /// Load recording from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recording from {:?}", path))?;

        let recording: Recording =
            serde_yaml::from_str(&yaml).context("Failed to deserialize recording from YAML")?;

        Ok(recording)
    }

    /// Export one row per tick to CSV
    pub fn export_to_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file at {:?}", path))?;

        for frame in &self.frames {
            wtr.serialize(frame)?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Save as CSV for a `.csv` path, YAML otherwise
    pub fn export(&self, path: &Path) -> Result<()> {
        if path.extension().is_some_and(|ext| ext == "csv") {
            self.export_to_csv(path)
        } else {
            self.save_to_file(path)
        }
    }
}
