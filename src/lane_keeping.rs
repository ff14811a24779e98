use tracing::debug;

use crate::classify::{classify_segments, ClassifierConfig};
use crate::config::LaneKeeperConfig;
use crate::heading::heading_from_offset;
use crate::lane_fit::fit_lane_lines;
use crate::offset::{estimate_offset, OffsetConfig};
use crate::steer_control::{Measurement, SteerController};
use crate::types::{LaneLine, LineSegment};

/// Full per-frame pipeline: segment classification, lane-line fitting,
/// deviation estimation and the steering controller, wired in dependency
/// order. Holds the only state that survives between frames.
#[derive(Debug)]
pub struct LaneKeeper {
    classifier: ClassifierConfig,
    offset: OffsetConfig,
    steer: SteerController,
    heading_alpha: f64,
    heading_deg: f64,
}

/// Snapshot of one control cycle, safe to hand to telemetry or overlay
/// consumers between updates.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Committed steering angle, whole degrees.
    pub angle_deg: i32,
    /// Deviation fed to the controller; `None` when no lane line was
    /// visible and the previous angle was held instead.
    pub offset_px: Option<f64>,
    /// Lane lines for this frame, ordered left to right.
    pub lane_lines: Vec<LaneLine>,
    /// Display-smoothed heading angle for overlays.
    pub heading_deg: f64,
}

impl LaneKeeper {
    pub fn new(config: &LaneKeeperConfig) -> Self {
        Self {
            classifier: config.classifier.clone(),
            offset: config.offset.clone(),
            steer: config.steer.build(),
            heading_alpha: config.heading_alpha,
            heading_deg: config.steer.neutral_angle,
        }
    }

    /// Runs one control cycle over the frame's detected segments. When the
    /// frame yields no usable lane line, the controller is skipped entirely
    /// and the previous committed angle re-emitted unchanged.
    pub fn step(
        &mut self,
        segments: &[LineSegment],
        frame_width: u32,
        frame_height: u32,
        time_sec: f64,
    ) -> StepReport {
        let candidates = classify_segments(segments, frame_width, &self.classifier);
        let lane_lines = fit_lane_lines(&candidates, frame_width, frame_height);

        if lane_lines.is_empty() {
            let angle_deg = self.steer.angle();
            debug!("no lane line in frame; holding angle at {} deg", angle_deg);
            return StepReport {
                angle_deg,
                offset_px: None,
                lane_lines,
                heading_deg: self.heading_deg,
            };
        }

        let offset_px = estimate_offset(&lane_lines, frame_width, &self.offset);
        let measurement = Measurement {
            offset_px,
            heading_deg: heading_from_offset(offset_px, frame_height, self.steer.neutral_angle()),
            lane_count: lane_lines.len(),
            time_sec,
        };
        let angle_deg = self.steer.step(measurement);

        self.heading_deg = self.heading_alpha * f64::from(angle_deg)
            + (1.0 - self.heading_alpha) * self.heading_deg;
        debug!(
            "offset {:.1} px over {} lane line(s) -> angle {} deg",
            offset_px,
            lane_lines.len(),
            angle_deg
        );

        StepReport {
            angle_deg,
            offset_px: Some(offset_px),
            lane_lines,
            heading_deg: self.heading_deg,
        }
    }

    /// Re-initializes every piece of cross-frame state, including the
    /// display heading, to the given neutral angle.
    pub fn reset(&mut self, neutral_deg: f64) {
        self.steer.reset(neutral_deg);
        self.heading_deg = neutral_deg;
    }

    pub fn angle(&self) -> i32 {
        self.steer.angle()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const WIDTH: u32 = 1280;
    const HEIGHT: u32 = 720;

    // Steep boundary pair around `center_x`, one segment per side.
    fn lane_pair(center_x: i32) -> Vec<LineSegment> {
        vec![
            LineSegment::new(center_x - 320, 720, center_x - 120, 360),
            LineSegment::new(center_x + 120, 360, center_x + 320, 720),
        ]
    }

    fn unbiased_config() -> LaneKeeperConfig {
        LaneKeeperConfig {
            offset: OffsetConfig { camera_bias: 0.0 },
            ..LaneKeeperConfig::default()
        }
    }

    #[test]
    fn empty_frame_holds_the_previous_angle() {
        let mut keeper = LaneKeeper::new(&unbiased_config());
        let report = keeper.step(&[], WIDTH, HEIGHT, 0.0);

        assert_eq!(report.angle_deg, 90);
        assert_eq!(report.offset_px, None);
        assert!(report.lane_lines.is_empty());
    }

    #[test]
    fn centered_lane_keeps_the_wheel_straight() {
        let mut keeper = LaneKeeper::new(&unbiased_config());
        for frame in 0..5 {
            let report = keeper.step(&lane_pair(640), WIDTH, HEIGHT, f64::from(frame) * 0.04);
            assert_eq!(report.angle_deg, 90);
            assert_abs_diff_eq!(report.offset_px.unwrap(), 0.0);
            assert_eq!(report.lane_lines.len(), 2);
        }
    }

    #[test]
    fn display_heading_trails_the_committed_angle() {
        let mut keeper = LaneKeeper::new(&unbiased_config());
        // Lane center 100 px right of image center; the rate limiter caps
        // the first correction at 3 degrees.
        let report = keeper.step(&lane_pair(740), WIDTH, HEIGHT, 0.0);

        assert_eq!(report.angle_deg, 93);
        assert_abs_diff_eq!(report.offset_px.unwrap(), 100.0);
        assert_abs_diff_eq!(report.heading_deg, 90.6, epsilon = 1e-9);
    }

    #[test]
    fn hold_does_not_advance_the_display_heading() {
        let mut keeper = LaneKeeper::new(&unbiased_config());
        keeper.step(&lane_pair(740), WIDTH, HEIGHT, 0.0);
        let held = keeper.step(&[], WIDTH, HEIGHT, 0.04);

        assert_eq!(held.angle_deg, 93);
        assert_abs_diff_eq!(held.heading_deg, 90.6, epsilon = 1e-9);
    }

    #[test]
    fn reset_recenters_keeper_state() {
        let mut keeper = LaneKeeper::new(&unbiased_config());
        keeper.step(&lane_pair(740), WIDTH, HEIGHT, 0.0);

        keeper.reset(90.0);
        assert_eq!(keeper.angle(), 90);
        let report = keeper.step(&[], WIDTH, HEIGHT, 0.04);
        assert_eq!(report.angle_deg, 90);
        assert_abs_diff_eq!(report.heading_deg, 90.0);
    }
}
