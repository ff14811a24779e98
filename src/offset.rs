use serde::{Deserialize, Serialize};

use crate::types::LaneLine;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetConfig {
    /// Fraction of the frame half-width by which the reference center is
    /// shifted when both lane lines are visible, compensating for a camera
    /// mounted off the vehicle centerline. Positive shifts the reference to
    /// the right.
    pub camera_bias: f64,
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self { camera_bias: 0.02 }
    }
}

/// Signed lateral deviation in pixels, positive when the lane center lies
/// right of the image center. With both boundaries visible the lane center
/// is read at mid-frame depth; with one boundary the vehicle follows the
/// lone line's midpoint; with none the deviation is reported as zero and
/// the caller decides whether to trust it.
pub fn estimate_offset(lane_lines: &[LaneLine], frame_width: u32, config: &OffsetConfig) -> f64 {
    let center = f64::from(frame_width) / 2.0;
    match lane_lines {
        [] => 0.0,
        [only] => f64::from(only.x1 + only.x2) / 2.0 - center,
        [left, right, ..] => {
            let biased_center = center * (1.0 + config.camera_bias);
            f64::from(left.x2 + right.x2) / 2.0 - biased_center
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const WIDTH: u32 = 1200;

    fn no_bias() -> OffsetConfig {
        OffsetConfig { camera_bias: 0.0 }
    }

    fn lane(x1: i32, x2: i32) -> LaneLine {
        LaneLine {
            x1,
            y1: 600,
            x2,
            y2: 300,
        }
    }

    #[test]
    fn centered_lane_yields_zero_offset() {
        let lines = [lane(100, 300), lane(1100, 900)];
        assert_abs_diff_eq!(estimate_offset(&lines, WIDTH, &no_bias()), 0.0);
    }

    #[test]
    fn two_lane_offset_reads_mid_frame_columns() {
        // Lane center at mid-frame depth is (350 + 950) / 2 = 650.
        let lines = [lane(100, 350), lane(1100, 950)];
        assert_abs_diff_eq!(estimate_offset(&lines, WIDTH, &no_bias()), 50.0);
    }

    #[test]
    fn camera_bias_shifts_the_reference_center() {
        let lines = [lane(100, 300), lane(1100, 900)];
        let config = OffsetConfig { camera_bias: 0.02 };
        // Reference center moves from 600 to 612.
        assert_abs_diff_eq!(estimate_offset(&lines, WIDTH, &config), -12.0);
    }

    #[test]
    fn single_lane_follows_the_lone_boundary() {
        let lines = [lane(700, 800)];
        assert_abs_diff_eq!(estimate_offset(&lines, WIDTH, &no_bias()), 150.0);
    }

    #[test]
    fn single_lane_ignores_camera_bias() {
        let lines = [lane(700, 800)];
        let biased = OffsetConfig { camera_bias: 0.10 };
        assert_abs_diff_eq!(estimate_offset(&lines, WIDTH, &biased), 150.0);
    }

    #[test]
    fn no_lanes_reports_zero() {
        assert_abs_diff_eq!(estimate_offset(&[], WIDTH, &no_bias()), 0.0);
    }
}
