use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{LineSegment, SlopeFit};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Fraction of the frame width used for region gating. Left candidates
    /// must keep both endpoints left of `width * (1 - boundary_frac)`, right
    /// candidates right of `width * boundary_frac`.
    pub boundary_frac: f64,
    /// Minimum absolute slope for a segment to count as a lane boundary.
    /// Filters near-horizontal clutter such as stop lines and shadows.
    pub min_abs_slope: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            boundary_frac: 1.0 / 3.0,
            min_abs_slope: 0.75,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Candidates {
    pub left: Vec<SlopeFit>,
    pub right: Vec<SlopeFit>,
}

/// Sorts raw segments into left and right lane boundary candidates,
/// preserving input order. Verticals carry no usable slope and are skipped;
/// segments straddling the middle of the frame or flatter than
/// `min_abs_slope` are dropped.
pub fn classify_segments(
    segments: &[LineSegment],
    frame_width: u32,
    config: &ClassifierConfig,
) -> Candidates {
    let left_region_boundary = f64::from(frame_width) * (1.0 - config.boundary_frac);
    let right_region_boundary = f64::from(frame_width) * config.boundary_frac;

    let mut candidates = Candidates::default();

    for segment in segments {
        let LineSegment { x1, y1, x2, y2 } = *segment;
        if x1 == x2 {
            debug!("skipping vertical segment (slope undefined): {:?}", segment);
            continue;
        }

        let slope = f64::from(y2 - y1) / f64::from(x2 - x1);
        let intercept = f64::from(y1) - slope * f64::from(x1);
        let fit = SlopeFit { slope, intercept };

        if slope < 0.0 {
            if f64::from(x1) < left_region_boundary
                && f64::from(x2) < left_region_boundary
                && slope < -config.min_abs_slope
            {
                candidates.left.push(fit);
            }
        } else if f64::from(x1) > right_region_boundary
            && f64::from(x2) > right_region_boundary
            && slope > config.min_abs_slope
        {
            candidates.right.push(fit);
        }
    }

    debug!(
        "classified {} segment(s) into {} left / {} right candidate(s)",
        segments.len(),
        candidates.left.len(),
        candidates.right.len()
    );
    candidates
}
