use tracing::debug;

use crate::classify::Candidates;
use crate::types::{LaneLine, SlopeFit};

/// Collapses each side's candidates into at most one lane boundary: the
/// side's mean slope/intercept anchored to the bottom row of the frame and
/// projected up to the frame midline. Output is ordered left to right by
/// bottom-row crossing.
pub fn fit_lane_lines(
    candidates: &Candidates,
    frame_width: u32,
    frame_height: u32,
) -> Vec<LaneLine> {
    let mut lane_lines = Vec::with_capacity(2);
    lane_lines.extend(average_side(&candidates.left, frame_width, frame_height));
    lane_lines.extend(average_side(&candidates.right, frame_width, frame_height));
    lane_lines.sort_by_key(|line| line.x1);

    debug!("fitted {} lane line(s)", lane_lines.len());
    lane_lines
}

fn average_side(fits: &[SlopeFit], frame_width: u32, frame_height: u32) -> Option<LaneLine> {
    if fits.is_empty() {
        return None;
    }

    let count = fits.len() as f64;
    let slope = fits.iter().map(|fit| fit.slope).sum::<f64>() / count;
    let intercept = fits.iter().map(|fit| fit.intercept).sum::<f64>() / count;

    let y1 = frame_height as i32;
    let y2 = (frame_height / 2) as i32;
    Some(LaneLine {
        x1: cross_row(slope, intercept, y1, frame_width),
        y1,
        x2: cross_row(slope, intercept, y2, frame_width),
        y2,
    })
}

// Column where the averaged line crosses the given row, clamped into
// [-width, 2 * width] so a slope near zero stays bounded instead of
// projecting off to infinity.
fn cross_row(slope: f64, intercept: f64, y: i32, frame_width: u32) -> i32 {
    let bound = f64::from(frame_width);
    let x = (f64::from(y) - intercept) / slope;
    x.clamp(-bound, 2.0 * bound) as i32
}
