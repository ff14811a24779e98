/// Servo-degree heading equivalent of a pixel offset: the angle subtended by
/// the offset at mid-frame depth (`height / 2` pixels ahead), measured from
/// the neutral straight-ahead angle.
pub fn heading_from_offset(offset_px: f64, frame_height: u32, neutral_deg: f64) -> f64 {
    let depth = f64::from(frame_height / 2).max(1.0);
    (offset_px / depth).atan().to_degrees() + neutral_deg
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn zero_offset_is_neutral() {
        assert_abs_diff_eq!(heading_from_offset(0.0, 720, 90.0), 90.0);
    }

    #[test]
    fn offset_equal_to_depth_is_forty_five_degrees_off_neutral() {
        assert_abs_diff_eq!(heading_from_offset(360.0, 720, 90.0), 135.0, epsilon = 1e-12);
        assert_abs_diff_eq!(heading_from_offset(-360.0, 720, 90.0), 45.0, epsilon = 1e-12);
    }

    #[test]
    fn small_offsets_map_near_linearly() {
        // atan(36 / 360) = 5.7106 degrees.
        assert_abs_diff_eq!(
            heading_from_offset(36.0, 720, 90.0),
            95.7106,
            epsilon = 1e-4
        );
    }

    #[test]
    fn depth_uses_integer_half_height() {
        // 721 / 2 truncates to 360, same depth as a 720-row frame.
        assert_abs_diff_eq!(
            heading_from_offset(360.0, 721, 90.0),
            heading_from_offset(360.0, 720, 90.0)
        );
    }
}
