// Servo steering convention: 90 degrees points the wheels straight ahead,
// smaller angles turn left, larger angles turn right.
pub const DEFAULT_NEUTRAL_ANGLE_DEGREES: f64 = 90.0;
pub const DEFAULT_MIN_ANGLE_DEGREES: f64 = 45.0;
pub const DEFAULT_MAX_ANGLE_DEGREES: f64 = 135.0;

// Floor applied to the elapsed time between controller updates. Covers the
// first update after a reset and non-increasing timestamps from clock jitter.
pub const MIN_TIME_STEP_SEC: f64 = 1e-3;
