use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_ANGLE_DEGREES, DEFAULT_MIN_ANGLE_DEGREES, DEFAULT_NEUTRAL_ANGLE_DEGREES,
};
use crate::pid::{Pid, PidInit};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SteerControllerInit {
    pub strategy: StrategyInit,
    /// Physical actuator bounds, in servo degrees.
    pub min_angle: f64,
    pub max_angle: f64,
    /// Straight-ahead angle; also the committed angle right after build.
    pub neutral_angle: f64,
}

impl Default for SteerControllerInit {
    fn default() -> Self {
        Self {
            strategy: StrategyInit::default(),
            min_angle: DEFAULT_MIN_ANGLE_DEGREES,
            max_angle: DEFAULT_MAX_ANGLE_DEGREES,
            neutral_angle: DEFAULT_NEUTRAL_ANGLE_DEGREES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyInit {
    PidFiltered(PidFilteredInit),
    DeviationCapped(DeviationCappedInit),
}

impl Default for StrategyInit {
    fn default() -> Self {
        Self::PidFiltered(PidFilteredInit::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PidFilteredInit {
    pub pid: PidInit,
    /// Weight of the newest raw PID angle in the exponential smoother;
    /// 1.0 disables smoothing.
    pub ema_alpha: f64,
    /// Largest committed-angle change per update, in degrees.
    pub max_rate: f64,
}

impl Default for PidFilteredInit {
    fn default() -> Self {
        Self {
            pid: PidInit::default(),
            ema_alpha: 0.6,
            max_rate: 6.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviationCappedInit {
    /// Largest angle change per update with both lane lines in view.
    pub max_deviation_two_lanes: f64,
    /// Tighter cap when only one lane line is in view.
    pub max_deviation_one_lane: f64,
}

impl Default for DeviationCappedInit {
    fn default() -> Self {
        Self {
            max_deviation_two_lanes: 5.0,
            max_deviation_one_lane: 1.0,
        }
    }
}

impl SteerControllerInit {
    pub fn build(&self) -> SteerController {
        let Self {
            ref strategy,
            min_angle,
            max_angle,
            neutral_angle,
        } = *self;

        SteerController {
            strategy: strategy.build(),
            min_angle,
            max_angle,
            neutral_angle,
            angle: neutral_angle,
        }
    }
}

impl StrategyInit {
    fn build(&self) -> Strategy {
        match *self {
            StrategyInit::PidFiltered(PidFilteredInit {
                ref pid,
                ema_alpha,
                max_rate,
            }) => Strategy::PidFiltered {
                pid: pid.build(),
                ema_alpha,
                max_rate,
            },
            StrategyInit::DeviationCapped(DeviationCappedInit {
                max_deviation_two_lanes,
                max_deviation_one_lane,
            }) => Strategy::DeviationCapped {
                max_deviation_two_lanes,
                max_deviation_one_lane,
            },
        }
    }
}

/// One frame worth of error signal.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    /// Signed lateral deviation in pixels, positive when the lane center
    /// lies right of the image center.
    pub offset_px: f64,
    /// The same deviation expressed as a servo-degree heading target.
    pub heading_deg: f64,
    /// Lane lines behind the deviation estimate (1 or 2).
    pub lane_count: usize,
    /// Monotonic capture time of the frame, in seconds.
    pub time_sec: f64,
}

#[derive(Debug)]
pub struct SteerController {
    strategy: Strategy,
    min_angle: f64,
    max_angle: f64,
    neutral_angle: f64,
    // Committed angle, held between updates. Whole-valued after every step.
    angle: f64,
}

#[derive(Debug)]
enum Strategy {
    PidFiltered {
        pid: Pid,
        ema_alpha: f64,
        max_rate: f64,
    },
    DeviationCapped {
        max_deviation_two_lanes: f64,
        max_deviation_one_lane: f64,
    },
}

impl SteerController {
    /// Advances the control loop by one frame and returns the committed
    /// steering angle in whole degrees. The new angle never moves more than
    /// the strategy's per-update cap away from the previous one and always
    /// lands inside `[min_angle, max_angle]`.
    pub fn step(&mut self, measurement: Measurement) -> i32 {
        let Self {
            ref mut strategy,
            min_angle,
            max_angle,
            neutral_angle,
            angle: prev_angle,
        } = *self;

        let target = match strategy {
            Strategy::PidFiltered {
                pid,
                ema_alpha,
                max_rate,
            } => {
                let raw = neutral_angle + pid.update(measurement.offset_px, measurement.time_sec);
                let smoothed = *ema_alpha * raw + (1.0 - *ema_alpha) * prev_angle;
                let delta = (smoothed - prev_angle).clamp(-*max_rate, *max_rate);
                prev_angle + delta
            }
            Strategy::DeviationCapped {
                max_deviation_two_lanes,
                max_deviation_one_lane,
            } => {
                let cap = if measurement.lane_count == 2 {
                    *max_deviation_two_lanes
                } else {
                    *max_deviation_one_lane
                };
                let delta = (measurement.heading_deg - prev_angle).clamp(-cap, cap);
                prev_angle + delta
            }
        };

        self.angle = target.clamp(min_angle, max_angle).trunc();
        self.angle as i32
    }

    /// Re-initializes all cross-frame state: the committed angle becomes
    /// `neutral_deg` and any PID history (integral, previous error, previous
    /// timestamp) is discarded.
    pub fn reset(&mut self, neutral_deg: f64) {
        if let Strategy::PidFiltered { pid, .. } = &mut self.strategy {
            pid.reset();
        }
        self.angle = neutral_deg;
    }

    pub fn angle(&self) -> i32 {
        self.angle as i32
    }

    pub fn neutral_angle(&self) -> f64 {
        self.neutral_angle
    }
}
