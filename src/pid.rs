use serde::{Deserialize, Serialize};

use crate::constants::MIN_TIME_STEP_SEC;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PidInit {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Saturation bound for the integral accumulator, in error-seconds.
    /// `None` leaves the accumulator unbounded; a sustained one-sided error
    /// then winds it up and overshoots once the error reverses sign.
    pub integral_limit: Option<f64>,
}

impl Default for PidInit {
    fn default() -> Self {
        Self {
            kp: 0.5,
            ki: 0.0004,
            kd: 1.2,
            integral_limit: None,
        }
    }
}

impl PidInit {
    pub fn build(&self) -> Pid {
        let Self {
            kp,
            ki,
            kd,
            integral_limit,
        } = *self;

        Pid {
            kp,
            ki,
            kd,
            integral_limit,
            integral: 0.0,
            prev_error: 0.0,
            prev_time_sec: None,
        }
    }
}

#[derive(Debug)]
pub struct Pid {
    kp: f64,
    ki: f64,
    kd: f64,
    integral_limit: Option<f64>,
    integral: f64,
    prev_error: f64,
    prev_time_sec: Option<f64>,
}

impl Pid {
    /// Correction for `error` observed at time `now_sec`. The elapsed time
    /// since the previous call drives the integral and derivative terms;
    /// non-increasing timestamps and the first call after a reset fall back
    /// to `MIN_TIME_STEP_SEC`.
    pub fn update(&mut self, error: f64, now_sec: f64) -> f64 {
        let dt = match self.prev_time_sec {
            Some(prev) => (now_sec - prev).max(MIN_TIME_STEP_SEC),
            None => MIN_TIME_STEP_SEC,
        };

        let mut integral = self.integral + error * dt;
        if let Some(limit) = self.integral_limit {
            let limit = limit.abs();
            integral = integral.clamp(-limit, limit);
        }
        let derivative = (error - self.prev_error) / dt;

        self.integral = integral;
        self.prev_error = error;
        self.prev_time_sec = Some(now_sec);

        self.kp * error + self.ki * integral + self.kd * derivative
    }

    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
        self.prev_time_sec = None;
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }
}
