use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::classify::ClassifierConfig;
use crate::offset::OffsetConfig;
use crate::pid::PidInit;
use crate::steer_control::{PidFilteredInit, SteerControllerInit, StrategyInit};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneKeeperConfig {
    pub classifier: ClassifierConfig,
    pub offset: OffsetConfig,
    pub steer: SteerControllerInit,
    /// Weight of the newest committed angle in the display-only heading
    /// smoother published through step reports.
    pub heading_alpha: f64,
}

impl Default for LaneKeeperConfig {
    fn default() -> Self {
        // Gains tuned against recorded lane-camera footage; softer than the
        // bare controller defaults.
        Self {
            classifier: ClassifierConfig::default(),
            offset: OffsetConfig::default(),
            steer: SteerControllerInit {
                strategy: StrategyInit::PidFiltered(PidFilteredInit {
                    pid: PidInit {
                        kp: 0.55,
                        ki: 0.0005,
                        kd: 1.1,
                        integral_limit: None,
                    },
                    ema_alpha: 0.10,
                    max_rate: 3.0,
                }),
                ..SteerControllerInit::default()
            },
            heading_alpha: 0.2,
        }
    }
}

impl LaneKeeperConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_the_tuned_pid_chain() {
        let config = LaneKeeperConfig::default();
        match config.steer.strategy {
            StrategyInit::PidFiltered(ref init) => {
                assert_eq!(init.ema_alpha, 0.10);
                assert_eq!(init.max_rate, 3.0);
            }
            StrategyInit::DeviationCapped(_) => panic!("default strategy must be the PID chain"),
        }
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let yaml = "classifier:\n  min_abs_slope: 0.5\n";
        let config: LaneKeeperConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.classifier.min_abs_slope, 0.5);
        assert_eq!(config.classifier.boundary_frac, 1.0 / 3.0);
        assert_eq!(config.offset.camera_bias, 0.02);
        assert_eq!(config.heading_alpha, 0.2);
    }

    #[test]
    fn strategy_is_selected_by_tag() {
        let yaml = "\
steer:
  strategy:
    kind: deviation_capped
    max_deviation_two_lanes: 4.0
";
        let config: LaneKeeperConfig = serde_yaml::from_str(yaml).unwrap();
        match config.steer.strategy {
            StrategyInit::DeviationCapped(ref init) => {
                assert_eq!(init.max_deviation_two_lanes, 4.0);
                assert_eq!(init.max_deviation_one_lane, 1.0);
            }
            StrategyInit::PidFiltered(_) => panic!("expected the deviation-capped strategy"),
        }
        assert_eq!(config.steer.min_angle, 45.0);
        assert_eq!(config.steer.max_angle, 135.0);
    }

    #[test]
    fn load_surfaces_missing_files() {
        assert!(LaneKeeperConfig::load("/nonexistent/lane_keeper.yaml").is_err());
    }
}
