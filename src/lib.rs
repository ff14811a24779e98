pub mod classify;
pub mod config;
pub mod constants;
pub mod heading;
pub mod lane_fit;
pub mod lane_keeping;
pub mod offset;
pub mod pid;
pub mod steer_control;
pub mod types;

pub use config::LaneKeeperConfig;
pub use lane_keeping::{LaneKeeper, StepReport};
pub use steer_control::{Measurement, SteerController, SteerControllerInit};
pub use types::{LaneLine, LineSegment};
