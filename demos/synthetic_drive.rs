use anyhow::Result;
use clap::Parser;
use lane_keeper::{LaneKeeper, LaneKeeperConfig, LineSegment};
use noisy_float::types::r64;
use rand::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Opts {
    /// Optional YAML config overriding the tuned defaults.
    #[clap(long)]
    pub config: Option<String>,
    #[clap(long, default_value = "240")]
    pub frames: usize,
    #[clap(long, default_value = "30.0")]
    pub fps: f64,
    #[clap(long, default_value = "1280")]
    pub width: u32,
    #[clap(long, default_value = "720")]
    pub height: u32,
    /// Probability that a lane boundary drops out of a frame.
    #[clap(long, default_value = "0.1")]
    pub dropout: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Opts {
        config,
        frames,
        fps,
        width,
        height,
        dropout,
    } = Opts::parse();

    let config = match &config {
        Some(path) => LaneKeeperConfig::load(path)?,
        None => LaneKeeperConfig::default(),
    };
    let mut keeper = LaneKeeper::new(&config);
    let mut rng = rand::thread_rng();
    let dropout = dropout.clamp(0.0, 1.0);

    let mut held_frames = 0_usize;
    let mut max_offset = r64(0.0);
    let mut max_delta = 0_i32;
    let mut prev_angle = keeper.angle();

    for frame in 0..frames {
        let time_sec = frame as f64 / fps;

        // Drift the lane center back and forth across the frame.
        let sway = 120.0 * (0.4 * time_sec).sin();
        let center_x = f64::from(width) / 2.0 + sway;
        let segments = synthesize_segments(center_x, width, height, dropout, &mut rng);

        let report = keeper.step(&segments, width, height, time_sec);

        match report.offset_px {
            Some(offset_px) => max_offset = max_offset.max(r64(offset_px.abs())),
            None => held_frames += 1,
        }
        max_delta = max_delta.max((report.angle_deg - prev_angle).abs());
        prev_angle = report.angle_deg;

        info!(
            "frame {:3}: angle {:3} deg, heading {:6.2} deg, {} lane line(s)",
            frame,
            report.angle_deg,
            report.heading_deg,
            report.lane_lines.len()
        );
    }

    println!("frames driven:    {frames}");
    println!("held frames:      {held_frames}");
    println!("final angle:      {} deg", keeper.angle());
    println!("max |offset|:     {:.1} px", max_offset.raw());
    println!("max angle change: {max_delta} deg/frame");

    Ok(())
}

// One steep boundary pair around `center_x`, chopped into short jittered
// pieces of the kind a Hough transform reports.
fn synthesize_segments(
    center_x: f64,
    width: u32,
    height: u32,
    dropout: f64,
    rng: &mut impl Rng,
) -> Vec<LineSegment> {
    let bottom = height as i32;
    let midline = (height / 2) as i32;
    let half_bottom = f64::from(width) * 0.25;
    let half_mid = f64::from(width) * 0.09;
    let pieces = 3;

    let mut segments = Vec::new();
    for side in [-1.0, 1.0] {
        if rng.gen_bool(dropout) {
            continue;
        }

        let x_bottom = center_x + side * half_bottom;
        let x_mid = center_x + side * half_mid;
        for piece in 0..pieces {
            let t0 = f64::from(piece) / f64::from(pieces);
            let t1 = f64::from(piece + 1) / f64::from(pieces);
            let jitter = rng.gen_range(-3.0..3.0);

            let y0 = bottom - (f64::from(bottom - midline) * t0) as i32;
            let y1 = bottom - (f64::from(bottom - midline) * t1) as i32;
            let x0 = x_bottom + (x_mid - x_bottom) * t0 + jitter;
            let x1 = x_bottom + (x_mid - x_bottom) * t1 + jitter;
            segments.push(LineSegment::new(x0 as i32, y0, x1 as i32, y1));
        }
    }

    segments
}
