//! Headless marquee runs with synthetic frame timestamps

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::MarqueeConfig;

use super::engine::MarqueeEngine;
use super::layout::MeasureTrigger;

/// Parameters of a simulated run
#[derive(Debug, Clone)]
pub struct Simulation {
    pub seconds: f64,
    pub fps: u32,
    pub container_width: f64,
    pub sequence_width: f64,
    /// Pointer enters the container at this time
    pub hover_at: Option<f64>,
    /// Pointer leaves the container at this time
    pub leave_at: Option<f64>,
    /// Seconds between recorded samples
    pub sample_every: f64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seconds: 5.0,
            fps: 60,
            container_width: 1200.0,
            sequence_width: 1000.0,
            hover_at: None,
            leave_at: None,
            sample_every: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimulationSample {
    pub time: f64,
    pub velocity: f64,
    pub offset: f64,
    pub hovered: bool,
    pub copy_count: usize,
}

impl SimulationSample {
    pub fn to_json_line(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Drive an engine through `sim` and collect samples (t = 0 included)
pub fn simulate(config: &MarqueeConfig, sim: &Simulation) -> Vec<SimulationSample> {
    let mut engine = MarqueeEngine::new(config);
    engine.measure(sim.container_width, sim.sequence_width, MeasureTrigger::Mount);
    engine.begin();

    let fps = sim.fps.max(1);
    let frame = Duration::from_secs_f64(1.0 / fps as f64);
    let total_frames = (sim.seconds.max(0.0) * fps as f64).round() as u64;
    let sample_frames = ((sim.sample_every * fps as f64).round() as u64).max(1);

    let start = Instant::now();
    let mut samples = Vec::new();

    for n in 0..=total_frames {
        let t = n as f64 / fps as f64;
        if let Some(at) = sim.hover_at {
            if t >= at && sim.leave_at.map_or(true, |leave| t < leave) {
                engine.set_hovered(true);
            }
        }
        if let Some(leave) = sim.leave_at {
            if t >= leave {
                engine.set_hovered(false);
            }
        }

        engine.frame(start + frame * n as u32);

        if n % sample_frames == 0 || n == total_frames {
            samples.push(SimulationSample {
                time: t,
                velocity: engine.velocity(),
                offset: engine.offset(),
                hovered: engine.is_hovered(),
                copy_count: engine.layout().copy_count,
            });
        }
    }

    samples
}
