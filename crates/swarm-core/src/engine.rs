use crate::config::SwarmConfig;
use crate::controls::{ControlSmoother, ControlValues};
use crate::error::SwarmError;
use crate::gesture::GestureState;
use crate::simulation::Simulation;

/// What the renderer needs after each frame.
#[derive(Debug)]
pub struct FrameOutput<'a> {
    pub positions: &'a [f32],
    pub point_size: f32,
    pub color: [f32; 3],
    pub rotation_y: f32,
    pub controls: ControlValues,
}

/// One frame-rate driven pipeline: gesture intake, smoothing, integration.
pub struct Visualizer {
    simulation: Simulation,
    smoother: ControlSmoother,
}

impl Visualizer {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            smoother: ControlSmoother::default(),
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn smoother(&self) -> &ControlSmoother {
        &self.smoother
    }

    /// `latest` is the classification polled this frame, or `None` when the
    /// tracker had nothing new.
    pub fn frame(&mut self, latest: Option<GestureState>, dt: f32) -> FrameOutput<'_> {
        let controls = self.smoother.update(latest.as_ref());
        if self.smoother.rainbow_latched() && !self.simulation.rainbow() {
            self.simulation.set_rainbow(true);
        }
        self.simulation.step(controls, dt);
        FrameOutput {
            positions: self.simulation.positions_flat(),
            point_size: self.simulation.point_size(),
            color: self.simulation.color(),
            rotation_y: self.simulation.rotation_y(),
            controls,
        }
    }

    /// Apply a preset or saved record. Returns whether buffers were rebuilt.
    pub fn apply_config(&mut self, config: SwarmConfig) -> Result<bool, SwarmError> {
        self.simulation.apply_config(config)
    }

    /// Tracking ended: controls drift back to neutral from here on.
    pub fn tracking_stopped(&mut self) {
        self.smoother.apply(&GestureState::None);
    }
}
