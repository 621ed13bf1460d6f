//! Per-frame particle integration.
//!
//! Two regimes, picked by the current shape family:
//!
//! - **Target seeking** (every family but fireworks): attraction toward the
//!   target, swirl about the vertical axis, a time-varying sinusoidal
//!   turbulence and a radial explode term are accumulated into velocity,
//!   velocity is damped once per frame, then integrated into position. A
//!   traveling wave over distance-from-center modulates swirl and explode.
//! - **Fireworks**: ballistic burst under gravity with mild drag, then an
//!   exponential pull back to the origin. Every new cycle re-samples the
//!   launch velocities.
//!
//! Particles never read each other's slots, so the loops run on `rayon`.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::color::RainbowClock;
use crate::config::SwarmConfig;
use crate::constants::*;
use crate::controls::ControlValues;
use crate::error::SwarmError;
use crate::shapes::{self, ShapeFamily, ShapeSpec};

/// Position, velocity and target buffers. Always the same length; index `i`
/// is the same particle in all three.
#[derive(Clone, Debug, Default)]
pub struct ParticleSwarm {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    targets: Vec<Vec3>,
}

impl ParticleSwarm {
    /// Fresh swarm for `family`: scattered start positions, generated targets
    /// and the family's initial velocity field.
    pub fn build(
        family: ShapeFamily,
        count: usize,
        rng: &mut StdRng,
    ) -> Result<(Self, ShapeSpec), SwarmError> {
        let positions = shapes::scatter(count, family.scatter_radius(), rng)?;
        let generated = shapes::generate(family, count, rng)?;
        Ok((
            Self {
                positions,
                velocities: generated.velocities,
                targets: generated.targets,
            },
            generated.spec,
        ))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    /// Interleaved x/y/z, length 3N.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireworksPhase {
    Burst,
    Reset,
}

/// Elapsed time inside the repeating burst/reset cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct FireworksCycle {
    elapsed: f32,
    completed: u32,
}

impl FireworksCycle {
    /// Advance by `dt`. Returns the phase to integrate and whether a new
    /// cycle started during this step.
    pub fn advance(&mut self, dt: f32) -> (FireworksPhase, bool) {
        let cycle = fireworks_cycle_sec();
        self.elapsed += dt;
        let mut wrapped = false;
        while self.elapsed >= cycle {
            self.elapsed -= cycle;
            self.completed += 1;
            wrapped = true;
        }
        (self.phase(), wrapped)
    }

    pub fn phase(&self) -> FireworksPhase {
        if self.elapsed < FIREWORKS_BURST_SEC {
            FireworksPhase::Burst
        } else {
            FireworksPhase::Reset
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Swirl/explode modulation: a ripple running outward from the center.
#[inline]
pub fn traveling_wave(distance: f32, time: f32) -> f32 {
    1.0 + WAVE_AMPLITUDE * (distance * WAVE_NUMBER - time * WAVE_SPEED).sin()
}

/// Unit-amplitude wobble, phased per particle by its target point.
#[inline]
pub fn turbulence(anchor: Vec3, time: f32) -> Vec3 {
    let phase = anchor.x * 2.1 + anchor.y * 1.7 + anchor.z * 1.3;
    Vec3::new(
        (time * 1.3 + phase).sin(),
        (time * 1.7 + phase * 1.1).cos(),
        (time * 1.1 + phase * 0.7).sin(),
    )
}

/// The particle system plus the scalar state layered on top of it.
pub struct Simulation {
    config: SwarmConfig,
    spec: ShapeSpec,
    swarm: ParticleSwarm,
    fireworks: FireworksCycle,
    rainbow: RainbowClock,
    base_rgb: [f32; 3],
    color: [f32; 3],
    point_size: f32,
    rotation_y: f32,
    time: f32,
    rng: StdRng,
}

impl Simulation {
    /// Runtime constructor, unseeded.
    pub fn new(config: SwarmConfig) -> Result<Self, SwarmError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: SwarmConfig, seed: u64) -> Result<Self, SwarmError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SwarmConfig, mut rng: StdRng) -> Result<Self, SwarmError> {
        config.validate()?;
        let base_rgb = config.rgb()?;
        let (swarm, spec) = ParticleSwarm::build(config.shape, config.particle_count, &mut rng)?;
        log::info!(
            "[sim] built {} with {} particles",
            config.shape,
            config.particle_count
        );
        Ok(Self {
            point_size: config.particle_size * POINT_SIZE_FACTOR,
            config,
            spec,
            swarm,
            fireworks: FireworksCycle::default(),
            rainbow: RainbowClock::default(),
            base_rgb,
            color: base_rgb,
            rotation_y: 0.0,
            time: 0.0,
            rng,
        })
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn spec(&self) -> &ShapeSpec {
        &self.spec
    }

    pub fn swarm(&self) -> &ParticleSwarm {
        &self.swarm
    }

    pub fn positions_flat(&self) -> &[f32] {
        self.swarm.positions_flat()
    }

    pub fn fireworks(&self) -> &FireworksCycle {
        &self.fireworks
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn rainbow(&self) -> bool {
        self.config.rainbow
    }

    pub fn set_rainbow(&mut self, on: bool) {
        if on != self.config.rainbow {
            log::info!("[sim] rainbow {}", if on { "on" } else { "off" });
        }
        self.config.rainbow = on;
        if !on {
            self.color = self.base_rgb;
        }
    }

    /// Replace every buffer for `config`. On error nothing changes.
    pub fn rebuild(&mut self, config: SwarmConfig) -> Result<(), SwarmError> {
        config.validate()?;
        let base_rgb = config.rgb()?;
        let (swarm, spec) =
            ParticleSwarm::build(config.shape, config.particle_count, &mut self.rng)?;
        log::info!(
            "[sim] rebuilt {} -> {} with {} particles",
            self.config.shape,
            config.shape,
            config.particle_count
        );
        self.swarm = swarm;
        self.spec = spec;
        self.fireworks.reset();
        self.base_rgb = base_rgb;
        if !config.rainbow {
            self.color = base_rgb;
        }
        self.point_size = config.particle_size * POINT_SIZE_FACTOR;
        self.config = config;
        Ok(())
    }

    /// Apply a configuration (e.g. a saved preset). Rebuilds only when shape,
    /// count or base size change. Returns whether a rebuild happened.
    pub fn apply_config(&mut self, config: SwarmConfig) -> Result<bool, SwarmError> {
        if self.config.needs_rebuild(&config) {
            self.rebuild(config)?;
            return Ok(true);
        }
        config.validate()?;
        self.base_rgb = config.rgb()?;
        self.set_rainbow(config.rainbow);
        if !config.rainbow {
            self.color = self.base_rgb;
        }
        self.config = config;
        Ok(false)
    }

    /// Advance one frame. `dt` is clamped so a stalled frame cannot fling
    /// particles across the scene.
    pub fn step(&mut self, controls: ControlValues, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.time += dt;

        let breath = 1.0 + BREATH_AMPLITUDE * (self.time * BREATH_RATE).sin();
        self.point_size = self.config.particle_size * POINT_SIZE_FACTOR * controls.scale * breath;

        if controls.rotate > ROTATE_MIN_SPEED {
            self.rotation_y = (self.rotation_y + controls.rotate * dt).rem_euclid(TAU);
        }

        if self.config.rainbow {
            self.rainbow.advance(dt);
            self.color = self.rainbow.rgb();
        }

        if self.config.shape.has_launch_dynamics() {
            self.step_fireworks(dt);
        } else {
            self.step_seek(controls.explode, dt);
        }
    }

    fn step_seek(&mut self, explode: f32, dt: f32) {
        let time = self.time;
        let ParticleSwarm {
            positions,
            velocities,
            targets,
        } = &mut self.swarm;
        positions
            .par_iter_mut()
            .zip(velocities.par_iter_mut())
            .zip(targets.par_iter())
            .for_each(|((p, v), &target)| {
                let wave = traveling_wave(p.length(), time);
                let attract = (target - *p) * ATTRACT_GAIN;
                let swirl = Vec3::new(-p.z, 0.0, p.x) * (SWIRL_GAIN * wave);
                let noise = turbulence(target, time) * NOISE_GAIN;
                let burst = *p * (explode * EXPLODE_GAIN * wave);
                *v = (*v + (attract + swirl + noise + burst) * dt) * VELOCITY_DAMPING;
                *p += *v * dt;
            });
    }

    fn step_fireworks(&mut self, dt: f32) {
        let (phase, new_cycle) = self.fireworks.advance(dt);
        if new_cycle {
            shapes::resample_launch(&mut self.swarm.velocities, &mut self.rng);
            log::debug!("[sim] fireworks cycle {}", self.fireworks.completed());
        }
        let ParticleSwarm {
            positions,
            velocities,
            ..
        } = &mut self.swarm;
        match phase {
            FireworksPhase::Burst => {
                let drop = 0.5 * FIREWORKS_GRAVITY * dt * dt;
                positions
                    .par_iter_mut()
                    .zip(velocities.par_iter_mut())
                    .for_each(|(p, v)| {
                        *p += *v * dt;
                        p.y += drop;
                        v.y += FIREWORKS_GRAVITY * dt;
                        *v *= FIREWORKS_DRAG;
                    });
            }
            FireworksPhase::Reset => {
                positions
                    .par_iter_mut()
                    .for_each(|p| *p = p.lerp(Vec3::ZERO, FIREWORKS_RESET_LERP));
            }
        }
    }
}
