//! Target point sets for the nine built-in shape families.
//!
//! Every family has a fixed silhouette with random jitter layered on top, so
//! two generations with the same particle count differ point by point but
//! share their extents. Randomness comes from the caller's [`Rng`]; the
//! runtime path passes an entropy-seeded generator, tests pass a seeded one.

use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::*;
use crate::error::{ConfigError, SwarmError};

/// One of the nine parametric shape families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeFamily {
    Hearts,
    Flowers,
    Fireworks,
    Galaxy,
    Dna,
    Butterfly,
    Wave,
    Vortex,
    Aurora,
}

impl ShapeFamily {
    pub const ALL: [ShapeFamily; 9] = [
        ShapeFamily::Hearts,
        ShapeFamily::Flowers,
        ShapeFamily::Fireworks,
        ShapeFamily::Galaxy,
        ShapeFamily::Dna,
        ShapeFamily::Butterfly,
        ShapeFamily::Wave,
        ShapeFamily::Vortex,
        ShapeFamily::Aurora,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeFamily::Hearts => "hearts",
            ShapeFamily::Flowers => "flowers",
            ShapeFamily::Fireworks => "fireworks",
            ShapeFamily::Galaxy => "galaxy",
            ShapeFamily::Dna => "dna",
            ShapeFamily::Butterfly => "butterfly",
            ShapeFamily::Wave => "wave",
            ShapeFamily::Vortex => "vortex",
            ShapeFamily::Aurora => "aurora",
        }
    }

    /// Fireworks carry a launch velocity field instead of a resting shape.
    pub fn has_launch_dynamics(self) -> bool {
        matches!(self, ShapeFamily::Fireworks)
    }

    /// Radius of the random ball particles start from after a rebuild.
    pub fn scatter_radius(self) -> f32 {
        if self.has_launch_dynamics() {
            FIREWORKS_SCATTER_RADIUS
        } else {
            SCATTER_RADIUS
        }
    }
}

impl fmt::Display for ShapeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeFamily {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeFamily::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownShape(s.to_string()))
    }
}

/// A single flower bloom: where it sits, how many petals, how large.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bloom {
    pub center: Vec3,
    pub petals: u32,
    pub scale: f32,
}

/// Per-family constants derived once per generation.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeParams {
    Hearts,
    Flowers { blooms: SmallVec<[Bloom; FLOWER_BLOOMS]> },
    Fireworks,
    Galaxy { arms: usize },
    Dna { rung_every: usize, rung_steps: usize },
    Butterfly,
    Wave { grid_side: usize },
    Vortex,
    Aurora { ribbons: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeSpec {
    pub family: ShapeFamily,
    pub count: usize,
    pub params: ShapeParams,
}

/// Output of [`generate`]: targets and initial velocities, both of length `count`.
#[derive(Clone, Debug)]
pub struct ShapeTargets {
    pub spec: ShapeSpec,
    pub targets: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
}

impl ShapeTargets {
    pub fn targets_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.targets)
    }

    pub fn velocities_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.velocities)
    }
}

const FLOWER_BLOOMS: usize = 5;
const GALAXY_ARMS: usize = 3;
const GALAXY_A: f32 = 0.4;
const GALAXY_B: f32 = 0.25;
const DNA_RADIUS: f32 = 0.8;
const DNA_HEIGHT: f32 = 4.0;
const DNA_TURNS: f32 = 3.0;
const DNA_RUNG_EVERY: usize = 40;
const DNA_RUNG_STEPS: usize = 8;
const WAVE_EXTENT: f32 = 6.0;
const VORTEX_SWEEP: f32 = 12.0 * PI;
const AURORA_RIBBONS: usize = 4;

/// Generate `count` target points and initial velocities for `family`.
///
/// A zero count yields empty buffers; range checks live in
/// [`SwarmConfig::validate`](crate::config::SwarmConfig::validate).
pub fn generate<R: Rng + ?Sized>(
    family: ShapeFamily,
    count: usize,
    rng: &mut R,
) -> Result<ShapeTargets, SwarmError> {
    let mut targets = alloc_points(count)?;
    let params = match family {
        ShapeFamily::Hearts => {
            hearts(count, rng, &mut targets);
            ShapeParams::Hearts
        }
        ShapeFamily::Flowers => {
            let blooms = flower_blooms(rng);
            flowers(count, &blooms, rng, &mut targets);
            ShapeParams::Flowers { blooms }
        }
        ShapeFamily::Fireworks => {
            for _ in 0..count {
                targets.push(random_in_ball(FIREWORKS_SCATTER_RADIUS, rng));
            }
            ShapeParams::Fireworks
        }
        ShapeFamily::Galaxy => {
            galaxy(count, rng, &mut targets);
            ShapeParams::Galaxy { arms: GALAXY_ARMS }
        }
        ShapeFamily::Dna => {
            dna(count, &mut targets);
            ShapeParams::Dna {
                rung_every: DNA_RUNG_EVERY,
                rung_steps: DNA_RUNG_STEPS,
            }
        }
        ShapeFamily::Butterfly => {
            butterfly(count, rng, &mut targets);
            ShapeParams::Butterfly
        }
        ShapeFamily::Wave => {
            let grid_side = wave_grid_side(count);
            wave(count, grid_side, &mut targets);
            ShapeParams::Wave { grid_side }
        }
        ShapeFamily::Vortex => {
            vortex(count, &mut targets);
            ShapeParams::Vortex
        }
        ShapeFamily::Aurora => {
            aurora(count, rng, &mut targets);
            ShapeParams::Aurora {
                ribbons: AURORA_RIBBONS,
            }
        }
    };
    let velocities = initial_velocities(family, count, rng)?;
    Ok(ShapeTargets {
        spec: ShapeSpec {
            family,
            count,
            params,
        },
        targets,
        velocities,
    })
}

/// Initial velocity field for `family`: a launch field for fireworks, small
/// random drift for everything else.
pub fn initial_velocities<R: Rng + ?Sized>(
    family: ShapeFamily,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Vec3>, SwarmError> {
    let mut vels = alloc_points(count)?;
    match family {
        ShapeFamily::Fireworks => {
            for _ in 0..count {
                vels.push(launch_velocity(rng));
            }
        }
        ShapeFamily::Galaxy => {
            for _ in 0..count {
                vels.push(jitter3(rng, Vec3::splat(0.04)));
            }
        }
        ShapeFamily::Vortex => {
            for _ in 0..count {
                vels.push(jitter3(rng, Vec3::new(0.125, 0.05, 0.125)));
            }
        }
        _ => {
            for _ in 0..count {
                vels.push(jitter3(rng, Vec3::splat(0.075)));
            }
        }
    }
    Ok(vels)
}

/// Fill `out` with a fresh fireworks launch field, one velocity per slot.
pub fn resample_launch<R: Rng + ?Sized>(out: &mut [Vec3], rng: &mut R) {
    for v in out.iter_mut() {
        *v = launch_velocity(rng);
    }
}

/// Uniform-volume random ball of `count` points.
pub fn scatter<R: Rng + ?Sized>(
    count: usize,
    radius: f32,
    rng: &mut R,
) -> Result<Vec<Vec3>, SwarmError> {
    let mut pos = alloc_points(count)?;
    for _ in 0..count {
        pos.push(random_in_ball(radius, rng));
    }
    Ok(pos)
}

pub fn heart_point(t: f32) -> (f32, f32) {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    (x, y)
}

pub fn rose_point(t: f32, petals: u32) -> (f32, f32) {
    let r = (petals as f32 * t).cos();
    (r * t.cos(), r * t.sin())
}

pub fn butterfly_point(t: f32) -> (f32, f32) {
    let f = t.cos().exp() - 2.0 * (4.0 * t).cos() - (t / 12.0).sin().powi(5);
    (t.sin() * f, t.cos() * f)
}

pub fn helix_point(t: f32, strand: usize) -> Vec3 {
    let phase = strand as f32 * PI;
    let angle = t * DNA_TURNS * TAU + phase;
    Vec3::new(
        DNA_RADIUS * angle.cos(),
        (t - 0.5) * DNA_HEIGHT,
        DNA_RADIUS * angle.sin(),
    )
}

pub fn galaxy_point(t: f32, arm: usize) -> Vec3 {
    let offset = arm as f32 / GALAXY_ARMS as f32 * TAU;
    let r = GALAXY_A * (GALAXY_B * t).exp();
    let angle = t + offset;
    Vec3::new(r * angle.cos(), r * angle.sin(), (t * 1.5).sin() * 0.3)
}

fn hearts<R: Rng + ?Sized>(count: usize, rng: &mut R, out: &mut Vec<Vec3>) {
    for i in 0..count {
        let t = phase(i, count) * TAU;
        let (x, y) = heart_point(t);
        let z = rng.gen_range(-0.4..0.4);
        out.push(Vec3::new(x / 10.0 * 2.0, y / 10.0 * 2.0, z));
    }
}

fn flower_blooms<R: Rng + ?Sized>(rng: &mut R) -> SmallVec<[Bloom; FLOWER_BLOOMS]> {
    (0..FLOWER_BLOOMS)
        .map(|b| {
            let a = b as f32 / FLOWER_BLOOMS as f32 * TAU;
            Bloom {
                center: Vec3::new(a.cos() * 2.2, a.sin() * 1.2, rng.gen_range(-0.6..0.6)),
                petals: rng.gen_range(4..=8),
                scale: 1.0 + rng.gen::<f32>() * 0.7,
            }
        })
        .collect()
}

fn flowers<R: Rng + ?Sized>(count: usize, blooms: &[Bloom], rng: &mut R, out: &mut Vec<Vec3>) {
    for i in 0..count {
        let b = i % blooms.len();
        let bloom = &blooms[b];
        // later blooms sweep more petals' worth of curve
        let t = phase(i, count) * TAU * (3 + b) as f32;
        let (px, py) = rose_point(t, bloom.petals);
        out.push(Vec3::new(
            bloom.center.x + px * bloom.scale * 2.0,
            bloom.center.y + py * bloom.scale * 2.0,
            bloom.center.z + rng.gen_range(-0.3..0.3),
        ));
    }
}

fn galaxy<R: Rng + ?Sized>(count: usize, rng: &mut R, out: &mut Vec<Vec3>) {
    for i in 0..count {
        let arm = i % GALAXY_ARMS;
        let t = phase(i, count) * 4.0 + rng.gen_range(-0.15..0.15);
        out.push(galaxy_point(t, arm) + jitter3(rng, Vec3::splat(0.2)));
    }
}

fn dna(count: usize, out: &mut Vec<Vec3>) {
    for i in 0..count {
        let within = i % DNA_RUNG_EVERY;
        if within < DNA_RUNG_STEPS {
            // rung: walk from strand 0 to strand 1 at the rung's anchor height
            let t = phase(i - within, count);
            let a = helix_point(t, 0);
            let b = helix_point(t, 1);
            let s = within as f32 / (DNA_RUNG_STEPS - 1) as f32;
            out.push(a.lerp(b, s));
        } else {
            out.push(helix_point(phase(i, count), i % 2));
        }
    }
}

fn butterfly<R: Rng + ?Sized>(count: usize, rng: &mut R, out: &mut Vec<Vec3>) {
    // 2 * 0.15 curve scale, then 3x spread
    const SCALE: f32 = 0.9;
    for i in 0..count {
        let t = phase(i, count) * PI * 12.0;
        let (x, y) = butterfly_point(t);
        out.push(Vec3::new(x * SCALE, y * SCALE, rng.gen_range(-0.25..0.25)));
    }
}

pub fn wave_grid_side(count: usize) -> usize {
    (count as f64).sqrt().ceil() as usize
}

fn wave(count: usize, grid_side: usize, out: &mut Vec<Vec3>) {
    let g = grid_side.max(1) as f32;
    for i in 0..count {
        let ix = (i % grid_side.max(1)) as f32;
        let iz = (i / grid_side.max(1)) as f32;
        let x = (ix / g - 0.5) * WAVE_EXTENT;
        let z = (iz / g - 0.5) * WAVE_EXTENT;
        let y = (x * 1.5).sin() * (z * 1.5).cos() * 1.2;
        out.push(Vec3::new(x, y, z));
    }
}

fn vortex(count: usize, out: &mut Vec<Vec3>) {
    for i in 0..count {
        let t = phase(i, count);
        let height = (t - 0.5) * 6.0;
        let radius = (1.0 - t) * 2.0 + 0.3;
        let angle = t * VORTEX_SWEEP;
        out.push(Vec3::new(radius * angle.cos(), height, radius * angle.sin()));
    }
}

fn aurora<R: Rng + ?Sized>(count: usize, rng: &mut R, out: &mut Vec<Vec3>) {
    let ribbons = AURORA_RIBBONS as f32;
    for i in 0..count {
        let ribbon = (i % AURORA_RIBBONS) as f32;
        let x = (phase(i, count) - 0.5) * 8.0;
        let offset = ribbon / ribbons * 2.0;
        let y = (x * 0.8 + offset).sin() * 1.5 + offset;
        let z = (ribbon - ribbons / 2.0) * 0.6 + rng.gen_range(-0.2..0.2);
        out.push(Vec3::new(x, y, z));
    }
}

#[inline]
fn phase(i: usize, count: usize) -> f32 {
    i as f32 / count as f32
}

fn alloc_points(count: usize) -> Result<Vec<Vec3>, SwarmError> {
    let mut v = Vec::new();
    v.try_reserve_exact(count).map_err(|_| SwarmError::Allocation(count))?;
    Ok(v)
}

fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = TAU * rng.gen::<f32>();
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
}

fn random_in_ball<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec3 {
    random_direction(rng) * rng.gen::<f32>().cbrt() * radius
}

fn launch_velocity<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let speed = FIREWORKS_SPEED_MIN + rng.gen::<f32>() * FIREWORKS_SPEED_SPAN;
    random_direction(rng) * speed
}

/// Independent uniform jitter in `[-half, half)` per axis.
fn jitter3<R: Rng + ?Sized>(rng: &mut R, half: Vec3) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * 2.0 * half.x,
        (rng.gen::<f32>() - 0.5) * 2.0 * half.y,
        (rng.gen::<f32>() - 0.5) * 2.0 * half.z,
    )
}
