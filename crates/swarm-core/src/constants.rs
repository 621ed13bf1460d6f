// Shared tuning constants for the swarm, the classifier and the smoother.

// Particle budget and sizing
pub const MIN_PARTICLES: usize = 2_000;
pub const MAX_PARTICLES: usize = 30_000;
pub const MIN_BASE_SIZE: f32 = 1.0;
pub const MAX_BASE_SIZE: f32 = 14.0;
pub const POINT_SIZE_FACTOR: f32 = 0.01; // base size units -> world-space point size

// Rebuild scatter
pub const SCATTER_RADIUS: f32 = 7.0; // starting ball for target-seeking shapes
pub const FIREWORKS_SCATTER_RADIUS: f32 = 0.2; // fireworks start packed at the origin

// Frame timing
pub const MAX_FRAME_DT: f32 = 0.033; // clamp long frames so the integrator never jumps

// Target-seeking integrator
pub const ATTRACT_GAIN: f32 = 6.0;
pub const SWIRL_GAIN: f32 = 0.8;
pub const NOISE_GAIN: f32 = 0.55;
pub const EXPLODE_GAIN: f32 = 1.2;
pub const VELOCITY_DAMPING: f32 = 0.92; // multiplicative, applied once per frame
pub const WAVE_AMPLITUDE: f32 = 0.35; // traveling-wave modulation depth
pub const WAVE_NUMBER: f32 = 1.4; // radians per world unit of distance from center
pub const WAVE_SPEED: f32 = 2.2; // radians per second

// Fireworks cycle
pub const FIREWORKS_BURST_SEC: f32 = 2.2;
pub const FIREWORKS_RESET_SEC: f32 = 0.9;
pub const FIREWORKS_GRAVITY: f32 = -1.25;
pub const FIREWORKS_DRAG: f32 = 0.995; // per frame
pub const FIREWORKS_RESET_LERP: f32 = 0.08; // per frame pull back toward the origin
pub const FIREWORKS_SPEED_MIN: f32 = 1.2;
pub const FIREWORKS_SPEED_SPAN: f32 = 2.2;

// Global visual effects
pub const ROTATE_MIN_SPEED: f32 = 0.01; // below this the swarm does not spin
pub const BREATH_AMPLITUDE: f32 = 0.06;
pub const BREATH_RATE: f32 = 1.2; // radians per second
pub const RAINBOW_HUE_RATE: f32 = 0.5; // hue turns per second
pub const RAINBOW_SATURATION: f32 = 0.8;
pub const RAINBOW_LIGHTNESS: f32 = 0.6;

// Gesture thresholds (normalized landmark units)
pub const PINCH_THRESHOLD: f32 = 0.08;
pub const EXTENSION_MARGIN: f32 = 0.05; // fingertip must sit this far above its base
pub const THUMB_SPLAY_MARGIN: f32 = 0.05;
pub const FIST_RADIUS: f32 = 0.15;
pub const OPEN_PALM_MIN_EXTENDED: usize = 4;
pub const FIST_MIN_CLOSED: usize = 3;

// Smoothing rates (per-frame blend)
pub const SCALE_SMOOTHING: f32 = 0.12;
pub const EXPLODE_SMOOTHING: f32 = 0.08;
pub const ROTATE_SMOOTHING: f32 = 0.05;

// Gesture -> control targets
pub const PINCH_DISTANCE_MIN: f32 = 0.02;
pub const PINCH_DISTANCE_MAX: f32 = 0.20;
pub const PINCH_SCALE_MIN: f32 = 0.35;
pub const PINCH_SCALE_MAX: f32 = 3.5;
pub const TWO_HANDS_SCALE_MIN: f32 = 0.5;
pub const TWO_HANDS_SCALE_MAX: f32 = 3.0;
pub const TWO_HANDS_DISTANCE_GAIN: f32 = 2.0;
pub const TWO_HANDS_ROTATE: f32 = 1.5;
pub const OPEN_PALM_EXPLODE: f32 = 1.5;
pub const OPEN_PALM_SCALE: f32 = 1.8;
pub const FIST_EXPLODE: f32 = -1.0;
pub const FIST_SCALE: f32 = 0.4;

// Neutral control values
pub const NEUTRAL_SCALE: f32 = 1.0;
pub const NEUTRAL_EXPLODE: f32 = 0.0;
pub const NEUTRAL_ROTATE: f32 = 0.0;

#[inline]
pub fn fireworks_cycle_sec() -> f32 {
    FIREWORKS_BURST_SEC + FIREWORKS_RESET_SEC
}
