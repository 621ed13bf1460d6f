// Host-side tests for constants and their mathematical relationships.

use swarm_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Particle budget
    assert!(MIN_PARTICLES < MAX_PARTICLES);
    assert!(MIN_BASE_SIZE < MAX_BASE_SIZE);
    assert!(POINT_SIZE_FACTOR > 0.0);

    // Smoothing factors are per-frame blends
    for rate in [SCALE_SMOOTHING, EXPLODE_SMOOTHING, ROTATE_SMOOTHING] {
        assert!(rate > 0.0 && rate < 1.0);
    }

    // Damping keeps velocity bounded
    assert!(VELOCITY_DAMPING > 0.0 && VELOCITY_DAMPING < 1.0);
    assert!(FIREWORKS_DRAG > 0.0 && FIREWORKS_DRAG <= 1.0);
    assert!(FIREWORKS_RESET_LERP > 0.0 && FIREWORKS_RESET_LERP < 1.0);

    // Wave modulation never flips sign
    assert!(WAVE_AMPLITUDE < 1.0);

    // Gravity pulls down
    assert!(FIREWORKS_GRAVITY < 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn explode_never_overpowers_attraction() {
    // strongest outward push: open palm at the crest of the wave
    let push = OPEN_PALM_EXPLODE * EXPLODE_GAIN * (1.0 + WAVE_AMPLITUDE);
    assert!(push < ATTRACT_GAIN);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn gesture_ranges_are_consistent() {
    assert!(PINCH_DISTANCE_MIN < PINCH_DISTANCE_MAX);
    assert!(PINCH_SCALE_MIN < NEUTRAL_SCALE && NEUTRAL_SCALE < PINCH_SCALE_MAX);
    assert!(TWO_HANDS_SCALE_MIN < TWO_HANDS_SCALE_MAX);
    assert!(PINCH_THRESHOLD < PINCH_DISTANCE_MAX);
    assert!(FIST_EXPLODE < NEUTRAL_EXPLODE && NEUTRAL_EXPLODE < OPEN_PALM_EXPLODE);
    assert!(FIST_SCALE < NEUTRAL_SCALE && NEUTRAL_SCALE < OPEN_PALM_SCALE);
    assert!(TWO_HANDS_ROTATE > ROTATE_MIN_SPEED);
    assert!(FIST_MIN_CLOSED <= 4 && OPEN_PALM_MIN_EXTENDED <= 5);
}

#[test]
fn fireworks_cycle_is_burst_plus_reset() {
    assert!((fireworks_cycle_sec() - 3.1).abs() < 1e-6);
    assert!(FIREWORKS_BURST_SEC > FIREWORKS_RESET_SEC);
}
