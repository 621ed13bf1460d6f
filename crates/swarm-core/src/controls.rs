//! Exponential smoothing of gesture classifications into scale, explode and
//! rotate controls.

use crate::constants::*;
use crate::gesture::GestureState;

/// The three continuous controls read by the integrator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlValues {
    pub scale: f32,
    pub explode: f32,
    pub rotate: f32,
}

impl ControlValues {
    pub const NEUTRAL: ControlValues = ControlValues {
        scale: NEUTRAL_SCALE,
        explode: NEUTRAL_EXPLODE,
        rotate: NEUTRAL_ROTATE,
    };
}

impl Default for ControlValues {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Per-control blend factors, applied once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingRates {
    pub scale: f32,
    pub explode: f32,
    pub rotate: f32,
}

impl Default for SmoothingRates {
    fn default() -> Self {
        Self {
            scale: SCALE_SMOOTHING,
            explode: EXPLODE_SMOOTHING,
            rotate: ROTATE_SMOOTHING,
        }
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Scale target for a pinch of the given thumb-to-index distance.
pub fn pinch_scale(distance: f32) -> f32 {
    let t = ((distance - PINCH_DISTANCE_MIN) / (PINCH_DISTANCE_MAX - PINCH_DISTANCE_MIN))
        .clamp(0.0, 1.0);
    lerp(PINCH_SCALE_MIN, PINCH_SCALE_MAX, t)
}

/// Scale target for two hands held `distance` apart (palm to palm).
pub fn two_hands_scale(distance: f32) -> f32 {
    let t = (distance * TWO_HANDS_DISTANCE_GAIN).clamp(0.0, 1.0);
    lerp(TWO_HANDS_SCALE_MIN, TWO_HANDS_SCALE_MAX, t)
}

/// Latest gesture targets plus the smoothed values chasing them.
#[derive(Clone, Debug)]
pub struct ControlSmoother {
    current: ControlValues,
    target: ControlValues,
    rates: SmoothingRates,
    rainbow_latch: bool,
}

impl Default for ControlSmoother {
    fn default() -> Self {
        Self::new(SmoothingRates::default())
    }
}

impl ControlSmoother {
    pub fn new(rates: SmoothingRates) -> Self {
        Self {
            current: ControlValues::NEUTRAL,
            target: ControlValues::NEUTRAL,
            rates,
            rainbow_latch: false,
        }
    }

    pub fn current(&self) -> ControlValues {
        self.current
    }

    pub fn target(&self) -> ControlValues {
        self.target
    }

    /// Set targets from one classification. Controls a gesture does not
    /// mention keep their previous target.
    pub fn apply(&mut self, gesture: &GestureState) {
        let t = &mut self.target;
        match *gesture {
            GestureState::TwoHands { distance } => {
                t.scale = two_hands_scale(distance);
                t.rotate = TWO_HANDS_ROTATE;
                t.explode = NEUTRAL_EXPLODE;
            }
            GestureState::OpenPalm => {
                t.explode = OPEN_PALM_EXPLODE;
                t.scale = OPEN_PALM_SCALE;
            }
            GestureState::Fist => {
                t.explode = FIST_EXPLODE;
                t.scale = FIST_SCALE;
            }
            GestureState::Peace => {
                if !self.rainbow_latch {
                    log::debug!("[controls] rainbow latched");
                }
                self.rainbow_latch = true;
            }
            GestureState::Pinch { distance } => {
                t.scale = pinch_scale(distance);
                t.explode = NEUTRAL_EXPLODE;
            }
            GestureState::None => {
                *t = ControlValues::NEUTRAL;
            }
        }
    }

    /// Blend each smoothed value one step toward its target.
    pub fn step(&mut self) {
        let (c, t, r) = (&mut self.current, &self.target, &self.rates);
        c.scale = lerp(c.scale, t.scale, r.scale);
        c.explode = lerp(c.explode, t.explode, r.explode);
        c.rotate = lerp(c.rotate, t.rotate, r.rotate);
    }

    /// Per-frame entry point. `None` means no fresh classification this frame:
    /// targets are kept and smoothing still runs.
    pub fn update(&mut self, latest: Option<&GestureState>) -> ControlValues {
        if let Some(g) = latest {
            self.apply(g);
        }
        self.step();
        self.current
    }

    /// Whether a peace sign has been seen since the session started.
    pub fn rainbow_latched(&self) -> bool {
        self.rainbow_latch
    }

    /// Return to neutral, e.g. when a tracking session ends.
    pub fn reset(&mut self) {
        self.current = ControlValues::NEUTRAL;
        self.target = ControlValues::NEUTRAL;
        self.rainbow_latch = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinch_mapping_clamps_at_both_ends() {
        assert_eq!(pinch_scale(0.0), PINCH_SCALE_MIN);
        assert!((pinch_scale(1.0) - PINCH_SCALE_MAX).abs() < 1e-6);
        assert!((pinch_scale(0.11) - 1.925).abs() < 1e-5);
    }

    #[test]
    fn two_hands_mapping_is_bounded() {
        assert_eq!(two_hands_scale(0.0), TWO_HANDS_SCALE_MIN);
        assert_eq!(two_hands_scale(5.0), TWO_HANDS_SCALE_MAX);
        assert!((two_hands_scale(0.25) - 1.75).abs() < 1e-5);
    }

    #[test]
    fn open_palm_keeps_rotate_target() {
        let mut s = ControlSmoother::default();
        s.apply(&GestureState::TwoHands { distance: 0.3 });
        s.apply(&GestureState::OpenPalm);
        let t = s.target();
        assert_eq!(t.rotate, TWO_HANDS_ROTATE);
        assert_eq!(t.explode, OPEN_PALM_EXPLODE);
        assert_eq!(t.scale, OPEN_PALM_SCALE);
    }

    #[test]
    fn peace_latches_without_touching_targets() {
        let mut s = ControlSmoother::default();
        s.apply(&GestureState::Fist);
        let before = s.target();
        s.apply(&GestureState::Peace);
        assert_eq!(s.target(), before);
        assert!(s.rainbow_latched());
        s.apply(&GestureState::None);
        assert!(s.rainbow_latched());
        s.reset();
        assert!(!s.rainbow_latched());
    }

    #[test]
    fn missing_frame_keeps_targets_but_still_smooths() {
        let mut s = ControlSmoother::default();
        s.update(Some(&GestureState::Fist));
        let first = s.current();
        let second = s.update(None);
        assert_eq!(s.target().scale, FIST_SCALE);
        assert!(second.scale < first.scale);
        assert!(second.explode < first.explode);
    }
}
