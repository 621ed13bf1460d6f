//! Geometric hand-gesture classification.
//!
//! Works on the 21-point hand layout produced by common landmark models, in
//! normalized image coordinates (x right, y down, z toward the camera).
//! Classification is a pure function of the current frame: no history, no
//! smoothing. The smoother in [`crate::controls`] takes care of jitter.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::TrackingError;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

pub const LANDMARK_COUNT: usize = 21;

/// Non-thumb fingertips paired with their base joints.
pub const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_MCP),
    (MIDDLE_TIP, MIDDLE_MCP),
    (RING_TIP, RING_MCP),
    (PINKY_TIP, PINKY_MCP),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hand {
    pub landmarks: [Vec3; LANDMARK_COUNT],
}

impl Hand {
    pub fn new(landmarks: [Vec3; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    pub fn from_slice(points: &[Vec3]) -> Result<Self, TrackingError> {
        let landmarks: [Vec3; LANDMARK_COUNT] =
            points.try_into().map_err(|_| TrackingError::LandmarkCount {
                expected: LANDMARK_COUNT,
                got: points.len(),
            })?;
        Ok(Self { landmarks })
    }

    #[inline]
    pub fn point(&self, index: usize) -> Vec3 {
        self.landmarks[index]
    }

    pub fn palm(&self) -> Vec3 {
        self.landmarks[WRIST]
    }
}

/// Discrete classification tag, without measurements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    None,
    Pinch,
    OpenPalm,
    Fist,
    TwoHands,
    Peace,
}

/// Result of classifying one tracking frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureState {
    None,
    Pinch { distance: f32 },
    OpenPalm,
    Fist,
    TwoHands { distance: f32 },
    Peace,
}

impl GestureState {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureState::None => GestureKind::None,
            GestureState::Pinch { .. } => GestureKind::Pinch,
            GestureState::OpenPalm => GestureKind::OpenPalm,
            GestureState::Fist => GestureKind::Fist,
            GestureState::TwoHands { .. } => GestureKind::TwoHands,
            GestureState::Peace => GestureKind::Peace,
        }
    }

    /// The raw distance carried by pinch and two-hand frames.
    pub fn magnitude(&self) -> Option<f32> {
        match *self {
            GestureState::Pinch { distance } | GestureState::TwoHands { distance } => {
                Some(distance)
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GestureState::None => "none",
            GestureState::Pinch { .. } => "pinch",
            GestureState::OpenPalm => "open palm",
            GestureState::Fist => "fist",
            GestureState::TwoHands { .. } => "two hands",
            GestureState::Peace => "peace",
        }
    }
}

#[inline]
fn is_extended(hand: &Hand, tip: usize, base: usize) -> bool {
    hand.point(tip).y < hand.point(base).y - EXTENSION_MARGIN
}

/// Four raised fingers, or three plus a splayed thumb.
pub fn is_open_palm(hand: &Hand) -> bool {
    let mut extended = FINGERS
        .iter()
        .filter(|&&(tip, base)| is_extended(hand, tip, base))
        .count();
    if (hand.point(THUMB_TIP).x - hand.point(THUMB_MCP).x).abs() > THUMB_SPLAY_MARGIN {
        extended += 1;
    }
    extended >= OPEN_PALM_MIN_EXTENDED
}

/// At least three fingertips curled in near the palm (image-plane distance).
pub fn is_fist(hand: &Hand) -> bool {
    let palm = hand.palm().truncate();
    let closed = FINGERS
        .iter()
        .filter(|&&(tip, _)| hand.point(tip).truncate().distance(palm) < FIST_RADIUS)
        .count();
    closed >= FIST_MIN_CLOSED
}

pub fn is_peace(hand: &Hand) -> bool {
    let curled = |tip: usize, base: usize| hand.point(tip).y >= hand.point(base).y;
    is_extended(hand, INDEX_TIP, INDEX_MCP)
        && is_extended(hand, MIDDLE_TIP, MIDDLE_MCP)
        && curled(RING_TIP, RING_MCP)
        && curled(PINKY_TIP, PINKY_MCP)
}

pub fn pinch_distance(hand: &Hand) -> f32 {
    hand.point(THUMB_TIP).distance(hand.point(INDEX_TIP))
}

pub fn palm_distance(a: &Hand, b: &Hand) -> f32 {
    a.palm().distance(b.palm())
}

/// Classify one frame of zero, one or two hands. Extra hands are ignored.
///
/// Precedence: two hands, open palm, fist, peace, then the pinch test.
pub fn classify(hands: &[Hand]) -> GestureState {
    match hands {
        [] => GestureState::None,
        [first, second, ..] => GestureState::TwoHands {
            distance: palm_distance(first, second),
        },
        [hand] => {
            if is_open_palm(hand) {
                GestureState::OpenPalm
            } else if is_fist(hand) {
                GestureState::Fist
            } else if is_peace(hand) {
                GestureState::Peace
            } else {
                let distance = pinch_distance(hand);
                if distance < PINCH_THRESHOLD {
                    GestureState::Pinch { distance }
                } else {
                    GestureState::None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relaxed_hand() -> Hand {
        // fingers slightly above their bases but under the extension margin,
        // tips far from the wrist, thumb tucked, thumb and index apart
        let mut pts = [Vec3::ZERO; LANDMARK_COUNT];
        pts[WRIST] = Vec3::new(0.5, 0.8, 0.0);
        pts[THUMB_MCP] = Vec3::new(0.42, 0.68, 0.0);
        pts[THUMB_TIP] = Vec3::new(0.40, 0.62, 0.0);
        for (k, (tip, base)) in FINGERS.iter().enumerate() {
            let x = 0.45 + k as f32 * 0.04;
            pts[*base] = Vec3::new(x, 0.55, 0.0);
            pts[*tip] = Vec3::new(x, 0.52, 0.0);
        }
        Hand::new(pts)
    }

    #[test]
    fn from_slice_checks_length() {
        assert!(Hand::from_slice(&[Vec3::ZERO; LANDMARK_COUNT]).is_ok());
        assert_eq!(
            Hand::from_slice(&[Vec3::ZERO; 5]),
            Err(TrackingError::LandmarkCount {
                expected: LANDMARK_COUNT,
                got: 5
            })
        );
    }

    #[test]
    fn relaxed_hand_is_none() {
        let hand = relaxed_hand();
        assert!(!is_open_palm(&hand));
        assert!(!is_fist(&hand));
        assert!(!is_peace(&hand));
        assert_eq!(classify(&[hand]), GestureState::None);
    }

    #[test]
    fn thumb_splay_counts_toward_open_palm() {
        let mut hand = relaxed_hand();
        for &(tip, base) in &FINGERS[..3] {
            hand.landmarks[tip].y = hand.landmarks[base].y - 0.1;
        }
        assert!(!is_open_palm(&hand));
        hand.landmarks[THUMB_TIP].x = hand.landmarks[THUMB_MCP].x - 0.1;
        assert!(is_open_palm(&hand));
    }

    #[test]
    fn no_hands_is_none() {
        assert_eq!(classify(&[]), GestureState::None);
    }

    #[test]
    fn extra_hands_are_ignored() {
        let a = relaxed_hand();
        let mut b = relaxed_hand();
        for p in b.landmarks.iter_mut() {
            p.x += 0.3;
        }
        let two = classify(&[a, b]);
        let three = classify(&[a, b, a]);
        assert_eq!(two, three);
        assert!((two.magnitude().unwrap() - 0.3).abs() < 1e-5);
    }
}
