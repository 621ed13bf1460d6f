// Scripted landmark source: cycles through every gesture on a fixed timeline
// so the pipeline can run without a camera.

use std::time::Duration;

use glam::Vec3;
use instant::Instant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use swarm_core::gesture::{
    Hand, FINGERS, INDEX_TIP, LANDMARK_COUNT, THUMB_MCP, THUMB_TIP, WRIST,
};
use swarm_core::{Hands, LandmarkSource, TrackingError};

#[derive(Clone, Copy, Debug)]
enum Pose {
    Idle,
    OpenPalm,
    Fist,
    Pinch,
    TwoHands,
    Peace,
}

const TIMELINE: [Pose; 7] = [
    Pose::Idle,
    Pose::OpenPalm,
    Pose::Fist,
    Pose::Pinch,
    Pose::TwoHands,
    Pose::Peace,
    Pose::Idle,
];

pub struct ScriptedHands {
    start: Instant,
    hold: Duration,
    jitter: f32,
    rng: StdRng,
}

impl ScriptedHands {
    pub fn new(hold: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            start: Instant::now(),
            hold,
            jitter: 0.003,
            rng,
        }
    }

    fn pose_at(&self, elapsed: Duration) -> (Pose, f32) {
        let hold = self.hold.as_secs_f32().max(1e-3);
        let slot = elapsed.as_secs_f32() / hold;
        let idx = slot as usize % TIMELINE.len();
        (TIMELINE[idx], slot.fract())
    }

    fn noisy(&mut self, mut hand: Hand) -> Hand {
        let j = self.jitter;
        for p in hand.landmarks.iter_mut() {
            p.x += self.rng.gen_range(-j..=j);
            p.y += self.rng.gen_range(-j..=j);
        }
        hand
    }
}

impl LandmarkSource for ScriptedHands {
    fn detect(&mut self) -> Result<Option<Hands>, TrackingError> {
        let (pose, progress) = self.pose_at(self.start.elapsed());
        let mut hands = Hands::new();
        match pose {
            Pose::Idle => {}
            Pose::OpenPalm => hands.push(open_palm(0.0)),
            Pose::Fist => hands.push(fist(0.0)),
            // pinch opens from 0.02 to 0.07 over the hold
            Pose::Pinch => hands.push(pinch(0.02 + 0.05 * progress)),
            Pose::TwoHands => {
                let apart = 0.15 + 0.3 * progress;
                hands.push(relaxed(-apart * 0.5));
                hands.push(relaxed(apart * 0.5));
            }
            Pose::Peace => hands.push(peace(0.0)),
        }
        let hands = hands.into_iter().map(|h| self.noisy(h)).collect();
        Ok(Some(hands))
    }

    fn close(&mut self) {
        log::info!("[script] landmark script closed");
    }
}

fn relaxed(dx: f32) -> Hand {
    let mut pts = [Vec3::ZERO; LANDMARK_COUNT];
    pts[WRIST] = Vec3::new(0.5 + dx, 0.8, 0.0);
    pts[THUMB_MCP] = Vec3::new(0.42 + dx, 0.68, 0.0);
    pts[THUMB_TIP] = Vec3::new(0.40 + dx, 0.62, 0.0);
    for (k, &(tip, base)) in FINGERS.iter().enumerate() {
        let x = 0.45 + dx + k as f32 * 0.04;
        pts[base] = Vec3::new(x, 0.55, 0.0);
        pts[tip] = Vec3::new(x, 0.52, 0.0);
    }
    Hand::new(pts)
}

fn open_palm(dx: f32) -> Hand {
    let mut hand = relaxed(dx);
    for &(tip, base) in &FINGERS {
        hand.landmarks[tip].y = hand.landmarks[base].y - 0.15;
    }
    hand
}

fn fist(dx: f32) -> Hand {
    let mut hand = relaxed(dx);
    for (k, &(tip, _)) in FINGERS.iter().enumerate() {
        hand.landmarks[tip] = Vec3::new(0.47 + dx + k as f32 * 0.02, 0.74, 0.0);
    }
    hand
}

fn pinch(distance: f32) -> Hand {
    let mut hand = relaxed(0.0);
    let index = hand.landmarks[INDEX_TIP];
    hand.landmarks[THUMB_TIP] = index + Vec3::new(0.0, distance, 0.0);
    hand
}

fn peace(dx: f32) -> Hand {
    let mut hand = relaxed(dx);
    for (i, &(tip, base)) in FINGERS.iter().enumerate() {
        hand.landmarks[tip].y = if i < 2 {
            hand.landmarks[base].y - 0.15
        } else {
            hand.landmarks[base].y + 0.03
        };
    }
    hand
}
