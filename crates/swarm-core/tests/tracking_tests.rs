// Host-side tests for the landmark worker and the gesture slot.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec3;
use swarm_core::gesture::{Hand, FINGERS, LANDMARK_COUNT, WRIST};
use swarm_core::*;

struct FistCam {
    calls: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

fn fist() -> Hand {
    let mut pts = [Vec3::ZERO; LANDMARK_COUNT];
    pts[WRIST] = Vec3::new(0.5, 0.8, 0.0);
    for (k, &(tip, base)) in FINGERS.iter().enumerate() {
        pts[base] = Vec3::new(0.45 + k as f32 * 0.04, 0.55, 0.0);
        pts[tip] = Vec3::new(0.47 + k as f32 * 0.02, 0.74, 0.0);
    }
    Hand::new(pts)
}

impl LandmarkSource for FistCam {
    fn detect(&mut self) -> Result<Option<Hands>, TrackingError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        match n % 3 {
            0 => Err(TrackingError::Inference("dropped frame".into())),
            1 => Ok(None),
            _ => Ok(Some(Hands::from_elem(fist(), 1))),
        }
    }

    fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

fn wait_for<T>(
    slot: &GestureSlot,
    timeout: Duration,
    mut f: impl FnMut(GestureState) -> Option<T>,
) -> Option<T> {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if let Some(out) = slot.poll().and_then(&mut f) {
            return Some(out);
        }
        thread::sleep(Duration::from_millis(2));
    }
    None
}

#[test]
fn session_publishes_and_survives_errors() {
    let calls = Arc::new(AtomicUsize::new(0));
    let closed = Arc::new(AtomicUsize::new(0));
    let slot = GestureSlot::new();
    let cam = FistCam {
        calls: Arc::clone(&calls),
        closed: Arc::clone(&closed),
    };
    let mut session =
        TrackingSession::spawn(cam, slot.clone(), Duration::from_millis(1)).unwrap();
    assert!(session.is_active());

    let seen = wait_for(&slot, Duration::from_secs(5), |g| {
        (g == GestureState::Fist).then_some(g)
    });
    assert_eq!(seen, Some(GestureState::Fist));

    session.stop();
    assert!(!session.is_active());
    assert_eq!(closed.load(Ordering::SeqCst), 1);
    assert!(calls.load(Ordering::SeqCst) >= 3);

    // second stop is a no-op
    session.stop();
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_the_session_stops_the_worker() {
    let calls = Arc::new(AtomicUsize::new(0));
    let closed = Arc::new(AtomicUsize::new(0));
    {
        let cam = FistCam {
            calls: Arc::clone(&calls),
            closed: Arc::clone(&closed),
        };
        let _session =
            TrackingSession::spawn(cam, GestureSlot::new(), Duration::from_millis(1)).unwrap();
        thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(closed.load(Ordering::SeqCst), 1);
    let after = calls.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(10));
    assert_eq!(calls.load(Ordering::SeqCst), after);
}

#[test]
fn stop_then_neutral() {
    let config = SwarmConfig {
        particle_count: MIN_PARTICLES,
        ..SwarmConfig::default()
    };
    let sim = Simulation::with_seed(config, 3).unwrap();
    let mut vis = Visualizer::new(sim);
    for _ in 0..30 {
        vis.frame(Some(GestureState::Fist), 1.0 / 60.0);
    }
    vis.tracking_stopped();
    assert_eq!(vis.smoother().target(), ControlValues::NEUTRAL);
    for _ in 0..400 {
        vis.frame(None, 1.0 / 60.0);
    }
    let c = vis.smoother().current();
    assert!((c.scale - 1.0).abs() < 1e-3 && c.explode.abs() < 1e-3);
}
