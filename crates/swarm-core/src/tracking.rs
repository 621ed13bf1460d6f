//! Hand-off between the landmark producer and the frame loop.
//!
//! The producer overwrites a single slot with its latest classification; the
//! frame loop polls it at most once per frame and never waits on the producer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, TryLockError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use smallvec::SmallVec;

use crate::error::TrackingError;
use crate::gesture::{classify, GestureState, Hand};

/// Hands detected in one camera frame. More than two are never tracked.
pub type Hands = SmallVec<[Hand; 2]>;

/// Most-recent-value slot shared by producer and consumer.
#[derive(Clone, Default)]
pub struct GestureSlot {
    latest: Arc<Mutex<Option<GestureState>>>,
}

impl GestureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite whatever is pending.
    pub fn publish(&self, gesture: GestureState) {
        let mut slot = match self.latest.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(gesture);
    }

    /// Take the pending classification, if any. Returns `None` when nothing
    /// new arrived or when the producer currently holds the slot.
    pub fn poll(&self) -> Option<GestureState> {
        match self.latest.try_lock() {
            Ok(mut g) => g.take(),
            Err(TryLockError::WouldBlock) => None,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().take(),
        }
    }
}

/// Anything that turns camera frames into landmark sets.
///
/// `Ok(None)` means no new camera frame was ready; `Ok(Some(hands))` with an
/// empty list means a frame was processed and no hand was found.
pub trait LandmarkSource: Send + 'static {
    fn detect(&mut self) -> Result<Option<Hands>, TrackingError>;

    /// Release any model or device handle. Called once when the session stops.
    fn close(&mut self) {}
}

/// A running landmark producer on its own thread.
pub struct TrackingSession {
    active: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl TrackingSession {
    /// Start polling `source` every `interval`, classifying each detection
    /// and publishing it into `slot`.
    pub fn spawn<S: LandmarkSource>(
        mut source: S,
        slot: GestureSlot,
        interval: Duration,
    ) -> Result<Self, TrackingError> {
        let active = Arc::new(AtomicBool::new(true));
        let running = Arc::clone(&active);
        let worker = thread::Builder::new()
            .name("landmarks".into())
            .spawn(move || {
                log::info!("[tracking] session started");
                let mut last_kind = None;
                while running.load(Ordering::Acquire) {
                    match source.detect() {
                        Ok(Some(hands)) => {
                            let gesture = classify(&hands);
                            if last_kind != Some(gesture.kind()) {
                                log::debug!("[tracking] gesture {}", gesture.label());
                                last_kind = Some(gesture.kind());
                            }
                            slot.publish(gesture);
                        }
                        Ok(None) => {}
                        Err(e) => log::warn!("[tracking] frame skipped: {e}"),
                    }
                    thread::sleep(interval);
                }
                source.close();
                log::info!("[tracking] session stopped");
            })
            .map_err(|e| TrackingError::Spawn(e.to_string()))?;
        Ok(Self {
            active,
            worker: Some(worker),
        })
    }

    pub fn is_active(&self) -> bool {
        self.worker.is_some()
    }

    /// Stop the producer and wait for its in-flight detection to finish.
    /// Safe to call more than once.
    pub fn stop(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("[tracking] landmark worker panicked");
            }
        }
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_takes_latest_and_clears() {
        let slot = GestureSlot::new();
        assert_eq!(slot.poll(), None);
        slot.publish(GestureState::Fist);
        slot.publish(GestureState::OpenPalm);
        assert_eq!(slot.poll(), Some(GestureState::OpenPalm));
        assert_eq!(slot.poll(), None);
    }

    #[test]
    fn poll_does_not_block_while_producer_holds_slot() {
        let slot = GestureSlot::new();
        slot.publish(GestureState::Peace);
        let guard = slot.latest.lock().unwrap();
        assert_eq!(slot.poll(), None);
        drop(guard);
        assert_eq!(slot.poll(), Some(GestureState::Peace));
    }
}
