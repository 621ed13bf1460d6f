//! Gesture-driven particle swarm: shape targets, hand-gesture classification,
//! control smoothing and per-frame integration. No platform APIs; front-ends
//! own the window, the camera and the landmark model.

pub mod color;
pub mod config;
pub mod constants;
pub mod controls;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod shapes;
pub mod simulation;
pub mod tracking;

pub use config::*;
pub use constants::*;
pub use controls::*;
pub use engine::*;
pub use error::*;
pub use gesture::{classify, GestureKind, GestureState, Hand};
pub use shapes::{generate, ShapeFamily, ShapeSpec, ShapeTargets};
pub use simulation::*;
pub use tracking::*;
