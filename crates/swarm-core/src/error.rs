use thiserror::Error;

/// Rejected configuration input. Never replaced by a silent default.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown shape family `{0}`")]
    UnknownShape(String),
    #[error("particle count {count} outside {min}..={max}")]
    ParticleCount { count: usize, min: usize, max: usize },
    #[error("base size {size} outside {min}..={max}")]
    BaseSize { size: f32, min: f32, max: f32 },
    #[error("invalid color `{0}`, expected #rrggbb")]
    InvalidColor(String),
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
}

/// Failure while rebuilding the particle swarm. The previous swarm stays in place.
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not allocate buffers for {0} particles")]
    Allocation(usize),
}

/// Problems on the landmark side. These never reach the simulation loop.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackingError {
    #[error("expected {expected} landmarks per hand, got {got}")]
    LandmarkCount { expected: usize, got: usize },
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("tracking worker thread could not be started: {0}")]
    Spawn(String),
}
