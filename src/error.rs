// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String),
    #[error("Window update error: {0}")]
    WindowUpdate(String),
    #[error("Camera init error: {0}")]
    CameraInit(String),
    #[error("Camera frame error: {0}")]
    CameraFrame(String),
    #[error("Frame size mismatch: expected {expected:?}, got {actual:?}")]
    FrameSize { expected: (usize, usize), actual: (usize, usize) },
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Cannot read config {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: std::io::Error },
    #[error("Cannot parse config {path:?}: {source}")]
    ConfigParse { path: PathBuf, source: serde_json::Error },
    #[error("Cannot serialize config: {0}")]
    ConfigSerialize(#[source] serde_json::Error),
}

/// Setup-time validation failures. Checked once, never per frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("dashboard button layout is empty")]
    EmptyLayout,
    #[error("button {label:?} has a zero size")]
    ZeroButtonSize { label: String },
    #[error("frame width {width} cannot fit {buttons} dashboard buttons")]
    TooNarrow { width: usize, buttons: usize },
    #[error("dashboard height {height} exceeds frame height {frame_height}")]
    BandTooTall { height: u32, frame_height: usize },
}
