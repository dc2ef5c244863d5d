use std::process::ExitCode;

use thiserror::Error;

/// Failures inside the face core. Both kinds are recovered where they occur.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FaceError {
    #[error("timestamp {seconds}s could not be decomposed in the local calendar")]
    TimeDecomposition { seconds: i64 },
    #[error("drawing surface is degenerate ({width}x{height})")]
    DegenerateGeometry { width: f64, height: f64 },
}

/// Host-side failures: configuration, resources and the window.
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("failed to load font: {0}")]
    Font(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode background asset: {0}")]
    Asset(#[from] image::ImageError),
    #[error("window error: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("pixel surface error: {0}")]
    Surface(#[from] pixels::Error),
}

impl From<&ClockError> for ExitCode {
    fn from(value: &ClockError) -> Self {
        match value {
            ClockError::Config(_) => ExitCode::from(2),
            ClockError::Font(_) => ExitCode::from(3),
            ClockError::Io(_) | ClockError::Asset(_) => ExitCode::from(4),
            ClockError::Window(_) | ClockError::EventLoop(_) | ClockError::Surface(_) => {
                ExitCode::from(5)
            }
        }
    }
}
