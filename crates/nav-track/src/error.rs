//! Tracker error type.

use thiserror::Error;

use nav_core::NavError;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("navigation session has been stopped")]
    Stopped,

    #[error("route has no geometry")]
    EmptyRoute,

    #[error("invalid fix: {0}")]
    InvalidFix(#[from] NavError),
}

pub type TrackResult<T> = Result<T, TrackError>;
