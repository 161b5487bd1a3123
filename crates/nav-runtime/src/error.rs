use thiserror::Error;

use nav_route::RouteError;
use nav_track::TrackError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("replay parse error: {0}")]
    Replay(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} channel closed")]
    ChannelClosed(&'static str),

    #[error(transparent)]
    Track(#[from] TrackError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("reroute task failed: {0}")]
    Task(String),

    #[error("logging init failed: {0}")]
    Logging(String),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
