//! Routing error type.

use thiserror::Error;

use nav_core::{NavError, NodeId};

/// Errors produced by routing providers.
///
/// The synthesizer treats every variant as "degrade to fallback"; only
/// [`RoutingError::InvalidInput`] indicates a caller bug.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("at least two waypoints are required, got {0}")]
    TooFewWaypoints(usize),

    #[error("road network is empty")]
    EmptyNetwork,

    #[error("provider returned an empty path")]
    EmptyPath,

    #[error("provider failure: {0}")]
    Provider(String),

    #[error("provider timed out after {0} ms")]
    Timeout(u64),

    #[error(transparent)]
    InvalidInput(#[from] NavError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
