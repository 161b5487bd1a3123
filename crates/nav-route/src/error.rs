//! Route-synthesis error type.

use thiserror::Error;

use nav_core::NavError;
use nav_hazard::HazardError;

/// Errors surfaced by [`RouteSynthesizer`](crate::RouteSynthesizer).
///
/// Provider failures never appear here; they degrade candidates instead.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    InvalidInput(#[from] NavError),

    #[error("invalid hazard snapshot: {0}")]
    Hazard(#[from] HazardError),
}

pub type RouteResult<T> = Result<T, RouteError>;
