//! Hazard error type.

use thiserror::Error;

use nav_core::NavError;

#[derive(Debug, Error)]
pub enum HazardError {
    #[error("hazard radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),

    #[error(transparent)]
    InvalidInput(#[from] NavError),
}

pub type HazardResult<T> = Result<T, HazardError>;
