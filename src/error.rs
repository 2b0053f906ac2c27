/**
Copyright (c) 2019 Todd Stellanova
LICENSE: See LICENSE file
*/

use thiserror::Error;

/// Failures surfaced outside the per-tick control loop
#[derive(Debug, Error)]
pub enum FlightError {
    #[error("invalid flight configuration: {0}")]
    InvalidConfig(String),

    #[error("could not read flight configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed flight configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("action buffer has {actual} channels, expected {expected}")]
    ActionLength { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, FlightError>;
