// src/error.rs

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("degenerate polygon: cannot resample to {requested} points (need at least 2)")]
    TooFewSamples { requested: usize },
    #[error("polygon requires at least {min} points, got {actual}")]
    NotEnoughPoints { min: usize, actual: usize },
    #[error("degenerate polygon: segment {segment} has zero length")]
    DegeneratePolygon { segment: usize },
    #[error("cannot normalise a shape with zero extent")]
    ZeroExtent,
    #[error("shape coordinates must be finite")]
    NonFinite,
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ShapeError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ShapeError::InvalidParameter { name, reason: reason.into() }
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type ShapeResult<T> = Result<T, ShapeError>;
