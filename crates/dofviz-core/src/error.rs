//! Error types for dofviz.

use thiserror::Error;

/// The main error type for dofviz operations.
///
/// Only precondition violations surface here. Degenerate optics (aperture or
/// focus disabled), numeric singularities and picks behind the camera resolve
/// to well-defined values instead.
#[derive(Error, Debug)]
pub enum DofError {
    /// A camera intrinsic is outside its valid range.
    #[error("invalid camera intrinsics: {field} = {value}")]
    InvalidIntrinsics { field: &'static str, value: f64 },

    /// The circle-of-confusion convention produced a non-positive diameter.
    #[error("invalid circle of confusion: {0} mm")]
    InvalidCircleOfConfusion(f64),

    /// The camera pose has a zero-length or non-finite direction.
    #[error("invalid camera pose: {0}")]
    InvalidPose(&'static str),

    /// A configuration value is out of range.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for dofviz operations.
pub type Result<T> = std::result::Result<T, DofError>;
