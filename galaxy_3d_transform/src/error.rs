//! Error types for the Galaxy3D transform crate
//!
//! Every error here is a violated geometric precondition (bad scale,
//! degenerate basis, collapsed frustum). None of them are transient:
//! the rejected call left its receiver untouched and retrying with the
//! same arguments fails the same way.

use std::fmt;

/// Result type for Galaxy3D transform operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D transform errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Scale factor is zero, negative, subnormal or not finite
    InvalidScale(f32),

    /// Rotation angle is NaN or infinite
    InvalidAngle(f32),

    /// Rotation axis is not unit length (carries the measured length)
    NonUnitAxis(f32),

    /// Look-at direction is zero or parallel to the up vector
    DegenerateLookAt(String),

    /// Frustum bounds are collapsed, inverted or not finite
    InvalidFrustum(String),

    /// Aspect ratio is zero, negative or not finite
    InvalidAspect(f32),

    /// Vertical field of view is outside (0, PI)
    InvalidFieldOfView(f32),

    /// Viewport has a zero or non-finite extent
    InvalidViewport(String),

    /// Controller configuration value is zero, negative or not finite
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidScale(s) => write!(f, "Invalid scale: {} (must be a normal float > 0)", s),
            Error::InvalidAngle(a) => write!(f, "Invalid rotation angle: {} rad (must be finite)", a),
            Error::NonUnitAxis(len) => write!(f, "Rotation axis is not unit length: {}", len),
            Error::DegenerateLookAt(msg) => write!(f, "Degenerate look-at: {}", msg),
            Error::InvalidFrustum(msg) => write!(f, "Invalid frustum: {}", msg),
            Error::InvalidAspect(a) => write!(f, "Invalid aspect ratio: {} (must be finite and > 0)", a),
            Error::InvalidFieldOfView(fovy) => write!(f, "Invalid field of view: {} rad (must be in (0, PI))", fovy),
            Error::InvalidViewport(msg) => write!(f, "Invalid viewport: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
