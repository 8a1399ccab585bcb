//! Simulation core errors

use thiserror::Error;

/// Errors raised by the simulation core
///
/// All variants are unrecoverable at the point of detection and propagate to
/// the caller; the core performs no silent correction beyond constraint
/// clamping and zero-fill growth, both of which are normal control flow.
#[derive(Error, Debug)]
pub enum SimError {
    /// Operation is not meaningful for the given arguments
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Motion component or constraint access beyond the allocated range
    #[error("motion degree {degree} out of range (highest allocated degree is {len})")]
    IndexOutOfRange {
        /// Requested motion-equation degree
        degree: usize,
        /// Number of allocated derivative components
        len: usize,
    },

    /// Failure raised by a custom behavior during an update pass
    #[error("behavior failure: {0}")]
    Behavior(String),
}
