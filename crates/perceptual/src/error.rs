use thiserror::Error;

/// Errors returned by the perceptual layer.
///
/// All of these indicate caller mistakes (bad parameters or inconsistent
/// inputs), not transient conditions; they fail before any output is
/// produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PerceptualError {
    #[error("sketch length {perms} exceeds salt table size {available}")]
    SketchTooLong { perms: usize, available: usize },

    #[error("invalid band count {bands} for sketch length {perms}; expected 1..={perms}")]
    InvalidBands { bands: usize, perms: usize },

    #[error("inconsistent sketch lengths: expected {expected}, got {got}")]
    MixedSketchLengths { expected: usize, got: usize },
}
