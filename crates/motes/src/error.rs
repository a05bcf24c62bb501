use std::fmt;

/// Errors returned by [`Controller`](crate::Controller) operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerError {
    /// A chaos transition is already waiting for its reform.
    ChaosPending,

    /// Viewport width is negative or not a number.
    InvalidWidth(f32),

    /// Text and offset lists have different lengths.
    LengthMismatch { texts: usize, offsets: usize },
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::ChaosPending => {
                write!(f, "A chaos transition is already pending")
            }
            ControllerError::InvalidWidth(width) => {
                write!(f, "Invalid viewport width: {}", width)
            }
            ControllerError::LengthMismatch { texts, offsets } => write!(
                f,
                "Got {} texts but {} position offsets",
                texts, offsets
            ),
        }
    }
}

impl std::error::Error for ControllerError {}
