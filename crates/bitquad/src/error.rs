//! Error types for grid configuration and mesh generation
//!
//! The pack functions never fail; they clamp and mask. Errors are raised at
//! the configuration boundary so that a bad flag count or geometry is caught
//! before any vertex data exists.

use crate::codec::MAX_FLAGS;

/// Errors that can occur while configuring or building a quad grid.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BitquadError {
    /// More flags were requested than fit in one packed byte.
    #[error("too many flags: requested {requested}, at most {max} fit in a byte")]
    TooManyFlags { requested: usize, max: usize },

    /// Grid size is not a positive finite number.
    #[error("invalid grid size: {0}")]
    InvalidSize(f32),

    /// Padding is negative or not finite.
    #[error("invalid padding: {0}")]
    InvalidPadding(f32),

    /// Padding consumes the whole grid, leaving no room for quads.
    #[error("no room for {columns} columns in size {size} with padding {padding}")]
    NoRoomForCells {
        size: f32,
        padding: f32,
        columns: usize,
    },

    /// Configuration JSON could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl BitquadError {
    pub(crate) fn too_many_flags(requested: usize) -> Self {
        BitquadError::TooManyFlags {
            requested,
            max: MAX_FLAGS,
        }
    }
}

/// Result alias for bitquad operations.
pub type Result<T> = std::result::Result<T, BitquadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_many_flags_message() {
        let err = BitquadError::too_many_flags(9);
        assert_eq!(
            err.to_string(),
            "too many flags: requested 9, at most 8 fit in a byte"
        );
    }

    #[test]
    fn test_no_room_message() {
        let err = BitquadError::NoRoomForCells {
            size: 1.0,
            padding: 0.5,
            columns: 3,
        };
        assert!(err.to_string().contains("3 columns"));
    }
}
