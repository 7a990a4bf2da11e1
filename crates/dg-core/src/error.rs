//! Generation failure taxonomy.

use thiserror::Error;

use crate::graph::{ConnectionType, NodeType, Pos};

/// Why a generation attempt, or the whole run, failed.
///
/// Soft step failures inside the path builder are not errors; they only
/// shorten a path. Everything here discards the attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("main path came up short: built {built} rooms, need at least {required}")]
    MainPathTooShort { built: usize, required: usize },

    #[error("no free slot left for the {room} room")]
    NoSpecialRoomSlot { room: NodeType },

    #[error("generated layout failed validation: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("gave up after {attempts} generation attempts")]
    AttemptsExhausted { attempts: usize },
}

/// Structural defects caught by the final validation pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("two rooms occupy {pos}")]
    OverlappingRooms { pos: Pos },

    #[error("expected exactly one start and one end room, found {starts} and {ends}")]
    BadEndpoints { starts: usize, ends: usize },

    #[error("connection between {from} and {to} references a missing room")]
    DanglingConnection { from: Pos, to: Pos },

    #[error("end room door at {pos} is {kind}, expected NeedKey")]
    EndNotLocked { pos: Pos, kind: ConnectionType },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GenerateError::MainPathTooShort {
            built: 3,
            required: 5,
        };
        assert!(err.to_string().contains("built 3 rooms"));

        let err = GenerateError::NoSpecialRoomSlot {
            room: NodeType::Treasure,
        };
        assert!(err.to_string().contains("Treasure"));

        let err: GenerateError = ValidationError::BadEndpoints { starts: 2, ends: 0 }.into();
        assert!(err.to_string().contains("validation"));
    }
}
