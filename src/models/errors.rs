/// Game-specific error types.
///
/// Everything except `Io`, `Serialization` and `Save` is a player-facing,
/// recoverable error: the dispatcher prints it and the turn ends with no
/// state change.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Arguments had the wrong shape (count or type).
    #[error("{0}")]
    InvalidInput(String),

    /// World data could not be read.
    #[error("{0}")]
    World(#[from] WorldError),

    /// The jump target does not exist in the world data.
    #[error("JUMP FAILED: Dimension {0} not found.")]
    UnknownDimension(String),

    /// The warp graph has no edge for the requested jump.
    #[error("JUMP FAILED: Cannot warp directly from {from} to {to}. Available warp destinations from {from}: {destinations}")]
    Unreachable {
        from: String,
        to: String,
        destinations: String,
    },

    /// The current dimension has no outgoing warp paths at all.
    #[error("JUMP FAILED: No warp paths available from {0}.")]
    NoWarpRoutes(String),

    /// The player tried to jump into the system they are already in.
    #[error("JUMP FAILED: You are already in the {0} system.")]
    AlreadyInDimension(String),

    /// Docking was attempted away from any dockable station.
    #[error("There is no station at your current location.")]
    NoStation,

    /// Landing was attempted away from any landing site.
    #[error("There is no city or landing site at your current coordinates.")]
    NoLandingSite,

    /// A named body is unknown to the player or absent from the system.
    #[error("Cannot scan {name}: {reason}")]
    ScanRefused { name: String, reason: String },

    /// Another captain could not be found.
    #[error("Captain {0} not found.")]
    UnknownCaptain(String),

    /// A rename or new-captain name was rejected.
    #[error("Failed to change name: {0}")]
    Name(#[from] NameError),

    /// Persisting the player failed.
    #[error("save failed: {0}")]
    Save(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;

/// Errors raised while reading world definitions.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("Dimension {0} not found")]
    UnknownDimension(String),

    #[error("failed to read world data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse world data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reasons a player name is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("Invalid name format (names must be 3-15 characters of A-Z, a-z, 0-9 or _)")]
    InvalidFormat,

    #[error("'{0}' is reserved as a system command")]
    Reserved(String),

    #[error("Name already taken")]
    Taken,

    #[error("Failed to save with new name")]
    SaveFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_lists_destinations() {
        let err = GameError::Unreachable {
            from: "C12".to_string(),
            to: "E15".to_string(),
            destinations: "A01, D14".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("C12 to E15"));
        assert!(text.contains("A01, D14"));
    }

    #[test]
    fn name_errors_convert_into_game_errors() {
        let err: GameError = NameError::Taken.into();
        assert_eq!(err.to_string(), "Failed to change name: Name already taken");
    }

    #[test]
    fn world_errors_pass_through_unchanged() {
        let err: GameError = WorldError::UnknownDimension("Z99".to_string()).into();
        assert_eq!(err.to_string(), "Dimension Z99 not found");
    }
}
