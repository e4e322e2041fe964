use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("No tracking surface available; move the device to find a surface and try again")]
    PlacementUnavailable,

    #[error("Cannot {op} while the round is {state}")]
    InvalidState {
        op: &'static str,
        state: &'static str,
    },

    #[error("Persistence Error: {0}")]
    Persistence(String),
}

pub type GameResult<T> = Result<T, GameError>;

/// Reasons a word submission did not score.
///
/// The first four are player-correctable and carry a message for the HUD;
/// the rest describe submissions the round could not take at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Word must be at least {min} letters")]
    TooShort { len: usize, min: usize },

    #[error("Word must contain only letters")]
    InvalidCharacters,

    #[error("Word not found in dictionary")]
    NotInDictionary,

    #[error("Word already used this game")]
    AlreadyUsed,

    #[error("No round is running")]
    NotRunning,

    #[error("A word is already being checked")]
    SubmissionPending,

    #[error("Round changed before the word was checked")]
    Stale,
}

impl SubmitError {
    /// True for failures the player caused and can fix by picking other letters.
    pub fn is_player_correctable(&self) -> bool {
        matches!(
            self,
            Self::TooShort { .. } | Self::InvalidCharacters | Self::NotInDictionary | Self::AlreadyUsed
        )
    }
}
