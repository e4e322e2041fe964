use crate::error::SubmitError;
use crate::pool::{LetterToken, TokenId};
use crate::store::ScoreRecord;
use strum_macros::{Display, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Complete,
}

/// Discrete changes the presentation layer reacts to, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    TokenSpawned(LetterToken),
    TokenRemoved(TokenId),
    SelectionChanged(Vec<TokenId>),
    WordAccepted {
        word: String,
        points: u32,
        total: u32,
    },
    WordRejected {
        word: String,
        reason: SubmitError,
    },
    Completed(ScoreRecord),
}

/// A word handed to the dictionary. Resolve it with `Round::resolve_submit`.
///
/// The handle only identifies the submission. The round keeps its own copy
/// of the reserved word and tokens and resolves against that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub(crate) generation: u64,
    pub(crate) ticket: u64,
    pub(crate) word: String,
    pub(crate) tokens: Vec<TokenId>,
}

impl PendingSubmission {
    /// The candidate to look up.
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }
}

/// What `begin_submit` reserved for the ticket in flight.
#[derive(Debug, Clone)]
pub(crate) struct Reservation {
    pub(crate) ticket: u64,
    pub(crate) word: String,
    pub(crate) tokens: Vec<TokenId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub word: String,
    pub points: u32,
    pub total_score: u32,
}
