use crate::error::SubmitError;
use crate::geometry::{Rgb, Vec3};
use crate::pool::TokenId;
use crate::store::ScoreRecord;
use std::collections::BTreeMap;

/// Presentation side of the game: renders tokens and feedback.
///
/// The adapter only ever receives commands. Taps and placement flow back
/// through [`crate::session::GameSession`], never by touching the round.
pub trait SceneAdapter {
    /// Shows a token at `position`, relative to the placement anchor.
    /// Returns true once the token is visible.
    fn spawn_token(&mut self, id: TokenId, letter: char, position: Vec3, color: Rgb) -> bool;

    fn remove_token(&mut self, id: TokenId);

    fn highlight_selection(&mut self, ids: &[TokenId]);

    fn word_accepted(&mut self, _word: &str, _points: u32, _total: u32) {}

    fn word_rejected(&mut self, _word: &str, _reason: &SubmitError) {}

    fn round_completed(&mut self, _record: &ScoreRecord) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibleToken {
    pub letter: char,
    pub position: Vec3,
    pub color: Rgb,
}

/// Headless scene that mirrors what a renderer would show.
#[derive(Debug, Clone, Default)]
pub struct MirrorScene {
    pub tokens: BTreeMap<TokenId, VisibleToken>,
    pub highlighted: Vec<TokenId>,
    pub accepted: Vec<(String, u32)>,
    pub rejected: Vec<(String, SubmitError)>,
    pub completed: Vec<ScoreRecord>,
}

impl MirrorScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of some visible token showing `letter`, skipping `taken`.
    pub fn find_letter(&self, letter: char, taken: &[TokenId]) -> Option<TokenId> {
        self.tokens
            .iter()
            .find(|(id, t)| t.letter == letter && !taken.contains(id))
            .map(|(id, _)| *id)
    }

    pub fn letters(&self) -> String {
        self.tokens.values().map(|t| t.letter).collect()
    }
}

impl SceneAdapter for MirrorScene {
    fn spawn_token(&mut self, id: TokenId, letter: char, position: Vec3, color: Rgb) -> bool {
        self.tokens.insert(
            id,
            VisibleToken {
                letter,
                position,
                color,
            },
        );
        true
    }

    fn remove_token(&mut self, id: TokenId) {
        self.tokens.remove(&id);
    }

    fn highlight_selection(&mut self, ids: &[TokenId]) {
        self.highlighted = ids.to_vec();
    }

    fn word_accepted(&mut self, word: &str, points: u32, _total: u32) {
        self.accepted.push((word.to_string(), points));
    }

    fn word_rejected(&mut self, word: &str, reason: &SubmitError) {
        self.rejected.push((word.to_string(), reason.clone()));
    }

    fn round_completed(&mut self, record: &ScoreRecord) {
        self.completed.push(record.clone());
    }
}
