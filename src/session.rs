use crate::config::GameConfig;
use crate::difficulty::Difficulty;
use crate::error::{GameError, GameResult, SubmitError};
use crate::geometry::AnchorPose;
use crate::pool::TokenId;
use crate::round::{Accepted, PendingSubmission, Round, RoundEvent};
use crate::scene::SceneAdapter;
use crate::store::{ScoreRecord, ScoreStore};
use crate::validation::{Dictionary, Verdict, WordValidator};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub type SubmitOutcome = Result<Accepted, SubmitError>;

/// Applies input events to a [`Round`] one at a time, on the caller's thread.
///
/// Dictionary lookups run on the rayon pool. Their verdicts queue on a
/// channel and are applied by [`GameSession::pump`], so the round is only
/// ever mutated from the thread that owns the session.
pub struct GameSession<S: SceneAdapter, T: ScoreStore> {
    round: Round,
    validator: WordValidator,
    scene: S,
    store: T,
    history: Vec<ScoreRecord>,
    difficulty: Difficulty,
    verdict_tx: Sender<(PendingSubmission, Verdict)>,
    verdict_rx: Receiver<(PendingSubmission, Verdict)>,
}

impl<S: SceneAdapter, T: ScoreStore> GameSession<S, T> {
    pub fn new(config: GameConfig, dictionary: Arc<dyn Dictionary>, scene: S, store: T) -> Self {
        let round = Round::new(config);
        Self::with_round(round, dictionary, scene, store)
    }

    pub fn with_round(round: Round, dictionary: Arc<dyn Dictionary>, scene: S, store: T) -> Self {
        let validator = WordValidator::new(dictionary, &round.config().rules);
        let history = store.load();
        let (verdict_tx, verdict_rx) = mpsc::channel();
        info!(
            "Session ready: language '{}', {} past rounds",
            validator.language(),
            history.len()
        );
        Self {
            round,
            validator,
            scene,
            store,
            history,
            difficulty: Difficulty::default(),
            verdict_tx,
            verdict_rx,
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    pub fn validator(&self) -> &WordValidator {
        &self.validator
    }

    pub fn history(&self) -> &[ScoreRecord] {
        &self.history
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Takes effect at the next placement.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    // --- Adapter callbacks ---

    /// Starts a round once a surface or head pose is available.
    pub fn on_placement_ready(&mut self, anchor: Option<AnchorPose>) -> GameResult<()> {
        let Some(anchor) = anchor else {
            warn!("Placement requested but no tracking surface is available");
            return Err(GameError::PlacementUnavailable);
        };
        let res = self.round.start(self.difficulty, anchor);
        self.flush_events();
        res
    }

    pub fn on_token_tapped(&mut self, id: TokenId) -> bool {
        let applied = self.round.tap(id);
        if !applied {
            debug!("Ignored tap on {}", id);
        }
        self.flush_events();
        applied
    }

    pub fn on_reset_requested(&mut self) {
        self.round.reset();
        self.history = self.store.load();
        self.flush_events();
    }

    // --- Clock and controls ---

    pub fn tick(&mut self, delta_secs: f64) -> Option<ScoreRecord> {
        let finished = self.round.tick(delta_secs);
        if let Some(record) = &finished {
            self.record_score(record);
        }
        self.flush_events();
        finished
    }

    pub fn clear(&mut self) -> bool {
        let cleared = self.round.clear();
        self.flush_events();
        cleared
    }

    /// Queues the current candidate for a background dictionary check.
    /// Returns the word being checked.
    pub fn submit(&mut self) -> Result<String, SubmitError> {
        let pending = self.round.begin_submit();
        self.flush_events();
        let pending = pending?;
        let word = pending.word().to_string();

        let validator = self.validator.clone();
        let tx = self.verdict_tx.clone();
        rayon::spawn(move || {
            let verdict = validator.lookup(pending.word());
            // The session may be gone; nothing to deliver to then.
            let _ = tx.send((pending, verdict));
        });
        Ok(word)
    }

    /// Checks the candidate on the calling thread.
    pub fn submit_blocking(&mut self) -> SubmitOutcome {
        let outcome = self.round.submit_with(&self.validator);
        self.flush_events();
        outcome
    }

    /// Applies every verdict that has arrived, in arrival order.
    pub fn pump(&mut self) -> Vec<SubmitOutcome> {
        let mut outcomes = Vec::new();
        while let Ok((pending, verdict)) = self.verdict_rx.try_recv() {
            outcomes.push(self.apply_verdict(pending, verdict));
        }
        outcomes
    }

    /// Waits up to `timeout` for the next verdict and applies it.
    pub fn pump_blocking(&mut self, timeout: Duration) -> Option<SubmitOutcome> {
        match self.verdict_rx.recv_timeout(timeout) {
            Ok((pending, verdict)) => Some(self.apply_verdict(pending, verdict)),
            Err(RecvTimeoutError::Timeout) => None,
            // Unreachable while the session holds its own sender.
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    fn apply_verdict(&mut self, pending: PendingSubmission, verdict: Verdict) -> SubmitOutcome {
        let outcome = self.round.resolve_submit(pending, verdict);
        if let Err(SubmitError::Stale) = &outcome {
            debug!("Verdict arrived after the round moved on; discarded");
        }
        self.flush_events();
        outcome
    }

    fn record_score(&mut self, record: &ScoreRecord) {
        self.history.push(record.clone());
        if let Err(e) = self.store.append(record) {
            // Best effort: gameplay continues with the in-memory history.
            warn!("Score not saved: {}", e);
        }
    }

    fn flush_events(&mut self) {
        for event in self.round.drain_events() {
            match event {
                RoundEvent::TokenSpawned(token) => {
                    if self
                        .scene
                        .spawn_token(token.id, token.letter, token.position, token.color)
                    {
                        self.round.mark_presented(token.id);
                    }
                }
                RoundEvent::TokenRemoved(id) => self.scene.remove_token(id),
                RoundEvent::SelectionChanged(ids) => self.scene.highlight_selection(&ids),
                RoundEvent::WordAccepted {
                    word,
                    points,
                    total,
                } => self.scene.word_accepted(&word, points, total),
                RoundEvent::WordRejected { word, reason } => {
                    self.scene.word_rejected(&word, &reason)
                }
                RoundEvent::Completed(record) => self.scene.round_completed(&record),
            }
        }
    }
}
