pub mod types;

pub use self::types::{Accepted, PendingSubmission, Phase, RoundEvent};
use self::types::Reservation;
use crate::config::{DuplicateWords, GameConfig, LetterDraw};
use crate::difficulty::Difficulty;
use crate::error::{GameError, GameResult, SubmitError};
use crate::geometry::AnchorPose;
use crate::letters::{word_score, LetterBag, UniformLetters, WeightedLetters};
use crate::pool::placement::layout_batch;
use crate::pool::{LetterToken, TokenId, TokenPool};
use crate::store::ScoreRecord;
use crate::validation::{letter_count, precheck, Verdict, WordValidator};
use chrono::Utc;
use fastrand::Rng;
use tracing::{debug, info, warn};

/// One timed play session: Idle -> Running -> Complete.
///
/// The round owns the token pool, the selection and the score. Every
/// mutation goes through its methods; observable changes are queued as
/// [`RoundEvent`]s for the scene to drain.
pub struct Round {
    config: GameConfig,
    phase: Phase,
    difficulty: Difficulty,
    anchor: Option<AnchorPose>,
    time_remaining: f64,
    score: u32,
    words: Vec<String>,
    pool: TokenPool,
    selection: Vec<TokenId>,
    candidate: String,

    next_token: u64,
    // Bumped on every start/complete/reset; stale verdicts carry an old value.
    generation: u64,
    pending: Option<Reservation>,
    next_ticket: u64,

    rng: Rng,
    letters: Box<dyn LetterBag>,
    events: Vec<RoundEvent>,
    last_record: Option<ScoreRecord>,
}

impl Round {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.rules.seed {
            Some(s) => Rng::with_seed(s),
            None => Rng::new(),
        };
        let letters: Box<dyn LetterBag> = match config.rules.letter_draw {
            LetterDraw::Uniform => Box::new(UniformLetters),
            LetterDraw::Weighted => Box::new(WeightedLetters::default()),
        };

        Self {
            config,
            phase: Phase::Idle,
            difficulty: Difficulty::default(),
            anchor: None,
            time_remaining: 0.0,
            score: 0,
            words: Vec::new(),
            pool: TokenPool::new(),
            selection: Vec::new(),
            candidate: String::new(),
            next_token: 0,
            generation: 0,
            pending: None,
            next_ticket: 0,
            rng,
            letters,
            events: Vec::new(),
            last_record: None,
        }
    }

    pub fn with_letter_bag(mut self, bag: Box<dyn LetterBag>) -> Self {
        self.letters = bag;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }

    // --- Read access ---

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn anchor(&self) -> Option<AnchorPose> {
        self.anchor
    }

    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn pool(&self) -> &TokenPool {
        &self.pool
    }

    pub fn selection(&self) -> &[TokenId] {
        &self.selection
    }

    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record produced when the last round timed out.
    pub fn last_record(&self) -> Option<&ScoreRecord> {
        self.last_record.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Lifecycle ---

    pub fn start(&mut self, difficulty: Difficulty, anchor: AnchorPose) -> GameResult<()> {
        if self.phase == Phase::Running {
            return Err(GameError::InvalidState {
                op: "start",
                state: self.phase.into(),
            });
        }

        self.discard_pool();
        self.generation += 1;
        self.pending = None;
        self.difficulty = difficulty;
        self.anchor = Some(anchor);
        self.time_remaining = difficulty.time_limit_secs();
        self.score = 0;
        self.words.clear();
        self.set_selection(Vec::new());
        self.phase = Phase::Running;

        self.populate(difficulty.token_count());
        info!(
            "Round started: {} ({} tokens, {:.0}s)",
            difficulty.title(),
            self.pool.len(),
            self.time_remaining
        );
        Ok(())
    }

    /// Advances the countdown by real elapsed seconds.
    ///
    /// Returns the score record on the tick that ends the round.
    pub fn tick(&mut self, delta_secs: f64) -> Option<ScoreRecord> {
        // `!(x > 0)` also rejects NaN.
        if self.phase != Phase::Running || !(delta_secs > 0.0) {
            return None;
        }

        self.time_remaining = (self.time_remaining - delta_secs).max(0.0);
        if self.time_remaining == 0.0 {
            return Some(self.complete());
        }
        None
    }

    fn complete(&mut self) -> ScoreRecord {
        self.phase = Phase::Complete;
        self.generation += 1;
        if self.pending.take().is_some() {
            debug!("Round completed with a word still being checked");
        }

        let record = ScoreRecord {
            points: self.score,
            words_formed: self.words.len(),
            timestamp: Utc::now(),
            difficulty: self.difficulty,
        };

        self.set_selection(Vec::new());
        self.discard_pool();
        self.events.push(RoundEvent::Completed(record.clone()));
        self.last_record = Some(record.clone());

        info!(
            "Round complete: {} points, {} words",
            record.points, record.words_formed
        );
        record
    }

    /// Back to Idle from any phase. Persisted history is untouched.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.set_selection(Vec::new());
        self.discard_pool();
        self.phase = Phase::Idle;
        self.anchor = None;
        self.time_remaining = self.difficulty.time_limit_secs();
        self.score = 0;
        self.words.clear();
        debug!("Round reset");
    }

    // --- Selection ---

    /// Toggles `id` in the selection. Returns false when the tap was ignored.
    pub fn tap(&mut self, id: TokenId) -> bool {
        if self.phase != Phase::Running || !self.pool.contains(id) {
            return false;
        }

        let mut selection = self.selection.clone();
        match selection.iter().position(|&s| s == id) {
            Some(i) => {
                selection.remove(i);
            }
            None => selection.push(id),
        }
        self.set_selection(selection);
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.set_selection(Vec::new());
        true
    }

    fn set_selection(&mut self, selection: Vec<TokenId>) {
        if selection == self.selection {
            return;
        }
        self.candidate = selection
            .iter()
            .filter_map(|id| self.pool.get(*id))
            .map(|t| t.letter)
            .collect();
        self.selection = selection;
        self.events
            .push(RoundEvent::SelectionChanged(self.selection.clone()));
    }

    pub fn mark_presented(&mut self, id: TokenId) -> bool {
        match self.pool.get_mut(id) {
            Some(token) => {
                token.presented = true;
                true
            }
            None => false,
        }
    }

    // --- Submission ---

    /// Runs the dictionary-free checks and reserves the candidate for lookup.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitError> {
        if self.phase != Phase::Running {
            return Err(SubmitError::NotRunning);
        }
        if self.pending.is_some() {
            return Err(SubmitError::SubmissionPending);
        }

        let word = self.candidate.clone();
        let min = self.config.rules.min_word_length;

        let len = letter_count(&word);
        if let Some(err) = precheck(&word, min).and_then(|v| v.rejection(len, min)) {
            // Short words keep the selection so the player can extend them.
            if !matches!(err, SubmitError::TooShort { .. }) {
                self.set_selection(Vec::new());
            }
            return Err(self.reject(word, err));
        }

        if self.config.rules.duplicate_words == DuplicateWords::Reject
            && self.words.iter().any(|w| w.eq_ignore_ascii_case(&word))
        {
            self.set_selection(Vec::new());
            return Err(self.reject(word, SubmitError::AlreadyUsed));
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let tokens = self.selection.clone();
        self.pending = Some(Reservation {
            ticket,
            word: word.clone(),
            tokens: tokens.clone(),
        });

        debug!("Checking '{}' (ticket {})", word, ticket);
        Ok(PendingSubmission {
            generation: self.generation,
            ticket,
            word,
            tokens,
        })
    }

    /// Applies the dictionary's answer for a pending submission.
    ///
    /// Scoring and token removal use what `begin_submit` reserved, not the
    /// contents of the handle. A submission from an earlier round or an already finished one is
    /// dropped with [`SubmitError::Stale`] and changes nothing.
    pub fn resolve_submit(
        &mut self,
        pending: PendingSubmission,
        verdict: Verdict,
    ) -> Result<Accepted, SubmitError> {
        let reserved = match self.pending.take() {
            Some(r)
                if r.ticket == pending.ticket
                    && pending.generation == self.generation
                    && self.phase == Phase::Running =>
            {
                r
            }
            other => {
                self.pending = other;
                debug!("Dropping stale verdict for '{}'", pending.word);
                return Err(SubmitError::Stale);
            }
        };

        let len = letter_count(&reserved.word);
        if let Some(err) = verdict.rejection(len, self.config.rules.min_word_length) {
            self.set_selection(Vec::new());
            return Err(self.reject(reserved.word, err));
        }

        let points = word_score(&reserved.word);
        self.score += points;
        self.words.push(reserved.word.clone());
        self.set_selection(Vec::new());

        for id in &reserved.tokens {
            if self.pool.remove(*id).is_some() {
                self.events.push(RoundEvent::TokenRemoved(*id));
            } else {
                warn!("Submitted token {} was no longer in the pool", id);
            }
        }
        self.replenish();

        info!(
            "Accepted '{}' for {} points (total {})",
            reserved.word, points, self.score
        );
        self.events.push(RoundEvent::WordAccepted {
            word: reserved.word.clone(),
            points,
            total: self.score,
        });

        Ok(Accepted {
            word: reserved.word,
            points,
            total_score: self.score,
        })
    }

    /// Blocking submission: precheck, dictionary lookup, apply.
    pub fn submit_with(&mut self, validator: &WordValidator) -> Result<Accepted, SubmitError> {
        let pending = self.begin_submit()?;
        let verdict = validator.lookup(pending.word());
        self.resolve_submit(pending, verdict)
    }

    fn reject(&mut self, word: String, reason: SubmitError) -> SubmitError {
        debug!("Rejected '{}': {}", word, reason);
        self.events.push(RoundEvent::WordRejected {
            word,
            reason: reason.clone(),
        });
        reason
    }

    // --- Pool ---

    fn populate(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let layout = layout_batch(
            &mut self.rng,
            &self.config.placement,
            count,
            &self.pool.positions(),
            &self.pool.colors(),
        );
        if layout.positions.forced > 0 {
            warn!(
                "{} token(s) placed without full separation",
                layout.positions.forced
            );
        }

        for (position, color) in layout.positions.items.into_iter().zip(layout.colors.items) {
            let id = TokenId(self.next_token);
            self.next_token += 1;
            let letter = self.letters.draw(&mut self.rng);
            let token = LetterToken::new(id, letter, position, color);
            self.events.push(RoundEvent::TokenSpawned(token.clone()));
            self.pool.insert(token);
        }
    }

    fn replenish(&mut self) {
        let target = self.difficulty.token_count();
        let missing = target.saturating_sub(self.pool.len());
        if missing > 0 {
            debug!("Replenishing {} token(s)", missing);
            self.populate(missing);
        }
    }

    fn discard_pool(&mut self) {
        for token in self.pool.clear() {
            self.events.push(RoundEvent::TokenRemoved(token.id));
        }
    }
}
