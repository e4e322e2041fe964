#![allow(dead_code)]

use spellsphere::config::GameConfig;
use spellsphere::difficulty::Difficulty;
use spellsphere::error::{GameError, GameResult};
use spellsphere::geometry::AnchorPose;
use spellsphere::letters::ScriptedLetters;
use spellsphere::pool::TokenId;
use spellsphere::round::Round;
use spellsphere::store::{ScoreRecord, ScoreStore};
use spellsphere::validation::{Dictionary, WordListDictionary, WordValidator};
use std::sync::{Arc, Mutex};

pub const WORDS: &[&str] = &["cat", "dog", "act", "tac", "the", "test", "hello", "café", "naïve"];

pub fn test_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.rules.seed = Some(42);
    config
}

pub fn dictionary() -> Arc<WordListDictionary> {
    Arc::new(WordListDictionary::from_words("en", WORDS))
}

pub fn validator() -> WordValidator {
    WordValidator::new(dictionary(), &test_config().rules)
}

/// Round whose tokens carry `script` letters in order, cycling.
pub fn scripted_round(script: &str, config: GameConfig) -> Round {
    Round::new(config).with_letter_bag(Box::new(ScriptedLetters::new(script)))
}

pub fn started(script: &str, difficulty: Difficulty) -> Round {
    let mut round = scripted_round(script, test_config());
    round.start(difficulty, AnchorPose::default()).unwrap();
    round
}

/// Distinct live tokens spelling `word`, in order.
pub fn ids_for(round: &Round, word: &str) -> Vec<TokenId> {
    let mut taken: Vec<TokenId> = Vec::new();
    for c in word.chars() {
        let id = round
            .pool()
            .iter()
            .find(|t| t.letter == c && !taken.contains(&t.id))
            .map(|t| t.id)
            .unwrap_or_else(|| panic!("no free '{}' token in pool", c));
        taken.push(id);
    }
    taken
}

pub fn spell(round: &mut Round, word: &str) -> Vec<TokenId> {
    let ids = ids_for(round, word);
    for id in &ids {
        assert!(round.tap(*id));
    }
    ids
}

pub fn pool_ids(round: &Round) -> Vec<TokenId> {
    let mut ids: Vec<TokenId> = round.pool().iter().map(|t| t.id).collect();
    ids.sort();
    ids
}

/// Store whose writes always fail.
#[derive(Default)]
pub struct FailingStore {
    pub seeded: Vec<ScoreRecord>,
}

impl ScoreStore for FailingStore {
    fn load(&self) -> Vec<ScoreRecord> {
        self.seeded.clone()
    }

    fn append(&mut self, _record: &ScoreRecord) -> GameResult<()> {
        Err(GameError::Persistence("disk full".to_string()))
    }
}

/// Dictionary that records every lookup it receives.
#[derive(Default)]
pub struct SpyDictionary {
    pub inner: WordListDictionary,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl SpyDictionary {
    pub fn new(words: &[&str]) -> Self {
        Self {
            inner: WordListDictionary::from_words("en", words),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Dictionary for SpyDictionary {
    fn is_valid_word(&self, text: &str, language: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), language.to_string()));
        self.inner.is_valid_word(text, language)
    }

    fn available_languages(&self) -> Vec<String> {
        self.inner.available_languages()
    }
}
