pub mod dictionary;

pub use self::dictionary::{Dictionary, WordListDictionary};
use crate::config::RuleParams;
use crate::error::SubmitError;
use std::sync::Arc;
use strum_macros::Display;
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Verdict {
    Valid,
    TooShort,
    InvalidCharacters,
    NotInDictionary,
}

impl Verdict {
    /// The submission error shown to the player, or `None` for a valid word.
    pub fn rejection(self, len: usize, min: usize) -> Option<SubmitError> {
        match self {
            Self::Valid => None,
            Self::TooShort => Some(SubmitError::TooShort { len, min }),
            Self::InvalidCharacters => Some(SubmitError::InvalidCharacters),
            Self::NotInDictionary => Some(SubmitError::NotInDictionary),
        }
    }
}

/// Picks the dictionary language for a device locale.
///
/// Exact match first, then the two-letter base code, then any available
/// variant sharing that base, then `default`.
pub fn resolve_language(device_locale: Option<&str>, available: &[String], default: &str) -> String {
    let Some(locale) = device_locale.map(str::trim).filter(|l| !l.is_empty()) else {
        return default.to_string();
    };

    if available.iter().any(|a| a == locale) {
        return locale.to_string();
    }

    let base: String = locale.chars().take(2).collect();
    if available.iter().any(|a| *a == base) {
        return base;
    }

    if let Some(variant) = available.iter().find(|a| a.starts_with(&base)) {
        return variant.clone();
    }

    default.to_string()
}

/// Canonical composed form used for every comparison and lookup.
pub fn normalize(word: &str) -> String {
    word.nfc().collect()
}

/// Length as the player sees it: extended grapheme clusters.
pub fn letter_count(word: &str) -> usize {
    word.graphemes(true).count()
}

/// Length and character checks that need no dictionary.
///
/// A letter is an alphabetic character plus any combining marks on it, so
/// "cafe\u{301}" passes like "café".
pub fn precheck(candidate: &str, min_len: usize) -> Option<Verdict> {
    let word = normalize(candidate);
    if letter_count(&word) < min_len {
        return Some(Verdict::TooShort);
    }
    let all_letters = word.graphemes(true).all(|g| {
        let mut chars = g.chars();
        chars.next().is_some_and(char::is_alphabetic)
            && chars.all(|c| c.is_alphabetic() || is_combining_mark(c))
    });
    if !all_letters {
        return Some(Verdict::InvalidCharacters);
    }
    None
}

/// Word checking pipeline: precheck, then one dictionary lookup.
#[derive(Clone)]
pub struct WordValidator {
    dictionary: Arc<dyn Dictionary>,
    language: String,
    min_len: usize,
}

impl WordValidator {
    pub fn new(dictionary: Arc<dyn Dictionary>, rules: &RuleParams) -> Self {
        let available = dictionary.available_languages();
        let language = resolve_language(
            rules.device_locale.as_deref(),
            &available,
            &rules.default_language,
        );
        debug!("Validator language resolved to '{}'", language);
        Self {
            dictionary,
            language,
            min_len: rules.min_word_length,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn dictionary(&self) -> &Arc<dyn Dictionary> {
        &self.dictionary
    }

    pub fn precheck(&self, candidate: &str) -> Option<Verdict> {
        precheck(candidate, self.min_len)
    }

    /// Dictionary half of the pipeline. May block.
    pub fn lookup(&self, candidate: &str) -> Verdict {
        if self.dictionary.is_valid_word(&normalize(candidate), &self.language) {
            Verdict::Valid
        } else {
            Verdict::NotInDictionary
        }
    }

    pub fn validate(&self, candidate: &str) -> Verdict {
        self.precheck(candidate)
            .unwrap_or_else(|| self.lookup(candidate))
    }
}
