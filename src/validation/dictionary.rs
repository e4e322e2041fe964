use super::normalize;
use crate::error::GameResult;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// The spell-check capability the round delegates dictionary lookups to.
///
/// Calls may block (an OS spell checker, a remote service), so sessions run
/// them off the logic thread.
pub trait Dictionary: Send + Sync {
    fn is_valid_word(&self, text: &str, language: &str) -> bool;

    /// Language tags this dictionary can check, e.g. `["en", "en_GB", "fr"]`.
    fn available_languages(&self) -> Vec<String>;
}

/// Dictionary backed by bundled word lists, one per language tag.
#[derive(Debug, Clone, Default)]
pub struct WordListDictionary {
    lists: HashMap<String, HashSet<String>>,
}

impl WordListDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(language: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        dict.add_words(language, words);
        dict
    }

    pub fn add_words<I, S>(&mut self, language: &str, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = self.lists.entry(language.to_string()).or_default();
        for w in words {
            let w = w.as_ref().trim();
            if !w.is_empty() {
                list.insert(normalize(w).to_lowercase());
            }
        }
    }

    /// Loads a word list: tab-separated, word in the first column, `#` starts a comment line.
    pub fn load_from_file<P: AsRef<Path>>(path: P, language: &str) -> GameResult<Self> {
        let file = File::open(path.as_ref())?;
        let dict = Self::load_from_reader(file, language)?;
        info!(
            "Loaded {} words for '{}' from {:?}",
            dict.word_count(language),
            language,
            path.as_ref()
        );
        Ok(dict)
    }

    pub fn load_from_reader<R: Read>(reader: R, language: &str) -> GameResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut words = Vec::new();
        for result in rdr.records() {
            let rec = result?;
            if let Some(word) = rec.get(0) {
                words.push(word.to_string());
            }
        }
        Ok(Self::from_words(language, words))
    }

    pub fn word_count(&self, language: &str) -> usize {
        self.lists.get(language).map_or(0, HashSet::len)
    }

    /// Words of the given language, in no particular order.
    pub fn words(&self, language: &str) -> impl Iterator<Item = &str> {
        self.lists
            .get(language)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }
}

impl Dictionary for WordListDictionary {
    fn is_valid_word(&self, text: &str, language: &str) -> bool {
        self.lists
            .get(language)
            .is_some_and(|list| list.contains(&normalize(text).to_lowercase()))
    }

    fn available_languages(&self) -> Vec<String> {
        let mut langs: Vec<String> = self.lists.keys().cloned().collect();
        langs.sort();
        langs
    }
}
