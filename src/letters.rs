use fastrand::Rng;
use unicode_normalization::UnicodeNormalization;

pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// Scrabble point values, indexed by `letter - 'A'`.
const LETTER_VALUES: [u32; 26] = [
    1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
];

// Simplified Scrabble tile distribution, same indexing.
const LETTER_DISTRIBUTION: [u32; 26] = [
    9, 2, 2, 4, 12, 2, 3, 2, 9, 1, 1, 4, 2, 6, 8, 2, 1, 6, 4, 6, 4, 2, 2, 1, 2, 1,
];

fn table_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Some((upper as u8 - b'A') as usize)
    } else {
        None
    }
}

/// Point value of one letter. Case-insensitive; anything outside A-Z is worth 0.
#[inline]
pub fn letter_value(letter: char) -> u32 {
    table_index(letter).map_or(0, |i| LETTER_VALUES[i])
}

/// Relative draw weight of a letter in the weighted bag.
#[inline]
pub fn letter_weight(letter: char) -> u32 {
    table_index(letter).map_or(0, |i| LETTER_DISTRIBUTION[i])
}

/// Sum of letter values, case-insensitive. Decomposed accents score like
/// their composed letter.
pub fn word_score(word: &str) -> u32 {
    word.nfc()
        .flat_map(char::to_uppercase)
        .map(letter_value)
        .sum()
}

/// Source of the letters printed on freshly generated tokens.
pub trait LetterBag: Send {
    fn draw(&mut self, rng: &mut Rng) -> char;
}

/// Every letter equally likely.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformLetters;

impl LetterBag for UniformLetters {
    fn draw(&mut self, rng: &mut Rng) -> char {
        let i = rng.usize(..ALPHABET.len());
        (b'A' + i as u8) as char
    }
}

/// Letters drawn in proportion to the tile distribution table.
#[derive(Debug, Clone)]
pub struct WeightedLetters {
    cumulative: [u32; 26],
}

impl Default for WeightedLetters {
    fn default() -> Self {
        let mut cumulative = [0u32; 26];
        let mut running = 0;
        for (slot, weight) in cumulative.iter_mut().zip(LETTER_DISTRIBUTION) {
            running += weight;
            *slot = running;
        }
        Self { cumulative }
    }
}

impl LetterBag for WeightedLetters {
    fn draw(&mut self, rng: &mut Rng) -> char {
        let total = self.cumulative[25];
        let roll = rng.u32(..total);
        let i = self.cumulative.partition_point(|&c| c <= roll);
        (b'A' + i as u8) as char
    }
}

/// Cycles through a fixed letter sequence. Used for practice rounds and
/// deterministic fixtures.
#[derive(Debug, Clone)]
pub struct ScriptedLetters {
    letters: Vec<char>,
    cursor: usize,
}

impl ScriptedLetters {
    pub fn new(script: &str) -> Self {
        let letters: Vec<char> = script
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_uppercase)
            .collect();
        Self { letters, cursor: 0 }
    }
}

impl LetterBag for ScriptedLetters {
    fn draw(&mut self, rng: &mut Rng) -> char {
        if self.letters.is_empty() {
            return UniformLetters.draw(rng);
        }
        let c = self.letters[self.cursor % self.letters.len()];
        self.cursor += 1;
        c
    }
}
