pub mod placement;

use crate::geometry::{Rgb, Vec3};
use crate::letters::letter_value;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterToken {
    pub id: TokenId,
    pub letter: char,
    pub value: u32,
    pub position: Vec3,
    pub color: Rgb,
    /// Set once the scene has rendered the token.
    pub presented: bool,
}

impl LetterToken {
    pub fn new(id: TokenId, letter: char, position: Vec3, color: Rgb) -> Self {
        Self {
            id,
            letter,
            value: letter_value(letter),
            position,
            color,
            presented: false,
        }
    }
}

/// Live tokens stored densely, with an id index for tap lookups.
#[derive(Debug, Clone, Default)]
pub struct TokenPool {
    slots: Vec<LetterToken>,
    index: FnvHashMap<TokenId, usize>,
}

impl TokenPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: TokenId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: TokenId) -> Option<&LetterToken> {
        self.index.get(&id).map(|&i| &self.slots[i])
    }

    pub fn get_mut(&mut self, id: TokenId) -> Option<&mut LetterToken> {
        match self.index.get(&id) {
            Some(&i) => Some(&mut self.slots[i]),
            None => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LetterToken> {
        self.slots.iter()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.slots.iter().map(|t| t.position).collect()
    }

    pub fn colors(&self) -> Vec<Rgb> {
        self.slots.iter().map(|t| t.color).collect()
    }

    pub fn insert(&mut self, token: LetterToken) {
        if let Some(&i) = self.index.get(&token.id) {
            self.slots[i] = token;
            return;
        }
        self.index.insert(token.id, self.slots.len());
        self.slots.push(token);
    }

    pub fn remove(&mut self, id: TokenId) -> Option<LetterToken> {
        let i = self.index.remove(&id)?;
        let removed = self.slots.swap_remove(i);
        if let Some(moved) = self.slots.get(i) {
            self.index.insert(moved.id, i);
        }
        Some(removed)
    }

    pub fn clear(&mut self) -> Vec<LetterToken> {
        self.index.clear();
        std::mem::take(&mut self.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(n: u64, letter: char) -> LetterToken {
        LetterToken::new(TokenId(n), letter, Vec3::new(n as f32, 0.0, 0.0), Rgb::default())
    }

    #[test]
    fn remove_keeps_index_consistent() {
        let mut pool = TokenPool::new();
        for (n, c) in "ABCDE".chars().enumerate() {
            pool.insert(token(n as u64, c));
        }

        let removed = pool.remove(TokenId(1)).unwrap();
        assert_eq!(removed.letter, 'B');
        assert_eq!(pool.len(), 4);
        assert!(!pool.contains(TokenId(1)));

        // The last slot was swapped into the hole.
        assert_eq!(pool.get(TokenId(4)).unwrap().letter, 'E');
        for t in pool.iter() {
            assert_eq!(pool.get(t.id).unwrap().id, t.id);
        }
    }

    #[test]
    fn value_comes_from_table() {
        assert_eq!(token(0, 'Q').value, 10);
        assert_eq!(token(0, 'e').value, 1);
    }
}
