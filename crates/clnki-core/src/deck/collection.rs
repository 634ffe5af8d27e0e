//! Collection - every deck by name

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::deck::Deck;

/// Named decks, persisted as `{ deck_name: { card_id: card } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    decks: BTreeMap<String, Deck>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deck(&self, name: &str) -> Option<&Deck> {
        self.decks.get(name)
    }

    pub fn deck_mut(&mut self, name: &str) -> Option<&mut Deck> {
        self.decks.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decks.contains_key(name)
    }

    /// Insert or replace a deck, returning the previous one
    pub fn insert_deck(&mut self, name: impl Into<String>, deck: Deck) -> Option<Deck> {
        self.decks.insert(name.into(), deck)
    }

    /// Create an empty deck; `None` if the name is taken
    pub fn create_deck(&mut self, name: impl Into<String>) -> Option<&mut Deck> {
        match self.decks.entry(name.into()) {
            std::collections::btree_map::Entry::Occupied(_) => None,
            std::collections::btree_map::Entry::Vacant(slot) => Some(slot.insert(Deck::new())),
        }
    }

    pub fn remove_deck(&mut self, name: &str) -> Option<Deck> {
        self.decks.remove(name)
    }

    /// Decks ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Deck)> {
        self.decks.iter().map(|(name, deck)| (name.as_str(), deck))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Deck)> {
        self.decks.iter_mut().map(|(name, deck)| (name.as_str(), deck))
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }
}
