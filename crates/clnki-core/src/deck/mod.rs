//! Deck Module
//!
//! Card records, decks with their daily due set, and the named collection.

mod card;
mod collection;
#[allow(clippy::module_inception)]
mod deck;

pub use card::{CardId, CardRecord};
pub use collection::Collection;
pub use deck::Deck;
