//! Persistence journey
//!
//! State survives between separate runs: everything goes through the JSON
//! documents and the due set is rebuilt on every load.

use chrono::NaiveDate;
use clnki_core::{schedule_collection, Grade, StorageError};
use clnki_e2e_tests::{DeckFactory, TestClock, TestDataDir};
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// ROUND TRIP
// ============================================================================

#[test]
fn test_reviews_survive_reopen() {
    let dir = TestDataDir::new_temp();
    let mut clock = TestClock::starting(2025, 1, 1);

    let (mut collection, params) = dir.open(clock.today());
    assert!(collection.is_empty());
    DeckFactory::insert_new(&mut collection, "latin", 3);
    schedule_collection(&mut collection, clock.today(), &params).unwrap();
    DeckFactory::review_all(
        collection.deck_mut("latin").unwrap(),
        &params,
        clock.today(),
        Grade::Easy,
    );
    dir.save(&collection, clock.today(), &params);

    // Same day, fresh process: nothing left to do
    let (reloaded, _) = dir.reopen().open(clock.today());
    assert_eq!(reloaded, collection);
    assert_eq!(reloaded.deck("latin").unwrap().num_due(), 0);

    // Three days later the cards are back
    clock.advance(3);
    let (later, _) = dir.reopen().open(clock.today());
    assert_eq!(later.deck("latin").unwrap().due_cards(), &[1, 2, 3]);
}

#[test]
fn test_stored_document_layout() {
    let dir = TestDataDir::new_temp();
    let today = date(2025, 1, 1);
    let (mut collection, params) = dir.open(today);
    let deck = DeckFactory::insert_new(&mut collection, "latin", 2);
    deck.review(1, Grade::Easy, &params, today).unwrap();
    dir.save(&collection, today, &params);

    let raw = dir.raw_decks();
    let reviewed = &raw["latin"]["1"];
    assert_eq!(reviewed["front"], "front 0");
    assert_eq!(reviewed["back"], "back 0");
    assert_eq!(reviewed["stability"], 2.31);
    assert_eq!(reviewed["difficulty"], 2.12);
    assert_eq!(reviewed["due_date"], "2025-01-04");
    assert_eq!(reviewed["last_review_date"], "2025-01-01");
    assert_eq!(reviewed["is_new"], false);

    let fresh = &raw["latin"]["2"];
    assert_eq!(fresh["is_new"], true);
    assert!(fresh.get("stability").is_none());
}

#[test]
fn test_settings_file_written_on_save_only() {
    let dir = TestDataDir::new_temp();
    let (_, params) = dir.open(date(2025, 1, 1));
    assert!(!dir.storage.settings_path().exists());

    dir.storage
        .save_settings(&params.with_limits(2, 10).unwrap())
        .unwrap();
    let text = std::fs::read_to_string(dir.storage.settings_path()).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(raw["fsrs_desired_R"], 0.9);
    assert_eq!(raw["new_cards_per_day"], 2);
    assert_eq!(raw["cards_daily_limit"], 10);
    assert_eq!(raw["fsrs"].as_array().unwrap().len(), 21);
}

// ============================================================================
// HAND-EDITED DOCUMENTS
// ============================================================================

#[test]
fn test_hand_edited_deck_with_nulls_loads() {
    let dir = TestDataDir::new_temp();
    dir.write_raw_decks(&json!({
        "go": {
            "1": {
                "front": "atari",
                "back": "one liberty left",
                "stability": null,
                "difficulty": null,
                "due_date": null,
                "last_review_date": null,
                "is_new": true
            },
            "7": { "front": "ko", "back": "repetition rule" }
        }
    }));

    let (mut collection, _) = dir.open(date(2025, 1, 1));
    let deck = collection.deck_mut("go").unwrap();
    assert_eq!(deck.due_cards(), &[1, 7]);
    assert_eq!(deck.card(7).unwrap().front, "ko");

    // Ids continue after the highest stored one
    assert_eq!(deck.add_card("seki", "mutual life"), 8);
}

#[test]
fn test_corrupt_document_is_an_error() {
    let dir = TestDataDir::new_temp();
    std::fs::write(dir.storage.decks_path(), "[1, 2").unwrap();

    let err = dir.storage.load_collection().unwrap_err();
    assert!(matches!(err, StorageError::Json { .. }));
    assert!(dir.path().join("decks.json").exists());
}
