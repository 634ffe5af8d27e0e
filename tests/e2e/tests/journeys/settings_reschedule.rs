//! Settings journey
//!
//! Changing settings takes effect on the next scheduling pass, whether the
//! change came from this run or from a saved settings file.

use chrono::NaiveDate;
use clnki_core::{schedule_collection, Collection, Grade, ParameterSet};
use clnki_e2e_tests::{DeckFactory, TestDataDir};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_new_card_budget_change_reschedules() {
    let dir = TestDataDir::new_temp();
    let today = date(2025, 2, 1);
    let (mut collection, params) = dir.open(today);
    DeckFactory::insert_new(&mut collection, "kanji", 10);
    schedule_collection(&mut collection, today, &params).unwrap();
    assert_eq!(collection.deck("kanji").unwrap().num_due(), 4);
    dir.save(&collection, today, &params);

    dir.storage
        .save_settings(&params.with_limits(8, 25).unwrap())
        .unwrap();

    let (collection, params) = dir.reopen().open(today);
    assert_eq!(params.new_cards_per_day(), 8);
    assert_eq!(collection.deck("kanji").unwrap().num_due(), 8);
}

#[test]
fn test_due_limit_change_reschedules() {
    let params = ParameterSet::default();
    let mut collection = Collection::new();
    collection.insert_deck("big", DeckFactory::reviewed_on(40, &params, date(2025, 2, 1)));
    let today = date(2025, 2, 10);

    schedule_collection(&mut collection, today, &params).unwrap();
    assert_eq!(collection.deck("big").unwrap().num_due(), 25);

    let wider = params.with_limits(4, 100).unwrap();
    schedule_collection(&mut collection, today, &wider).unwrap();
    assert_eq!(collection.deck("big").unwrap().num_due(), 40);
}

#[test]
fn test_lower_retention_spaces_reviews_further() {
    let today = date(2025, 2, 1);
    let strict = ParameterSet::default();
    let relaxed = strict.with_desired_retention(0.8).unwrap();

    let mut deck = DeckFactory::new_cards(1);
    let strict_due = deck
        .clone()
        .review(1, Grade::Easy, &strict, today)
        .unwrap()
        .due_date
        .unwrap();
    let relaxed_due = deck
        .review(1, Grade::Easy, &relaxed, today)
        .unwrap()
        .due_date
        .unwrap();

    assert_eq!(strict_due, date(2025, 2, 4));
    assert!(relaxed_due > strict_due);
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TestDataDir::new_temp();
    let custom = ParameterSet::default()
        .with_desired_retention(0.85)
        .unwrap()
        .with_limits(1, 5)
        .unwrap();
    dir.storage.save_settings(&custom).unwrap();
    assert_eq!(dir.storage.load_settings().unwrap(), custom);

    dir.storage.save_settings(&ParameterSet::default()).unwrap();
    assert_eq!(dir.storage.load_settings().unwrap(), ParameterSet::default());
}
