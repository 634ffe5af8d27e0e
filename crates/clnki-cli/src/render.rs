//! Text rendering for status, deck, browse and settings output

use std::fmt::Write;

use colored::Colorize;

use clnki_core::{Collection, Deck, ParameterSet};

/// Deck table: name, total cards, due today
pub fn status_table(collection: &Collection) -> String {
    if collection.is_empty() {
        return format!("{}\n", "No decks yet. Create one with `clnki new-deck <name>`.".dimmed());
    }

    let name_width = collection
        .iter()
        .map(|(name, _)| name.chars().count())
        .chain(std::iter::once("Deck".len()))
        .max()
        .unwrap_or(4);

    let mut out = String::new();
    let header = format!("{:<name_width$}  {:>6}  {:>5}", "Deck", "Cards", "Due");
    let _ = writeln!(out, "{}", header.bold());
    let _ = writeln!(out, "{}", "-".repeat(header.len()));
    for (name, deck) in collection.iter() {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>6}  {:>5}",
            name,
            deck.len(),
            deck.num_due()
        );
    }
    out
}

/// Summary of one deck
pub fn deck_summary(name: &str, deck: &Deck) -> String {
    let new = deck.cards().filter(|c| c.is_new).count();
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Deck:".bold(), name);
    let _ = writeln!(out, "  Cards:        {}", deck.len());
    let _ = writeln!(out, "  New:          {}", new);
    let _ = writeln!(out, "  Reviewed:     {}", deck.len() - new);
    let _ = writeln!(out, "  Due today:    {}", deck.num_due());
    out
}

/// Every card in creation order
pub fn card_listing(deck: &Deck) -> String {
    if deck.is_empty() {
        return format!("{}\n", "Deck is empty.".dimmed());
    }

    let mut out = String::new();
    for card in deck.cards() {
        let _ = writeln!(out, "{} {}", format!("[{}]", card.id).cyan(), card.front.bold());
        let _ = writeln!(out, "    {}", card.back);
        match (card.due_date, card.stability, card.difficulty) {
            (Some(due), Some(s), Some(d)) => {
                let _ = writeln!(
                    out,
                    "    {}",
                    format!("due {due}  S={s:.2}  D={d:.2}").dimmed()
                );
            }
            _ => {
                let _ = writeln!(out, "    {}", "new".green());
            }
        }
    }
    out
}

/// Current parameter set
pub fn settings(params: &ParameterSet) -> String {
    let weights = params
        .weights()
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    let _ = writeln!(out, "{}", "Settings".cyan().bold());
    let _ = writeln!(out, "  FSRS weights:       {}", weights);
    let _ = writeln!(out, "  Desired retention:  {}", params.desired_retention());
    let _ = writeln!(out, "  New cards per day:  {}", params.new_cards_per_day());
    let _ = writeln!(out, "  Cards daily limit:  {}", params.cards_daily_limit());
    out
}
