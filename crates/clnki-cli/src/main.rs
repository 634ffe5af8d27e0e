//! Clnki CLI
//!
//! Terminal front end: loads decks and settings, picks the reference date,
//! feeds grades into review sessions and saves everything back.

mod entry;
mod render;
mod review;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{Days, Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use clnki_core::{
    resume_collection, schedule, Collection, DailySchedule, ParameterSet, ReviewSession, Storage,
    StorageError,
};

use crate::review::ReviewEnd;

/// Clnki - a minimal spaced repetition system
#[derive(Parser)]
#[command(name = "clnki")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A minimal spaced repetition system for the terminal")]
#[command(long_about = "Clnki schedules flashcards with the FSRS memory model.\n\nDue and new cards are selected per day; a review session keeps asking until every card passes.")]
struct Cli {
    /// Custom data directory holding decks.json, settings.json and schedule.json
    #[arg(long, global = true, env = "CLNKI_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Pretend today is this many days later
    #[arg(long, global = true, default_value = "0")]
    forward_days: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List decks with their card and due counts
    Status,

    /// Show one deck
    Deck {
        name: String,
    },

    /// Print every card of a deck in creation order
    Browse {
        name: String,
    },

    /// Create a deck and enter its cards interactively
    NewDeck {
        name: String,
    },

    /// Append a card to an existing deck
    Add {
        name: String,
        front: String,
        back: String,
    },

    /// Delete a deck with all its cards
    Remove {
        name: String,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Review the cards due today
    Review {
        name: String,
        /// Seed for the card draw (reproducible order)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show or change scheduling settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print current settings
    Show,

    /// Change one or more settings
    Set {
        /// The 21 FSRS weights
        #[arg(long, num_args = 21, allow_negative_numbers = true)]
        fsrs: Option<Vec<f64>>,
        /// Target probability of recall when a card comes due (0-1)
        #[arg(long)]
        desired_retention: Option<f64>,
        /// New cards introduced per day
        #[arg(long)]
        new_cards_per_day: Option<usize>,
        /// Maximum due cards reviewed per day
        #[arg(long)]
        cards_daily_limit: Option<usize>,
    },

    /// Revert all settings to defaults
    Reset,
}

/// Loaded state for one command
struct App {
    storage: Storage,
    params: ParameterSet,
    collection: Collection,
    today: NaiveDate,
}

impl App {
    fn open(data_dir: Option<PathBuf>, forward_days: u64) -> anyhow::Result<Self> {
        let storage = Storage::new(data_dir)?;
        let params = storage.load_settings()?;
        let mut collection = storage.load_collection()?;
        let saved = storage.load_schedule()?;

        let today = Local::now()
            .date_naive()
            .checked_add_days(Days::new(forward_days))
            .context("--forward-days is out of range")?;
        resume_collection(&mut collection, today, &params, saved.as_ref())?;
        tracing::debug!(%today, decks = collection.len(), "Collection opened");

        Ok(Self {
            storage,
            params,
            collection,
            today,
        })
    }

    /// Persist decks together with today's remaining due sets
    fn save(&self) -> anyhow::Result<()> {
        self.storage.save_collection(&self.collection)?;
        self.storage
            .save_schedule(&DailySchedule::capture(&self.collection, self.today, &self.params))?;
        tracing::info!(decks = self.collection.len(), "Collection saved");
        Ok(())
    }

    /// Replace settings wholesale; due sets are redrawn only if the limits changed
    fn replace_settings(&mut self, params: ParameterSet) -> anyhow::Result<()> {
        let current = DailySchedule::capture(&self.collection, self.today, &self.params);
        self.storage.save_settings(&params)?;
        self.params = params;
        resume_collection(&mut self.collection, self.today, &self.params, Some(&current))?;
        self.save()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging goes to stderr; stdout is the interactive UI
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let mut app = App::open(cli.data_dir, cli.forward_days)?;

    match cli.command {
        Commands::Status => run_status(&app),
        Commands::Deck { name } => run_deck(&app, &name),
        Commands::Browse { name } => run_browse(&app, &name),
        Commands::NewDeck { name } => run_new_deck(&mut app, name),
        Commands::Add { name, front, back } => run_add(&mut app, &name, front, back),
        Commands::Remove { name, yes } => run_remove(&mut app, &name, yes),
        Commands::Review { name, seed } => run_review(&mut app, &name, seed),
        Commands::Settings { action } => run_settings(&mut app, action),
    }
}

fn deck_not_found(name: &str) -> StorageError {
    StorageError::DeckNotFound(name.to_string())
}

/// Run status command
fn run_status(app: &App) -> anyhow::Result<()> {
    println!(
        "{} Today is {}.",
        "Clnki".cyan().bold(),
        app.today.to_string().white().bold()
    );
    println!();
    print!("{}", render::status_table(&app.collection));
    Ok(())
}

/// Run deck command
fn run_deck(app: &App, name: &str) -> anyhow::Result<()> {
    let deck = app.collection.deck(name).ok_or_else(|| deck_not_found(name))?;
    print!("{}", render::deck_summary(name, deck));
    Ok(())
}

/// Run browse command
fn run_browse(app: &App, name: &str) -> anyhow::Result<()> {
    let deck = app.collection.deck(name).ok_or_else(|| deck_not_found(name))?;
    print!("{}", render::card_listing(deck));
    Ok(())
}

/// Run new-deck command
fn run_new_deck(app: &mut App, name: String) -> anyhow::Result<()> {
    if app.collection.contains(&name) {
        return Err(StorageError::DeckExists(name).into());
    }

    println!("Creating a deck with title \"{}\"", name.bold());
    println!("{}", "Enter one card at a time. :f finishes (discarding the current card), :e aborts.".dimmed());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    match entry::enter_cards(&mut input, &mut out)? {
        Some(mut deck) => {
            schedule::run(
                &mut deck,
                app.today,
                app.params.cards_daily_limit(),
                app.params.new_cards_per_day(),
            )?;
            let count = deck.len();
            app.collection.insert_deck(name.clone(), deck);
            app.save()?;
            println!("Deck \"{}\" created with {} cards.", name, count);
        }
        None => {
            tracing::debug!(deck = %name, "Deck creation aborted");
            println!("Deck creation aborted.");
        }
    }
    Ok(())
}

/// Run add command
fn run_add(app: &mut App, name: &str, front: String, back: String) -> anyhow::Result<()> {
    let deck = app
        .collection
        .deck_mut(name)
        .ok_or_else(|| deck_not_found(name))?;
    let id = deck.add_card(front, back);
    app.save()?;
    println!("Added card {} to deck \"{}\".", id, name);
    Ok(())
}

/// Run remove command
fn run_remove(app: &mut App, name: &str, yes: bool) -> anyhow::Result<()> {
    let total = app
        .collection
        .deck(name)
        .ok_or_else(|| deck_not_found(name))?
        .len();

    if !yes {
        print!(
            "Are you sure you want to delete deck {} with all its {} cards? (Y/N) ",
            name.bold(),
            total
        );
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if answer.trim() != "Y" {
            println!("Removal cancelled.");
            return Ok(());
        }
    }

    app.collection.remove_deck(name);
    app.save()?;
    println!("Deck {} is removed.", name);
    Ok(())
}

/// Run review command
fn run_review(app: &mut App, name: &str, seed: Option<u64>) -> anyhow::Result<()> {
    let today = app.today;
    let deck = app
        .collection
        .deck_mut(name)
        .ok_or_else(|| deck_not_found(name))?;

    let mut session = match seed {
        Some(seed) => ReviewSession::with_seed(deck, today, seed)?,
        None => ReviewSession::start(deck, today)?,
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let result = review::run(deck, &app.params, &mut session, &mut input, &mut out);

    // Keep whatever progress was made, even if the session failed midway
    app.save()?;

    match result? {
        ReviewEnd::Finished => println!("Review for deck {} finished.", name.bold()),
        ReviewEnd::Stopped => {
            tracing::warn!(deck = name, remaining = session.remaining(), "Review stopped early");
            println!(
                "Review stopped with {} cards left. Progress saved.",
                session.remaining()
            );
        }
    }
    Ok(())
}

/// Run settings command
fn run_settings(app: &mut App, action: SettingsAction) -> anyhow::Result<()> {
    match action {
        SettingsAction::Show => {
            print!("{}", render::settings(&app.params));
        }
        SettingsAction::Set {
            fsrs,
            desired_retention,
            new_cards_per_day,
            cards_daily_limit,
        } => {
            if fsrs.is_none()
                && desired_retention.is_none()
                && new_cards_per_day.is_none()
                && cards_daily_limit.is_none()
            {
                bail!("No setting given; see `clnki settings set --help`");
            }

            let mut params = app.params.clone();
            if let Some(weights) = fsrs {
                params = params.with_weights(&weights)?;
            }
            if let Some(r) = desired_retention {
                params = params.with_desired_retention(r)?;
            }
            if new_cards_per_day.is_some() || cards_daily_limit.is_some() {
                params = params.with_limits(
                    new_cards_per_day.unwrap_or(params.new_cards_per_day()),
                    cards_daily_limit.unwrap_or(params.cards_daily_limit()),
                )?;
            }

            app.replace_settings(params)?;
            println!("Settings updated. The review schedule may have changed.");
        }
        SettingsAction::Reset => {
            app.replace_settings(ParameterSet::default())?;
            println!("Settings reverted to defaults.");
        }
    }
    Ok(())
}
