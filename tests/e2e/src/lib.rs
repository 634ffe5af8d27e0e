//! Clnki End-to-End Test Support
//!
//! Shared harness and fixtures for the journey tests under `tests/`.

pub mod harness;

pub use harness::TestDataDir;
pub use mocks::{DeckFactory, TestClock};
