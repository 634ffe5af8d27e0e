//! Journey Tests
//!
//! Complete user workflows across several simulated days:
//! - daily_review: schedule, review, come back when cards are due
//! - persistence_round_trip: save, reopen, hand-edited documents
//! - settings_reschedule: settings changes feeding into the next schedule

mod persistence_round_trip;
mod settings_reschedule;
