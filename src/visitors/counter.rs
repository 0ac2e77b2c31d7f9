// src/visitors/counter.rs
// =============================================================================
// Best-effort visitor counter.
//
// Two keys in two stores:
// - "site_visitor_count" in the durable store: the running total
// - "hasVisitedSession" in the session store: set once this session counted
//
// First look in a session -> total + 1, persisted, flag set.
// Any later look in the same session -> total unchanged.
// No total yet (or 0, or garbage) -> start from 500.
//
// Storage problems never stop the program: an unreadable value counts as
// absent and a failed write only logs a warning. The count shown is then
// correct for this run but not remembered.
// =============================================================================

use num_format::{Locale, ToFormattedString};
use tracing::{debug, warn};

use super::store::KeyValueStore;

pub const DURABLE_KEY: &str = "site_visitor_count";
pub const SESSION_KEY: &str = "hasVisitedSession";

/// Starting total when nothing has been stored yet
pub const SEED_COUNT: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitorCount(u64);

impl VisitorCount {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// With thousands separators, e.g. "1,234"
    pub fn formatted(&self) -> String {
        self.0.to_formatted_string(&Locale::en)
    }
}

// Counts this session (at most once) and returns the total to display
pub fn record_visit(
    durable: &mut dyn KeyValueStore,
    session: &mut dyn KeyValueStore,
) -> VisitorCount {
    let mut count = read_count(durable);

    let new_session = match session.get(SESSION_KEY) {
        Ok(flag) => flag.is_none(),
        Err(err) => {
            warn!(error = %err, "session store unreadable, treating as new session");
            true
        }
    };

    if new_session {
        count = count.saturating_add(1);

        if let Err(err) = durable.set(DURABLE_KEY, &count.to_string()) {
            warn!(error = %err, "could not persist visitor count");
        }
        if let Err(err) = session.set(SESSION_KEY, "true") {
            warn!(error = %err, "could not mark session as counted");
        }
        debug!(count, "counted new session");
    }

    VisitorCount::new(count)
}

/// The stored total without counting anything
pub fn peek(durable: &dyn KeyValueStore) -> VisitorCount {
    VisitorCount::new(read_count(durable))
}

fn read_count(durable: &dyn KeyValueStore) -> u64 {
    let stored = match durable.get(DURABLE_KEY) {
        Ok(value) => value.and_then(|raw| raw.trim().parse::<u64>().ok()),
        Err(err) => {
            warn!(error = %err, "visitor count unreadable, reseeding");
            None
        }
    };

    match stored {
        Some(count) if count > 0 => count,
        _ => SEED_COUNT,
    }
}
