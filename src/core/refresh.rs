use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{hours_after, start_of_utc_hour};

/// Seconds past the UTC hour boundary before the refresh fires.
pub const REFRESH_GRACE_SECONDS: i64 = 1;

/// One pending single-shot hourly refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefreshTicket {
    pub generation: u64,
    pub due_at: DateTime<Utc>,
}

impl RefreshTicket {
    /// Time left until the ticket is due; zero once it has passed.
    #[must_use]
    pub fn wait_duration(self, now: DateTime<Utc>) -> Duration {
        (self.due_at - now).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Self-rescheduling hourly refresh.
///
/// Each ticket is derived from wall-clock time, so drift never accumulates.
/// Cancelling bumps the generation and turns outstanding tickets stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshSchedule {
    generation: u64,
    pending: Option<RefreshTicket>,
}

#[must_use]
pub fn next_refresh_at(now: DateTime<Utc>) -> DateTime<Utc> {
    hours_after(start_of_utc_hour(now), 1) + TimeDelta::seconds(REFRESH_GRACE_SECONDS)
}

impl RefreshSchedule {
    #[must_use]
    pub fn pending(&self) -> Option<RefreshTicket> {
        self.pending
    }

    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    /// Cancels any pending ticket and issues a new one.
    pub fn reschedule(&mut self, now: DateTime<Utc>) -> RefreshTicket {
        self.cancel();
        let ticket = RefreshTicket {
            generation: self.generation,
            due_at: next_refresh_at(now),
        };
        self.pending = Some(ticket);
        ticket
    }

    #[must_use]
    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        self.pending == Some(ticket)
    }
}
