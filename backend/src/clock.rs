//! Wall-clock access
//!
//! Handlers never read the system time directly; they ask the [`Clock`] in
//! the application state so tests can pin "now".

use chrono::{DateTime, FixedOffset, Utc};
use std::sync::Arc;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Current instant in the user's calendar offset
pub fn local_now(clock: &Arc<dyn Clock>, offset: FixedOffset) -> DateTime<FixedOffset> {
    clock.now().with_timezone(&offset)
}
