//! Time source and id stamping.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Clones share the same time, so a
/// test can keep a handle after giving one to the store.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: DateTime<Utc>) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Issues strictly increasing millisecond timestamps.
///
/// Entity ids are derived from these timestamps, so two entities created
/// within the same millisecond (or after the clock went backwards) still
/// get distinct ids and a well-defined order.
pub struct Timeline {
    clock: Box<dyn Clock>,
    last: Option<DateTime<Utc>>,
}

impl Timeline {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self { clock, last: None }
    }

    /// Make every later stamp strictly newer than `instant`.
    pub fn resume_after(&mut self, instant: DateTime<Utc>) {
        let instant = truncate_to_millis(instant);
        if self.last.map_or(true, |last| instant > last) {
            self.last = Some(instant);
        }
    }

    /// Current clock time, without issuing a stamp.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Next stamp: the current time, or one millisecond after the previous
    /// stamp if the clock has not moved past it.
    pub fn next(&mut self) -> DateTime<Utc> {
        let now = truncate_to_millis(self.clock.now());
        let stamp = match self.last {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline").field("last", &self.last).finish()
    }
}

/// `<prefix>-<unix millis>`.
#[must_use]
pub fn stamp_id(prefix: &str, stamp: DateTime<Utc>) -> String {
    format!("{prefix}-{}", stamp.timestamp_millis())
}

fn truncate_to_millis(t: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(t.timestamp_millis()).unwrap_or(t)
}
