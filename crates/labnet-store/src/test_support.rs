use chrono::{DateTime, TimeZone, Utc};

use labnet_storage::MemoryStore;

use crate::clock::ManualClock;
use crate::config::StoreConfig;
use crate::store::Store;

pub(crate) fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 10, 9, 0, 0).unwrap()
}

/// A seeded store on an empty in-memory backend and a frozen clock.
pub(crate) fn store() -> (Store<MemoryStore>, ManualClock) {
    store_with(StoreConfig::default())
}

pub(crate) fn store_with(config: StoreConfig) -> (Store<MemoryStore>, ManualClock) {
    let clock = ManualClock::new(start());
    let store = Store::open_with_clock(MemoryStore::new(), config, Box::new(clock.clone()));
    (store, clock)
}
