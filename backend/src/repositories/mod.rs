//! Persistence
//!
//! Provides the key-value store backends and the tracker repository on top.

pub mod store;
pub mod tracker;

pub use store::{KeyValueStore, MemoryStore, RedisStore};
pub use tracker::TrackerRepository;
