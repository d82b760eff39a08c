//! TEMPO Store - Durable persistence for the game clock
//!
//! Implements `ClockStore` over a single JSON file using atomic replacement:
//! the record is written to a sibling temporary path and renamed over the
//! target, so a crash mid-write leaves the previous good record intact.

pub mod file;

pub use file::*;
