//! TEMPO Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout the TEMPO game clock:
//! - Time primitives (GameTime)
//! - Clock state and snapshots
//! - Change events and the observer trait
//! - Persistence record and store trait
//! - Error taxonomy

pub mod error;
pub mod event;
pub mod state;
pub mod store;
pub mod time;

pub use error::*;
pub use event::*;
pub use state::*;
pub use store::*;
pub use time::*;
