//! TEMPO Time Engine - Simulated clock control
//!
//! This crate implements the Time Engine:
//! - Lazy settlement against a monotonic clock source
//! - Dilation, pause/resume, jump, advance/rewind, reset
//! - Synchronous observer fan-out outside the state lock
//! - Best-effort persistence after every mutation

pub mod clock;
pub mod engine;
pub mod notify;

pub use clock::*;
pub use engine::*;
pub use notify::*;
