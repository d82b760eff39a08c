//! TEMPO Gateway - Request façade for the time engine
//!
//! Translates external `{"action": ...}` envelopes into engine calls and
//! formats the resulting state (or error) as a uniform response envelope.
//! The gateway is stateless; all clock state lives in the engine.

pub mod gateway;
pub mod request;
pub mod response;

pub use gateway::*;
pub use request::*;
pub use response::*;
