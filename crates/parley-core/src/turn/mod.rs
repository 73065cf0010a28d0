//! Turn controller
//!
//! Drives one user turn through as many tool-call rounds as the model needs,
//! bounded by a per-turn invocation limit.

pub mod controller;
pub mod outcome;


pub use controller::{TurnController, TurnSettings};
pub use outcome::{PendingApproval, TurnOutcome};
