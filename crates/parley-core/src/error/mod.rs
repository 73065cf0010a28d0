//! Error types for Parley
//!
//! Every failure that can end a turn abnormally is a [`ParleyError`]. Tool
//! execution failures are not errors at this level: they are folded into the
//! conversation as tool results so the model can react to them.

mod constructors;
mod types;

pub use types::{ParleyError, ParleyResult};
