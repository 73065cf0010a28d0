//! Subcommand implementations

pub mod chat;
