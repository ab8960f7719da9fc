//! Worker thread that owns the inventory store and serves UI commands.

pub mod commands;
pub mod runtime;
