//! CLI subcommand implementations.

pub mod chart;
pub mod events;
pub mod table;
pub mod util;
