//! CLI subcommand implementations.

pub mod balance;
pub mod check;
pub mod report;
pub mod scan;
