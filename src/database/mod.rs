//! SQLite storage layer for ptdash.

pub mod connection;
pub mod migrations;
