//! Shared types for ptdash: error enums, settings, snapshots, credentials.

pub mod credential;
pub mod errors;
pub mod settings;
pub mod snapshot;
