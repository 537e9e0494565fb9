//! ptdash — a terminal dashboard for PT-site and subscription statistics.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod platform;
pub mod services;
pub mod types;
