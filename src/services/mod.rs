//! Service layer: credential storage, authentication, fetching, parsing,
//! layout, and rendering.

pub mod authenticator;
pub mod credential_store;
pub mod crypto_service;
pub mod http_transport;
pub mod layout_engine;
pub mod page_parser;
pub mod renderer;
pub mod settings_engine;
pub mod stats_fetcher;
