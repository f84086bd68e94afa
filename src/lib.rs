//! Petition Client
//!
//! A typed async client for the petition crowdfunding REST API: searching and
//! browsing petitions, creating and editing them as compensated multi-step
//! flows, supporting tiers, and account management with a persisted session.

pub mod api;
pub mod config;
pub mod draft;
pub mod errors;
pub mod flows;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod search;
pub mod session;
pub mod validation;
pub mod views;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use api::ApiClient;
pub use config::ClientConfig;
pub use errors::{ClientError, ValidationError};
pub use session::{Credentials, MemoryStorage, Session, SessionStorage, SqliteStorage};

/// Install the global tracing subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &ClientConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests;
