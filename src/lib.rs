//! Commentary
//!
//! In-memory comment board with sentiment tags. This module exports the
//! stores, services and console for the binary and for tests.

pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod models;
pub mod security;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};
pub use store::{CommentStore, UserStore};

/// Application state handed to every service call
#[derive(Debug, Clone)]
pub struct AppState {
    pub users: UserStore,
    pub comments: CommentStore,
    pub config: Config,
}

impl AppState {
    /// Create empty stores sized from the configuration
    pub fn new(config: Config) -> Self {
        Self {
            users: UserStore::new(config.store_capacity),
            comments: CommentStore::new(config.store_capacity),
            config,
        }
    }
}
