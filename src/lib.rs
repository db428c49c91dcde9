//! Libris Library Catalog Server
//!
//! A Rust REST API server for managing a library catalog: books, people,
//! and book custody (assign/release).

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validators;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub validators: Arc<validators::Validators>,
}
