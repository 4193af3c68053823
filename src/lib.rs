pub mod card;
pub mod config;
pub mod fetch;
pub mod fonts;
pub mod handlers;
pub mod models;
pub mod svg;
pub mod theme;

use std::sync::Arc;

use anyhow::Result;
use axum::extract::FromRef;

use crate::{config::Config, fetch::MediaFetcher};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fetcher: MediaFetcher,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = MediaFetcher::new(&config.fetch)?;
        Ok(Self { config: Arc::new(config), fetcher })
    }
}
