//! RentRide billing and availability service.
//!
//! The core is a pure rental bill calculator ([`billing::calculators`]);
//! the rest of the crate resolves its inputs from vehicle records and
//! exposes it over a JSON API.

pub mod billing;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

use sqlx::PgPool;

use cache::AppCache;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}
