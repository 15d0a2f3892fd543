//! In-memory caching using moka
//!
//! Vehicle records (including their rate-plan documents) change rarely, so
//! a short TTL keeps quotes fast without letting stale rates linger. Bills
//! are never cached: every quote recomputes from scratch.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::models::Vehicle;

/// Application cache holding vehicle records
#[derive(Clone)]
pub struct AppCache {
    /// Vehicles (id -> Vehicle)
    pub vehicles: Cache<Uuid, Arc<Vehicle>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Vehicles: 1000 entries, 10 min TTL, 5 min idle
            vehicles: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(10 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            vehicles_size: self.vehicles.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.vehicles.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate a specific vehicle, e.g. after a rate change
    pub async fn invalidate_vehicle(&self, vehicle_id: Uuid) {
        self.vehicles.invalidate(&vehicle_id).await;
        info!("Cache invalidated for vehicle: {}", vehicle_id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub vehicles_size: u64,
}
