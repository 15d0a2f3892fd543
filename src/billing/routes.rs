//! Billing route handlers

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::models::VehicleFinancialConfig;
use super::requests::{AvailabilityQuery, PreviewRequest, QuoteRequest};
use super::responses::{AvailabilityResponse, PreviewResponse};
use super::services::{self, Availability, Quote};
use super::BillingError;

/// Billing API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/billing/quote", post(quote))
        .route("/api/billing/preview", post(preview))
        .route("/api/vehicles/:id/availability", get(availability))
        .route("/api/cache/stats", get(cache_stats))
}

/// Quote a stored vehicle: itemized bill plus availability verdict
async fn quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<Quote>> {
    let quote = services::quote_for_vehicle(
        &state.db,
        &state.cache,
        req.vehicle_id,
        req.plan,
        req.pickup,
        req.dropoff,
        req.accessories,
    )
    .await?;

    Ok(Json(quote))
}

/// Compute a bill from inline rate configuration, without the database
async fn preview(Json(req): Json<PreviewRequest>) -> Result<Json<PreviewResponse>> {
    let financial = VehicleFinancialConfig {
        deposit_amount: req.deposit_amount,
        required_payment_percentage: req.required_payment_percentage,
    };

    let (duration, bill) = services::preview_bill(
        &req.rate_plan,
        req.pickup,
        req.dropoff,
        req.accessories,
        &financial,
    )?;

    Ok(Json(PreviewResponse { duration, bill }))
}

/// Availability check only; degrades to `Unverified` on calendar failure
async fn availability(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>> {
    if query.end <= query.start {
        return Err(BillingError::InvalidDuration {
            pickup: query.start,
            dropoff: query.end,
        }
        .into());
    }

    // Confirm the vehicle exists (and warm the cache) before consulting
    // the calendar
    services::get_vehicle_cached(&state.db, &state.cache, vehicle_id).await?;

    let availability =
        match services::check_availability(&state.db, vehicle_id, query.start, query.end).await {
            Ok(a) => a,
            Err(e) => {
                tracing::warn!("availability check failed for vehicle {}: {}", vehicle_id, e);
                Availability::Unverified
            }
        };

    Ok(Json(AvailabilityResponse {
        vehicle_id,
        booking_allowed: availability.booking_allowed(),
        availability,
    }))
}

/// Cache statistics for monitoring
async fn cache_stats(State(state): State<AppState>) -> Json<crate::cache::CacheStats> {
    Json(state.cache.stats())
}
