//! Database queries for vehicles and bookings.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Booking, Vehicle};

/// Get a bookable vehicle by id
pub async fn get_vehicle(pool: &PgPool, vehicle_id: Uuid) -> Result<Vehicle> {
    let vehicle = sqlx::query_as::<_, Vehicle>(
        r#"
        SELECT
            id,
            display_name,
            vehicle_type,
            rate_plans,
            deposit_amount,
            required_payment_percentage,
            active,
            deleted_at
        FROM rentals_vehicle
        WHERE id = $1
          AND active = TRUE
          AND deleted_at IS NULL
        "#,
    )
    .bind(vehicle_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(vehicle)
}

/// Find the earliest booking that overlaps the requested window.
///
/// Only confirmed/active bookings block the calendar. Returns `None` when
/// the window is clear.
pub async fn find_overlapping_booking(
    pool: &PgPool,
    vehicle_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> std::result::Result<Option<Booking>, sqlx::Error> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        SELECT
            id,
            vehicle_id,
            start_time,
            end_time,
            status,
            deleted_at
        FROM rentals_booking
        WHERE vehicle_id = $1
          AND status = ANY($2)
          AND start_time < $4
          AND end_time > $3
          AND deleted_at IS NULL
        ORDER BY end_time ASC
        LIMIT 1
        "#,
    )
    .bind(vehicle_id)
    .bind(crate::models::BLOCKING_STATUSES.to_vec())
    .bind(start)
    .bind(end)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}
