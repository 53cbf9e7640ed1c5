//! Capacity Repository — the seat ledger
//!
//! `set_booked_seats` is a bare absolute assignment: no version check, no
//! bounds. Storage stays policy-free; business validation happens above.

use super::{RepoError, RepoResult};
use shared::models::{ServiceCapacity, ServiceCapacityCreate};
use sqlx::SqlitePool;

const CAPACITY_SELECT: &str = "SELECT id, restaurant_id, meal_service_id, capacity_date, total_seats, booked_seats, is_enabled FROM service_capacity";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ServiceCapacity>> {
    let sql = format!("{} WHERE id = ?", CAPACITY_SELECT);
    let row = sqlx::query_as::<_, ServiceCapacity>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Enabled capacity record for one meal service + date.
///
/// A disabled record behaves as absent.
pub async fn find_for_date(
    pool: &SqlitePool,
    meal_service_id: i64,
    date: &str,
) -> RepoResult<Option<ServiceCapacity>> {
    let sql = format!(
        "{} WHERE meal_service_id = ? AND capacity_date = ? AND is_enabled = 1",
        CAPACITY_SELECT
    );
    let row = sqlx::query_as::<_, ServiceCapacity>(&sql)
        .bind(meal_service_id)
        .bind(date)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: ServiceCapacityCreate) -> RepoResult<ServiceCapacity> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO service_capacity (id, restaurant_id, meal_service_id, capacity_date, total_seats, booked_seats, is_enabled) VALUES (?1, ?2, ?3, ?4, ?5, 0, 1)",
    )
    .bind(id)
    .bind(data.restaurant_id)
    .bind(data.meal_service_id)
    .bind(&data.capacity_date)
    .bind(data.total_seats)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create capacity record".into()))
}

/// Absolute assignment of `booked_seats`, last write wins.
///
/// The caller may legally set a negative or over-capacity value.
pub async fn set_booked_seats(
    pool: &SqlitePool,
    capacity_id: i64,
    booked_seats: i64,
) -> RepoResult<ServiceCapacity> {
    let rows = sqlx::query("UPDATE service_capacity SET booked_seats = ? WHERE id = ?")
        .bind(booked_seats)
        .bind(capacity_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Capacity record {capacity_id} not found"
        )));
    }
    find_by_id(pool, capacity_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Capacity record {capacity_id} not found")))
}
