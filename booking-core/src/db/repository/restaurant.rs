//! Restaurant Repository — restaurant rows, weekly schedule, special closures

use super::{RepoError, RepoResult};
use shared::models::{OperatingHours, Restaurant, RestaurantCreate, SpecialClosure};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let row = sqlx::query_as::<_, Restaurant>(
        "SELECT id, name, total_capacity, online_quota, is_active, created_at, updated_at FROM restaurant WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: RestaurantCreate) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO restaurant (id, name, total_capacity, online_quota, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.total_capacity)
    .bind(data.online_quota)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}

/// Weekly operating-hours entry for one weekday name (MONDAY .. SUNDAY)
pub async fn hours_for_weekday(
    pool: &SqlitePool,
    restaurant_id: i64,
    weekday: &str,
) -> RepoResult<Option<OperatingHours>> {
    let row = sqlx::query_as::<_, OperatingHours>(
        "SELECT id, restaurant_id, weekday, open_time, close_time, is_closed FROM operating_hours WHERE restaurant_id = ? AND weekday = ?",
    )
    .bind(restaurant_id)
    .bind(weekday)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Upsert the schedule entry for one weekday
pub async fn set_hours(
    pool: &SqlitePool,
    restaurant_id: i64,
    weekday: &str,
    open_time: &str,
    close_time: &str,
    is_closed: bool,
) -> RepoResult<OperatingHours> {
    let id = shared::util::snowflake_id();
    let row = sqlx::query_as::<_, OperatingHours>(
        "INSERT INTO operating_hours (id, restaurant_id, weekday, open_time, close_time, is_closed) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
         ON CONFLICT(restaurant_id, weekday) DO UPDATE SET \
             open_time = excluded.open_time, \
             close_time = excluded.close_time, \
             is_closed = excluded.is_closed \
         RETURNING id, restaurant_id, weekday, open_time, close_time, is_closed",
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(weekday)
    .bind(open_time)
    .bind(close_time)
    .bind(is_closed)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn add_closure(
    pool: &SqlitePool,
    restaurant_id: i64,
    start_date: &str,
    end_date: &str,
    reason: Option<&str>,
) -> RepoResult<SpecialClosure> {
    let id = shared::util::snowflake_id();
    let row = sqlx::query_as::<_, SpecialClosure>(
        "INSERT INTO special_closure (id, restaurant_id, start_date, end_date, reason) \
         VALUES (?1, ?2, ?3, ?4, ?5) \
         RETURNING id, restaurant_id, start_date, end_date, reason",
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(start_date)
    .bind(end_date)
    .bind(reason)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Special closures covering the given date, bounds inclusive.
///
/// ISO dates compare correctly as strings.
pub async fn closures_covering(
    pool: &SqlitePool,
    restaurant_id: i64,
    date: &str,
) -> RepoResult<Vec<SpecialClosure>> {
    let rows = sqlx::query_as::<_, SpecialClosure>(
        "SELECT id, restaurant_id, start_date, end_date, reason FROM special_closure WHERE restaurant_id = ? AND start_date <= ? AND end_date >= ?",
    )
    .bind(restaurant_id)
    .bind(date)
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
