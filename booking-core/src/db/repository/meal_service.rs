//! Meal Service Repository

use super::{RepoError, RepoResult};
use shared::models::{MealCategory, MealService, MealServiceCreate};
use sqlx::SqlitePool;

const MEAL_SERVICE_SELECT: &str = "SELECT id, restaurant_id, category, start_time, end_time, is_active, net_price_per_head, gross_price_per_head, tax_pct, service_charge_pct, created_at, updated_at FROM meal_service";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MealService>> {
    let sql = format!("{} WHERE id = ?", MEAL_SERVICE_SELECT);
    let row = sqlx::query_as::<_, MealService>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Active service for one restaurant + meal category
pub async fn find_active(
    pool: &SqlitePool,
    restaurant_id: i64,
    category: MealCategory,
) -> RepoResult<Option<MealService>> {
    let sql = format!(
        "{} WHERE restaurant_id = ? AND category = ? AND is_active = 1 LIMIT 1",
        MEAL_SERVICE_SELECT
    );
    let row = sqlx::query_as::<_, MealService>(&sql)
        .bind(restaurant_id)
        .bind(category)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: MealServiceCreate) -> RepoResult<MealService> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO meal_service (id, restaurant_id, category, start_time, end_time, is_active, net_price_per_head, gross_price_per_head, tax_pct, service_charge_pct, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7, ?8, ?9, ?10, ?10)",
    )
    .bind(id)
    .bind(data.restaurant_id)
    .bind(data.category)
    .bind(&data.start_time)
    .bind(&data.end_time)
    .bind(data.net_price_per_head)
    .bind(data.gross_price_per_head)
    .bind(data.tax_pct)
    .bind(data.service_charge_pct)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create meal service".into()))
}

/// Soft-disable a service (it stops matching `find_active`)
pub async fn deactivate(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE meal_service SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
