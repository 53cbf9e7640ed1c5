//! Promo Code Repository — definitions, scoping mappings, usage ledger

use super::{RepoError, RepoResult};
use shared::models::{
    PromoCode, PromoCodeCreate, PromoCodeCustomerMapping, PromoCodeRestaurantMapping,
    PromoCodeUsage, UsageTotals,
};
use sqlx::{Executor, Sqlite, SqlitePool};

const PROMO_SELECT: &str = "SELECT id, code, description, discount_type, discount_value, max_discount_amount, min_order_amount, valid_from, valid_until, max_uses_total, max_uses_per_user, max_party_size_total, max_party_size_per_user, eligible_categories, first_order_only, campaign_type, is_active, is_deleted, times_used, party_size_used, created_at, updated_at FROM promo_code";

const USAGE_SELECT: &str = "SELECT id, promo_code_id, customer_id, reservation_id, request_id, original_amount, discount_amount, party_size, applied_by, created_at FROM promo_code_usage";

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<PromoCode>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{} WHERE id = ?", PROMO_SELECT);
    let row = sqlx::query_as::<_, PromoCode>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Lookup by normalized code, constrained to currently-valid promotions.
///
/// `code` must already be uppercase-normalized. Inactive, deleted and
/// out-of-window promotions all fall through to `None` — the caller cannot
/// tell the cases apart, which is intended.
pub async fn find_valid_by_code(
    pool: &SqlitePool,
    code: &str,
    now: i64,
) -> RepoResult<Option<PromoCode>> {
    let sql = format!(
        "{} WHERE code = ?1 AND is_active = 1 AND is_deleted = 0 AND valid_from <= ?2 AND valid_until >= ?2",
        PROMO_SELECT
    );
    let row = sqlx::query_as::<_, PromoCode>(&sql)
        .bind(code)
        .bind(now)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: PromoCodeCreate) -> RepoResult<PromoCode> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let code = data.code.trim().to_uppercase();
    let categories = match &data.eligible_categories {
        Some(list) => Some(
            serde_json::to_string(list)
                .map_err(|e| RepoError::Database(format!("Failed to encode categories: {e}")))?,
        ),
        None => None,
    };
    sqlx::query(
        "INSERT INTO promo_code (id, code, description, discount_type, discount_value, max_discount_amount, min_order_amount, valid_from, valid_until, max_uses_total, max_uses_per_user, max_party_size_total, max_party_size_per_user, eligible_categories, first_order_only, campaign_type, is_active, is_deleted, times_used, party_size_used, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, 1, 0, 0, 0, ?17, ?17)",
    )
    .bind(id)
    .bind(&code)
    .bind(&data.description)
    .bind(data.discount_type)
    .bind(data.discount_value)
    .bind(data.max_discount_amount)
    .bind(data.min_order_amount)
    .bind(data.valid_from)
    .bind(data.valid_until)
    .bind(data.max_uses_total)
    .bind(data.max_uses_per_user)
    .bind(data.max_party_size_total)
    .bind(data.max_party_size_per_user)
    .bind(categories)
    .bind(data.first_order_only)
    .bind(data.campaign_type)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create promo code".into()))
}

// ==================== Scoping mappings ====================

pub async fn add_restaurant_mapping(
    pool: &SqlitePool,
    promo_code_id: i64,
    restaurant_id: i64,
) -> RepoResult<PromoCodeRestaurantMapping> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, PromoCodeRestaurantMapping>(
        "INSERT INTO promo_code_restaurant (id, promo_code_id, restaurant_id, is_active, created_at) \
         VALUES (?1, ?2, ?3, 1, ?4) \
         RETURNING id, promo_code_id, restaurant_id, is_active, created_at",
    )
    .bind(id)
    .bind(promo_code_id)
    .bind(restaurant_id)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn add_customer_mapping(
    pool: &SqlitePool,
    promo_code_id: i64,
    customer_id: i64,
) -> RepoResult<PromoCodeCustomerMapping> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, PromoCodeCustomerMapping>(
        "INSERT INTO promo_code_customer (id, promo_code_id, customer_id, is_active, created_at) \
         VALUES (?1, ?2, ?3, 1, ?4) \
         RETURNING id, promo_code_id, customer_id, is_active, created_at",
    )
    .bind(id)
    .bind(promo_code_id)
    .bind(customer_id)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Whether an active restaurant scoping row exists for this promotion
pub async fn restaurant_mapping_exists(
    pool: &SqlitePool,
    promo_code_id: i64,
    restaurant_id: i64,
) -> RepoResult<bool> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM promo_code_restaurant WHERE promo_code_id = ? AND restaurant_id = ? AND is_active = 1",
    )
    .bind(promo_code_id)
    .bind(restaurant_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0 > 0)
}

pub async fn restaurant_mappings(
    pool: &SqlitePool,
    promo_code_id: i64,
) -> RepoResult<Vec<PromoCodeRestaurantMapping>> {
    let rows = sqlx::query_as::<_, PromoCodeRestaurantMapping>(
        "SELECT id, promo_code_id, restaurant_id, is_active, created_at FROM promo_code_restaurant WHERE promo_code_id = ?",
    )
    .bind(promo_code_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn customer_mappings(
    pool: &SqlitePool,
    promo_code_id: i64,
) -> RepoResult<Vec<PromoCodeCustomerMapping>> {
    let rows = sqlx::query_as::<_, PromoCodeCustomerMapping>(
        "SELECT id, promo_code_id, customer_id, is_active, created_at FROM promo_code_customer WHERE promo_code_id = ?",
    )
    .bind(promo_code_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

// ==================== Usage ledger ====================

/// Append one ledger row. The UNIQUE(promo_code_id, reservation_id)
/// constraint guards the once-per-reservation property.
pub async fn insert_usage<'e, E>(executor: E, usage: &PromoCodeUsage) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO promo_code_usage (id, promo_code_id, customer_id, reservation_id, request_id, original_amount, discount_amount, party_size, applied_by, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )
    .bind(usage.id)
    .bind(usage.promo_code_id)
    .bind(usage.customer_id)
    .bind(usage.reservation_id)
    .bind(usage.request_id)
    .bind(usage.original_amount)
    .bind(usage.discount_amount)
    .bind(usage.party_size)
    .bind(usage.applied_by)
    .bind(usage.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// Bump the running counters: one more use, `party_size` more covers
pub async fn increment_counters<'e, E>(
    executor: E,
    promo_code_id: i64,
    party_size: i64,
) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE promo_code SET times_used = times_used + 1, party_size_used = party_size_used + ?1, updated_at = ?2 WHERE id = ?3",
    )
    .bind(party_size)
    .bind(now)
    .bind(promo_code_id)
    .execute(executor)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Promo code {promo_code_id} not found"
        )));
    }
    Ok(())
}

/// Usage history of one customer against one code, newest first
pub async fn usage_by_customer(
    pool: &SqlitePool,
    promo_code_id: i64,
    customer_id: i64,
) -> RepoResult<Vec<PromoCodeUsage>> {
    let sql = format!(
        "{} WHERE promo_code_id = ? AND customer_id = ? ORDER BY created_at DESC",
        USAGE_SELECT
    );
    let rows = sqlx::query_as::<_, PromoCodeUsage>(&sql)
        .bind(promo_code_id)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Per-customer totals against one code, for per-user ceiling checks
pub async fn usage_totals_for_customer(
    pool: &SqlitePool,
    promo_code_id: i64,
    customer_id: i64,
) -> RepoResult<UsageTotals> {
    let row: (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(party_size), 0) FROM promo_code_usage WHERE promo_code_id = ? AND customer_id = ?",
    )
    .bind(promo_code_id)
    .bind(customer_id)
    .fetch_one(pool)
    .await?;
    Ok(UsageTotals {
        uses: row.0,
        party_size: row.1,
    })
}
