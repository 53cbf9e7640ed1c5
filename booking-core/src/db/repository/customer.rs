//! Customer Repository

use super::RepoResult;
use shared::models::{Customer, CustomerUpsert};
use sqlx::SqlitePool;

const CUSTOMER_SELECT: &str =
    "SELECT id, name, phone, email, created_at, updated_at FROM customer";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{} WHERE id = ?", CUSTOMER_SELECT);
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_phone(pool: &SqlitePool, phone: &str) -> RepoResult<Option<Customer>> {
    let sql = format!("{} WHERE phone = ?", CUSTOMER_SELECT);
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(phone)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert-or-update keyed on the unique phone column.
///
/// Conflict resolution is the storage layer's: two concurrent upserts with
/// the same phone converge to one row without surfacing a conflict.
pub async fn upsert_by_phone(pool: &SqlitePool, data: CustomerUpsert) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let row = sqlx::query_as::<_, Customer>(
        "INSERT INTO customer (id, name, phone, email, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
         ON CONFLICT(phone) DO UPDATE SET \
             name = excluded.name, \
             email = COALESCE(excluded.email, customer.email), \
             updated_at = excluded.updated_at \
         RETURNING id, name, phone, email, created_at, updated_at",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
