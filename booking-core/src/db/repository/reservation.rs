//! Reservation Repository — pending requests and confirmed reservations
//!
//! Functions used inside the confirmation / usage-recording transactions are
//! generic over the executor so they run against either the pool or an open
//! transaction.

use super::{RepoError, RepoResult};
use shared::models::{
    BookingChannel, MealCategory, Reservation, ReservationFinancial, ReservationRequest,
};
use sqlx::{Executor, Sqlite, SqlitePool};

const REQUEST_SELECT: &str = "SELECT id, restaurant_id, customer_id, meal_category, reservation_date, reservation_time, adult_count, child_count, channel, estimated_net_amount, estimated_tax_amount, estimated_service_charge, estimated_discount_amount, estimated_total_amount, promo_code_id, status, created_at, completed_at FROM reservation_request";

const RESERVATION_SELECT: &str = "SELECT id, request_id, restaurant_id, customer_id, reservation_number, meal_category, reservation_date, reservation_time, adult_count, child_count, channel, status, total_amount, advance_payment_amount, remaining_payment_amount, applied_promo_code_id, applied_discount_amount, created_at FROM reservation";

const FINANCIAL_SELECT: &str = "SELECT id, reservation_id, net_price, tax_amount, service_charge, discount_amount, total_before_discount, total_after_discount, advance_payment, balance_due, is_paid, created_at FROM reservation_financial";

// ==================== Requests ====================

pub async fn find_request<'e, E>(executor: E, id: i64) -> RepoResult<Option<ReservationRequest>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{} WHERE id = ?", REQUEST_SELECT);
    let row = sqlx::query_as::<_, ReservationRequest>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Insert a fully-built request row (id and timestamps already assigned)
pub async fn insert_request(
    pool: &SqlitePool,
    request: &ReservationRequest,
) -> RepoResult<ReservationRequest> {
    sqlx::query(
        "INSERT INTO reservation_request (id, restaurant_id, customer_id, meal_category, reservation_date, reservation_time, adult_count, child_count, channel, estimated_net_amount, estimated_tax_amount, estimated_service_charge, estimated_discount_amount, estimated_total_amount, promo_code_id, status, created_at, completed_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
    )
    .bind(request.id)
    .bind(request.restaurant_id)
    .bind(request.customer_id)
    .bind(request.meal_category)
    .bind(&request.reservation_date)
    .bind(&request.reservation_time)
    .bind(request.adult_count)
    .bind(request.child_count)
    .bind(request.channel)
    .bind(request.estimated_net_amount)
    .bind(request.estimated_tax_amount)
    .bind(request.estimated_service_charge)
    .bind(request.estimated_discount_amount)
    .bind(request.estimated_total_amount)
    .bind(request.promo_code_id)
    .bind(request.status)
    .bind(request.created_at)
    .bind(request.completed_at)
    .execute(pool)
    .await?;
    find_request(pool, request.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation request".into()))
}

/// Flip a request to COMPLETED and stamp the completion time
pub async fn complete_request<'e, E>(executor: E, id: i64, completed_at: i64) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE reservation_request SET status = 'COMPLETED', completed_at = ? WHERE id = ?",
    )
    .bind(completed_at)
    .bind(id)
    .execute(executor)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Reservation request {id} not found"
        )));
    }
    Ok(())
}

// ==================== Reservations ====================

pub async fn find_reservation_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Reservation>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{} WHERE id = ?", RESERVATION_SELECT);
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// The reservation materialized from a request, if any — the idempotency probe
pub async fn find_reservation_by_request<'e, E>(
    executor: E,
    request_id: i64,
) -> RepoResult<Option<Reservation>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{} WHERE request_id = ?", RESERVATION_SELECT);
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(request_id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub async fn insert_reservation<'e, E>(executor: E, reservation: &Reservation) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO reservation (id, request_id, restaurant_id, customer_id, reservation_number, meal_category, reservation_date, reservation_time, adult_count, child_count, channel, status, total_amount, advance_payment_amount, remaining_payment_amount, applied_promo_code_id, applied_discount_amount, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
    )
    .bind(reservation.id)
    .bind(reservation.request_id)
    .bind(reservation.restaurant_id)
    .bind(reservation.customer_id)
    .bind(&reservation.reservation_number)
    .bind(reservation.meal_category)
    .bind(&reservation.reservation_date)
    .bind(&reservation.reservation_time)
    .bind(reservation.adult_count)
    .bind(reservation.child_count)
    .bind(reservation.channel)
    .bind(reservation.status)
    .bind(reservation.total_amount)
    .bind(reservation.advance_payment_amount)
    .bind(reservation.remaining_payment_amount)
    .bind(reservation.applied_promo_code_id)
    .bind(reservation.applied_discount_amount)
    .bind(reservation.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_financial<'e, E>(
    executor: E,
    financial: &ReservationFinancial,
) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO reservation_financial (id, reservation_id, net_price, tax_amount, service_charge, discount_amount, total_before_discount, total_after_discount, advance_payment, balance_due, is_paid, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
    )
    .bind(financial.id)
    .bind(financial.reservation_id)
    .bind(financial.net_price)
    .bind(financial.tax_amount)
    .bind(financial.service_charge)
    .bind(financial.discount_amount)
    .bind(financial.total_before_discount)
    .bind(financial.total_after_discount)
    .bind(financial.advance_payment)
    .bind(financial.balance_due)
    .bind(financial.is_paid)
    .bind(financial.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn find_financial(
    pool: &SqlitePool,
    reservation_id: i64,
) -> RepoResult<Option<ReservationFinancial>> {
    let sql = format!("{} WHERE reservation_id = ?", FINANCIAL_SELECT);
    let row = sqlx::query_as::<_, ReservationFinancial>(&sql)
        .bind(reservation_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Decrement the outstanding balance by the discount and stamp the applied
/// promotion. First write of the usage-recording transaction.
pub async fn apply_promo_discount<'e, E>(
    executor: E,
    reservation_id: i64,
    promo_code_id: i64,
    discount_amount: f64,
) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE reservation SET remaining_payment_amount = remaining_payment_amount - ?1, applied_promo_code_id = ?2, applied_discount_amount = ?3 WHERE id = ?4",
    )
    .bind(discount_amount)
    .bind(promo_code_id)
    .bind(discount_amount)
    .bind(reservation_id)
    .execute(executor)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Reservation {reservation_id} not found"
        )));
    }
    Ok(())
}

// ==================== Aggregates ====================

/// Confirmed covers (adults + children) for one channel on a date + category,
/// excluding cancelled and rejected reservations.
pub async fn channel_covers(
    pool: &SqlitePool,
    restaurant_id: i64,
    date: &str,
    category: MealCategory,
    channel: BookingChannel,
) -> RepoResult<i64> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COALESCE(SUM(adult_count + child_count), 0) FROM reservation \
         WHERE restaurant_id = ?1 AND reservation_date = ?2 AND meal_category = ?3 \
           AND channel = ?4 AND status NOT IN ('CANCELLED', 'REJECTED')",
    )
    .bind(restaurant_id)
    .bind(date)
    .bind(category)
    .bind(channel)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Non-cancelled reservation count for one customer (first-order-only policy)
pub async fn count_customer_reservations(pool: &SqlitePool, customer_id: i64) -> RepoResult<i64> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM reservation WHERE customer_id = ? AND status NOT IN ('CANCELLED', 'REJECTED')",
    )
    .bind(customer_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}
