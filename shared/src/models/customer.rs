//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity, unique by phone number
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Upsert customer payload — insert-or-update keyed on the unique phone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerUpsert {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}
