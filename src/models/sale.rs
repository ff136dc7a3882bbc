use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{sales_record_entity, user_entity};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    pub user_id: i64,
    #[schema(example = "2025-03-14")]
    pub sale_date: String, // YYYY-MM-DD
    #[schema(example = 3)]
    pub amount: i32,
    /// Cancelled / reversed sales
    #[schema(example = 0)]
    pub rls_count: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SaleQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaleResponse {
    pub id: i64,
    pub user_id: i64,
    /// Display name of the employee, empty if the account is gone
    pub full_name: String,
    pub sale_date: NaiveDate,
    pub amount: i32,
    pub rls_count: i32,
    pub notes: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<(sales_record_entity::Model, Option<user_entity::Model>)> for SaleResponse {
    fn from((m, owner): (sales_record_entity::Model, Option<user_entity::Model>)) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            full_name: owner.map(|u| u.full_name).unwrap_or_default(),
            sale_date: m.sale_date,
            amount: m.amount,
            rls_count: m.rls_count,
            notes: m.notes,
            created_by: m.created_by,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
