use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Language;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum PrizeCategory {
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "quarterly")]
    Quarterly,
    #[sea_orm(string_value = "yearly")]
    Yearly,
    #[sea_orm(string_value = "one_off")]
    OneOff,
}

/// Balloon game prize
/// - weight: relative draw weight among active prizes (not normalized, not validated)
/// - value_cents: monetary value in euro cents
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name_de: String,
    pub name_tr: String,
    pub value_cents: i64,
    pub glyph: String,
    pub weight: i32,
    pub is_active: bool,
    pub category: PrizeCategory,
    pub created_at: Option<DateTime<Utc>>,
}

impl Model {
    pub fn localized_name(&self, lang: Language) -> &str {
        match lang {
            Language::De => &self.name_de,
            Language::Tr => &self.name_tr,
        }
    }

    /// Negative weights take part in a draw as zero.
    pub fn draw_weight(&self) -> i64 {
        i64::from(self.weight.max(0))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
