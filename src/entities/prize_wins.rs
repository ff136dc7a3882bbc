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
pub enum PeriodType {
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "quarterly")]
    Quarterly,
    #[sea_orm(string_value = "yearly")]
    Yearly,
}

/// Draw outcome, written once by the reward draw and never touched again.
/// Prize name / value / glyph are a snapshot taken at draw time; `prize_id`
/// becomes NULL when the prize is later deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "prize_wins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub prize_id: Option<i64>,
    pub prize_name_de: String,
    pub prize_name_tr: String,
    pub value_cents: i64,
    pub glyph: String,
    pub period_type: PeriodType,
    pub period_year: i32,
    pub period_month: i32,
    pub won_at: Option<DateTime<Utc>>,
}

impl Model {
    pub fn localized_name(&self, lang: Language) -> &str {
        match lang {
            Language::De => &self.prize_name_de,
            Language::Tr => &self.prize_name_tr,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
