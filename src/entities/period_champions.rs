use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Champion grant for one (user, year, month).
/// `draw_consumed` flips to true exactly once, when the user plays the balloon game.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "period_champions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub year: i32,
    pub month: i32,
    pub winner_type: String,
    pub draw_consumed: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
