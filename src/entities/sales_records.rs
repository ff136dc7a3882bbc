use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

/// Sales record
/// - amount: completed sales, always >= 1
/// - rls_count: reversed / cancelled sales ("RLS"), >= 0
/// - created_by: the admin who recorded it (NULL once that admin is gone)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "sales_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub sale_date: NaiveDate,
    pub amount: i32,
    pub rls_count: i32,
    pub notes: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
