//! Seed helpers shared by the service tests.

use crate::entities::{
    PrizeCategory, Role, period_champion_entity as champions, prize_entity as prizes,
    prize_win_entity as wins, sales_record_entity as sales, user_entity as users,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

pub async fn insert_user(
    pool: &DatabaseConnection,
    username: &str,
    role: Role,
    approved: bool,
) -> users::Model {
    users::ActiveModel {
        username: Set(username.to_string()),
        email: Set(None),
        // not a real hash; these accounts never log in
        password_hash: Set("x".to_string()),
        full_name: Set(format!("{username} full")),
        is_approved: Set(approved),
        role: Set(role),
        profile_color: Set("#3B82F6".to_string()),
        created_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(pool)
    .await
    .expect("insert user")
}

pub async fn insert_sale(
    pool: &DatabaseConnection,
    user_id: i64,
    (year, month, day): (i32, u32, u32),
    amount: i32,
    rls_count: i32,
) -> sales::Model {
    sales::ActiveModel {
        user_id: Set(user_id),
        sale_date: Set(NaiveDate::from_ymd_opt(year, month, day).expect("valid date")),
        amount: Set(amount),
        rls_count: Set(rls_count),
        notes: Set(None),
        created_by: Set(None),
        created_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(pool)
    .await
    .expect("insert sale")
}

pub async fn insert_prize(
    pool: &DatabaseConnection,
    name: &str,
    weight: i32,
    active: bool,
) -> prizes::Model {
    prizes::ActiveModel {
        name_de: Set(format!("{name} (de)")),
        name_tr: Set(format!("{name} (tr)")),
        value_cents: Set(1000),
        glyph: Set("🎁".to_string()),
        weight: Set(weight),
        is_active: Set(active),
        category: Set(PrizeCategory::Monthly),
        created_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(pool)
    .await
    .expect("insert prize")
}

pub async fn insert_grant(
    pool: &DatabaseConnection,
    user_id: i64,
    year: i32,
    month: i32,
) -> champions::Model {
    champions::ActiveModel {
        user_id: Set(user_id),
        year: Set(year),
        month: Set(month),
        winner_type: Set("sales".to_string()),
        draw_consumed: Set(false),
        created_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(pool)
    .await
    .expect("insert grant")
}

pub async fn count_sales(pool: &DatabaseConnection) -> u64 {
    sales::Entity::find().count(pool).await.expect("count sales")
}

pub async fn count_wins(pool: &DatabaseConnection) -> u64 {
    wins::Entity::find().count(pool).await.expect("count wins")
}

pub async fn count_grants(pool: &DatabaseConnection) -> u64 {
    champions::Entity::find().count(pool).await.expect("count grants")
}
