use crate::entities::{PrizeCategory, prize_entity as prizes, prize_win_entity as wins};
use crate::error::{AppError, AppResult};
use crate::models::{CreatePrizeRequest, PrizeResponse};
use crate::services::ensure_admin;
use crate::utils::require_text;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

const DEFAULT_GLYPH: &str = "🎁";
const DEFAULT_WEIGHT: i32 = 10;

#[derive(Clone)]
pub struct PrizeService {
    pool: DatabaseConnection,
}

impl PrizeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Every prize, active or not
    pub async fn list_prizes(&self, actor_id: i64) -> AppResult<Vec<PrizeResponse>> {
        ensure_admin(&self.pool, actor_id).await?;

        let list = prizes::Entity::find()
            .order_by_desc(prizes::Column::IsActive)
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn create_prize(
        &self,
        actor_id: i64,
        request: CreatePrizeRequest,
    ) -> AppResult<PrizeResponse> {
        ensure_admin(&self.pool, actor_id).await?;

        let name_de = require_text("name_de", &request.name_de, 100)?;
        let name_tr = require_text("name_tr", &request.name_tr, 100)?;
        if request.value_cents < 0 {
            return Err(AppError::ValidationError(
                "value_cents must not be negative".to_string(),
            ));
        }
        let glyph = match request.glyph.as_deref() {
            Some(g) if !g.trim().is_empty() => require_text("glyph", g, 8)?,
            _ => DEFAULT_GLYPH.to_string(),
        };

        let created = prizes::ActiveModel {
            name_de: Set(name_de),
            name_tr: Set(name_tr),
            value_cents: Set(request.value_cents),
            glyph: Set(glyph),
            weight: Set(request.weight.unwrap_or(DEFAULT_WEIGHT)),
            is_active: Set(true),
            category: Set(request.category.unwrap_or(PrizeCategory::Monthly)),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Prize {} ({}) created by {actor_id}", created.id, created.name_de);
        Ok(created.into())
    }

    /// Flips `is_active`; inactive prizes stay out of every draw.
    pub async fn toggle_prize(&self, actor_id: i64, prize_id: i64) -> AppResult<PrizeResponse> {
        ensure_admin(&self.pool, actor_id).await?;

        let prize = prizes::Entity::find_by_id(prize_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Prize not found".to_string()))?;

        let active = !prize.is_active;
        let mut am = prize.into_active_model();
        am.is_active = Set(active);
        let updated = am.update(&self.pool).await?;

        log::info!("Prize {} set active={active} by {actor_id}", updated.id);
        Ok(updated.into())
    }

    /// Deletes a prize. Past wins keep their name and value snapshot and
    /// lose only the reference.
    pub async fn delete_prize(&self, actor_id: i64, prize_id: i64) -> AppResult<()> {
        ensure_admin(&self.pool, actor_id).await?;

        let txn = self.pool.begin().await?;

        let prize = prizes::Entity::find_by_id(prize_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Prize not found".to_string()))?;

        wins::Entity::update_many()
            .col_expr(wins::Column::PrizeId, Expr::value(Option::<i64>::None))
            .filter(wins::Column::PrizeId.eq(prize.id))
            .exec(&txn)
            .await?;

        prizes::Entity::delete_by_id(prize.id).exec(&txn).await?;

        txn.commit().await?;

        log::info!("Prize {} ({}) deleted by {actor_id}", prize.id, prize.name_de);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::entities::Role;
    use crate::models::Language;
    use crate::services::RewardService;
    use crate::services::test_support::*;
    use crate::utils::Period;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn request(name: &str) -> CreatePrizeRequest {
        CreatePrizeRequest {
            name_de: format!("{name} DE"),
            name_tr: format!("{name} TR"),
            value_cents: 2500,
            glyph: None,
            weight: None,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_create_prize_defaults() {
        let pool = memory_pool().await;
        let admin = insert_user(&pool, "boss", Role::Admin, true).await;

        let svc = PrizeService::new(pool);
        let created = svc.create_prize(admin.id, request("Kino")).await.unwrap();
        assert_eq!(created.glyph, DEFAULT_GLYPH);
        assert_eq!(created.weight, DEFAULT_WEIGHT);
        assert_eq!(created.category, PrizeCategory::Monthly);
        assert!(created.is_active);

        let mut bad = request("Kino");
        bad.name_tr = "  ".to_string();
        let err = svc.create_prize(admin.id, bad).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_toggle_prize() {
        let pool = memory_pool().await;
        let admin = insert_user(&pool, "boss", Role::Admin, true).await;
        let staff = insert_user(&pool, "anna", Role::Staff, true).await;
        let p = insert_prize(&pool, "Kino", 10, true).await;

        let svc = PrizeService::new(pool);
        assert!(!svc.toggle_prize(admin.id, p.id).await.unwrap().is_active);
        assert!(svc.toggle_prize(admin.id, p.id).await.unwrap().is_active);

        let err = svc.toggle_prize(staff.id, p.id).await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));
        let err = svc.toggle_prize(admin.id, 999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_prize_keeps_win_snapshot() {
        let pool = memory_pool().await;
        let admin = insert_user(&pool, "boss", Role::Admin, true).await;
        let p = insert_prize(&pool, "Kino", 10, true).await;

        let rewards = RewardService::new(pool.clone());
        let mut rng = StdRng::seed_from_u64(7);
        rewards
            .draw_at(admin.id, Period::new(2025, 5).unwrap(), Language::De, &mut rng)
            .await
            .unwrap();

        let svc = PrizeService::new(pool.clone());
        svc.delete_prize(admin.id, p.id).await.unwrap();
        assert!(svc.list_prizes(admin.id).await.unwrap().is_empty());

        let overview = rewards.overview(admin.id, Language::De).await.unwrap();
        assert_eq!(overview.won_prizes.len(), 1);
        assert_eq!(overview.won_prizes[0].prize_id, None);
        assert_eq!(overview.won_prizes[0].prize_name, "Kino (de)");
        assert_eq!(count_wins(&pool).await, 1);
    }
}
