use crate::entities::{sales_record_entity as sales, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::{CreateSaleRequest, PaginatedResponse, PaginationParams, SaleQuery, SaleResponse};
use crate::services::ensure_admin;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};

const SALES_PAGE_SIZE: i64 = 50;

#[derive(Clone)]
pub struct SalesService {
    pool: DatabaseConnection,
}

impl SalesService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Books a sales record for an approved staff member.
    pub async fn record_sale(
        &self,
        actor_id: i64,
        request: CreateSaleRequest,
    ) -> AppResult<SaleResponse> {
        let actor = ensure_admin(&self.pool, actor_id).await?;

        let sale_date = NaiveDate::parse_from_str(request.sale_date.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::ValidationError("sale_date must be YYYY-MM-DD".to_string()))?;
        if request.amount < 1 {
            return Err(AppError::ValidationError(
                "amount must be at least 1".to_string(),
            ));
        }
        let rls_count = request.rls_count.unwrap_or(0);
        if rls_count < 0 {
            return Err(AppError::ValidationError(
                "rls_count must not be negative".to_string(),
            ));
        }
        let notes = request
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        // pending accounts and admins are not on the leaderboard
        let owner = users::Entity::find_by_id(request.user_id)
            .one(&self.pool)
            .await?
            .filter(|u| u.is_ranked())
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

        let created = sales::ActiveModel {
            user_id: Set(owner.id),
            sale_date: Set(sale_date),
            amount: Set(request.amount),
            rls_count: Set(rls_count),
            notes: Set(notes),
            created_by: Set(Some(actor.id)),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Sale {} for user {} on {} recorded by {}: amount={} rls={}",
            created.id,
            owner.id,
            created.sale_date,
            actor.id,
            created.amount,
            created.rls_count
        );
        Ok((created, Some(owner)).into())
    }

    /// Newest sales first
    pub async fn list_sales(
        &self,
        actor_id: i64,
        query: SaleQuery,
    ) -> AppResult<PaginatedResponse<SaleResponse>> {
        ensure_admin(&self.pool, actor_id).await?;

        let params = PaginationParams::new(query.page, query.per_page, SALES_PAGE_SIZE);

        let total = sales::Entity::find().count(&self.pool).await? as i64;

        let rows = sales::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(sales::Column::SaleDate)
            .order_by_desc(sales::Column::Id)
            .offset(params.get_offset() as u64)
            .limit(params.get_limit() as u64)
            .all(&self.pool)
            .await?;

        let data = rows.into_iter().map(SaleResponse::from).collect();
        Ok(PaginatedResponse::new(data, &params, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::entities::Role;
    use crate::services::test_support::*;

    fn request(user_id: i64, date: &str, amount: i32) -> CreateSaleRequest {
        CreateSaleRequest {
            user_id,
            sale_date: date.to_string(),
            amount,
            rls_count: None,
            notes: Some("  Filiale Mitte ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_record_sale() {
        let pool = memory_pool().await;
        let admin = insert_user(&pool, "boss", Role::Admin, true).await;
        let staff = insert_user(&pool, "anna", Role::Staff, true).await;

        let svc = SalesService::new(pool.clone());
        let sale = svc
            .record_sale(admin.id, request(staff.id, "2025-03-14", 3))
            .await
            .unwrap();
        assert_eq!(sale.rls_count, 0);
        assert_eq!(sale.created_by, Some(admin.id));
        assert_eq!(sale.full_name, staff.full_name);
        assert_eq!(sale.notes.as_deref(), Some("Filiale Mitte"));
        assert_eq!(count_sales(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_record_sale_validation() {
        let pool = memory_pool().await;
        let admin = insert_user(&pool, "boss", Role::Admin, true).await;
        let staff = insert_user(&pool, "anna", Role::Staff, true).await;
        let pending = insert_user(&pool, "neu", Role::Staff, false).await;

        let svc = SalesService::new(pool.clone());
        for bad in [
            request(staff.id, "14.03.2025", 3),
            request(staff.id, "2025-02-30", 3),
            request(staff.id, "2025-03-14", 0),
        ] {
            let err = svc.record_sale(admin.id, bad).await.unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }

        for not_staff in [pending.id, admin.id, 4242] {
            let err = svc
                .record_sale(admin.id, request(not_staff, "2025-03-14", 1))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
        }

        let mut negative = request(staff.id, "2025-03-14", 1);
        negative.rls_count = Some(-1);
        assert!(svc.record_sale(admin.id, negative).await.is_err());

        let err = svc
            .record_sale(staff.id, request(staff.id, "2025-03-14", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));

        assert_eq!(count_sales(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_list_sales_newest_first() {
        let pool = memory_pool().await;
        let admin = insert_user(&pool, "boss", Role::Admin, true).await;
        let staff = insert_user(&pool, "anna", Role::Staff, true).await;
        insert_sale(&pool, staff.id, (2025, 3, 1), 1, 0).await;
        insert_sale(&pool, staff.id, (2025, 3, 20), 2, 0).await;
        insert_sale(&pool, staff.id, (2025, 2, 10), 3, 0).await;

        let svc = SalesService::new(pool);
        let page = svc
            .list_sales(
                admin.id,
                SaleQuery {
                    page: Some(1),
                    per_page: Some(2),
                },
            )
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        let amounts: Vec<i32> = page.data.iter().map(|s| s.amount).collect();
        assert_eq!(amounts, vec![2, 1]);

        let rest = svc
            .list_sales(
                admin.id,
                SaleQuery {
                    page: Some(2),
                    per_page: Some(2),
                },
            )
            .await
            .unwrap();
        assert_eq!(rest.data.len(), 1);
        assert_eq!(rest.data[0].amount, 3);
    }
}
