use std::collections::HashMap;

use crate::entities::{Role, sales_record_entity as sales, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::{Language, RankingEntry, RankingResponse, month_name};
use crate::utils::Period;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect,
};

const PODIUM_SIZE: usize = 3;
const CANCELLATION_PENALTY: i64 = 2;

/// Monthly score shown next to the raw sales figures
pub fn score(total_sales: i64, total_cancellations: i64) -> i64 {
    total_sales - CANCELLATION_PENALTY * total_cancellations
}

/// Builds the leaderboard for a month.
///
/// Every contender gets exactly one entry, zero-valued when `totals` has
/// nothing for them. Entries are ordered by `total_sales` descending (not by
/// score), ties broken by user id ascending.
pub fn build_ranking(
    contenders: Vec<users::Model>,
    totals: &HashMap<i64, (i64, i64)>,
) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = contenders
        .into_iter()
        .map(|u| {
            let (total_sales, total_cancellations) = totals.get(&u.id).copied().unwrap_or((0, 0));
            RankingEntry {
                rank: 0,
                user_id: u.id,
                full_name: u.full_name,
                profile_color: u.profile_color,
                total_sales,
                total_cancellations,
                score: score(total_sales, total_cancellations),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_sales
            .cmp(&a.total_sales)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx as u32 + 1;
    }

    entries
}

/// Top three of an already ordered leaderboard
pub fn podium(entries: &[RankingEntry]) -> Vec<RankingEntry> {
    entries.iter().take(PODIUM_SIZE).cloned().collect()
}

#[derive(Debug, FromQueryResult)]
struct SalesTotalsRow {
    user_id: i64,
    total_sales: i64,
    total_cancellations: i64,
}

#[derive(Clone)]
pub struct RankingService {
    pool: DatabaseConnection,
}

impl RankingService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Leaderboard of approved staff for `period`
    pub async fn monthly_ranking(&self, period: Period, lang: Language) -> AppResult<RankingResponse> {
        let entries = self.ranking_entries(period).await?;
        let podium = podium(&entries);
        let month_name = month_name(period.month, lang)
            .unwrap_or_default()
            .to_string();

        Ok(RankingResponse {
            year: period.year,
            month: period.month,
            month_name,
            entries,
            podium,
        })
    }

    /// The caller's own line of the leaderboard
    pub async fn user_stats(&self, user_id: i64, period: Period) -> AppResult<RankingEntry> {
        self.ranking_entries(period)
            .await?
            .into_iter()
            .find(|e| e.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("No ranking entry for this user".to_string()))
    }

    async fn ranking_entries(&self, period: Period) -> AppResult<Vec<RankingEntry>> {
        let contenders = users::Entity::find()
            .filter(users::Column::IsApproved.eq(true))
            .filter(users::Column::Role.eq(Role::Staff))
            .order_by_asc(users::Column::Id)
            .all(&self.pool)
            .await?;

        let totals = self.monthly_totals(period).await?;
        Ok(build_ranking(contenders, &totals))
    }

    /// user_id -> (sum of amount, sum of rls_count) for sales dated inside `period`
    async fn monthly_totals(&self, period: Period) -> AppResult<HashMap<i64, (i64, i64)>> {
        let (start, end) = period.date_range()?;

        let rows = sales::Entity::find()
            .select_only()
            .column(sales::Column::UserId)
            .column_as(Expr::col(sales::Column::Amount).sum(), "total_sales")
            .column_as(Expr::col(sales::Column::RlsCount).sum(), "total_cancellations")
            .filter(sales::Column::SaleDate.gte(start))
            .filter(sales::Column::SaleDate.lt(end))
            .group_by(sales::Column::UserId)
            .into_model::<SalesTotalsRow>()
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| (r.user_id, (r.total_sales, r.total_cancellations)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;
    use crate::services::test_support::*;

    fn contender(id: i64) -> users::Model {
        users::Model {
            id,
            username: format!("user{id}"),
            email: None,
            password_hash: String::new(),
            full_name: format!("User {id}"),
            is_approved: true,
            role: Role::Staff,
            profile_color: "#10B981".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_score_formula() {
        assert_eq!(score(8, 1), 6);
        assert_eq!(score(0, 0), 0);
        assert_eq!(score(1, 3), -5);
    }

    #[test]
    fn test_build_ranking_orders_by_sales_not_score() {
        let mut totals = HashMap::new();
        // user 1: more sales, worse score
        totals.insert(1, (10, 5));
        totals.insert(2, (9, 0));

        let entries = build_ranking(vec![contender(2), contender(1)], &totals);
        assert_eq!(entries[0].user_id, 1);
        assert_eq!(entries[0].score, 0);
        assert_eq!(entries[1].user_id, 2);
        assert_eq!(entries[1].score, 9);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn test_build_ranking_keeps_everyone_and_breaks_ties_by_id() {
        let mut totals = HashMap::new();
        totals.insert(3, (4, 0));
        totals.insert(1, (4, 2));

        let entries = build_ranking(vec![contender(3), contender(2), contender(1)], &totals);
        let ids: Vec<i64> = entries.iter().map(|e| e.user_id).collect();
        assert_eq!(ids, vec![1, 3, 2]);

        let zero = &entries[2];
        assert_eq!((zero.total_sales, zero.total_cancellations, zero.score), (0, 0, 0));
    }

    #[test]
    fn test_podium_bound() {
        let totals = HashMap::new();
        for n in 0..6 {
            let entries = build_ranking((1..=n).map(contender).collect(), &totals);
            assert_eq!(entries.len(), n as usize);
            assert_eq!(podium(&entries).len(), (n as usize).min(3));
        }
    }

    #[tokio::test]
    async fn test_monthly_ranking_end_to_end() {
        let pool = memory_pool().await;
        let u = insert_user(&pool, "ulla", Role::Staff, true).await;
        let idle = insert_user(&pool, "idle", Role::Staff, true).await;
        let admin = insert_user(&pool, "boss", Role::Admin, true).await;
        let pending = insert_user(&pool, "neu", Role::Staff, false).await;

        insert_sale(&pool, u.id, (2025, 3, 3), 5, 1).await;
        insert_sale(&pool, u.id, (2025, 3, 31), 3, 0).await;
        // outside March
        insert_sale(&pool, u.id, (2025, 2, 28), 100, 0).await;
        insert_sale(&pool, u.id, (2025, 4, 1), 100, 0).await;
        // not ranked
        insert_sale(&pool, admin.id, (2025, 3, 10), 50, 0).await;
        insert_sale(&pool, pending.id, (2025, 3, 10), 50, 0).await;

        let svc = RankingService::new(pool);
        let period = Period::new(2025, 3).unwrap();
        let ranking = svc.monthly_ranking(period, Language::Tr).await.unwrap();

        assert_eq!(ranking.month_name, "Mart");
        assert_eq!(ranking.entries.len(), 2);
        assert_eq!(ranking.podium.len(), 2);

        let first = &ranking.entries[0];
        assert_eq!(first.user_id, u.id);
        assert_eq!(first.total_sales, 8);
        assert_eq!(first.total_cancellations, 1);
        assert_eq!(first.score, 6);

        let second = &ranking.entries[1];
        assert_eq!(second.user_id, idle.id);
        assert_eq!(second.total_sales, 0);

        let mine = svc.user_stats(u.id, period).await.unwrap();
        assert_eq!(mine.rank, 1);
        let err = svc.user_stats(admin.id, period).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_negative_score_when_cancellations_dominate() {
        let pool = memory_pool().await;
        let u = insert_user(&pool, "pech", Role::Staff, true).await;
        insert_sale(&pool, u.id, (2024, 12, 24), 1, 4).await;

        let svc = RankingService::new(pool);
        let ranking = svc
            .monthly_ranking(Period::new(2024, 12).unwrap(), Language::De)
            .await
            .unwrap();
        assert_eq!(ranking.month_name, "Dezember");
        assert_eq!(ranking.entries[0].score, -7);
    }
}
