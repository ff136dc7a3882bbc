use crate::entities::{
    PeriodType, period_champion_entity as champions, prize_entity as prizes,
    prize_win_entity as wins, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    ChampionResponse, DesignateChampionRequest, DrawResponse, Language, PrizeView,
    PrizeWinResponse, RewardOverviewResponse,
};
use crate::services::ensure_admin;
use crate::utils::{Period, require_text};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

/// Weighted pick over `pool`: prize *i* wins with probability
/// `w_i / sum(w)`, using the weights as given (negatives count as zero).
///
/// Returns `None` when nothing has a positive weight.
pub fn pick_weighted<'a, R: Rng + ?Sized>(
    pool: &'a [prizes::Model],
    rng: &mut R,
) -> Option<&'a prizes::Model> {
    let total: i64 = pool.iter().map(prizes::Model::draw_weight).sum();
    if total <= 0 {
        return None;
    }

    let pick = rng.gen_range(0..total);
    let mut acc = 0;
    for prize in pool {
        acc += prize.draw_weight();
        if pick < acc {
            return Some(prize);
        }
    }
    None
}

/// Unconsumed grant of `user_id` for `period`, if any
async fn open_grant<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    period: Period,
) -> Result<Option<champions::Model>, DbErr> {
    champions::Entity::find()
        .filter(champions::Column::UserId.eq(user_id))
        .filter(champions::Column::Year.eq(period.year))
        .filter(champions::Column::Month.eq(period.month_i32()))
        .filter(champions::Column::DrawConsumed.eq(false))
        .one(conn)
        .await
}

/// Flips `draw_consumed` if it is still false; `false` when another draw got there first
async fn consume_grant<C: ConnectionTrait>(conn: &C, grant_id: i64) -> Result<bool, DbErr> {
    let result = champions::Entity::update_many()
        .col_expr(champions::Column::DrawConsumed, Expr::value(true))
        .filter(champions::Column::Id.eq(grant_id))
        .filter(champions::Column::DrawConsumed.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}

#[derive(Clone)]
pub struct RewardService {
    pool: DatabaseConnection,
}

impl RewardService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Admins may always play; everyone else needs an unconsumed grant for
    /// the month before `today`.
    pub async fn can_play(&self, user: &users::Model, today: Period) -> AppResult<bool> {
        if user.role.can_administer() {
            return Ok(true);
        }
        if !user.is_approved {
            return Ok(false);
        }
        Ok(open_grant(&self.pool, user.id, today.previous())
            .await?
            .is_some())
    }

    /// Balloon game page: eligibility, active prizes and the caller's wins
    pub async fn overview(&self, user_id: i64, lang: Language) -> AppResult<RewardOverviewResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let can_play = self.can_play(&user, Period::current()).await?;

        let active = prizes::Entity::find()
            .filter(prizes::Column::IsActive.eq(true))
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;

        let won = wins::Entity::find()
            .filter(wins::Column::UserId.eq(user.id))
            .order_by_desc(wins::Column::WonAt)
            .order_by_desc(wins::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(RewardOverviewResponse {
            can_play,
            prizes: active.iter().map(|p| PrizeView::localized(p, lang)).collect(),
            won_prizes: won
                .into_iter()
                .map(|w| PrizeWinResponse::localized(w, lang))
                .collect(),
        })
    }

    /// Pops one balloon for `user_id` in the current month.
    pub async fn draw(&self, user_id: i64, lang: Language) -> AppResult<DrawResponse> {
        let mut rng = StdRng::from_entropy();
        self.draw_at(user_id, Period::current(), lang, &mut rng).await
    }

    /// Draw with an explicit clock and random source.
    ///
    /// Everything happens in one transaction:
    /// 1. load the caller and its open grant for `today.previous()`
    /// 2. reject callers that are neither admin nor grant holders
    /// 3. pick an active prize by weight
    /// 4. consume the grant (`UPDATE ... WHERE draw_consumed = false`)
    /// 5. record the win under `today`
    pub async fn draw_at<R: Rng + ?Sized>(
        &self,
        user_id: i64,
        today: Period,
        lang: Language,
        rng: &mut R,
    ) -> AppResult<DrawResponse> {
        let txn = self.pool.begin().await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let grant = if user.is_approved {
            open_grant(&txn, user.id, today.previous()).await?
        } else {
            None
        };
        if grant.is_none() && !user.role.can_administer() {
            return Err(AppError::NotEligible);
        }

        settle_draw(txn, &user, grant, today, lang, rng).await
    }

    /// Declares `user_id` champion of a month and hands out one draw.
    pub async fn designate_champion(
        &self,
        actor_id: i64,
        request: DesignateChampionRequest,
    ) -> AppResult<ChampionResponse> {
        ensure_admin(&self.pool, actor_id).await?;

        let period = Period::new(request.year, request.month)?;
        let winner_type = require_text(
            "winner_type",
            request.winner_type.as_deref().unwrap_or("sales"),
            32,
        )?;

        users::Entity::find_by_id(request.user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let duplicate = || AppError::DuplicateChampionGrant {
            user_id: request.user_id,
            year: period.year,
            month: period.month,
        };

        let existing = champions::Entity::find()
            .filter(champions::Column::UserId.eq(request.user_id))
            .filter(champions::Column::Year.eq(period.year))
            .filter(champions::Column::Month.eq(period.month_i32()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(duplicate());
        }

        // the unique index catches a concurrent designation that slipped past the check
        let created = champions::ActiveModel {
            user_id: Set(request.user_id),
            year: Set(period.year),
            month: Set(period.month_i32()),
            winner_type: Set(winner_type),
            draw_consumed: Set(false),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => duplicate(),
            _ => AppError::from(e),
        })?;

        log::info!(
            "User {} designated champion of {period} by {actor_id}",
            created.user_id
        );
        Ok(created.into())
    }

    /// Grants of one month, or all grants newest first
    pub async fn list_champions(
        &self,
        actor_id: i64,
        period: Option<Period>,
    ) -> AppResult<Vec<ChampionResponse>> {
        ensure_admin(&self.pool, actor_id).await?;

        let mut query = champions::Entity::find();
        if let Some(period) = period {
            query = query
                .filter(champions::Column::Year.eq(period.year))
                .filter(champions::Column::Month.eq(period.month_i32()));
        }

        let list = query
            .order_by_desc(champions::Column::Year)
            .order_by_desc(champions::Column::Month)
            .order_by_asc(champions::Column::UserId)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}

/// Steps 3 to 5 of a draw, on a transaction that already read `grant`.
///
/// A grant consumed by another draw since it was read makes the conditional
/// update affect no rows. Grant holders then get `NotEligible` and the
/// transaction is dropped (rolled back); admins still draw, without a grant.
async fn settle_draw<R: Rng + ?Sized>(
    txn: DatabaseTransaction,
    user: &users::Model,
    grant: Option<champions::Model>,
    today: Period,
    lang: Language,
    rng: &mut R,
) -> AppResult<DrawResponse> {
    let active = prizes::Entity::find()
        .filter(prizes::Column::IsActive.eq(true))
        .order_by_asc(prizes::Column::Id)
        .all(&txn)
        .await?;

    let selected = pick_weighted(&active, rng)
        .cloned()
        .ok_or(AppError::NoActivePrizes)?;

    let mut consumed_grant = None;
    if let Some(grant) = &grant {
        if consume_grant(&txn, grant.id).await? {
            consumed_grant = Some(grant.id);
        } else if user.role.can_administer() {
            log::info!(
                "Grant {} of admin {} was already consumed, drawing without it",
                grant.id,
                user.id
            );
        } else {
            log::warn!(
                "Grant {} of user {} was consumed by a concurrent draw",
                grant.id,
                user.id
            );
            return Err(AppError::NotEligible);
        }
    }

    wins::ActiveModel {
        user_id: Set(user.id),
        prize_id: Set(Some(selected.id)),
        prize_name_de: Set(selected.name_de.clone()),
        prize_name_tr: Set(selected.name_tr.clone()),
        value_cents: Set(selected.value_cents),
        glyph: Set(selected.glyph.clone()),
        period_type: Set(PeriodType::Monthly),
        period_year: Set(today.year),
        period_month: Set(today.month_i32()),
        won_at: Set(Some(Utc::now())),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    log::info!(
        "User {} won prize {} in {today} (grant: {:?})",
        user.id,
        selected.id,
        consumed_grant
    );

    Ok(DrawResponse {
        prize_name: selected.localized_name(lang).to_string(),
        prize_value_cents: selected.value_cents,
        prize_glyph: selected.glyph,
    })
}
