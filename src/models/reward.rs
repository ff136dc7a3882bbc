use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PrizeView, PrizeWinResponse};
use crate::entities::period_champion_entity;
use crate::error::{AppError, AppResult};
use crate::utils::Period;

/// Balloon game page data
#[derive(Debug, Serialize, ToSchema)]
pub struct RewardOverviewResponse {
    /// Whether the caller may pop a balloon right now
    pub can_play: bool,
    pub prizes: Vec<PrizeView>,
    /// Newest first
    pub won_prizes: Vec<PrizeWinResponse>,
}

/// Result of one draw
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    pub prize_name: String,
    pub prize_value_cents: i64,
    pub prize_glyph: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DesignateChampionRequest {
    pub user_id: i64,
    #[schema(example = 2025)]
    pub year: i32,
    #[schema(example = 3)]
    pub month: u32,
    /// Defaults to `sales`
    pub winner_type: Option<String>,
}

/// Both parts or neither: all grants when no month is given
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ChampionQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl ChampionQuery {
    pub fn period(&self) -> AppResult<Option<Period>> {
        match (self.year, self.month) {
            (Some(year), Some(month)) => Period::new(year, month).map(Some),
            (None, None) => Ok(None),
            _ => Err(AppError::ValidationError(
                "year and month must be given together".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChampionResponse {
    pub id: i64,
    pub user_id: i64,
    pub year: i32,
    pub month: i32,
    pub winner_type: String,
    pub draw_consumed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<period_champion_entity::Model> for ChampionResponse {
    fn from(m: period_champion_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            year: m.year,
            month: m.month,
            winner_type: m.winner_type,
            draw_consumed: m.draw_consumed,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
