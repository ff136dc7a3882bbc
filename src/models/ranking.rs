use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Language;
use crate::error::AppResult;
use crate::utils::Period;

/// Period selection, defaults to the current month
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct RankingQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    #[serde(default)]
    pub lang: Language,
}

impl RankingQuery {
    /// Missing parts fall back to the current UTC month / year.
    pub fn period(&self) -> AppResult<Period> {
        let now = Period::current();
        Period::new(
            self.year.unwrap_or(now.year),
            self.month.unwrap_or(now.month),
        )
    }
}

/// One employee's monthly figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RankingEntry {
    /// 1-based position by sales volume
    pub rank: u32,
    pub user_id: i64,
    pub full_name: String,
    pub profile_color: String,
    pub total_sales: i64,
    pub total_cancellations: i64,
    /// total_sales - 2 * total_cancellations; shown, not used for ordering
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RankingResponse {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub entries: Vec<RankingEntry>,
    /// Top three entries (fewer if fewer employees)
    pub podium: Vec<RankingEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_period() {
        let query = RankingQuery {
            year: Some(2025),
            month: Some(3),
            lang: Language::Tr,
        };
        assert_eq!(query.period().unwrap(), Period::new(2025, 3).unwrap());

        let bad = RankingQuery {
            month: Some(13),
            ..Default::default()
        };
        assert!(bad.period().is_err());

        assert_eq!(RankingQuery::default().period().unwrap(), Period::current());
    }
}
