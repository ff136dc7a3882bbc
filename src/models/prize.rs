use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Language;
use crate::entities::{PeriodType, PrizeCategory, prize_entity, prize_win_entity};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePrizeRequest {
    #[schema(example = "Kinogutschein")]
    pub name_de: String,
    #[schema(example = "Sinema kuponu")]
    pub name_tr: String,
    /// Euro cents
    #[schema(example = 1500)]
    pub value_cents: i64,
    /// Defaults to 🎁
    pub glyph: Option<String>,
    /// Relative draw weight as a whole number, defaults to 10
    pub weight: Option<i32>,
    /// Defaults to `monthly`
    pub category: Option<PrizeCategory>,
}

/// Full prize definition (admin view)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: i64,
    pub name_de: String,
    pub name_tr: String,
    pub value_cents: i64,
    pub glyph: String,
    pub weight: i32,
    pub is_active: bool,
    pub category: PrizeCategory,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        Self {
            id: m.id,
            name_de: m.name_de,
            name_tr: m.name_tr,
            value_cents: m.value_cents,
            glyph: m.glyph,
            weight: m.weight,
            is_active: m.is_active,
            category: m.category,
        }
    }
}

/// Prize as shown to staff, in one language, without the weight
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeView {
    pub id: i64,
    pub name: String,
    pub value_cents: i64,
    pub glyph: String,
}

impl PrizeView {
    pub fn localized(m: &prize_entity::Model, lang: Language) -> Self {
        Self {
            id: m.id,
            name: m.localized_name(lang).to_string(),
            value_cents: m.value_cents,
            glyph: m.glyph.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeWinResponse {
    pub id: i64,
    pub prize_id: Option<i64>,
    pub prize_name: String,
    pub value_cents: i64,
    pub glyph: String,
    pub period_type: PeriodType,
    pub period_year: i32,
    pub period_month: i32,
    pub won_at: DateTime<Utc>,
}

impl PrizeWinResponse {
    pub fn localized(m: prize_win_entity::Model, lang: Language) -> Self {
        Self {
            id: m.id,
            prize_id: m.prize_id,
            prize_name: m.localized_name(lang).to_string(),
            value_cents: m.value_cents,
            glyph: m.glyph,
            period_type: m.period_type,
            period_year: m.period_year,
            period_month: m.period_month,
            won_at: m.won_at.unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_must_be_whole_number() {
        let body = r#"{"name_de":"Kino","name_tr":"Sinema","value_cents":1500,"weight":3}"#;
        let request: CreatePrizeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.weight, Some(3));

        let body = r#"{"name_de":"Kino","name_tr":"Sinema","value_cents":1500,"weight":2.5}"#;
        assert!(serde_json::from_str::<CreatePrizeRequest>(body).is_err());
    }
}
