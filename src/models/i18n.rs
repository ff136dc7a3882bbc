//! German / Turkish display strings owned by the backend.
//!
//! The language is always passed in explicitly by the caller; nothing here
//! reads request or process state.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    Tr,
}

const MONTHS_DE: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September", "Oktober",
    "November", "Dezember",
];

const MONTHS_TR: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

/// Month name for 1..=12, `None` otherwise.
pub fn month_name(month: u32, lang: Language) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    match lang {
        Language::De => MONTHS_DE.get(idx).copied(),
        Language::Tr => MONTHS_TR.get(idx).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(3, Language::De), Some("März"));
        assert_eq!(month_name(3, Language::Tr), Some("Mart"));
        assert_eq!(month_name(12, Language::Tr), Some("Aralık"));
        assert_eq!(month_name(0, Language::De), None);
        assert_eq!(month_name(13, Language::De), None);
    }

    #[test]
    fn test_language_serde() {
        let lang: Language = serde_json::from_str("\"tr\"").unwrap();
        assert_eq!(lang, Language::Tr);
        assert_eq!(serde_json::to_string(&Language::De).unwrap(), "\"de\"");
        assert_eq!(Language::default(), Language::De);
    }
}
