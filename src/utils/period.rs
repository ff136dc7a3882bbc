use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::ValidationError(format!(
                "Month must be between 1 and 12, got {month}"
            )));
        }
        if !(1..=9999).contains(&year) {
            return Err(AppError::ValidationError(format!(
                "Year must be between 1 and 9999, got {year}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::containing(Utc::now().date_naive())
    }

    /// Month before this one; January rolls back to December of the previous year.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Half-open date range `[first day, first day of next month)`.
    pub fn date_range(self) -> AppResult<(NaiveDate, NaiveDate)> {
        let next = self.next();
        let start = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        let end = NaiveDate::from_ymd_opt(next.year, next.month, 1);
        match (start, end) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(AppError::ValidationError(format!(
                "Period {}-{:02} is out of range",
                self.year, self.month
            ))),
        }
    }

    /// Month as stored in i32 columns.
    pub fn month_i32(self) -> i32 {
        self.month as i32
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
