//! Pagination types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const MAX_PAGE_SIZE: i64 = 200;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            page_size: Some(20),
        }
    }
}

impl PaginationParams {
    /// Normalizes raw query values: page >= 1, 1 <= page_size <= 200,
    /// `default_size` when the client sends nothing.
    pub fn new(page: Option<u32>, per_page: Option<u32>, default_size: i64) -> Self {
        let page = page.map(i64::from).unwrap_or(1).max(1);
        let page_size = per_page
            .map(i64::from)
            .unwrap_or(default_size)
            .clamp(1, MAX_PAGE_SIZE);
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    pub fn get_page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    pub fn get_offset(&self) -> i64 {
        (self.get_page() - 1) * self.get_limit()
    }

    pub fn get_limit(&self) -> i64 {
        self.page_size.unwrap_or(20)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(SalePage = PaginatedResponse<super::SaleResponse>)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total: i64) -> Self {
        let page_size = params.get_limit();
        let total_pages = (total + page_size - 1) / page_size;
        Self {
            data,
            page: params.get_page(),
            page_size,
            total,
            total_pages,
        }
    }
}
