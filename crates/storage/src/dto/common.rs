use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    25
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    /// Fills missing query values with the defaults.
    pub fn from_query(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or_else(default_page),
            page_size: page_size.unwrap_or_else(default_page_size),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!("pageSize must be between 1 and {MAX_PAGE_SIZE}"));
        }
        Ok(())
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total_items: i64) -> Self {
        let total_pages = if page_size == 0 || total_items <= 0 {
            0
        } else {
            let page_size = i64::from(page_size);
            ((total_items + page_size - 1) / page_size) as u32
        };
        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total_items: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(params.page, params.page_size, total_items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_limit() {
        let params = PaginationParams {
            page: 3,
            page_size: 20,
        };
        assert_eq!(params.offset(), 40);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn test_validation_bounds() {
        assert!(PaginationParams::default().validate().is_ok());
        assert!(PaginationParams { page: 0, page_size: 10 }.validate().is_err());
        assert!(PaginationParams { page: 1, page_size: 101 }.validate().is_err());
    }

    #[test]
    fn test_from_query_fills_defaults() {
        let params = PaginationParams::from_query(None, Some(50));
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 50);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationMeta::new(1, 25, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 25, 25).total_pages, 1);
        assert_eq!(PaginationMeta::new(1, 25, 26).total_pages, 2);
    }
}
