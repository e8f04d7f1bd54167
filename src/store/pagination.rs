//! Page/limit arithmetic shared by every risk listing.

use serde::{Deserialize, Serialize};

use super::query::SortOrder;
use crate::config::PaginationConfig;

/// Fields a risk listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    RiskScore,
    Name,
}

impl SortField {
    /// Risk listings default to worst first, name listings to A-Z.
    pub fn default_order(self) -> SortOrder {
        match self {
            SortField::RiskScore => SortOrder::Desc,
            SortField::Name => SortOrder::Asc,
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "riskScore" | "risk-score" | "risk_score" => Ok(SortField::RiskScore),
            "name" => Ok(SortField::Name),
            other => Err(format!("unknown sort field '{other}'")),
        }
    }
}

/// Raw paging options as they arrive from a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationOptions {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

/// Normalized paging: `page >= 1`, `1 <= limit <= max_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub skip: usize,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

pub fn calculate_pagination(options: &PaginationOptions, config: &PaginationConfig) -> Pagination {
    let page = options.page.unwrap_or(1).max(1);
    let max_limit = config.max_limit.max(1);
    let limit = options
        .limit
        .filter(|limit| *limit > 0)
        .unwrap_or(config.default_limit)
        .clamp(1, max_limit);
    let sort_by = options.sort_by.unwrap_or_default();

    Pagination {
        page,
        limit,
        skip: (page - 1).saturating_mul(limit),
        sort_by,
        sort_order: options.sort_order.unwrap_or_else(|| sort_by.default_order()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub meta: PageMeta,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    /// Wraps a page that was already cut by the store.
    pub fn from_page(data: Vec<T>, pagination: &Pagination, total: usize) -> Self {
        Self {
            meta: PageMeta {
                page: pagination.page,
                limit: pagination.limit,
                total,
            },
            data,
        }
    }

    /// Cuts the requested page out of the complete, already ordered result set.
    pub fn from_rows(rows: Vec<T>, pagination: &Pagination) -> Self {
        let total = rows.len();
        let data = rows
            .into_iter()
            .skip(pagination.skip)
            .take(pagination.limit)
            .collect();
        Self::from_page(data, pagination, total)
    }
}
