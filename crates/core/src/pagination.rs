//! # Pagination
//!
//! Turns raw `page`/`limit`/`sortColumn`/`sortOrder` query parameters into a
//! validated [`PageQuery`] and wraps a page of results into the [`Paginated`]
//! envelope returned by list endpoints.
//!
//! Sort columns are checked against a per-entity whitelist, so the column
//! name handed to the storage layer is always one of a few static strings.

use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// Column used when the caller does not ask for a sort.
pub const DEFAULT_SORT_COLUMN: &str = "created_at";

/// Raw list parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page: u32,
    pub limit: u32,
    pub sort_column: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    fn parse(value: &str) -> BookingResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(BookingError::Validation(format!(
                "sortOrder must be 'asc' or 'desc', got '{value}'"
            ))),
        }
    }
}

/// Validated list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_column: &'static str,
    pub sort_order: SortOrder,
}

impl PageQuery {
    /// Validates `params` against the columns the entity may be sorted by.
    ///
    /// Without a sort column the query sorts by `created_at` descending. A
    /// sort column without an order sorts ascending.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Validation` when `page` or `limit` is zero, the
    /// column is not in `sortable`, or the order is not `asc`/`desc`.
    pub fn new(params: &PaginationParams, sortable: &[&'static str]) -> BookingResult<Self> {
        if params.page == 0 {
            return Err(BookingError::validation("page must be at least 1"));
        }
        if params.limit == 0 {
            return Err(BookingError::validation("limit must be at least 1"));
        }

        let (sort_column, sort_order) = match params.sort_column.as_deref() {
            None => (DEFAULT_SORT_COLUMN, SortOrder::Desc),
            Some(requested) => {
                let column = sortable
                    .iter()
                    .copied()
                    .find(|column| *column == requested)
                    .ok_or_else(|| {
                        BookingError::Validation(format!("Cannot sort by '{requested}'"))
                    })?;
                let order = match params.sort_order.as_deref() {
                    Some(order) => SortOrder::parse(order)?,
                    None => SortOrder::Asc,
                };
                (column, order)
            }
        };

        Ok(Self {
            page: params.page,
            limit: params.limit,
            sort_column,
            sort_order,
        })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Paged response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub count: i64,
    pub limit: u32,
    pub page: u32,
    pub total_page: u32,
    pub next_page: Option<u32>,
    pub previous_page: Option<u32>,
    pub data: Vec<T>,
}

/// Builds the envelope for one page of `data` out of `count` total rows.
pub fn paginate<T>(query: &PageQuery, count: i64, data: Vec<T>) -> Paginated<T> {
    let limit = i64::from(query.limit);
    let total_page = u32::try_from((count.max(0) + limit - 1) / limit).unwrap_or(u32::MAX);

    Paginated {
        count,
        limit: query.limit,
        page: query.page,
        total_page,
        next_page: (query.page < total_page).then(|| query.page + 1),
        previous_page: (query.page > 1).then(|| query.page - 1),
        data,
    }
}
