//! Query engine - Filtered, sorted, paginated views over the transaction ledger.
//!
//! Filters are conjunctive; the individual criteria are each optional. Sorting
//! always carries a secondary ascending id key so ties keep insertion order and
//! pagination stays deterministic. The total match count is computed before the
//! page slice is taken, so callers can render paging controls.

use crate::{
    core::transaction::TransactionType,
    entities::{Transaction, transaction},
    errors::Result,
};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, prelude::DateTimeUtc,
};

/// Sort keys accepted by the query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Order by `transaction_date` (the default)
    #[default]
    Date,
    /// Order by the denormalized product-name snapshot
    Product,
    /// Order by the transaction type token
    Type,
    /// Order by the stored total price
    Total,
}

impl SortBy {
    /// Parses a sort key token, case-insensitively. Unrecognized tokens yield
    /// None; the boundary maps that to the date-descending default.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "product" => Some(Self::Product),
            "type" => Some(Self::Type),
            "total" => Some(Self::Total),
            _ => None,
        }
    }
}

/// Sort direction accepted by the query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending (the default)
    #[default]
    Desc,
}

impl SortDirection {
    /// Parses a direction token, case-insensitively, defaulting to descending.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// Filter and sort criteria for a ledger query. All filter fields are optional
/// and combined with AND.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Exact product match
    pub product_id: Option<i64>,
    /// Exact transaction type match
    pub transaction_type: Option<TransactionType>,
    /// Inclusive lower bound on `transaction_date`
    pub date_from: Option<DateTimeUtc>,
    /// Inclusive upper bound, widened to the end of that day
    pub date_to: Option<DateTimeUtc>,
    /// Case-insensitive substring match on product name OR details
    pub search: Option<String>,
    /// Sort key (date when unspecified)
    pub sort_by: SortBy,
    /// Sort direction (descending when unspecified)
    pub sort_direction: SortDirection,
}

/// One page of ledger results plus the pre-pagination match count.
#[derive(Debug, Clone)]
pub struct TransactionPage {
    /// The page slice, in sort order
    pub items: Vec<transaction::Model>,
    /// Number of transactions matching the filter, before pagination
    pub total_count: u64,
    /// 1-indexed page number this slice corresponds to
    pub page: u64,
    /// Requested page size
    pub page_size: u64,
}

fn build_filtered(filter: &TransactionFilter) -> sea_orm::Select<Transaction> {
    let mut query = Transaction::find();

    if let Some(product_id) = filter.product_id {
        query = query.filter(transaction::Column::ProductId.eq(product_id));
    }

    if let Some(transaction_type) = filter.transaction_type {
        query = query.filter(transaction::Column::TransactionType.eq(transaction_type.as_str()));
    }

    if let Some(date_from) = filter.date_from {
        query = query.filter(transaction::Column::TransactionDate.gte(date_from));
    }

    // `date_to` is treated as end-of-day: everything dated before the start of
    // the following day is included
    if let Some(date_to) = filter.date_to {
        query = query
            .filter(transaction::Column::TransactionDate.lt(date_to + chrono::Duration::days(1)));
    }

    // Substring match on the name snapshot or the details; a row with NULL
    // details can only match through its product name
    if let Some(search) = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        query = query.filter(
            Condition::any()
                .add(transaction::Column::ProductName.contains(search))
                .add(transaction::Column::Details.contains(search)),
        );
    }

    query
}

fn apply_sort(
    query: sea_orm::Select<Transaction>,
    sort_by: SortBy,
    direction: SortDirection,
) -> sea_orm::Select<Transaction> {
    let column = match sort_by {
        SortBy::Date => transaction::Column::TransactionDate,
        SortBy::Product => transaction::Column::ProductName,
        SortBy::Type => transaction::Column::TransactionType,
        SortBy::Total => transaction::Column::TotalPrice,
    };

    let query = match direction {
        SortDirection::Asc => query.order_by_asc(column),
        SortDirection::Desc => query.order_by_desc(column),
    };

    // Stable tie-break on insertion order for deterministic pagination
    query.order_by_asc(transaction::Column::Id)
}

/// Runs a filtered, sorted, paginated query over the ledger.
///
/// `page` is 1-indexed; the offset is `(page - 1) * page_size` with saturating
/// arithmetic, and a page past the end of the result set yields an empty slice
/// rather than an error. Callers at the boundary are expected to clamp `page`
/// and `page_size` to sane ranges before calling in.
pub async fn query_transactions(
    db: &DatabaseConnection,
    filter: &TransactionFilter,
    page: u64,
    page_size: u64,
) -> Result<TransactionPage> {
    let filtered = build_filtered(filter);

    let total_count = filtered.clone().count(db).await?;

    let skip = page.saturating_sub(1).saturating_mul(page_size);
    let items = apply_sort(filtered, filter.sort_by, filter.sort_direction)
        .offset(skip)
        .limit(page_size)
        .all(db)
        .await?;

    Ok(TransactionPage {
        items,
        total_count,
        page,
        page_size,
    })
}

/// Counts the ledger rows that reference a product, regardless of type.
///
/// Used by reporting and by the boundary to warn before destructive catalog
/// operations.
pub async fn count_transactions_for_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<u64> {
    Transaction::find()
        .filter(transaction::Column::ProductId.eq(product_id))
        .count(db)
        .await
        .map_err(Into::into)
}
