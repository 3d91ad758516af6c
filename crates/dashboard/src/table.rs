use crate::error::DashboardError;
use core_types::TradeRecord;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Columns the trade table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortField {
    #[default]
    DateTime,
    Symbol,
    Strategy,
    BuyPrice,
    SellPrice,
    Profit,
    Value,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::DateTime,
        SortField::Symbol,
        SortField::Strategy,
        SortField::BuyPrice,
        SortField::SellPrice,
        SortField::Profit,
        SortField::Value,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortField::DateTime => "date",
            SortField::Symbol => "symbol",
            SortField::Strategy => "type",
            SortField::BuyPrice => "buy",
            SortField::SellPrice => "sell",
            SortField::Profit => "profit",
            SortField::Value => "value",
        }
    }

    fn compare(&self, a: &TradeRecord, b: &TradeRecord) -> Ordering {
        match self {
            // Unparseable timestamps sort before every real one.
            SortField::DateTime => a.closed_at().cmp(&b.closed_at()),
            SortField::Symbol => a.symbol.cmp(&b.symbol),
            SortField::Strategy => a.strategy.cmp(&b.strategy),
            SortField::BuyPrice => a.buy_price.total_cmp(&b.buy_price),
            SortField::SellPrice => a.sell_price.total_cmp(&b.sell_price),
            SortField::Profit => a.net_profit().total_cmp(&b.net_profit()),
            SortField::Value => a.value_in_quote.total_cmp(&b.value_in_quote),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortField {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        SortField::ALL
            .into_iter()
            .find(|field| field.name() == wanted)
            .ok_or_else(|| DashboardError::UnknownSortField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Search, sort and pagination state of the trade table.
///
/// Every transition consumes the state and returns the next one, so callers own the value
/// outright and can keep earlier versions around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeTableState {
    pub search: String,
    pub sort_field: SortField,
    pub direction: SortDirection,
    /// 1-based page number.
    pub page: usize,
    pub rows_per_page: usize,
}

impl Default for TradeTableState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_field: SortField::DateTime,
            direction: SortDirection::Descending,
            page: 1,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

/// One rendered page of the trade table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub rows: Vec<TradeRecord>,
    pub page: usize,
    pub total_pages: usize,
    /// Trades matching the search, across all pages.
    pub total_matches: usize,
}

impl TradeTableState {
    pub fn with_rows_per_page(self, rows_per_page: usize) -> Self {
        Self {
            rows_per_page: rows_per_page.max(1),
            page: 1,
            ..self
        }
    }

    /// Changes the search term. Results start again from the first page.
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: 1,
            ..self
        }
    }

    /// Clicking the current column flips the direction; a new column sorts ascending.
    pub fn toggle_sort(self, field: SortField) -> Self {
        if field == self.sort_field {
            Self {
                direction: self.direction.flipped(),
                ..self
            }
        } else {
            Self {
                sort_field: field,
                direction: SortDirection::Ascending,
                ..self
            }
        }
    }

    pub fn with_sort(self, field: SortField, direction: SortDirection) -> Self {
        Self {
            sort_field: field,
            direction,
            ..self
        }
    }

    pub fn with_page(self, page: usize, total_pages: usize) -> Self {
        Self {
            page: page.clamp(1, total_pages.max(1)),
            ..self
        }
    }

    pub fn next_page(self, total_pages: usize) -> Self {
        let page = self.page + 1;
        self.with_page(page, total_pages)
    }

    pub fn previous_page(self) -> Self {
        Self {
            page: self.page.saturating_sub(1).max(1),
            ..self
        }
    }

    /// Applies search, sort and pagination to a trade snapshot.
    pub fn view(&self, trades: &[TradeRecord]) -> TablePage {
        let needle = self.search.to_lowercase();
        let mut matches: Vec<&TradeRecord> = trades
            .iter()
            .filter(|t| {
                needle.is_empty()
                    || t.symbol.to_lowercase().contains(&needle)
                    || t.strategy.to_lowercase().contains(&needle)
                    || t.status.as_str().to_lowercase().contains(&needle)
            })
            .collect();

        matches.sort_by(|a, b| {
            let ordering = self.sort_field.compare(a, b);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        let total_matches = matches.len();
        let total_pages = total_matches.div_ceil(self.rows_per_page);
        let page = self.page.clamp(1, total_pages.max(1));

        let rows = matches
            .into_iter()
            .skip((page - 1) * self.rows_per_page)
            .take(self.rows_per_page)
            .cloned()
            .collect();

        TablePage {
            rows,
            page,
            total_pages,
            total_matches,
        }
    }
}
