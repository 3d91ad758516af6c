//! # Trade Analytics
//!
//! Pure aggregation over reported trades. Nothing in this crate performs I/O; every
//! function takes an immutable slice of `TradeRecord`s and returns a fresh, serializable
//! value, so recomputing from the same snapshot always yields the same output.
//!
//! There is no error type. Unreadable profits count as zero and unreadable timestamps are
//! left out of the time series, so every function is total over its input.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: portfolio metrics (win rate, total profit, top symbols).
//! - `bucket_trades`: daily / weekly / monthly profit series with a running total.
//! - `monthly_breakdown`: the calendar-month performance table with its all-time row.

pub mod buckets;
pub mod engine;
pub mod monthly;
pub mod report;

#[cfg(test)]
mod testing;

// Re-export the key components to create a clean, public-facing API.
pub use buckets::{PeriodKey, TimeBucket, bucket_trades, week_of_month};
pub use engine::{AnalyticsEngine, format_signed_percent};
pub use monthly::{MonthlyBreakdown, MonthlyPerformance, MonthlyPeriod, monthly_breakdown};
pub use report::{AggregateMetrics, SymbolProfit};
