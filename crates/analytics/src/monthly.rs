use crate::buckets::{PeriodKey, bucket_trades};
use chrono::NaiveDate;
use core_types::{Granularity, TradeRecord};
use serde::Serialize;
use std::fmt;

/// Which row of the monthly performance table a set of figures belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MonthlyPeriod {
    Month { year: i32, month: u32 },
    /// The synthetic row aggregating every trade, rendered last.
    AllTime,
}

impl fmt::Display for MonthlyPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthlyPeriod::Month { year, month } => match NaiveDate::from_ymd_opt(*year, *month, 1) {
                Some(date) => write!(f, "{}", date.format("%b %Y")),
                None => write!(f, "{year:04}-{month:02}"),
            },
            MonthlyPeriod::AllTime => f.write_str("All Time"),
        }
    }
}

/// One row of the monthly performance breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPerformance {
    pub period: MonthlyPeriod,
    pub total_trades: usize,
    pub winning: usize,
    pub winning_pct: f64,
    pub losing: usize,
    pub losing_pct: f64,
    pub net_profit: f64,
    /// Net profit divided by the number of trades.
    pub average_profit: f64,
}

impl MonthlyPerformance {
    fn from_trades<'a, I>(period: MonthlyPeriod, trades: I) -> Self
    where
        I: IntoIterator<Item = &'a TradeRecord>,
    {
        let mut row = Self {
            period,
            total_trades: 0,
            winning: 0,
            winning_pct: 0.0,
            losing: 0,
            losing_pct: 0.0,
            net_profit: 0.0,
            average_profit: 0.0,
        };

        for trade in trades {
            row.total_trades += 1;
            if trade.status.is_win() {
                row.winning += 1;
            } else if trade.status.is_loss() {
                row.losing += 1;
            }
            row.net_profit += trade.net_profit();
        }

        if row.total_trades > 0 {
            let total = row.total_trades as f64;
            row.winning_pct = row.winning as f64 / total * 100.0;
            row.losing_pct = row.losing as f64 / total * 100.0;
            row.average_profit = row.net_profit / total;
        }

        row
    }
}

/// Calendar-month performance rows plus the all-time summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBreakdown {
    /// Months in chronological order.
    pub months: Vec<MonthlyPerformance>,
    /// Figures across every trade, including those without a usable timestamp.
    pub all_time: MonthlyPerformance,
}

impl MonthlyBreakdown {
    /// Every row in display order; the all-time row is always last.
    pub fn rows(&self) -> impl Iterator<Item = &MonthlyPerformance> {
        self.months.iter().chain(std::iter::once(&self.all_time))
    }
}

/// Builds the monthly performance table for `trades`.
pub fn monthly_breakdown(trades: &[TradeRecord]) -> MonthlyBreakdown {
    let months = bucket_trades(trades, Granularity::Monthly)
        .into_iter()
        .filter_map(|bucket| match bucket.key {
            PeriodKey::Month { year, month } => Some(MonthlyPerformance::from_trades(
                MonthlyPeriod::Month { year, month },
                &bucket.trades,
            )),
            _ => None,
        })
        .collect();

    MonthlyBreakdown {
        months,
        all_time: MonthlyPerformance::from_trades(MonthlyPeriod::AllTime, trades),
    }
}
