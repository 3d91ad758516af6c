use chrono::{Datelike, NaiveDate, NaiveDateTime};
use core_types::{Granularity, TradeRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Identifies the period a trade closed in.
///
/// Keys of the same granularity order chronologically, so a `BTreeMap<PeriodKey, _>`
/// iterates buckets oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub enum PeriodKey {
    Day(NaiveDate),
    /// Calendar month plus the naive week-of-month number, `ceil(day / 7)`.
    /// Days 29–31 form a short fifth week; weeks never span two months.
    WeekOfMonth { year: i32, month: u32, week: u32 },
    Month { year: i32, month: u32 },
}

impl PeriodKey {
    pub fn for_timestamp(at: NaiveDateTime, granularity: Granularity) -> Self {
        let date = at.date();
        match granularity {
            Granularity::Daily => PeriodKey::Day(date),
            Granularity::Weekly => PeriodKey::WeekOfMonth {
                year: date.year(),
                month: date.month(),
                week: week_of_month(date.day()),
            },
            Granularity::Monthly => PeriodKey::Month {
                year: date.year(),
                month: date.month(),
            },
        }
    }

    /// A short axis label: `Jan 5`, `W2`, `Jan 2025`.
    pub fn label(&self) -> String {
        match self {
            PeriodKey::Day(date) => date.format("%b %-d").to_string(),
            PeriodKey::WeekOfMonth { week, .. } => format!("W{week}"),
            PeriodKey::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_else(|| self.to_string()),
        }
    }
}

/// The naive week-of-month policy: days 1–7 are week 1, 8–14 week 2, and so on.
pub fn week_of_month(day_of_month: u32) -> u32 {
    day_of_month.div_ceil(7)
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PeriodKey::WeekOfMonth { year, month, week } => {
                write!(f, "{year:04}-{month:02}-W{week}")
            }
            PeriodKey::Month { year, month } => write!(f, "{year:04}-{month:02}"),
        }
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}

/// The trades that closed within one period, with their summed profit and the running
/// total carried from every earlier bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeBucket {
    pub key: PeriodKey,
    pub label: String,
    /// Trades in ascending close-time order.
    pub trades: Vec<TradeRecord>,
    pub profit: f64,
    pub trade_count: usize,
    pub average_profit: f64,
    pub cumulative_profit: f64,
}

/// Groups trades into chronological buckets and computes the cumulative profit series.
///
/// Trades whose timestamp cannot be parsed are left out (and logged); they still belong in
/// the non-time-based metrics computed by the `AnalyticsEngine`.
pub fn bucket_trades(trades: &[TradeRecord], granularity: Granularity) -> Vec<TimeBucket> {
    let mut dated: Vec<(NaiveDateTime, &TradeRecord)> = trades
        .iter()
        .filter_map(|trade| match trade.closed_at() {
            Some(at) => Some((at, trade)),
            None => {
                tracing::warn!(
                    symbol = %trade.symbol,
                    timestamp = %trade.timestamp,
                    "Skipping trade with unparseable timestamp in time buckets."
                );
                None
            }
        })
        .collect();
    dated.sort_by_key(|(at, _)| *at);

    let mut grouped: BTreeMap<PeriodKey, Vec<&TradeRecord>> = BTreeMap::new();
    for (at, trade) in dated {
        grouped
            .entry(PeriodKey::for_timestamp(at, granularity))
            .or_default()
            .push(trade);
    }

    let mut cumulative = 0.0;
    grouped
        .into_iter()
        .map(|(key, members)| {
            let profit: f64 = members.iter().map(|t| t.net_profit()).sum();
            let trade_count = members.len();
            cumulative += profit;
            TimeBucket {
                key,
                label: key.label(),
                trades: members.into_iter().cloned().collect(),
                profit,
                trade_count,
                average_profit: profit / trade_count as f64,
                cumulative_profit: cumulative,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::trade;

    #[test]
    fn test_empty_input_has_no_buckets() {
        for granularity in [Granularity::Daily, Granularity::Weekly, Granularity::Monthly] {
            assert!(bucket_trades(&[], granularity).is_empty());
        }
    }

    #[test]
    fn test_daily_buckets_sorted_with_running_total() {
        let trades = vec![
            trade("BTC", "Loss Trade", "-5", "2025-01-03 08:00:00"),
            trade("BTC", "Win Trade", "10", "2025-01-01 12:00:00"),
            trade("ETH", "Win Trade", "4", "2025-01-03 07:00:00"),
            trade("ETH", "Win Trade", "2", "2025-01-01 09:00:00"),
        ];

        let buckets = bucket_trades(&trades, Granularity::Daily);
        let keys: Vec<_> = buckets.iter().map(|b| b.key.to_string()).collect();
        assert_eq!(keys, ["2025-01-01", "2025-01-03"]);

        assert_eq!(buckets[0].profit, 12.0);
        assert_eq!(buckets[0].trade_count, 2);
        assert_eq!(buckets[0].average_profit, 6.0);
        assert_eq!(buckets[0].cumulative_profit, 12.0);
        assert_eq!(buckets[0].label, "Jan 1");
        // Within a bucket, trades are ordered by close time.
        assert_eq!(buckets[1].trades[0].symbol, "ETH");
        assert_eq!(buckets[1].profit, -1.0);
        assert_eq!(buckets[1].cumulative_profit, 11.0);
    }

    #[test]
    fn test_naive_week_of_month_policy() {
        assert_eq!(week_of_month(1), 1);
        assert_eq!(week_of_month(7), 1);
        assert_eq!(week_of_month(8), 2);
        assert_eq!(week_of_month(28), 4);
        assert_eq!(week_of_month(29), 5);
        assert_eq!(week_of_month(31), 5);

        // 2024-12-30 and 2025-01-01 share an ISO week but land in different buckets here.
        let trades = vec![
            trade("BTC", "Win Trade", "1", "2024-12-30 10:00:00"),
            trade("BTC", "Win Trade", "2", "2025-01-01 10:00:00"),
            trade("BTC", "Win Trade", "3", "2025-01-07 23:59:59"),
            trade("BTC", "Win Trade", "4", "2025-01-08 00:00:00"),
        ];
        let buckets = bucket_trades(&trades, Granularity::Weekly);
        let keys: Vec<_> = buckets.iter().map(|b| b.key.to_string()).collect();
        assert_eq!(keys, ["2024-12-W5", "2025-01-W1", "2025-01-W2"]);
        assert_eq!(buckets[1].profit, 5.0);
        assert_eq!(buckets[1].label, "W1");
    }

    #[test]
    fn test_monthly_buckets_and_last_cumulative() {
        let trades = vec![
            trade("BTC", "Win Trade", "$1,000.00", "2025-03-02 10:00:00"),
            trade("ETH", "Loss Trade", "-$250.50", "2025-01-15 10:00:00"),
            trade("SOL", "Win Trade", "75.25", "2025-02-28 10:00:00"),
            trade("SOL", "Loss Trade", "-0.75", "2025-03-31 10:00:00"),
        ];
        let buckets = bucket_trades(&trades, Granularity::Monthly);

        let keys: Vec<_> = buckets.iter().map(|b| b.key.to_string()).collect();
        assert_eq!(keys, ["2025-01", "2025-02", "2025-03"]);
        assert_eq!(buckets[2].label, "Mar 2025");
        assert!(buckets.windows(2).all(|w| w[0].key < w[1].key));

        let sum: f64 = buckets.iter().map(|b| b.profit).sum();
        let last = buckets.last().unwrap().cumulative_profit;
        assert!((last - sum).abs() < 1e-9);
        assert!((last - 824.0).abs() < 1e-9);
    }

    #[test]
    fn test_unparseable_timestamps_are_skipped() {
        let trades = vec![
            trade("BTC", "Win Trade", "10", "not a date"),
            trade("ETH", "Win Trade", "3", "2025-01-01 00:00:00"),
        ];
        let buckets = bucket_trades(&trades, Granularity::Daily);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].trade_count, 1);
        assert_eq!(buckets[0].cumulative_profit, 3.0);
    }

    #[test]
    fn test_bucketing_is_idempotent() {
        let trades = vec![
            trade("BTC", "Win Trade", "1.1", "2025-01-01 00:00:00"),
            trade("ETH", "Loss Trade", "-0.3", "2025-01-09 00:00:00"),
        ];
        assert_eq!(
            bucket_trades(&trades, Granularity::Weekly),
            bucket_trades(&trades, Granularity::Weekly)
        );
    }

    #[test]
    fn test_keys_serialize_as_strings() {
        let key = PeriodKey::WeekOfMonth { year: 2025, month: 4, week: 3 };
        assert_eq!(serde_json::to_value(key).unwrap(), "2025-04-W3");
    }
}
