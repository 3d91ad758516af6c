use analytics::{AggregateMetrics, AnalyticsEngine, MonthlyBreakdown, TimeBucket};
use chrono::{DateTime, NaiveDate, Utc};
use core_types::{DateRange, Granularity, RangePreset, TradeRecord};
use serde::Serialize;

/// What the user picked in the range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangeSelection {
    Preset(RangePreset),
    Custom,
}

impl RangeSelection {
    /// Resolves the selection into concrete dates. `Custom` uses the explicit range.
    pub fn resolve(&self, today: NaiveDate, custom: DateRange) -> DateRange {
        match self {
            RangeSelection::Preset(preset) => DateRange::from_preset(*preset, today),
            RangeSelection::Custom => custom,
        }
    }
}

/// Identifies one refresh. Only the most recently issued ticket may update the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

/// Everything that can happen to the dashboard.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// Also invalidates the outstanding ticket.
    RangeSelected {
        selection: RangeSelection,
        range: DateRange,
    },
    /// Issues a new ticket; any response for an older ticket is discarded from now on.
    RefreshStarted,
    TradesLoaded {
        ticket: RefreshTicket,
        trades: Vec<TradeRecord>,
        at: DateTime<Utc>,
    },
    RefreshFailed {
        ticket: RefreshTicket,
        notice: String,
    },
}

/// The dashboard's view state: selected range, the last accepted trade snapshot, and
/// refresh bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState {
    pub selection: RangeSelection,
    pub range: DateRange,
    pub trades: Vec<TradeRecord>,
    pub loading: bool,
    pub last_updated: Option<DateTime<Utc>>,
    /// A failure message to surface once, cleared by the next refresh.
    pub notice: Option<String>,
    #[serde(skip)]
    generation: u64,
}

/// Everything the presentation layer renders, derived from one trade snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub metrics: AggregateMetrics,
    pub granularity: Granularity,
    pub series: Vec<TimeBucket>,
    pub monthly: MonthlyBreakdown,
}

impl DashboardState {
    pub fn new(selection: RangeSelection, range: DateRange) -> Self {
        Self {
            selection,
            range,
            trades: Vec::new(),
            loading: false,
            last_updated: None,
            notice: None,
            generation: 0,
        }
    }

    /// The ticket a response must carry to be accepted.
    pub fn current_ticket(&self) -> RefreshTicket {
        RefreshTicket(self.generation)
    }

    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Produces the next state.
    pub fn apply(self, event: DashboardEvent) -> Self {
        match event {
            // Anything still in flight was asked for the previous range.
            DashboardEvent::RangeSelected { selection, range } => Self {
                selection,
                range,
                generation: self.generation + 1,
                ..self
            },
            DashboardEvent::RefreshStarted => Self {
                loading: true,
                notice: None,
                generation: self.generation + 1,
                ..self
            },
            DashboardEvent::TradesLoaded { ticket, trades, at } => {
                if !self.is_current(ticket) {
                    tracing::debug!(?ticket, current = self.generation, "Discarding stale trade data.");
                    return self;
                }
                Self {
                    trades,
                    loading: false,
                    last_updated: Some(at),
                    notice: None,
                    ..self
                }
            }
            DashboardEvent::RefreshFailed { ticket, notice } => {
                if !self.is_current(ticket) {
                    tracing::debug!(?ticket, current = self.generation, "Discarding stale refresh failure.");
                    return self;
                }
                Self {
                    trades: Vec::new(),
                    loading: false,
                    notice: Some(notice),
                    ..self
                }
            }
        }
    }

    /// Derives every aggregate shown on the dashboard from the current snapshot.
    pub fn snapshot(&self, granularity: Granularity) -> DashboardSnapshot {
        DashboardSnapshot {
            metrics: AnalyticsEngine::new().calculate(&self.trades),
            granularity,
            series: analytics::bucket_trades(&self.trades, granularity),
            monthly: analytics::monthly_breakdown(&self.trades),
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(
            RangeSelection::Preset(RangePreset::default()),
            DateRange::single_day(NaiveDate::default()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::trade;

    fn state() -> DashboardState {
        let day = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        DashboardState::new(RangeSelection::Preset(RangePreset::Last30Days), DateRange::single_day(day))
    }

    #[test]
    fn test_loaded_trades_replace_snapshot() {
        let started = state().apply(DashboardEvent::RefreshStarted);
        assert!(started.loading);
        let ticket = started.current_ticket();

        let at = Utc::now();
        let loaded = started.apply(DashboardEvent::TradesLoaded {
            ticket,
            trades: vec![trade("BTC", "Win Trade", "10", "2025-04-01 00:00:00")],
            at,
        });
        assert!(!loaded.loading);
        assert_eq!(loaded.trades.len(), 1);
        assert_eq!(loaded.last_updated, Some(at));
    }

    #[test]
    fn test_stale_response_cannot_overwrite_newer_state() {
        let first = state().apply(DashboardEvent::RefreshStarted);
        let stale_ticket = first.current_ticket();
        let second = first.apply(DashboardEvent::RefreshStarted);
        let fresh_ticket = second.current_ticket();
        assert!(stale_ticket < fresh_ticket);

        let loaded = second.apply(DashboardEvent::TradesLoaded {
            ticket: fresh_ticket,
            trades: vec![trade("NEW", "Win Trade", "1", "2025-04-01")],
            at: Utc::now(),
        });
        let after_stale = loaded.clone().apply(DashboardEvent::TradesLoaded {
            ticket: stale_ticket,
            trades: vec![trade("OLD", "Win Trade", "1", "2025-03-01")],
            at: Utc::now(),
        });
        assert_eq!(after_stale, loaded);

        let after_stale_failure = loaded.clone().apply(DashboardEvent::RefreshFailed {
            ticket: stale_ticket,
            notice: "boom".into(),
        });
        assert_eq!(after_stale_failure, loaded);
    }

    #[test]
    fn test_range_change_invalidates_in_flight_refresh() {
        let january = state().apply(DashboardEvent::RefreshStarted);
        let january_ticket = january.current_ticket();

        let march = DateRange::single_day(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let switched = january.apply(DashboardEvent::RangeSelected {
            selection: RangeSelection::Custom,
            range: march,
        });
        assert!(!switched.is_current(january_ticket));

        let after_late_january = switched.clone().apply(DashboardEvent::TradesLoaded {
            ticket: january_ticket,
            trades: vec![trade("JAN", "Win Trade", "1", "2025-01-10")],
            at: Utc::now(),
        });
        assert_eq!(after_late_january, switched);
        assert!(after_late_january.trades.is_empty());

        let late_failure = switched.clone().apply(DashboardEvent::RefreshFailed {
            ticket: january_ticket,
            notice: "Failed to load trading data".into(),
        });
        assert_eq!(late_failure.notice, None);
    }

    #[test]
    fn test_failure_substitutes_empty_list_and_raises_notice() {
        let loaded = state()
            .apply(DashboardEvent::RefreshStarted)
            .apply(DashboardEvent::TradesLoaded {
                ticket: RefreshTicket(1),
                trades: vec![trade("BTC", "Win Trade", "10", "2025-04-01")],
                at: Utc::now(),
            });
        let refreshing = loaded.apply(DashboardEvent::RefreshStarted);
        let ticket = refreshing.current_ticket();
        let failed = refreshing.apply(DashboardEvent::RefreshFailed {
            ticket,
            notice: "Failed to load trading data".into(),
        });

        assert!(failed.trades.is_empty());
        assert!(!failed.loading);
        assert_eq!(failed.notice.as_deref(), Some("Failed to load trading data"));
        assert!(failed.last_updated.is_some());

        // The dashboard still renders zeroed metrics.
        let snapshot = failed.snapshot(Granularity::Daily);
        assert_eq!(snapshot.metrics.profit_percent, "0%");
        assert!(snapshot.series.is_empty());
        assert_eq!(snapshot.monthly.all_time.total_trades, 0);
    }

    #[test]
    fn test_custom_selection_uses_explicit_range() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        let custom = DateRange::single_day(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(RangeSelection::Custom.resolve(today, custom), custom);
        assert_eq!(
            RangeSelection::Preset(RangePreset::Last7Days).resolve(today, custom).start,
            NaiveDate::from_ymd_opt(2025, 3, 26).unwrap()
        );
    }

    #[test]
    fn test_snapshot_uses_requested_granularity() {
        let loaded = state()
            .apply(DashboardEvent::RefreshStarted)
            .apply(DashboardEvent::TradesLoaded {
                ticket: RefreshTicket(1),
                trades: vec![
                    trade("BTC", "Win Trade", "10", "2025-03-01 00:00:00"),
                    trade("ETH", "Loss Trade", "-5", "2025-03-20 00:00:00"),
                ],
                at: Utc::now(),
            });

        let weekly = loaded.snapshot(Granularity::Weekly);
        assert_eq!(weekly.series.len(), 2);
        let monthly = loaded.snapshot(Granularity::Monthly);
        assert_eq!(monthly.series.len(), 1);
        assert_eq!(monthly.series[0].cumulative_profit, 5.0);
        assert_eq!(monthly.metrics.win_rate, 50.0);
        assert_eq!(loaded.snapshot(Granularity::Monthly), monthly);
    }
}
