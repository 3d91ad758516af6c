use crate::state::{DashboardEvent, DashboardState, RangeSelection};
use api_client::{TradeSource, fetch_or_empty};
use chrono::Utc;
use core_types::DateRange;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Drives refreshes of a [`DashboardState`] against a trade source.
///
/// The lock is never held across the fetch itself, so several refreshes may be in flight;
/// the generation ticket decides which response wins.
pub struct Dashboard<S> {
    source: S,
    state: Arc<Mutex<DashboardState>>,
}

impl<S: TradeSource> Dashboard<S> {
    pub fn new(source: S, initial: DashboardState) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(initial)),
        }
    }

    /// A copy of the current state.
    pub async fn state(&self) -> DashboardState {
        self.state.lock().await.clone()
    }

    /// Re-fetches trades for the selected range.
    ///
    /// Returns `true` if this refresh's result was applied, `false` if a newer refresh
    /// superseded it while the request was in flight.
    pub async fn refresh(&self) -> bool {
        let (ticket, range) = {
            let mut state = self.state.lock().await;
            transition(&mut state, DashboardEvent::RefreshStarted);
            (state.current_ticket(), state.range)
        };

        let outcome = fetch_or_empty(&self.source, &range).await;

        let mut state = self.state.lock().await;
        let applied = state.is_current(ticket);
        let event = match outcome.notice {
            Some(notice) => DashboardEvent::RefreshFailed { ticket, notice },
            None => {
                tracing::info!(count = outcome.trades.len(), range = %range, "Trade data refreshed.");
                DashboardEvent::TradesLoaded {
                    ticket,
                    trades: outcome.trades,
                    at: Utc::now(),
                }
            }
        };
        transition(&mut state, event);
        applied
    }

    /// Switches to a new range and refreshes for it.
    pub async fn select_range(&self, selection: RangeSelection, range: DateRange) -> bool {
        {
            let mut state = self.state.lock().await;
            transition(&mut state, DashboardEvent::RangeSelected { selection, range });
        }
        self.refresh().await
    }
}

fn transition(state: &mut DashboardState, event: DashboardEvent) {
    let current = std::mem::take(state);
    *state = current.apply(event);
}
