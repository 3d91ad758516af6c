use crate::report::{AggregateMetrics, SymbolProfit};
use core_types::TradeRecord;
use std::cmp::Ordering;
use std::collections::HashMap;

/// How many symbols each of the winning/losing leaderboards holds.
pub const TOP_SYMBOLS: usize = 5;

/// A stateless calculator for deriving portfolio statistics from reported trades.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating portfolio metrics.
    ///
    /// The order of `trades` does not affect the result. An empty slice yields
    /// [`AggregateMetrics::new`], which is also the only case where the win rate
    /// would otherwise divide by zero.
    pub fn calculate(&self, trades: &[TradeRecord]) -> AggregateMetrics {
        let mut report = AggregateMetrics::new();

        if trades.is_empty() {
            return report;
        }

        self.calculate_outcomes(trades, &mut report);
        self.calculate_profitability(trades, &mut report);
        self.calculate_symbol_rankings(trades, &mut report);

        tracing::debug!(
            total = report.total_trades,
            wins = report.win_trades,
            losses = report.loss_trades,
            profit = report.total_profit,
            "Calculated trade metrics"
        );
        report
    }

    /// Counts wins and losses by status label.
    fn calculate_outcomes(&self, trades: &[TradeRecord], report: &mut AggregateMetrics) {
        report.total_trades = trades.len();
        report.win_trades = trades.iter().filter(|t| t.status.is_win()).count();
        report.loss_trades = trades.iter().filter(|t| t.status.is_loss()).count();
        report.win_rate = report.win_trades as f64 / report.total_trades as f64 * 100.0;
    }

    fn calculate_profitability(&self, trades: &[TradeRecord], report: &mut AggregateMetrics) {
        report.total_profit = trades.iter().map(TradeRecord::net_profit).sum();
        report.profit_percent = format_signed_percent(report.total_profit);
    }

    /// Builds the top winning and losing symbol lists.
    fn calculate_symbol_rankings(&self, trades: &[TradeRecord], report: &mut AggregateMetrics) {
        let mut ranked = net_profit_by_symbol(trades);
        // Stable sort: equal totals keep first-seen order.
        ranked.sort_by(|a, b| b.net_profit.partial_cmp(&a.net_profit).unwrap_or(Ordering::Equal));

        report.winning_symbols = ranked
            .iter()
            .filter(|s| s.net_profit > 0.0)
            .take(TOP_SYMBOLS)
            .cloned()
            .collect();

        let mut losers: Vec<SymbolProfit> =
            ranked.into_iter().filter(|s| s.net_profit < 0.0).collect();
        losers.sort_by(|a, b| a.net_profit.partial_cmp(&b.net_profit).unwrap_or(Ordering::Equal));
        losers.truncate(TOP_SYMBOLS);
        report.losing_symbols = losers;
    }
}

/// Sums net profit per symbol, preserving the order in which symbols first appear.
pub fn net_profit_by_symbol(trades: &[TradeRecord]) -> Vec<SymbolProfit> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<SymbolProfit> = Vec::new();

    for trade in trades {
        let slot = *index.entry(trade.symbol.as_str()).or_insert_with(|| {
            totals.push(SymbolProfit {
                symbol: trade.symbol.clone(),
                net_profit: 0.0,
            });
            totals.len() - 1
        });
        totals[slot].net_profit += trade.net_profit();
    }

    totals
}

/// Formats a total as `+12.34%` / `-12.34%`. Non-negative values always carry a `+`.
pub fn format_signed_percent(value: f64) -> String {
    // Collapse -0.0 so it renders as "+0.00%" rather than "-0.00%".
    let value = if value == 0.0 { 0.0 } else { value };
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.2}%")
}
