use serde::{Deserialize, Serialize};

/// Net profit accumulated by a single instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolProfit {
    pub symbol: String,
    pub net_profit: f64,
}

/// Portfolio-level statistics for a set of trades.
///
/// This struct is the output of the `AnalyticsEngine` and is handed to the presentation
/// layer as-is. It has no lifecycle of its own: it is recomputed whenever the trade
/// snapshot changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub total_trades: usize,
    pub win_trades: usize,
    pub loss_trades: usize,
    /// Winning trades over all trades, as a percentage (0–100).
    pub win_rate: f64,
    pub total_profit: f64,
    /// `total_profit` rendered as a signed percentage string, e.g. `"+60.00%"`.
    pub profit_percent: String,
    /// Up to five symbols with positive net profit, best first.
    pub winning_symbols: Vec<SymbolProfit>,
    /// Up to five symbols with negative net profit, worst first.
    pub losing_symbols: Vec<SymbolProfit>,
}

impl AggregateMetrics {
    /// Creates the zero-valued metrics reported for an empty trade list.
    pub fn new() -> Self {
        Self {
            total_trades: 0,
            win_trades: 0,
            loss_trades: 0,
            win_rate: 0.0,
            total_profit: 0.0,
            profit_percent: "0%".to_string(),
            winning_symbols: Vec::new(),
            losing_symbols: Vec::new(),
        }
    }
}

impl Default for AggregateMetrics {
    fn default() -> Self {
        Self::new()
    }
}
