use core_types::{ProfitField, TradeRecord, TradeStatus};

/// Builds a report row with the fields the aggregators look at.
pub(crate) fn trade(symbol: &str, status: &str, profit: &str, timestamp: &str) -> TradeRecord {
    TradeRecord {
        symbol: symbol.to_string(),
        strategy: "Scalping".to_string(),
        buy_price: 100.0,
        sell_price: 101.0,
        profit_loss_percent: "+1.00%".to_string(),
        profit_loss_dollar: ProfitField::Text(profit.to_string()),
        status: TradeStatus::from(status.to_string()),
        status_coin: None,
        timestamp: timestamp.to_string(),
        value_in_quote: 100.0,
    }
}
