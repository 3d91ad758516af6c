use core_types::{ProfitField, TradeRecord, TradeStatus};

pub(crate) fn trade(symbol: &str, status: &str, profit: &str, timestamp: &str) -> TradeRecord {
    TradeRecord {
        symbol: symbol.to_string(),
        strategy: "Scalping".to_string(),
        buy_price: 10.0,
        sell_price: 10.5,
        profit_loss_percent: "+5.00%".to_string(),
        profit_loss_dollar: ProfitField::Text(profit.to_string()),
        status: TradeStatus::from(status.to_string()),
        status_coin: None,
        timestamp: timestamp.to_string(),
        value_in_quote: 10.0,
    }
}
