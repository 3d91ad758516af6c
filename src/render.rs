use analytics::{AggregateMetrics, MonthlyBreakdown, MonthlyPeriod, SymbolProfit, TimeBucket};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::Granularity;
use dashboard::{DashboardState, TablePage};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Green for gains, red for losses, plain for zero or unknown.
fn signed_cell(text: String, value: f64) -> Cell {
    let cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if value > 0.0 {
        cell.fg(Color::Green)
    } else if value < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

fn dollars(value: f64) -> String {
    format!("${:.2}", value.abs())
}

/// The four headline cards.
pub fn summary_cards(state: &DashboardState, metrics: &AggregateMetrics) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Total Trades", "Bot Accuracy", "Total P/L", "Range"]);

    let accuracy = Cell::new(format!("{:.2}%", metrics.win_rate));
    let accuracy = if metrics.total_trades == 0 {
        accuracy
    } else if metrics.win_rate > 50.0 {
        accuracy.fg(Color::Green)
    } else if metrics.win_rate < 50.0 {
        accuracy.fg(Color::Red)
    } else {
        accuracy
    };

    table.add_row(vec![
        Cell::new(metrics.total_trades).add_attribute(Attribute::Bold),
        accuracy.add_attribute(Attribute::Bold),
        signed_cell(metrics.profit_percent.clone(), metrics.total_profit)
            .add_attribute(Attribute::Bold),
        Cell::new(state.range.to_string()),
    ]);
    table.add_row(vec![
        Cell::new(format!("{:.2}% success rate", metrics.win_rate)),
        Cell::new(format!(
            "{} wins / {} losses",
            metrics.win_trades, metrics.loss_trades
        )),
        Cell::new(dollars(metrics.total_profit)).set_alignment(CellAlignment::Right),
        Cell::new(match state.last_updated {
            Some(at) => format!("Last updated: {}", at.format("%b %d, %Y %H:%M:%S UTC")),
            None => "Never updated".to_string(),
        }),
    ]);
    table
}

pub fn symbol_table(title: &str, symbols: &[SymbolProfit]) -> Table {
    let mut table = new_table();
    table.set_header(vec![title, "Net Profit"]);
    if symbols.is_empty() {
        table.add_row(vec![Cell::new("—"), Cell::new("")]);
    }
    for symbol in symbols {
        table.add_row(vec![
            Cell::new(&symbol.symbol),
            signed_cell(format!("{:+.2}", symbol.net_profit), symbol.net_profit),
        ]);
    }
    table
}

/// The profit-over-time series with its cumulative column.
pub fn series_table(series: &[TimeBucket], granularity: Granularity) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Period".to_string(),
        "Trades".to_string(),
        format!("{granularity} P/L"),
        "Avg P/L".to_string(),
        "Cumulative P/L".to_string(),
    ]);
    for bucket in series {
        table.add_row(vec![
            Cell::new(format!("{} ({})", bucket.label, bucket.key)),
            Cell::new(bucket.trade_count).set_alignment(CellAlignment::Right),
            signed_cell(format!("{:.2}", bucket.profit), bucket.profit),
            signed_cell(format!("{:.2}", bucket.average_profit), bucket.average_profit),
            signed_cell(format!("{:.2}", bucket.cumulative_profit), bucket.cumulative_profit),
        ]);
    }
    table
}

/// Monthly performance, with the all-time row last and emphasised.
pub fn monthly_table(breakdown: &MonthlyBreakdown) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Month", "Total Trades", "Winning", "Losing", "Win %", "Loss %", "Net Profit", "Avg/Trade",
    ]);
    for row in breakdown.rows() {
        let label = Cell::new(row.period.to_string());
        let label = match row.period {
            MonthlyPeriod::AllTime => label.add_attribute(Attribute::Bold),
            MonthlyPeriod::Month { .. } => label,
        };
        let average_sign = if row.average_profit >= 0.0 { "+" } else { "-" };
        table.add_row(vec![
            label,
            Cell::new(row.total_trades).set_alignment(CellAlignment::Right),
            Cell::new(row.winning).fg(Color::Green),
            Cell::new(row.losing).fg(Color::Red),
            Cell::new(format!("{:.2}%", row.winning_pct)).fg(Color::Green),
            Cell::new(format!("{:.2}%", row.losing_pct)).fg(Color::Red),
            signed_cell(dollars(row.net_profit), row.net_profit),
            signed_cell(
                format!("{average_sign}{:.2}", row.average_profit.abs()),
                row.average_profit,
            ),
        ]);
    }
    table
}

pub fn trades_table(page: &TablePage) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Date/Time", "Symbol", "Type", "Buy Price", "Sell Price", "P/L $", "P/L %", "Value (USDT)",
        "Status",
    ]);

    if page.rows.is_empty() {
        table.add_row(vec![Cell::new("No trades found")]);
        return table;
    }

    for trade in &page.rows {
        let when = trade
            .closed_at()
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| trade.timestamp.clone());
        let color = if trade.status.is_win() { Color::Green } else { Color::Red };
        let profit = trade.profit();
        let profit_text = if profit.is_nan() {
            "—".to_string()
        } else {
            format!("{profit:.2}")
        };

        table.add_row(vec![
            Cell::new(when),
            Cell::new(&trade.symbol).add_attribute(Attribute::Bold),
            Cell::new(&trade.strategy),
            Cell::new(format!("{:.4}", trade.buy_price)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", trade.sell_price)).set_alignment(CellAlignment::Right),
            Cell::new(profit_text).fg(color).set_alignment(CellAlignment::Right),
            Cell::new(&trade.profit_loss_percent).fg(color).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", trade.value_in_quote)).set_alignment(CellAlignment::Right),
            Cell::new(trade.status.as_str()).fg(color),
        ]);
    }
    table
}
