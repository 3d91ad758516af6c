use crate::error::ApiError;
use crate::responses::{TradeResponse, decode_records};
use crate::TradeSource;
use async_trait::async_trait;
use core_types::{DateRange, TradeRecord};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

/// Reads trades from a report previously exported to disk.
///
/// The file may hold the endpoint's full `{ success, status, data }` envelope or a bare
/// array of rows. Rows are filtered to the requested range the way the endpoint would;
/// rows whose timestamp cannot be parsed are kept.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReportFile {
    Envelope(TradeResponse),
    Rows(Vec<Value>),
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TradeSource for JsonFileSource {
    async fn fetch_trades(&self, range: &DateRange) -> Result<Vec<TradeRecord>, ApiError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let file: ReportFile =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))?;

        let trades = match file {
            ReportFile::Envelope(envelope) if !envelope.success => {
                return Err(ApiError::Unsuccessful { status: envelope.status });
            }
            ReportFile::Envelope(envelope) => envelope.into_trades(),
            ReportFile::Rows(rows) => decode_records(rows),
        };

        Ok(trades
            .into_iter()
            .filter(|trade| trade.closed_at().is_none_or(|at| range.contains(at)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn january() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
        .unwrap()
    }

    fn row(symbol: &str, date_time: &str) -> Value {
        serde_json::json!({
            "symbol": symbol, "type": "Scalping", "buy_price": 1.0, "sell_price": 1.1,
            "profit_loss": "+10%", "profit_loss_dolar": "$0.10", "status": "Win Trade",
            "date_time": date_time, "usdt_value": 1.0
        })
    }

    #[tokio::test]
    async fn test_bare_array_filtered_to_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let rows = serde_json::json!([
            row("BTC", "2025-01-31 23:59:59"),
            row("ETH", "2025-02-01 00:00:00"),
            row("SOL", "unknown"),
        ]);
        std::fs::write(&path, rows.to_string()).unwrap();

        let trades = JsonFileSource::new(&path).fetch_trades(&january()).await.unwrap();
        let symbols: Vec<_> = trades.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, ["BTC", "SOL"]);
    }

    #[tokio::test]
    async fn test_successful_envelope_filtered_to_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let envelope = serde_json::json!({
            "success": true,
            "status": 200,
            "data": [
                row("ADA", "2024-12-31 23:59:59"),
                row("BTC", "2025-01-01 00:00:00"),
                row("ETH", "2025-01-15T08:00:00Z"),
                { "symbol": "BROKEN" },
                row("XRP", "2025-02-01"),
            ]
        });
        std::fs::write(&path, envelope.to_string()).unwrap();

        let trades = JsonFileSource::new(&path).fetch_trades(&january()).await.unwrap();
        let symbols: Vec<_> = trades.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, ["BTC", "ETH"]);
        assert_eq!(trades[1].profit(), 0.10);
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, r#"{"success": false, "status": 401, "data": []}"#).unwrap();

        let result = JsonFileSource::new(&path).fetch_trades(&january()).await;
        assert!(matches!(result, Err(ApiError::Unsuccessful { status: Some(401) })));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = JsonFileSource::new("/definitely/not/here.json")
            .fetch_trades(&january())
            .await;
        assert!(matches!(result, Err(ApiError::Io(_))));
    }
}
