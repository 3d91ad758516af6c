use core_types::TradeRecord;
use serde::Deserialize;
use serde_json::Value;

/// The envelope returned by `GET /api/v1/getallreport`.
///
/// Rows are kept as raw JSON so that one malformed record cannot sink the whole response;
/// see [`TradeResponse::into_trades`].
#[derive(Debug, Clone, Deserialize)]
pub struct TradeResponse {
    pub success: bool,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub data: Vec<Value>,
}

impl TradeResponse {
    /// Decodes every row, skipping (and logging) the ones that are not valid trades.
    pub fn into_trades(self) -> Vec<TradeRecord> {
        decode_records(self.data)
    }
}

pub(crate) fn decode_records(rows: Vec<Value>) -> Vec<TradeRecord> {
    let total = rows.len();
    let trades: Vec<TradeRecord> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<TradeRecord>(row) {
            Ok(trade) => Some(trade),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed trade record.");
                None
            }
        })
        .collect();

    if trades.len() < total {
        tracing::warn!(decoded = trades.len(), total, "Some trade records could not be decoded.");
    }
    trades
}
