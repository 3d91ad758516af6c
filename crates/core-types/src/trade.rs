use crate::profit::ProfitField;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The closed-set outcome label attached to every reported trade.
///
/// Labels the endpoint may add in the future are kept verbatim in `Unrecognized` so the
/// trade still counts towards totals without landing in either the win or loss bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TradeStatus {
    Win,
    Loss,
    Unrecognized(String),
}

impl TradeStatus {
    pub const WIN_LABEL: &'static str = "Win Trade";
    pub const LOSS_LABEL: &'static str = "Loss Trade";

    pub fn as_str(&self) -> &str {
        match self {
            TradeStatus::Win => Self::WIN_LABEL,
            TradeStatus::Loss => Self::LOSS_LABEL,
            TradeStatus::Unrecognized(label) => label,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, TradeStatus::Win)
    }

    pub fn is_loss(&self) -> bool {
        matches!(self, TradeStatus::Loss)
    }
}

impl From<String> for TradeStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            Self::WIN_LABEL => TradeStatus::Win,
            Self::LOSS_LABEL => TradeStatus::Loss,
            _ => TradeStatus::Unrecognized(label),
        }
    }
}

impl From<TradeStatus> for String {
    fn from(status: TradeStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One closed position as reported by the trade report endpoint.
///
/// Records are immutable once decoded. Derived values (normalized profit, close time)
/// are computed on demand rather than cached so the raw report stays untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    /// Strategy/category label, e.g. "Scalping".
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub strategy: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub buy_price: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sell_price: f64,
    /// Pre-formatted percentage string, displayed as-is.
    #[serde(rename = "profit_loss", default, deserialize_with = "lenient_text")]
    pub profit_loss_percent: String,
    #[serde(rename = "profit_loss_dolar", default, deserialize_with = "lenient_profit")]
    pub profit_loss_dollar: ProfitField,
    pub status: TradeStatus,
    #[serde(rename = "statuscoin", default, skip_serializing_if = "Option::is_none")]
    pub status_coin: Option<i64>,
    /// Close time exactly as received; see [`TradeRecord::closed_at`].
    ///
    /// `null`, a missing key, or a bare number all decode to a string that
    /// [`parse_timestamp`] rejects, so the trade still counts in totals.
    #[serde(rename = "date_time", default, deserialize_with = "lenient_text")]
    pub timestamp: String,
    #[serde(rename = "usdt_value", default, deserialize_with = "lenient_number")]
    pub value_in_quote: f64,
}

/// Scalar shapes accepted where the report should carry text.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseScalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseScalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(LooseScalar::Text(text)) => text,
        Some(LooseScalar::Integer(value)) => value.to_string(),
        Some(LooseScalar::Float(value)) => value.to_string(),
        Some(LooseScalar::Flag(value)) => value.to_string(),
    })
}

/// Prices arrive as numbers, numeric strings, or `null`. Anything unreadable is zero.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ProfitField>::deserialize(deserializer)?
        .map(|field| field.value_or_zero())
        .unwrap_or_default())
}

fn lenient_profit<'de, D>(deserializer: D) -> Result<ProfitField, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ProfitField>::deserialize(deserializer)?.unwrap_or_default())
}

impl TradeRecord {
    /// The normalized dollar profit. May be `NaN` for garbage input; use
    /// [`net_profit`](Self::net_profit) when summing.
    pub fn profit(&self) -> f64 {
        self.profit_loss_dollar.normalize()
    }

    /// The normalized dollar profit with `NaN` treated as zero.
    pub fn net_profit(&self) -> f64 {
        self.profit_loss_dollar.value_or_zero()
    }

    /// Parses the close time. Returns `None` for timestamps that cannot be read.
    pub fn closed_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses the timestamp shapes the report endpoint has been seen to emit.
///
/// Offsets in RFC 3339 input are folded into UTC. A bare date resolves to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
