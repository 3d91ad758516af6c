use crate::error::ApiError;
use async_trait::async_trait;
use configuration::ApiConfig;
use core_types::{DateRange, TradeRecord};
use std::time::Duration;

pub mod error;
pub mod file_source;
pub mod responses;
// --- Public API ---
pub use file_source::JsonFileSource;
pub use responses::TradeResponse;

/// Path of the trade report endpoint, relative to the configured base URL.
pub const REPORT_PATH: &str = "/api/v1/getallreport";

/// The one message shown to the user when a refresh fails, whatever the cause.
pub const FAILED_NOTICE: &str = "Failed to load trading data";

/// The abstract interface for anything that can supply reported trades.
/// Implementations can be swapped (remote endpoint, exported file, test double)
/// without touching the dashboard.
#[async_trait]
pub trait TradeSource: Send + Sync {
    /// Fetches every trade closed within the inclusive date range.
    async fn fetch_trades(&self, range: &DateRange) -> Result<Vec<TradeRecord>, ApiError>;
}

/// A client for the remote trade report endpoint.
#[derive(Clone)]
pub struct ReportClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ReportClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        if config.api_key.is_empty() {
            tracing::warn!("No API key configured; the report endpoint will likely reject requests.");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TradeSource for ReportClient {
    async fn fetch_trades(&self, range: &DateRange) -> Result<Vec<TradeRecord>, ApiError> {
        let url = format!("{}{}", self.base_url, REPORT_PATH);
        let (start_date, end_date) = range.query_dates();
        tracing::info!(%start_date, %end_date, "Requesting trade report.");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        let text = response.text().await?;
        let envelope: TradeResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))?;

        if !envelope.success {
            return Err(ApiError::Unsuccessful { status: envelope.status });
        }

        let trades = envelope.into_trades();
        tracing::info!(count = trades.len(), "Trade report received.");
        Ok(trades)
    }
}

/// The result of a fetch that is never allowed to fail.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub trades: Vec<TradeRecord>,
    /// Set exactly once when the fetch failed; meant to be shown to the user.
    pub notice: Option<String>,
}

impl FetchOutcome {
    pub fn is_failure(&self) -> bool {
        self.notice.is_some()
    }
}

/// Fetches trades, substituting an empty list and a user-facing notice on any failure.
///
/// Transport errors, non-success statuses and `success: false` bodies are all treated the
/// same way. There is no retry.
pub async fn fetch_or_empty<S>(source: &S, range: &DateRange) -> FetchOutcome
where
    S: TradeSource + ?Sized,
{
    match source.fetch_trades(range).await {
        Ok(trades) => FetchOutcome { trades, notice: None },
        Err(e) => {
            tracing::error!(error = %e, range = %range, "Error fetching trade data.");
            FetchOutcome {
                trades: Vec::new(),
                notice: Some(FAILED_NOTICE.to_string()),
            }
        }
    }
}
