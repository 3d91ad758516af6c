use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How trades are grouped for the profit-over-time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    /// Calendar month plus `ceil(day / 7)`. Not ISO weeks.
    Weekly,
    Monthly,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Daily => "Daily",
            Granularity::Weekly => "Weekly",
            Granularity::Monthly => "Monthly",
        };
        f.write_str(name)
    }
}

impl FromStr for Granularity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Granularity::Daily),
            "weekly" | "week" | "w" => Ok(Granularity::Weekly),
            "monthly" | "month" | "m" => Ok(Granularity::Monthly),
            other => Err(CoreError::InvalidInput("granularity".into(), other.into())),
        }
    }
}

/// The quick-select ranges offered by the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RangePreset {
    #[serde(rename = "24H")]
    Last24Hours,
    #[serde(rename = "7D")]
    Last7Days,
    #[default]
    #[serde(rename = "30D")]
    Last30Days,
    #[serde(rename = "YTD")]
    YearToDate,
    #[serde(rename = "1Y")]
    LastYear,
}

impl RangePreset {
    pub const ALL: [RangePreset; 5] = [
        RangePreset::Last24Hours,
        RangePreset::Last7Days,
        RangePreset::Last30Days,
        RangePreset::YearToDate,
        RangePreset::LastYear,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            RangePreset::Last24Hours => "24H",
            RangePreset::Last7Days => "7D",
            RangePreset::Last30Days => "30D",
            RangePreset::YearToDate => "YTD",
            RangePreset::LastYear => "1Y",
        }
    }
}

impl fmt::Display for RangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RangePreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangePreset::ALL
            .into_iter()
            .find(|preset| preset.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::InvalidInput("range preset".into(), s.into()))
    }
}
