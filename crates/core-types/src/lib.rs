pub mod enums;
pub mod error;
pub mod profit;
pub mod range;
pub mod trade;

// Re-export the core types to provide a clean public API.
pub use enums::{Granularity, RangePreset};
pub use error::CoreError;
pub use profit::ProfitField;
pub use range::DateRange;
pub use trade::{TradeRecord, TradeStatus, parse_timestamp};
