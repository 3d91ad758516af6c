//! # Dashboard View State
//!
//! Explicit, independently owned view-state records for the trading dashboard and the
//! pure transitions between them. The async [`Dashboard`] controller is the only place
//! that touches a `TradeSource`; everything else here is synchronous.

pub mod controller;
pub mod error;
pub mod state;
pub mod table;

#[cfg(test)]
mod testing;

pub use controller::Dashboard;
pub use error::DashboardError;
pub use state::{DashboardEvent, DashboardSnapshot, DashboardState, RangeSelection, RefreshTicket};
pub use table::{SortDirection, SortField, TablePage, TradeTableState};
