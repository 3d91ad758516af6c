use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Unknown sort field '{0}'")]
    UnknownSortField(String),
}
