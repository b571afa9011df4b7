use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to load the price series: {0}")]
    Source(Box<dyn std::error::Error + Send + Sync>),

    #[error("Analytics calculation error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}
