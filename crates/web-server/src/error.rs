use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Dashboard error: {0}")]
    Dashboard(#[from] dashboard::DashboardError),
    #[error("Sample data error: {0}")]
    SampleData(#[from] sample_data::SampleDataError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Dashboard(dashboard_err) => {
                tracing::error!(error = ?dashboard_err, "Dashboard error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to compute the dashboard".to_string(),
                )
            }
            AppError::SampleData(sample_err) => {
                tracing::error!(error = ?sample_err, "Sample data error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate sample data".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
