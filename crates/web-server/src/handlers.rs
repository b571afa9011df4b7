use crate::{AppState, error::AppError};
use analytics::MetricsSummary;
use axum::{Json, extract::State};
use csv_data::CsvSeriesSource;
use dashboard::DashboardSnapshot;
use sample_data::RandomWalkGenerator;
use std::sync::Arc;

/// # GET /api/health
pub async fn health() -> &'static str {
    "OK"
}

/// # GET /api/dashboard
/// Loads a new series and returns it with every derived chart input.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let snapshot = build_snapshot(&state)?;
    Ok(Json(snapshot))
}

/// # GET /api/metrics
/// Same as the dashboard endpoint, trimmed to the metric cards.
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MetricsSummary>, AppError> {
    let snapshot = build_snapshot(&state)?;
    Ok(Json(snapshot.metrics))
}

fn build_snapshot(state: &AppState) -> Result<DashboardSnapshot, AppError> {
    let edges = &state.config.dashboard.histogram_edges;
    let snapshot = match &state.config.data.csv_path {
        Some(path) => DashboardSnapshot::build(&mut CsvSeriesSource::new(path), edges)?,
        None => {
            let mut generator = RandomWalkGenerator::new(state.config.sample_data.clone())?;
            DashboardSnapshot::build(&mut generator, edges)?
        }
    };
    Ok(snapshot)
}
