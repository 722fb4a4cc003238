//! `GET /estadisticas` — task counts by state.

use axum::Json;
use axum::extract::State;
use axum::http::Uri;

use tareas_store::Stats;

use crate::handlers::original_path;
use crate::server::AppState;

/// Aggregate counts over the whole collection.
pub async fn estadisticas(State(state): State<AppState>, uri: Uri) -> Json<Stats> {
    let stats = state.store.read().stats();
    state.audit.log(
        "GET",
        &original_path(&uri),
        200,
        &format!(
            "Consulta de estadísticas: {} tareas, {} completadas",
            stats.total, stats.completadas
        ),
    );
    Json(stats)
}
