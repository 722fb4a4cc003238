//! API description root and the catch-all not-found handler.

use axum::Json;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use serde_json::{Value, json};

use crate::handlers::original_path;
use crate::server::AppState;

/// Suggested routes returned with every unmatched-route 404.
const SUGERENCIAS: [&str; 3] = [
    "GET / - Información de la API",
    "GET /tareas - Listar tareas",
    "POST /tareas - Crear tarea",
];

/// `GET /` — endpoint map and usage examples.
pub async fn api_info(State(state): State<AppState>, uri: Uri) -> Json<Value> {
    state.audit.log(
        "GET",
        &original_path(&uri),
        200,
        "Consulta de información de la API",
    );

    Json(json!({
        "mensaje": "API de Gestión de Tareas",
        "version": "1.0.0",
        "endpoints": {
            "GET /": "Esta información",
            "GET /tareas": "Listar tareas",
            "GET /tareas/:id": "Obtener tarea específica",
            "POST /tareas": "Crear nueva tarea",
            "PUT /tareas/:id": "Actualizar tarea completa",
            "PATCH /tareas/:id": "Actualizar tarea parcial",
            "DELETE /tareas/:id": "Eliminar tarea",
            "GET /estadisticas": "Conteo de tareas por estado",
        },
        "ejemplos": {
            "crear": "POST /tareas con body: {\"titulo\": \"Mi tarea\", \"descripcion\": \"Descripción\"}",
            "filtrar": "GET /tareas?completada=false",
            "buscar": "GET /tareas?q=api",
            "estadisticas": "GET /estadisticas",
        },
    }))
}

/// Catch-all for unmatched routes: 404 plus a fixed suggestion list.
pub async fn fallback(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> (StatusCode, Json<Value>) {
    let path = original_path(&uri);
    state
        .audit
        .log(method.as_str(), &path, 404, "Ruta no encontrada");

    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Ruta no encontrada",
            "metodo": method.as_str(),
            "ruta": path,
            "sugerencias": SUGERENCIAS,
        })),
    )
}
