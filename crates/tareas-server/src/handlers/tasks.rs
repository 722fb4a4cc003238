//! Task CRUD handlers.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use serde_json::{Value, json};

use tareas_core::validate::{validate_create, validate_patch};
use tareas_core::{Task, TaskError};
use tareas_store::ListQuery;

use crate::error::ApiError;
use crate::handlers::original_path;
use crate::server::AppState;

/// `GET /tareas` — list with filter, search, and sort.
///
/// The `filtros` echo carries every supplied query parameter, known or not;
/// only the recognized ones influence the result.
pub async fn list(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<BTreeMap<String, String>>,
) -> Json<Value> {
    let query = ListQuery {
        completada: params.get("completada").cloned(),
        q: params.get("q").cloned(),
        ordenar: params.get("ordenar").cloned(),
    };
    let tareas = state.store.read().list(&query);
    let filtros = serde_json::to_value(&params).unwrap_or_default();

    state.audit.log(
        "GET",
        &original_path(&uri),
        200,
        &format!("Listando {} tareas (Filtros: {filtros})", tareas.len()),
    );

    Json(json!({
        "total": tareas.len(),
        "tareas": tareas,
        "filtros": filtros,
    }))
}

/// `GET /tareas/{id}` — fetch one task.
pub async fn get_one(
    State(state): State<AppState>,
    uri: Uri,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let path = original_path(&uri);
    let task = parse_id(&id).and_then(|id| state.store.read().find(id).cloned());

    let Some(task) = task else {
        state.audit.log(
            "GET",
            &path,
            404,
            &format!("Fallo en Lectura - Tarea ID {id} no encontrada"),
        );
        return Err(ApiError::NotFound);
    };

    state.audit.log(
        "GET",
        &path,
        200,
        &format!("Lectura exitosa de Tarea ID {} ({})", task.id, task.title),
    );
    Ok(Json(task))
}

/// `POST /tareas` — create a task.
pub async fn create(
    State(state): State<AppState>,
    uri: Uri,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = validate_create(&parse_body(body)?)
        .map_err(|detalles| ApiError::Validation { detalles })?;

    let tarea = state.store.write().create(payload);
    state.audit.log(
        "POST",
        &original_path(&uri),
        201,
        &format!("Creación exitosa: Tarea ID {} ({})", tarea.id, tarea.title),
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({ "mensaje": "Tarea creada exitosamente", "tarea": tarea })),
    ))
}

/// `PUT /tareas/{id}` — full update, omitted optional fields reset.
pub async fn replace(
    State(state): State<AppState>,
    uri: Uri,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let path = original_path(&uri);
    let payload = validate_create(&parse_body(body)?)
        .map_err(|detalles| ApiError::Validation { detalles })?;

    let result = match parse_id(&id) {
        Some(id) => state.store.write().replace(id, payload),
        None => Err(TaskError::not_found(&id)),
    };
    let tarea = result.map_err(|err| {
        store_error(
            &state,
            "PUT",
            &path,
            format!("Fallo en Actualización (PUT) - Tarea ID {id} no encontrada"),
            err,
        )
    })?;

    state.audit.log(
        "PUT",
        &path,
        200,
        &format!(
            "Actualización (PUT) exitosa de Tarea ID {} ({})",
            tarea.id, tarea.title
        ),
    );
    Ok(Json(json!({
        "mensaje": "Tarea actualizada completamente",
        "tarea": tarea,
    })))
}

/// `PATCH /tareas/{id}` — partial update, only supplied fields applied.
pub async fn patch_one(
    State(state): State<AppState>,
    uri: Uri,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let path = original_path(&uri);
    let patch = validate_patch(&parse_body(body)?)
        .map_err(|detalles| ApiError::Validation { detalles })?;

    let result = match parse_id(&id) {
        Some(id) => state.store.write().patch(id, patch),
        None => Err(TaskError::not_found(&id)),
    };
    let (tarea, campos) = result.map_err(|err| {
        store_error(
            &state,
            "PATCH",
            &path,
            format!("Fallo en Actualización (PATCH) - Tarea ID {id} no encontrada"),
            err,
        )
    })?;

    state.audit.log(
        "PATCH",
        &path,
        200,
        &format!(
            "Actualización (PATCH) parcial de Tarea ID {} - Campos: [{}]",
            tarea.id,
            campos.join(", ")
        ),
    );
    Ok(Json(json!({
        "mensaje": "Tarea actualizada parcialmente",
        "tarea": tarea,
    })))
}

/// `DELETE /tareas/{id}` — detach and return the task.
pub async fn remove(
    State(state): State<AppState>,
    uri: Uri,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let path = original_path(&uri);

    let result = match parse_id(&id) {
        Some(id) => state.store.write().remove(id),
        None => Err(TaskError::not_found(&id)),
    };
    let tarea = result.map_err(|err| {
        store_error(
            &state,
            "DELETE",
            &path,
            format!("Fallo en Eliminación - Tarea ID {id} no encontrada"),
            err,
        )
    })?;

    state.audit.log(
        "DELETE",
        &path,
        200,
        &format!("Eliminación exitosa: Tarea ID {} ({})", tarea.id, tarea.title),
    );
    Ok(Json(json!({
        "mensaje": "Tarea eliminada exitosamente",
        "tarea": tarea,
    })))
}

/// Coerce a path identifier to an integer by its leading decimal digits, so
/// `5abc` resolves to id 5. Identifiers with no leading digits never match.
fn parse_id(raw: &str) -> Option<u64> {
    let end = raw
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}

/// Unwrap the JSON body, converting any extraction failure into the
/// malformed-body 400 before handler logic runs.
fn parse_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(_) => Err(ApiError::BadJson),
    }
}

/// Map a store error onto the wire contract, appending the audit line the
/// error path requires (404 and 500 are logged, validation is not).
fn store_error(
    state: &AppState,
    method: &str,
    path: &str,
    not_found_message: String,
    err: TaskError,
) -> ApiError {
    match err {
        TaskError::NotFound { .. } => {
            state.audit.log(method, path, 404, &not_found_message);
            ApiError::NotFound
        }
        TaskError::Validation { details } => ApiError::Validation { detalles: details },
        TaskError::Internal { message } => {
            state
                .audit
                .log(method, path, 500, &format!("Error Interno: {message}"));
            ApiError::Internal {
                message,
                dev_mode: state.dev_mode,
            }
        }
    }
}
