//! Schema gate for inbound JSON bodies.
//!
//! Both schemas run a single full pass and collect every violation instead of
//! short-circuiting on the first one; the resulting messages are returned to
//! the caller verbatim in the 400 response body. Unknown fields are tolerated.
//!
//! Field presence matters for the patch schema: an explicit `false` or empty
//! string is a present value and must survive normalization.

use serde_json::Value;

use crate::task::{TaskPatch, TaskPayload};

/// Violation message when the body is not a JSON object.
const NOT_AN_OBJECT: &str = "El cuerpo de la petición debe ser un objeto";
/// Violation message for the empty-patch case, naming the updatable fields.
const PATCH_NEEDS_A_FIELD: &str =
    "Debe proporcionar al menos un campo para actualizar: titulo, descripcion o completada.";

/// Validate a create / full-replace body.
///
/// Schema: `titulo` required text of at least 3 characters, `descripcion`
/// optional text (empty allowed), `completada` optional boolean.
pub fn validate_create(body: &Value) -> Result<TaskPayload, Vec<String>> {
    let Some(map) = body.as_object() else {
        return Err(vec![NOT_AN_OBJECT.to_string()]);
    };

    let mut violations = Vec::new();

    let title = match map.get("titulo") {
        None | Some(Value::Null) => {
            violations.push("El título es obligatorio".to_string());
            None
        }
        Some(value) => check_title(value, &mut violations),
    };
    let description = check_description(map.get("descripcion"), &mut violations);
    let completed = check_completed(map.get("completada"), &mut violations);

    if violations.is_empty() {
        Ok(TaskPayload {
            title: title.unwrap_or_default(),
            description,
            completed,
        })
    } else {
        Err(violations)
    }
}

/// Validate a partial-update body.
///
/// Same fields as the full schema, all optional, but at least one of them
/// must be present.
pub fn validate_patch(body: &Value) -> Result<TaskPatch, Vec<String>> {
    let Some(map) = body.as_object() else {
        return Err(vec![NOT_AN_OBJECT.to_string()]);
    };

    let mut violations = Vec::new();

    let title = match map.get("titulo") {
        None | Some(Value::Null) => None,
        Some(value) => check_title(value, &mut violations),
    };
    let description = check_description(map.get("descripcion"), &mut violations);
    let completed = check_completed(map.get("completada"), &mut violations);

    let patch = TaskPatch {
        title,
        description,
        completed,
    };

    if patch.is_empty() && violations.is_empty() {
        return Err(vec![PATCH_NEEDS_A_FIELD.to_string()]);
    }
    if violations.is_empty() {
        Ok(patch)
    } else {
        Err(violations)
    }
}

/// Title rules: text, non-empty, at least 3 characters.
fn check_title(value: &Value, violations: &mut Vec<String>) -> Option<String> {
    let Some(text) = value.as_str() else {
        violations.push("El título debe ser texto".to_string());
        return None;
    };
    if text.is_empty() {
        violations.push("El título no debe estar vacío".to_string());
        return None;
    }
    if text.chars().count() < 3 {
        violations.push("El título debe tener al menos 3 caracteres".to_string());
        return None;
    }
    Some(text.to_string())
}

/// Description rules: text when present, empty allowed.
fn check_description(value: Option<&Value>, violations: &mut Vec<String>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(value) => match value.as_str() {
            Some(text) => Some(text.to_string()),
            None => {
                violations.push("La descripción debe ser texto".to_string());
                None
            }
        },
    }
}

/// Completion flag rules: boolean when present.
fn check_completed(value: Option<&Value>, violations: &mut Vec<String>) -> Option<bool> {
    match value {
        None | Some(Value::Null) => None,
        Some(value) => match value.as_bool() {
            Some(flag) => Some(flag),
            None => {
                violations.push("El estado completada debe ser un booleano".to_string());
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── create schema ────────────────────────────────────────────────

    #[test]
    fn create_minimal_valid() {
        let payload = validate_create(&json!({"titulo": "Comprar pan"})).unwrap();
        assert_eq!(payload.title, "Comprar pan");
        assert!(payload.description.is_none());
        assert!(payload.completed.is_none());
    }

    #[test]
    fn create_full_valid() {
        let payload = validate_create(&json!({
            "titulo": "Comprar pan",
            "descripcion": "En la panadería",
            "completada": true
        }))
        .unwrap();
        assert_eq!(payload.description.as_deref(), Some("En la panadería"));
        assert_eq!(payload.completed, Some(true));
    }

    #[test]
    fn create_missing_title() {
        let violations = validate_create(&json!({})).unwrap_err();
        assert_eq!(violations, vec!["El título es obligatorio"]);
    }

    #[test]
    fn create_empty_title() {
        let violations = validate_create(&json!({"titulo": ""})).unwrap_err();
        assert_eq!(violations, vec!["El título no debe estar vacío"]);
    }

    #[test]
    fn create_short_title_mentions_minimum() {
        let violations = validate_create(&json!({"titulo": "ab"})).unwrap_err();
        assert_eq!(violations, vec!["El título debe tener al menos 3 caracteres"]);
    }

    #[test]
    fn create_title_wrong_type() {
        let violations = validate_create(&json!({"titulo": 42})).unwrap_err();
        assert_eq!(violations, vec!["El título debe ser texto"]);
    }

    #[test]
    fn create_collects_all_violations() {
        let violations = validate_create(&json!({
            "titulo": "ab",
            "descripcion": 1,
            "completada": "sí"
        }))
        .unwrap_err();
        assert_eq!(
            violations,
            vec![
                "El título debe tener al menos 3 caracteres",
                "La descripción debe ser texto",
                "El estado completada debe ser un booleano",
            ]
        );
    }

    #[test]
    fn create_empty_description_allowed() {
        let payload =
            validate_create(&json!({"titulo": "Tres", "descripcion": ""})).unwrap();
        assert_eq!(payload.description.as_deref(), Some(""));
    }

    #[test]
    fn create_unknown_fields_tolerated() {
        let payload =
            validate_create(&json!({"titulo": "Tres", "prioridad": "alta"})).unwrap();
        assert_eq!(payload.title, "Tres");
    }

    #[test]
    fn create_non_object_body() {
        let violations = validate_create(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn create_multibyte_title_counts_chars() {
        // "añí" is 3 characters but more than 3 bytes
        assert!(validate_create(&json!({"titulo": "añí"})).is_ok());
    }

    // ── patch schema ─────────────────────────────────────────────────

    #[test]
    fn patch_empty_body_names_updatable_fields() {
        let violations = validate_patch(&json!({})).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("titulo"));
        assert!(violations[0].contains("descripcion"));
        assert!(violations[0].contains("completada"));
    }

    #[test]
    fn patch_single_field() {
        let patch = validate_patch(&json!({"completada": false})).unwrap();
        assert_eq!(patch.completed, Some(false));
        assert!(patch.title.is_none());
    }

    #[test]
    fn patch_explicit_false_is_present() {
        let patch = validate_patch(&json!({"completada": false})).unwrap();
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_empty_description_is_present() {
        let patch = validate_patch(&json!({"descripcion": ""})).unwrap();
        assert_eq!(patch.description.as_deref(), Some(""));
    }

    #[test]
    fn patch_short_title_rejected() {
        let violations = validate_patch(&json!({"titulo": "ab"})).unwrap_err();
        assert_eq!(violations, vec!["El título debe tener al menos 3 caracteres"]);
    }

    #[test]
    fn patch_only_unknown_fields_rejected() {
        let violations = validate_patch(&json!({"prioridad": "alta"})).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("al menos un campo"));
    }

    #[test]
    fn patch_collects_all_violations() {
        let violations =
            validate_patch(&json!({"titulo": 1, "completada": "no"})).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
