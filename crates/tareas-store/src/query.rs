//! List query parameters and their composition over a task snapshot.

use tareas_core::Task;

/// Query parameters accepted by the list operation.
///
/// All parameters compose (filter first, then search, then sort) over the
/// same working copy.
#[derive(Clone, Debug, Default)]
pub struct ListQuery {
    /// Completion filter. Active whenever supplied: compares against `true`
    /// only for the exact string `"true"`, against `false` for any other
    /// value.
    pub completada: Option<String>,
    /// Case-insensitive substring search over title and description.
    pub q: Option<String>,
    /// Sort key: `titulo` for ascending title order, `fecha` for reverse of
    /// collection order. Anything else preserves insertion order.
    pub ordenar: Option<String>,
}

impl ListQuery {
    /// Apply filter, search, and sort to a snapshot of tasks.
    pub fn apply(&self, mut tasks: Vec<Task>) -> Vec<Task> {
        if let Some(ref completada) = self.completada {
            let wanted = completada == "true";
            tasks.retain(|t| t.completed == wanted);
        }

        if let Some(ref term) = self.q {
            if !term.is_empty() {
                let term = term.to_lowercase();
                tasks.retain(|t| {
                    t.title.to_lowercase().contains(&term)
                        || t.description.to_lowercase().contains(&term)
                });
            }
        }

        match self.ordenar.as_deref() {
            Some("titulo") => {
                tasks.sort_by_key(|t| t.title.to_lowercase());
            }
            Some("fecha") => {
                // No per-record ordering timestamp is tracked; reversing the
                // collection order approximates most-recent-first.
                tasks.reverse();
            }
            _ => {}
        }

        tasks
    }
}
