//! The in-memory task collection and its operations.

use serde::Serialize;
use tracing::debug;

use tareas_core::errors::Result;
use tareas_core::task::now_iso;
use tareas_core::{Task, TaskError, TaskPatch, TaskPayload};

use crate::query::ListQuery;

/// Aggregate counts over the collection.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct Stats {
    /// Total number of tasks.
    pub total: usize,
    /// Tasks with the completion flag set.
    pub completadas: usize,
    /// Tasks still pending (`total - completadas`).
    pub pendientes: usize,
    /// Completed percentage, `0` when the collection is empty.
    #[serde(rename = "porcentajeCompletadas")]
    pub porcentaje_completadas: f64,
}

/// Exclusive owner of the task collection and the id counter.
///
/// Ids are assigned monotonically starting at 1 and never reused, even after
/// deletions. All read operations hand out snapshots or clones, never a view
/// into the live collection.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of tasks currently held.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Find a task by id.
    pub fn find(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Snapshot of the collection with filter, search, and sort applied.
    pub fn list(&self, query: &ListQuery) -> Vec<Task> {
        query.apply(self.tasks.clone())
    }

    /// Create a task from a validated payload.
    ///
    /// Assigns the next id, applies defaults (`descripcion` empty, pending
    /// state regardless of the payload flag), and stamps the creation time.
    pub fn create(&mut self, payload: TaskPayload) -> Task {
        let task = Task {
            id: self.next_id,
            title: payload.title,
            description: payload.description.unwrap_or_default(),
            completed: false,
            created_at: now_iso(),
            updated_at: None,
        };
        self.next_id += 1;
        self.tasks.push(task.clone());
        debug!(id = task.id, "task created");
        task
    }

    /// Full overwrite of a task's mutable fields.
    ///
    /// Omitted optional fields fall back to their defaults (`descripcion`
    /// empty, `completada` false). Stamps the update time.
    pub fn replace(&mut self, id: u64, payload: TaskPayload) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::not_found(id.to_string()))?;

        task.title = payload.title;
        task.description = payload.description.unwrap_or_default();
        task.completed = payload.completed.unwrap_or(false);
        task.updated_at = Some(now_iso());
        Ok(task.clone())
    }

    /// Overwrite only the fields present in the patch.
    ///
    /// Presence is what counts: an explicit `false` or empty string still
    /// applies. Returns the updated task together with the wire names of the
    /// fields that were applied.
    pub fn patch(&mut self, id: u64, patch: TaskPatch) -> Result<(Task, Vec<&'static str>)> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::not_found(id.to_string()))?;

        let applied = patch.field_names();
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        task.updated_at = Some(now_iso());
        Ok((task.clone(), applied))
    }

    /// Detach a task from the collection and return it.
    pub fn remove(&mut self, id: u64) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskError::not_found(id.to_string()))?;
        let task = self.tasks.remove(index);
        debug!(id = task.id, "task removed");
        Ok(task)
    }

    /// Aggregate counts over the whole collection.
    pub fn stats(&self) -> Stats {
        let total = self.tasks.len();
        let completadas = self.tasks.iter().filter(|t| t.completed).count();
        #[allow(clippy::cast_precision_loss)]
        let porcentaje_completadas = if total > 0 {
            completadas as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Stats {
            total,
            completadas,
            pendientes: total - completadas,
            porcentaje_completadas,
        }
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
