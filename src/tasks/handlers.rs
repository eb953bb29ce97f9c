//! Task route handlers.
//!
//! Every handler runs to completion against the store it is given and
//! returns the full response. Validation and unknown-id outcomes are
//! ordinary 400 responses; only a failed snapshot write is an `Err`.

use axum::http::StatusCode;
use axum::response::Response;

use crate::http::request::RouteRequest;
use crate::http::response;
use crate::observability::metrics;
use crate::store::{Filter, StoreResult};
use crate::tasks::types::{now_millis, ListQuery, Task, TaskPayload};
use crate::tasks::{TaskStore, TASKS_TABLE};

const ID_NOT_FOUND: &str = "This id does not exists";
const TASK_ID_NOT_FOUND: &str = "This task id does not exists";
const FIELDS_MISSING: &str = "Title or description is missing.";

/// `GET /tasks[?search=term]`
pub fn list_tasks(request: RouteRequest, store: &mut TaskStore) -> StoreResult<Response> {
    let query = request
        .query::<Vec<(String, String)>>()
        .map(ListQuery::from_pairs)
        .unwrap_or_default();

    let filter = query.term().map(|term| {
        Filter::new()
            .field("title", term)
            .field("description", term)
    });
    let tasks = store.select(TASKS_TABLE, filter.as_ref());

    tracing::debug!(count = tasks.len(), search = ?query.term(), "Listed tasks");
    Ok(response::json(StatusCode::OK, &tasks))
}

/// `GET /tasks/:id`
pub fn get_task(request: RouteRequest, store: &mut TaskStore) -> StoreResult<Response> {
    let task = request
        .param("id")
        .and_then(|id| store.find(TASKS_TABLE, id));

    match task {
        Some(task) => Ok(response::json(StatusCode::OK, task)),
        None => Ok(response::message(StatusCode::BAD_REQUEST, ID_NOT_FOUND)),
    }
}

/// `POST /tasks`
pub fn create_task(request: RouteRequest, store: &mut TaskStore) -> StoreResult<Response> {
    let payload = request.json::<TaskPayload>().unwrap_or_default();
    let Some((title, description)) = payload.into_fields() else {
        return Ok(response::text(StatusCode::BAD_REQUEST, FIELDS_MISSING));
    };

    let now = now_millis();
    let mut task = Task::new(title, description, now);
    while store.find(TASKS_TABLE, &task.id).is_some() {
        task = Task::new(task.title, task.description, now);
    }

    let id = task.id.clone();
    store.insert(TASKS_TABLE, task)?;
    metrics::record_task_count(store.len(TASKS_TABLE));

    tracing::info!(task_id = %id, "Task created");
    Ok(response::empty(StatusCode::CREATED))
}

/// `PUT /tasks/:id`
pub fn update_task(request: RouteRequest, store: &mut TaskStore) -> StoreResult<Response> {
    let payload = request.json::<TaskPayload>().unwrap_or_default();
    let Some((title, description)) = payload.into_fields() else {
        // Same envelope as the unknown-id case.
        return Ok(response::message(StatusCode::BAD_REQUEST, ID_NOT_FOUND));
    };

    let Some(mut task) = request
        .param("id")
        .and_then(|id| store.find(TASKS_TABLE, id))
        .cloned()
    else {
        return Ok(response::message(StatusCode::BAD_REQUEST, ID_NOT_FOUND));
    };

    task.edit(title, description, now_millis());
    store.update(TASKS_TABLE, &task.id, task.clone())?;

    tracing::info!(task_id = %task.id, "Task updated");
    Ok(response::json(StatusCode::OK, &task))
}

/// `PATCH /tasks/:id/complete`
pub fn complete_task(request: RouteRequest, store: &mut TaskStore) -> StoreResult<Response> {
    let Some(mut task) = request
        .param("id")
        .and_then(|id| store.find(TASKS_TABLE, id))
        .cloned()
    else {
        return Ok(response::message(StatusCode::BAD_REQUEST, ID_NOT_FOUND));
    };

    task.complete(now_millis());
    store.update(TASKS_TABLE, &task.id, task.clone())?;

    tracing::info!(task_id = %task.id, completed_at = ?task.completed_at, "Task completed");
    Ok(response::json(StatusCode::OK, &task))
}

/// `DELETE /tasks/:id`
pub fn delete_task(request: RouteRequest, store: &mut TaskStore) -> StoreResult<Response> {
    let Some(id) = request
        .param("id")
        .filter(|id| store.find(TASKS_TABLE, id).is_some())
    else {
        return Ok(response::text(StatusCode::BAD_REQUEST, TASK_ID_NOT_FOUND));
    };

    store.delete(TASKS_TABLE, id)?;
    metrics::record_task_count(store.len(TASKS_TABLE));

    tracing::info!(task_id = %id, "Task deleted");
    Ok(response::empty(StatusCode::NO_CONTENT))
}
