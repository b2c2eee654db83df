//! Generated CRUD handlers: list, read, create, delete, update.
//!
//! Each handler borrows a handle from the pool for the duration of the
//! request, delegates to the persistence collaborator, and serializes the
//! borrowed record into an owned body before the handle drops back into the
//! pool. The check order within each handler is fixed: id parse, then fetch,
//! then body decode or mutation, each failure mapping to its own status.

use crate::entity::Entity;
use crate::error::AppError;
use crate::repository::Repository;
use crate::response;
use crate::state::ModelState;
use axum::{
    extract::{Host, Path, State},
    Json,
};
use serde_json::Value;

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::InvalidId(raw.to_string()))
}

/// Overwrite the fields named by `patch` on a fetched record, keeping the
/// rest. Serializes through JSON so the merge works for any entity type.
fn merge_into<T: Entity>(record: &mut T, patch: Value) -> Result<(), AppError> {
    let Value::Object(patch) = patch else {
        return Err(AppError::BadBody("body must be a JSON object".into()));
    };
    let mut base =
        serde_json::to_value(&*record).map_err(|e| AppError::Internal(e.to_string()))?;
    match &mut base {
        Value::Object(fields) => fields.extend(patch),
        _ => return Err(AppError::Internal("entity must serialize to an object".into())),
    }
    *record = serde_json::from_value(base).map_err(|e| AppError::BadBody(e.to_string()))?;
    Ok(())
}

/// GET /{name}: all records inside the HAL list envelope.
pub async fn list<T: Entity, R: Repository<T>>(
    State(state): State<ModelState<T, R>>,
    Host(host): Host,
) -> Result<Json<Value>, AppError> {
    let mut rows = state.pool.acquire_collection();
    state.repo.find_all(&mut rows).await?;
    let name = state.descriptor.name();
    let href = format!("{}{}/{}", host, state.base_path, name);
    Ok(Json(response::embedded_list(name, &rows, &href)?))
}

/// GET /{name}/:id: one record by primary key.
pub async fn read<T: Entity, R: Repository<T>>(
    State(state): State<ModelState<T, R>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let mut record = state.pool.acquire();
    state.repo.find_by_id(&mut record, id).await?;
    Ok(Json(response::record_body(&*record)?))
}

/// POST /{name}: decode the body as a whole record, insert it, echo it back.
pub async fn create<T: Entity, R: Repository<T>>(
    State(state): State<ModelState<T, R>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let mut record = state.pool.acquire();
    // Whole-record assignment: a recycled handle keeps no previous fields.
    *record = serde_json::from_value(body).map_err(|e| AppError::BadBody(e.to_string()))?;
    state.repo.create(&record).await?;
    Ok(Json(response::record_body(&*record)?))
}

/// DELETE /{name}/:id: fetch then delete, acknowledging with a fixed body.
pub async fn delete<T: Entity, R: Repository<T>>(
    State(state): State<ModelState<T, R>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let mut record = state.pool.acquire();
    state.repo.find_by_id(&mut record, id).await?;
    state.repo.delete(&record).await?;
    Ok(Json(response::deleted()))
}

/// PUT /{name}/:id: fetch, merge the body over the record, save, echo it back.
pub async fn update<T: Entity, R: Repository<T>>(
    State(state): State<ModelState<T, R>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    let mut record = state.pool.acquire();
    state.repo.find_by_id(&mut record, id).await?;
    merge_into(&mut *record, body)?;
    state.repo.save(&record).await?;
    Ok(Json(response::record_body(&*record)?))
}
