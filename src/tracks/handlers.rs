use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use validator::Validate;

use crate::tracks::{MessageResponse, Track, TrackError, TrackStore};

/// Handler for GET /tracks
#[utoipa::path(
    get,
    path = "/tracks",
    responses(
        (status = 200, description = "All tracks in order", body = Vec<Track>)
    ),
    tag = "tracks"
)]
pub async fn list_tracks(State(store): State<Arc<TrackStore>>) -> Json<Vec<Track>> {
    let tracks = store.list().await;
    tracing::debug!("Retrieved {} tracks", tracks.len());
    Json(tracks)
}

/// Handler for GET /track/:id
#[utoipa::path(
    get,
    path = "/track/{id}",
    params(
        ("id" = i64, Path, description = "Track index")
    ),
    responses(
        (status = 200, description = "Track found", body = Track),
        (status = 404, description = "Track not found", body = String, example = json!({"error": "Track not found"}))
    ),
    tag = "tracks"
)]
pub async fn get_track(
    State(store): State<Arc<TrackStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Track>, TrackError> {
    tracing::debug!("Fetching track at index: {}", id);
    Ok(Json(store.get(id).await?))
}

/// Handler for POST /tracks
#[utoipa::path(
    post,
    path = "/tracks",
    request_body = Track,
    responses(
        (status = 200, description = "Track added", body = MessageResponse),
        (status = 400, description = "Missing or empty title or artist", body = String, example = json!({"error": "title: title must not be empty"}))
    ),
    tag = "tracks"
)]
pub async fn add_track(
    State(store): State<Arc<TrackStore>>,
    payload: Result<Json<Track>, JsonRejection>,
) -> Result<Json<MessageResponse>, TrackError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let index = store.add(payload).await;
    tracing::info!("Added track at index: {}", index);
    Ok(Json(MessageResponse::new("Track added successfully")))
}

/// Handler for PUT /track/:id
#[utoipa::path(
    put,
    path = "/track/{id}",
    params(
        ("id" = i64, Path, description = "Track index")
    ),
    request_body = Track,
    responses(
        (status = 200, description = "Track updated", body = MessageResponse),
        (status = 400, description = "Missing or empty title or artist", body = String, example = json!({"error": "title: title must not be empty"})),
        (status = 404, description = "Track not found", body = String, example = json!({"error": "Track not found"}))
    ),
    tag = "tracks"
)]
pub async fn update_track(
    State(store): State<Arc<TrackStore>>,
    Path(id): Path<i64>,
    payload: Result<Json<Track>, JsonRejection>,
) -> Result<Json<MessageResponse>, TrackError> {
    let Json(payload) = payload?;
    payload.validate()?;

    store.update(id, payload).await?;
    tracing::info!("Updated track at index: {}", id);
    Ok(Json(MessageResponse::new("Track updated successfully")))
}

/// Handler for DELETE /track/:id
#[utoipa::path(
    delete,
    path = "/track/{id}",
    params(
        ("id" = i64, Path, description = "Track index")
    ),
    responses(
        (status = 200, description = "Track deleted", body = MessageResponse),
        (status = 404, description = "Track not found", body = String, example = json!({"error": "Track not found"}))
    ),
    tag = "tracks"
)]
pub async fn delete_track(
    State(store): State<Arc<TrackStore>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, TrackError> {
    store.delete(id).await?;
    tracing::info!("Deleted track at index: {}", id);
    Ok(Json(MessageResponse::new("Track deleted successfully")))
}
