use crate::{
    game::GameError,
    models::{RoundSnapshot, TargetRow},
    session::SessionOwner,
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

type ApiError = (StatusCode, Json<Value>);

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceRequest {
    pub row: TargetRow,
}

/// Map a game error onto an HTTP status with a JSON body
fn api_error(err: GameError) -> ApiError {
    let status = match err {
        GameError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        GameError::EmptyDrawPile | GameError::NoRoundInProgress => StatusCode::CONFLICT,
        GameError::NotEnoughWords { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };
    tracing::warn!("Request failed with {}: {}", status, err);
    (status, Json(json!({ "error": err.to_string() })))
}

/// Report a malformed request body in the same JSON shape as game errors
fn rejection_error(rejection: JsonRejection) -> ApiError {
    let status = rejection.status();
    let message = rejection.body_text();
    tracing::warn!("Rejected request body with {}: {}", status, message);
    (status, Json(json!({ "error": message })))
}

/// Create a session and deal its first round
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<RoundSnapshot>), ApiError> {
    let session_id = state.sessions.create(SessionOwner::Api);

    let result = state.sessions.with_session(session_id, |session| {
        session.start_round(&state.words, &mut rand::rng())?;
        session.snapshot()
    });

    match result {
        Ok(snapshot) => {
            tracing::info!("Created session {}", session_id);
            Ok((StatusCode::CREATED, Json(snapshot)))
        }
        Err(e) => {
            state.sessions.remove(session_id);
            Err(api_error(e))
        }
    }
}

pub async fn get_session(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoundSnapshot>, ApiError> {
    state
        .sessions
        .with_session(session_id, |session| session.snapshot())
        .map(Json)
        .map_err(api_error)
}

/// Discard the current round and deal a new one
pub async fn start_round(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoundSnapshot>, ApiError> {
    state
        .sessions
        .with_session(session_id, |session| {
            session.start_round(&state.words, &mut rand::rng())?;
            session.snapshot()
        })
        .map(Json)
        .map_err(api_error)
}

/// Move the top tile of the draw pile into the requested row
pub async fn place_tile(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PlaceRequest>, JsonRejection>,
) -> Result<Json<RoundSnapshot>, ApiError> {
    let Json(payload) = payload.map_err(rejection_error)?;
    state
        .sessions
        .with_session(session_id, |session| {
            let tile = session.place(payload.row)?;
            tracing::debug!(
                "Session {} placed '{}' in {:?}",
                session_id,
                tile.letter,
                payload.row
            );
            session.snapshot()
        })
        .map(Json)
        .map_err(api_error)
}

/// Undo the latest placement; the snapshot is unchanged when there is none
pub async fn undo(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoundSnapshot>, ApiError> {
    state
        .sessions
        .with_session(session_id, |session| {
            if session.undo()?.is_none() {
                tracing::debug!("Session {} has nothing to undo", session_id);
            }
            session.snapshot()
        })
        .map(Json)
        .map_err(api_error)
}

pub async fn delete_session(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(session_id) {
        tracing::info!("Deleted session {}", session_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(GameError::SessionNotFound(session_id)))
    }
}
