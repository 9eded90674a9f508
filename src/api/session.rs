use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::{Action, Session};
use crate::infrastructure::AppState;
use crate::services::FetchOutcome;

pub async fn get_state(State(state): State<AppState>) -> Json<Session> {
    Json(state.store.snapshot())
}

/// Selection actions from clients; loading, error and response
/// transitions belong to the fetcher and are refused here
pub async fn dispatch_action(
    State(state): State<AppState>,
    Json(action): Json<Action>,
) -> Response {
    if action.is_internal() {
        tracing::warn!("Refusing client dispatch of internal action {:?}", action);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "Action is not accepted from clients" })),
        )
            .into_response();
    }

    if let Action::Unrecognized(kind) = &action {
        tracing::debug!("Ignoring unrecognized action type '{}'", kind);
    }
    state.store.dispatch(action);
    Json(state.store.snapshot()).into_response()
}

/// Trigger a recommendation request and answer with the resulting state.
///
/// The request runs on its own task: a client that disconnects does not
/// cancel it.
pub async fn request_recommendation(State(state): State<AppState>) -> impl IntoResponse {
    let outcome = match state.recommendations.spawn_recommendation(&state.store) {
        Ok(handle) => match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!("Recommendation task failed: {}", e);
                None
            }
        },
        Err(outcome) => Some(outcome),
    };

    let status = match outcome {
        Some(FetchOutcome::Busy) => StatusCode::CONFLICT,
        Some(_) => StatusCode::OK,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(state.store.snapshot()))
}
