use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::infrastructure::AppState;

pub async fn list_options(State(state): State<AppState>) -> Json<Value> {
    let catalog = &state.catalog;

    Json(json!({
        "genres": catalog.genres(),
        "moods": catalog.moods(),
        "levels": catalog.levels()
    }))
}
