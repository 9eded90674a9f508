//! Server-rendered form page.
//!
//! Every control posts back here, dispatches into the store and redirects to
//! the page again. Nothing in this module decides anything on its own.
//! While a request is outstanding the page reloads itself every second.

use askama::Template;
use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::domain::{Catalog, FieldItem, FieldKind, SelectField, Session};
use crate::infrastructure::AppState;

struct FieldView {
    id: &'static str,
    placeholder: &'static str,
    placeholder_selected: bool,
    items: Vec<FieldItem>,
}

impl From<&SelectField<'_>> for FieldView {
    fn from(field: &SelectField<'_>) -> Self {
        Self {
            id: field.id(),
            placeholder: field.placeholder(),
            placeholder_selected: field.placeholder_selected(),
            items: field.items(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    fields: Vec<FieldView>,
    is_loading: bool,
    has_error: bool,
    error: &'a str,
    responses: &'a [String],
}

/// The three selection fields for the current session
pub fn fields<'a>(session: &'a Session, catalog: &'a Catalog) -> [SelectField<'a>; 3] {
    [
        SelectField::new(
            FieldKind::Genre,
            catalog.genres().iter().map(String::as_str),
            &session.genre,
        ),
        SelectField::new(
            FieldKind::Mood,
            catalog.moods_for(&session.genre).iter().map(String::as_str),
            &session.mood,
        ),
        SelectField::new(FieldKind::Level, catalog.levels(), &session.level),
    ]
}

pub fn render_page(session: &Session, catalog: &Catalog) -> Result<String, askama::Error> {
    let template = IndexTemplate {
        fields: fields(session, catalog).iter().map(FieldView::from).collect(),
        is_loading: session.is_loading,
        has_error: session.error.is_some(),
        error: session.error.as_deref().unwrap_or_default(),
        responses: &session.responses,
    };
    template.render()
}

pub async fn index(State(state): State<AppState>) -> Response {
    let session = state.store.snapshot();

    match render_page(&session, &state.catalog) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Deserialize)]
pub struct SelectForm {
    #[serde(default)]
    pub value: String,
}

pub async fn select(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Form(form): Form<SelectForm>,
) -> Response {
    let Some(kind) = FieldKind::from_id(&field) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let snapshot = state.store.snapshot();
    let current = fields(&snapshot, &state.catalog);
    if let Some(select_field) = current.iter().find(|f| f.kind == kind) {
        select_field.pick(&form.value, |value| state.store.dispatch(kind.action(value)));
    }

    Redirect::to("/").into_response()
}

/// Start a request in the background and go straight back to the page,
/// which keeps refreshing itself while the request is outstanding
pub async fn recommend(State(state): State<AppState>) -> Redirect {
    if let Err(outcome) = state.recommendations.spawn_recommendation(&state.store) {
        tracing::debug!("Recommendation not started: {:?}", outcome);
    }
    Redirect::to("/")
}
