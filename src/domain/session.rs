//! Session state and the reducer that owns every transition on it.
//!
//! `reduce` is the only place a `Session` changes. `Store` wraps the single
//! live session of the process and exposes nothing but `dispatch`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Selections, accumulated recommendations and request status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Empty string means unselected
    pub genre: String,
    /// Only meaningful relative to `genre`
    pub mood: String,
    pub level: String,
    /// Append-only, display order
    pub responses: Vec<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ActionEnvelope", into = "ActionEnvelope")]
pub enum Action {
    SetGenre(String),
    SetMood(String),
    SetLevel(String),
    SetLoading(bool),
    SetError(Option<String>),
    AddResponse(String),
    /// Any action type this reducer does not know about
    Unrecognized(String),
}

/// Wire form of an action: `{"type": "SET_GENRE", "payload": "Fantasy"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl Action {
    /// Transitions owned by the recommendation fetcher, never taken from clients
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Action::SetLoading(_) | Action::SetError(_) | Action::AddResponse(_)
        )
    }
}

impl TryFrom<ActionEnvelope> for Action {
    type Error = String;

    fn try_from(envelope: ActionEnvelope) -> Result<Self, Self::Error> {
        let ActionEnvelope { kind, payload } = envelope;

        match kind.as_str() {
            "SET_GENRE" => text_payload(&kind, payload).map(Action::SetGenre),
            "SET_MOOD" => text_payload(&kind, payload).map(Action::SetMood),
            "SET_LEVEL" => text_payload(&kind, payload).map(Action::SetLevel),
            "ADD_RESPONSE" => text_payload(&kind, payload).map(Action::AddResponse),
            "SET_LOADING" => match payload {
                Value::Bool(b) => Ok(Action::SetLoading(b)),
                other => Err(format!("SET_LOADING expects a boolean payload, got {}", other)),
            },
            "SET_ERROR" => match payload {
                Value::Null => Ok(Action::SetError(None)),
                Value::String(s) => Ok(Action::SetError(Some(s))),
                other => Err(format!("SET_ERROR expects a string or null payload, got {}", other)),
            },
            _ => Ok(Action::Unrecognized(kind.clone())),
        }
    }
}

fn text_payload(kind: &str, payload: Value) -> Result<String, String> {
    match payload {
        Value::String(s) => Ok(s),
        other => Err(format!("{} expects a string payload, got {}", kind, other)),
    }
}

impl From<Action> for ActionEnvelope {
    fn from(action: Action) -> Self {
        let (kind, payload) = match action {
            Action::SetGenre(v) => ("SET_GENRE".to_string(), Value::String(v)),
            Action::SetMood(v) => ("SET_MOOD".to_string(), Value::String(v)),
            Action::SetLevel(v) => ("SET_LEVEL".to_string(), Value::String(v)),
            Action::SetLoading(v) => ("SET_LOADING".to_string(), Value::Bool(v)),
            Action::SetError(v) => ("SET_ERROR".to_string(), v.map_or(Value::Null, Value::String)),
            Action::AddResponse(v) => ("ADD_RESPONSE".to_string(), Value::String(v)),
            Action::Unrecognized(kind) => (kind, Value::Null),
        };
        ActionEnvelope { kind, payload }
    }
}

/// Apply one action. Total: unknown actions return the state untouched.
pub fn reduce(state: Session, action: Action) -> Session {
    match action {
        // A genre change always invalidates the mood, even for the same genre.
        Action::SetGenre(genre) => Session {
            genre,
            mood: String::new(),
            ..state
        },
        Action::SetMood(mood) => Session { mood, ..state },
        Action::SetLevel(level) => Session { level, ..state },
        Action::SetLoading(is_loading) => Session { is_loading, ..state },
        Action::SetError(error) => Session { error, ..state },
        Action::AddResponse(text) => {
            let mut responses = state.responses;
            responses.push(text);
            Session { responses, ..state }
        }
        Action::Unrecognized(_) => state,
    }
}

/// Owner of the process-wide session
#[derive(Debug, Default)]
pub struct Store {
    session: Mutex<Session>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, action: Action) {
        self.lock().dispatch(action);
    }

    pub fn snapshot(&self) -> Session {
        self.lock().state().clone()
    }

    /// Hold the session for a check-then-dispatch sequence.
    ///
    /// The guard must not be held across an `.await`.
    pub fn lock(&self) -> StoreGuard<'_> {
        StoreGuard {
            session: self.session.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }
}

pub struct StoreGuard<'a> {
    session: MutexGuard<'a, Session>,
}

impl StoreGuard<'_> {
    pub fn state(&self) -> &Session {
        &self.session
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!("dispatch {:?}", action);
        let current = std::mem::take(&mut *self.session);
        *self.session = reduce(current, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected() -> Session {
        Session {
            genre: "Fantasy".to_string(),
            mood: "Adventurous".to_string(),
            level: "Beginner".to_string(),
            responses: vec!["first".to_string()],
            is_loading: false,
            error: Some("old".to_string()),
        }
    }

    #[test]
    fn test_unrecognized_action_is_identity() {
        let before = selected();
        let after = reduce(before.clone(), Action::Unrecognized("RESET_ALL".to_string()));
        assert_eq!(after, before);

        let empty = reduce(Session::default(), Action::Unrecognized(String::new()));
        assert_eq!(empty, Session::default());
    }

    #[test]
    fn test_set_genre_resets_mood() {
        let after = reduce(selected(), Action::SetGenre("Mystery".to_string()));
        assert_eq!(after.genre, "Mystery");
        assert_eq!(after.mood, "");
        assert_eq!(after.level, "Beginner");
        assert_eq!(after.responses, vec!["first".to_string()]);
    }

    #[test]
    fn test_set_same_genre_still_resets_mood() {
        let after = reduce(selected(), Action::SetGenre("Fantasy".to_string()));
        assert_eq!(after.genre, "Fantasy");
        assert_eq!(after.mood, "");

        // already empty stays empty
        let again = reduce(after.clone(), Action::SetGenre("Fantasy".to_string()));
        assert_eq!(again, after);
    }

    #[test]
    fn test_simple_setters() {
        let mut state = Session::default();
        state = reduce(state, Action::SetMood("Cozy".to_string()));
        state = reduce(state, Action::SetLevel("Expert".to_string()));
        state = reduce(state, Action::SetLoading(true));
        state = reduce(state, Action::SetError(Some("boom".to_string())));

        assert_eq!(state.mood, "Cozy");
        assert_eq!(state.level, "Expert");
        assert!(state.is_loading);
        assert_eq!(state.error.as_deref(), Some("boom"));

        state = reduce(state, Action::SetError(None));
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_add_response_appends_in_order() {
        let mut state = Session::default();
        for text in ["a", "b", "c"] {
            state = reduce(state, Action::AddResponse(text.to_string()));
        }
        assert_eq!(state.responses, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_action_wire_format() {
        let action: Action =
            serde_json::from_str(r#"{"type":"SET_GENRE","payload":"Horror"}"#).unwrap();
        assert_eq!(action, Action::SetGenre("Horror".to_string()));

        let action: Action = serde_json::from_str(r#"{"type":"SET_ERROR","payload":null}"#).unwrap();
        assert_eq!(action, Action::SetError(None));

        let action: Action = serde_json::from_str(r#"{"type":"SET_ERROR"}"#).unwrap();
        assert_eq!(action, Action::SetError(None));

        let action: Action =
            serde_json::from_str(r#"{"type":"SHUFFLE","payload":[1,2]}"#).unwrap();
        assert_eq!(action, Action::Unrecognized("SHUFFLE".to_string()));

        assert!(serde_json::from_str::<Action>(r#"{"type":"SET_LOADING","payload":"yes"}"#).is_err());
        assert!(serde_json::from_str::<Action>(r#"{"type":"SET_MOOD","payload":3}"#).is_err());

        let json = serde_json::to_value(Action::SetLoading(true)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "SET_LOADING", "payload": true}));
    }

    #[test]
    fn test_only_fetcher_transitions_are_internal() {
        assert!(Action::SetLoading(true).is_internal());
        assert!(Action::SetError(None).is_internal());
        assert!(Action::AddResponse("x".to_string()).is_internal());

        assert!(!Action::SetGenre("Horror".to_string()).is_internal());
        assert!(!Action::SetMood("Creepy".to_string()).is_internal());
        assert!(!Action::SetLevel("Expert".to_string()).is_internal());
        assert!(!Action::Unrecognized("SHUFFLE".to_string()).is_internal());
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let json = serde_json::to_value(Session::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "genre": "",
                "mood": "",
                "level": "",
                "responses": [],
                "isLoading": false,
                "error": null
            })
        );
    }

    #[test]
    fn test_store_dispatch_goes_through_reducer() {
        let store = Store::new();
        store.dispatch(Action::SetGenre("Fantasy".to_string()));
        store.dispatch(Action::SetMood("Epic".to_string()));
        store.dispatch(Action::SetGenre("Fantasy".to_string()));

        let state = store.snapshot();
        assert_eq!(state.genre, "Fantasy");
        assert_eq!(state.mood, "");
    }
}
