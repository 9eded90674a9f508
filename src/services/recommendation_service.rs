//! Recommendation Service - one request/response cycle against the session
//!
//! Reads the selections, asks the generative-text endpoint for a
//! recommendation and reports every outcome back through the reducer. No
//! error leaves this module: failures become the session's `error` text.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::domain::errors::RecommendationError;
use crate::domain::session::{Action, Session, Store};
use crate::modules::integrations::gemini::GeminiClient;

/// Books asked for per request
pub const RECOMMENDATION_COUNT: usize = 6;

/// What happened to a trigger, for callers that need more than the state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A new recommendation was appended
    Added,
    /// The request ran and failed; `error` holds the message
    Failed(RecommendationError),
    /// A selection was missing; no request was sent
    Invalid,
    /// A request was already in flight; nothing changed
    Busy,
}

/// The three selections a prompt is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub genre: String,
    pub mood: String,
    pub level: String,
}

impl Selection {
    pub fn from_session(session: &Session) -> Result<Self, RecommendationError> {
        if session.genre.is_empty() || session.mood.is_empty() || session.level.is_empty() {
            return Err(RecommendationError::Validation);
        }

        Ok(Self {
            genre: session.genre.clone(),
            mood: session.mood.clone(),
            level: session.level.clone(),
        })
    }

    pub fn prompt(&self) -> String {
        format!(
            "Recommend {} books for a {} {} reader feeling {}. Explain why.",
            RECOMMENDATION_COUNT, self.level, self.genre, self.mood
        )
    }
}

/// Puts `isLoading` back to false when dropped.
///
/// Covers early returns and a fetch future dropped mid-request.
struct LoadingRelease<'a> {
    store: &'a Store,
}

impl Drop for LoadingRelease<'_> {
    fn drop(&mut self) {
        self.store.dispatch(Action::SetLoading(false));
    }
}

pub struct RecommendationService {
    client: GeminiClient,
}

impl RecommendationService {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Run one recommendation request for the current selections.
    ///
    /// Only called from an explicit user trigger.
    pub async fn fetch_recommendations(&self, store: &Store) -> FetchOutcome {
        match self.begin(store) {
            Ok(selection) => self.complete(store, selection).await,
            Err(outcome) => outcome,
        }
    }

    /// Start a request on a task of its own and hand back its handle.
    ///
    /// The task owns the store and the service, so the request runs to the end
    /// even when the caller stops waiting for it.
    pub fn spawn_recommendation(
        self: &Arc<Self>,
        store: &Arc<Store>,
    ) -> Result<JoinHandle<FetchOutcome>, FetchOutcome> {
        let selection = self.begin(store)?;

        let service = Arc::clone(self);
        let store = Arc::clone(store);
        Ok(tokio::spawn(async move {
            service.complete(&store, selection).await
        }))
    }

    /// Busy check, validation and `isLoading := true` under one lock
    fn begin(&self, store: &Store) -> Result<Selection, FetchOutcome> {
        let mut session = store.lock();

        if session.state().is_loading {
            tracing::debug!("Recommendation already in flight, ignoring trigger");
            return Err(FetchOutcome::Busy);
        }

        match Selection::from_session(session.state()) {
            Ok(selection) => {
                session.dispatch(Action::SetLoading(true));
                session.dispatch(Action::SetError(None));
                Ok(selection)
            }
            Err(e) => {
                tracing::info!("Recommendation skipped: {}", e);
                session.dispatch(Action::SetError(Some(e.to_string())));
                Err(FetchOutcome::Invalid)
            }
        }
    }

    async fn complete(&self, store: &Store, selection: Selection) -> FetchOutcome {
        let _release = LoadingRelease { store };

        tracing::info!(
            "Requesting recommendation - genre={}, mood={}, level={}",
            selection.genre,
            selection.mood,
            selection.level
        );

        match self.client.generate(&selection.prompt()).await {
            Ok(text) => {
                tracing::info!("Recommendation received ({} chars)", text.len());
                store.dispatch(Action::AddResponse(text));
                FetchOutcome::Added
            }
            Err(e) => {
                match &e {
                    RecommendationError::Transport(cause) => {
                        tracing::error!("Recommendation request failed: {}", cause)
                    }
                    RecommendationError::Http { status, message } => tracing::warn!(
                        "Recommendation endpoint returned {}: {:?}",
                        status,
                        message
                    ),
                    _ => tracing::warn!("Recommendation unusable: {}", e),
                }
                store.dispatch(Action::SetError(Some(e.to_string())));
                FetchOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_selections() {
        let selection = Selection {
            genre: "Fantasy".to_string(),
            mood: "Adventurous".to_string(),
            level: "Beginner".to_string(),
        };
        assert_eq!(
            selection.prompt(),
            "Recommend 6 books for a Beginner Fantasy reader feeling Adventurous. Explain why."
        );
    }

    #[test]
    fn test_selection_requires_all_fields() {
        let mut session = Session {
            genre: "Fantasy".to_string(),
            mood: String::new(),
            level: "Expert".to_string(),
            ..Session::default()
        };
        assert_eq!(
            Selection::from_session(&session),
            Err(RecommendationError::Validation)
        );

        session.mood = "Dark".to_string();
        assert!(Selection::from_session(&session).is_ok());
    }

    #[test]
    fn test_loading_release_clears_flag_on_drop() {
        let store = Store::new();
        store.dispatch(Action::SetLoading(true));
        {
            let _release = LoadingRelease { store: &store };
            assert!(store.snapshot().is_loading);
        }
        assert!(!store.snapshot().is_loading);
    }
}
