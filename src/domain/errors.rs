//! Domain error types
//!
//! Every failure of a recommendation attempt ends up as one of these and is
//! shown to the user through its `Display` text.

use std::fmt;

pub const FILL_ALL_FIELDS: &str = "Fill all fields";
pub const FETCH_FAILED: &str = "Failed to fetch recommendations";
pub const NO_RECOMMENDATION: &str = "no recommendation available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationError {
    /// Genre, mood or level not chosen
    Validation,
    /// Request never produced a response (connect, body read)
    Transport(String),
    /// Endpoint answered with a non-success status
    Http { status: u16, message: Option<String> },
    /// Success response without usable recommendation text
    NoRecommendation,
}

impl fmt::Display for RecommendationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationError::Validation => write!(f, "{}", FILL_ALL_FIELDS),
            RecommendationError::Transport(_) => write!(f, "{}", FETCH_FAILED),
            RecommendationError::Http {
                message: Some(message),
                ..
            } => write!(f, "{}", message),
            RecommendationError::Http { message: None, .. } => write!(f, "{}", FETCH_FAILED),
            RecommendationError::NoRecommendation => write!(f, "{}", NO_RECOMMENDATION),
        }
    }
}

impl std::error::Error for RecommendationError {}
