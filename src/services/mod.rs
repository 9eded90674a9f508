//! Services Layer
//!
//! This module contains business logic extracted from HTTP handlers.

pub mod recommendation_service;

// Re-export for convenience
pub use recommendation_service::{FetchOutcome, RecommendationService, Selection};
