//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no Axum, no HTTP client).
//! Option lists, the selection field contract, session state and its reducer.

pub mod catalog;
pub mod errors;
pub mod field;
pub mod session;

pub use catalog::{Catalog, Level};
pub use errors::RecommendationError;
pub use field::{FieldItem, FieldKind, SelectField};
pub use session::{Action, Session, Store};
