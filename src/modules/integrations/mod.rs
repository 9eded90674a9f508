//! Clients for external services

pub mod gemini;
