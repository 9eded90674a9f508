//! Static option lists offered by the selection fields.
//!
//! The genre list and the genre -> moods table ship as JSON files embedded at
//! build time. Reading levels are a closed set and live in code.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const GENRES_JSON: &str = include_str!("../../data/genre.json");
const MOODS_JSON: &str = include_str!("../../data/mood.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Expert];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Expert => "Expert",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("Unknown reading level: {}", s))
    }
}

/// Genres and the moods valid for each of them
#[derive(Debug, Clone)]
pub struct Catalog {
    genres: Vec<String>,
    moods: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// Parse the option lists bundled with the binary
    pub fn builtin() -> Result<Self, String> {
        Self::from_json(GENRES_JSON, MOODS_JSON)
    }

    pub fn from_json(genres: &str, moods: &str) -> Result<Self, String> {
        let genres: Vec<String> =
            serde_json::from_str(genres).map_err(|e| format!("Failed to parse genres: {}", e))?;
        let moods: HashMap<String, Vec<String>> =
            serde_json::from_str(moods).map_err(|e| format!("Failed to parse moods: {}", e))?;

        Ok(Self { genres, moods })
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Moods for `genre`, empty when no genre (or an unknown one) is selected
    pub fn moods_for(&self, genre: &str) -> &[String] {
        self.moods.get(genre).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn moods(&self) -> &HashMap<String, Vec<String>> {
        &self.moods
    }

    pub fn levels(&self) -> Vec<&'static str> {
        Level::ALL.iter().map(Level::as_str).collect()
    }
}
