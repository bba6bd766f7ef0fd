//! Character body-shape profile as seen by job requirements.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a species prototype (e.g. `"Human"`, `"Dwarf"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesId(pub String);

impl SpeciesId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpeciesId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The parts of a character profile a requirement may read.
///
/// `width` and `height` are body-scale multipliers (1.0 = species default).
/// They are expected to be finite and non-negative; nothing here checks that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub species: SpeciesId,
    pub width: f32,
    pub height: f32,
}

impl CharacterProfile {
    pub fn new(species: impl Into<SpeciesId>, width: f32, height: f32) -> Self {
        Self {
            species: species.into(),
            width,
            height,
        }
    }

    /// Mean of width and height, the single scale factor applied to fixtures.
    pub fn average_scale(&self) -> f32 {
        (self.width + self.height) / 2.0
    }
}
