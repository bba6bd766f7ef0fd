//! Species collision fixtures and the primary-shape lookup.
//!
//! Every embodied species carries a set of named collision fixtures. The
//! fixture called [`PRIMARY_FIXTURE`] is used for all general collisions;
//! others (such as the ignition fixture) only serve special interactions and
//! are ignored by job requirements.
//!
//! Requirements never touch a registry directly. They go through
//! [`SpeciesShapeLookup`], which any closure or a [`SpeciesRegistry`] can
//! provide:
//!
//! ```
//! use rolegate_logic::fixtures::{FixtureShape, SpeciesShapeLookup};
//! use rolegate_logic::profile::SpeciesId;
//!
//! let lookup = |id: &SpeciesId| {
//!     (id.as_str() == "Human").then_some(FixtureShape::new(0.35, 185.0))
//! };
//! assert!(lookup.primary_shape(&SpeciesId::new("Human")).is_some());
//! assert!(lookup.primary_shape(&SpeciesId::new("Ghost")).is_none());
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::profile::SpeciesId;

/// Name of the fixture used for general collisions.
pub const PRIMARY_FIXTURE: &str = "fix1";

/// Circle-equivalent collision shape with material density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixtureShape {
    pub radius: f32,
    pub density: f32,
}

impl FixtureShape {
    pub fn new(radius: f32, density: f32) -> Self {
        Self { radius, density }
    }
}

/// Resolves a species to its primary collision shape.
///
/// `None` means the species has no physical body to measure.
pub trait SpeciesShapeLookup {
    fn primary_shape(&self, species: &SpeciesId) -> Option<FixtureShape>;
}

impl<F> SpeciesShapeLookup for F
where
    F: Fn(&SpeciesId) -> Option<FixtureShape>,
{
    fn primary_shape(&self, species: &SpeciesId) -> Option<FixtureShape> {
        self(species)
    }
}

/// A species prototype's physical body definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDefinition {
    pub id: SpeciesId,
    #[serde(default)]
    pub name: String,
    /// Named fixtures; empty for species without a body.
    #[serde(default)]
    pub fixtures: BTreeMap<String, FixtureShape>,
}

impl SpeciesDefinition {
    pub fn new(id: impl Into<SpeciesId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fixtures: BTreeMap::new(),
        }
    }

    /// Builder-style fixture insertion.
    pub fn with_fixture(mut self, name: impl Into<String>, shape: FixtureShape) -> Self {
        self.fixtures.insert(name.into(), shape);
        self
    }

    pub fn primary_shape(&self) -> Option<FixtureShape> {
        self.fixtures.get(PRIMARY_FIXTURE).copied()
    }
}

/// Read-only species lookup table.
///
/// Deserializes from the JSON array of definitions used in `species.json`.
/// When two definitions share an id the later one wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<SpeciesDefinition>")]
pub struct SpeciesRegistry {
    species: HashMap<SpeciesId, SpeciesDefinition>,
}

impl SpeciesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: SpeciesDefinition) {
        if let Some(previous) = self.species.insert(definition.id.clone(), definition) {
            log::warn!("species {} redefined", previous.id);
        }
    }

    pub fn get(&self, id: &SpeciesId) -> Option<&SpeciesDefinition> {
        self.species.get(id)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Species ids in sorted order.
    pub fn ids(&self) -> Vec<&SpeciesId> {
        let mut ids: Vec<_> = self.species.keys().collect();
        ids.sort();
        ids
    }
}

impl From<Vec<SpeciesDefinition>> for SpeciesRegistry {
    fn from(definitions: Vec<SpeciesDefinition>) -> Self {
        let mut registry = Self::new();
        for definition in definitions {
            registry.insert(definition);
        }
        registry
    }
}

impl SpeciesShapeLookup for SpeciesRegistry {
    fn primary_shape(&self, species: &SpeciesId) -> Option<FixtureShape> {
        self.get(species).and_then(SpeciesDefinition::primary_shape)
    }
}
