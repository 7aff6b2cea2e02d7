use crate::{Building, HartaError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Read-only reference data: the known buildings and the lowercased
/// city/district names used to match listing locations.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    buildings: Vec<Building>,
    terms: BTreeSet<String>,
}

impl Gazetteer {
    pub fn from_buildings(buildings: Vec<Building>) -> Self {
        let terms = buildings
            .iter()
            .flat_map(|b| [b.city.as_str(), b.district.as_str()])
            .filter_map(normalize_term)
            .collect();

        Self { buildings, terms }
    }

    /// Gazetteer with match terms only, no buildings.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            buildings: Vec::new(),
            terms: terms
                .into_iter()
                .filter_map(|t| normalize_term(t.as_ref()))
                .collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let buildings: Vec<Building> = serde_json::from_str(json)?;
        Ok(Self::from_buildings(buildings))
    }

    /// Load a JSON array of buildings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            HartaError::Gazetteer(format!("cannot read {}: {}", path.display(), e))
        })?;
        let gazetteer = Self::from_json(&json)?;

        info!(
            "Loaded {} buildings ({} location terms) from {}",
            gazetteer.buildings.len(),
            gazetteer.terms.len(),
            path.display()
        );
        debug!("Location terms: {:?}", gazetteer.terms);
        Ok(gazetteer)
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Case-insensitive lookup by building name.
    pub fn find_building(&self, name: &str) -> Option<&Building> {
        let name = name.trim().to_lowercase();
        self.buildings
            .iter()
            .find(|b| b.name.trim().to_lowercase() == name)
    }
}

fn normalize_term(term: &str) -> Option<String> {
    let term = term.trim().to_lowercase();
    (!term.is_empty()).then_some(term)
}
