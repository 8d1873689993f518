//! Keyed lookup tables for personas and their matching therapists.
//!
//! The catalog is parsed from TOML once at startup. A built-in catalog is
//! embedded in the binary; deployments may point `catalog_path` at their own
//! file with the same layout.

use std::collections::HashMap;

use serde::Deserialize;

use palette_types::error::CatalogError;
use palette_types::persona::{Persona, PersonaId};
use palette_types::therapist::TherapistProfile;

const BUILTIN_CATALOG: &str = include_str!("catalog.toml");

/// On-disk layout of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    therapists: Vec<TherapistProfile>,
    #[serde(default)]
    personas: Vec<PersonaEntry>,
}

#[derive(Debug, Deserialize)]
struct PersonaEntry {
    id: String,
    condition: String,
    preferred_art: String,
    responses: Vec<String>,
}

/// Immutable persona and therapist tables.
///
/// Personas are keyed by id; therapists are keyed by the medical condition
/// they are registered for (one therapist per condition).
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: HashMap<PersonaId, Persona>,
    therapists: HashMap<String, TherapistProfile>,
}

impl PersonaCatalog {
    /// Load the catalog embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from TOML text.
    ///
    /// Rejects unknown persona ids, duplicate personas, duplicate therapist
    /// conditions, and personas without responses. A persona whose condition
    /// has no therapist is accepted; matching reports it as unmatched.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let mut therapists = HashMap::with_capacity(file.therapists.len());
        for therapist in file.therapists {
            let condition = therapist.condition.clone();
            if therapists.insert(condition.clone(), therapist).is_some() {
                return Err(CatalogError::DuplicateCondition(condition));
            }
        }

        let mut personas = HashMap::with_capacity(file.personas.len());
        for entry in file.personas {
            let id: PersonaId = entry
                .id
                .parse()
                .map_err(|_| CatalogError::UnknownPersona(entry.id.clone()))?;
            if entry.responses.is_empty() {
                return Err(CatalogError::EmptyResponses(entry.id));
            }
            let persona = Persona {
                id,
                condition: entry.condition,
                preferred_art: entry.preferred_art,
                responses: entry.responses,
            };
            if personas.insert(id, persona).is_some() {
                return Err(CatalogError::DuplicatePersona(entry.id));
            }
        }

        Ok(Self {
            personas,
            therapists,
        })
    }

    /// Look up a persona by its raw id string.
    pub fn persona(&self, id: &str) -> Option<&Persona> {
        let id: PersonaId = id.parse().ok()?;
        self.personas.get(&id)
    }

    /// Therapist registered for a medical condition.
    pub fn therapist_for(&self, condition: &str) -> Option<&TherapistProfile> {
        self.therapists.get(condition)
    }

    /// All personas, in [`PersonaId::ALL`] order.
    pub fn personas(&self) -> Vec<&Persona> {
        PersonaId::ALL
            .iter()
            .filter_map(|id| self.personas.get(id))
            .collect()
    }

    /// All therapist profiles, sorted by condition for stable output.
    pub fn therapists(&self) -> Vec<&TherapistProfile> {
        let mut therapists: Vec<&TherapistProfile> = self.therapists.values().collect();
        therapists.sort_by(|a, b| a.condition.cmp(&b.condition));
        therapists
    }
}
