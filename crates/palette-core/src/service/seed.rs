//! Initial data for a fresh database.
//!
//! Creates one therapist per catalog condition and the three demo children,
//! each assigned to the therapist matched by its medical condition.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use palette_types::child::NewChild;
use palette_types::error::RepositoryError;
use palette_types::persona::PersonaId;
use palette_types::therapist::{TherapistId, TherapistProfile};

use crate::persona::catalog::PersonaCatalog;
use crate::repository::registry::RegistryRepository;

/// Demo child records, one per persona.
struct SeedChild {
    persona: PersonaId,
    name: &'static str,
    age: i32,
    emotional_traits: &'static [&'static str],
}

const SEED_CHILDREN: &[SeedChild] = &[
    SeedChild {
        persona: PersonaId::Aarav,
        name: "Aarav Shah",
        age: 6,
        emotional_traits: &["anxious", "creative"],
    },
    SeedChild {
        persona: PersonaId::Dani,
        name: "Dani Johnson",
        age: 5,
        emotional_traits: &["expressive", "sensitive"],
    },
    SeedChild {
        persona: PersonaId::Leo,
        name: "Leo Thomas",
        age: 7,
        emotional_traits: &["resilient", "musical"],
    },
];

/// What a seed run wrote.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub therapists_created: usize,
    pub children_created: usize,
    /// True when the database already held therapists and nothing was written.
    pub skipped: bool,
}

/// Seeds the registry tables from the persona catalog.
pub struct SeedService<R: RegistryRepository> {
    repo: R,
}

impl<R: RegistryRepository> SeedService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Seed therapists and children. Does nothing if any therapist exists.
    pub async fn seed(&self, catalog: &PersonaCatalog) -> Result<SeedReport, RepositoryError> {
        if !self.repo.list_therapists().await?.is_empty() {
            info!("registry already seeded, skipping");
            return Ok(SeedReport {
                skipped: true,
                ..Default::default()
            });
        }

        let mut report = SeedReport::default();
        let mut by_condition: HashMap<String, TherapistId> = HashMap::new();

        for profile in seed_order(catalog) {
            let therapist = self.repo.create_therapist(&profile.to_new_therapist()).await?;
            by_condition.insert(profile.condition.clone(), therapist.id);
            report.therapists_created += 1;
        }

        for seed in SEED_CHILDREN {
            let Some(persona) = catalog.persona(seed.persona.as_str()) else {
                continue;
            };
            let child = NewChild {
                name: seed.name.to_string(),
                age: seed.age,
                medical_condition: persona.condition.clone(),
                emotional_traits: seed.emotional_traits.iter().map(|t| t.to_string()).collect(),
                favorite_art_form: persona.preferred_art.clone(),
                guardian_id: None,
                assigned_therapist_id: by_condition.get(&persona.condition).copied(),
            };
            self.repo.create_child(&child).await?;
            report.children_created += 1;
        }

        info!(
            therapists = report.therapists_created,
            children = report.children_created,
            "seeded registry"
        );
        Ok(report)
    }
}

/// Therapists in persona order first (so the asthma therapist gets id 1),
/// then any therapist no persona refers to.
fn seed_order(catalog: &PersonaCatalog) -> Vec<&TherapistProfile> {
    let mut ordered: Vec<&TherapistProfile> = Vec::new();
    for persona in catalog.personas() {
        if let Some(profile) = catalog.therapist_for(&persona.condition) {
            if !ordered.iter().any(|p| p.condition == profile.condition) {
                ordered.push(profile);
            }
        }
    }
    for profile in catalog.therapists() {
        if !ordered.iter().any(|p| p.condition == profile.condition) {
            ordered.push(profile);
        }
    }
    ordered
}
