use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Database identifier of a therapist row.
pub type TherapistId = i64;

/// A therapist persisted in the `therapists` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Therapist {
    pub id: TherapistId,
    pub name: String,
    pub specialization: String,
    pub art_forms: Vec<String>,
    pub experience_years: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a new therapist.
#[derive(Debug, Clone)]
pub struct NewTherapist {
    pub name: String,
    pub specialization: String,
    pub art_forms: Vec<String>,
    pub experience_years: Option<i32>,
}

/// Static therapist record used for persona matching, keyed by condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapistProfile {
    /// Medical condition this therapist is registered for.
    pub condition: String,
    pub name: String,
    pub specialization: String,
    pub art_forms: Vec<String>,
    /// Human-readable experience summary shown to the frontend.
    pub experience: String,
    #[serde(default)]
    pub experience_years: Option<i32>,
}

impl TherapistProfile {
    /// Whether this therapist works with the given art form.
    pub fn supports(&self, art_form: &str) -> bool {
        self.art_forms.iter().any(|a| a == art_form)
    }

    pub fn to_new_therapist(&self) -> NewTherapist {
        NewTherapist {
            name: self.name.clone(),
            specialization: self.specialization.clone(),
            art_forms: self.art_forms.clone(),
            experience_years: self.experience_years,
        }
    }
}

/// Score reported when the therapist supports the child's preferred art form.
pub const FULL_MATCH_SCORE: u8 = 100;

/// Score reported when the therapist only matches on condition.
pub const PARTIAL_MATCH_SCORE: u8 = 70;

/// Read-only projection of a therapist plus match metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapistMatch {
    pub name: String,
    pub specialization: String,
    pub art_forms: Vec<String>,
    pub experience: String,
    pub art_match: bool,
    pub match_score: u8,
}

impl TherapistMatch {
    /// Project a therapist profile against a child's preferred art form.
    pub fn from_profile(profile: &TherapistProfile, preferred_art: &str) -> Self {
        let art_match = profile.supports(preferred_art);
        Self {
            name: profile.name.clone(),
            specialization: profile.specialization.clone(),
            art_forms: profile.art_forms.clone(),
            experience: profile.experience.clone(),
            art_match,
            match_score: if art_match {
                FULL_MATCH_SCORE
            } else {
                PARTIAL_MATCH_SCORE
            },
        }
    }
}
