use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::therapist::TherapistId;

/// Database identifier of a child row.
pub type ChildId = i64;

/// Database identifier of a guardian row.
pub type GuardianId = i64;

/// A child receiving art therapy. Sessions and notes reference it by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
    pub id: ChildId,
    pub name: String,
    pub age: i32,
    pub medical_condition: String,
    pub emotional_traits: Vec<String>,
    pub favorite_art_form: String,
    pub guardian_id: Option<GuardianId>,
    pub assigned_therapist_id: Option<TherapistId>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a new child.
#[derive(Debug, Clone)]
pub struct NewChild {
    pub name: String,
    pub age: i32,
    pub medical_condition: String,
    pub emotional_traits: Vec<String>,
    pub favorite_art_form: String,
    pub guardian_id: Option<GuardianId>,
    pub assigned_therapist_id: Option<TherapistId>,
}

/// A parent or guardian. Email is unique across all guardians.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guardian {
    pub id: GuardianId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a new guardian.
#[derive(Debug, Clone)]
pub struct NewGuardian {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}
