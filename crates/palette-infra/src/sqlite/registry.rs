//! SQLite registry repository implementation.
//!
//! Implements `RegistryRepository` from `palette-core` for the `therapists`,
//! `guardians`, and `children` tables.

use chrono::Utc;
use sqlx::Row;

use palette_core::repository::registry::RegistryRepository;
use palette_types::child::{Child, ChildId, Guardian, NewChild, NewGuardian};
use palette_types::error::RepositoryError;
use palette_types::therapist::{NewTherapist, Therapist, TherapistId};

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, parse_string_list};

/// SQLite-backed implementation of `RegistryRepository`.
pub struct SqliteRegistryRepository {
    pool: DatabasePool,
}

impl SqliteRegistryRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn query_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn row_to_therapist(row: &sqlx::sqlite::SqliteRow) -> Result<Therapist, RepositoryError> {
    let art_forms: String = row.try_get("art_forms").map_err(query_err)?;
    let created_at: String = row.try_get("created_at").map_err(query_err)?;

    Ok(Therapist {
        id: row.try_get("id").map_err(query_err)?,
        name: row.try_get("name").map_err(query_err)?,
        specialization: row.try_get("specialization").map_err(query_err)?,
        art_forms: parse_string_list(&art_forms, "art_forms")?,
        experience_years: row.try_get("experience_years").map_err(query_err)?,
        created_at: parse_datetime(&created_at)?,
    })
}

fn row_to_guardian(row: &sqlx::sqlite::SqliteRow) -> Result<Guardian, RepositoryError> {
    let created_at: String = row.try_get("created_at").map_err(query_err)?;

    Ok(Guardian {
        id: row.try_get("id").map_err(query_err)?,
        name: row.try_get("name").map_err(query_err)?,
        email: row.try_get("email").map_err(query_err)?,
        phone: row.try_get("phone").map_err(query_err)?,
        created_at: parse_datetime(&created_at)?,
    })
}

fn row_to_child(row: &sqlx::sqlite::SqliteRow) -> Result<Child, RepositoryError> {
    let traits: String = row.try_get("emotional_traits").map_err(query_err)?;
    let created_at: String = row.try_get("created_at").map_err(query_err)?;

    Ok(Child {
        id: row.try_get("id").map_err(query_err)?,
        name: row.try_get("name").map_err(query_err)?,
        age: row.try_get("age").map_err(query_err)?,
        medical_condition: row.try_get("medical_condition").map_err(query_err)?,
        emotional_traits: parse_string_list(&traits, "emotional_traits")?,
        favorite_art_form: row.try_get("favorite_art_form").map_err(query_err)?,
        guardian_id: row.try_get("guardian_id").map_err(query_err)?,
        assigned_therapist_id: row.try_get("assigned_therapist_id").map_err(query_err)?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl RegistryRepository for SqliteRegistryRepository {
    async fn create_therapist(&self, therapist: &NewTherapist) -> Result<Therapist, RepositoryError> {
        let art_forms = serde_json::to_string(&therapist.art_forms)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO therapists (name, specialization, art_forms, experience_years, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&therapist.name)
        .bind(&therapist.specialization)
        .bind(&art_forms)
        .bind(therapist.experience_years)
        .bind(format_datetime(&now))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(Therapist {
            id: result.last_insert_rowid(),
            name: therapist.name.clone(),
            specialization: therapist.specialization.clone(),
            art_forms: therapist.art_forms.clone(),
            experience_years: therapist.experience_years,
            created_at: now,
        })
    }

    async fn get_therapist(&self, id: TherapistId) -> Result<Option<Therapist>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM therapists WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_therapist).transpose()
    }

    async fn list_therapists(&self) -> Result<Vec<Therapist>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM therapists ORDER BY id ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        rows.iter().map(row_to_therapist).collect()
    }

    async fn create_guardian(&self, guardian: &NewGuardian) -> Result<Guardian, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO guardians (name, email, phone, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&guardian.name)
        .bind(&guardian.email)
        .bind(&guardian.phone)
        .bind(format_datetime(&now))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) => Ok(Guardian {
                id: done.last_insert_rowid(),
                name: guardian.name.clone(),
                email: guardian.email.clone(),
                phone: guardian.phone.clone(),
                created_at: now,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "guardian email '{}' already exists",
                    guardian.email
                )))
            }
            Err(e) => Err(query_err(e)),
        }
    }

    async fn get_guardian_by_email(&self, email: &str) -> Result<Option<Guardian>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM guardians WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_guardian).transpose()
    }

    async fn create_child(&self, child: &NewChild) -> Result<Child, RepositoryError> {
        let traits = serde_json::to_string(&child.emotional_traits)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO children (name, age, medical_condition, emotional_traits, favorite_art_form, guardian_id, assigned_therapist_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&child.name)
        .bind(child.age)
        .bind(&child.medical_condition)
        .bind(&traits)
        .bind(&child.favorite_art_form)
        .bind(child.guardian_id)
        .bind(child.assigned_therapist_id)
        .bind(format_datetime(&now))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(Child {
            id: result.last_insert_rowid(),
            name: child.name.clone(),
            age: child.age,
            medical_condition: child.medical_condition.clone(),
            emotional_traits: child.emotional_traits.clone(),
            favorite_art_form: child.favorite_art_form.clone(),
            guardian_id: child.guardian_id,
            assigned_therapist_id: child.assigned_therapist_id,
            created_at: now,
        })
    }

    async fn get_child(&self, id: ChildId) -> Result<Option<Child>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM children WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_child).transpose()
    }

    async fn list_children(&self) -> Result<Vec<Child>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM children ORDER BY id ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        rows.iter().map(row_to_child).collect()
    }
}
