//! Registry repository trait definition.
//!
//! Children, guardians, and therapists are written once by the seed step
//! and read thereafter.

use palette_types::child::{Child, ChildId, Guardian, NewChild, NewGuardian};
use palette_types::error::RepositoryError;
use palette_types::therapist::{NewTherapist, Therapist, TherapistId};

/// Repository trait for the people the sessions and notes refer to.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait RegistryRepository: Send + Sync {
    // -----------------------------------------------------------------------
    // Therapists
    // -----------------------------------------------------------------------

    /// Insert a therapist. Returns the stored row.
    fn create_therapist(
        &self,
        therapist: &NewTherapist,
    ) -> impl std::future::Future<Output = Result<Therapist, RepositoryError>> + Send;

    fn get_therapist(
        &self,
        id: TherapistId,
    ) -> impl std::future::Future<Output = Result<Option<Therapist>, RepositoryError>> + Send;

    /// All therapists, ordered by id.
    fn list_therapists(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Therapist>, RepositoryError>> + Send;

    // -----------------------------------------------------------------------
    // Guardians
    // -----------------------------------------------------------------------

    /// Insert a guardian. Returns `Conflict` if the email is already taken.
    fn create_guardian(
        &self,
        guardian: &NewGuardian,
    ) -> impl std::future::Future<Output = Result<Guardian, RepositoryError>> + Send;

    fn get_guardian_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<Guardian>, RepositoryError>> + Send;

    // -----------------------------------------------------------------------
    // Children
    // -----------------------------------------------------------------------

    /// Insert a child. Returns the stored row.
    fn create_child(
        &self,
        child: &NewChild,
    ) -> impl std::future::Future<Output = Result<Child, RepositoryError>> + Send;

    fn get_child(
        &self,
        id: ChildId,
    ) -> impl std::future::Future<Output = Result<Option<Child>, RepositoryError>> + Send;

    /// All children, ordered by id.
    fn list_children(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Child>, RepositoryError>> + Send;
}
