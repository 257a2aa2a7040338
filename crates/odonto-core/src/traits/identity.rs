use crate::errors::OdontoResult;
use crate::models::StaffIdentity;

/// Maps a patient uuid onto the numeric id used by the log.
#[allow(async_fn_in_trait)]
pub trait IPatientResolver: Send + Sync {
    /// Fails with `NotFound` when no patient row matches.
    async fn resolve_patient(&self, patient_uuid: &str, institution_id: i64) -> OdontoResult<i64>;
}

/// Resolves the caller of a request from its bearer credential.
pub trait IStaffAuthenticator: Send + Sync {
    /// Fails with `Unauthorized` when the credential is missing or unknown.
    fn current_staff(&self, bearer: Option<&str>) -> OdontoResult<StaffIdentity>;
}
