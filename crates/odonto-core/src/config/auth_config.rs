use serde::{Deserialize, Serialize};

/// One bearer token and the staff identity it resolves to.
///
/// Token issuance happens outside this service; the directory only maps
/// already-issued tokens onto staff members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffToken {
    pub token: String,
    pub staff_id: i64,
    pub institution_id: i64,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

/// Caller identity configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub tokens: Vec<StaffToken>,
}
