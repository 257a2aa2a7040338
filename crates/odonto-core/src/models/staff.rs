use serde::{Deserialize, Serialize};

/// Resolved caller identity. Supplied explicitly to every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffIdentity {
    pub staff_id: i64,
    pub institution_id: i64,
    pub email: String,
    pub display_name: String,
}
