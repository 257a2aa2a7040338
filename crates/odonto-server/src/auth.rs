//! Bearer-token staff directory.

use std::collections::HashMap;

use odonto_core::config::AuthConfig;
use odonto_core::errors::{OdontoError, OdontoResult};
use odonto_core::traits::IStaffAuthenticator;
use odonto_core::StaffIdentity;

/// Maps configured bearer tokens onto staff identities.
#[derive(Debug, Clone, Default)]
pub struct TokenDirectory {
    tokens: HashMap<String, StaffIdentity>,
}

impl TokenDirectory {
    pub fn from_config(config: &AuthConfig) -> Self {
        let tokens = config
            .tokens
            .iter()
            .map(|t| {
                let display_name = if t.display_name.is_empty() {
                    t.email.clone()
                } else {
                    t.display_name.clone()
                };
                (
                    t.token.clone(),
                    StaffIdentity {
                        staff_id: t.staff_id,
                        institution_id: t.institution_id,
                        email: t.email.clone(),
                        display_name,
                    },
                )
            })
            .collect();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl IStaffAuthenticator for TokenDirectory {
    fn current_staff(&self, bearer: Option<&str>) -> OdontoResult<StaffIdentity> {
        bearer
            .and_then(|token| self.tokens.get(token))
            .cloned()
            .ok_or(OdontoError::Unauthorized)
    }
}

/// Extract the token from an `Authorization` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
