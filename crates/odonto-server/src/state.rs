use std::sync::Arc;

use odonto_core::config::ServerConfig;
use odonto_engine::OdontogramEngine;

use crate::auth::TokenDirectory;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<OdontogramEngine>,
    pub auth: Arc<TokenDirectory>,
    pub server: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(engine: OdontogramEngine, auth: TokenDirectory, server: ServerConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            auth: Arc::new(auth),
            server: Arc::new(server),
        }
    }
}
