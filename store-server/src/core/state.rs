//! Server state

use super::Config;
use crate::cart::CartSession;
use crate::checkout::CheckoutService;
use crate::db::{CatalogStore, ClientStore, MemoryStore};
use crate::services::{HttpMailer, LogMailer, Mailer};
use dashmap::DashMap;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Client;
use std::sync::Arc;
use uuid::Uuid;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<dyn CatalogStore>,
    pub clients: Arc<dyn ClientStore>,
    pub checkout: Arc<CheckoutService>,
    /// Live cart sessions, keyed by session id
    pub sessions: Arc<DashMap<Uuid, CartSession>>,
}

impl ServerState {
    /// Wire the stores, mailer and checkout service from configuration
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let store = Arc::new(MemoryStore::new());

        let mailer: Arc<dyn Mailer> = match config.mailer_mode.as_str() {
            "http" => {
                let endpoint = config
                    .mailer_endpoint
                    .clone()
                    .ok_or_else(|| AppError::configuration("mailer endpoint missing"))?;
                let api_key = config
                    .mailer_api_key
                    .clone()
                    .ok_or_else(|| AppError::configuration("mailer api key missing"))?;
                Arc::new(HttpMailer::new(endpoint, api_key, config.mailer_template.clone()))
            }
            _ => Arc::new(LogMailer),
        };

        let checkout = Arc::new(CheckoutService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            mailer,
        ));

        Ok(Self {
            catalog: store.clone(),
            clients: store,
            checkout,
            sessions: Arc::new(DashMap::new()),
        })
    }

    /// Resolve the client a session belongs to, if it is authenticated.
    ///
    /// Reads the email under the shard lock, then queries the store with
    /// the lock released.
    pub async fn session_client(&self, session_id: Uuid) -> AppResult<Option<Client>> {
        let email = self
            .sessions
            .get(&session_id)
            .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?
            .client_email
            .clone();

        match email {
            Some(email) => self.clients.find_by_email(&email).await,
            None => Ok(None),
        }
    }

    /// Resolve the client a session belongs to, rejecting anonymous
    /// sessions.
    pub async fn require_session_client(&self, session_id: Uuid) -> AppResult<Client> {
        self.session_client(session_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::NotAuthenticated))
    }
}
