//! Server shared state
//!
//! Holds configuration, the Google client and one page session plus
//! submission debouncer per browser page load.

use crate::config::Config;
use crate::constants::session::IDLE_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::form::Debouncer;
use crate::google::GoogleMapsClient;
use crate::session::PageSession;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

/// Session and debouncer belonging to one page load
struct ClientSession {
    page: PageSession,
    debouncer: Arc<Debouncer>,
    last_seen: Instant,
}

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    /// Keyed by the page-load id; within one page the last search to finish wins
    sessions: RwLock<HashMap<Uuid, ClientSession>>,

    /// None when no server-side key is configured
    google: Option<GoogleMapsClient>,

    idle_timeout: Duration,
    started: Instant,
}

impl AppState {
    /// Create new application state
    ///
    /// A missing API key is not fatal here; searches report it instead.
    pub fn new(config: Config) -> Self {
        let google = match GoogleMapsClient::from_config(&config) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "searches disabled");
                None
            }
        };
        Self::build(config, google)
    }

    /// Create state around an existing client (mock servers in tests)
    pub fn with_client(config: Config, client: GoogleMapsClient) -> Self {
        Self::build(config, Some(client))
    }

    pub(crate) fn build(config: Config, google: Option<GoogleMapsClient>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            sessions: RwLock::new(HashMap::new()),
            google,
            idle_timeout: Duration::from_secs(IDLE_TIMEOUT_SECS),
            started: Instant::now(),
        }
    }

    /// The Google client, or a config error when none is available
    pub fn google(&self) -> Result<&GoogleMapsClient> {
        self.google.as_ref().ok_or_else(|| {
            Error::Config(
                "No Google API key configured. Set api_keys.google or GOOGLE_MAPS_API_KEY"
                    .to_string(),
            )
        })
    }

    /// Debouncer for one page load, created on first use
    ///
    /// Handed out as an `Arc` so the window can be waited out without
    /// holding the session lock.
    pub async fn debouncer(&self, id: Uuid) -> Arc<Debouncer> {
        let window = self.config.read().await.search.debounce_ms;
        let mut sessions = self.sessions.write().await;
        self.entry(&mut sessions, id, window).debouncer.clone()
    }

    /// Run `f` against the page session for `id`, creating it on first use
    pub async fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut PageSession) -> R) -> R {
        let window = self.config.read().await.search.debounce_ms;
        let mut sessions = self.sessions.write().await;
        f(&mut self.entry(&mut sessions, id, window).page)
    }

    /// Number of live page sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn entry<'s>(
        &self,
        sessions: &'s mut HashMap<Uuid, ClientSession>,
        id: Uuid,
        window_ms: u64,
    ) -> &'s mut ClientSession {
        if !sessions.contains_key(&id) {
            let before = sessions.len();
            sessions.retain(|_, s| s.last_seen.elapsed() < self.idle_timeout);
            if sessions.len() < before {
                debug!(dropped = before - sessions.len(), "expired idle sessions");
            }
        }

        let session = sessions.entry(id).or_insert_with(|| ClientSession {
            page: PageSession::new(),
            debouncer: Arc::new(Debouncer::from_millis(window_ms)),
            last_seen: Instant::now(),
        });
        session.last_seen = Instant::now();
        session
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
