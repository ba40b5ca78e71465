//! Startup coordination: connect to downstream stores before serving traffic.
//!
//! The coordinator walks an explicit state machine:
//!
//! ```text
//! Disconnected --Start--> Connecting --AllConnected--> Ready
//!                             |
//!                             +--AttemptFailed{retries_left: 0}--> Failed
//! ```
//!
//! Each dependency (database, cache, schema) gets its own budget of
//! `max_attempts`. Failed attempts wait a fixed interval before the next one.
//! Waiting goes through `tokio::time`, so tests drive it with a paused clock.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tokio_retry::strategy::FixedInterval;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::CacheService;

/// Readiness of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupState {
    Disconnected,
    Connecting,
    Ready,
    Failed,
}

/// Inputs to [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupEvent {
    Start,
    AttemptFailed { retries_left: u32 },
    AllConnected,
}

/// Pure transition function of the startup state machine.
///
/// `Ready` and `Failed` are terminal. Events that make no sense in the
/// current state leave it unchanged.
pub fn transition(state: StartupState, event: StartupEvent) -> StartupState {
    use StartupEvent::*;
    use StartupState::*;

    match (state, event) {
        (Disconnected, Start) => Connecting,
        (Connecting, AttemptFailed { retries_left: 0 }) => Failed,
        (Connecting, AttemptFailed { .. }) => Connecting,
        (Connecting, AllConnected) => Ready,
        (state, _) => state,
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{dependency} unreachable after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        dependency: &'static str,
        attempts: u32,
        last_error: String,
    },
}

/// Bounded fixed-interval retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.startup_max_retries,
            interval: Duration::from_secs(config.startup_retry_interval_secs),
        }
    }

    fn delays(&self) -> impl Iterator<Item = Duration> {
        FixedInterval::new(self.interval)
    }
}

/// Read-only view of the startup state, shared with request handlers.
#[derive(Debug, Clone)]
pub struct Readiness(watch::Receiver<StartupState>);

impl Readiness {
    /// A handle that always reports `state`. Useful when wiring handlers in tests.
    pub fn fixed(state: StartupState) -> Self {
        let (_tx, rx) = watch::channel(state);
        Self(rx)
    }

    pub fn state(&self) -> StartupState {
        *self.0.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == StartupState::Ready
    }
}

/// Handles produced by a successful startup.
pub struct Dependencies {
    pub repository: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn CacheService>,
}

/// Connects the database and the cache with bounded retries, then ensures
/// the schema exists.
pub struct StartupCoordinator {
    policy: RetryPolicy,
    state: watch::Sender<StartupState>,
}

impl StartupCoordinator {
    pub fn new(policy: RetryPolicy) -> Self {
        let (state, _rx) = watch::channel(StartupState::Disconnected);
        Self { policy, state }
    }

    pub fn readiness(&self) -> Readiness {
        Readiness(self.state.subscribe())
    }

    pub fn state(&self) -> StartupState {
        *self.state.borrow()
    }

    fn apply(&self, event: StartupEvent) {
        self.state.send_modify(|state| *state = transition(*state, event));
    }

    /// Runs startup to completion.
    ///
    /// Order: database, cache, then `ensure_schema` on the database. The state
    /// becomes `Ready` only after all three succeed.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::RetriesExhausted`] and leaves the state at
    /// `Failed` when any step runs out of attempts. Callers are expected to
    /// terminate the process.
    pub async fn run<SF, SFut, SE, CF, CFut, CE>(
        &self,
        mut connect_store: SF,
        mut connect_cache: CF,
    ) -> Result<Dependencies, StartupError>
    where
        SF: FnMut() -> SFut,
        SFut: Future<Output = Result<Arc<dyn UrlRepository>, SE>>,
        SE: Display,
        CF: FnMut() -> CFut,
        CFut: Future<Output = Result<Arc<dyn CacheService>, CE>>,
        CE: Display,
    {
        self.apply(StartupEvent::Start);
        info!("Starting up: connecting to dependencies");

        let repository = self.with_retry("database", &mut connect_store).await?;
        let cache = self.with_retry("cache", &mut connect_cache).await?;

        self.with_retry("schema", || {
            let repository = Arc::clone(&repository);
            async move { repository.ensure_schema().await }
        })
        .await?;

        self.apply(StartupEvent::AllConnected);
        info!("All dependencies ready");

        Ok(Dependencies { repository, cache })
    }

    async fn with_retry<T, E, F, Fut>(
        &self,
        dependency: &'static str,
        mut attempt: F,
    ) -> Result<T, StartupError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut delays = self.policy.delays();
        let mut retries_left = self.policy.max_attempts;

        loop {
            match attempt().await {
                Ok(value) => {
                    info!("✓ {} ready", dependency);
                    return Ok(value);
                }
                Err(e) => {
                    retries_left = retries_left.saturating_sub(1);
                    self.apply(StartupEvent::AttemptFailed { retries_left });

                    if retries_left == 0 {
                        error!(
                            "{} unreachable after {} attempts: {}",
                            dependency, self.policy.max_attempts, e
                        );
                        return Err(StartupError::RetriesExhausted {
                            dependency,
                            attempts: self.policy.max_attempts,
                            last_error: e.to_string(),
                        });
                    }

                    let delay = delays.next().unwrap_or(self.policy.interval);
                    warn!(
                        "{} not ready: {}. Retrying in {:?} ({} attempts left)",
                        dependency, e, delay, retries_left
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
