//! Session cache: the single owner of the authenticated identity.
//!
//! Restores a persisted identity optimistically on construction, then
//! reconciles it with server-side session validity via a lightweight probe.
//! Every identity mutation writes through to the durable store so memory and
//! disk never diverge.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::domain::ports::{IdentityStore, ShortenerApi};
use crate::domain::{ClassifiedError, Identity, LoginRequest, RegisterRequest};

/// Lifecycle phase of the cached session.
///
/// Construction leaves the cache either [`SessionPhase::Revalidating`] (an
/// identity was restored and awaits the startup probe) or
/// [`SessionPhase::Anonymous`]; there is no observable uninitialised state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// A restored identity is held optimistically while the startup probe
    /// confirms the cookie is still valid server-side.
    Revalidating,
    /// The identity is present and either confirmed or retained after an
    /// inconclusive probe.
    Authenticated,
    /// No identity; consumers should send the user to the login surface.
    Anonymous,
}

#[derive(Debug)]
struct SessionState {
    phase: SessionPhase,
    identity: Option<Identity>,
    error: Option<String>,
}

/// Cached authenticated identity with startup revalidation.
pub struct SessionCache {
    api: Arc<dyn ShortenerApi>,
    store: Arc<dyn IdentityStore>,
    state: RwLock<SessionState>,
}

impl SessionCache {
    /// Restore any stored identity and prime the cache.
    ///
    /// The restored identity is unverified; call [`SessionCache::revalidate`]
    /// before rendering protected content. A store read failure is treated
    /// as no stored identity.
    pub fn new(api: Arc<dyn ShortenerApi>, store: Arc<dyn IdentityStore>) -> Self {
        let restored = store.load().unwrap_or_else(|error| {
            warn!(error = %error, "identity restore failed; starting anonymous");
            None
        });
        let phase = if restored.is_some() {
            SessionPhase::Revalidating
        } else {
            SessionPhase::Anonymous
        };
        Self {
            api,
            store,
            state: RwLock::new(SessionState {
                phase,
                identity: restored,
                error: None,
            }),
        }
    }

    /// Current identity, if any.
    pub fn identity(&self) -> Option<Identity> {
        self.read_state().identity.clone()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.read_state().phase
    }

    /// True only while the startup probe is outstanding. Consumers must not
    /// render protected content while this holds.
    pub fn loading(&self) -> bool {
        self.read_state().phase == SessionPhase::Revalidating
    }

    /// Display message recorded by the last failed login or registration.
    pub fn error(&self) -> Option<String> {
        self.read_state().error.clone()
    }

    /// Discard any recorded display message.
    pub fn clear_error(&self) {
        self.write_state().error = None;
    }

    /// Confirm the restored identity against the server.
    ///
    /// Reuses the list-links endpoint as the probe. Only a definitive 401
    /// logs the user out; a transient outage retains the optimistic identity
    /// so the user is not bounced to the login surface by a flaky network.
    pub async fn revalidate(&self) {
        if self.phase() != SessionPhase::Revalidating {
            return;
        }
        match self.api.list_links().await {
            Ok(_) => {
                self.write_state().phase = SessionPhase::Authenticated;
            }
            Err(error) if error.invalidates_session() => {
                debug!("stored session rejected by server; clearing identity");
                self.uninstall();
            }
            Err(error) => {
                debug!(error = %error, "session probe inconclusive; keeping identity");
                self.write_state().phase = SessionPhase::Authenticated;
            }
        }
    }

    /// Authenticate and install the returned identity.
    ///
    /// # Errors
    ///
    /// Re-raises the [`ClassifiedError`] after recording its message, so the
    /// calling form can keep its own error state while the shared one stays
    /// in sync.
    pub async fn login(&self, request: &LoginRequest) -> Result<Identity, ClassifiedError> {
        self.clear_error();
        match self.api.login(request).await {
            Ok(identity) => {
                self.install(identity.clone());
                Ok(identity)
            }
            Err(error) => {
                self.write_state().error = Some(error.message().to_owned());
                Err(error)
            }
        }
    }

    /// Create an account and install the returned identity.
    ///
    /// # Errors
    ///
    /// Re-raises the [`ClassifiedError`] after recording its message, as
    /// [`SessionCache::login`] does.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Identity, ClassifiedError> {
        self.clear_error();
        match self.api.register(request).await {
            Ok(identity) => {
                self.install(identity.clone());
                Ok(identity)
            }
            Err(error) => {
                self.write_state().error = Some(error.message().to_owned());
                Err(error)
            }
        }
    }

    /// End the session.
    ///
    /// The remote call is best-effort: local state clears unconditionally,
    /// so logout cannot be blocked by server unavailability. Idempotent.
    pub async fn logout(&self) {
        if let Err(error) = self.api.logout().await {
            warn!(error = %error, "remote logout failed; clearing local session anyway");
        }
        self.uninstall();
    }

    fn install(&self, identity: Identity) {
        if let Err(error) = self.store.save(&identity) {
            warn!(error = %error, "identity persist failed; session will not survive restart");
        }
        let mut state = self.write_state();
        state.identity = Some(identity);
        state.phase = SessionPhase::Authenticated;
        state.error = None;
    }

    fn uninstall(&self) {
        if let Err(error) = self.store.clear() {
            warn!(error = %error, "identity clear failed; stale identity may be restored later");
        }
        let mut state = self.write_state();
        state.identity = None;
        state.phase = SessionPhase::Anonymous;
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
