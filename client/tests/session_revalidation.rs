//! Behavioural tests for session restore, revalidation, and write-through.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use rstest::{fixture, rstest};

use client::domain::ports::{IdentityStore, IdentityStoreError, ShortenerApi};
use client::domain::{
    ClassifiedError, Identity, LoginRequest, RegisterRequest, SessionCache, SessionPhase,
    ShortLink, ShortenRequest,
};

/// In-memory identity store mirroring the durable-storage contract.
#[derive(Default)]
struct InMemoryIdentityStore {
    value: Mutex<Option<Identity>>,
}

impl InMemoryIdentityStore {
    fn holding(identity: Identity) -> Self {
        Self {
            value: Mutex::new(Some(identity)),
        }
    }

    fn stored(&self) -> Option<Identity> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn load(&self) -> Result<Option<Identity>, IdentityStoreError> {
        Ok(self.stored())
    }

    fn save(&self, identity: &Identity) -> Result<(), IdentityStoreError> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(identity.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), IdentityStoreError> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// API stub answering each endpoint with a fixed script.
struct ScriptedApi {
    login_result: Option<Result<Identity, ClassifiedError>>,
    list_result: Option<Result<Vec<ShortLink>, ClassifiedError>>,
    logout_result: Result<(), ClassifiedError>,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self {
            login_result: None,
            list_result: None,
            logout_result: Ok(()),
        }
    }
}

#[async_trait]
impl ShortenerApi for ScriptedApi {
    async fn register(&self, _request: &RegisterRequest) -> Result<Identity, ClassifiedError> {
        panic!("register not scripted for this scenario");
    }

    async fn login(&self, _request: &LoginRequest) -> Result<Identity, ClassifiedError> {
        self.login_result
            .clone()
            .unwrap_or_else(|| panic!("login not scripted for this scenario"))
    }

    async fn logout(&self) -> Result<(), ClassifiedError> {
        self.logout_result.clone()
    }

    async fn list_links(&self) -> Result<Vec<ShortLink>, ClassifiedError> {
        self.list_result
            .clone()
            .unwrap_or_else(|| panic!("list_links not scripted for this scenario"))
    }

    async fn shorten(&self, _request: &ShortenRequest) -> Result<ShortLink, ClassifiedError> {
        panic!("shorten not scripted for this scenario");
    }

    async fn delete_link(&self, _id: &str) -> Result<(), ClassifiedError> {
        panic!("delete_link not scripted for this scenario");
    }
}

#[fixture]
fn ann() -> Identity {
    Identity {
        id: "u1".to_owned(),
        name: "Ann".to_owned(),
        email: "a@x.com".to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn successful_login_caches_and_persists_the_identity(ann: Identity) {
    let api = ScriptedApi {
        login_result: Some(Ok(ann.clone())),
        ..ScriptedApi::default()
    };
    let store = Arc::new(InMemoryIdentityStore::default());
    let cache = SessionCache::new(Arc::new(api), store.clone());

    let request = LoginRequest {
        email: "a@x.com".to_owned(),
        password: "pw".to_owned(),
    };
    cache.login(&request).await.expect("login should succeed");

    // Write-through: memory and durable storage agree after the mutation.
    assert_eq!(cache.identity(), Some(ann.clone()));
    assert_eq!(store.stored(), Some(ann));
    assert_eq!(cache.phase(), SessionPhase::Authenticated);
}

#[rstest]
#[tokio::test]
async fn startup_401_during_revalidation_clears_everything(ann: Identity) {
    let api = ScriptedApi {
        list_result: Some(Err(
            ClassifiedError::application(401, "unauthorized").with_code("Unauthorized")
        )),
        ..ScriptedApi::default()
    };
    let store = Arc::new(InMemoryIdentityStore::holding(ann.clone()));
    let cache = SessionCache::new(Arc::new(api), store.clone());

    assert!(cache.loading(), "restored identity must trigger revalidation");
    assert_eq!(cache.identity(), Some(ann));

    cache.revalidate().await;

    assert_eq!(cache.phase(), SessionPhase::Anonymous);
    assert_eq!(cache.identity(), None);
    assert_eq!(store.stored(), None, "durable state must clear with memory");
}

#[rstest]
#[tokio::test]
async fn transient_outage_during_revalidation_keeps_the_session(ann: Identity) {
    let api = ScriptedApi {
        list_result: Some(Err(ClassifiedError::network("connection refused"))),
        ..ScriptedApi::default()
    };
    let store = Arc::new(InMemoryIdentityStore::holding(ann.clone()));
    let cache = SessionCache::new(Arc::new(api), store.clone());

    cache.revalidate().await;

    assert_eq!(cache.phase(), SessionPhase::Authenticated);
    assert_eq!(cache.identity(), Some(ann.clone()));
    assert_eq!(store.stored(), Some(ann), "an outage must not log the user out");
}

#[rstest]
#[tokio::test]
async fn logout_clears_both_sides_and_stays_idempotent(ann: Identity) {
    let api = ScriptedApi {
        logout_result: Err(ClassifiedError::server_unavailable(503, "down")),
        ..ScriptedApi::default()
    };
    let store = Arc::new(InMemoryIdentityStore::holding(ann));
    let cache = SessionCache::new(Arc::new(api), store.clone());

    cache.logout().await;
    assert_eq!(cache.identity(), None);
    assert_eq!(store.stored(), None);

    // Logging out while already logged out must not fail or resurrect state.
    cache.logout().await;
    assert_eq!(cache.identity(), None);
    assert_eq!(cache.phase(), SessionPhase::Anonymous);
}
