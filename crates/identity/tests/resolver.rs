//! Session resolver tests.

use gate::{IdentityResolver, Principal, Role};
use std::{sync::Arc, time::Duration};
use welfare_identity::{
    DirectoryError, Identity, IdentityBackend, MemoryBackend, SessionResolver, SessionStore,
    UserDirectory, UserRecord,
};

fn backend() -> MemoryBackend {
    let users = Arc::new(UserDirectory::new());
    users.upsert(UserRecord::new("user_admin", "Admin", "admin@example.org").with_role(Role::Admin));
    users.upsert(UserRecord::new("user_plain", "Plain", "plain@example.org"));
    let sessions = Arc::new(SessionStore::new());
    sessions.insert_with_token("tok-admin", "user_admin", Some("http://localhost:3000"), 60);
    sessions.insert_with_token("tok-plain", "user_plain", None, 60);
    sessions.insert_with_token("tok-evil", "user_admin", Some("https://evil.example"), 60);
    sessions.insert_with_token("tok-ghost", "user_ghost", None, 60);
    MemoryBackend::new(users, sessions)
}

#[tokio::test]
async fn resolves_id_and_role_together() {
    let resolver = SessionResolver::new(Arc::new(backend()));
    let principal = resolver.resolve(Some("tok-admin")).await;
    assert_eq!(principal, Principal::user("user_admin", Some(Role::Admin)));

    let plain = resolver.resolve(Some("tok-plain")).await;
    assert_eq!(plain, Principal::user("user_plain", None));
}

#[tokio::test]
async fn missing_or_unknown_token_is_anonymous() {
    let resolver = SessionResolver::new(Arc::new(backend()));
    assert_eq!(resolver.resolve(None).await, Principal::anonymous());
    assert_eq!(resolver.resolve(Some("")).await, Principal::anonymous());
    assert_eq!(resolver.resolve(Some("nope")).await, Principal::anonymous());
}

#[tokio::test]
async fn role_change_visible_on_next_request() {
    let backend = Arc::new(backend());
    let resolver = SessionResolver::new(Arc::clone(&backend));
    backend.users.set_role("user_plain", Role::Scrapper).unwrap();
    let principal = resolver.resolve(Some("tok-plain")).await;
    assert_eq!(principal.role, Some(Role::Scrapper));
}

#[tokio::test]
async fn dangling_session_fails_closed() {
    let resolver = SessionResolver::new(Arc::new(backend()));
    assert_eq!(
        resolver.resolve(Some("tok-ghost")).await,
        Principal::anonymous()
    );
}

#[tokio::test]
async fn unauthorized_party_is_anonymous() {
    let resolver = SessionResolver::new(Arc::new(backend()))
        .with_authorized_parties(["http://localhost:3000", "https://khadimemillat.org"]);
    assert!(resolver.resolve(Some("tok-admin")).await.is_authenticated());
    assert!(!resolver.resolve(Some("tok-evil")).await.is_authenticated());
    // No recorded party cannot satisfy a non-empty list.
    assert!(!resolver.resolve(Some("tok-plain")).await.is_authenticated());
}

struct DownBackend;

impl IdentityBackend for DownBackend {
    fn lookup(
        &self,
        _token: &str,
    ) -> impl Future<Output = Result<Option<Identity>, DirectoryError>> + Send {
        std::future::ready(Err(DirectoryError::Unavailable("connection refused".into())))
    }
}

#[tokio::test]
async fn backend_failure_is_anonymous() {
    let resolver = SessionResolver::new(Arc::new(DownBackend));
    assert_eq!(
        resolver.resolve(Some("anything")).await,
        Principal::anonymous()
    );
}

struct SlowBackend;

impl IdentityBackend for SlowBackend {
    fn lookup(
        &self,
        _token: &str,
    ) -> impl Future<Output = Result<Option<Identity>, DirectoryError>> + Send {
        async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Some(Identity {
                user_id: "late".into(),
                role: Some(Role::Admin),
                authorized_party: None,
            }))
        }
    }
}

#[tokio::test(start_paused = true)]
async fn slow_backend_times_out_to_anonymous() {
    let resolver =
        SessionResolver::new(Arc::new(SlowBackend)).with_timeout(Duration::from_millis(50));
    assert_eq!(
        resolver.resolve(Some("tok")).await,
        Principal::anonymous()
    );
}

#[test]
fn directory_error_display() {
    assert_eq!(
        DirectoryError::Unavailable("down".into()).to_string(),
        "identity service unavailable: down"
    );
    assert_eq!(
        DirectoryError::DanglingSession("u".into()).to_string(),
        "session references unknown user u"
    );
}
