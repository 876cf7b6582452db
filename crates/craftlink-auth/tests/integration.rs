//! Integration tests for the craftlink-auth crate.
//!
//! These exercise the full marketplace flow on a real on-disk database:
//! registration, login across reopens, favorites gated on the session,
//! and the documented session-staleness quirk.

use std::sync::Arc;

use craftlink_auth::{AuthError, AuthService};
use craftlink_store::{Database, FavoritesIndex, KvStore, Role, UserPatch};
use craftlink_ui::{MemoryNotifier, NoticeKind};

async fn open_service(path: std::path::PathBuf) -> (AuthService, Arc<MemoryNotifier>) {
    let db = Database::open_and_migrate(path).await.unwrap();
    let notifier = Arc::new(MemoryNotifier::new());
    (AuthService::new(db, notifier.clone()), notifier)
}

#[tokio::test]
async fn account_logs_in_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    {
        let (auth, _) = open_service(db_path.clone()).await;
        auth.register("Ada", "555", "pw", Role::Worker)
            .await
            .unwrap();
    }

    let (auth, notifier) = open_service(db_path).await;

    // The session survived the restart too.
    let current = auth.check_auth().await.unwrap().unwrap();
    assert_eq!(current.phone, "555");

    auth.logout().await.unwrap();
    let user = auth.login("555", "pw").await.unwrap();
    assert_eq!(user.name, "Ada");
    assert_eq!(user.role, Role::Worker);

    let notices = notifier.notices();
    assert_eq!(notices.len(), 2);
    assert!(notices.iter().all(|n| n.kind == NoticeKind::Success));
}

#[tokio::test]
async fn registration_sequence_keeps_phones_unique() {
    let dir = tempfile::tempdir().unwrap();
    let (auth, _) = open_service(dir.path().join("test.db")).await;

    auth.register("Ada", "111", "pw", Role::User).await.unwrap();
    auth.register("Joe", "222", "pw", Role::Worker)
        .await
        .unwrap();
    let err = auth
        .register("Sam", "111", "pw", Role::Worker)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicatePhone { .. }));

    let all = auth.directory().list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    let phones: Vec<_> = all.iter().map(|u| u.phone.as_str()).collect();
    assert_eq!(phones, vec!["111", "222"]);
}

#[tokio::test]
async fn favorites_require_the_auth_session() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_and_migrate(dir.path().join("test.db"))
        .await
        .unwrap();
    let notifier = Arc::new(MemoryNotifier::new());
    let auth = AuthService::new(db.clone(), notifier);
    let favorites = FavoritesIndex::new(KvStore::new(db), auth.sessions().clone());

    // Signed out: toggling does nothing.
    assert!(!favorites.toggle("999").await.unwrap());

    auth.register("Ada", "555", "pw", Role::User).await.unwrap();
    assert!(favorites.toggle("999").await.unwrap());
    assert!(favorites.is_favorite("999").await.unwrap());

    auth.logout().await.unwrap();
    assert!(!favorites.is_favorite("999").await.unwrap());

    // Back in: the set was kept for the owner.
    auth.login("555", "pw").await.unwrap();
    assert!(favorites.is_favorite("999").await.unwrap());
}

#[tokio::test]
async fn session_snapshot_is_stale_until_next_login() {
    let dir = tempfile::tempdir().unwrap();
    let (auth, _) = open_service(dir.path().join("test.db")).await;

    auth.register("Joe", "777", "pw", Role::Worker)
        .await
        .unwrap();

    // Profile edit lands in the directory, not in the session snapshot.
    let mut patch = UserPatch::for_phone("777");
    patch.job_title = Some("Carpenter".to_string());
    auth.directory().upsert(patch).await.unwrap();

    let snapshot = auth.check_auth().await.unwrap().unwrap();
    assert_eq!(snapshot.job_title, "");

    auth.login("777", "pw").await.unwrap();
    let snapshot = auth.check_auth().await.unwrap().unwrap();
    assert_eq!(snapshot.job_title, "Carpenter");
}
