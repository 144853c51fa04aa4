/// Integration tests for the local-first workspace on a file-backed store

use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;
use vena_shared::local::{storage_key, LocalWorkspace, AUTH_KEY};
use vena_shared::models::client::NewClient;
use vena_shared::models::sop::NewSop;
use vena_shared::models::user::{User, UserRole};
use vena_shared::models::{Client, Sop};
use vena_shared::navigation::{Navigator, Screen, ViewType};
use vena_shared::persist::{FileKeyValueStore, KeyValueStore, PersistentState};
use vena_shared::store::Table;

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        TempDir(std::env::temp_dir().join(format!("vena-local-{}", Uuid::new_v4())))
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn member(permissions: Vec<ViewType>) -> User {
    User {
        id: "u-2".to_string(),
        email: "tim@vena.test".to_string(),
        full_name: "Tim".to_string(),
        role: UserRole::Member,
        permissions: Some(permissions),
    }
}

#[tokio::test]
async fn test_collections_survive_restart() {
    let dir = TempDir::new();

    let ana = {
        let store = Arc::new(FileKeyValueStore::new(&dir.0));
        let mut workspace = LocalWorkspace::open(store).await;
        let sop: NewSop = serde_json::from_value(serde_json::json!({
            "title": "Backup kartu memori",
            "category": "Fotografi",
            "content": "Salin ke dua disk"
        }))
        .unwrap();
        workspace.insert::<Sop>(sop).await.unwrap();
        workspace
            .insert::<Client>(NewClient::new("Ana", "ana@x.com", "0811", "active"))
            .await
            .unwrap()
    };

    let store = Arc::new(FileKeyValueStore::new(&dir.0));
    assert!(store.path_for(&storage_key(Table::Clients)).exists());

    let workspace = LocalWorkspace::open(store).await;
    assert_eq!(workspace.list::<Client>(), &[ana]);
    assert_eq!(workspace.list::<Sop>()[0].title, "Backup kartu memori");
}

#[tokio::test]
async fn test_corrupt_file_falls_back_to_empty() {
    let dir = TempDir::new();
    let store = Arc::new(FileKeyValueStore::new(&dir.0));
    store.set("vena-clients", "[{\"broken\":").await.unwrap();

    let workspace = LocalWorkspace::open(store.clone()).await;
    assert!(workspace.list::<Client>().is_empty());
    assert_eq!(
        store.get("vena-clients").await.unwrap().as_deref(),
        Some("[{\"broken\":")
    );
}

#[tokio::test]
async fn test_session_persists_and_gates_views() {
    let dir = TempDir::new();
    {
        let store = Arc::new(FileKeyValueStore::new(&dir.0));
        let mut workspace = LocalWorkspace::open(store).await;
        workspace.login(member(vec![ViewType::Projects])).await;
    }

    let store = Arc::new(FileKeyValueStore::new(&dir.0));
    let authenticated = PersistentState::load(store.clone(), AUTH_KEY, false).await;
    assert!(*authenticated.get());

    let workspace = LocalWorkspace::open(store).await;
    let mut navigator = Navigator::new();

    let outcome = workspace.on_route_change(&mut navigator, "#/login");
    assert_eq!(outcome.redirect.as_deref(), Some("#/dashboard"));
    assert_eq!(outcome.screen, Screen::App { view: ViewType::Dashboard });

    let outcome = workspace.on_route_change(&mut navigator, "#/projects?id=p-1");
    assert_eq!(outcome.screen, Screen::App { view: ViewType::Projects });

    let outcome = workspace.on_route_change(&mut navigator, "#/finance");
    assert_eq!(outcome.screen, Screen::AccessDenied { view: ViewType::Finance });
}
