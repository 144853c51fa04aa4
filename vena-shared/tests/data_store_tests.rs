/// Integration tests for the data access façade
///
/// Run against the in-process row store, so no database is needed.

use serde_json::json;
use std::sync::Arc;
use vena_shared::data::{DataError, DataStore, LoadState};
use vena_shared::models::client::{ClientPatch, NewClient};
use vena_shared::models::finance::NewTransaction;
use vena_shared::models::lead::{LeadPatch, NewLead};
use vena_shared::models::team::NewTeamMember;
use vena_shared::models::{Client, Lead, TeamMember, Transaction};
use vena_shared::store::{MemoryRowStore, RowStore, StoreError, Table};

fn new_lead(name: &str, date: &str) -> NewLead {
    serde_json::from_value(json!({
        "name": name,
        "contactChannel": "Instagram",
        "location": "Bandung",
        "status": "Sedang Diskusi",
        "date": date
    }))
    .unwrap()
}

#[tokio::test]
async fn test_create_client_in_empty_collection() {
    let data = DataStore::new(Arc::new(MemoryRowStore::new()));
    data.load_all().await.unwrap();
    assert!(data.list::<Client>().await.is_empty());

    let created = data
        .create::<Client>(NewClient::new("Ana", "ana@x.com", "0811", "active"))
        .await
        .unwrap();

    let clients = data.list::<Client>().await;
    assert_eq!(clients.len(), 1);
    assert!(!clients[0].id.is_empty());
    assert_eq!(clients[0].id, created.id);
    assert_eq!(clients[0].name, "Ana");
    assert_eq!(clients[0].email, "ana@x.com");
    assert_eq!(clients[0].phone, "0811");
    assert_eq!(clients[0].status, "active");
}

#[tokio::test]
async fn test_refetch_matches_local_state() {
    let store = Arc::new(MemoryRowStore::new());
    let data = DataStore::new(store.clone());

    data.create::<Lead>(new_lead("Budi", "2024-03-01")).await.unwrap();
    data.create::<Lead>(new_lead("Citra", "2024-05-01")).await.unwrap();
    let member: NewTeamMember = serde_json::from_value(json!({
        "name": "Dewi",
        "role": "Fotografer",
        "email": "dewi@x.com",
        "phone": "0813",
        "standardFee": 1500000
    }))
    .unwrap();
    let dewi = data.create::<TeamMember>(member).await.unwrap();
    assert_eq!(dewi.reward_balance, 0);
    assert!(dewi.performance_notes.is_empty());

    data.refetch().await.unwrap();
    assert_eq!(data.load_state().await, LoadState::Ready);

    let leads: Vec<_> = data.list::<Lead>().await.into_iter().map(|l| l.name).collect();
    assert_eq!(leads, vec!["Citra".to_string(), "Budi".to_string()]);
    assert_eq!(data.get::<TeamMember>(&dewi.id).await, Some(dewi));
    assert_eq!(data.count(Table::Leads).await, 2);
}

#[tokio::test]
async fn test_update_and_delete_lead() {
    let data = DataStore::new(Arc::new(MemoryRowStore::new()));
    let lead = data.create::<Lead>(new_lead("Budi", "2024-03-01")).await.unwrap();
    let other = data.create::<Lead>(new_lead("Citra", "2024-03-02")).await.unwrap();

    let patch: LeadPatch = serde_json::from_value(json!({
        "status": "Dikonversi",
        "notes": "Sudah DP"
    }))
    .unwrap();
    let updated = data.update::<Lead>(&lead.id, patch).await.unwrap();
    assert_eq!(updated.status, "Dikonversi");
    assert_eq!(updated.notes.as_deref(), Some("Sudah DP"));
    assert_eq!(updated.name, "Budi");

    let clear: LeadPatch = serde_json::from_value(json!({ "notes": null })).unwrap();
    let cleared = data.update::<Lead>(&lead.id, clear).await.unwrap();
    assert!(cleared.notes.is_none());

    data.delete::<Lead>(&lead.id).await.unwrap();
    let remaining = data.list::<Lead>().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, other.id);
}

#[tokio::test]
async fn test_concurrent_creates_all_land() {
    let data = DataStore::new(Arc::new(MemoryRowStore::new()));

    let tasks: Vec<_> = (0..10)
        .map(|i| {
            let data = data.clone();
            tokio::spawn(async move {
                let tx: NewTransaction = serde_json::from_value(json!({
                    "date": "2024-01-01",
                    "description": format!("Pembayaran {}", i),
                    "amount": 100000 * (i + 1),
                    "type": "Pemasukan",
                    "category": "DP Proyek",
                    "method": "Transfer Bank"
                }))
                .unwrap();
                data.create::<Transaction>(tx).await.unwrap()
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    let transactions = data.list::<Transaction>().await;
    assert_eq!(transactions.len(), 10);
    let mut ids: Vec<_> = transactions.iter().map(|t| t.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn test_rejected_write_leaves_state_untouched() {
    let data = DataStore::new(Arc::new(MemoryRowStore::new()));
    let ana = data
        .create::<Client>(NewClient::new("Ana", "ana@x.com", "0811", "active"))
        .await
        .unwrap();
    let before = data.snapshot().await;

    let patch = ClientPatch {
        name: Some("Nobody".to_string()),
        ..Default::default()
    };
    let err = data.update::<Client>("unknown-id", patch).await.unwrap_err();
    assert!(matches!(
        err,
        DataError::Store(StoreError::NotFound { table: "clients", .. })
    ));

    assert_eq!(data.snapshot().await, before);
    assert_eq!(data.get::<Client>(&ana.id).await.unwrap().name, "Ana");
}

#[tokio::test]
async fn test_out_of_band_rows_appear_after_refetch() {
    let store = Arc::new(MemoryRowStore::new());
    let data = DataStore::new(store.clone());
    data.load_all().await.unwrap();

    let row = serde_json::to_value(NewClient::new("Eka", "eka@x.com", "0815", "active")).unwrap();
    store
        .insert(Table::Clients, row.as_object().unwrap().clone())
        .await
        .unwrap();
    assert!(data.list::<Client>().await.is_empty());

    data.refetch().await.unwrap();
    assert_eq!(data.list::<Client>().await[0].name, "Eka");
}
