/// HTTP tests for the Vena API
///
/// Every test drives the full router (tracing, CORS, handlers) against an
/// in-memory row store.

mod common;

use axum::http::{Method, StatusCode};
use common::TestContext;
use serde_json::json;
use vena_shared::models::client::NewClient;
use vena_shared::models::Client;
use vena_shared::store::{RowStore, Table};

fn ana() -> serde_json::Value {
    json!({
        "name": "Ana",
        "email": "ana@x.com",
        "phone": "0811",
        "status": "active"
    })
}

#[tokio::test]
async fn test_health_reports_load_state() {
    let ctx = TestContext::unloaded();

    let (status, body) = ctx.get("/health").await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["backend"], "memory");
    assert_eq!(body["loadState"]["state"], "idle");

    ctx.data.load_all().await.unwrap();
    let (_, body) = ctx.get("/health").await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["loadState"]["state"], "ready");
}

#[tokio::test]
async fn test_client_crud_round_trip() {
    let ctx = TestContext::new().await.unwrap();

    let (status, created) = ctx.post("/v1/clients", ana()).await.unwrap();
    assert_eq!(status, StatusCode::CREATED, "body: {}", created);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["name"], "Ana");
    assert_eq!(created["clientType"], "Langsung");

    let (status, list) = ctx.get("/v1/clients").await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], created["id"]);

    let (status, fetched) = ctx.get(&format!("/v1/clients/{}", id)).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = ctx
        .patch(&format!("/v1/clients/{}", id), json!({ "status": "inactive" }))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK, "body: {}", updated);
    assert_eq!(updated["status"], "inactive");
    assert_eq!(updated["name"], "Ana");

    let held: Client = serde_json::from_value(updated).unwrap();
    assert_eq!(ctx.data.get::<Client>(&id).await, Some(held));

    let (status, body) = ctx.delete(&format!("/v1/clients/{}", id)).await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = ctx.get(&format!("/v1/clients/{}", id)).await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.store.count(Table::Clients).await, 0);
}

#[tokio::test]
async fn test_unknown_collection_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.get("/v1/invoices").await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    // The profile singleton is not a collection
    let (status, _) = ctx.post("/v1/profiles", json!({})).await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_payloads_are_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let mut bad_email = ana();
    bad_email["email"] = json!("not-an-email");
    let (status, body) = ctx.post("/v1/clients", bad_email).await.unwrap();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "email");

    let (status, body) = ctx.post("/v1/clients", json!({ "name": "Ana" })).await.unwrap();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "body");

    assert!(ctx.data.list::<Client>().await.is_empty());
}

#[tokio::test]
async fn test_update_of_unknown_record_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .patch("/v1/leads/missing", json!({ "status": "Dikonversi" }))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_status_counts_and_refetch() {
    let ctx = TestContext::new().await.unwrap();
    ctx.post("/v1/clients", ana()).await.unwrap();

    // Written behind the façade's back
    let row = serde_json::to_value(NewClient::new("Budi", "budi@x.com", "0812", "active")).unwrap();
    ctx.store
        .insert(Table::Clients, row.as_object().unwrap().clone())
        .await
        .unwrap();

    let (status, body) = ctx.get("/v1/status").await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["counts"]["clients"], 1);
    assert_eq!(body["counts"]["leads"], 0);
    assert_eq!(body["hasProfile"], false);

    let (status, body) = ctx.send(Method::POST, "/v1/refetch", None).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["counts"]["clients"], 2);
    assert_eq!(body["loadState"]["state"], "ready");
}

#[tokio::test]
async fn test_profile_get_and_patch() {
    let ctx = TestContext::new().await.unwrap();
    let (status, _) = ctx.get("/v1/profile").await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.seed_profile("studio@vena.test").await;
    ctx.data.refetch().await.unwrap();

    let (status, profile) = ctx.get("/v1/profile").await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["companyName"], "Vena Pictures");
    assert!(profile.get("idNumber").is_none());

    let (status, profile) = ctx
        .patch("/v1/profile", json!({ "companyName": "Vena Studio", "idNumber": "3171" }))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK, "body: {}", profile);
    assert_eq!(profile["companyName"], "Vena Studio");
    assert_eq!(profile["idNumber"], "3171");
    assert_eq!(profile["email"], "studio@vena.test");
}

#[tokio::test]
async fn test_inbox_publish_and_read_all() {
    let ctx = TestContext::new().await.unwrap();
    ctx.seed_profile("studio@vena.test").await;
    ctx.data.refetch().await.unwrap();

    let (status, first) = ctx
        .post(
            "/v1/inbox",
            json!({ "title": "Proyek baru", "message": "Ana memesan paket", "icon": "lead" }),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED, "body: {}", first);
    assert_eq!(first["isRead"], false);

    ctx.post(
        "/v1/inbox",
        json!({ "title": "Pembayaran", "message": "DP diterima", "icon": "payment" }),
    )
    .await
    .unwrap();

    let (status, _) = ctx.post("/v1/inbox", json!({ "title": "", "message": "", "icon": "" })).await.unwrap();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let id = first["id"].as_str().unwrap();
    let (status, read) = ctx.post(&format!("/v1/inbox/{}/read", id), json!({})).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["isRead"], true);

    let (status, body) = ctx.post("/v1/inbox/read-all", json!({})).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 1);

    let (_, list) = ctx.get("/v1/notifications").await.unwrap();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|n| n["isRead"] == true));
}
