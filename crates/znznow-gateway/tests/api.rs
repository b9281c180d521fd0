//! End-to-end tests for the HTTP API.
//!
//! Each test runs the full router against a real SQLite store and file tree
//! in a temporary directory; only the network listener is simulated.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use znznow_document::PdfRenderer;
use znznow_gateway::{create_router, GatewayConfig, GatewayState};
use znznow_service::{AgreementService, EmailNotifier, FileStore, NotifierConfig};
use znznow_store::SqliteStore;

/// A valid 1x1 PNG data URI, the shape a signature canvas produces.
const PIXEL_PNG_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

fn test_server() -> (TestServer, TempDir) {
    let dir = TempDir::new().unwrap();
    let files = FileStore::open(dir.path()).unwrap();
    let store = Arc::new(SqliteStore::open(dir.path().join("agreements.db")).unwrap());
    let service = Arc::new(AgreementService::new(
        store,
        files,
        PdfRenderer::default(),
        EmailNotifier::new(NotifierConfig::default()),
    ));
    let state = GatewayState::new(service, GatewayConfig::default());
    (TestServer::new(create_router(state)).unwrap(), dir)
}

fn sample_payload() -> Value {
    json!({
        "vendorName": "Spice Tours",
        "vendorEmail": "a@b.com",
        "vendorRegistration": "REG1",
        "contactPerson": "Jane",
        "partnershipLevel": "growth",
        "vendorPhone": "+255 123 456 789",
        "signature": PIXEL_PNG_URI,
    })
}

async fn submit(server: &TestServer, payload: &Value) -> Value {
    let response = server.post("/agreements").json(payload).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn health_returns_ok_with_timestamp() {
    let (server, _dir) = test_server();
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn submit_then_fetch_round_trip() {
    let (server, _dir) = test_server();
    let created = submit(&server, &sample_payload()).await;

    assert_eq!(created["status"], "success");
    assert_eq!(created["message"], "Agreement created successfully");
    let id = created["id"].as_str().unwrap();
    assert_eq!(
        created["pdf_url"].as_str().unwrap(),
        format!("/agreements/{id}/pdf")
    );
    assert_eq!(
        created["download_url"].as_str().unwrap(),
        format!("/agreements/{id}/download")
    );

    let response = server.get(&format!("/agreements/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let record = response.json::<Value>();
    assert_eq!(record["vendor_name"], "Spice Tours");
    assert_eq!(record["vendor_email"], "a@b.com");
    assert_eq!(record["vendor_registration"], "REG1");
    assert_eq!(record["status"], "signed");
    assert!(record["vendor_signed_date"].is_string());
    assert!(record["znznow_signed_date"].is_null());
}

#[tokio::test]
async fn each_missing_required_field_is_named() {
    let (server, _dir) = test_server();

    for field in [
        "vendorName",
        "vendorEmail",
        "vendorRegistration",
        "contactPerson",
        "signature",
    ] {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove(field);

        let response = server.post("/agreements").json(&payload).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{field}");

        let body = response.json::<Value>();
        assert_eq!(body["error"]["code"], "bad_request");
        assert!(
            body["error"]["message"].as_str().unwrap().contains(field),
            "error should name {field}: {body}"
        );
    }

    // None of the rejected submissions were persisted.
    let listing = server.get("/agreements").await.json::<Value>();
    assert_eq!(listing["total"], 0);
}

#[tokio::test]
async fn pdf_retrieval_is_byte_identical() {
    let (server, _dir) = test_server();
    let created = submit(&server, &sample_payload()).await;
    let id = created["id"].as_str().unwrap();

    let first = server.get(&format!("/agreements/{id}/pdf")).await;
    assert_eq!(first.status_code(), StatusCode::OK);
    assert_eq!(
        first.header("content-type").to_str().unwrap(),
        "application/pdf"
    );
    let first_bytes = first.as_bytes().to_vec();
    assert!(first_bytes.starts_with(b"%PDF"));

    // Vendor table content survives into the served bytes.
    let contains = |needle: &[u8]| {
        first_bytes
            .windows(needle.len())
            .any(|window| window == needle)
    };
    assert!(contains(b"Spice Tours"));
    assert!(contains(b"REG1"));

    let second = server.get(&format!("/agreements/{id}/pdf")).await;
    assert_eq!(second.as_bytes().to_vec(), first_bytes);
}

#[tokio::test]
async fn download_sets_derived_filename() {
    let (server, _dir) = test_server();
    let created = submit(&server, &sample_payload()).await;
    let id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/agreements/{id}/download")).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("ZNZNOW_Agreement_Spice_Tours_"));
    assert!(disposition.ends_with(".pdf\""));
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let (server, _dir) = test_server();

    let unknown = "00000000-0000-4000-8000-000000000000";
    for path in [
        format!("/agreements/{unknown}"),
        format!("/agreements/{unknown}/pdf"),
        format!("/agreements/{unknown}/download"),
    ] {
        let response = server.get(&path).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
    }

    let response = server.get("/agreements/not-a-uuid").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleted_pdf_file_is_distinguishable_404() {
    let (server, _dir) = test_server();
    let created = submit(&server, &sample_payload()).await;
    let id = created["id"].as_str().unwrap();

    let record = server.get(&format!("/agreements/{id}")).await.json::<Value>();
    std::fs::remove_file(record["pdf_path"].as_str().unwrap()).unwrap();

    let response = server.get(&format!("/agreements/{id}/pdf")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.json::<Value>()["error"]["message"]
        .as_str()
        .unwrap()
        .contains("PDF file not found"));
}

#[tokio::test]
async fn pagination_is_newest_first() {
    let (server, _dir) = test_server();

    for i in 1..=5 {
        let mut payload = sample_payload();
        payload["vendorName"] = json!(format!("Vendor {i}"));
        submit(&server, &payload).await;
        // Distinct created_at values keep the ordering deterministic.
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let first = server
        .get("/agreements")
        .add_query_param("per_page", "2")
        .await
        .json::<Value>();
    assert_eq!(first["total"], 5);
    assert_eq!(first["pages"], 3);
    assert_eq!(first["page"], 1);
    assert_eq!(first["agreements"].as_array().unwrap().len(), 2);
    assert_eq!(first["agreements"][0]["vendor_name"], "Vendor 5");
    assert_eq!(first["agreements"][1]["vendor_name"], "Vendor 4");

    let last = server
        .get("/agreements")
        .add_query_param("per_page", "2")
        .add_query_param("page", "3")
        .await
        .json::<Value>();
    assert_eq!(last["agreements"].as_array().unwrap().len(), 1);
    assert_eq!(last["agreements"][0]["vendor_name"], "Vendor 1");
}

#[tokio::test]
async fn status_filter_matches_exactly() {
    let (server, _dir) = test_server();
    submit(&server, &sample_payload()).await;

    let signed = server
        .get("/agreements")
        .add_query_param("status", "signed")
        .await
        .json::<Value>();
    assert_eq!(signed["total"], 1);

    let pending = server
        .get("/agreements")
        .add_query_param("status", "pending")
        .await
        .json::<Value>();
    assert_eq!(pending["total"], 0);
}

#[tokio::test]
async fn statistics_counts_and_recent() {
    let (server, _dir) = test_server();

    for i in 1..=6 {
        let mut payload = sample_payload();
        payload["vendorName"] = json!(format!("Vendor {i}"));
        if i == 1 {
            payload["partnershipLevel"] = json!("strategic");
        }
        submit(&server, &payload).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let stats = server.get("/statistics").await.json::<Value>();
    assert_eq!(stats["total"], 6);
    assert_eq!(stats["by_status"]["signed"], 6);
    assert_eq!(stats["by_partnership"]["growth"], 5);
    assert_eq!(stats["by_partnership"]["strategic"], 1);

    let recent = stats["recent"].as_array().unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0]["vendor_name"], "Vendor 6");
}

#[tokio::test]
async fn stateless_submit_streams_pdf_without_persisting() {
    let (server, _dir) = test_server();

    let response = server.post("/submit").json(&sample_payload()).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/pdf"
    );
    assert!(response
        .header("content-disposition")
        .to_str()
        .unwrap()
        .starts_with("attachment"));
    assert!(response.as_bytes().starts_with(b"%PDF"));

    let listing = server.get("/agreements").await.json::<Value>();
    assert_eq!(listing["total"], 0);
}

#[tokio::test]
async fn stateless_submit_validates_fields_too() {
    let (server, _dir) = test_server();

    let mut payload = sample_payload();
    payload.as_object_mut().unwrap().remove("signature");
    let response = server.post("/submit").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_signature_still_creates_agreement() {
    let (server, _dir) = test_server();

    let mut payload = sample_payload();
    payload["signature"] = json!("definitely not base64");
    let created = submit(&server, &payload).await;

    let id = created["id"].as_str().unwrap();
    let record = server.get(&format!("/agreements/{id}")).await.json::<Value>();
    assert!(record["signature_path"].is_null());
    assert!(record["pdf_path"].is_string());
}

#[tokio::test]
async fn whatsapp_link_uses_vendor_phone() {
    let (server, _dir) = test_server();
    let created = submit(&server, &sample_payload()).await;
    let id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/agreements/{id}/whatsapp")).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let link = response.json::<Value>()["link"].as_str().unwrap().to_string();
    assert!(link.starts_with("https://wa.me/255123456789?text="));
    assert!(link.contains(&format!("agreements%2F{id}%2Fdownload")));
}

#[tokio::test]
async fn whatsapp_link_without_phone_is_rejected() {
    let (server, _dir) = test_server();

    let mut payload = sample_payload();
    payload.as_object_mut().unwrap().remove("vendorPhone");
    let created = submit(&server, &payload).await;
    let id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/agreements/{id}/whatsapp")).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
