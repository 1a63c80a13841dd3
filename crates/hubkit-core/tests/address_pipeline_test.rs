#![allow(clippy::unwrap_used)]
// End-to-end tests for the address export pipeline against a mock service.

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hubkit_core::{CoreError, InventoryConfig, export_customer_addresses};

// ── Helpers ─────────────────────────────────────────────────────────

const KEY: &str = "pipeline-key";

async fn setup() -> (MockServer, hubkit_api::InventoryClient) {
    let server = MockServer::start().await;
    let config = InventoryConfig::new(
        Url::parse(&server.uri()).unwrap(),
        SecretString::from(KEY.to_string()),
    );
    let client = config.connect().unwrap();
    (server, client)
}

fn address(id: u64) -> Value {
    json!({
        "id": id,
        "first_name": format!("First{id}"),
        "last_name": format!("Last{id}"),
        "street": format!("{id} High Street"),
        "postcode": format!("P{id}"),
        "state": "WA",
        "country": "AU",
        "lat": -31.95,
        "lon": 115.86
    })
}

async fn mount_count(server: &MockServer, count: u64) {
    Mock::given(method("GET"))
        .and(path("/customer_numbers"))
        .and(header("X-API-Key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(count))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_address(server: &MockServer, number: u64, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/address_inventory/{number}")))
        .and(header("X-API-Key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_three_customers_export_four_lines() {
    let (server, client) = setup().await;
    mount_count(&server, 3).await;
    for n in 1..=3 {
        mount_address(&server, n, address(n * 100)).await;
    }

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("customer_addresses.csv");

    let summary = export_customer_addresses(&client, &out).await.unwrap();

    assert_eq!(summary.path, out);
    assert_eq!(summary.addresses.len(), 3);

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "ID,First Name,Last Name,Street,Postcode,State,Country,Latitude,Longitude"
    );
    assert!(lines[1].starts_with("100,First100,"));
    assert!(lines[2].starts_with("200,First200,"));
    assert!(lines[3].starts_with("300,First300,"));
}

#[tokio::test]
async fn test_zero_customers_writes_header_only() {
    let (server, client) = setup().await;
    mount_count(&server, 0).await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("empty.csv");

    let summary = export_customer_addresses(&client, &out).await.unwrap();

    assert!(summary.addresses.is_empty());
    assert_eq!(std::fs::read_to_string(&out).unwrap().lines().count(), 1);
}

// ── Abort paths ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_lat_aborts_without_file() {
    let (server, client) = setup().await;
    mount_count(&server, 2).await;
    mount_address(&server, 1, address(1)).await;

    let mut broken = address(2);
    broken.as_object_mut().unwrap().remove("lat");
    mount_address(&server, 2, broken).await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("customer_addresses.csv");

    let err = export_customer_addresses(&client, &out).await.unwrap_err();

    assert!(matches!(err, CoreError::MissingField { ref field } if field == "lat"));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_wrong_type_aborts_without_file() {
    let (server, client) = setup().await;
    mount_count(&server, 1).await;

    let mut broken = address(1);
    broken["id"] = json!("1");
    mount_address(&server, 1, broken).await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("customer_addresses.csv");

    let err = export_customer_addresses(&client, &out).await.unwrap_err();

    assert!(matches!(err, CoreError::TypeMismatch { ref field, .. } if field == "id"));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_server_error_reports_index() {
    let (server, client) = setup().await;
    mount_count(&server, 3).await;
    mount_address(&server, 1, address(1)).await;

    Mock::given(method("GET"))
        .and(path("/address_inventory/2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("customer_addresses.csv");

    let err = export_customer_addresses(&client, &out).await.unwrap_err();

    match err {
        CoreError::Transport {
            ref endpoint,
            index,
            ..
        } => {
            assert_eq!(endpoint, "address_inventory/2");
            assert_eq!(index, Some(2));
        }
        other => panic!("expected Transport error, got: {other:?}"),
    }
    assert!(!out.exists());
}

#[tokio::test]
async fn test_rejected_key_on_count() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("customer_addresses.csv");

    let err = export_customer_addresses(&client, &out).await.unwrap_err();

    let api = err.api_error().unwrap();
    assert!(api.is_auth_failure());
    assert!(matches!(err, CoreError::Transport { index: None, .. }));
}
