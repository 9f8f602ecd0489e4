//! Directory client tests against a mocked API.

use popwatch_client::DirectoryClient;
use popwatch_core::PopwatchError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_BODY: &str = r#"{
    "metadata": {"count": 3},
    "items": [
        {
            "tags": [{"name": "Edge Locations"}],
            "item": {
                "id": "cf-map-pins#NRT57",
                "name": "Tokyo PoP",
                "additionalFields": {
                    "pinName": "Tokyo",
                    "pinDescription": "Japan"
                }
            }
        },
        {
            "tags": [{"name": "Regional Caches"}],
            "item": {
                "id": "cf-map-pins#NRT-RC",
                "name": "Tokyo Cache",
                "additionalFields": {
                    "pinName": "Tokyo",
                    "pinDescription": "Japan"
                }
            }
        },
        {
            "tags": [{"name": "Edge Locations"}],
            "item": {
                "id": "stray-id",
                "name": "Broken Entry",
                "additionalFields": {}
            }
        }
    ]
}"#;

#[tokio::test]
async fn fetches_edge_locations_and_strips_id_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dirs/items/search"))
        .and(query_param("item.directoryId", "cf-map-pins"))
        .and(query_param("size", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LISTING_BODY, "application/json"))
        .mount(&server)
        .await;

    let client = DirectoryClient::builder().base_url(server.uri()).build();
    let pops = client.edge_locations().await.unwrap();

    // The cache entry and the malformed-id entry are dropped
    assert_eq!(pops.len(), 1);
    assert_eq!(pops[0].id, "NRT57");
    assert_eq!(pops[0].name, "Tokyo PoP");
    assert_eq!(pops[0].location, "Tokyo");
    assert_eq!(pops[0].country, "Japan");
    assert!(pops[0].code.is_none());
    assert!(pops[0].subnet.is_none());
}

#[tokio::test]
async fn locale_is_forwarded_to_the_directory() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dirs/items/search"))
        .and(query_param("item.locale", "en_US"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"metadata": {"count": 0}, "items": []}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = DirectoryClient::builder()
        .base_url(server.uri())
        .locale("en_US")
        .build();
    let pops = client.edge_locations().await.unwrap();
    assert!(pops.is_empty());
}

#[tokio::test]
async fn error_status_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dirs/items/search"))
        .respond_with(
            ResponseTemplate::new(503).set_body_raw(r#"{"error": "try later"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = DirectoryClient::builder().base_url(server.uri()).build();
    let err = client.edge_locations().await.unwrap_err();

    match err {
        PopwatchError::Api { code, message } => {
            assert_eq!(code, 503);
            assert_eq!(message, "try later");
        }
        other => panic!("unexpected error: {other}"),
    }
}
