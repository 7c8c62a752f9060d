//! End-to-end test of the system-mail page flow: list fetch, attachment
//! extraction, deduplicated catalog loading, and type-scoped name
//! resolution, all over a mock HTTP server.

use std::sync::Arc;

use gmdesk::stores::SystemMailStore;
use gmdesk::{Config, FilterMap, HttpConfig, HttpTransport};
use mockito::{Matcher, Server};
use serde_json::json;

fn transport_for(server: &Server) -> Arc<HttpTransport> {
    let config = Config {
        http: HttpConfig {
            base_url: server.url(),
            ..HttpConfig::default()
        },
        ..Config::default()
    };
    Arc::new(HttpTransport::new(&config).expect("transport build failed"))
}

fn mail_list_body() -> String {
    json!({
        "code": 0,
        "data": {
            "list": [
                {
                    "id": 1,
                    "title": "season rewards",
                    "attachments": [
                        { "type": "gold", "id": 7, "amount": 500 },
                        { "type": "gem", "id": 7, "amount": 10 }
                    ],
                    "create_time": 1_700_000_000
                },
                {
                    "id": 2,
                    "title": "compensation",
                    "attachments": [
                        { "type": "gold", "id": 8, "amount": 50 }
                    ],
                    "create_time": 1_700_000_100
                }
            ],
            "total": 2,
            "page": 1,
            "pageSize": 10
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_page_fetch_resolves_type_scoped_names() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/gm/email/system/list")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(mail_list_body())
        .create_async()
        .await;

    // Three attachments across two mails, but only two distinct types:
    // each catalog endpoint must be hit exactly once.
    let gold_mock = server
        .mock("GET", "/gm/item/resourceList")
        .match_query(Matcher::UrlEncoded("type".into(), "gold".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "code": 0,
                "data": { "list": [
                    { "id": 7, "name": "Gold Pouch" },
                    { "id": 8, "name": "Gold Chest" }
                ]}
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let gem_mock = server
        .mock("GET", "/gm/item/resourceList")
        .match_query(Matcher::UrlEncoded("type".into(), "gem".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "code": 0, "data": { "list": [ { "id": 7, "name": "Ruby" } ] } }).to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let mut store = SystemMailStore::new(transport_for(&server));
    store.fetch_list(FilterMap::new()).await;

    assert_eq!(store.list.items().len(), 2);
    assert_eq!(store.list.total(), 2);

    // Identical ids resolve per type.
    assert_eq!(store.resource_name("gold", 7), "Gold Pouch");
    assert_eq!(store.resource_name("gem", 7), "Ruby");
    assert_eq!(store.resource_name("gold", 8), "Gold Chest");

    gold_mock.assert_async().await;
    gem_mock.assert_async().await;
}

#[tokio::test]
async fn test_second_page_fetch_skips_cached_catalogs() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/gm/email/system/list")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(mail_list_body())
        .expect(2)
        .create_async()
        .await;
    let gold_mock = server
        .mock("GET", "/gm/item/resourceList")
        .match_query(Matcher::UrlEncoded("type".into(), "gold".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "code": 0, "data": { "list": [] } }).to_string())
        .expect(1)
        .create_async()
        .await;
    let gem_mock = server
        .mock("GET", "/gm/item/resourceList")
        .match_query(Matcher::UrlEncoded("type".into(), "gem".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "code": 0, "data": { "list": [] } }).to_string())
        .expect(1)
        .create_async()
        .await;

    let mut store = SystemMailStore::new(transport_for(&server));
    store.fetch_list(FilterMap::new()).await;
    store.fetch_list(FilterMap::new()).await;

    gold_mock.assert_async().await;
    gem_mock.assert_async().await;
}

#[tokio::test]
async fn test_one_catalog_failure_degrades_to_placeholder() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/gm/email/system/list")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(mail_list_body())
        .create_async()
        .await;
    server
        .mock("GET", "/gm/item/resourceList")
        .match_query(Matcher::UrlEncoded("type".into(), "gold".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "code": 0, "data": { "list": [ { "id": 7, "name": "Gold Pouch" } ] } })
                .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/gm/item/resourceList")
        .match_query(Matcher::UrlEncoded("type".into(), "gem".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "code": 3, "msg": "unknown type" }).to_string())
        .create_async()
        .await;

    let mut store = SystemMailStore::new(transport_for(&server));
    store.fetch_list(FilterMap::new()).await;

    // The page is intact and the healthy type resolved.
    assert_eq!(store.list.items().len(), 2);
    assert_eq!(store.resource_name("gold", 7), "Gold Pouch");
    // The failed type falls back deterministically instead of erroring.
    assert_eq!(store.resource_name("gem", 7), "Resource7");
}

#[tokio::test]
async fn test_failed_list_fetch_yields_empty_valid_state() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/gm/email/system/list")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "code": 1, "msg": "backend busy" }).to_string())
        .create_async()
        .await;

    let mut store = SystemMailStore::new(transport_for(&server));
    store.fetch_list(FilterMap::new()).await;

    assert!(store.list.items().is_empty());
    assert_eq!(store.list.total(), 0);
    assert!(!store.list.loading());
}

#[tokio::test]
async fn test_resource_type_names_for_pickers() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/gm/item/resourceTypeList")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "code": 0,
                "data": { "list": [
                    { "type": "gold", "name": "Gold" },
                    { "type": "gem", "name": "Gems" }
                ]}
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let store = SystemMailStore::new(transport_for(&server));
    let types = store.fetch_resource_types().await.expect("type load failed");
    assert_eq!(types.len(), 2);
    assert_eq!(store.resource_type_name("gem"), "Gems");
    assert_eq!(store.resource_type_name("title"), "Typetitle");

    // Idempotent after completion; the mock's expect(1) enforces it.
    store.fetch_resource_types().await.expect("reload failed");
}
