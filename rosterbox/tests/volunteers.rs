mod common;

use std::time::Duration;

use common::{CountingTransport, page, volunteers};
use http::StatusCode;
use pretty_assertions::assert_eq;
use rosterbox::{
    CacheKey, ClientError, ClientPolicy, RecordHitPolicy, RosterClient, VolunteerUpdate,
};
use serde_json::json;

#[tokio::test]
async fn test_page_is_fetched_once() {
    let transport = CountingTransport::new();
    transport.json(
        &page(0, 100),
        json!([{"id": 1, "first_name": "Anna"}, {"id": 2, "name": "Bram"}]),
    );
    let client = RosterClient::new(transport.clone());

    let first = client.volunteers().list(0, 100).await.unwrap();
    let ids: Vec<u64> = first.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(first[0].name, "Anna");
    assert_eq!(first[1].name, "Bram");

    let second = client.volunteers().list(0, 100).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(transport.hits(&page(0, 100)), 1);
    assert_eq!(format!("{}", CacheKey::page(0, 100)), "0:100");
}

#[tokio::test]
async fn test_concurrent_pages_share_one_request() {
    common::init_tracing();
    let transport = CountingTransport::new().with_delay(Duration::from_millis(30));
    transport.json(&page(0, 10), volunteers(1, 3));
    let client = RosterClient::new(transport.clone());

    let (first, second) = (client.volunteers(), client.volunteers());
    let (a, b) = tokio::join!(first.list(0, 10), second.list(0, 10));
    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(transport.hits(&page(0, 10)), 1);
}

#[tokio::test]
async fn test_concurrent_callers_see_the_same_failure() {
    common::init_tracing();
    let transport = CountingTransport::new().with_delay(Duration::from_millis(30));
    transport.respond(
        &page(0, 10),
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"detail": "database unavailable"}"#,
    );
    let client = RosterClient::new(transport.clone());

    let (first, second) = (client.volunteers(), client.volunteers());
    let (a, b) = tokio::join!(first.list(0, 10), second.list(0, 10));
    let (a, b) = (a.unwrap_err(), b.unwrap_err());
    assert_eq!(a.to_string(), "database unavailable");
    assert_eq!(b.to_string(), "database unavailable");
    assert_eq!(a.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(transport.hits(&page(0, 10)), 1);

    // Nothing was stored, so a retry goes back to the network.
    transport.json(&page(0, 10), volunteers(1, 2));
    assert_eq!(client.volunteers().list(0, 10).await.unwrap().len(), 2);
    assert_eq!(transport.hits(&page(0, 10)), 2);
}

#[tokio::test]
async fn test_unexpected_shape_is_not_cached() {
    let transport = CountingTransport::new();
    transport.json(&page(0, 5), json!({"items": []}));
    let client = RosterClient::new(transport.clone());

    let err = client.volunteers().list(0, 5).await.unwrap_err();
    assert!(matches!(err, ClientError::Shape(_)));
    client.volunteers().list(0, 5).await.unwrap_err();
    assert_eq!(transport.hits(&page(0, 5)), 2);
}

#[tokio::test]
async fn test_results_wrapper_and_empty_body() {
    let transport = CountingTransport::new();
    transport.json(&page(0, 5), json!({"results": [{"id": 4}], "count": 1}));
    transport.respond(&page(5, 5), StatusCode::OK, "");
    let client = RosterClient::new(transport.clone());

    let listed = client.volunteers().list(0, 5).await.unwrap();
    assert_eq!(listed[0].name, "#4");
    assert!(client.volunteers().list(5, 5).await.unwrap().is_empty());
    assert!(client.volunteers().list(5, 5).await.unwrap().is_empty());
    assert_eq!(transport.hits(&page(5, 5)), 2);
}

#[tokio::test]
async fn test_null_page_is_refetched_but_empty_array_is_kept() {
    let transport = CountingTransport::new();
    transport.respond(&page(0, 5), StatusCode::OK, "null");
    transport.json(&page(5, 5), json!([]));
    let client = RosterClient::new(transport.clone());

    assert!(client.volunteers().list(0, 5).await.unwrap().is_empty());
    transport.json(&page(0, 5), volunteers(1, 2));
    assert_eq!(client.volunteers().list(0, 5).await.unwrap().len(), 2);
    client.volunteers().list(0, 5).await.unwrap();
    assert_eq!(transport.hits(&page(0, 5)), 2);

    client.volunteers().list(5, 5).await.unwrap();
    client.volunteers().list(5, 5).await.unwrap();
    assert_eq!(transport.hits(&page(5, 5)), 1);
}

#[tokio::test]
async fn test_transport_failure_message_is_preserved() {
    let transport = CountingTransport::new();
    transport.fail(&page(0, 1), "connection refused");
    let client = RosterClient::new(transport);

    let err = client.volunteers().list(0, 1).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.to_string(), "connection refused");
}

#[tokio::test]
async fn test_all_stops_after_short_bulk_request() {
    let transport = CountingTransport::new();
    transport.json(&page(0, 10_000), volunteers(1, 1000));
    let client = RosterClient::new(transport.clone());

    let everyone = client.volunteers().all().await.unwrap();
    assert_eq!(everyone.len(), 1000);
    assert_eq!(transport.total(), 1);
}

#[tokio::test]
async fn test_all_pages_after_full_bulk_request() {
    let transport = CountingTransport::new();
    transport.json(&page(0, 10_000), volunteers(1, 10_000));
    transport.json(&page(10_000, 500), volunteers(10_001, 500));
    transport.json(&page(10_500, 500), volunteers(10_501, 500));
    transport.json(&page(11_000, 500), volunteers(11_001, 137));
    let client = RosterClient::new(transport.clone());

    let everyone = client.volunteers().all().await.unwrap();
    assert_eq!(everyone.len(), 10_637);
    assert_eq!(everyone.last().map(|v| v.id), Some(11_137));
    assert_eq!(transport.total(), 4);

    // Pages are memoized through the page fetcher.
    client.volunteers().all().await.unwrap();
    assert_eq!(transport.total(), 4);
}

#[tokio::test]
async fn test_concurrent_record_reads_share_one_request() {
    let transport = CountingTransport::new().with_delay(Duration::from_millis(30));
    transport.json("/api/v1/volunteers/7", json!({"id": 7, "full_name": "Zeven"}));
    let client = RosterClient::new(transport.clone());

    let (first, second) = (client.volunteers(), client.volunteers());
    let (a, b) = tokio::join!(first.get(7), second.get(7));
    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(transport.hits("/api/v1/volunteers/7"), 1);

    let cached = client.volunteers().get(7).await.unwrap().unwrap();
    assert_eq!(cached.name, "Zeven");
    assert_eq!(transport.hits("/api/v1/volunteers/7"), 1);
}

#[tokio::test]
async fn test_vacant_record_is_fetched_again_by_default() {
    let transport = CountingTransport::new();
    transport.respond("/api/v1/volunteers/8", StatusCode::OK, "null");
    let client = RosterClient::new(transport.clone());

    assert_eq!(client.volunteers().get(8).await.unwrap(), None);
    assert_eq!(client.volunteers().get(8).await.unwrap(), None);
    assert_eq!(transport.hits("/api/v1/volunteers/8"), 2);
}

#[tokio::test]
async fn test_entry_exists_policy_keeps_vacant_record() {
    let transport = CountingTransport::new();
    transport.respond("/api/v1/volunteers/8", StatusCode::OK, "");
    let client = RosterClient::builder(transport.clone())
        .policy(ClientPolicy {
            records: RecordHitPolicy::EntryExists,
            ..ClientPolicy::default()
        })
        .build();

    assert_eq!(client.volunteers().get(8).await.unwrap(), None);
    assert_eq!(client.volunteers().get(8).await.unwrap(), None);
    assert_eq!(transport.hits("/api/v1/volunteers/8"), 1);
}

#[tokio::test]
async fn test_clients_do_not_share_cache() {
    let transport = CountingTransport::new();
    transport.json(&page(0, 1), volunteers(1, 1));

    RosterClient::new(transport.clone())
        .volunteers()
        .list(0, 1)
        .await
        .unwrap();
    RosterClient::new(transport.clone())
        .volunteers()
        .list(0, 1)
        .await
        .unwrap();
    assert_eq!(transport.hits(&page(0, 1)), 2);
}

#[tokio::test]
async fn test_update_drops_memoized_record() {
    let transport = CountingTransport::new();
    transport.json("/api/v1/volunteers/3", json!({"id": 3, "phone": "01"}));
    let client = RosterClient::new(transport.clone());

    client.volunteers().get(3).await.unwrap();
    let update = VolunteerUpdate {
        phone: Some("02".to_owned()),
        ..Default::default()
    };
    // The scripted table answers PUT and GET alike for the same target.
    let updated = client.volunteers().update(3, &update).await.unwrap();
    assert_eq!(updated.id, 3);
    client.volunteers().get(3).await.unwrap();
    assert_eq!(transport.hits("/api/v1/volunteers/3"), 3);
}
