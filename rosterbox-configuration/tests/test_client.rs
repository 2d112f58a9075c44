use std::time::Duration;

use pretty_assertions::assert_eq;
use rosterbox::{EndpointCandidates, RecordHitPolicy, Transport};
use rosterbox_configuration::{ConfigClient, ConfigError, DEFAULT_BASE_URL, TransportKind};

#[test]
fn test_empty_document_uses_defaults() {
    let config = ConfigClient::from_yaml("{}").expect("failed to deserialize");

    assert_eq!(config, ConfigClient::default());
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.transport, TransportKind::Http);
    assert_eq!(config.request_timeout, None);
    assert_eq!(config.paging.bulk_limit, 10_000);
    assert_eq!(config.paging.page_size, 500);
    assert!(config.slots.enabled);
    assert_eq!(config.slots.endpoints, EndpointCandidates::default());
    assert_eq!(config.records.hit_policy, RecordHitPolicy::SkipVacant);
}

#[test]
fn test_full_document() {
    let yaml = r#"
base_url: "https://roster.example.org"
transport: Memory
request_timeout: 1m 30s
paging:
  bulk_limit: 2000
  page_size: 250
slots:
  enabled: false
  endpoints:
    - "/api/v2/volunteers/{id}/slots"
records:
  hit_policy: EntryExists
"#;

    let config = ConfigClient::from_yaml(yaml).expect("failed to deserialize");

    assert_eq!(config.base_url, "https://roster.example.org");
    assert_eq!(config.transport, TransportKind::Memory);
    assert_eq!(config.request_timeout, Some(Duration::from_secs(90)));
    assert_eq!(config.paging.bulk_limit, 2000);
    assert_eq!(config.paging.page_size, 250);
    assert!(!config.slots.enabled);
    assert_eq!(
        config.slots.endpoints.templates(),
        ["/api/v2/volunteers/{id}/slots".to_owned()]
    );

    let policy = config.policy();
    assert_eq!(policy.records, RecordHitPolicy::EntryExists);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_paging_keeps_other_default() {
    let yaml = r#"
paging:
  page_size: 100
"#;

    let config = ConfigClient::from_yaml(yaml).expect("failed to deserialize");
    assert_eq!(config.paging.bulk_limit, 10_000);
    assert_eq!(config.paging.page_size, 100);
}

#[test]
fn test_base_url_override() {
    let config = ConfigClient::default();

    let unchanged = config.clone().override_base_url(None);
    assert_eq!(unchanged.base_url, DEFAULT_BASE_URL);

    let blank = config.clone().override_base_url(Some("  ".to_owned()));
    assert_eq!(blank.base_url, DEFAULT_BASE_URL);

    let replaced = config.override_base_url(Some("http://backend:9000".to_owned()));
    assert_eq!(replaced.base_url, "http://backend:9000");
}

#[test]
fn test_unknown_transport_is_rejected() {
    let err = ConfigClient::from_yaml("transport: Carrier").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_zero_page_size_is_rejected() {
    let config = ConfigClient::from_yaml("paging:\n  page_size: 0\n").expect("failed to deserialize");
    let err = config.into_client().unwrap_err();
    assert!(matches!(err, ConfigError::ZeroPageSize { field: "page_size" }));
}

#[test]
fn test_bad_base_url_is_rejected() {
    let config = ConfigClient::default().override_base_url(Some("localhost without scheme".to_owned()));
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::BaseUrl { .. }));
}

#[test]
fn test_template_without_placeholder_is_rejected() {
    let yaml = r#"
slots:
  endpoints:
    - "/api/slots"
"#;

    let config = ConfigClient::from_yaml(yaml).expect("failed to deserialize");
    let err = config.validate().unwrap_err();
    match err {
        ConfigError::MissingPlaceholder(template) => assert_eq!(template, "/api/slots"),
        other => panic!("expected missing placeholder, got {other:?}"),
    }
}

#[tokio::test]
async fn test_memory_client_from_config() {
    let yaml = r#"
transport: Memory
records:
  hit_policy: EntryExists
"#;

    let client = ConfigClient::from_yaml(yaml)
        .expect("failed to deserialize")
        .into_client()
        .expect("failed to build client");

    assert_eq!(client.transport().name(), "memory");
    assert_eq!(client.policy().records, RecordHitPolicy::EntryExists);

    let volunteers = client.volunteers().all().await.unwrap();
    assert!(volunteers.is_empty());
}

#[test]
fn test_http_client_from_config() {
    let yaml = r#"
base_url: "http://127.0.0.1:8000"
request_timeout: 5s
"#;

    let client = ConfigClient::from_yaml(yaml)
        .expect("failed to deserialize")
        .into_client()
        .expect("failed to build client");

    assert_eq!(client.transport().name(), "reqwest");
    assert!(!client.session().is_authenticated());
}
