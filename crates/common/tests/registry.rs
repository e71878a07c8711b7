//! Integration tests for the service registry

mod common;

use ::common::prelude::*;
use ::common::testkit::{MemoryConfig, MemoryRepo, MockPinningService};

#[test]
fn test_round_trip() {
    let registry = ServiceRegistry::new(MemoryRepo::new());
    registry
        .add_service("web3", "https://api.web3.storage", "k-123")
        .unwrap();

    let endpoint = registry.resolve_service("web3").unwrap();
    assert_eq!(endpoint.url.as_str(), "https://api.web3.storage/");
    assert_eq!(endpoint.key, "k-123");
}

#[test]
fn test_duplicate_add_leaves_entry_untouched() {
    let repo = MemoryRepo::new();
    let registry = ServiceRegistry::new(repo.clone());
    registry
        .add_service("svc", "https://one.example.com", "first")
        .unwrap();

    let err = registry
        .add_service("svc", "https://two.example.com", "second")
        .unwrap_err();
    assert!(matches!(err, RemotePinError::AlreadyExists(name) if name == "svc"));

    let endpoint = registry.resolve_service("svc").unwrap();
    assert_eq!(endpoint.url.as_str(), "https://one.example.com/");
    assert_eq!(endpoint.key, "first");
    assert_eq!(repo.writes(), 1);
}

#[test]
fn test_names_are_case_sensitive() {
    let registry = ServiceRegistry::new(MemoryRepo::new());
    registry.add_service("svc", "https://a.example.com", "k").unwrap();
    registry.add_service("SVC", "https://b.example.com", "k").unwrap();
    assert_eq!(registry.list_services().unwrap().len(), 2);
}

#[test]
fn test_remove_is_idempotent() {
    let repo = MemoryRepo::new();
    let registry = ServiceRegistry::new(repo.clone());
    registry.add_service("svc", "https://example.com", "k").unwrap();

    registry.remove_service("svc").unwrap();
    registry.remove_service("svc").unwrap();
    registry.remove_service("never-added").unwrap();

    assert!(matches!(
        registry.resolve_service("svc"),
        Err(RemotePinError::NotConfigured(_))
    ));
    // add + three removes, each persisted
    assert_eq!(repo.writes(), 4);
}

#[test]
fn test_list_is_sorted_and_hides_keys() {
    let registry = ServiceRegistry::new(MemoryRepo::new());
    for name in ["b", "a", "c", "B"] {
        registry
            .add_service(name, &format!("https://{}.example.com", name.to_lowercase()), "secret")
            .unwrap();
    }

    let services = registry.list_services().unwrap();
    let names: Vec<_> = services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["B", "a", "b", "c"]);
    assert!(!format!("{services:?}").contains("secret"));
}

#[test]
fn test_every_operation_rereads_the_store() {
    let repo = MemoryRepo::new();
    let registry = ServiceRegistry::new(repo.clone());
    registry.add_service("mine", "https://mine.example.com", "k").unwrap();

    // another process rewrites the config between our calls
    let mut external = repo.config();
    external.remote_pin_services.services.insert(
        "theirs".to_string(),
        ServiceCredential {
            name: "theirs".to_string(),
            url: "https://theirs.example.com".parse().unwrap(),
            key: "k2".to_string(),
        },
    );
    repo.set_config(external);

    registry.add_service("later", "https://later.example.com", "k3").unwrap();

    let names: Vec<_> = registry
        .list_services()
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["later", "mine", "theirs"]);
}

#[test]
fn test_unknown_service_is_not_configured() {
    let repo = MemoryRepo::new();
    repo.set_config(MemoryConfig::default());
    let registry = ServiceRegistry::new(repo);

    let err = registry.resolve_service("ghost").unwrap_err();
    assert!(matches!(err, RemotePinError::NotConfigured(msg) if msg.contains("ghost")));
}

#[test]
fn test_connect_builds_client_for_registered_service() {
    let registry = common::registry_with_service();
    let connector = common::MockConnector(MockPinningService::new());

    let pinner = Pinner::connect(&registry, &connector, common::SERVICE).unwrap();
    assert_eq!(pinner.service(), common::SERVICE);
    assert_eq!(pinner.poll_interval(), DEFAULT_POLL_INTERVAL);
}

#[test]
fn test_connect_without_service_name() {
    let registry = common::registry_with_service();
    let connector = common::MockConnector(MockPinningService::new());

    for name in ["", "elsewhere"] {
        let err = Pinner::connect(&registry, &connector, name).unwrap_err();
        assert!(matches!(err, RemotePinError::NotConfigured(_)));
    }
}
