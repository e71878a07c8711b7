use common::prelude::*;
use remote_pin::{AppConfig, AppState, FsRepo, StateError};
use url::Url;

#[test]
fn test_init_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rpin");

    let config = AppConfig {
        node_api: Url::parse("http://10.0.0.2:5001").unwrap(),
        ..AppConfig::default()
    };
    let state = AppState::init(Some(path.clone()), Some(config.clone())).unwrap();
    assert!(state.config_path.exists());

    let loaded = AppState::load(Some(path.clone())).unwrap();
    assert_eq!(loaded.config, config);

    assert!(matches!(
        AppState::init(Some(path), None),
        Err(StateError::AlreadyInitialized)
    ));
}

#[test]
fn test_load_requires_init() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        AppState::load(Some(dir.path().to_path_buf())),
        Err(StateError::NotInitialized)
    ));
}

#[test]
fn test_registry_persists_to_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::init(Some(dir.path().to_path_buf()), None).unwrap();
    let registry = ServiceRegistry::new(state.repo());

    registry
        .add_service("pinata", "https://api.pinata.cloud/psa", "secret")
        .unwrap();
    registry
        .add_service("estuary", "https://api.estuary.tech", "other")
        .unwrap();
    assert!(matches!(
        registry.add_service("pinata", "https://elsewhere.example.com", "k"),
        Err(RemotePinError::AlreadyExists(_))
    ));

    // a second registry over the same directory sees the same services
    let reopened = ServiceRegistry::new(FsRepo::new(dir.path().to_path_buf()));
    let names: Vec<_> = reopened
        .list_services()
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["estuary", "pinata"]);

    let endpoint = reopened.resolve_service("pinata").unwrap();
    assert_eq!(endpoint.url.as_str(), "https://api.pinata.cloud/psa");
    assert_eq!(endpoint.key, "secret");

    let text = std::fs::read_to_string(&state.config_path).unwrap();
    assert!(text.contains("[remote_pin_services.services.pinata]"));

    reopened.remove_service("pinata").unwrap();
    reopened.remove_service("pinata").unwrap();
    assert!(matches!(
        registry.resolve_service("pinata"),
        Err(RemotePinError::NotConfigured(_))
    ));
}

#[test]
fn test_registry_without_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let registry = ServiceRegistry::new(FsRepo::new(dir.path().to_path_buf()));

    let err = registry.list_services().unwrap_err();
    assert!(matches!(err, RemotePinError::Config(_)));
    assert!(err.to_string().contains("rpin init"));
}
