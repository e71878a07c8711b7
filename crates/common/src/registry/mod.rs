//! Named registry of remote pinning services.
//!
//! Every operation opens the repository, reads the latest config, applies its
//! change and writes it back before returning. Nothing is cached between
//! calls, so edits made by other processes in the meantime are preserved.

mod store;

pub use store::{ConfigHandle, ConfigRepo, RemotePinConfig, RemotePinServices, ServiceCredential};

use url::Url;

use crate::error::RemotePinError;

/// What a caller needs to build a client for a service.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub url: Url,
    pub key: String,
}

impl std::fmt::Debug for ServiceEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceEndpoint")
            .field("url", &self.url.as_str())
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Listing entry; the key is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    pub name: String,
    pub url: Url,
}

#[derive(Debug, Clone)]
pub struct ServiceRegistry<R> {
    repo: R,
}

impl<R: ConfigRepo> ServiceRegistry<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Register a new service. Names are case-sensitive and must be unique.
    pub fn add_service(&self, name: &str, url: &str, key: &str) -> Result<(), RemotePinError> {
        if name.is_empty() {
            return Err(RemotePinError::InvalidArgument(
                "service name not given".to_string(),
            ));
        }
        if key.is_empty() {
            return Err(RemotePinError::InvalidArgument(
                "service key not given".to_string(),
            ));
        }
        let url = parse_service_url(url)?;

        let mut handle = self.repo.open().map_err(RemotePinError::Config)?;
        let mut config = handle.read_config().map_err(RemotePinError::Config)?;

        let services = &mut config.remote_pin_services_mut().services;
        if services.contains_key(name) {
            return Err(RemotePinError::AlreadyExists(name.to_string()));
        }
        services.insert(
            name.to_string(),
            ServiceCredential {
                name: name.to_string(),
                url,
                key: key.to_string(),
            },
        );

        handle.write_config(&config).map_err(RemotePinError::Config)?;
        tracing::info!(service = name, "registered remote pinning service");
        Ok(())
    }

    /// Forget a service. Removing a name that is not registered is fine; the
    /// config is written back either way.
    pub fn remove_service(&self, name: &str) -> Result<(), RemotePinError> {
        let mut handle = self.repo.open().map_err(RemotePinError::Config)?;
        let mut config = handle.read_config().map_err(RemotePinError::Config)?;

        let removed = config
            .remote_pin_services_mut()
            .services
            .remove(name)
            .is_some();

        handle.write_config(&config).map_err(RemotePinError::Config)?;
        tracing::info!(service = name, removed, "removed remote pinning service");
        Ok(())
    }

    /// All services, sorted by name.
    pub fn list_services(&self) -> Result<Vec<ServiceSummary>, RemotePinError> {
        let handle = self.repo.open().map_err(RemotePinError::Config)?;
        let config = handle.read_config().map_err(RemotePinError::Config)?;

        // BTreeMap iteration is already byte-wise ordered by key
        Ok(config
            .remote_pin_services()
            .services
            .iter()
            .map(|(name, service)| ServiceSummary {
                name: name.clone(),
                url: service.url.clone(),
            })
            .collect())
    }

    /// Look up the endpoint for `name`.
    pub fn resolve_service(&self, name: &str) -> Result<ServiceEndpoint, RemotePinError> {
        if name.is_empty() {
            return Err(RemotePinError::NotConfigured(
                "remote pinning service name not specified".to_string(),
            ));
        }

        let handle = self.repo.open().map_err(RemotePinError::Config)?;
        let config = handle.read_config().map_err(RemotePinError::Config)?;

        config
            .remote_pin_services()
            .services
            .get(name)
            .map(|service| ServiceEndpoint {
                url: service.url.clone(),
                key: service.key.clone(),
            })
            .ok_or_else(|| RemotePinError::NotConfigured(format!("service {} not known", name)))
    }
}

fn parse_service_url(raw: &str) -> Result<Url, RemotePinError> {
    let url = Url::parse(raw).map_err(|e| {
        RemotePinError::InvalidArgument(format!("service url {} cannot be parsed ({})", raw, e))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(RemotePinError::InvalidArgument(format!(
            "service url {} must use http or https, not {}",
            raw, scheme
        ))),
    }
}
