//! Orchestration of remote pin commands against one configured service.
//!
//! A [`Pinner`] wraps a [`PinningClient`] together with the tracing span that
//! scopes every log line it emits to the invocation that created it. Every
//! operation takes a [`CancellationToken`] that is raced against each call
//! to a collaborator.

mod add;
mod list;
mod remove;

pub use add::AddRequest;
pub use remove::RemoveRequest;

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::Span;

use crate::client::{Connector, PinningClient};
use crate::error::RemotePinError;
use crate::registry::{ConfigRepo, ServiceRegistry};

/// Default cadence for status polling while waiting on a pin.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Pinner<C> {
    service: String,
    client: C,
    span: Span,
    poll_interval: Duration,
}

impl<C: PinningClient> Pinner<C> {
    pub fn new(service: impl Into<String>, client: C) -> Self {
        let service = service.into();
        let span = tracing::info_span!("remote_pin", service = %service);
        Self {
            service,
            client,
            span,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Resolve `service` in the registry and build a client for it.
    pub fn connect<R, K>(
        registry: &ServiceRegistry<R>,
        connector: &K,
        service: &str,
    ) -> Result<Self, RemotePinError>
    where
        R: ConfigRepo,
        K: Connector<Client = C>,
    {
        let endpoint = registry.resolve_service(service)?;
        let client = connector
            .connect(&endpoint)
            .map_err(RemotePinError::remote("connect", service))?;
        Ok(Self::new(service, client))
    }

    /// Log under `span` instead of the default per-invocation span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

/// Run `work` unless `cancel` fires first.
async fn until_cancelled<T, F>(
    cancel: &CancellationToken,
    operation: &'static str,
    context: impl Into<String>,
    work: F,
) -> Result<T, RemotePinError>
where
    F: Future<Output = Result<T, RemotePinError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(RemotePinError::Interrupted {
            operation,
            context: context.into(),
        }),
        result = work => result,
    }
}
