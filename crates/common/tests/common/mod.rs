//! Shared test utilities for orchestrator integration tests
#![allow(dead_code)]

use std::time::Duration;

use common::prelude::*;
use common::testkit::{MemoryRepo, MockPinningService, RecordingSwarm, StaticResolver};

pub const SERVICE: &str = "mock";

/// A pinner over a fresh mock service, polling fast enough that paused-clock
/// tests don't care about the interval.
pub fn setup_pinner() -> (Pinner<MockPinningService>, MockPinningService) {
    let service = MockPinningService::new();
    let pinner = Pinner::new(SERVICE, service.clone()).with_poll_interval(Duration::from_millis(500));
    (pinner, service)
}

/// Cancel `cancel` once `after` has elapsed on the tokio clock.
pub fn cancel_after(cancel: &CancellationToken, after: Duration) {
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        trigger.cancel();
    });
}

pub fn node() -> (StaticResolver, RecordingSwarm) {
    (StaticResolver::new(), RecordingSwarm::new())
}

/// Connector that hands out clones of one mock service.
pub struct MockConnector(pub MockPinningService);

impl Connector for MockConnector {
    type Client = MockPinningService;

    fn connect(&self, _endpoint: &ServiceEndpoint) -> anyhow::Result<MockPinningService> {
        Ok(self.0.clone())
    }
}

pub fn registry_with_service() -> ServiceRegistry<MemoryRepo> {
    let registry = ServiceRegistry::new(MemoryRepo::new());
    registry
        .add_service(SERVICE, "https://pins.example.com/api/v1", "secret")
        .unwrap();
    registry
}
