use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use cid::Cid;
use parking_lot::Mutex;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::client::{AddOptions, PinningClient};
use crate::pin::{pin_stream, FilterSet, PinRecord, PinStatus, PinStream, DEFAULT_STREAM_CAPACITY};

/// How often each endpoint was hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockCalls {
    pub submitted: usize,
    pub status_checks: usize,
    pub listings: usize,
    /// Successful and failed delete attempts, in order
    pub delete_attempts: Vec<String>,
}

#[derive(Debug, Default)]
struct State {
    pins: Vec<PinRecord>,
    delegates: Vec<String>,
    next_script: Option<VecDeque<PinStatus>>,
    scripts: HashMap<String, VecDeque<PinStatus>>,
    failing_deletes: HashSet<String>,
    listing_error: Option<(usize, String)>,
    failing_submit: Option<String>,
    stalled: bool,
    calls: MockCalls,
}

/// In-memory pinning service.
///
/// Submitted pins start out `queued`. A status script installed with
/// [`MockPinningService::script_statuses`] is attached to the next submitted
/// pin and replayed one step per status check, the last step repeating.
///
/// After [`MockPinningService::stall`] every request hangs, the way a service
/// that stopped answering would.
#[derive(Debug, Clone, Default)]
pub struct MockPinningService {
    state: Arc<Mutex<State>>,
}

impl MockPinningService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delegates handed out with every new pin.
    pub fn with_delegates<I, S>(self, delegates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.lock().delegates = delegates.into_iter().map(Into::into).collect();
        self
    }

    pub fn script_statuses(&self, statuses: impl IntoIterator<Item = PinStatus>) {
        self.state.lock().next_script = Some(statuses.into_iter().collect());
    }

    /// Seed an existing pin, returning its request id.
    pub fn insert_pin(&self, name: Option<&str>, cid: Cid, status: PinStatus) -> String {
        let request_id = Uuid::new_v4().to_string();
        let mut record = PinRecord::new(request_id.clone(), cid, status);
        record.name = name.map(str::to_string);
        record.created = Some(OffsetDateTime::now_utc());
        self.state.lock().pins.push(record);
        request_id
    }

    pub fn fail_delete_of(&self, request_id: impl Into<String>) {
        self.state.lock().failing_deletes.insert(request_id.into());
    }

    pub fn fail_submit_with(&self, message: impl Into<String>) {
        self.state.lock().failing_submit = Some(message.into());
    }

    /// Listings emit `after` matching records, then fail with `message`.
    pub fn fail_listing_after(&self, after: usize, message: impl Into<String>) {
        self.state.lock().listing_error = Some((after, message.into()));
    }

    /// Hang every later request. Listings still deliver their records, then
    /// never report completion.
    pub fn stall(&self) {
        self.state.lock().stalled = true;
    }

    async fn stall_point(&self) {
        let stalled = self.state.lock().stalled;
        if stalled {
            std::future::pending::<()>().await;
        }
    }

    pub fn pins(&self) -> Vec<PinRecord> {
        self.state.lock().pins.clone()
    }

    pub fn calls(&self) -> MockCalls {
        self.state.lock().calls.clone()
    }
}

#[async_trait]
impl PinningClient for MockPinningService {
    async fn submit(&self, cid: Cid, options: &AddOptions) -> anyhow::Result<PinRecord> {
        self.stall_point().await;
        let mut state = self.state.lock();
        state.calls.submitted += 1;
        if let Some(message) = &state.failing_submit {
            return Err(anyhow!("{}", message));
        }

        let request_id = Uuid::new_v4().to_string();
        let mut record = PinRecord::new(request_id.clone(), cid, PinStatus::Queued)
            .with_delegates(state.delegates.clone());
        record.name = options.name.clone();
        record.created = Some(OffsetDateTime::now_utc());

        if let Some(script) = state.next_script.take() {
            state.scripts.insert(request_id, script);
        }
        state.pins.push(record.clone());
        Ok(record)
    }

    async fn get_status(&self, request_id: &str) -> anyhow::Result<PinRecord> {
        self.stall_point().await;
        let mut state = self.state.lock();
        state.calls.status_checks += 1;

        let next = state.scripts.get_mut(request_id).and_then(|script| {
            if script.len() > 1 {
                script.pop_front()
            } else {
                script.front().copied()
            }
        });

        let record = state
            .pins
            .iter_mut()
            .find(|pin| pin.request_id == request_id)
            .ok_or_else(|| anyhow!("pin request {} not found", request_id))?;
        if let Some(status) = next {
            record.status = status;
        }
        Ok(record.clone())
    }

    async fn delete(&self, request_id: &str) -> anyhow::Result<()> {
        self.stall_point().await;
        let mut state = self.state.lock();
        state.calls.delete_attempts.push(request_id.to_string());
        if state.failing_deletes.contains(request_id) {
            return Err(anyhow!("service refused to delete {}", request_id));
        }

        let before = state.pins.len();
        state.pins.retain(|pin| pin.request_id != request_id);
        if state.pins.len() == before {
            return Err(anyhow!("pin request {} not found", request_id));
        }
        Ok(())
    }

    fn list(&self, filter: &FilterSet) -> PinStream {
        let (matching, error, stalled) = {
            let mut state = self.state.lock();
            state.calls.listings += 1;
            let matching: Vec<PinRecord> = state
                .pins
                .iter()
                .filter(|pin| filter.matches(pin.name.as_deref(), &pin.cid, pin.status))
                .cloned()
                .collect();
            (matching, state.listing_error.clone(), state.stalled)
        };

        let (tx, stream) = pin_stream(DEFAULT_STREAM_CAPACITY);
        tokio::spawn(async move {
            let limit = error.as_ref().map(|(after, _)| *after).unwrap_or(usize::MAX);
            for record in matching.into_iter().take(limit) {
                if !tx.send(record).await {
                    break;
                }
            }
            if stalled {
                std::future::pending::<()>().await;
            }
            let result = match error {
                Some((_, message)) => Err(anyhow!("{}", message)),
                None => Ok(()),
            };
            tx.finish(result);
        });
        stream
    }
}
