use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::{until_cancelled, Pinner};
use crate::client::{AddOptions, PinningClient};
use crate::error::RemotePinError;
use crate::node::{ContentResolver, Swarm};
use crate::pin::{PinRecord, PinStatus};

/// Parameters for pinning one object remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    /// Content paths as given by the caller; exactly one is accepted
    pub paths: Vec<String>,
    pub name: Option<String>,
    /// Return once the request is accepted instead of waiting for `pinned`
    pub background: bool,
}

impl AddRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            paths: vec![path.into()],
            name: None,
            background: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn wait(mut self) -> Self {
        self.background = false;
        self
    }

    /// The single target path.
    pub fn target(&self) -> Result<&str, RemotePinError> {
        match self.paths.as_slice() {
            [path] => Ok(path.as_str()),
            paths => Err(RemotePinError::InvalidArgument(format!(
                "expecting exactly one path to pin, got {}",
                paths.len()
            ))),
        }
    }
}

impl<C: PinningClient> Pinner<C> {
    /// Pin one object on the remote service.
    ///
    /// Delegates returned by the service are dialed through `swarm` on a
    /// best-effort basis. Unless the request runs in the background, this
    /// then waits until the service reports a terminal status or `cancel`
    /// fires.
    pub async fn add<P, S>(
        &self,
        request: &AddRequest,
        resolver: &P,
        swarm: &S,
        cancel: &CancellationToken,
    ) -> Result<PinRecord, RemotePinError>
    where
        P: ContentResolver + ?Sized,
        S: Swarm + ?Sized,
    {
        let path = request.target()?;

        async move {
            let cid = until_cancelled(cancel, "resolve path", path, async {
                resolver
                    .resolve(path)
                    .await
                    .map_err(|source| RemotePinError::PathResolution {
                        path: path.to_string(),
                        source,
                    })
            })
            .await?;

            let options = AddOptions {
                name: request.name.clone(),
            };
            let context = format!("cid {}", cid);
            let record = until_cancelled(cancel, "submit pin", context.clone(), async {
                self.client
                    .submit(cid, &options)
                    .await
                    .map_err(RemotePinError::remote("submit pin", context))
            })
            .await?;
            tracing::info!(
                request_id = %record.request_id,
                %cid,
                status = %record.status,
                "pin request submitted"
            );

            self.connect_delegates(&record, swarm, cancel).await?;

            if request.background {
                return Ok(record);
            }
            self.wait_for_pin(record, cancel).await
        }
        .instrument(self.span.clone())
        .await
    }

    /// Delegates are reachability hints, so a failed dial is only logged.
    /// Only cancellation stops the dialing early.
    async fn connect_delegates<S: Swarm + ?Sized>(
        &self,
        record: &PinRecord,
        swarm: &S,
        cancel: &CancellationToken,
    ) -> Result<(), RemotePinError> {
        for delegate in &record.delegates {
            let dial = until_cancelled(
                cancel,
                "connect to pin delegate",
                format!("request id {}", record.request_id),
                async { Ok(swarm.connect(delegate).await) },
            )
            .await?;
            match dial {
                Ok(()) => tracing::debug!(%delegate, "connected to pin delegate"),
                Err(e) => {
                    tracing::info!(%delegate, "error connecting to remote pin delegate: {:#}", e)
                }
            }
        }
        Ok(())
    }

    /// Poll until `record` reaches `pinned` or `failed`.
    ///
    /// There is no timeout of its own; the caller bounds the wait through
    /// `cancel`, which is observed during every status request and every
    /// pause between polls.
    pub async fn wait_for_pin(
        &self,
        record: PinRecord,
        cancel: &CancellationToken,
    ) -> Result<PinRecord, RemotePinError> {
        let request_id = record.request_id;
        let context = format!("request id {}", request_id);

        loop {
            let record = until_cancelled(cancel, "wait for pin", context.clone(), async {
                self.client
                    .get_status(&request_id)
                    .await
                    .map_err(RemotePinError::remote("query pin", context.clone()))
            })
            .await?;

            match record.status {
                PinStatus::Pinned => {
                    tracing::info!(%request_id, "pin complete");
                    return Ok(record);
                }
                PinStatus::Failed => {
                    return Err(RemotePinError::PinFailed {
                        request_id: request_id.clone(),
                        cid: record.cid,
                    })
                }
                status => tracing::debug!(%request_id, %status, "waiting for pin"),
            }

            until_cancelled(cancel, "wait for pin", context.clone(), async {
                tokio::time::sleep(self.poll_interval).await;
                Ok(())
            })
            .await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_requires_exactly_one_path() {
        let mut request = AddRequest::new("/ipfs/a");
        assert_eq!(request.target().unwrap(), "/ipfs/a");

        request.paths.push("/ipfs/b".to_string());
        assert!(matches!(
            request.target(),
            Err(RemotePinError::InvalidArgument(_))
        ));

        request.paths.clear();
        assert!(matches!(
            request.target(),
            Err(RemotePinError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_defaults_to_background() {
        let request = AddRequest::new("/ipfs/a");
        assert!(request.background);
        assert!(!request.wait().background);
    }
}
