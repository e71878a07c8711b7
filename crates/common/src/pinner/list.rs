use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::{until_cancelled, Pinner};
use crate::client::PinningClient;
use crate::error::RemotePinError;
use crate::pin::{FilterSet, PinRecord};

impl<C: PinningClient> Pinner<C> {
    /// Stream every pin matching `filter` to `relay`, in the order the
    /// service produces them.
    ///
    /// Success is only reported after the listing's terminal result has been
    /// received, even when the item stream already closed. A failing `relay`
    /// stops the listing and closes the item channel. Returns the number of
    /// records relayed.
    pub async fn list<F>(
        &self,
        filter: &FilterSet,
        cancel: &CancellationToken,
        mut relay: F,
    ) -> Result<usize, RemotePinError>
    where
        F: FnMut(PinRecord) -> anyhow::Result<()>,
    {
        async move {
            let context = filter.to_string();
            let mut stream = self.client.list(filter);
            let mut relayed = 0;

            loop {
                let next = until_cancelled(cancel, "list pins", context.as_str(), async {
                    Ok(stream.next().await)
                })
                .await?;
                let Some(record) = next else {
                    break;
                };

                tracing::trace!(request_id = %record.request_id, status = %record.status, "listed pin");
                if let Err(e) = relay(record) {
                    let outcome = until_cancelled(cancel, "list pins", context.as_str(), async {
                        stream
                            .finish()
                            .await
                            .map_err(RemotePinError::remote("list pins", context.as_str()))
                    })
                    .await;
                    if let Err(listing) = outcome {
                        tracing::debug!("listing stopped after relay failure: {}", listing);
                    }
                    return Err(RemotePinError::Relay(e));
                }
                relayed += 1;
            }

            until_cancelled(cancel, "list pins", context.as_str(), async {
                stream
                    .finish()
                    .await
                    .map_err(RemotePinError::remote("list pins", context.as_str()))
            })
            .await?;
            tracing::debug!(relayed, %filter, "pin listing complete");
            Ok(relayed)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Request ids of every pin matching `filter`.
    pub async fn list_ids(
        &self,
        filter: &FilterSet,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, RemotePinError> {
        let mut ids = Vec::new();
        self.list(filter, cancel, |record| {
            ids.push(record.request_id);
            Ok(())
        })
        .await?;
        Ok(ids)
    }
}
