use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::{until_cancelled, Pinner};
use crate::client::PinningClient;
use crate::error::RemotePinError;
use crate::pin::FilterSet;

/// Which pins to remove.
///
/// Either explicit request ids, or a filter whose matches are removed. A
/// filter matching more than one pin only goes through with `force`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveRequest {
    pub request_ids: Vec<String>,
    pub filter: FilterSet,
    pub force: bool,
}

impl RemoveRequest {
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            request_ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn matching(filter: FilterSet) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl<C: PinningClient> Pinner<C> {
    /// Remove pins, stopping at the first failed delete or at cancellation.
    ///
    /// Returns the request ids that were deleted, in deletion order.
    pub async fn remove(
        &self,
        request: &RemoveRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, RemotePinError> {
        if !request.request_ids.is_empty() && !request.filter.is_empty() {
            return Err(RemotePinError::InvalidArgument(
                "request ids and filters cannot be combined".to_string(),
            ));
        }

        let targets = if request.request_ids.is_empty() {
            let ids = self.list_ids(&request.filter, cancel).await?;
            if ids.len() > 1 && !request.force {
                return Err(RemotePinError::RequiresForce {
                    matched: ids.len(),
                    filter: request.filter.to_string(),
                });
            }
            ids
        } else {
            request.request_ids.clone()
        };

        async move {
            let mut removed = Vec::with_capacity(targets.len());
            for request_id in targets {
                let context = format!("request id {}", request_id);
                until_cancelled(cancel, "remove pin", context.clone(), async {
                    self.client
                        .delete(&request_id)
                        .await
                        .map_err(RemotePinError::remote("remove pin", context))
                })
                .await?;
                tracing::info!(%request_id, "removed pin");
                removed.push(request_id);
            }
            Ok(removed)
        }
        .instrument(self.span.clone())
        .await
    }
}
