use cid::Cid;

/// Failures surfaced by the registry and the pin orchestrators.
///
/// Collaborator failures (config store, content resolution, the remote
/// service) arrive as [`anyhow::Error`] and are wrapped with the context
/// needed to diagnose them without re-running the command.
#[derive(Debug, thiserror::Error)]
pub enum RemotePinError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("remote pinning service not configured: {0}")]
    NotConfigured(String),

    #[error("remote pinning service already present: {0}")]
    AlreadyExists(String),

    #[error("{operation} failed ({context}): {source}")]
    RemoteService {
        operation: &'static str,
        context: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("remote service failed to pin {cid} (request id {request_id})")]
    PinFailed { request_id: String, cid: Cid },

    #[error("{operation} interrupted ({context})")]
    Interrupted {
        operation: &'static str,
        context: String,
    },

    #[error("{matched} pins match ({filter}); removing more than one pin requires force")]
    RequiresForce { matched: usize, filter: String },

    #[error("cannot resolve {path}: {source}")]
    PathResolution {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("config store error: {0}")]
    Config(#[source] anyhow::Error),

    #[error("relaying pin records failed: {0}")]
    Relay(#[source] anyhow::Error),
}

impl RemotePinError {
    pub(crate) fn remote(
        operation: &'static str,
        context: impl Into<String>,
    ) -> impl FnOnce(anyhow::Error) -> Self {
        let context = context.into();
        move |source| RemotePinError::RemoteService {
            operation,
            context,
            source,
        }
    }
}
