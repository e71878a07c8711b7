use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use url::Url;

use common::pin::DEFAULT_STREAM_CAPACITY;
use common::prelude::{
    pin_stream, AddOptions, Cid, Connector, FilterSet, PinRecord, PinStream, PinStreamSender,
    PinningClient, ServiceEndpoint,
};

use super::pins::{
    AddPinRequest, DeletePinRequest, GetPinRequest, ListPinsRequest, MAX_PAGE_SIZE,
};
use crate::api::{self, ApiError};

/// HTTP client for one IPFS Pinning Service API endpoint.
#[derive(Debug, Clone)]
pub struct PinningServiceClient {
    pub remote: Url,
    client: Client,
    page_size: u32,
}

impl PinningServiceClient {
    pub fn new(remote: &Url, key: &str) -> Result<Self, ApiError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", key))?;
        auth.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(AUTHORIZATION, auth);
        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            remote: remote.clone(),
            client,
            page_size: MAX_PAGE_SIZE,
        })
    }

    /// Results requested per listing page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.remote
    }
}

#[async_trait]
impl PinningClient for PinningServiceClient {
    async fn submit(&self, cid: Cid, options: &AddOptions) -> anyhow::Result<PinRecord> {
        let request = AddPinRequest {
            cid: cid.to_string(),
            name: options.name.clone(),
        };
        let response = api::call(&self.remote, &self.client, request).await?;
        Ok(response.try_into()?)
    }

    async fn get_status(&self, request_id: &str) -> anyhow::Result<PinRecord> {
        let request = GetPinRequest {
            request_id: request_id.to_string(),
        };
        let response = api::call(&self.remote, &self.client, request).await?;
        Ok(response.try_into()?)
    }

    async fn delete(&self, request_id: &str) -> anyhow::Result<()> {
        let request = DeletePinRequest {
            request_id: request_id.to_string(),
        };
        api::execute(&self.remote, &self.client, request).await?;
        Ok(())
    }

    fn list(&self, filter: &FilterSet) -> PinStream {
        let (tx, stream) = pin_stream(DEFAULT_STREAM_CAPACITY);
        let first_page = ListPinsRequest::from_filter(filter, self.page_size);
        let remote = self.remote.clone();
        let client = self.client.clone();

        tokio::spawn(async move {
            let result = page_through(&remote, &client, first_page, &tx).await;
            if let Err(e) = &result {
                tracing::debug!("pin listing stopped: {}", e);
            }
            tx.finish(result.map_err(Into::into));
        });

        stream
    }
}

/// Walk the listing newest to oldest, paging on the `created` time of the last
/// result seen. `count` is the number of pins the current query matches, so a
/// page holding `count` results (or none) is the last one. Stops early once
/// the consumer goes away.
async fn page_through(
    remote: &Url,
    client: &Client,
    first_page: ListPinsRequest,
    tx: &PinStreamSender,
) -> Result<(), ApiError> {
    let mut page = first_page;

    loop {
        let results = api::call(remote, client, page.clone()).await?;
        let page_len = results.results.len();
        tracing::trace!(count = results.count, page_len, "fetched pin listing page");
        if page_len == 0 {
            return Ok(());
        }

        let mut oldest = None;
        for response in results.results {
            let record = PinRecord::try_from(response)?;
            oldest = record.created;
            if !tx.send(record).await {
                return Ok(());
            }
        }

        if page_len as u64 >= results.count {
            return Ok(());
        }
        match oldest {
            Some(before) => page = page.before(before),
            None => {
                return Err(ApiError::InvalidResponse(
                    "listing page ended without a created time to continue from".to_string(),
                ))
            }
        }
    }
}

/// Builds [`PinningServiceClient`]s from registered service endpoints.
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
    page_size: Option<u32>,
}

impl HttpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

impl Connector for HttpConnector {
    type Client = PinningServiceClient;

    fn connect(&self, endpoint: &ServiceEndpoint) -> anyhow::Result<PinningServiceClient> {
        let client = PinningServiceClient::new(&endpoint.url, &endpoint.key)?;
        Ok(match self.page_size {
            Some(page_size) => client.with_page_size(page_size),
            None => client,
        })
    }
}
