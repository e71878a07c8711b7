//! Wire types and requests of the IPFS Pinning Service API.

use std::collections::BTreeMap;

use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use common::prelude::{Cid, FilterSet, PinRecord, PinStatus};

use crate::api::{endpoint, ApiError, ApiRequest};

/// Largest page the API allows a listing to ask for.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// The object being pinned, as the service echoes it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub cid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, String>>,
}

/// `PinStatus` object: one pin request and where it stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinStatusResponse {
    pub requestid: String,
    pub status: PinStatus,
    pub created: String,
    pub pin: Pin,
    #[serde(default)]
    pub delegates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<BTreeMap<String, String>>,
}

impl PinStatusResponse {
    pub fn created_at(&self) -> Result<OffsetDateTime, ApiError> {
        OffsetDateTime::parse(&self.created, &Rfc3339).map_err(|e| {
            ApiError::InvalidResponse(format!(
                "pin request {} has malformed created time {:?}: {}",
                self.requestid, self.created, e
            ))
        })
    }
}

impl TryFrom<PinStatusResponse> for PinRecord {
    type Error = ApiError;

    fn try_from(response: PinStatusResponse) -> Result<Self, Self::Error> {
        let cid: Cid = response.pin.cid.parse().map_err(|e| {
            ApiError::InvalidResponse(format!(
                "pin request {} names invalid CID {}: {}",
                response.requestid, response.pin.cid, e
            ))
        })?;
        let created = response.created_at()?;

        Ok(PinRecord {
            request_id: response.requestid,
            name: response.pin.name,
            cid,
            status: response.status,
            delegates: response.delegates,
            created: Some(created),
        })
    }
}

/// `PinResults` object: one page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinResults {
    pub count: u64,
    pub results: Vec<PinStatusResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddPinRequest {
    pub cid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ApiRequest for AddPinRequest {
    type Response = PinStatusResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client.post(endpoint(base_url, &["pins"])).json(&self)
    }
}

#[derive(Debug, Clone)]
pub struct GetPinRequest {
    pub request_id: String,
}

impl ApiRequest for GetPinRequest {
    type Response = PinStatusResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client.get(endpoint(base_url, &["pins", &self.request_id]))
    }
}

/// Answered with `202 Accepted` and no body.
#[derive(Debug, Clone)]
pub struct DeletePinRequest {
    pub request_id: String,
}

impl ApiRequest for DeletePinRequest {
    type Response = ();

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client.delete(endpoint(base_url, &["pins", &self.request_id]))
    }
}

/// One page of `GET /pins`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPinsRequest {
    pub cids: Vec<String>,
    pub name: Option<String>,
    pub statuses: Vec<PinStatus>,
    pub limit: u32,
    /// Only pins created strictly before this time
    pub before: Option<OffsetDateTime>,
}

impl ListPinsRequest {
    pub fn from_filter(filter: &FilterSet, limit: u32) -> Self {
        Self {
            cids: filter.cids.iter().map(Cid::to_string).collect(),
            name: filter.name.clone(),
            statuses: filter.statuses.clone(),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            before: None,
        }
    }

    pub fn before(mut self, before: OffsetDateTime) -> Self {
        self.before = Some(before);
        self
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if !self.cids.is_empty() {
            query.push(("cid", self.cids.join(",")));
        }
        if let Some(name) = &self.name {
            query.push(("name", name.clone()));
            query.push(("match", "exact".to_string()));
        }
        if !self.statuses.is_empty() {
            let statuses: Vec<_> = self.statuses.iter().map(PinStatus::as_str).collect();
            query.push(("status", statuses.join(",")));
        }
        if let Some(before) = self.before {
            // Rfc3339 formatting only fails for years outside 0..=9999
            if let Ok(before) = before.format(&Rfc3339) {
                query.push(("before", before));
            }
        }
        query.push(("limit", self.limit.to_string()));
        query
    }
}

impl ApiRequest for ListPinsRequest {
    type Response = PinResults;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client.get(endpoint(base_url, &["pins"])).query(&self.query())
    }
}
