use std::fmt;

use cid::Cid;

use super::PinStatus;
use crate::error::RemotePinError;

/// Criteria for listing (or bulk-removing) pins on a remote service.
///
/// Empty collections mean "no constraint". Every criterion is validated up
/// front so a malformed filter never reaches the network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Exact, case-sensitive match on the pin name
    pub name: Option<String>,
    pub cids: Vec<Cid>,
    pub statuses: Vec<PinStatus>,
}

impl FilterSet {
    /// Build a filter from raw caller input.
    ///
    /// Fails with [`RemotePinError::InvalidArgument`] on the first CID that
    /// does not parse or the first status token that is not a known status.
    pub fn parse<S: AsRef<str>>(
        name: Option<&str>,
        cids: &[S],
        statuses: &[S],
    ) -> Result<Self, RemotePinError> {
        let cids = cids
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                raw.parse::<Cid>().map_err(|e| {
                    RemotePinError::InvalidArgument(format!("CID {} cannot be parsed ({})", raw, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let statuses = statuses
            .iter()
            .map(|raw| {
                raw.as_ref()
                    .parse::<PinStatus>()
                    .map_err(|e| RemotePinError::InvalidArgument(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.map(str::to_string),
            cids,
            statuses,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_cids(mut self, cids: impl IntoIterator<Item = Cid>) -> Self {
        self.cids.extend(cids);
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = PinStatus>) -> Self {
        self.statuses.extend(statuses);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cids.is_empty() && self.statuses.is_empty()
    }

    /// Whether `record`-like fields satisfy every criterion.
    pub fn matches(&self, name: Option<&str>, cid: &Cid, status: PinStatus) -> bool {
        if let Some(expected) = &self.name {
            if name != Some(expected.as_str()) {
                return false;
            }
        }
        if !self.cids.is_empty() && !self.cids.contains(cid) {
            return false;
        }
        self.statuses.is_empty() || self.statuses.contains(&status)
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no filter");
        }

        let mut parts = Vec::new();
        if let Some(name) = &self.name {
            parts.push(format!("name={:?}", name));
        }
        if !self.cids.is_empty() {
            let cids = self.cids.iter().map(Cid::to_string).collect::<Vec<_>>();
            parts.push(format!("cid={}", cids.join(",")));
        }
        if !self.statuses.is_empty() {
            let statuses = self.statuses.iter().map(PinStatus::as_str).collect::<Vec<_>>();
            parts.push(format!("status={}", statuses.join(",")));
        }
        f.write_str(&parts.join(" "))
    }
}
