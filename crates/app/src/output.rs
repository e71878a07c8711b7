//! Human (`key=value`) and `--json` renderings of command results.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use common::prelude::{PinRecord, ServiceSummary};

/// One pin record as printed by `add` and `ls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinOutput {
    pub request_id: String,
    pub name: String,
    pub delegates: Vec<String>,
    pub status: String,
    pub cid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

impl From<PinRecord> for PinOutput {
    fn from(record: PinRecord) -> Self {
        Self {
            request_id: record.request_id,
            name: record.name.unwrap_or_default(),
            delegates: record.delegates,
            status: record.status.to_string(),
            cid: record.cid.to_string(),
            created: record.created.and_then(|c| c.format(&Rfc3339).ok()),
        }
    }
}

impl fmt::Display for PinOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pin_id={}", self.request_id)?;
        writeln!(f, "pin_name={:?}", self.name)?;
        for delegate in &self.delegates {
            writeln!(f, "pin_delegate={}", delegate)?;
        }
        writeln!(f, "pin_status={}", self.status)?;
        write!(f, "pin_cid={}", self.cid)
    }
}

fn write_json<T: Serialize>(f: &mut fmt::Formatter<'_>, value: &T) -> fmt::Result {
    let text = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
    write!(f, "{}", text)
}

#[derive(Debug, Clone)]
pub struct PinAdded {
    pub pin: PinOutput,
    pub json: bool,
}

impl fmt::Display for PinAdded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.json {
            write_json(f, &self.pin)
        } else {
            write!(f, "{}", self.pin)
        }
    }
}

/// Writes listed pins as they arrive, so records already received survive a
/// listing that fails part way through.
///
/// Text records are separated by a blank line. With `json` each record is
/// one compact JSON object per line.
#[derive(Debug)]
pub struct PinWriter<W> {
    out: W,
    json: bool,
    written: usize,
}

impl<W: Write> PinWriter<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self {
            out,
            json,
            written: 0,
        }
    }

    pub fn write(&mut self, pin: &PinOutput) -> io::Result<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, pin)?;
            writeln!(self.out)?;
        } else {
            if self.written > 0 {
                writeln!(self.out)?;
            }
            writeln!(self.out, "{}", pin)?;
        }
        self.written += 1;
        self.out.flush()
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceOutput {
    pub service: String,
    pub api_endpoint: String,
}

impl From<ServiceSummary> for ServiceOutput {
    fn from(summary: ServiceSummary) -> Self {
        Self {
            service: summary.name,
            api_endpoint: summary.url.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceList {
    pub services: Vec<ServiceOutput>,
    pub json: bool,
}

impl fmt::Display for ServiceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.json {
            return write_json(f, &self.services);
        }
        if self.services.is_empty() {
            return write!(f, "No remote pinning services configured");
        }
        let width = self
            .services
            .iter()
            .map(|s| s.service.len())
            .max()
            .unwrap_or(0);
        let lines: Vec<_> = self
            .services
            .iter()
            .map(|s| format!("{:<width$}  {}", s.service, s.api_endpoint, width = width))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::prelude::{Cid, PinStatus};
    use url::Url;

    const CID: &str = "bafkreigh2akiscaildcqabsyg3dfr6chu3fgpregiymsck7e7aqa4s52zy";

    fn record() -> PinRecord {
        PinRecord::new("req-1", CID.parse::<Cid>().unwrap(), PinStatus::Pinned)
            .with_name("my \"file\"")
            .with_delegates(vec!["/dns4/a/tcp/4001/p2p/A".into(), "/dns4/b/tcp/4001/p2p/B".into()])
    }

    #[test]
    fn test_pin_key_value_output() {
        let out = PinOutput::from(record()).to_string();
        assert_eq!(
            out,
            format!(
                "pin_id=req-1\n\
                 pin_name=\"my \\\"file\\\"\"\n\
                 pin_delegate=/dns4/a/tcp/4001/p2p/A\n\
                 pin_delegate=/dns4/b/tcp/4001/p2p/B\n\
                 pin_status=pinned\n\
                 pin_cid={}",
                CID
            )
        );
    }

    #[test]
    fn test_unnamed_pin_prints_empty_name() {
        let record = PinRecord::new("req-2", CID.parse::<Cid>().unwrap(), PinStatus::Queued);
        let out = PinOutput::from(record).to_string();
        assert!(out.contains("pin_name=\"\"\n"));
        assert!(!out.contains("pin_delegate"));
    }

    #[test]
    fn test_pin_writer_text_separates_records() {
        let mut writer = PinWriter::new(Vec::new(), false);
        let pin = PinOutput::from(record());
        writer.write(&pin).unwrap();
        writer.write(&pin).unwrap();
        assert_eq!(writer.written(), 2);

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, format!("{}\n\n{}\n", pin, pin));
    }

    #[test]
    fn test_pin_writer_json_lines() {
        let mut writer = PinWriter::new(Vec::new(), true);
        writer.write(&PinOutput::from(record())).unwrap();
        let unnamed = PinRecord::new("req-2", CID.parse::<Cid>().unwrap(), PinStatus::Queued);
        writer.write(&PinOutput::from(unnamed)).unwrap();

        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["request_id"], "req-1");
        assert_eq!(lines[0]["delegates"].as_array().unwrap().len(), 2);
        assert_eq!(lines[1]["status"], "queued");
    }

    #[test]
    fn test_service_list_text() {
        let list = ServiceList {
            services: vec![
                ServiceSummary {
                    name: "a".into(),
                    url: Url::parse("https://a.example.com/psa").unwrap(),
                }
                .into(),
                ServiceSummary {
                    name: "pinata".into(),
                    url: Url::parse("https://api.pinata.cloud/psa").unwrap(),
                }
                .into(),
            ],
            json: false,
        };
        assert_eq!(
            list.to_string(),
            "a       https://a.example.com/psa\npinata  https://api.pinata.cloud/psa"
        );
    }
}
