//! # Reports
//!
//! Typed outcomes of the scenarios. Every report renders as plain text through `Display`
//! (one line per record) and as JSON through `to_json`, so the harness can print either.
use demo_proto::pb::demo::{ContactInfo, contact_info::Contact};
use demo_proto::pb::sample::Location;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of `TickInfo`.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub info: String,
    pub receive_time: String,
}

/// The single populated member of the `ContactInfo.contact` union.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactReport {
    Tel(String),
    Cell(String),
}

impl ContactReport {
    /// Returns `None` when the union has no member set.
    pub fn from_reply(reply: ContactInfo) -> Option<Self> {
        match reply.contact? {
            Contact::Tel(tel) => Some(ContactReport::Tel(tel)),
            Contact::Cell(cell) => Some(ContactReport::Cell(cell)),
        }
    }

    pub fn tel(&self) -> Option<&str> {
        match self {
            ContactReport::Tel(v) => Some(v),
            ContactReport::Cell(_) => None,
        }
    }

    pub fn cell(&self) -> Option<&str> {
        match self {
            ContactReport::Cell(v) => Some(v),
            ContactReport::Tel(_) => None,
        }
    }
}

/// Outcome of `CheckIfBlack` followed by `GetContactInfo`.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// IP -> is blacklisted. Sorted so renderings are stable.
    pub blacklist: BTreeMap<String, bool>,
    pub contact: ContactReport,
}

/// Outcome of the `PostLocation` client stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadReport {
    /// Messages sent by the client.
    pub sent: usize,
    /// Messages the server says it received.
    pub received: u32,
}

/// Outcome of the `PullLocation` server stream, in arrival order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DownloadReport {
    pub locations: Vec<Location>,
}

/// Counters of a resilience probe run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeSummary {
    pub attempts: u64,
    pub successes: u64,
    pub failures: u64,
    /// Attempt number of the most recent successful call.
    pub last_success: Option<u64>,
    /// Attempt number of the most recent failed call.
    pub last_failure: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioReport {
    Tick(TickReport),
    Batch(BatchReport),
    Upload(UploadReport),
    Download(DownloadReport),
    Probe(ProbeSummary),
}

impl ScenarioReport {
    /// Short name of the scenario that produced the report.
    pub fn scenario(&self) -> &'static str {
        match self {
            ScenarioReport::Tick(_) => "tick",
            ScenarioReport::Batch(_) => "batch",
            ScenarioReport::Upload(_) => "upload",
            ScenarioReport::Download(_) => "pull",
            ScenarioReport::Probe(_) => "probe",
        }
    }

    pub fn to_json(&self) -> Value {
        let body = match self {
            ScenarioReport::Tick(r) => json!({
                "info": r.info,
                "receive_time": r.receive_time,
            }),
            ScenarioReport::Batch(r) => json!({
                "results": r.blacklist,
                "contact": {
                    "tel": r.contact.tel(),
                    "cell": r.contact.cell(),
                },
            }),
            ScenarioReport::Upload(r) => json!({
                "sent": r.sent,
                "received": r.received,
            }),
            ScenarioReport::Download(r) => json!({
                "locations": r
                    .locations
                    .iter()
                    .map(|l| json!({ "lat": l.lat, "lon": l.lon }))
                    .collect::<Vec<_>>(),
            }),
            ScenarioReport::Probe(r) => json!({
                "attempts": r.attempts,
                "successes": r.successes,
                "failures": r.failures,
                "last_success": r.last_success,
                "last_failure": r.last_failure,
            }),
        };

        json!({ "scenario": self.scenario(), "report": body })
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick reply: info==> {}, receive time==> {}",
            self.info, self.receive_time
        )
    }
}

impl fmt::Display for ContactReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactReport::Tel(tel) => write!(f, "contact info: tel={tel}"),
            ContactReport::Cell(cell) => write!(f, "contact info: cell={cell}"),
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ip, is_black) in &self.blacklist {
            writeln!(f, "ip: {ip}, isBlack: {is_black}")?;
        }
        write!(f, "{}", self.contact)
    }
}

impl fmt::Display for UploadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "uploaded {} location(s), server received {}",
            self.sent, self.received
        )
    }
}

impl fmt::Display for DownloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.locations.is_empty() {
            return write!(f, "no locations streamed");
        }

        let lines: Vec<String> = self
            .locations
            .iter()
            .map(|l| format!("{} {}", l.lat, l.lon))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl fmt::Display for ProbeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "probe finished after {} attempt(s): {} ok, {} failed",
            self.attempts, self.successes, self.failures
        )
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioReport::Tick(r) => fmt::Display::fmt(r, f),
            ScenarioReport::Batch(r) => fmt::Display::fmt(r, f),
            ScenarioReport::Upload(r) => fmt::Display::fmt(r, f),
            ScenarioReport::Download(r) => fmt::Display::fmt(r, f),
            ScenarioReport::Probe(r) => fmt::Display::fmt(r, f),
        }
    }
}
