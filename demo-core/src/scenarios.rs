//! # Invocation Scenarios
//!
//! One routine per RPC pattern. Each scenario takes ownership of its own [`Connection`], runs a
//! fixed linear sequence of calls and returns a typed report. Connections are released when the
//! scenario returns, whatever the outcome.
//!
//! | scenario        | pattern                          | on failure            |
//! |-----------------|----------------------------------|-----------------------|
//! | [`tick`]        | unary                            | `Err(ScenarioError)`  |
//! | [`batch`]       | unary, map reply + union reply   | `Err(ScenarioError)`  |
//! | [`upload`]      | client streaming                 | `Err(ScenarioError)`  |
//! | [`pull`]        | server streaming                 | `Err(ScenarioError)`  |
//! | [`probe`]       | unary on a fixed interval        | logs and continues    |
//!
//! [`Connection`]: crate::connection::Connection
mod batch;
mod probe;
mod pull;
mod tick;
mod upload;

pub use batch::batch;
pub use probe::probe;
pub use pull::pull;
pub use tick::tick;
pub use upload::upload;

use crate::{connection::ConnectError, stubs::UploadError};
use demo_proto::pb::demo::CheckIps;
use demo_proto::pb::hello::HelloRequest;
use demo_proto::pb::sample::Location;
use tonic::Status;

pub const TICK_INFO: &str = "TickInfo";
pub const CHECK_IF_BLACK: &str = "CheckIfBlack";
pub const GET_CONTACT_INFO: &str = "GetContactInfo";
pub const POST_LOCATION: &str = "PostLocation";
pub const PULL_LOCATION: &str = "PullLocation";

/// Errors that abort a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error("{method} failed: {status}")]
    Call {
        method: &'static str,
        #[source]
        status: Status,
    },
    #[error("{method}: failed to send message #{index}: {source}")]
    Send {
        method: &'static str,
        index: usize,
        source: UploadError,
    },
    #[error("{method}: {source}")]
    Stream {
        method: &'static str,
        source: UploadError,
    },
    #[error("{method} replied without a value for '{field}'")]
    IncompleteReply {
        method: &'static str,
        field: &'static str,
    },
}

impl ScenarioError {
    pub(crate) fn call(method: &'static str) -> impl FnOnce(Status) -> Self {
        move |status| ScenarioError::Call { method, status }
    }

    /// The gRPC status behind the failure, if the server (or transport) produced one.
    pub fn status(&self) -> Option<&Status> {
        match self {
            ScenarioError::Call { status, .. } => Some(status),
            ScenarioError::Send {
                source: UploadError::Status(status),
                ..
            }
            | ScenarioError::Stream {
                source: UploadError::Status(status),
                ..
            } => Some(status),
            _ => None,
        }
    }
}

/// The greeting sent by the original harness.
pub fn default_hello_request() -> HelloRequest {
    HelloRequest {
        name: "hewe".to_string(),
        age: 30,
        is_adult: true,
    }
}

/// The IP batch checked by the original harness.
pub fn default_check_ips() -> CheckIps {
    CheckIps {
        name: "testListAndMap".to_string(),
        ips: vec![
            "192.158.22.33".to_string(),
            "10.169.2.121".to_string(),
            "192.168.23.111".to_string(),
        ],
    }
}

/// `count` copies of the sample position uploaded by the original harness.
pub fn default_locations(count: usize) -> Vec<Location> {
    (0..count)
        .map(|_| Location {
            lat: 11.323,
            lon: 92.24,
        })
        .collect()
}
