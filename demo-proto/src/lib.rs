//! # Demo Proto
//!
//! Generated messages, clients and server traits for the three services exercised by the
//! demo harness: `hello.HelloService`, `demo.DemoService` and `sample.Position`.
//!
//! The server side is only used to run fake services in integration tests.

pub mod pb {
    pub mod common {
        include!(concat!(env!("OUT_DIR"), "/common.rs"));
    }

    pub mod hello {
        include!(concat!(env!("OUT_DIR"), "/hello.rs"));
    }

    pub mod demo {
        include!(concat!(env!("OUT_DIR"), "/demo.rs"));
    }

    pub mod sample {
        include!(concat!(env!("OUT_DIR"), "/sample.rs"));
    }
}

pub use pb::demo::demo_service_client::DemoServiceClient;
pub use pb::demo::demo_service_server::{DemoService, DemoServiceServer};
pub use pb::hello::hello_service_client::HelloServiceClient;
pub use pb::hello::hello_service_server::{HelloService, HelloServiceServer};
pub use pb::sample::position_client::PositionClient;
pub use pb::sample::position_server::{Position, PositionServer};
