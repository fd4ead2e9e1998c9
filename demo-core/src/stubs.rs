//! # Service Stubs
//!
//! One typed facade per remote service. Stubs hold nothing but the generated client and are
//! generic over the tonic transport `S`, so they run against a [`Channel`] in production and
//! against an in-process server in tests.
//!
//! * [`HelloStub`]: `hello.HelloService` (unary greeting).
//! * [`DemoStub`]: `demo.DemoService` (list in / map out, union reply).
//! * [`PositionStub`]: `sample.Position` (client streaming upload, server streaming download).
//!
//! [`Channel`]: tonic::transport::Channel
mod demo;
mod hello;
mod position;

pub use demo::DemoStub;
pub use hello::HelloStub;
pub use position::{LocationDownload, LocationUpload, PositionStub, UploadError};
