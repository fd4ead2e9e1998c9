//! # Demo Core
//!
//! `demo-core` holds everything the demo harness needs to exercise a gRPC server that exposes
//! the `hello`, `demo` and `sample` services, one RPC pattern at a time.
//!
//! ## Key Components
//!
//! * **[`connection::Connection`]:** Opens and releases the transport to a single endpoint.
//! * **Stubs ([`stubs`]):** Thin typed facades over the generated clients, one per service,
//!   including the client-streaming and server-streaming handles.
//! * **Scenarios ([`scenarios`]):** One routine per demonstrated pattern (unary, map/union reply,
//!   client streaming, server streaming and the resilience probe).
//! * **Reports ([`report`]):** Typed results of each scenario, renderable as text or JSON.
//!
//! Scenarios never decide whether a failure is fatal. They return a [`scenarios::ScenarioError`]
//! and leave that decision to the caller, except for the probe which logs and keeps going.
//!
//! ## Re-exports
//!
//! This crate re-exports `demo-proto`, `prost` and `tonic` to ensure that consumers
//! use compatible versions of these underlying dependencies.
pub mod config;
pub mod connection;
pub mod report;
pub mod scenarios;
pub mod stubs;

// Re-exports
pub use demo_proto;
pub use demo_proto::pb;
pub use prost;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
