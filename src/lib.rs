//! OCS response encoding for legacy-compatible REST APIs.
//!
//! Renders `{ocs: {meta, data}}` envelopes as JSON or XML, picks the
//! format from the `format` query parameter and maps OCS status codes to
//! HTTP statuses.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod ocs;

pub use config::OcsServiceConfig;
pub use http::{Format, HttpServer, OcsResponse};
pub use lifecycle::Shutdown;
pub use ocs::{Data, Envelope, Meta, Payload, Status};
