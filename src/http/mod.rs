//! HTTP side of OCS responses.
//!
//! # Data Flow
//! ```text
//! request
//!     → format.rs (format query parameter → Format)
//!     → handler builds OcsResponse (response.rs)
//!     → dispatch.rs (encode, map status, write)
//!     → sink.rs (BufferedResponse → axum Response)
//!     → client
//! ```

pub mod dispatch;
pub mod format;
pub mod response;
pub mod server;
pub mod sink;

pub use dispatch::{write_ocs_data, write_ocs_error, write_ocs_response, write_ocs_success};
pub use format::Format;
pub use response::OcsResponse;
pub use server::HttpServer;
pub use sink::{BufferedResponse, ResponseSink};
