//! OCS envelope model and wire encodings.
//!
//! # Data Flow
//! ```text
//! Meta + Data (or any Serialize value via convert.rs)
//!     → model.rs (Envelope { ocs: Payload { meta, data } })
//!     → json.rs  (format=json)
//!     → xml.rs   (anything else, with <element> wrapping)
//!     → status.rs maps meta.statuscode to the HTTP status
//! ```
//!
//! # Design Decisions
//! - Payload shape is an explicit sum type, so the XML side can match on
//!   sequences instead of inspecting types at runtime
//! - Canonical metadata are `static` and shared by every request
//! - Encoders render into memory; nothing here touches the transport

mod convert;
pub mod error;
mod number;
pub mod identity;
pub mod json;
pub mod model;
pub mod status;
pub mod xml;

pub use error::{EncodingError, WriteError};
pub use identity::{user_id_to_string, UserId};
pub use model::{
    Data, Envelope, Meta, Payload, Scalar, Status, META_BAD_REQUEST, META_NOT_FOUND, META_OK,
    META_SERVER_ERROR, META_UNAUTHORIZED, META_UNKNOWN_ERROR,
};
pub use status::http_status;
