//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatcher / server
//!     → tracing events (encoding failures, write failures, caller errors)
//!     → logging.rs subscriber (stdout, pretty or JSON)
//! ```

pub mod logging;

pub use logging::init_logging;
