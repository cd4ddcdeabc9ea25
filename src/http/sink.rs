//! Response destinations.
//!
//! A sink mirrors how an HTTP response is committed on the wire: headers
//! may change until the status line is written, after which only body
//! bytes can follow.

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::ocs::error::WriteError;

/// Destination of an encoded OCS response.
pub trait ResponseSink {
    /// Set a header. Ignored once headers are written.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Commit headers with the given status.
    fn write_status(&mut self, status: StatusCode);

    /// Append body bytes, committing a 200 first if no status was written.
    fn write_body(&mut self, bytes: &[u8]) -> Result<usize, WriteError>;

    fn headers_written(&self) -> bool;
}

/// In-memory sink that turns into an axum [`Response`].
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed status, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl ResponseSink for BufferedResponse {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        if self.headers_written() {
            tracing::warn!(header = %name, "headers already written, ignoring header");
            return;
        }
        self.headers.insert(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        match self.status {
            Some(committed) => {
                tracing::warn!(
                    committed = %committed,
                    requested = %status,
                    "superfluous status write ignored"
                );
            }
            None => self.status = Some(status),
        }
    }

    fn write_body(&mut self, bytes: &[u8]) -> Result<usize, WriteError> {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn headers_written(&self) -> bool {
        self.status.is_some()
    }
}

impl IntoResponse for BufferedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}
