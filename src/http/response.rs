//! OCS responses returned from axum handlers.

use std::borrow::Cow;
use std::error::Error;

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::http::dispatch::write_ocs_response;
use crate::http::format::Format;
use crate::http::sink::BufferedResponse;
use crate::ocs::model::{Data, Envelope, Meta, Payload, META_OK, META_SERVER_ERROR};

/// Handler return value rendered through [`write_ocs_response`].
///
/// ```ignore
/// async fn list_shares(format: Format) -> OcsResponse {
///     OcsResponse::success(format, Some(Data::from(vec!["a", "b"])))
/// }
/// ```
pub struct OcsResponse {
    format: Format,
    envelope: Envelope,
    error: Option<Box<dyn Error + Send + Sync>>,
}

impl OcsResponse {
    pub fn data(format: Format, meta: Meta, data: Option<Data>) -> Self {
        Self {
            format,
            envelope: Envelope::new(Payload::new(meta, data)),
            error: None,
        }
    }

    /// Convert `value` into the payload. A value that cannot be encoded
    /// (a NaN field, a non-string map key) yields a server error instead.
    pub fn from_serialize<T>(format: Format, meta: Meta, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        match Data::from_serialize(value) {
            Ok(data) => Self::data(format, meta, Some(data)),
            Err(err) => Self::data(format, META_SERVER_ERROR.clone(), None).with_error(err),
        }
    }

    pub fn success(format: Format, data: Option<Data>) -> Self {
        Self::data(format, META_OK.clone(), data)
    }

    pub fn error(format: Format, status_code: i32, message: impl Into<Cow<'static, str>>) -> Self {
        Self::data(format, Meta::error(status_code, message), None)
    }

    /// Attach the error that led to this response. It is logged, not sent.
    pub fn with_error(mut self, error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl IntoResponse for OcsResponse {
    fn into_response(self) -> Response {
        let mut sink = BufferedResponse::new();
        let error = self
            .error
            .as_deref()
            .map(|err| err as &(dyn Error + 'static));
        write_ocs_response(&mut sink, self.format, &self.envelope, error);
        sink.into_response()
    }
}
