//! Response format selection from the `format` query parameter.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::Uri;

/// Wire format of an OCS response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    Json,
    /// Used whenever the client did not ask for JSON.
    #[default]
    Xml,
}

impl Format {
    /// Only the exact hint `json` selects JSON.
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            Some("json") => Format::Json,
            _ => Format::Xml,
        }
    }

    /// Read the first `format` parameter of the request URI.
    ///
    /// A query string that cannot be decoded counts as no hint.
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        let hint = pairs
            .iter()
            .find(|(key, _)| key == "format")
            .map(|(_, value)| value.as_str());
        Self::from_hint(hint)
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
        }
    }
}

impl<S> FromRequestParts<S> for Format
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Format::from_uri(&parts.uri))
    }
}
