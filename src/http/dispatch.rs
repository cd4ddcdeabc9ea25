//! OCS response dispatch.
//!
//! # Flow
//! ```text
//! log caller error → pick format → encode into buffer
//!     → map statuscode → write headers → write body
//! ```
//!
//! The body is encoded completely before anything is committed, so an
//! encoding failure can still be reported as a clean 500. A failed body
//! write can only be logged once the status line is out.

use std::borrow::Cow;
use std::error::Error;

use axum::http::{header, HeaderValue, StatusCode};

use crate::http::format::Format;
use crate::http::sink::ResponseSink;
use crate::ocs::model::{Data, Envelope, Meta, Payload, META_OK};
use crate::ocs::{json, status, xml};

/// Encode and write a complete OCS response.
///
/// `error` is informational: it is logged with the meta message and never
/// changes what is sent. Failures are handled here and not returned.
pub fn write_ocs_response<S>(
    sink: &mut S,
    format: Format,
    envelope: &Envelope,
    error: Option<&(dyn Error + 'static)>,
) where
    S: ResponseSink + ?Sized,
{
    let meta = envelope.ocs().meta();

    if let Some(err) = error {
        tracing::error!(error = %err, status_code = meta.status_code, "{}", meta.message);
    }

    sink.set_header(
        header::CONTENT_TYPE,
        HeaderValue::from_static(format.content_type()),
    );

    let encoded = match format {
        Format::Json => json::to_json(envelope),
        Format::Xml => xml::to_xml_document(envelope),
    };
    let body = match encoded {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(error = %err, ?format, "error encoding ocs response");
            if !sink.headers_written() {
                sink.write_status(StatusCode::INTERNAL_SERVER_ERROR);
            }
            return;
        }
    };

    let status = status::http_status(meta.status_code);
    sink.write_status(status);

    if let Err(err) = sink.write_body(&body) {
        tracing::error!(error = %err, "error writing ocs response");
        if sink.headers_written() {
            tracing::debug!(status = %status, "status already committed");
        } else {
            sink.write_status(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

/// Wrap `meta` and `data` in an envelope and write it.
pub fn write_ocs_data<S>(
    sink: &mut S,
    format: Format,
    meta: Meta,
    data: Option<Data>,
    error: Option<&(dyn Error + 'static)>,
) where
    S: ResponseSink + ?Sized,
{
    let envelope = Envelope::new(Payload::new(meta, data));
    write_ocs_response(sink, format, &envelope, error);
}

/// Write `data` with the canonical ok metadata.
pub fn write_ocs_success<S>(sink: &mut S, format: Format, data: Option<Data>)
where
    S: ResponseSink + ?Sized,
{
    write_ocs_data(sink, format, META_OK.clone(), data, None);
}

/// Write an error response without data.
pub fn write_ocs_error<S>(
    sink: &mut S,
    format: Format,
    status_code: i32,
    message: impl Into<Cow<'static, str>>,
    error: Option<&(dyn Error + 'static)>,
) where
    S: ResponseSink + ?Sized,
{
    write_ocs_data(sink, format, Meta::error(status_code, message), None, error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::sink::BufferedResponse;
    use crate::ocs::model::META_NOT_FOUND;

    fn body_str(sink: &BufferedResponse) -> &str {
        std::str::from_utf8(sink.body()).unwrap()
    }

    #[test]
    fn test_xml_scenario() {
        let mut sink = BufferedResponse::new();
        write_ocs_success(&mut sink, Format::Xml, Some(Data::from(vec!["a", "b"])));

        assert_eq!(sink.status(), Some(StatusCode::OK));
        assert_eq!(sink.headers()[header::CONTENT_TYPE], "application/xml");
        assert_eq!(
            body_str(&sink),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><ocs><meta><status>ok</status>\
             <statuscode>100</statuscode><message>OK</message></meta>\
             <data><element>a</element><element>b</element></data></ocs>"
        );
    }

    #[test]
    fn test_json_scenario() {
        let mut sink = BufferedResponse::new();
        write_ocs_success(&mut sink, Format::Json, Some(Data::from(vec!["a", "b"])));

        assert_eq!(sink.status(), Some(StatusCode::OK));
        assert_eq!(sink.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(
            body_str(&sink),
            r#"{"ocs":{"meta":{"status":"ok","statuscode":100,"message":"OK"},"data":["a","b"]}}"#
        );
    }

    #[test]
    fn test_not_found_in_both_formats() {
        for format in [Format::Json, Format::Xml] {
            let mut sink = BufferedResponse::new();
            write_ocs_data(&mut sink, format, META_NOT_FOUND.clone(), None, None);
            assert_eq!(sink.status(), Some(StatusCode::NOT_FOUND));
        }
    }

    #[test]
    fn test_error_helper() {
        let mut sink = BufferedResponse::new();
        let cause = std::io::Error::other("share lookup failed");
        write_ocs_error(&mut sink, Format::Json, 104, "forbidden", Some(&cause));

        assert_eq!(sink.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(
            body_str(&sink),
            r#"{"ocs":{"meta":{"status":"error","statuscode":104,"message":"forbidden"}}}"#
        );
    }

    #[test]
    fn test_encoding_failure_becomes_500() {
        let mut sink = BufferedResponse::new();
        let data = Data::object([("not valid", Data::from("x"))]);
        write_ocs_success(&mut sink, Format::Xml, Some(data));

        assert_eq!(sink.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(sink.headers()[header::CONTENT_TYPE], "application/xml");
        assert!(sink.body().is_empty());
    }

    #[test]
    fn test_invalid_xml_names_are_fine_in_json() {
        let mut sink = BufferedResponse::new();
        let data = Data::object([("not valid", Data::from("x"))]);
        write_ocs_success(&mut sink, Format::Json, Some(data));

        assert_eq!(sink.status(), Some(StatusCode::OK));
        assert!(body_str(&sink).ends_with(r#""data":{"not valid":"x"}}}"#));
    }
}
