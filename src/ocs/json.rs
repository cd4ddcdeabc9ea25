//! JSON rendering of the envelope.
//!
//! Output is compact and escapes `<`, `>`, `&`, U+2028 and U+2029 as
//! `\u` sequences, which is what existing OCS clients receive from the
//! legacy servers. Floats print in their shortest form without a trailing
//! `.0`.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::ocs::error::EncodingError;
use crate::ocs::model::Envelope;
use crate::ocs::number::json_float;

/// Compact formatter with HTML-safe string escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyFormatter;

impl Formatter for LegacyFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    // only called with finite values
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(json_float(value).as_bytes())
    }

    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let widened = value.to_string().parse::<f64>().unwrap_or(f64::from(value));
        self.write_f64(writer, widened)
    }
}

/// Encode an envelope as `{"ocs":{"meta":{...},"data":...}}`.
pub fn to_json(envelope: &Envelope) -> Result<Vec<u8>, EncodingError> {
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, LegacyFormatter);
    envelope.serialize(&mut serializer)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocs::model::{Data, Meta, Payload, Status, META_NOT_FOUND, META_OK};

    fn encode(meta: Meta, data: Option<Data>) -> String {
        let envelope = Envelope::new(Payload::new(meta, data));
        String::from_utf8(to_json(&envelope).unwrap()).unwrap()
    }

    #[test]
    fn test_sequence_payload() {
        let json = encode(META_OK.clone(), Some(Data::from(vec!["a", "b"])));
        assert_eq!(
            json,
            r#"{"ocs":{"meta":{"status":"ok","statuscode":100,"message":"OK"},"data":["a","b"]}}"#
        );
    }

    #[test]
    fn test_missing_data_is_omitted() {
        let json = encode(META_NOT_FOUND.clone(), None);
        assert_eq!(
            json,
            r#"{"ocs":{"meta":{"status":"error","statuscode":998,"message":"Not Found"}}}"#
        );
    }

    #[test]
    fn test_html_characters_are_escaped() {
        let meta = Meta::new(Status::Error, 400, "<b> & </b>");
        let json = encode(meta, Some(Data::from("line\u{2028}break")));
        assert!(json.contains(r#""message":"\u003cb\u003e \u0026 \u003c/b\u003e""#));
        assert!(json.contains(r#""data":"line\u2028break""#));
    }

    #[test]
    fn test_control_characters_use_standard_escapes() {
        let json = encode(META_OK.clone(), Some(Data::from("a\"b\n")));
        assert!(json.contains(r#""data":"a\"b\n""#));
    }

    #[test]
    fn test_floats_use_legacy_text() {
        #[derive(serde::Serialize)]
        struct Quota {
            used: f64,
            total: f64,
            relative: f32,
        }
        let quota = Quota {
            used: 1.0,
            total: 1e21,
            relative: 0.1,
        };
        let json = encode(META_OK.clone(), Some(Data::from_serialize(&quota).unwrap()));
        assert!(
            json.ends_with(r#""data":{"used":1,"total":1e+21,"relative":0.1}}}"#),
            "{json}"
        );
    }

    #[test]
    fn test_pagination_fields() {
        let meta = META_OK
            .clone()
            .with_pagination(Some("3".to_string()), Some("2".to_string()));
        let json = encode(meta, None);
        assert_eq!(
            json,
            r#"{"ocs":{"meta":{"status":"ok","statuscode":100,"message":"OK","totalitems":"3","itemsperpage":"2"}}}"#
        );
    }
}
