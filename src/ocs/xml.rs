//! Legacy XML projection of the envelope.
//!
//! # Layout
//! ```text
//! <ocs>
//!   <meta><status/><statuscode/><message/>[<totalitems/>][<itemsperpage/>]</meta>
//!   <data>...</data>
//! </ocs>
//! ```
//!
//! # Element wrapping
//! When `data` itself is a sequence, every item is written inside its own
//! `<element>` tag:
//!
//! ```text
//! ["a", "b"]  →  <data><element>a</element><element>b</element></data>
//! ```
//!
//! Below that level the usual convention applies: a sequence held in an
//! object field repeats the field name once per item, and null values are
//! left out.

use std::borrow::Cow;
use std::io;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::ocs::error::EncodingError;
use crate::ocs::model::{Data, Envelope, Meta, Scalar};
use crate::ocs::number::xml_float;

const OCS: &str = "ocs";
const META: &str = "meta";
const DATA: &str = "data";
const ELEMENT: &str = "element";

/// Render the envelope without an XML declaration.
pub fn to_xml(envelope: &Envelope) -> Result<Vec<u8>, EncodingError> {
    let mut projector = Projector::new(Vec::with_capacity(256));
    projector.envelope(envelope)?;
    Ok(projector.into_inner())
}

/// Render the envelope as a full document, declaration included.
pub fn to_xml_document(envelope: &Envelope) -> Result<Vec<u8>, EncodingError> {
    let mut projector = Projector::new(Vec::with_capacity(256));
    projector.declaration()?;
    projector.envelope(envelope)?;
    Ok(projector.into_inner())
}

struct Projector<W: io::Write> {
    writer: Writer<W>,
}

impl<W: io::Write> Projector<W> {
    fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
        }
    }

    fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), EncodingError> {
        self.writer
            .write_event(event)
            .map_err(|e| EncodingError::Xml(e.to_string()))
    }

    fn declaration(&mut self) -> Result<(), EncodingError> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    fn start(&mut self, name: &str) -> Result<(), EncodingError> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<(), EncodingError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<(), EncodingError> {
        self.start(name)?;
        if !text.is_empty() {
            self.write(Event::Text(BytesText::from_escaped(escape_text(text))))?;
        }
        self.end(name)
    }

    fn envelope(&mut self, envelope: &Envelope) -> Result<(), EncodingError> {
        let payload = envelope.ocs();
        self.start(OCS)?;
        self.meta(payload.meta())?;
        self.data(payload.data())?;
        self.end(OCS)
    }

    fn meta(&mut self, meta: &Meta) -> Result<(), EncodingError> {
        self.start(META)?;
        self.text_element("status", meta.status.as_str())?;
        self.text_element("statuscode", &meta.status_code.to_string())?;
        self.text_element("message", &meta.message)?;
        if let Some(total_items) = &meta.total_items {
            self.text_element("totalitems", total_items)?;
        }
        if let Some(items_per_page) = &meta.items_per_page {
            self.text_element("itemsperpage", items_per_page)?;
        }
        self.end(META)
    }

    fn data(&mut self, data: Option<&Data>) -> Result<(), EncodingError> {
        match data {
            Some(Data::Sequence(items)) => {
                self.start(DATA)?;
                for item in items {
                    self.value(ELEMENT, item)?;
                }
                self.end(DATA)
            }
            Some(value) if !value.is_null() => self.value(DATA, value),
            // <data> is always present, even without a payload
            _ => {
                self.start(DATA)?;
                self.end(DATA)
            }
        }
    }

    fn value(&mut self, name: &str, value: &Data) -> Result<(), EncodingError> {
        match value {
            Data::Scalar(Scalar::Null) => Ok(()),
            Data::Scalar(scalar) => self.text_element(name, &scalar_text(scalar)),
            Data::Object(fields) => {
                self.start(name)?;
                for (key, field) in fields {
                    if !is_valid_name(key) {
                        return Err(EncodingError::InvalidElementName(key.clone()));
                    }
                    self.value(key, field)?;
                }
                self.end(name)
            }
            Data::Sequence(items) => {
                for item in items {
                    self.value(name, item)?;
                }
                Ok(())
            }
        }
    }
}

fn scalar_text(scalar: &Scalar) -> Cow<'_, str> {
    match scalar {
        Scalar::Null => Cow::Borrowed(""),
        Scalar::Bool(true) => Cow::Borrowed("true"),
        Scalar::Bool(false) => Cow::Borrowed("false"),
        Scalar::Number(n) => Cow::Owned(match n.as_f64() {
            Some(f) if n.is_f64() => xml_float(f),
            _ => n.to_string(),
        }),
        Scalar::String(s) => Cow::Borrowed(s),
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Escape character data the way legacy OCS servers do.
///
/// Quotes and whitespace control characters use numeric references, and
/// characters outside the XML range become U+FFFD.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    let needs_escape = |c: char| {
        matches!(c, '&' | '<' | '>' | '"' | '\'' | '\t' | '\n' | '\r') || !is_xml_char(c)
    };
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c if !is_xml_char(c) => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
