//! The in-memory shape of an OCS response.
//!
//! ```text
//! Envelope
//!   └── ocs: Payload
//!         ├── meta: Meta      (status, statuscode, message, pagination)
//!         └── data: Data?     (scalar | object | sequence)
//! ```
//!
//! Everything here is plain data. Rendering lives in [`crate::ocs::xml`] and
//! [`crate::ocs::json`].

use std::borrow::Cow;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::ocs::convert::DataSerializer;
use crate::ocs::error::EncodingError;

/// Semantic status code of a successful call.
pub const STATUS_CODE_OK: i32 = 100;
/// Semantic status code of a malformed request.
pub const STATUS_CODE_BAD_REQUEST: i32 = 400;
/// Semantic status code of a forbidden call.
pub const STATUS_CODE_FORBIDDEN: i32 = 104;
/// Semantic status code of a server-side failure.
pub const STATUS_CODE_SERVER_ERROR: i32 = 996;
/// Semantic status code of an unauthenticated call.
pub const STATUS_CODE_UNAUTHORIZED: i32 = 997;
/// Semantic status code of a missing resource.
pub const STATUS_CODE_NOT_FOUND: i32 = 998;
/// Semantic status code of an unclassified failure.
pub const STATUS_CODE_UNKNOWN_ERROR: i32 = 999;

/// Default ok response.
pub static META_OK: Meta = Meta::canonical(Status::Ok, STATUS_CODE_OK, "OK");

/// Returned for malformed requests.
pub static META_BAD_REQUEST: Meta =
    Meta::canonical(Status::Error, STATUS_CODE_BAD_REQUEST, "Bad Request");

/// Returned on server errors.
pub static META_SERVER_ERROR: Meta =
    Meta::canonical(Status::Error, STATUS_CODE_SERVER_ERROR, "Server Error");

/// Returned on unauthorized requests.
pub static META_UNAUTHORIZED: Meta =
    Meta::canonical(Status::Error, STATUS_CODE_UNAUTHORIZED, "Unauthorised");

/// Returned when the requested resource does not exist.
pub static META_NOT_FOUND: Meta =
    Meta::canonical(Status::Error, STATUS_CODE_NOT_FOUND, "Not Found");

/// Returned for failures that fit no other category.
pub static META_UNKNOWN_ERROR: Meta =
    Meta::canonical(Status::Error, STATUS_CODE_UNKNOWN_ERROR, "Unknown Error");

/// Top level response structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    ocs: Payload,
}

impl Envelope {
    pub fn new(ocs: Payload) -> Self {
        Self { ocs }
    }

    pub fn ocs(&self) -> &Payload {
        &self.ocs
    }
}

/// Response metadata paired with the response data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    meta: Meta,

    #[serde(skip_serializing_if = "data_is_empty")]
    data: Option<Data>,
}

impl Payload {
    pub fn new(meta: Meta, data: Option<Data>) -> Self {
        Self { meta, data }
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn data(&self) -> Option<&Data> {
        self.data.as_ref()
    }
}

fn data_is_empty(data: &Option<Data>) -> bool {
    data.as_ref().map_or(true, Data::is_null)
}

/// Outcome vocabulary of the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Error => "error",
        }
    }
}

/// Response metadata.
///
/// `status_code` is the OCS semantic code, not the HTTP status. See
/// [`crate::ocs::status::http_status`] for the mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
    pub status: Status,

    #[serde(rename = "statuscode")]
    pub status_code: i32,

    pub message: Cow<'static, str>,

    /// Only set for paginated listings.
    #[serde(rename = "totalitems", skip_serializing_if = "Option::is_none")]
    pub total_items: Option<String>,

    #[serde(rename = "itemsperpage", skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<String>,
}

impl Meta {
    const fn canonical(status: Status, status_code: i32, message: &'static str) -> Self {
        Self {
            status,
            status_code,
            message: Cow::Borrowed(message),
            total_items: None,
            items_per_page: None,
        }
    }

    pub fn new(status: Status, status_code: i32, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            status_code,
            message: message.into(),
            total_items: None,
            items_per_page: None,
        }
    }

    /// Metadata for an error outcome with the given semantic code.
    pub fn error(status_code: i32, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Status::Error, status_code, message)
    }

    /// Attach pagination counters. Either may be left unset.
    pub fn with_pagination(
        mut self,
        total_items: Option<String>,
        items_per_page: Option<String>,
    ) -> Self {
        self.total_items = total_items;
        self.items_per_page = items_per_page;
        self
    }
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// Payload value carried in `data`.
///
/// Sequences get special treatment in XML (see [`crate::ocs::xml`]), so the
/// shape is kept explicit instead of hidden behind a generic value.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Scalar(Scalar),
    /// Named fields in declaration order.
    Object(Vec<(String, Data)>),
    Sequence(Vec<Data>),
}

impl Data {
    pub const NULL: Data = Data::Scalar(Scalar::Null);

    /// Convert any serializable value.
    ///
    /// Struct fields keep their declaration order and map entries are
    /// sorted by key. NaN and infinities are rejected.
    pub fn from_serialize<T>(value: &T) -> Result<Self, EncodingError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(DataSerializer)
    }

    /// Build an object from `(name, value)` pairs, keeping their order.
    pub fn object<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Data>,
    {
        Data::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Data::Scalar(Scalar::Null))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Data::Sequence(_))
    }
}

/// JSON objects arrive sorted by key, like any other map.
impl From<Value> for Data {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Data::NULL,
            Value::Bool(b) => Data::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Data::Scalar(Scalar::Number(n)),
            Value::String(s) => Data::Scalar(Scalar::String(s)),
            Value::Array(items) => Data::Sequence(items.into_iter().map(Data::from).collect()),
            Value::Object(map) => Data::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Data::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Data {
    fn from(s: &str) -> Self {
        Data::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Data {
    fn from(s: String) -> Self {
        Data::Scalar(Scalar::String(s))
    }
}

impl From<bool> for Data {
    fn from(b: bool) -> Self {
        Data::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Data {
    fn from(n: i64) -> Self {
        Data::Scalar(Scalar::Number(n.into()))
    }
}

impl From<u64> for Data {
    fn from(n: u64) -> Self {
        Data::Scalar(Scalar::Number(n.into()))
    }
}

impl<T: Into<Data>> From<Vec<T>> for Data {
    fn from(items: Vec<T>) -> Self {
        Data::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => n.serialize(serializer),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Data::Scalar(scalar) => scalar.serialize(serializer),
            Data::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            Data::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Share {
        id: String,
        share_type: u8,
        permissions: u32,
    }

    #[test]
    fn test_canonical_metadata() {
        assert_eq!(META_OK.status, Status::Ok);
        assert_eq!(META_OK.status_code, 100);
        assert_eq!(META_OK.message, "OK");
        assert_eq!(META_BAD_REQUEST.status_code, 400);
        assert_eq!(META_SERVER_ERROR.status_code, 996);
        assert_eq!(META_UNAUTHORIZED.message, "Unauthorised");
        assert_eq!(META_NOT_FOUND.status_code, 998);
        assert_eq!(META_UNKNOWN_ERROR.message, "Unknown Error");
        assert!(META_OK.total_items.is_none());
    }

    #[test]
    fn test_struct_fields_keep_declaration_order() {
        let share = Share {
            id: "42".to_string(),
            share_type: 3,
            permissions: 1,
        };
        let data = Data::from_serialize(&share).unwrap();

        let Data::Object(fields) = data else {
            panic!("expected object");
        };
        let names: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["id", "share_type", "permissions"]);
    }

    #[test]
    fn test_non_string_map_keys_are_rejected() {
        let mut map = HashMap::new();
        map.insert(vec![1u8], "x");

        let err = Data::from_serialize(&map).unwrap_err();
        assert!(matches!(err, EncodingError::Unsupported(_)));
    }

    #[test]
    fn test_vec_becomes_sequence() {
        let data = Data::from(vec!["a", "b"]);
        assert!(data.is_sequence());
        assert!(!Data::from("a").is_sequence());
        assert!(Data::from(Value::Null).is_null());
    }

    #[test]
    fn test_payload_json_omits_missing_data() {
        let payload = Payload::new(META_OK.clone(), None);
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("data").is_none());

        let payload = Payload::new(META_OK.clone(), Some(Data::NULL));
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("data").is_none());

        let payload = Payload::new(META_OK.clone(), Some(Data::Sequence(vec![])));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["data"], serde_json::json!([]));
    }

    #[test]
    fn test_meta_pagination_fields() {
        let meta = META_OK
            .clone()
            .with_pagination(Some("120".to_string()), None);
        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["totalitems"], "120");
        assert!(json.get("itemsperpage").is_none());
        assert_eq!(json["statuscode"], 100);
        assert_eq!(json["status"], "ok");
    }
}
