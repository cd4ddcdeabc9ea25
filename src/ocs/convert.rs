//! `serde` → [`Data`] conversion.
//!
//! Structs keep their field declaration order. Map entries are sorted by
//! key, so a `HashMap` payload renders identically on every call.
//! Non-finite floats have no wire form and are rejected.

use serde::ser::{self, Serialize};
use serde_json::Number;

use crate::ocs::error::EncodingError;
use crate::ocs::model::{Data, Scalar};

/// Serializer producing a [`Data`] tree.
pub(crate) struct DataSerializer;

fn out_of_range(v: impl std::fmt::Display) -> EncodingError {
    EncodingError::Unsupported(format!("number out of range: {v}"))
}

impl ser::Serializer for DataSerializer {
    type Ok = Data;
    type Error = EncodingError;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeStruct;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Data, EncodingError> {
        Ok(Data::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Data, EncodingError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Data, EncodingError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Data, EncodingError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Data, EncodingError> {
        Ok(Data::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Data, EncodingError> {
        if let Ok(v) = i64::try_from(v) {
            Ok(Data::from(v))
        } else if let Ok(v) = u64::try_from(v) {
            Ok(Data::from(v))
        } else {
            Err(out_of_range(v))
        }
    }

    fn serialize_u8(self, v: u8) -> Result<Data, EncodingError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Data, EncodingError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Data, EncodingError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Data, EncodingError> {
        Ok(Data::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Data, EncodingError> {
        u64::try_from(v)
            .map(Data::from)
            .map_err(|_| out_of_range(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Data, EncodingError> {
        if !v.is_finite() {
            return Err(EncodingError::Unsupported(format!("unsupported value: {v}")));
        }
        // widen through the shortest f32 text so 0.1f32 stays 0.1
        let widened = v.to_string().parse::<f64>().unwrap_or(f64::from(v));
        self.serialize_f64(widened)
    }

    fn serialize_f64(self, v: f64) -> Result<Data, EncodingError> {
        Number::from_f64(v)
            .map(|n| Data::Scalar(Scalar::Number(n)))
            .ok_or_else(|| EncodingError::Unsupported(format!("unsupported value: {v}")))
    }

    fn serialize_char(self, v: char) -> Result<Data, EncodingError> {
        Ok(Data::from(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Data, EncodingError> {
        Ok(Data::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Data, EncodingError> {
        Ok(Data::Sequence(
            v.iter().map(|b| Data::from(u64::from(*b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Data, EncodingError> {
        Ok(Data::NULL)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Data, EncodingError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Data, EncodingError> {
        Ok(Data::NULL)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Data, EncodingError> {
        Ok(Data::NULL)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Data, EncodingError> {
        Ok(Data::from(variant))
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Data, EncodingError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Data, EncodingError>
    where
        T: ?Sized + Serialize,
    {
        Ok(Data::Object(vec![(
            variant.to_string(),
            value.serialize(DataSerializer)?,
        )]))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec, EncodingError> {
        Ok(SerializeVec {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec, EncodingError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeVec, EncodingError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant, EncodingError> {
        Ok(SerializeTupleVariant {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap, EncodingError> {
        Ok(SerializeMap {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeStruct, EncodingError> {
        Ok(SerializeStruct {
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant, EncodingError> {
        Ok(SerializeStructVariant {
            variant,
            fields: Vec::with_capacity(len),
        })
    }
}

pub(crate) struct SerializeVec {
    items: Vec<Data>,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Data;
    type Error = EncodingError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(DataSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Data, EncodingError> {
        Ok(Data::Sequence(self.items))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Data;
    type Error = EncodingError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Data, EncodingError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Data;
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Data, EncodingError> {
        ser::SerializeSeq::end(self)
    }
}

pub(crate) struct SerializeTupleVariant {
    variant: &'static str,
    items: Vec<Data>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Data;
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(DataSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Data, EncodingError> {
        Ok(Data::Object(vec![(
            self.variant.to_string(),
            Data::Sequence(self.items),
        )]))
    }
}

pub(crate) struct SerializeMap {
    entries: Vec<(String, Data)>,
    next_key: Option<String>,
}

/// Map keys must render as strings; integers are accepted as their text.
fn map_key(key: Data) -> Result<String, EncodingError> {
    match key {
        Data::Scalar(Scalar::String(s)) => Ok(s),
        Data::Scalar(Scalar::Number(n)) if !n.is_f64() => Ok(n.to_string()),
        _ => Err(EncodingError::Unsupported("map key must be a string".to_string())),
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Data;
    type Error = EncodingError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(map_key(key.serialize(DataSerializer)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| EncodingError::Unsupported("map value without key".to_string()))?;
        self.entries.push((key, value.serialize(DataSerializer)?));
        Ok(())
    }

    fn end(mut self) -> Result<Data, EncodingError> {
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Data::Object(self.entries))
    }
}

pub(crate) struct SerializeStruct {
    fields: Vec<(String, Data)>,
}

impl ser::SerializeStruct for SerializeStruct {
    type Ok = Data;
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.fields
            .push((key.to_string(), value.serialize(DataSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Data, EncodingError> {
        Ok(Data::Object(self.fields))
    }
}

pub(crate) struct SerializeStructVariant {
    variant: &'static str,
    fields: Vec<(String, Data)>,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Data;
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), EncodingError>
    where
        T: ?Sized + Serialize,
    {
        self.fields
            .push((key.to_string(), value.serialize(DataSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Data, EncodingError> {
        Ok(Data::Object(vec![(
            self.variant.to_string(),
            Data::Object(self.fields),
        )]))
    }
}
