//! Conversion of arbitrary `Serialize` values into resource data.
//!
//! This module implements the generic object-to-data walk as a custom
//! `serde::Serializer`: the value's own `Serialize` impl drives the
//! traversal and the serializer assembles the canonical
//! [`ResourceValue`](crate::data::ResourceValue) tree, so anything a derive
//! can describe can be mapped without bespoke reflection code.
//!
//! The walk is deliberately shallow for collections. A sequence is only
//! converted when it is the value being converted itself; sequence-valued
//! fields of an already-converted object are dropped rather than recursed
//! into, which keeps the conversion of arbitrary object graphs bounded.
//! Plain nested objects recurse normally; directly cyclic object references
//! are not guarded against and will overflow the stack.

use serde::ser::{self, Impossible, Serialize};

use crate::data::{FormattedValue, ObjectData, ResourceValue, Scalar};
use crate::error::ConvertError;
use crate::format;

/// Converts a value into resource data.
///
/// Returns `None` for values with no data representation (`None`, unit).
///
/// ```ignore
/// use slysoft_hal::convert_value;
///
/// let value = convert_value(&5)?;
/// let list = convert_value(&vec!["a", "b"])?;
/// ```
pub fn convert_value<T>(value: &T) -> Result<Option<ResourceValue>, ConvertError>
where
    T: Serialize + ?Sized,
{
    match value.serialize(ValueSerializer { depth: 0 })? {
        Conv::Value(v) => Ok(Some(v)),
        Conv::Null | Conv::Skipped => Ok(None),
    }
}

/// Converts a value and renders a scalar result through a format pattern.
///
/// The wrapper keeps a marker for whether the rendered text is a bare
/// numeric token, so the JSON codec can emit it unquoted. A format supplied
/// for a non-scalar value is ignored.
pub fn convert_value_with_format<T>(
    value: &T,
    pattern: &str,
) -> Result<Option<ResourceValue>, ConvertError>
where
    T: Serialize + ?Sized,
{
    match convert_value(value)? {
        Some(ResourceValue::Scalar(scalar)) => {
            let (text, numeric) = format::apply_format(pattern, &scalar);
            Ok(Some(ResourceValue::Formatted(FormattedValue::new(
                text, numeric,
            ))))
        }
        other => Ok(other),
    }
}

/// Intermediate outcome of converting one value.
pub enum Conv {
    Value(ResourceValue),
    /// `None`/unit: the entry is omitted.
    Null,
    /// A value with no representation at this position (e.g. a collection
    /// below the root): the entry is omitted.
    Skipped,
}

/// Serializer producing a [`Conv`]. `depth` is 0 for the value passed to
/// [`convert_value`] and grows by one for every container level below it.
#[derive(Clone, Copy)]
struct ValueSerializer {
    depth: usize,
}

impl ValueSerializer {
    fn scalar(self, scalar: Scalar) -> Result<Conv, ConvertError> {
        Ok(Conv::Value(ResourceValue::Scalar(scalar)))
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Conv;
    type Error = ConvertError;

    type SerializeSeq = SeqCollector;
    type SerializeTuple = SeqCollector;
    type SerializeTupleStruct = SeqCollector;
    type SerializeTupleVariant = SeqCollector;
    type SerializeMap = MapCollector;
    type SerializeStruct = StructCollector;
    type SerializeStructVariant = StructCollector;

    fn serialize_bool(self, v: bool) -> Result<Conv, ConvertError> {
        self.scalar(Scalar::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Conv, ConvertError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Conv, ConvertError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Conv, ConvertError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Conv, ConvertError> {
        self.scalar(Scalar::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Conv, ConvertError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Conv, ConvertError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Conv, ConvertError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Conv, ConvertError> {
        match i64::try_from(v) {
            Ok(v) => self.serialize_i64(v),
            Err(_) => self.scalar(Scalar::String(v.to_string())),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Conv, ConvertError> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Conv, ConvertError> {
        self.scalar(Scalar::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Conv, ConvertError> {
        self.scalar(Scalar::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Conv, ConvertError> {
        self.scalar(Scalar::String(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Conv, ConvertError> {
        tracing::debug!("dropping byte-string value during conversion");
        Ok(Conv::Skipped)
    }

    fn serialize_none(self) -> Result<Conv, ConvertError> {
        Ok(Conv::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Conv, ConvertError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Conv, ConvertError> {
        Ok(Conv::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Conv, ConvertError> {
        Ok(Conv::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Conv, ConvertError> {
        self.scalar(Scalar::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Conv, ConvertError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<Conv, ConvertError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SeqCollector, ConvertError> {
        Ok(SeqCollector::new(self.depth))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCollector, ConvertError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqCollector, ConvertError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        len: usize,
    ) -> Result<SeqCollector, ConvertError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapCollector, ConvertError> {
        Ok(MapCollector {
            depth: self.depth,
            data: ObjectData::new(),
            key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<StructCollector, ConvertError> {
        Ok(StructCollector {
            depth: self.depth,
            data: ObjectData::new(),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<StructCollector, ConvertError> {
        Ok(StructCollector {
            depth: self.depth,
            data: ObjectData::new(),
        })
    }
}

/// Collects sequence elements into a scalar list or an object list.
///
/// A sequence below the root is consumed in discard mode and resolves to
/// `Skipped` — the one-level rule.
pub struct SeqCollector {
    element_depth: usize,
    discard: bool,
    scalars: Vec<Scalar>,
    objects: Vec<ObjectData>,
    saw_object: bool,
    dropped: usize,
}

impl SeqCollector {
    fn new(depth: usize) -> Self {
        SeqCollector {
            element_depth: depth + 1,
            discard: depth > 0,
            scalars: Vec::new(),
            objects: Vec::new(),
            saw_object: false,
            dropped: 0,
        }
    }

    fn element<T>(&mut self, value: &T) -> Result<(), ConvertError>
    where
        T: Serialize + ?Sized,
    {
        if self.discard {
            return Ok(());
        }
        match value.serialize(ValueSerializer {
            depth: self.element_depth,
        })? {
            Conv::Value(ResourceValue::Scalar(s)) => self.scalars.push(s),
            Conv::Value(ResourceValue::Formatted(f)) => {
                self.scalars.push(Scalar::String(f.text().to_string()))
            }
            Conv::Value(ResourceValue::Object(o)) => {
                self.saw_object = true;
                self.objects.push(o);
            }
            Conv::Null => self.scalars.push(Scalar::Null),
            Conv::Value(_) | Conv::Skipped => self.dropped += 1,
        }
        Ok(())
    }

    fn finish(self) -> Result<Conv, ConvertError> {
        if self.discard {
            tracing::debug!("dropping collection nested below the conversion root");
            return Ok(Conv::Skipped);
        }
        if self.dropped > 0 {
            tracing::debug!(count = self.dropped, "dropped unconvertible list elements");
        }
        if self.saw_object {
            if !self.scalars.is_empty() {
                tracing::debug!(
                    count = self.scalars.len(),
                    "dropped scalar elements from an object list"
                );
            }
            Ok(Conv::Value(ResourceValue::ObjectList(self.objects)))
        } else {
            Ok(Conv::Value(ResourceValue::ScalarList(self.scalars)))
        }
    }
}

impl ser::SerializeSeq for SeqCollector {
    type Ok = Conv;
    type Error = ConvertError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), ConvertError>
    where
        T: Serialize + ?Sized,
    {
        self.element(value)
    }

    fn end(self) -> Result<Conv, ConvertError> {
        self.finish()
    }
}

impl ser::SerializeTuple for SeqCollector {
    type Ok = Conv;
    type Error = ConvertError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), ConvertError>
    where
        T: Serialize + ?Sized,
    {
        self.element(value)
    }

    fn end(self) -> Result<Conv, ConvertError> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SeqCollector {
    type Ok = Conv;
    type Error = ConvertError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), ConvertError>
    where
        T: Serialize + ?Sized,
    {
        self.element(value)
    }

    fn end(self) -> Result<Conv, ConvertError> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SeqCollector {
    type Ok = Conv;
    type Error = ConvertError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), ConvertError>
    where
        T: Serialize + ?Sized,
    {
        self.element(value)
    }

    fn end(self) -> Result<Conv, ConvertError> {
        self.finish()
    }
}

/// Collects struct fields into an [`ObjectData`]. Field keys are
/// camel-cased by the insert; `None` fields and dropped collections are
/// omitted.
pub struct StructCollector {
    depth: usize,
    data: ObjectData,
}

impl StructCollector {
    fn field<T>(&mut self, key: &str, value: &T) -> Result<(), ConvertError>
    where
        T: Serialize + ?Sized,
    {
        match value.serialize(ValueSerializer {
            depth: self.depth + 1,
        })? {
            Conv::Value(v) => self.data.insert(key, v),
            Conv::Null => {}
            Conv::Skipped => {
                tracing::debug!(field = key, "dropping collection-valued property");
            }
        }
        Ok(())
    }
}

impl ser::SerializeStruct for StructCollector {
    type Ok = Conv;
    type Error = ConvertError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), ConvertError>
    where
        T: Serialize + ?Sized,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Conv, ConvertError> {
        Ok(Conv::Value(ResourceValue::Object(self.data)))
    }
}

impl ser::SerializeStructVariant for StructCollector {
    type Ok = Conv;
    type Error = ConvertError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), ConvertError>
    where
        T: Serialize + ?Sized,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Conv, ConvertError> {
        Ok(Conv::Value(ResourceValue::Object(self.data)))
    }
}

/// Collects map entries into an [`ObjectData`]; keys must have a scalar
/// form.
pub struct MapCollector {
    depth: usize,
    data: ObjectData,
    key: Option<String>,
}

impl ser::SerializeMap for MapCollector {
    type Ok = Conv;
    type Error = ConvertError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), ConvertError>
    where
        T: Serialize + ?Sized,
    {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), ConvertError>
    where
        T: Serialize + ?Sized,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| ConvertError::Custom("map value without a key".to_string()))?;
        match value.serialize(ValueSerializer {
            depth: self.depth + 1,
        })? {
            Conv::Value(v) => self.data.insert(key, v),
            Conv::Null => {}
            Conv::Skipped => {
                tracing::debug!(field = %key, "dropping collection-valued entry");
            }
        }
        Ok(())
    }

    fn end(self) -> Result<Conv, ConvertError> {
        Ok(Conv::Value(ResourceValue::Object(self.data)))
    }
}

/// Renders map keys to strings; non-scalar keys are rejected.
struct KeySerializer;

impl KeySerializer {
    fn unsupported(kind: &str) -> ConvertError {
        ConvertError::UnsupportedKey(kind.to_string())
    }
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = ConvertError;

    type SerializeSeq = Impossible<String, ConvertError>;
    type SerializeTuple = Impossible<String, ConvertError>;
    type SerializeTupleStruct = Impossible<String, ConvertError>;
    type SerializeTupleVariant = Impossible<String, ConvertError>;
    type SerializeMap = Impossible<String, ConvertError>;
    type SerializeStruct = Impossible<String, ConvertError>;
    type SerializeStructVariant = Impossible<String, ConvertError>;

    fn serialize_bool(self, v: bool) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_f64(self, v: f64) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String, ConvertError> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, ConvertError> {
        Err(Self::unsupported("bytes"))
    }

    fn serialize_none(self) -> Result<String, ConvertError> {
        Err(Self::unsupported("none"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<String, ConvertError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String, ConvertError> {
        Err(Self::unsupported("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, ConvertError> {
        Err(Self::unsupported("unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, ConvertError> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, ConvertError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, ConvertError>
    where
        T: Serialize + ?Sized,
    {
        Err(Self::unsupported("newtype variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, ConvertError> {
        Err(Self::unsupported("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, ConvertError> {
        Err(Self::unsupported("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, ConvertError> {
        Err(Self::unsupported("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, ConvertError> {
        Err(Self::unsupported("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, ConvertError> {
        Err(Self::unsupported("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, ConvertError> {
        Err(Self::unsupported("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, ConvertError> {
        Err(Self::unsupported("struct variant"))
    }
}
