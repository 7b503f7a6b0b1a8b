//! The canonical resource data model.
//!
//! Resource state is an ordered mapping from camel-cased keys to
//! [`ResourceValue`]s. Values nest one of five shapes: a scalar, a scalar
//! rendered through a format pattern, a nested mapping, a list of scalars or
//! a list of mappings. The converter produces this model from arbitrary
//! `Serialize` values and both codecs consume it, so it is the single point
//! of truth for key casing and lookup semantics.

use std::fmt;

use indexmap::IndexMap;

use crate::error::DataError;
use crate::format::camel_case;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// True for `Int` and `Float`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Int(_) | Scalar::Float(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(v) => write!(f, "{}", if *v { "true" } else { "false" }),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::String(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(i64::from(v))
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Scalar::Int(i64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(v)
    }
}

/// A scalar rendered through an explicit format pattern.
///
/// Carries the rendered text plus a marker telling codecs whether the text
/// is a bare numeric token. The JSON codec emits numeric formatted values
/// unquoted so `5` formatted with `"0.00"` arrives on the wire as `5.00`;
/// XML has no such distinction and always writes the text.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedValue {
    text: String,
    numeric: bool,
}

impl FormattedValue {
    pub fn new(text: impl Into<String>, numeric: bool) -> Self {
        FormattedValue {
            text: text.into(),
            numeric,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
}

/// One value in a resource's data mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceValue {
    Scalar(Scalar),
    Formatted(FormattedValue),
    Object(ObjectData),
    ScalarList(Vec<Scalar>),
    ObjectList(Vec<ObjectData>),
}

impl ResourceValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ResourceValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectData> {
        match self {
            ResourceValue::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl From<Scalar> for ResourceValue {
    fn from(v: Scalar) -> Self {
        ResourceValue::Scalar(v)
    }
}

impl From<FormattedValue> for ResourceValue {
    fn from(v: FormattedValue) -> Self {
        ResourceValue::Formatted(v)
    }
}

impl From<ObjectData> for ResourceValue {
    fn from(v: ObjectData) -> Self {
        ResourceValue::Object(v)
    }
}

impl From<Vec<Scalar>> for ResourceValue {
    fn from(v: Vec<Scalar>) -> Self {
        ResourceValue::ScalarList(v)
    }
}

impl From<Vec<ObjectData>> for ResourceValue {
    fn from(v: Vec<ObjectData>) -> Self {
        ResourceValue::ObjectList(v)
    }
}

impl From<bool> for ResourceValue {
    fn from(v: bool) -> Self {
        ResourceValue::Scalar(v.into())
    }
}

impl From<i32> for ResourceValue {
    fn from(v: i32) -> Self {
        ResourceValue::Scalar(v.into())
    }
}

impl From<i64> for ResourceValue {
    fn from(v: i64) -> Self {
        ResourceValue::Scalar(v.into())
    }
}

impl From<u32> for ResourceValue {
    fn from(v: u32) -> Self {
        ResourceValue::Scalar(v.into())
    }
}

impl From<f64> for ResourceValue {
    fn from(v: f64) -> Self {
        ResourceValue::Scalar(v.into())
    }
}

impl From<&str> for ResourceValue {
    fn from(v: &str) -> Self {
        ResourceValue::Scalar(v.into())
    }
}

impl From<String> for ResourceValue {
    fn from(v: String) -> Self {
        ResourceValue::Scalar(v.into())
    }
}

/// An insertion-ordered mapping from camel-cased keys to values.
///
/// Keys are normalized to camelCase on insertion and are unique
/// case-insensitively: inserting under a key that already exists (in any
/// casing) replaces the stored value in place, keeping the original key and
/// position so serialization stays deterministic. Lookup is likewise
/// case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectData {
    entries: IndexMap<String, ResourceValue>,
}

impl ObjectData {
    pub fn new() -> Self {
        ObjectData::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a value under the camel-cased form of `key`, replacing any
    /// case-insensitive match in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ResourceValue>) {
        let key = camel_case(&key.into());
        let existing = self
            .entries
            .keys()
            .find(|k| k.eq_ignore_ascii_case(&key))
            .cloned();
        match existing {
            Some(k) => {
                self.entries.insert(k, value.into());
            }
            None => {
                self.entries.insert(key, value.into());
            }
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, key: &str) -> Option<&ResourceValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResourceValue)> {
        self.entries.iter()
    }

    /// Typed access: the stored scalar as text.
    ///
    /// Any scalar converts (numbers and booleans through their display
    /// form, null to the empty string); structured values fail with a
    /// coercion error.
    pub fn try_str(&self, key: &str) -> Result<String, DataError> {
        match self.scalar_for(key, "string")? {
            CoercionSource::Scalar(s) => Ok(s.to_string()),
            CoercionSource::Formatted(text) => Ok(text.to_string()),
        }
    }

    /// Typed access: the stored scalar as an integer.
    pub fn try_i64(&self, key: &str) -> Result<i64, DataError> {
        match self.scalar_for(key, "integer")? {
            CoercionSource::Scalar(Scalar::Int(v)) => Ok(*v),
            CoercionSource::Scalar(Scalar::Float(v)) if v.fract() == 0.0 => Ok(*v as i64),
            CoercionSource::Scalar(Scalar::String(s)) => {
                s.parse().map_err(|_| self.coercion(key, "integer"))
            }
            CoercionSource::Formatted(text) => {
                text.parse().map_err(|_| self.coercion(key, "integer"))
            }
            _ => Err(self.coercion(key, "integer")),
        }
    }

    /// Typed access: the stored scalar as a float.
    pub fn try_f64(&self, key: &str) -> Result<f64, DataError> {
        match self.scalar_for(key, "number")? {
            CoercionSource::Scalar(Scalar::Int(v)) => Ok(*v as f64),
            CoercionSource::Scalar(Scalar::Float(v)) => Ok(*v),
            CoercionSource::Scalar(Scalar::String(s)) => {
                s.parse().map_err(|_| self.coercion(key, "number"))
            }
            CoercionSource::Formatted(text) => {
                text.parse().map_err(|_| self.coercion(key, "number"))
            }
            _ => Err(self.coercion(key, "number")),
        }
    }

    /// Typed access: the stored scalar as a boolean.
    pub fn try_bool(&self, key: &str) -> Result<bool, DataError> {
        match self.scalar_for(key, "boolean")? {
            CoercionSource::Scalar(Scalar::Bool(v)) => Ok(*v),
            CoercionSource::Scalar(Scalar::String(s)) if s.eq_ignore_ascii_case("true") => Ok(true),
            CoercionSource::Scalar(Scalar::String(s)) if s.eq_ignore_ascii_case("false") => {
                Ok(false)
            }
            CoercionSource::Formatted(text) if text.eq_ignore_ascii_case("true") => Ok(true),
            CoercionSource::Formatted(text) if text.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(self.coercion(key, "boolean")),
        }
    }

    fn scalar_for(&self, key: &str, expected: &'static str) -> Result<CoercionSource<'_>, DataError> {
        match self.get(key) {
            None => Err(DataError::Missing {
                key: key.to_string(),
            }),
            Some(ResourceValue::Scalar(s)) => Ok(CoercionSource::Scalar(s)),
            Some(ResourceValue::Formatted(f)) => Ok(CoercionSource::Formatted(f.text())),
            Some(_) => Err(self.coercion(key, expected)),
        }
    }

    fn coercion(&self, key: &str, expected: &'static str) -> DataError {
        let value = match self.get(key) {
            Some(ResourceValue::Scalar(s)) => s.to_string(),
            Some(ResourceValue::Formatted(f)) => f.text().to_string(),
            Some(ResourceValue::Object(_)) => "<object>".to_string(),
            Some(ResourceValue::ScalarList(_)) | Some(ResourceValue::ObjectList(_)) => {
                "<list>".to_string()
            }
            None => String::new(),
        };
        DataError::Coercion {
            key: key.to_string(),
            expected,
            value,
        }
    }
}

enum CoercionSource<'a> {
    Scalar(&'a Scalar),
    Formatted(&'a str),
}

impl<'a> IntoIterator for &'a ObjectData {
    type Item = (&'a String, &'a ResourceValue);
    type IntoIter = indexmap::map::Iter<'a, String, ResourceValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
