//! JSON codec for HAL resources.
//!
//! Serializes a [`Resource`] to the JSON HAL dialect and parses it back.
//! Data entries keep their native JSON scalar types, links live under
//! `_links` (the self URI as `_links.self.href`), and embedded resources
//! under `_embedded`. Output is pretty-printed with a stable 2-space
//! indent so representations can be compared as strings.
use serde_json::{Map, Number, Value};
use slysoft_hal::{
    Embedded, FormattedValue, InputItem, Link, ObjectData, Resource, ResourceValue, Scalar, Verb,
};

use crate::error::{CodecError, Result};

/// Serialize a resource to a pretty-printed JSON string.
///
/// # Examples
///
/// ```ignore
/// use slysoft_hal::Resource;
/// use slysoft_hal_serde::json::to_json_string;
///
/// let resource = Resource::new().with_data("stringValue", "abc");
/// let json = to_json_string(&resource)?;
/// ```
pub fn to_json_string(resource: &Resource) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_json_value(resource))?)
}

/// Serialize a resource to a `serde_json::Value`.
pub fn to_json_value(resource: &Resource) -> Value {
    let mut root = Map::new();

    for (key, value) in resource.data().iter() {
        root.insert(key.clone(), data_to_value(value));
    }

    let mut links = Map::new();
    if !resource.uri().is_empty() {
        let mut self_link = Map::new();
        self_link.insert("href".to_string(), Value::String(resource.uri().to_string()));
        links.insert("self".to_string(), Value::Object(self_link));
    }
    for link in resource.links() {
        links.insert(link.name().to_string(), link_to_value(link));
    }
    if !links.is_empty() {
        root.insert("_links".to_string(), Value::Object(links));
    }

    if resource.has_embedded() {
        let mut embedded = Map::new();
        for (name, entry) in resource.embedded() {
            let value = match entry {
                Embedded::Single(r) => to_json_value(r),
                Embedded::Many(rs) => Value::Array(rs.iter().map(to_json_value).collect()),
            };
            embedded.insert(name.to_string(), value);
        }
        root.insert("_embedded".to_string(), Value::Object(embedded));
    }

    Value::Object(root)
}

/// Deserialize a resource from a JSON string.
///
/// # Examples
///
/// ```ignore
/// use slysoft_hal_serde::json::from_json_str;
///
/// let resource = from_json_str(r#"{"stringValue": "abc"}"#)?;
/// ```
pub fn from_json_str(s: &str) -> Result<Resource> {
    from_json_value(serde_json::from_str(s)?)
}

/// Deserialize a resource from a JSON byte slice.
pub fn from_json_slice(v: &[u8]) -> Result<Resource> {
    from_json_value(serde_json::from_slice(v)?)
}

/// Deserialize a resource from a `serde_json::Value`.
///
/// The top-level value must be an object; `_links` and `_embedded` populate
/// the link list and embedded resources, every other key populates data.
pub fn from_json_value(value: Value) -> Result<Resource> {
    let Value::Object(entries) = value else {
        return Err(CodecError::Malformed(
            "top-level JSON value must be an object".to_string(),
        ));
    };

    let mut resource = Resource::new();
    for (key, value) in entries {
        match key.as_str() {
            "_links" => resource = read_links(resource, value),
            "_embedded" => resource = read_embedded(resource, value)?,
            _ => resource = resource.with_data(key, value_to_data(&value)),
        }
    }
    Ok(resource)
}

fn data_to_value(value: &ResourceValue) -> Value {
    match value {
        ResourceValue::Scalar(s) => scalar_to_value(s),
        ResourceValue::Formatted(f) => formatted_to_value(f),
        ResourceValue::Object(o) => object_to_value(o),
        ResourceValue::ScalarList(items) => {
            Value::Array(items.iter().map(scalar_to_value).collect())
        }
        ResourceValue::ObjectList(items) => {
            Value::Array(items.iter().map(object_to_value).collect())
        }
    }
}

fn object_to_value(data: &ObjectData) -> Value {
    let mut map = Map::new();
    for (key, value) in data.iter() {
        map.insert(key.clone(), data_to_value(value));
    }
    Value::Object(map)
}

fn scalar_to_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Null => Value::Null,
        Scalar::Bool(v) => Value::Bool(*v),
        Scalar::Int(v) => Value::Number(Number::from(*v)),
        Scalar::Float(v) => Number::from_f64(*v).map(Value::Number).unwrap_or(Value::Null),
        Scalar::String(v) => Value::String(v.clone()),
    }
}

/// Numeric formatted values are inserted as raw number tokens so the
/// rendered text survives on the wire unquoted; anything that is not a
/// valid JSON number literal falls back to a quoted string.
fn formatted_to_value(formatted: &FormattedValue) -> Value {
    if formatted.is_numeric() {
        if let Ok(number) = serde_json::from_str::<Number>(formatted.text()) {
            return Value::Number(number);
        }
    }
    Value::String(formatted.text().to_string())
}

fn link_to_value(link: &Link) -> Value {
    let mut fields = Map::new();
    fields.insert("href".to_string(), Value::String(link.href().to_string()));
    if link.is_templated() {
        fields.insert("templated".to_string(), Value::Bool(true));
    }
    if link.verb() != Verb::Get {
        fields.insert(
            "verb".to_string(),
            Value::String(link.verb().as_str().to_string()),
        );
    }
    if link.timeout() != 0 {
        fields.insert(
            "timeout".to_string(),
            Value::Number(Number::from(link.timeout())),
        );
    }
    if !link.input_items().is_empty() {
        let mut items = Map::new();
        for item in link.input_items() {
            items.insert(item.name().to_string(), item_to_value(item));
        }
        fields.insert(format!("{}s", link.input_item_label()), Value::Object(items));
    }
    Value::Object(fields)
}

fn item_to_value(item: &InputItem) -> Value {
    let mut fields = Map::new();
    if let Some(type_hint) = item.type_hint() {
        fields.insert("type".to_string(), Value::String(type_hint.to_string()));
    }
    if let Some(default_value) = item.default_value() {
        fields.insert(
            "defaultValue".to_string(),
            Value::String(default_value.to_string()),
        );
    }
    if !item.list_of_values().is_empty() {
        fields.insert(
            "listOfValues".to_string(),
            Value::Array(
                item.list_of_values()
                    .iter()
                    .map(|v| Value::String(v.clone()))
                    .collect(),
            ),
        );
    }
    Value::Object(fields)
}

fn read_links(mut resource: Resource, value: Value) -> Resource {
    let Value::Object(entries) = value else {
        tracing::debug!("_links is not an object; ignoring");
        return resource;
    };
    for (name, entry) in entries {
        let Value::Object(fields) = entry else {
            tracing::debug!(link = %name, "skipping non-object link entry");
            continue;
        };
        if name == "self" {
            if let Some(href) = fields.get("href").and_then(Value::as_str) {
                resource = resource.with_uri(href);
            }
            continue;
        }
        resource = resource.with_link(read_link(&name, &fields));
    }
    resource
}

fn read_link(name: &str, fields: &Map<String, Value>) -> Link {
    let href = fields.get("href").and_then(Value::as_str).unwrap_or_default();
    let mut link = Link::new(name, href);
    if fields
        .get("templated")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        link = link.templated();
    }
    if let Some(verb) = fields
        .get("verb")
        .and_then(Value::as_str)
        .and_then(Verb::parse)
    {
        link = link.with_verb(verb);
    }
    if let Some(timeout) = fields.get("timeout").and_then(Value::as_u64) {
        link = link.with_timeout(timeout.min(u64::from(u32::MAX)) as u32);
    }
    if let Some(Value::Object(items)) = fields
        .get("parameters")
        .or_else(|| fields.get("fields"))
    {
        for (item_name, item_value) in items {
            link = link.with_item(read_item(item_name, item_value));
        }
    }
    link
}

fn read_item(name: &str, value: &Value) -> InputItem {
    let mut item = InputItem::new(name);
    let Value::Object(fields) = value else {
        return item;
    };
    if let Some(type_hint) = fields.get("type").and_then(text_of) {
        item = item.with_type(type_hint);
    }
    if let Some(default_value) = fields.get("defaultValue").and_then(text_of) {
        item = item.with_default(default_value);
    }
    if let Some(Value::Array(values)) = fields.get("listOfValues") {
        item = item.with_values(values.iter().filter_map(text_of));
    }
    item
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn read_embedded(mut resource: Resource, value: Value) -> Result<Resource> {
    let Value::Object(entries) = value else {
        tracing::debug!("_embedded is not an object; ignoring");
        return Ok(resource);
    };
    for (name, entry) in entries {
        match entry {
            Value::Object(_) => {
                resource = resource.with_embedded(name, from_json_value(entry)?);
            }
            Value::Array(items) => {
                let mut resources = Vec::with_capacity(items.len());
                for item in items {
                    resources.push(from_json_value(item)?);
                }
                resource = resource.with_embedded_list(name, resources);
            }
            _ => tracing::debug!(name = %name, "skipping non-object embedded entry"),
        }
    }
    Ok(resource)
}

fn value_to_data(value: &Value) -> ResourceValue {
    match value {
        Value::Null => ResourceValue::Scalar(Scalar::Null),
        Value::Bool(v) => ResourceValue::Scalar(Scalar::Bool(*v)),
        Value::Number(n) => number_to_data(n),
        Value::String(s) => ResourceValue::Scalar(Scalar::String(s.clone())),
        Value::Object(map) => ResourceValue::Object(map_to_data(map)),
        Value::Array(items) => array_to_data(items),
    }
}

/// Numbers whose literal matches the canonical integer/float rendering come
/// back as native scalars. A non-canonical literal (`5.00`) is the output
/// of a formatted value: keep the rendered text and mark it numeric so it
/// re-serializes verbatim.
fn number_to_data(number: &Number) -> ResourceValue {
    let literal = number.to_string();
    if let Some(v) = number.as_i64() {
        if v.to_string() == literal {
            return ResourceValue::Scalar(Scalar::Int(v));
        }
    }
    if let Some(v) = number.as_f64() {
        // compare against the literal the serializer would produce for this
        // float, so canonically-rendered floats round-trip as floats
        if let Some(reserialized) = Number::from_f64(v) {
            if reserialized.to_string() == literal {
                return ResourceValue::Scalar(Scalar::Float(v));
            }
        }
    }
    ResourceValue::Formatted(FormattedValue::new(literal, true))
}

fn map_to_data(map: &Map<String, Value>) -> ObjectData {
    let mut data = ObjectData::new();
    for (key, value) in map {
        data.insert(key.clone(), value_to_data(value));
    }
    data
}

fn array_to_data(items: &[Value]) -> ResourceValue {
    if !items.is_empty() && items.iter().all(Value::is_object) {
        return ResourceValue::ObjectList(
            items
                .iter()
                .filter_map(Value::as_object)
                .map(map_to_data)
                .collect(),
        );
    }
    let scalars: Vec<Scalar> = items.iter().filter_map(value_to_scalar).collect();
    if scalars.len() < items.len() {
        tracing::debug!(
            count = items.len() - scalars.len(),
            "skipping non-scalar elements of a mixed array"
        );
    }
    ResourceValue::ScalarList(scalars)
}

fn value_to_scalar(value: &Value) -> Option<Scalar> {
    match value {
        Value::Null => Some(Scalar::Null),
        Value::Bool(v) => Some(Scalar::Bool(*v)),
        Value::Number(n) => Some(match n.as_i64() {
            Some(v) => Scalar::Int(v),
            None => match n.as_f64() {
                Some(v) => Scalar::Float(v),
                None => Scalar::String(n.to_string()),
            },
        }),
        Value::String(s) => Some(Scalar::String(s.clone())),
        _ => None,
    }
}
