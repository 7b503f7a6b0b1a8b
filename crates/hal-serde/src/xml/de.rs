//! XML deserialization for HAL resources.
//!
//! Reads quick-xml events into a lightweight element tree and maps the tree
//! onto a [`Resource`]. The data side of the dialect is untyped, so element
//! shape decides the value kind: a leaf element is a scalar, an element
//! whose children are all `<value>` wrappers (two or more) is a list, and
//! anything else is a nested object. Scalar text is read back with
//! native-type inference since XML stringifies everything on the way out.

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use slysoft_hal::{FormattedValue, InputItem, Link, ObjectData, Resource, ResourceValue, Scalar, Verb};

use crate::error::{CodecError, Result};
use crate::xml::utils;

/// Deserialize a resource from an XML string.
///
/// # Examples
///
/// ```ignore
/// use slysoft_hal_serde::xml::from_xml_str;
///
/// let xml = r#"<?xml version="1.0"?>
/// <resource rel="self" href="/api/user/42">
///   <lastName>Curie</lastName>
/// </resource>"#;
/// let resource = from_xml_str(xml)?;
/// ```
pub fn from_xml_str(xml: &str) -> Result<Resource> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    parse_document(&mut reader)
}

/// Deserialize a resource from XML bytes.
pub fn from_xml_slice(xml: &[u8]) -> Result<Resource> {
    let xml = std::str::from_utf8(xml)
        .map_err(|e| CodecError::Custom(format!("Invalid UTF-8: {}", e)))?;
    from_xml_str(xml)
}

/// Deserialize a resource from an XML reader.
pub fn from_xml_reader<R: BufRead>(reader: R) -> Result<Resource> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.config_mut().trim_text(true);
    parse_document(&mut xml_reader)
}

fn parse_document<R: BufRead>(reader: &mut Reader<R>) -> Result<Resource> {
    let root = read_root(reader)?;
    if root.name != utils::RESOURCE_TAG {
        return Err(CodecError::Malformed(format!(
            "expected <{}> root element, found <{}>",
            utils::RESOURCE_TAG,
            root.name
        )));
    }
    resource_from_node(&root)
}

/// One element of the parsed document.
struct XmlNode {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<XmlNode>,
    text: String,
}

impl XmlNode {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }
}

fn node_from_start(start: &BytesStart<'_>) -> Result<XmlNode> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr =
            attr.map_err(|e| CodecError::Custom(format!("Failed to parse attribute: {}", e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| CodecError::Custom(format!("Failed to unescape attribute: {}", e)))?
            .into_owned();
        if !key.starts_with("xmlns") {
            attrs.push((key, value));
        }
    }
    Ok(XmlNode {
        name,
        attrs,
        children: Vec::new(),
        text: String::new(),
    })
}

/// Skips the prolog and reads the root element with all of its content.
fn read_root<R: BufRead>(reader: &mut Reader<R>) -> Result<XmlNode> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let node = node_from_start(e)?;
                return read_children(reader, node);
            }
            Event::Empty(ref e) => return node_from_start(e),
            Event::Eof => {
                return Err(CodecError::Malformed("document has no root element".to_string()));
            }
            Event::Text(ref t) => {
                if !t.as_ref().iter().all(u8::is_ascii_whitespace) {
                    return Err(CodecError::Malformed(
                        "unexpected text before the root element".to_string(),
                    ));
                }
            }
            // declaration, comments, processing instructions
            _ => {}
        }
    }
}

fn read_children<R: BufRead>(reader: &mut Reader<R>, mut node: XmlNode) -> Result<XmlNode> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let child = node_from_start(e)?;
                node.children.push(read_children(reader, child)?);
            }
            Event::Empty(ref e) => node.children.push(node_from_start(e)?),
            Event::Text(ref t) => {
                let text = t
                    .unescape()
                    .map_err(|e| CodecError::Custom(format!("Failed to unescape text: {}", e)))?;
                node.text.push_str(&text);
            }
            Event::CData(ref t) => {
                node.text.push_str(&String::from_utf8_lossy(t.as_ref()));
            }
            Event::End(_) => return Ok(node),
            Event::Eof => {
                return Err(CodecError::Malformed(format!(
                    "unexpected end of document inside <{}>",
                    node.name
                )));
            }
            _ => {}
        }
    }
}

fn resource_from_node(node: &XmlNode) -> Result<Resource> {
    let mut resource = Resource::new();
    if let Some(href) = node.attr(utils::HREF_ATTR) {
        resource = resource.with_uri(href);
    }
    for child in &node.children {
        match child.name.as_str() {
            utils::LINK_TAG => resource = resource.with_link(link_from_node(child)),
            utils::RESOURCE_TAG => {
                let rel = child.attr(utils::REL_ATTR).unwrap_or_default().to_string();
                resource = resource.with_embedded(rel, resource_from_node(child)?);
            }
            _ => resource = resource.with_data(child.name.clone(), data_from_node(child)),
        }
    }
    Ok(resource)
}

fn data_from_node(node: &XmlNode) -> ResourceValue {
    if node.children.is_empty() {
        return leaf_value(&node.text);
    }
    if utils::is_value_list(&node.child_names()) {
        if node.children.iter().any(|c| !c.children.is_empty()) {
            return ResourceValue::ObjectList(
                node.children.iter().map(object_from_children).collect(),
            );
        }
        return ResourceValue::ScalarList(
            node.children.iter().map(|c| infer_scalar(&c.text)).collect(),
        );
    }
    ResourceValue::Object(object_from_children(node))
}

fn object_from_children(node: &XmlNode) -> ObjectData {
    let mut data = ObjectData::new();
    for child in &node.children {
        data.insert(child.name.clone(), data_from_node(child));
    }
    data
}

/// Scalar text with native-type inference, plus recovery of formatted
/// numeric renderings: text that parses as a number but is not the
/// canonical rendering (`5.50`) comes back as a numeric formatted value so
/// it re-serializes verbatim in both dialects.
fn leaf_value(text: &str) -> ResourceValue {
    let scalar = infer_scalar(text);
    if let Scalar::String(s) = &scalar {
        if !s.is_empty() && serde_json::from_str::<serde_json::Number>(s).is_ok() {
            return ResourceValue::Formatted(FormattedValue::new(s.clone(), true));
        }
    }
    ResourceValue::Scalar(scalar)
}

/// Infers the native type of scalar text. Only canonical renderings
/// convert, so `"007"` stays a string while `"7"` becomes an integer.
fn infer_scalar(text: &str) -> Scalar {
    if text.is_empty() {
        return Scalar::String(String::new());
    }
    if text == "true" {
        return Scalar::Bool(true);
    }
    if text == "false" {
        return Scalar::Bool(false);
    }
    if let Ok(v) = text.parse::<i64>() {
        if v.to_string() == text {
            return Scalar::Int(v);
        }
    }
    if let Ok(v) = text.parse::<f64>() {
        if v.is_finite() && v.to_string() == text {
            return Scalar::Float(v);
        }
    }
    Scalar::String(text.to_string())
}

fn link_from_node(node: &XmlNode) -> Link {
    let name = node.attr(utils::REL_ATTR).unwrap_or_default();
    let href = node.attr(utils::HREF_ATTR).unwrap_or_default();
    let mut link = Link::new(name, href);
    if node.attr(utils::TEMPLATED_ATTR) == Some("true") {
        link = link.templated();
    }
    if let Some(verb) = node.attr(utils::VERB_ATTR).and_then(Verb::parse) {
        link = link.with_verb(verb);
    }
    if let Some(timeout) = node
        .attr(utils::TIMEOUT_ATTR)
        .and_then(|t| t.parse::<u32>().ok())
    {
        link = link.with_timeout(timeout);
    }
    for child in &node.children {
        if child.name == "parameter" || child.name == "field" {
            link = link.with_item(item_from_node(child));
        } else {
            tracing::debug!(element = %child.name, "skipping unknown link child element");
        }
    }
    link
}

fn item_from_node(node: &XmlNode) -> InputItem {
    let mut item = InputItem::new(node.attr(utils::NAME_ATTR).unwrap_or_default());
    for child in &node.children {
        match child.name.as_str() {
            utils::TYPE_TAG => item = item.with_type(child.text.clone()),
            utils::DEFAULT_VALUE_TAG => item = item.with_default(child.text.clone()),
            utils::LIST_OF_VALUES_TAG => {
                item = item.with_values(
                    child
                        .children
                        .iter()
                        .filter(|c| c.name == utils::VALUE_TAG)
                        .map(|c| c.text.clone()),
                );
            }
            _ => tracing::debug!(element = %child.name, "skipping unknown input item child"),
        }
    }
    item
}
