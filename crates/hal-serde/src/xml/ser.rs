//! XML serialization for HAL resources.
//!
//! Writes quick-xml events directly while walking the resource: data
//! entries become child elements of the `<resource>` root, links become
//! `<link>` elements and embedded resources nest as further `<resource>`
//! elements. XML has no native scalar types, so every scalar is written as
//! its textual form.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use slysoft_hal::{Embedded, InputItem, Link, ObjectData, Resource, ResourceValue, Verb};

use crate::error::{CodecError, Result};
use crate::xml::utils;

/// Serialize a resource to an XML string.
///
/// # Examples
///
/// ```ignore
/// use slysoft_hal::Resource;
/// use slysoft_hal_serde::xml::to_xml_string;
///
/// let resource = Resource::new().with_uri("/api/user/42");
/// let xml = to_xml_string(&resource)?;
/// ```
pub fn to_xml_string(resource: &Resource) -> Result<String> {
    let mut buffer = Vec::new();
    to_xml_writer(resource, &mut buffer)?;
    Ok(String::from_utf8(buffer).map_err(|e| CodecError::Custom(e.to_string()))?)
}

/// Serialize a resource to an XML string with 2-space indentation.
pub fn to_xml_string_pretty(resource: &Resource) -> Result<String> {
    let mut buffer = Vec::new();
    let mut writer = Writer::new_with_indent(&mut buffer, b' ', 2);
    write_document(&mut writer, resource)?;
    Ok(String::from_utf8(buffer).map_err(|e| CodecError::Custom(e.to_string()))?)
}

/// Serialize a resource to an XML byte vector.
pub fn to_xml_vec(resource: &Resource) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_xml_writer(resource, &mut buffer)?;
    Ok(buffer)
}

/// Serialize a resource to an XML writer.
pub fn to_xml_writer<W>(resource: &Resource, writer: W) -> Result<()>
where
    W: Write,
{
    let mut writer = Writer::new(writer);
    write_document(&mut writer, resource)
}

fn write_document<W: Write>(writer: &mut Writer<W>, resource: &Resource) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_resource(writer, resource, None)
}

/// Writes one `<resource>` element. The root carries `rel="self"` when the
/// resource has a URI; embedded resources carry the rel they are embedded
/// under.
fn write_resource<W: Write>(
    writer: &mut Writer<W>,
    resource: &Resource,
    rel: Option<&str>,
) -> Result<()> {
    let mut element = BytesStart::new(utils::RESOURCE_TAG);
    match rel {
        None => {
            if !resource.uri().is_empty() {
                element.push_attribute((utils::REL_ATTR, utils::SELF_REL));
                element.push_attribute((utils::HREF_ATTR, resource.uri()));
            }
        }
        Some(rel) => {
            element.push_attribute((utils::REL_ATTR, rel));
            if !resource.uri().is_empty() {
                element.push_attribute((utils::HREF_ATTR, resource.uri()));
            }
        }
    }

    let empty =
        resource.data().is_empty() && resource.links().is_empty() && !resource.has_embedded();
    if empty {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }

    writer.write_event(Event::Start(element))?;

    for (key, value) in resource.data().iter() {
        write_data_value(writer, key, value)?;
    }
    for link in resource.links() {
        write_link(writer, link)?;
    }
    for (name, entry) in resource.embedded() {
        match entry {
            Embedded::Single(r) => write_resource(writer, r, Some(name))?,
            Embedded::Many(rs) => {
                for r in rs {
                    write_resource(writer, r, Some(name))?;
                }
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new(utils::RESOURCE_TAG)))?;
    Ok(())
}

fn write_data_value<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &ResourceValue,
) -> Result<()> {
    match value {
        ResourceValue::Scalar(scalar) => write_text_element(writer, name, &scalar.to_string()),
        ResourceValue::Formatted(formatted) => write_text_element(writer, name, formatted.text()),
        ResourceValue::Object(object) => write_object_element(writer, name, object),
        ResourceValue::ScalarList(items) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            for item in items {
                write_text_element(writer, utils::VALUE_TAG, &item.to_string())?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
            Ok(())
        }
        ResourceValue::ObjectList(items) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            for item in items {
                write_object_element(writer, utils::VALUE_TAG, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
            Ok(())
        }
    }
}

fn write_object_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    object: &ObjectData,
) -> Result<()> {
    if object.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    for (key, value) in object.iter() {
        write_data_value(writer, key, value)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_link<W: Write>(writer: &mut Writer<W>, link: &Link) -> Result<()> {
    let timeout = link.timeout().to_string();
    let mut element = BytesStart::new(utils::LINK_TAG);
    element.push_attribute((utils::REL_ATTR, link.name()));
    element.push_attribute((utils::HREF_ATTR, link.href()));
    if link.is_templated() {
        element.push_attribute((utils::TEMPLATED_ATTR, "true"));
    }
    if link.verb() != Verb::Get {
        element.push_attribute((utils::VERB_ATTR, link.verb().as_str()));
    }
    if link.timeout() != 0 {
        element.push_attribute((utils::TIMEOUT_ATTR, timeout.as_str()));
    }

    if link.input_items().is_empty() {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }

    writer.write_event(Event::Start(element))?;
    for item in link.input_items() {
        write_input_item(writer, link.input_item_label(), item)?;
    }
    writer.write_event(Event::End(BytesEnd::new(utils::LINK_TAG)))?;
    Ok(())
}

fn write_input_item<W: Write>(
    writer: &mut Writer<W>,
    label: &str,
    item: &InputItem,
) -> Result<()> {
    let mut element = BytesStart::new(label);
    element.push_attribute((utils::NAME_ATTR, item.name()));

    let empty = item.type_hint().is_none()
        && item.default_value().is_none()
        && item.list_of_values().is_empty();
    if empty {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }

    writer.write_event(Event::Start(element))?;
    if let Some(type_hint) = item.type_hint() {
        write_text_element(writer, utils::TYPE_TAG, type_hint)?;
    }
    if let Some(default_value) = item.default_value() {
        write_text_element(writer, utils::DEFAULT_VALUE_TAG, default_value)?;
    }
    if !item.list_of_values().is_empty() {
        writer.write_event(Event::Start(BytesStart::new(utils::LIST_OF_VALUES_TAG)))?;
        for value in item.list_of_values() {
            write_text_element(writer, utils::VALUE_TAG, value)?;
        }
        writer.write_event(Event::End(BytesEnd::new(utils::LIST_OF_VALUES_TAG)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(label)))?;
    Ok(())
}
