//! XML serialization and deserialization for HAL resources.
//!
//! The XML dialect mirrors the JSON dialect with equivalent fidelity,
//! spelled with elements and attributes instead of `_links`/`_embedded`
//! keys.
//!
//! ## JSON ↔ XML Mapping
//!
//! | JSON Pattern | XML Pattern |
//! |--------------|-------------|
//! | `{"lastName": "Curie"}` | `<lastName>Curie</lastName>` |
//! | `"_links": {"self": {"href": "/u/1"}}` | `<resource rel="self" href="/u/1">` |
//! | `"_links": {"search": {"href": "..."}}` | `<link rel="search" href="..."/>` |
//! | `"parameters": {"lastName": {}}` | `<parameter name="lastName"/>` |
//! | `{"tags": ["a", "b"]}` | `<tags><value>a</value><value>b</value></tags>` |
//! | `"_embedded": {"address": {...}}` | `<resource rel="address">...</resource>` |
//!
//! XML carries no native scalar types: scalars are stringified on write and
//! read back with native-type inference. Shape decides the value kind on
//! read — an element whose children are all `<value>` wrappers (two or
//! more) is a list, so a one-element list does not survive an XML
//! round-trip; nor does the distinction between a single embedded resource
//! and a list of one, which JSON preserves.
//!
//! ## Examples
//!
//! ```ignore
//! use slysoft_hal::Resource;
//! use slysoft_hal_serde::xml::{from_xml_str, to_xml_string};
//!
//! let resource = Resource::new()
//!     .with_uri("/api/user/42")
//!     .with_data("lastName", "Curie");
//! let xml = to_xml_string(&resource)?;
//! let parsed = from_xml_str(&xml)?;
//! ```

pub mod de;
pub mod ser;
mod utils;

// Re-export serialization functions
pub use ser::{to_xml_string, to_xml_string_pretty, to_xml_vec, to_xml_writer};

// Re-export deserialization functions
pub use de::{from_xml_reader, from_xml_slice, from_xml_str};
