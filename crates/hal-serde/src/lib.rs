//! # HAL Resource Serialization Module
//!
//! This crate provides JSON and XML wire support for the resource model in
//! `slysoft-hal`.
//!
//! ## Features
//!
//! - **JSON Support**: hand-rolled walk between [`slysoft_hal::Resource`]
//!   and `serde_json::Value`, pretty-printed with a stable 2-space indent.
//!   Data keeps native JSON scalar types; numeric formatted values are
//!   emitted as raw tokens.
//! - **XML Support**: quick-xml based codec producing the `<resource>`
//!   dialect, behind the `xml` feature (enabled by default).
//!
//! Both directions are format-internally consistent: parsing a serialized
//! resource reconstructs the URI, the data mapping and the full link
//! metadata including input items; only formatting origin metadata is
//! lossy (the rendered text survives, the pattern does not).
//!
//! ## Wire Formats
//!
//! | Concern | JSON | XML |
//! |---------|------|-----|
//! | Self URI | `_links.self.href` | `rel="self" href` root attributes |
//! | Link | `_links.<name>` | `<link rel="<name>" ...>` |
//! | Input items | `parameters`/`fields` sub-object | `<parameter>`/`<field>` children |
//! | Embedded | `_embedded.<name>` | `<resource rel="<name>">` children |
//!
//! ## Examples
//!
//! ```ignore
//! use slysoft_hal::Resource;
//! use slysoft_hal_serde::{from_json_str, to_json_string};
//!
//! let resource = Resource::new()
//!     .with_data("stringValue", "abc")
//!     .with_data("intValue", 5);
//!
//! let json = to_json_string(&resource)?;
//! let parsed = from_json_str(&json)?;
//! ```

pub mod error;
pub mod json;

#[cfg(feature = "xml")]
pub mod xml;

// Re-export common types and functions
pub use error::{CodecError, Result};

// Re-export JSON functions at top level for convenience
pub use json::{from_json_slice, from_json_str, from_json_value, to_json_string, to_json_value};

#[cfg(feature = "xml")]
pub use xml::{from_xml_slice, from_xml_str, to_xml_string, to_xml_vec};

/// Vendor media type for the JSON dialect.
pub const HAL_JSON_MEDIA_TYPE: &str = "application/slysoft.hal+json";

/// Generic HAL JSON media type, accepted interchangeably.
pub const HAL_JSON_GENERIC_MEDIA_TYPE: &str = "application/hal+json";

/// Vendor media type for the XML dialect.
pub const HAL_XML_MEDIA_TYPE: &str = "application/slysoft.hal+xml";
