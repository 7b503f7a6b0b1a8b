//! # HAL Resource Model
//!
//! This crate provides the in-memory model for HAL-style REST resource
//! representations: the canonical data mapping, links with typed input
//! items, embedded sub-resources, and the generic converter that turns
//! arbitrary `Serialize` values into resource data.
//!
//! ## Building a resource
//!
//! ```ignore
//! use slysoft_hal::{InputItem, Link, Resource, Verb};
//!
//! let resource = Resource::new()
//!     .with_uri("/api/user/42")
//!     .with_data("lastName", "Curie")
//!     .with_data("yearOfBirth", 1867)
//!     .with_link(
//!         Link::new("search", "/api/user")
//!             .with_item(InputItem::new("lastName"))
//!             .with_item(InputItem::new("firstName")),
//!     )
//!     .with_embedded("address", Resource::new().with_data("city", "Paris"));
//! ```
//!
//! ## Converting arbitrary values
//!
//! ```ignore
//! use serde::Serialize;
//! use slysoft_hal::convert_value;
//!
//! #[derive(Serialize)]
//! struct User {
//!     last_name: String,
//!     year_of_birth: u32,
//! }
//!
//! let data = convert_value(&User {
//!     last_name: "Curie".into(),
//!     year_of_birth: 1867,
//! })?;
//! ```
//!
//! Conversion follows a one-level rule for collections: a list passed to
//! the converter is converted element by element, but list-valued
//! properties of an already-converted object are dropped. See the
//! [`convert`] module for details.
//!
//! Serialization to and from the JSON and XML wire dialects lives in the
//! `slysoft-hal-serde` crate.

pub mod convert;
pub mod data;
pub mod error;
pub mod format;
pub mod link;
pub mod resource;

pub use convert::{convert_value, convert_value_with_format};
pub use data::{FormattedValue, ObjectData, ResourceValue, Scalar};
pub use error::{ConvertError, DataError};
pub use format::camel_case;
pub use link::{InputItem, Link, Verb};
pub use resource::{Embedded, Resource};
