//! The resource aggregate and its fluent builder surface.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

use crate::convert::convert_value;
use crate::data::{FormattedValue, ObjectData, ResourceValue, Scalar};
use crate::error::ConvertError;
use crate::format::{self, camel_case};
use crate::link::Link;

/// A resource embedded under a name: a single sub-resource or a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Embedded {
    Single(Resource),
    Many(Vec<Resource>),
}

impl Embedded {
    /// The embedded resources regardless of arity.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        match self {
            Embedded::Single(r) => std::slice::from_ref(r).iter(),
            Embedded::Many(rs) => rs.iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Embedded::Single(_) => 1,
            Embedded::Many(rs) => rs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The aggregate handed to the codecs: URI, data mapping, links and
/// embedded sub-resources.
///
/// A resource starts empty and is shaped through chained builder calls;
/// once built it behaves as a plain value (`Clone`, structural equality, no
/// interior mutability). Codecs never mutate their serialization input and
/// always construct a fresh resource when parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    uri: String,
    data: ObjectData,
    links: Vec<Link>,
    embedded: IndexMap<String, Embedded>,
}

impl Resource {
    pub fn new() -> Self {
        Resource::default()
    }

    /// Sets the self URI. An empty string means no self link.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Adds one data entry; the key is camel-cased and replaces any
    /// case-insensitive match.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<ResourceValue>) -> Self {
        self.data.insert(key, value);
        self
    }

    /// Adds a scalar rendered through a format pattern (see the converter
    /// module for the pattern syntax).
    pub fn with_formatted_data(
        mut self,
        key: impl Into<String>,
        value: impl Into<Scalar>,
        pattern: &str,
    ) -> Self {
        let scalar = value.into();
        let (text, numeric) = format::apply_format(pattern, &scalar);
        self.data.insert(key, FormattedValue::new(text, numeric));
        self
    }

    /// Converts an arbitrary `Serialize` value and stores the result.
    /// A value that converts to nothing (e.g. `None`) leaves the resource
    /// unchanged.
    pub fn with_converted_data<T>(mut self, key: impl Into<String>, value: &T) -> Result<Self, ConvertError>
    where
        T: Serialize + ?Sized,
    {
        if let Some(converted) = convert_value(value)? {
            self.data.insert(key, converted);
        }
        Ok(self)
    }

    /// Adds a link; a link whose name matches an existing one
    /// (case-insensitively) replaces it in place.
    pub fn with_link(mut self, link: Link) -> Self {
        match self
            .links
            .iter()
            .position(|l| l.name().eq_ignore_ascii_case(link.name()))
        {
            Some(i) => self.links[i] = link,
            None => self.links.push(link),
        }
        self
    }

    /// Embeds a resource under a camel-cased name. Embedding a second
    /// resource under the same name turns the entry into a list.
    pub fn with_embedded(mut self, name: impl Into<String>, resource: Resource) -> Self {
        let name = camel_case(&name.into());
        match self.embedded.entry(name) {
            Entry::Vacant(entry) => {
                entry.insert(Embedded::Single(resource));
            }
            Entry::Occupied(mut entry) => {
                // upgrade in place so the entry keeps its position
                let current = std::mem::replace(entry.get_mut(), Embedded::Many(Vec::new()));
                *entry.get_mut() = match current {
                    Embedded::Single(first) => Embedded::Many(vec![first, resource]),
                    Embedded::Many(mut rs) => {
                        rs.push(resource);
                        Embedded::Many(rs)
                    }
                };
            }
        }
        self
    }

    /// Embeds a list of resources under a camel-cased name, replacing any
    /// existing entry.
    pub fn with_embedded_list(mut self, name: impl Into<String>, resources: Vec<Resource>) -> Self {
        self.embedded
            .insert(camel_case(&name.into()), Embedded::Many(resources));
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn data(&self) -> &ObjectData {
        &self.data
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Case-insensitive link lookup.
    pub fn find_link(&self, name: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.name().eq_ignore_ascii_case(name))
    }

    pub fn embedded(&self) -> impl Iterator<Item = (&str, &Embedded)> {
        self.embedded.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn has_embedded(&self) -> bool {
        !self.embedded.is_empty()
    }

    /// Case-insensitive embedded lookup.
    pub fn find_embedded(&self, name: &str) -> Option<&Embedded> {
        self.embedded
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::Verb;

    #[test]
    fn test_builder_chain() {
        let resource = Resource::new()
            .with_uri("/api/user/42")
            .with_data("name", "Ada")
            .with_data("age", 36)
            .with_link(Link::new("update", "/api/user/42").with_verb(Verb::Put));

        assert_eq!(resource.uri(), "/api/user/42");
        assert_eq!(resource.data().try_str("name").unwrap(), "Ada");
        assert_eq!(resource.find_link("update").unwrap().verb(), Verb::Put);
    }

    #[test]
    fn test_link_names_unique_case_insensitively() {
        let resource = Resource::new()
            .with_link(Link::new("search", "/old"))
            .with_link(Link::new("Search", "/new"));

        assert_eq!(resource.links().len(), 1);
        assert_eq!(resource.find_link("SEARCH").unwrap().href(), "/new");
    }

    #[test]
    fn test_embedding_twice_upgrades_to_list() {
        let resource = Resource::new()
            .with_embedded("address", Resource::new().with_data("city", "Paris"))
            .with_embedded("address", Resource::new().with_data("city", "Lyon"));

        match resource.find_embedded("address").unwrap() {
            Embedded::Many(rs) => assert_eq!(rs.len(), 2),
            Embedded::Single(_) => panic!("expected a list"),
        }
    }

    #[test]
    fn test_embedded_names_are_camel_cased() {
        let resource = Resource::new().with_embedded("Address", Resource::new());
        assert!(resource.embedded().map(|(n, _)| n).eq(["address"]));
    }
}
