//! Element and attribute names of the XML HAL dialect.

/// Root element of every resource representation, embedded or not.
pub const RESOURCE_TAG: &str = "resource";

/// Link element name.
pub const LINK_TAG: &str = "link";

/// Wrapper element for list entries and allowed input-item values.
pub const VALUE_TAG: &str = "value";

pub const LIST_OF_VALUES_TAG: &str = "listOfValues";
pub const TYPE_TAG: &str = "type";
pub const DEFAULT_VALUE_TAG: &str = "defaultValue";

pub const REL_ATTR: &str = "rel";
pub const HREF_ATTR: &str = "href";
pub const VERB_ATTR: &str = "verb";
pub const TEMPLATED_ATTR: &str = "templated";
pub const TIMEOUT_ATTR: &str = "timeout";
pub const NAME_ATTR: &str = "name";

/// The rel marking the root element's own URI.
pub const SELF_REL: &str = "self";

/// Checks whether every child of an element is a `<value>` wrapper, which
/// is how lists are encoded. A single `<value>` child is not a list: it
/// parses as a nested object holding a `value` key.
pub fn is_value_list(child_names: &[&str]) -> bool {
    child_names.len() >= 2 && child_names.iter().all(|name| *name == VALUE_TAG)
}
