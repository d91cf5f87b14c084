//! Layout Drop Rules
//!
//! Pure helpers used when widgets are dropped or pasted into a layout:
//! filtering and remapping attributes, and choosing fresh widget IDs.

pub mod attributes;
pub mod ids;

pub use attributes::{
    parse_attributes, render_element, rewrite_attributes, AttributeName, RuleError,
    XmlAttribute, ANDROID_URI,
};
pub use ids::{remap_ids, unique_id};
