//! Resource XML Parser
//!
//! Extracts the resources declared by `values` files and the `@+id/`
//! declarations found in layout and menu files.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::trace;

use r_droid_res_core::ResError;

use crate::repository::DeclaredResource;
use crate::resource_type::ResourceType;

/// Parser errors
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),
    #[error("Unknown resource type '{0}'")]
    UnknownType(String),
}

impl From<ParseError> for ResError {
    fn from(err: ParseError) -> Self {
        ResError::Xml(err.to_string())
    }
}

const ID_PREFIX: &str = "@+id/";

/// Resource XML parser
pub struct ResourceParser;

impl ResourceParser {
    /// Parse the resources declared by a `values` XML file
    ///
    /// Only direct children of `<resources>` declare resources, plus the
    /// `<attr>` definitions nested in `<declare-styleable>`.
    pub fn parse_values(xml: &str) -> Result<Vec<DeclaredResource>, ParseError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut resources = Vec::new();
        let mut depth = 0usize;
        let mut in_resources = false;
        let mut in_styleable = false;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    depth += 1;
                    if depth == 1 {
                        in_resources = e.name().as_ref() == b"resources";
                    } else if in_resources {
                        if depth == 2 && e.name().as_ref() == b"declare-styleable" {
                            in_styleable = true;
                        }
                        Self::declare(e, depth, in_styleable, &mut resources)?;
                    }
                }
                Event::Empty(ref e) => {
                    if in_resources {
                        Self::declare(e, depth + 1, in_styleable, &mut resources)?;
                    }
                }
                Event::End(ref e) => {
                    if depth == 2 && e.name().as_ref() == b"declare-styleable" {
                        in_styleable = false;
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(resources)
    }

    fn declare(
        e: &BytesStart,
        depth: usize,
        in_styleable: bool,
        resources: &mut Vec<DeclaredResource>,
    ) -> Result<(), ParseError> {
        let tag = e.name();
        let tag = String::from_utf8_lossy(tag.as_ref());

        let resource_type = match depth {
            2 if tag == "item" => match Self::get_attr(e, "type") {
                Some(type_name) => Some(
                    ResourceType::from_name(&type_name)
                        .ok_or(ParseError::UnknownType(type_name))?,
                ),
                None => None,
            },
            2 => ResourceType::from_value_tag(&tag),
            3 if in_styleable && tag == "attr" => Some(ResourceType::Attr),
            _ => None,
        };

        if let (Some(resource_type), Some(name)) = (resource_type, Self::get_attr(e, "name")) {
            // `android:` attributes reuse framework definitions.
            if !name.contains(':') {
                trace!("Declared {}/{}", resource_type, name);
                resources.push(DeclaredResource::new(resource_type, name));
            }
        }
        Ok(())
    }

    /// Collect the IDs declared with `@+id/name` anywhere in a file
    pub fn parse_inline_ids(xml: &str) -> Result<Vec<DeclaredResource>, ParseError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut ids = Vec::new();
        loop {
            match reader.read_event()? {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    for attr in e.attributes().filter_map(|a| a.ok()) {
                        let Ok(value) = std::str::from_utf8(&attr.value) else {
                            continue;
                        };
                        if let Some(name) = value.strip_prefix(ID_PREFIX) {
                            if !name.is_empty() {
                                ids.push(DeclaredResource::inline_id(name));
                            }
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(ids)
    }

    /// Get a non-namespaced attribute
    fn get_attr(e: &BytesStart, name: &str) -> Option<String> {
        for attr in e.attributes().filter_map(|a| a.ok()) {
            let key = std::str::from_utf8(attr.key.as_ref()).ok()?;
            if key == name {
                return std::str::from_utf8(&attr.value).ok().map(|s| s.to_string());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_VALUES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">Sample</string>
    <string-array name="planets">
        <item>Mercury</item>
        <item>Venus</item>
    </string-array>
    <color name="accent">#FF4081</color>
    <dimen name="margin">16dp</dimen>
    <item type="id" name="toolbar"/>
    <style name="Theme.App" parent="Theme.Material">
        <item name="android:windowBackground">@color/accent</item>
    </style>
    <declare-styleable name="ChartView">
        <attr name="lineColor" format="color"/>
        <attr name="android:textSize"/>
    </declare-styleable>
    <plurals name="songs">
        <item quantity="one">%d song</item>
        <item quantity="other">%d songs</item>
    </plurals>
</resources>"#;

    const SAMPLE_LAYOUT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<LinearLayout xmlns:android="http://schemas.android.com/apk/res/android"
    android:id="@+id/root"
    android:orientation="vertical">
    <TextView android:id="@+id/title" android:text="@string/app_name"/>
    <Button android:id="@+id/ok" android:layout_below="@id/title"/>
</LinearLayout>"#;

    #[test]
    fn test_parse_values() {
        let resources = ResourceParser::parse_values(SAMPLE_VALUES).unwrap();
        let found: Vec<(ResourceType, &str)> = resources
            .iter()
            .map(|r| (r.resource_type, r.name.as_str()))
            .collect();

        assert_eq!(
            found,
            vec![
                (ResourceType::String, "app_name"),
                (ResourceType::Array, "planets"),
                (ResourceType::Color, "accent"),
                (ResourceType::Dimen, "margin"),
                (ResourceType::Id, "toolbar"),
                (ResourceType::Style, "Theme.App"),
                (ResourceType::DeclareStyleable, "ChartView"),
                (ResourceType::Attr, "lineColor"),
                (ResourceType::Plurals, "songs"),
            ]
        );
        assert!(resources.iter().all(|r| !r.inline));
    }

    #[test]
    fn test_parse_values_unknown_item_type() {
        let xml = r#"<resources><item type="gizmo" name="x"/></resources>"#;
        let result = ResourceParser::parse_values(xml);
        assert!(matches!(result, Err(ParseError::UnknownType(t)) if t == "gizmo"));
    }

    #[test]
    fn test_parse_values_ignores_other_roots() {
        let xml = r#"<selector><string name="nope"/></selector>"#;
        assert!(ResourceParser::parse_values(xml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_values_malformed() {
        let xml = "<resources><string name=\"a\">x</color></resources>";
        let err: ResError = ResourceParser::parse_values(xml).unwrap_err().into();
        assert!(matches!(err, ResError::Xml(_)));
    }

    #[test]
    fn test_parse_inline_ids() {
        let ids = ResourceParser::parse_inline_ids(SAMPLE_LAYOUT).unwrap();
        let names: Vec<&str> = ids.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["root", "title", "ok"]);
        assert!(ids.iter().all(|r| r.inline && r.resource_type == ResourceType::Id));
    }
}
