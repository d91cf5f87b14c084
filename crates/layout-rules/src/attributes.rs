//! Attribute Rewriting
//!
//! Computes the attributes of an element dropped or pasted into a layout from
//! the attributes of its source element. The source document is never
//! touched; the caller applies the result inside its own edit.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Cursor;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use tracing::trace;

/// Android namespace URI
pub const ANDROID_URI: &str = "http://schemas.android.com/apk/res/android";

const NEW_ID_PREFIX: &str = "@+id/";
const ID_PREFIX: &str = "@id/";

/// Layout rule errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),
    #[error("Attribute error: {0}")]
    AttrError(#[from] quick_xml::events::attributes::AttrError),
    #[error("Unbound namespace prefix '{0}'")]
    UnboundPrefix(String),
    #[error("No namespace prefix for '{0}'")]
    UnknownNamespace(String),
    #[error("No element found")]
    NoElement,
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Namespace-qualified attribute name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeName {
    pub namespace: Option<String>,
    pub name: String,
}

impl AttributeName {
    pub fn new(namespace: Option<&str>, name: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        }
    }

    /// Attribute in the Android namespace
    pub fn android(name: &str) -> Self {
        Self::new(Some(ANDROID_URI), name)
    }
}

/// An attribute of a layout element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub name: AttributeName,
    pub value: String,
}

impl XmlAttribute {
    pub fn new(namespace: Option<&str>, name: &str, value: &str) -> Self {
        Self {
            name: AttributeName::new(namespace, name),
            value: value.to_string(),
        }
    }

    pub fn android(name: &str, value: &str) -> Self {
        Self::new(Some(ANDROID_URI), name, value)
    }
}

/// Split an id reference into its `+` marker and name
///
/// `@+id/ok` gives `(true, "ok")`, `@id/ok` gives `(false, "ok")`.
pub fn split_id_reference(value: &str) -> Option<(bool, &str)> {
    if let Some(name) = value.strip_prefix(NEW_ID_PREFIX) {
        Some((true, name))
    } else {
        value.strip_prefix(ID_PREFIX).map(|name| (false, name))
    }
}

/// Attributes for the copy of `source`
///
/// Attributes named in `excluded` are dropped. Id references whose name is
/// in `id_map` point at the mapped name, keeping their `+` marker. Everything
/// else is copied unchanged, in source order.
pub fn rewrite_attributes(
    source: &[XmlAttribute],
    excluded: &HashSet<AttributeName>,
    id_map: &HashMap<String, String>,
) -> Vec<XmlAttribute> {
    source
        .iter()
        .filter(|attr| !excluded.contains(&attr.name))
        .map(|attr| {
            let value = match split_id_reference(&attr.value) {
                Some((is_new, old)) => match id_map.get(old) {
                    Some(new) => {
                        trace!("Remapping {} -> {}", old, new);
                        let prefix = if is_new { NEW_ID_PREFIX } else { ID_PREFIX };
                        format!("{}{}", prefix, new)
                    }
                    None => attr.value.clone(),
                },
                None => attr.value.clone(),
            };
            XmlAttribute {
                name: attr.name.clone(),
                value,
            }
        })
        .collect()
}

/// Read the attributes of the first element in `xml`
///
/// Namespace prefixes are resolved against the element's own `xmlns`
/// declarations; the declarations themselves are not returned.
pub fn parse_attributes(xml: &str) -> Result<(String, Vec<XmlAttribute>), RuleError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(ref e) | Event::Empty(ref e) => return read_element(e),
            Event::Eof => return Err(RuleError::NoElement),
            _ => {}
        }
    }
}

fn read_element(e: &BytesStart) -> Result<(String, Vec<XmlAttribute>), RuleError> {
    let tag = String::from_utf8(e.name().as_ref().to_vec())?;
    let mut prefixes: HashMap<String, String> = HashMap::new();
    let mut raw = Vec::new();

    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8(attr.key.as_ref().to_vec())?;
        let value = String::from_utf8(attr.value.to_vec())?;
        match key.strip_prefix("xmlns:") {
            Some(prefix) => {
                prefixes.insert(prefix.to_string(), value);
            }
            None if key == "xmlns" => {}
            None => raw.push((key, value)),
        }
    }

    let attributes = raw
        .into_iter()
        .map(|(key, value)| {
            let name = match key.split_once(':') {
                Some((prefix, local)) => {
                    let uri = prefixes
                        .get(prefix)
                        .ok_or_else(|| RuleError::UnboundPrefix(prefix.to_string()))?;
                    AttributeName::new(Some(uri), local)
                }
                None => AttributeName::new(None, &key),
            };
            Ok(XmlAttribute { name, value })
        })
        .collect::<Result<Vec<_>, RuleError>>()?;

    Ok((tag, attributes))
}

/// Render an empty element with the given attributes
///
/// `namespaces` maps namespace URIs to the prefixes to write; each prefix
/// used is declared on the element.
pub fn render_element(
    tag: &str,
    attributes: &[XmlAttribute],
    namespaces: &BTreeMap<String, String>,
) -> Result<String, RuleError> {
    let mut element = BytesStart::new(tag);
    let mut used: BTreeMap<&str, &str> = BTreeMap::new();
    let mut rendered = Vec::with_capacity(attributes.len());

    for attr in attributes {
        let key = match &attr.name.namespace {
            Some(uri) => {
                let prefix = namespaces
                    .get(uri)
                    .ok_or_else(|| RuleError::UnknownNamespace(uri.clone()))?;
                used.insert(prefix.as_str(), uri.as_str());
                format!("{}:{}", prefix, attr.name.name)
            }
            None => attr.name.name.clone(),
        };
        rendered.push((key, attr.value.as_str()));
    }

    for (prefix, uri) in &used {
        element.push_attribute((format!("xmlns:{}", prefix).as_str(), *uri));
    }
    for (key, value) in &rendered {
        element.push_attribute((key.as_str(), *value));
    }

    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Empty(element))?;
    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: &str = r#"<Button xmlns:android="http://schemas.android.com/apk/res/android"
        android:id="@+id/ok"
        android:layout_width="wrap_content"
        android:layout_below="@id/title"
        android:layout_x="12dp"
        style="@style/Primary"/>"#;

    #[test]
    fn test_parse_attributes() {
        let (tag, attrs) = parse_attributes(BUTTON).unwrap();
        assert_eq!(tag, "Button");
        assert_eq!(attrs.len(), 5);
        assert_eq!(attrs[0], XmlAttribute::android("id", "@+id/ok"));
        assert_eq!(attrs[4], XmlAttribute::new(None, "style", "@style/Primary"));
    }

    #[test]
    fn test_unbound_prefix() {
        let result = parse_attributes(r#"<Button app:tint="red"/>"#);
        assert!(matches!(result, Err(RuleError::UnboundPrefix(p)) if p == "app"));
        assert!(matches!(parse_attributes("<!-- none -->"), Err(RuleError::NoElement)));
    }

    #[test]
    fn test_rewrite_attributes() {
        let (_, attrs) = parse_attributes(BUTTON).unwrap();
        let excluded: HashSet<AttributeName> = [AttributeName::android("layout_x")].into();
        let id_map: HashMap<String, String> = [
            ("ok".to_string(), "ok2".to_string()),
            ("title".to_string(), "title2".to_string()),
        ]
        .into();

        let rewritten = rewrite_attributes(&attrs, &excluded, &id_map);

        assert_eq!(
            rewritten,
            vec![
                XmlAttribute::android("id", "@+id/ok2"),
                XmlAttribute::android("layout_width", "wrap_content"),
                XmlAttribute::android("layout_below", "@id/title2"),
                XmlAttribute::new(None, "style", "@style/Primary"),
            ]
        );
        // The source is left untouched.
        assert_eq!(attrs[0].value, "@+id/ok");
    }

    #[test]
    fn test_unmapped_ids_kept() {
        let attrs = vec![
            XmlAttribute::android("id", "@+id/ok"),
            XmlAttribute::android("layout_above", "@android:id/list"),
        ];
        let rewritten = rewrite_attributes(&attrs, &HashSet::new(), &HashMap::new());
        assert_eq!(rewritten, attrs);
    }

    #[test]
    fn test_render_element() {
        let attrs = vec![
            XmlAttribute::android("id", "@+id/ok2"),
            XmlAttribute::new(None, "style", "@style/Primary"),
        ];
        let namespaces: BTreeMap<String, String> =
            [(ANDROID_URI.to_string(), "android".to_string())].into();

        let xml = render_element("Button", &attrs, &namespaces).unwrap();
        assert_eq!(
            xml,
            r#"<Button xmlns:android="http://schemas.android.com/apk/res/android" android:id="@+id/ok2" style="@style/Primary"/>"#
        );

        let (tag, parsed) = parse_attributes(&xml).unwrap();
        assert_eq!(tag, "Button");
        assert_eq!(parsed, attrs);
    }

    #[test]
    fn test_render_unknown_namespace() {
        let attrs = vec![XmlAttribute::new(Some("urn:other"), "x", "1")];
        let result = render_element("View", &attrs, &BTreeMap::new());
        assert!(matches!(result, Err(RuleError::UnknownNamespace(_))));
    }
}
