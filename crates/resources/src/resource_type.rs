//! Resource Types
//!
//! Resource types, resource folder types, and folder-name parsing.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::qualifiers::FolderConfiguration;

/// Type of a resource as referenced from code (`R.<type>.<name>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    Anim,
    Animator,
    Array,
    Attr,
    Bool,
    Color,
    DeclareStyleable,
    Dimen,
    Drawable,
    Font,
    Fraction,
    Id,
    Integer,
    Interpolator,
    Layout,
    Menu,
    Mipmap,
    Navigation,
    Plurals,
    Raw,
    String,
    Style,
    Transition,
    Xml,
}

impl ResourceType {
    /// All resource types in name order
    pub const ALL: [ResourceType; 24] = [
        ResourceType::Anim,
        ResourceType::Animator,
        ResourceType::Array,
        ResourceType::Attr,
        ResourceType::Bool,
        ResourceType::Color,
        ResourceType::DeclareStyleable,
        ResourceType::Dimen,
        ResourceType::Drawable,
        ResourceType::Font,
        ResourceType::Fraction,
        ResourceType::Id,
        ResourceType::Integer,
        ResourceType::Interpolator,
        ResourceType::Layout,
        ResourceType::Menu,
        ResourceType::Mipmap,
        ResourceType::Navigation,
        ResourceType::Plurals,
        ResourceType::Raw,
        ResourceType::String,
        ResourceType::Style,
        ResourceType::Transition,
        ResourceType::Xml,
    ];

    /// Name used in XML references (`@string/...`)
    pub fn name(&self) -> &'static str {
        match self {
            ResourceType::Anim => "anim",
            ResourceType::Animator => "animator",
            ResourceType::Array => "array",
            ResourceType::Attr => "attr",
            ResourceType::Bool => "bool",
            ResourceType::Color => "color",
            ResourceType::DeclareStyleable => "declare-styleable",
            ResourceType::Dimen => "dimen",
            ResourceType::Drawable => "drawable",
            ResourceType::Font => "font",
            ResourceType::Fraction => "fraction",
            ResourceType::Id => "id",
            ResourceType::Integer => "integer",
            ResourceType::Interpolator => "interpolator",
            ResourceType::Layout => "layout",
            ResourceType::Menu => "menu",
            ResourceType::Mipmap => "mipmap",
            ResourceType::Navigation => "navigation",
            ResourceType::Plurals => "plurals",
            ResourceType::Raw => "raw",
            ResourceType::String => "string",
            ResourceType::Style => "style",
            ResourceType::Transition => "transition",
            ResourceType::Xml => "xml",
        }
    }

    /// Look up a type by its reference name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Type declared by an element of a `values` XML file
    ///
    /// `item` elements carry their type in a `type` attribute and are
    /// resolved by the caller.
    pub fn from_value_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(ResourceType::String),
            "color" => Some(ResourceType::Color),
            "dimen" => Some(ResourceType::Dimen),
            "bool" => Some(ResourceType::Bool),
            "integer" => Some(ResourceType::Integer),
            "fraction" => Some(ResourceType::Fraction),
            "style" => Some(ResourceType::Style),
            "plurals" => Some(ResourceType::Plurals),
            "attr" => Some(ResourceType::Attr),
            "declare-styleable" => Some(ResourceType::DeclareStyleable),
            "array" | "string-array" | "integer-array" => Some(ResourceType::Array),
            "drawable" => Some(ResourceType::Drawable),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type of a folder under `res/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceFolderType {
    Anim,
    Animator,
    Color,
    Drawable,
    Font,
    Interpolator,
    Layout,
    Menu,
    Mipmap,
    Navigation,
    Raw,
    Transition,
    Values,
    Xml,
}

impl ResourceFolderType {
    /// Parse the first segment of a folder name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "anim" => Some(ResourceFolderType::Anim),
            "animator" => Some(ResourceFolderType::Animator),
            "color" => Some(ResourceFolderType::Color),
            "drawable" => Some(ResourceFolderType::Drawable),
            "font" => Some(ResourceFolderType::Font),
            "interpolator" => Some(ResourceFolderType::Interpolator),
            "layout" => Some(ResourceFolderType::Layout),
            "menu" => Some(ResourceFolderType::Menu),
            "mipmap" => Some(ResourceFolderType::Mipmap),
            "navigation" => Some(ResourceFolderType::Navigation),
            "raw" => Some(ResourceFolderType::Raw),
            "transition" => Some(ResourceFolderType::Transition),
            "values" => Some(ResourceFolderType::Values),
            "xml" => Some(ResourceFolderType::Xml),
            _ => None,
        }
    }

    /// Resource type generated by each file in this folder
    ///
    /// `None` for `values`, whose files declare many resources each.
    pub fn file_resource_type(&self) -> Option<ResourceType> {
        match self {
            ResourceFolderType::Anim => Some(ResourceType::Anim),
            ResourceFolderType::Animator => Some(ResourceType::Animator),
            ResourceFolderType::Color => Some(ResourceType::Color),
            ResourceFolderType::Drawable => Some(ResourceType::Drawable),
            ResourceFolderType::Font => Some(ResourceType::Font),
            ResourceFolderType::Interpolator => Some(ResourceType::Interpolator),
            ResourceFolderType::Layout => Some(ResourceType::Layout),
            ResourceFolderType::Menu => Some(ResourceType::Menu),
            ResourceFolderType::Mipmap => Some(ResourceType::Mipmap),
            ResourceFolderType::Navigation => Some(ResourceType::Navigation),
            ResourceFolderType::Raw => Some(ResourceType::Raw),
            ResourceFolderType::Transition => Some(ResourceType::Transition),
            ResourceFolderType::Values => None,
            ResourceFolderType::Xml => Some(ResourceType::Xml),
        }
    }

    /// Whether files in this folder may declare `@+id/` resources inline
    pub fn can_declare_ids(&self) -> bool {
        matches!(self, ResourceFolderType::Layout | ResourceFolderType::Menu)
    }
}

/// Split a folder name such as `values-fr-rCA` into its type and configuration
pub fn parse_folder_name(name: &str) -> Option<(ResourceFolderType, FolderConfiguration)> {
    let mut segments = name.split('-');
    let folder_type = ResourceFolderType::from_name(segments.next()?)?;
    let qualifiers: Vec<&str> = segments.collect();
    let config = FolderConfiguration::parse(&qualifiers)?;
    Some((folder_type, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qualifiers::ScreenOrientation;

    #[test]
    fn test_parse_folder_name() {
        let (folder, config) = parse_folder_name("values").unwrap();
        assert_eq!(folder, ResourceFolderType::Values);
        assert!(config.is_default());

        let (folder, config) = parse_folder_name("layout-land").unwrap();
        assert_eq!(folder, ResourceFolderType::Layout);
        assert_eq!(config.orientation, Some(ScreenOrientation::Landscape));

        assert!(parse_folder_name("assets").is_none());
        assert!(parse_folder_name("drawable-bogus").is_none());
    }

    #[test]
    fn test_resource_type_names() {
        for t in ResourceType::ALL {
            assert_eq!(ResourceType::from_name(t.name()), Some(t));
        }
        assert_eq!(ResourceType::from_value_tag("string-array"), Some(ResourceType::Array));
        assert_eq!(ResourceType::from_value_tag("item"), None);
        assert_eq!(ResourceFolderType::Values.file_resource_type(), None);
        assert_eq!(
            ResourceFolderType::Mipmap.file_resource_type(),
            Some(ResourceType::Mipmap)
        );
    }
}
