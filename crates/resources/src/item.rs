//! Resource Items
//!
//! A [`ResourceItem`] stands for one logical resource (`R.string.app_name`)
//! and tracks every variant that contributes it. Editors and code generators
//! use it to decide whether a resource can be edited in place or must be
//! resolved against a configuration first.
//!
//! Items are not synchronized. Callers sharing one across threads must guard
//! it themselves, e.g. through [`crate::SharedRepository`].

use std::cmp::Ordering;
use std::fmt;

use crate::qualifiers::FolderConfiguration;
use crate::variant::{ResourceVariant, VariantConfiguration};

/// Per-name index of resource variants
#[derive(Debug, Clone)]
pub struct ResourceItem<C = FolderConfiguration> {
    name: String,
    variants: Vec<ResourceVariant<C>>,
    /// Parallel to `variants`: whether the variant declares the name through `@+id/`
    inline: Vec<bool>,
}

impl<C: VariantConfiguration> ResourceItem<C> {
    /// Create an empty item
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
            inline: Vec::new(),
        }
    }

    /// Name as it appears in XML and generated code
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether every current variant declares this ID through `@+id/`
    ///
    /// False for an empty item.
    pub fn is_declared_inline(&self) -> bool {
        !self.inline.is_empty() && self.inline.iter().all(|inline| *inline)
    }

    /// Append a variant. Duplicates are kept.
    pub fn add(&mut self, variant: ResourceVariant<C>) {
        self.variants.push(variant);
        self.inline.push(false);
    }

    /// Append a variant whose file declares the ID inline (`@+id/...`)
    pub fn add_inline(&mut self, variant: ResourceVariant<C>) {
        self.variants.push(variant);
        self.inline.push(true);
    }

    /// Remove the first variant backed by the same source
    ///
    /// Returns false if no such variant was present.
    pub fn remove(&mut self, variant: &ResourceVariant<C>) -> bool {
        match self.variants.iter().position(|v| v.source() == variant.source()) {
            Some(index) => {
                self.variants.remove(index);
                self.inline.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every variant, keeping the item itself
    pub fn reset(&mut self) {
        self.variants.clear();
        self.inline.clear();
    }

    pub fn has_no_variants(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Whether the resource can be edited without picking a configuration
    ///
    /// Inline IDs live inside another file and are never edited directly.
    pub fn is_editable_directly(&self) -> bool {
        !self.is_declared_inline() && !self.has_alternates()
    }

    /// True if at least one variant has a qualified configuration
    pub fn has_alternates(&self) -> bool {
        self.variants.iter().any(|v| !v.is_default())
    }

    /// True if a default variant exists, or if there are no variants at all
    ///
    /// An empty item behaves as if its default exists; only an item with
    /// variants but none unqualified reports false.
    pub fn has_default(&self) -> bool {
        self.variants.is_empty() || self.variants.iter().any(|v| v.is_default())
    }

    /// Number of variants with a qualified configuration
    pub fn alternate_count(&self) -> usize {
        self.variants.iter().filter(|v| !v.is_default()).count()
    }

    /// Snapshot of the variants in ascending configuration order
    ///
    /// Equal configurations keep their insertion order.
    pub fn sorted_variants(&self) -> Vec<ResourceVariant<C>> {
        let mut sorted = self.variants.clone();
        sorted.sort_by(|a, b| a.configuration().cmp(b.configuration()));
        sorted
    }

    /// Variants in insertion order
    pub fn unordered_variants(&self) -> &[ResourceVariant<C>] {
        &self.variants
    }

    /// First default variant in insertion order
    pub fn default_variant(&self) -> Option<&ResourceVariant<C>> {
        self.variants.iter().find(|v| v.is_default())
    }
}

impl<C> PartialEq for ResourceItem<C> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<C> Eq for ResourceItem<C> {}

impl<C> PartialOrd for ResourceItem<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for ResourceItem<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl<C: VariantConfiguration + fmt::Display> fmt::Display for ResourceItem<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceItem [name={}, variants=[", self.name)?;
        for (i, variant) in self.variants.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", variant.path().display())?;
            let qualifiers = variant.configuration().to_string();
            if !qualifiers.is_empty() {
                write!(f, " ({})", qualifiers)?;
            }
        }
        f.write_str("]]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::SourceId;

    fn variant(id: u64, path: &str, qualifiers: &str) -> ResourceVariant {
        let config = FolderConfiguration::from_qualifier_string(qualifiers).unwrap();
        ResourceVariant::new(SourceId(id), path, config)
    }

    #[test]
    fn test_empty_item() {
        let item: ResourceItem = ResourceItem::new("icon");

        assert!(item.has_no_variants());
        assert!(item.has_default());
        assert!(!item.has_alternates());
        assert_eq!(item.alternate_count(), 0);
        assert!(item.is_editable_directly());
        assert!(item.sorted_variants().is_empty());
    }

    #[test]
    fn test_single_default() {
        let mut item = ResourceItem::new("title");
        item.add(variant(1, "values/strings.xml", ""));

        assert!(!item.has_no_variants());
        assert!(!item.has_alternates());
        assert!(item.is_editable_directly());
        assert!(item.has_default());
    }

    #[test]
    fn test_default_and_alternate() {
        let mut item = ResourceItem::new("app_name");
        let a = variant(1, "values/strings.xml", "");
        let b = variant(2, "values-fr/strings.xml", "fr");
        item.add(b.clone());
        item.add(a.clone());

        assert!(item.has_default());
        assert!(item.has_alternates());
        assert_eq!(item.alternate_count(), 1);
        assert!(!item.is_editable_directly());
        assert_eq!(item.sorted_variants(), vec![a.clone(), b.clone()]);
        assert_eq!(item.unordered_variants(), &[b, a.clone()]);
        assert_eq!(item.default_variant(), Some(&a));
    }

    #[test]
    fn test_only_alternates() {
        let mut item = ResourceItem::new("banner");
        item.add(variant(1, "drawable-hdpi/banner.png", "hdpi"));
        item.add(variant(2, "drawable-mdpi/banner.png", "mdpi"));

        assert!(!item.has_default());
        assert!(item.has_alternates());
        assert_eq!(item.alternate_count(), 2);
        assert!(item.default_variant().is_none());
    }

    #[test]
    fn test_sorted_variants_stable_and_idempotent() {
        let mut item = ResourceItem::new("logo");
        item.add(variant(1, "drawable-land-hdpi/logo.png", "land-hdpi"));
        item.add(variant(2, "drawable-fr/logo.png", "fr"));
        item.add(variant(3, "drawable/logo.png", ""));
        item.add(variant(4, "drawable-land/logo.png", "land"));
        item.add(variant(5, "other/drawable/logo.png", ""));

        let first = item.sorted_variants();
        let ids: Vec<u64> = first.iter().map(|v| v.source().0).collect();
        assert_eq!(ids, vec![3, 5, 4, 1, 2]);
        assert_eq!(item.sorted_variants(), first);
    }

    #[test]
    fn test_reset() {
        let mut item = ResourceItem::new("app_name");
        item.add(variant(1, "values/strings.xml", ""));
        item.add(variant(2, "values-fr/strings.xml", "fr"));

        item.reset();
        assert!(item.has_no_variants());
        assert_eq!(item.name(), "app_name");

        item.reset();
        assert!(item.has_no_variants());
    }

    #[test]
    fn test_add_remove_round_trip() {
        let mut item = ResourceItem::new("app_name");
        item.add(variant(1, "values/strings.xml", ""));
        let count = item.alternate_count();
        let alternates = item.has_alternates();

        let fr = variant(2, "values-fr/strings.xml", "fr");
        item.add(fr.clone());
        assert_ne!(item.alternate_count(), count);

        assert!(item.remove(&fr));
        assert_eq!(item.alternate_count(), count);
        assert_eq!(item.has_alternates(), alternates);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut item = ResourceItem::new("app_name");
        item.add(variant(1, "values/strings.xml", ""));

        assert!(!item.remove(&variant(9, "values-de/strings.xml", "de")));
        assert_eq!(item.variant_count(), 1);
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut item = ResourceItem::new("app_name");
        let fr = variant(2, "values-fr/strings.xml", "fr");
        item.add(fr.clone());
        item.add(fr.clone());
        assert_eq!(item.alternate_count(), 2);

        item.remove(&fr);
        assert_eq!(item.alternate_count(), 1);
    }

    #[test]
    fn test_inline_id_not_editable() {
        let mut item = ResourceItem::new("button1");
        let layout = variant(1, "layout/main.xml", "");
        item.add_inline(layout.clone());

        assert!(item.is_declared_inline());
        assert!(!item.has_alternates());
        assert!(!item.is_editable_directly());

        let ids = variant(2, "values/ids.xml", "");
        item.add(ids.clone());
        assert!(!item.is_declared_inline());
        assert!(item.is_editable_directly());

        assert!(item.remove(&ids));
        assert!(item.is_declared_inline());
        assert!(!item.is_editable_directly());

        item.reset();
        assert!(!item.is_declared_inline());
        item.add_inline(layout);
        assert!(item.is_declared_inline());
    }

    #[test]
    fn test_items_order_by_name() {
        let mut items: Vec<ResourceItem> = vec![
            ResourceItem::new("title"),
            ResourceItem::new("app_name"),
            ResourceItem::new("icon"),
        ];
        items.sort();
        let names: Vec<&str> = items.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["app_name", "icon", "title"]);
    }

    #[test]
    fn test_display() {
        let mut item = ResourceItem::new("app_name");
        item.add(variant(1, "values/strings.xml", ""));
        item.add(variant(2, "values-fr/strings.xml", "fr"));

        assert_eq!(
            item.to_string(),
            "ResourceItem [name=app_name, variants=[values/strings.xml, values-fr/strings.xml (fr)]]"
        );
    }
}
