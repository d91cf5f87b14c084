//! Resource Repository
//!
//! Maps `(type, name)` pairs to [`ResourceItem`]s and tracks which source
//! files contribute to them. Items live in an arena and are addressed by
//! [`ItemHandle`]s which stay valid for the lifetime of the repository: a
//! rescan empties items but never frees them, so editors holding a handle
//! see the refreshed variants afterwards.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use r_droid_res_core::{EventBus, ResourceEvent};

use crate::item::ResourceItem;
use crate::qualifiers::FolderConfiguration;
use crate::resource_type::{ResourceFolderType, ResourceType};
use crate::variant::{ResourceVariant, SourceId};

/// Repository guarded for use across threads
pub type SharedRepository = Arc<RwLock<ResourceRepository>>;

/// Stable reference to an item in a [`ResourceRepository`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemHandle(usize);

/// A resource declared by a source file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DeclaredResource {
    pub resource_type: ResourceType,
    pub name: String,
    /// Declared through `@+id/` inside another resource
    pub inline: bool,
}

impl DeclaredResource {
    pub fn new(resource_type: ResourceType, name: impl Into<String>) -> Self {
        Self {
            resource_type,
            name: name.into(),
            inline: false,
        }
    }

    pub fn inline_id(name: impl Into<String>) -> Self {
        Self {
            resource_type: ResourceType::Id,
            name: name.into(),
            inline: true,
        }
    }
}

/// An indexed source file
#[derive(Debug, Clone)]
pub struct ResourceFile {
    pub id: SourceId,
    pub path: PathBuf,
    pub folder_type: ResourceFolderType,
    pub configuration: FolderConfiguration,
    pub resources: Vec<DeclaredResource>,
}

impl ResourceFile {
    fn variant(&self) -> ResourceVariant {
        ResourceVariant::new(self.id, self.path.clone(), self.configuration.clone())
    }
}

/// Outcome of a bulk rescan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RescanSummary {
    /// Items known to the repository
    pub items: usize,
    /// Items left without any variant
    pub empty: usize,
}

/// Registry of resource items for one project
pub struct ResourceRepository {
    items: Vec<(ResourceType, ResourceItem)>,
    lookup: HashMap<ResourceType, BTreeMap<String, ItemHandle>>,
    files: BTreeMap<SourceId, ResourceFile>,
    next_source: u64,
    events: Option<Arc<EventBus>>,
}

impl ResourceRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            lookup: HashMap::new(),
            files: BTreeMap::new(),
            next_source: 0,
            events: None,
        }
    }

    /// Publish change events on `bus`
    pub fn with_events(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    /// Wrap the repository for shared access
    pub fn into_shared(self) -> SharedRepository {
        Arc::new(RwLock::new(self))
    }

    fn emit(&self, event: ResourceEvent) {
        if let Some(bus) = &self.events {
            bus.emit(event);
        }
    }

    /// Index a source file and the resources it declares
    ///
    /// Each `(type, name)` pair is recorded once per file even if listed
    /// repeatedly; a regular declaration wins over an inline one.
    pub fn add_file(
        &mut self,
        path: impl Into<PathBuf>,
        folder_type: ResourceFolderType,
        configuration: FolderConfiguration,
        resources: Vec<DeclaredResource>,
    ) -> SourceId {
        let id = SourceId(self.next_source);
        self.next_source += 1;

        let file = ResourceFile {
            id,
            path: path.into(),
            folder_type,
            configuration,
            resources: dedup_resources(resources),
        };
        self.attach(&file);

        self.emit(ResourceEvent::FileAdded {
            path: file.path.clone(),
            resources: file.resources.len(),
        });
        debug!("Indexed {:?} as {} ({} resources)", file.path, id, file.resources.len());

        self.files.insert(id, file);
        id
    }

    /// Replace the resources declared by an already indexed file
    ///
    /// Returns false if the file is unknown.
    pub fn update_file(&mut self, source: SourceId, resources: Vec<DeclaredResource>) -> bool {
        let Some(mut file) = self.files.remove(&source) else {
            return false;
        };

        self.detach(&file);
        file.resources = dedup_resources(resources);
        self.attach(&file);

        self.files.insert(source, file);
        true
    }

    /// Drop a file and its variants; unknown ids are ignored
    pub fn remove_file(&mut self, source: SourceId) -> Option<ResourceFile> {
        let file = self.files.remove(&source)?;
        self.detach(&file);

        self.emit(ResourceEvent::FileRemoved { path: file.path.clone() });
        debug!("Removed {:?}", file.path);
        Some(file)
    }

    /// Find the source id of an indexed path
    pub fn source_for_path(&self, path: &Path) -> Option<SourceId> {
        self.files
            .values()
            .find(|f| f.path == path)
            .map(|f| f.id)
    }

    fn attach(&mut self, file: &ResourceFile) {
        let variant = file.variant();
        for declared in &file.resources {
            let handle = self.get_or_create(declared);
            let item = &mut self.items[handle.0].1;
            if declared.inline {
                item.add_inline(variant.clone());
            } else {
                item.add(variant.clone());
            }
        }
    }

    fn detach(&mut self, file: &ResourceFile) {
        let variant = file.variant();
        for declared in &file.resources {
            if let Some(handle) = self.handle_of(declared.resource_type, &declared.name) {
                self.items[handle.0].1.remove(&variant);
            }
        }
    }

    fn get_or_create(&mut self, declared: &DeclaredResource) -> ItemHandle {
        if let Some(handle) = self.handle_of(declared.resource_type, &declared.name) {
            return handle;
        }

        let handle = ItemHandle(self.items.len());
        self.items
            .push((declared.resource_type, ResourceItem::new(declared.name.clone())));
        self.lookup
            .entry(declared.resource_type)
            .or_default()
            .insert(declared.name.clone(), handle);

        self.emit(ResourceEvent::ItemCreated {
            resource_type: declared.resource_type.name().to_string(),
            name: declared.name.clone(),
        });
        handle
    }

    /// Empty every item and forget all files ahead of a full rescan
    ///
    /// Handles stay valid; items repopulate as files are added again.
    pub fn begin_rescan(&mut self) {
        for (_, item) in &mut self.items {
            item.reset();
        }
        self.files.clear();

        info!("Rescan started, {} items reset", self.items.len());
        self.emit(ResourceEvent::RescanStarted);
    }

    /// Finish a rescan and report how many items stayed empty
    pub fn end_rescan(&mut self) -> RescanSummary {
        let summary = RescanSummary {
            items: self.items.len(),
            empty: self.items.iter().filter(|(_, item)| item.has_no_variants()).count(),
        };

        info!(
            "Rescan finished: {} items, {} without variants",
            summary.items, summary.empty
        );
        self.emit(ResourceEvent::RescanFinished {
            items: summary.items,
            empty: summary.empty,
        });
        summary
    }

    /// Item behind a handle
    pub fn item(&self, handle: ItemHandle) -> Option<&ResourceItem> {
        self.items.get(handle.0).map(|(_, item)| item)
    }

    /// Type of the item behind a handle
    pub fn item_type(&self, handle: ItemHandle) -> Option<ResourceType> {
        self.items.get(handle.0).map(|(t, _)| *t)
    }

    pub fn handle_of(&self, resource_type: ResourceType, name: &str) -> Option<ItemHandle> {
        self.lookup.get(&resource_type)?.get(name).copied()
    }

    /// Look up an item by type and name
    pub fn find(&self, resource_type: ResourceType, name: &str) -> Option<&ResourceItem> {
        self.handle_of(resource_type, name).and_then(|h| self.item(h))
    }

    /// Items of a type that currently have variants, in name order
    pub fn resources_of_type(&self, resource_type: ResourceType) -> Vec<&ResourceItem> {
        self.lookup
            .get(&resource_type)
            .map(|names| {
                names
                    .values()
                    .filter_map(|h| self.item(*h))
                    .filter(|item| !item.has_no_variants())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Types with at least one populated item, in type order
    pub fn resource_types(&self) -> Vec<ResourceType> {
        let types: BTreeSet<ResourceType> = self
            .items
            .iter()
            .filter(|(_, item)| !item.has_no_variants())
            .map(|(t, _)| *t)
            .collect();
        types.into_iter().collect()
    }

    pub fn file(&self, source: SourceId) -> Option<&ResourceFile> {
        self.files.get(&source)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of items ever created, including empty ones
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Default for ResourceRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn dedup_resources(resources: Vec<DeclaredResource>) -> Vec<DeclaredResource> {
    let mut merged: BTreeMap<(ResourceType, String), bool> = BTreeMap::new();
    for declared in resources {
        let inline = merged
            .entry((declared.resource_type, declared.name))
            .or_insert(declared.inline);
        *inline = *inline && declared.inline;
    }

    merged
        .into_iter()
        .map(|((resource_type, name), inline)| DeclaredResource {
            resource_type,
            name,
            inline,
        })
        .collect()
}
