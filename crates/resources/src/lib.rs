//! Android Resource Index
//!
//! Tracks, for every logical resource, the source files contributing it under
//! each folder configuration, and answers whether the resource has a default
//! version, has alternates, and can be edited without picking a
//! configuration.

pub mod qualifiers;
pub mod resource_type;
pub mod variant;
pub mod item;
pub mod repository;
pub mod parser;
pub mod scanner;

pub use qualifiers::FolderConfiguration;
pub use resource_type::{parse_folder_name, ResourceFolderType, ResourceType};
pub use variant::{ResourceVariant, SourceId, VariantConfiguration};
pub use item::ResourceItem;
pub use repository::{
    DeclaredResource, ItemHandle, RescanSummary, ResourceFile, ResourceRepository,
    SharedRepository,
};
pub use parser::{ParseError, ResourceParser};
pub use scanner::{ResourceScanner, ScanSummary};
