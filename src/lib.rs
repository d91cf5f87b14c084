//! R-Droid Resources - Android resource variant index
//!
//! Indexes the `res/` folders of an Android project and answers, per
//! resource, which files provide it under which configuration.
//!
//! ## Architecture
//!
//! - `r-droid-res-core`: errors, configuration, events and progress reporting
//! - `r-droid-resources`: folder qualifiers, resource items, repository and scanner
//! - `r-droid-layout-rules`: attribute rewriting for dropped layout elements

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;
pub mod progress;

// Re-export main components for library usage
pub use r_droid_res_core as core;
pub use r_droid_resources as resources;
pub use r_droid_layout_rules as layout_rules;

/// Prelude module for convenient imports
pub mod prelude {
    pub use r_droid_res_core::{LogProgress, ProgressUiProvider, ResError, ResourceConfig};
    pub use r_droid_resources::{
        FolderConfiguration, ResourceItem, ResourceRepository, ResourceScanner, ResourceType,
        ResourceVariant,
    };
    pub use r_droid_layout_rules::{remap_ids, rewrite_attributes, XmlAttribute};
}
