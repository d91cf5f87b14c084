//! Resource Variants
//!
//! A variant is one source file contributing a resource under one
//! configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::qualifiers::FolderConfiguration;

/// Qualifier configuration a variant applies to
///
/// The order must be total; the default (unqualified) configuration is the
/// fallback used when nothing more specific matches.
pub trait VariantConfiguration: Ord + Clone {
    /// True if no qualifier is set
    fn is_default(&self) -> bool;
}

impl VariantConfiguration for FolderConfiguration {
    fn is_default(&self) -> bool {
        FolderConfiguration::is_default(self)
    }
}

/// Identity of an indexed source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceId(pub u64);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One source of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceVariant<C = FolderConfiguration> {
    source: SourceId,
    path: PathBuf,
    configuration: C,
}

impl<C: VariantConfiguration> ResourceVariant<C> {
    /// Create a variant for `path` under `configuration`
    pub fn new(source: SourceId, path: impl Into<PathBuf>, configuration: C) -> Self {
        Self {
            source,
            path: path.into(),
            configuration,
        }
    }

    /// Identity of the backing file
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn configuration(&self) -> &C {
        &self.configuration
    }

    pub fn is_default(&self) -> bool {
        self.configuration.is_default()
    }
}
