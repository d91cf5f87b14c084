//! CLI commands for the resource index
//!
//! Each command builds a fresh repository from the given `res/` directories
//! and produces a serializable report.

use std::fmt::Write as _;
use std::path::PathBuf;
use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::info;

use r_droid_res_core::{ProgressUiProvider, ResourceConfig};
use r_droid_resources::{
    ResourceItem, ResourceRepository, ResourceScanner, ResourceType, ScanSummary,
};

/// Summary of one resource
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResourceReport {
    /// Resource type
    pub resource_type: ResourceType,
    /// Resource name
    pub name: String,
    /// Number of variants
    pub variants: usize,
    /// Variants with a qualified configuration
    pub alternates: usize,
    /// Whether an unqualified variant exists
    pub has_default: bool,
    /// Whether it can be edited without picking a configuration
    pub editable_directly: bool,
    /// Whether only `@+id/` declarations provide it
    pub declared_inline: bool,
}

impl ResourceReport {
    fn new(resource_type: ResourceType, item: &ResourceItem) -> Self {
        Self {
            resource_type,
            name: item.name().to_string(),
            variants: item.variant_count(),
            alternates: item.alternate_count(),
            has_default: item.has_default(),
            editable_directly: item.is_editable_directly(),
            declared_inline: item.is_declared_inline(),
        }
    }
}

/// Output of the `scan` command
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Scanner counters and skipped entries
    pub summary: ScanSummary,
    /// Populated resources in type then name order
    pub resources: Vec<ResourceReport>,
}

impl ScanReport {
    /// Human-readable listing, one resource per line
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for r in &self.resources {
            let mut flags = Vec::new();
            if !r.has_default {
                flags.push("no-default");
            }
            if r.declared_inline {
                flags.push("inline");
            }
            if r.editable_directly {
                flags.push("editable");
            }
            let _ = writeln!(
                out,
                "@{}/{}  variants={} alternates={} [{}]",
                r.resource_type,
                r.name,
                r.variants,
                r.alternates,
                flags.join(",")
            );
        }
        let _ = writeln!(
            out,
            "{} files, {} resources",
            self.summary.files,
            self.resources.len()
        );
        for folder in &self.summary.skipped_folders {
            let _ = writeln!(out, "skipped folder: {}", folder);
        }
        for file in &self.summary.skipped_files {
            let _ = writeln!(out, "skipped file: {}", file.display());
        }
        out
    }
}

/// Scan command options
pub struct ScanCommand {
    /// Resource directories to index
    pub res_dirs: Vec<PathBuf>,
}

impl ScanCommand {
    /// Execute the scan command
    pub async fn execute(
        &self,
        config: &ResourceConfig,
        progress: &dyn ProgressUiProvider,
    ) -> Result<ScanReport> {
        let (repo, summary) = build_repository(&self.res_dirs, config, progress).await?;

        let resources = repo
            .resource_types()
            .into_iter()
            .flat_map(|t| {
                repo.resources_of_type(t)
                    .into_iter()
                    .map(move |item| ResourceReport::new(t, item))
            })
            .collect();

        Ok(ScanReport { summary, resources })
    }
}

/// One variant in the `variants` output
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VariantReport {
    /// File providing the variant
    pub path: PathBuf,
    /// Folder qualifiers, empty for the default
    pub qualifiers: String,
    /// Whether the configuration is unqualified
    pub is_default: bool,
}

/// Output of the `variants` command
#[derive(Debug, Clone, Serialize)]
pub struct VariantsReport {
    /// Summary of the resource
    pub resource: ResourceReport,
    /// Variants in configuration order
    pub variants: Vec<VariantReport>,
}

impl VariantsReport {
    /// Human-readable listing, one variant per line
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "@{}/{} ({} variants, {} alternates, {})",
            self.resource.resource_type,
            self.resource.name,
            self.resource.variants,
            self.resource.alternates,
            if self.resource.editable_directly {
                "editable directly"
            } else {
                "pick a configuration to edit"
            }
        );
        for v in &self.variants {
            let qualifiers = if v.is_default { "default" } else { v.qualifiers.as_str() };
            let _ = writeln!(out, "  {:<24} {}", qualifiers, v.path.display());
        }
        out
    }
}

/// Variants command options
pub struct VariantsCommand {
    /// Resource type name, e.g. `string`
    pub resource_type: String,
    /// Resource name
    pub name: String,
    /// Resource directories to index
    pub res_dirs: Vec<PathBuf>,
}

impl VariantsCommand {
    /// Execute the variants command
    pub async fn execute(
        &self,
        config: &ResourceConfig,
        progress: &dyn ProgressUiProvider,
    ) -> Result<VariantsReport> {
        let resource_type = ResourceType::from_name(&self.resource_type)
            .ok_or_else(|| anyhow!("Unknown resource type '{}'", self.resource_type))?;

        let (repo, _) = build_repository(&self.res_dirs, config, progress).await?;
        let item = repo
            .find(resource_type, &self.name)
            .filter(|item| !item.has_no_variants())
            .ok_or_else(|| anyhow!("No resource @{}/{}", resource_type, self.name))?;

        let variants = item
            .sorted_variants()
            .iter()
            .map(|v| VariantReport {
                path: v.path().to_path_buf(),
                qualifiers: v.configuration().to_string(),
                is_default: v.is_default(),
            })
            .collect();

        Ok(VariantsReport {
            resource: ResourceReport::new(resource_type, item),
            variants,
        })
    }
}

async fn build_repository(
    res_dirs: &[PathBuf],
    config: &ResourceConfig,
    progress: &dyn ProgressUiProvider,
) -> Result<(ResourceRepository, ScanSummary)> {
    let scanner = ResourceScanner::new(config)?;
    let mut repo = ResourceRepository::new();
    let (summary, _) = scanner.rescan(&mut repo, res_dirs, progress).await?;

    info!(
        "Indexed {} files from {} directories",
        summary.files,
        res_dirs.len()
    );
    Ok((repo, summary))
}
