//! Resource Scanner
//!
//! Walks a `res/` directory and feeds every resource file into a
//! [`ResourceRepository`].

use std::path::{Path, PathBuf};
use glob::Pattern;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use r_droid_res_core::{ProgressUiProvider, ResError, ResourceConfig, Result};

use crate::parser::ResourceParser;
use crate::qualifiers::FolderConfiguration;
use crate::repository::{DeclaredResource, RescanSummary, ResourceRepository};
use crate::resource_type::{parse_folder_name, ResourceFolderType};

/// Counts gathered while scanning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Files added to the repository
    pub files: usize,
    /// Resource declarations recorded
    pub resources: usize,
    /// Folders skipped because their name is not a valid resource folder
    pub skipped_folders: Vec<String>,
    /// Files skipped because they could not be parsed
    pub skipped_files: Vec<PathBuf>,
}

struct PendingFile {
    path: PathBuf,
    folder_type: ResourceFolderType,
    configuration: FolderConfiguration,
}

/// Scanner for resource directories
pub struct ResourceScanner {
    ignore: Vec<Pattern>,
    scan_inline_ids: bool,
}

impl ResourceScanner {
    /// Create a scanner from configuration
    pub fn new(config: &ResourceConfig) -> Result<Self> {
        let ignore = config
            .ignore_patterns
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .map_err(|e| ResError::Config(format!("invalid ignore pattern '{}': {}", p, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ignore,
            scan_inline_ids: config.scan_inline_ids,
        })
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|p| p.matches(name))
    }

    /// Reset `repo` and index every directory in `res_dirs` again
    pub async fn rescan(
        &self,
        repo: &mut ResourceRepository,
        res_dirs: &[PathBuf],
        progress: &dyn ProgressUiProvider,
    ) -> Result<(ScanSummary, RescanSummary)> {
        repo.begin_rescan();

        let mut total = ScanSummary::default();
        for dir in res_dirs {
            let summary = self.scan(repo, dir, progress).await?;
            total.files += summary.files;
            total.resources += summary.resources;
            total.skipped_folders.extend(summary.skipped_folders);
            total.skipped_files.extend(summary.skipped_files);
        }

        Ok((total, repo.end_rescan()))
    }

    /// Index the resource files under `res_dir`
    ///
    /// Stops with [`ResError::Cancelled`] when the progress provider reports
    /// a cancel request; files indexed so far stay in the repository.
    pub async fn scan(
        &self,
        repo: &mut ResourceRepository,
        res_dir: &Path,
        progress: &dyn ProgressUiProvider,
    ) -> Result<ScanSummary> {
        if !res_dir.is_dir() {
            return Err(ResError::NotFound(format!(
                "Resource directory not found: {:?}",
                res_dir
            )));
        }

        progress.report_description(&format!("Listing {}", res_dir.display()));
        let mut summary = ScanSummary::default();
        let pending = self.collect(res_dir, progress, &mut summary)?;

        info!("Scanning {} files in {:?}", pending.len(), res_dir);
        progress.set_progress_max(u32::try_from(pending.len()).unwrap_or(u32::MAX));

        for (index, file) in pending.into_iter().enumerate() {
            if progress.is_cancel_requested() {
                warn!("Scan of {:?} cancelled", res_dir);
                return Err(ResError::Cancelled);
            }

            progress.report_description(&format!("Scanning {}", file.path.display()));
            match self.read_resources(&file).await {
                Ok(resources) => {
                    summary.files += 1;
                    summary.resources += resources.len();
                    repo.add_file(file.path, file.folder_type, file.configuration, resources);
                }
                Err(e) => {
                    warn!("Skipping {:?}: {}", file.path, e);
                    summary.skipped_files.push(file.path);
                }
            }
            // Providers cap progress at max - 1; completion is signalled by report_result.
            progress.report_progress(u32::try_from(index + 1).unwrap_or(u32::MAX));
        }

        progress.report_result(&format!(
            "Indexed {} resources from {} files",
            summary.resources, summary.files
        ));
        Ok(summary)
    }

    /// List `res_dir/<folder>/<file>` entries in name order
    fn collect(
        &self,
        res_dir: &Path,
        progress: &dyn ProgressUiProvider,
        summary: &mut ScanSummary,
    ) -> Result<Vec<PendingFile>> {
        let mut pending = Vec::new();

        let folders = WalkDir::new(res_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for folder in folders {
            let folder = folder.map_err(|e| ResError::Io(e.into()))?;
            let folder_name = folder.file_name().to_string_lossy().to_string();
            if !folder.file_type().is_dir() || self.is_ignored(&folder_name) {
                continue;
            }

            let Some((folder_type, configuration)) = parse_folder_name(&folder_name) else {
                let skip = progress.confirm(
                    "Invalid resource folder",
                    &format!("'{}' is not a valid resource folder. Skip it?", folder_name),
                );
                if !skip {
                    return Err(ResError::InvalidFolder(folder_name));
                }
                warn!("Skipping invalid resource folder {:?}", folder.path());
                summary.skipped_folders.push(folder_name);
                continue;
            };

            let files = WalkDir::new(folder.path())
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name();
            for file in files {
                let file = file.map_err(|e| ResError::Io(e.into()))?;
                let ignored = self.is_ignored(&file.file_name().to_string_lossy());
                if !file.file_type().is_file() || ignored {
                    continue;
                }
                pending.push(PendingFile {
                    path: file.into_path(),
                    folder_type,
                    configuration: configuration.clone(),
                });
            }
        }

        Ok(pending)
    }

    /// Resources declared by one file
    async fn read_resources(&self, file: &PendingFile) -> Result<Vec<DeclaredResource>> {
        match file.folder_type.file_resource_type() {
            None => {
                if !has_extension(&file.path, "xml") {
                    debug!("Ignoring non-XML values file {:?}", file.path);
                    return Ok(Vec::new());
                }
                let xml = tokio::fs::read_to_string(&file.path).await?;
                Ok(ResourceParser::parse_values(&xml)?)
            }
            Some(resource_type) => {
                let name = resource_name(&file.path)
                    .ok_or_else(|| ResError::InvalidName(file.path.display().to_string()))?;
                let mut resources = vec![DeclaredResource::new(resource_type, name)];

                if self.scan_inline_ids
                    && file.folder_type.can_declare_ids()
                    && has_extension(&file.path, "xml")
                {
                    let xml = tokio::fs::read_to_string(&file.path).await?;
                    match ResourceParser::parse_inline_ids(&xml) {
                        Ok(ids) => resources.extend(ids),
                        // The file itself is still a valid resource.
                        Err(e) => warn!("Cannot read IDs from {:?}: {}", file.path, e),
                    }
                }
                Ok(resources)
            }
        }
    }
}

/// File name up to the first dot, so `icon.9.png` names `icon`
fn resource_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let name = file_name.split('.').next()?;
    (!name.is_empty()).then(|| name.to_string())
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
