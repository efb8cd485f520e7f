use crate::{ImportConfig, PreviousImportSettings};
use std::path::{Path, PathBuf};

/// One exported file to import. Only computes paths; never touches the file system.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportJob {
    asset_path: PathBuf,
    pub previous_import_settings: Option<PreviousImportSettings>,
    /// Prepended to the exporter's own arguments.
    pub additional_export_arguments: Vec<String>,
}

impl ImportJob {
    pub fn new(asset_path: impl Into<PathBuf>) -> Self {
        Self {
            asset_path: asset_path.into(),
            ..Self::default()
        }
    }

    pub fn asset_path(&self) -> &Path {
        &self.asset_path
    }

    pub fn file_name(&self) -> &str {
        self.asset_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// File name without extension; also the sheet name.
    pub fn name(&self) -> &str {
        self.asset_path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// Extension without the leading dot.
    pub fn extension(&self) -> &str {
        extension_of(&self.asset_path)
    }

    pub fn asset_directory(&self) -> &Path {
        self.asset_path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn sprites_directory(&self, config: &ImportConfig) -> PathBuf {
        config
            .sprites_location
            .target_directory(self.asset_directory())
    }

    pub fn animations_directory(&self, config: &ImportConfig) -> PathBuf {
        config
            .animations_location
            .target_directory(self.asset_directory())
    }

    pub fn controllers_directory(&self, config: &ImportConfig) -> PathBuf {
        config
            .controllers_location
            .target_directory(self.asset_directory())
    }

    pub fn image_asset_path(&self, config: &ImportConfig) -> PathBuf {
        self.sprites_directory(config)
            .join(format!("{}.png", self.name()))
    }
}

pub(crate) fn extension_of(path: &Path) -> &str {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
}
