use crate::job::extension_of;
use crate::{AnimationSheet, Error, ImportConfig, ImportJob, ParsedSheet};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Entries of an exported archive, keyed by file name. Extraction is the host's job.
pub type ArchiveEntries = HashMap<String, Vec<u8>>;

/// Already-read exporter output handed to an importer.
#[derive(Copy, Clone, Debug)]
pub enum ImportInput<'a> {
    Json(&'a str),
    Archive(&'a ArchiveEntries),
}

/// A parser for one exporter's metadata format.
pub trait SheetImporter {
    fn import(&self, input: ImportInput<'_>) -> Result<ParsedSheet, Error>;

    /// Whether this importer can run in the current host setup.
    fn is_valid(&self) -> bool {
        true
    }
}

/// Formats compiled into this build.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Capabilities {
    pub aseprite: bool,
    pub pyxel: bool,
}

pub const fn capabilities() -> Capabilities {
    Capabilities {
        aseprite: cfg!(feature = "aseprite"),
        pyxel: cfg!(feature = "pyxel"),
    }
}

/// Maps file extensions to importers. Built once by the host and passed to [`import_sheet`].
#[derive(Clone, Default)]
pub struct ImporterRegistry {
    importers: BTreeMap<String, Arc<dyn SheetImporter>>,
}

impl fmt::Debug for ImporterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImporterRegistry")
            .field("extensions", &self.importers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ImporterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every format enabled by crate features.
    pub fn with_builtin_importers() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::new();
        #[cfg(feature = "aseprite")]
        registry.register(Arc::new(crate::aseprite::AsepriteImporter), &["ase", "aseprite"]);
        #[cfg(feature = "pyxel")]
        registry.register(Arc::new(crate::pyxel::PyxelImporter), &["pyxel"]);
        registry
    }

    /// Extensions are matched without the dot and ignoring ASCII case.
    pub fn register(&mut self, importer: Arc<dyn SheetImporter>, extensions: &[&str]) {
        for extension in extensions {
            let key = extension.trim_start_matches('.').to_ascii_lowercase();
            self.importers.insert(key, Arc::clone(&importer));
        }
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.importers.keys().map(String::as_str)
    }

    pub fn importer_for(&self, path: &Path) -> Result<&dyn SheetImporter, Error> {
        let extension = extension_of(path);
        let importer = self
            .importers
            .get(&extension.to_ascii_lowercase())
            .ok_or_else(|| Error::UnsupportedFormat {
                extension: extension.to_string(),
            })?;
        if !importer.is_valid() {
            return Err(Error::ImporterUnavailable {
                extension: extension.to_string(),
            });
        }
        Ok(&**importer)
    }

    pub fn is_valid_asset(&self, path: &Path) -> bool {
        self.importer_for(path).is_ok()
    }
}

/// Classified result of a successful import.
#[derive(Clone, Debug, PartialEq)]
pub enum ImportOutcome {
    Animated(AnimationSheet),
    /// No animation tags; the frames can still be cut into plain sprites.
    SpritesOnly(AnimationSheet),
}

impl ImportOutcome {
    pub fn sheet(&self) -> &AnimationSheet {
        match self {
            Self::Animated(sheet) | Self::SpritesOnly(sheet) => sheet,
        }
    }

    pub fn into_sheet(self) -> AnimationSheet {
        match self {
            Self::Animated(sheet) | Self::SpritesOnly(sheet) => sheet,
        }
    }

    pub fn has_animations(&self) -> bool {
        matches!(self, Self::Animated(_))
    }
}

/// Runs one job through parse, reconstruction, timing and naming.
pub fn import_sheet(
    registry: &ImporterRegistry,
    job: &ImportJob,
    input: ImportInput<'_>,
    config: &ImportConfig,
) -> Result<ImportOutcome, Error> {
    let importer = registry.importer_for(job.asset_path())?;
    let parsed = importer.import(input)?;
    if !parsed.has_animations() {
        log::warn!(
            "no animations found in '{}'; use tags to name animations",
            job.file_name()
        );
    }

    let mut sheet = parsed
        .reconstruct()
        .bind_frames()
        .finalize(job.name(), config)?;
    sheet.asset_directory = job.asset_directory().to_path_buf();
    sheet.previous_import_settings = job.previous_import_settings.clone();

    Ok(if sheet.has_animations() {
        ImportOutcome::Animated(sheet)
    } else {
        ImportOutcome::SpritesOnly(sheet)
    })
}
