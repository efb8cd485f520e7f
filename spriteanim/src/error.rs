use std::fmt;
use thiserror::Error;

/// Required part of an export that was absent from the decoded input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MetadataSection {
    Frames,
    Meta,
    FrameTags,
    Tileset,
    Canvas,
    ArchiveEntry(String),
}

impl fmt::Display for MetadataSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frames => f.write_str("'frames' array"),
            Self::Meta => f.write_str("'meta' object"),
            Self::FrameTags => f.write_str("'frameTags' array"),
            Self::Tileset => f.write_str("'tileset' object"),
            Self::Canvas => f.write_str("'canvas' object"),
            Self::ArchiveEntry(name) => write!(f, "archive entry '{name}'"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed sprite sheet metadata: missing {section}")]
    MalformedMetadata { section: MetadataSection },

    #[cfg(feature = "serde")]
    #[error("failed to parse sheet JSON: {message}")]
    JsonParse { message: String },

    #[cfg(feature = "pyxel")]
    #[error("failed to decode layer image '{entry}': {message}")]
    LayerImage { entry: String, message: String },

    #[error("invalid non-looping animation pattern: {message}")]
    InvalidLoopPattern { message: String },

    #[error("no importer registered for extension '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("importer for '{extension}' is not available")]
    ImporterUnavailable { extension: String },

    #[error("importer expected {expected} input")]
    UnexpectedInput { expected: &'static str },

    #[error("export tool exited with code {code}")]
    ExportFailed { code: i32 },

    #[error("failed to launch export tool: {message}")]
    ExportLaunch { message: String },
}

impl Error {
    #[cfg_attr(not(any(feature = "aseprite", feature = "pyxel")), allow(dead_code))]
    pub(crate) fn missing(section: MetadataSection) -> Self {
        Self::MalformedMetadata { section }
    }
}
