//! Engine-agnostic importer for pixel-art sprite sheet animations.
//!
//! Exporter metadata (Aseprite JSON, PyxelEdit archives) goes through a fixed pipeline:
//! [`ParsedSheet`] → [`ParsedSheet::reconstruct`] → [`ReconstructedSheet::bind_frames`] →
//! [`TimedSheet::finalize`] → [`AnimationSheet`]. The crate never touches the file system; the
//! host reads inputs, runs the exporter through [`ExportTool`], and authors the sprites and clips
//! described by [`SpriteAtlas`] and [`ClipPlan`].

#![forbid(unsafe_code)]

mod atlas;
mod clip;
mod config;
mod error;
mod export;
mod geometry;
mod job;
mod model;
mod reconstruct;
mod registry;
mod settings;
mod sheet;
mod timing;
mod version;

pub mod naming;

#[cfg(feature = "aseprite")]
pub mod aseprite;

#[cfg(feature = "pyxel")]
pub mod pyxel;

pub use atlas::*;
pub use clip::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use geometry::*;
pub use job::*;
pub use model::*;
pub use reconstruct::*;
pub use registry::*;
pub use settings::*;
pub use sheet::*;
pub use timing::*;
pub use version::*;

#[cfg(feature = "aseprite")]
pub use aseprite::AsepriteImporter;

#[cfg(feature = "pyxel")]
pub use pyxel::PyxelImporter;




#[cfg(test)]
mod naming_tests;

#[cfg(test)]
mod settings_tests;





#[cfg(all(test, feature = "pyxel"))]
mod pyxel_tests;
