//! Aseprite sheet metadata loader (`--format json-array --list-tags --list-slices`).
//!
//! The loader is IO-free: it operates on the JSON text the exporter wrote.

use crate::version::aseprite_version_hint;
use crate::{
    Error, Frame, FrameTag, ImportInput, MetadataSection, ParsedSheet, PointI, RectI,
    SheetImporter, SheetLayout, SizeI, Slice,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Root {
    #[serde(default)]
    frames: Option<serde_json::Value>,
    #[serde(default)]
    meta: Option<MetaDef>,
}

#[derive(Debug, Deserialize)]
struct FrameDef {
    frame: RectDef,
    #[serde(rename = "sourceSize")]
    source_size: SizeDef,
    #[serde(default)]
    duration: u32,
}

#[derive(Copy, Clone, Debug, Deserialize)]
struct RectDef {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl From<RectDef> for RectI {
    fn from(r: RectDef) -> Self {
        RectI::new(r.x, r.y, r.w, r.h)
    }
}

#[derive(Copy, Clone, Debug, Deserialize)]
struct SizeDef {
    w: i32,
    h: i32,
}

#[derive(Copy, Clone, Debug, Deserialize)]
struct PointDef {
    x: i32,
    y: i32,
}

#[derive(Debug, Deserialize)]
struct MetaDef {
    size: SizeDef,
    #[serde(default)]
    slices: Vec<SliceDef>,
    #[serde(default, rename = "frameTags")]
    frame_tags: Option<Vec<TagDef>>,
}

#[derive(Debug, Deserialize)]
struct TagDef {
    name: String,
    from: usize,
    to: usize,
}

#[derive(Debug, Deserialize)]
struct SliceDef {
    name: String,
    #[serde(default)]
    keys: Vec<SliceKeyDef>,
}

#[derive(Debug, Deserialize)]
struct SliceKeyDef {
    bounds: RectDef,
    #[serde(default)]
    pivot: Option<PointDef>,
}

/// Format importer registered for `.ase` / `.aseprite` sources.
#[derive(Copy, Clone, Debug, Default)]
pub struct AsepriteImporter;

impl SheetImporter for AsepriteImporter {
    fn import(&self, input: ImportInput<'_>) -> Result<ParsedSheet, Error> {
        match input {
            ImportInput::Json(json) => ParsedSheet::from_aseprite_json_str(json),
            ImportInput::Archive(_) => Err(Error::UnexpectedInput { expected: "JSON" }),
        }
    }
}

impl ParsedSheet {
    pub fn from_aseprite_json_str(input: &str) -> Result<Self, Error> {
        let root: Root = serde_json::from_str(input).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })?;

        let frames = parse_frames(root.frames)?;
        let source_size = frames
            .first()
            .map(|f| SizeI::new(f.source_size.w, f.source_size.h))
            .ok_or_else(|| missing(MetadataSection::Frames))?;

        let meta = root.meta.ok_or_else(|| missing(MetadataSection::Meta))?;
        let mut layout = SheetLayout::new(
            u32::try_from(meta.size.w).unwrap_or_default(),
            u32::try_from(meta.size.h).unwrap_or_default(),
        );
        layout.source_size = source_size;

        for slice_def in meta.slices {
            let mut slice = Slice::new(slice_def.name, source_size);
            // Only the first key is used; later keys animate the slice per frame.
            if let Some(key) = slice_def.keys.first() {
                slice.set_bounds(key.bounds.into());
                if let Some(pivot) = key.pivot {
                    slice.set_pivot(PointI::new(pivot.x, pivot.y));
                }
            }
            layout.push_slice(slice);
        }

        let tags = meta
            .frame_tags
            .ok_or_else(|| missing(MetadataSection::FrameTags))?
            .into_iter()
            .map(|t| FrameTag::new(t.name, t.from, t.to))
            .collect::<Vec<_>>();

        let canvas_height = meta.size.h;
        let frames = frames
            .into_iter()
            .map(|f| Frame::new(RectI::from(f.frame).flip_y(canvas_height), f.duration))
            .collect::<Vec<_>>();

        log::debug!(
            "parsed Aseprite sheet {}x{}: {} frames, {} tags, {} slices",
            layout.width,
            layout.height,
            frames.len(),
            tags.len(),
            layout.slices.len()
        );
        Ok(Self {
            layout,
            frames,
            tags,
        })
    }
}

fn parse_frames(value: Option<serde_json::Value>) -> Result<Vec<FrameDef>, Error> {
    // Hash-style exports (`--format json-hash`) carry frames as an object; treat as missing.
    let value = value
        .filter(serde_json::Value::is_array)
        .ok_or_else(|| missing(MetadataSection::Frames))?;
    serde_json::from_value(value).map_err(|e| Error::JsonParse {
        message: e.to_string(),
    })
}

fn missing(section: MetadataSection) -> Error {
    log::warn!("no {section} in Aseprite JSON; {}", aseprite_version_hint());
    Error::missing(section)
}
