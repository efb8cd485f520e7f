//! PyxelEdit document loader.
//!
//! A `.pyxel` file is an archive holding `docData.json` and one `layer{N}.png` per layer. The
//! host extracts the archive; this module only sees the entries.

use crate::{
    ArchiveEntries, Error, Frame, FrameTag, ImportInput, MetadataSection, ParsedSheet, RectI,
    SheetImporter, SheetLayout, SizeI, Texture,
};
use byteorder::{BigEndian, ByteOrder};
use image::{ImageFormat, Rgba, RgbaImage};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const DOC_DATA_ENTRY: &str = "docData.json";

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub fn layer_entry_name(index: u32) -> String {
    format!("layer{index}.png")
}

fn default_alpha() -> u32 {
    255
}

fn default_blend_mode() -> String {
    "normal".to_string()
}

fn default_frame_duration() -> u32 {
    200
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PyxelDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub tileset: Option<Tileset>,
    #[serde(default)]
    pub canvas: Option<Canvas>,
    #[serde(default)]
    pub animations: BTreeMap<u32, PyxelAnimation>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tileset {
    pub tile_width: u32,
    pub tile_height: u32,
    #[serde(default)]
    pub tiles_wide: u32,
    #[serde(default)]
    pub fixed_width: bool,
    #[serde(default)]
    pub num_tiles: u32,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub tile_width: u32,
    #[serde(default)]
    pub tile_height: u32,
    #[serde(default)]
    pub num_layers: u32,
    /// Layer 0 is the top-most layer.
    #[serde(default)]
    pub layers: BTreeMap<u32, Layer>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_alpha")]
    pub alpha: u32,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_blend_mode")]
    pub blend_mode: String,
    /// Sparse tile grid: cell index to placed tile.
    #[serde(default)]
    pub tile_refs: BTreeMap<u32, TileRef>,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct TileRef {
    pub index: u32,
    #[serde(default)]
    pub rot: u32,
    #[serde(default, rename = "flipX")]
    pub flip_x: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyxelAnimation {
    pub name: String,
    #[serde(default)]
    pub base_tile: usize,
    pub length: usize,
    /// Percent of `frame_duration` per frame; 100 when absent.
    #[serde(default)]
    pub frame_duration_multipliers: Vec<u32>,
    #[serde(default = "default_frame_duration")]
    pub frame_duration: u32,
}

impl PyxelAnimation {
    pub fn frame_duration_at(&self, frame_index: usize) -> u32 {
        match self.frame_duration_multipliers.get(frame_index).copied() {
            None | Some(100) => self.frame_duration,
            Some(multiplier) => {
                (f64::from(self.frame_duration) * f64::from(multiplier) / 100.0).round() as u32
            }
        }
    }
}

impl PyxelDocument {
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        serde_json::from_str(input).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })
    }
}

/// Format importer registered for `.pyxel` sources.
#[derive(Copy, Clone, Debug, Default)]
pub struct PyxelImporter;

impl SheetImporter for PyxelImporter {
    fn import(&self, input: ImportInput<'_>) -> Result<ParsedSheet, Error> {
        match input {
            ImportInput::Archive(entries) => ParsedSheet::from_pyxel_archive(entries),
            ImportInput::Json(_) => Err(Error::UnexpectedInput {
                expected: "archive",
            }),
        }
    }
}

impl ParsedSheet {
    /// Parses the descriptor and recomposes the visible layers into the sheet texture.
    pub fn from_pyxel_archive(entries: &ArchiveEntries) -> Result<Self, Error> {
        let doc_bytes = entries
            .get(DOC_DATA_ENTRY)
            .ok_or_else(|| {
                Error::missing(MetadataSection::ArchiveEntry(DOC_DATA_ENTRY.into()))
            })?;
        let json = std::str::from_utf8(doc_bytes).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })?;
        let document = PyxelDocument::from_json_str(json)?;

        let mut sheet = Self::from_pyxel_document(&document)?;
        let canvas = document
            .canvas
            .as_ref()
            .ok_or_else(|| Error::missing(MetadataSection::Canvas))?;
        let image = composite_layers(canvas, entries)?;
        sheet.layout.texture = Some(Texture {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        });
        Ok(sheet)
    }

    /// Frames and tags only. Each animation's frames are appended to the flat frame list and
    /// the animation becomes a tag over its span.
    pub fn from_pyxel_document(document: &PyxelDocument) -> Result<Self, Error> {
        let tileset = document
            .tileset
            .as_ref()
            .ok_or_else(|| Error::missing(MetadataSection::Tileset))?;
        let canvas = document
            .canvas
            .as_ref()
            .ok_or_else(|| Error::missing(MetadataSection::Canvas))?;

        let columns = canvas.width.checked_div(tileset.tile_width).unwrap_or(0) as usize;
        if columns == 0 || tileset.tile_height == 0 {
            log::warn!(
                "tile size {}x{} does not fit canvas width {}",
                tileset.tile_width,
                tileset.tile_height,
                canvas.width
            );
            return Err(Error::missing(MetadataSection::Tileset));
        }
        let (Ok(tile_width), Ok(tile_height)) = (
            i32::try_from(tileset.tile_width),
            i32::try_from(tileset.tile_height),
        ) else {
            log::warn!(
                "tile size {}x{} is out of range",
                tileset.tile_width,
                tileset.tile_height
            );
            return Err(Error::missing(MetadataSection::Tileset));
        };

        let mut frames = Vec::new();
        let mut tags = Vec::with_capacity(document.animations.len());
        for animation in document.animations.values() {
            if animation.length == 0 {
                log::warn!("skipping empty animation '{}'", animation.name);
                continue;
            }
            let first = frames.len();
            for frame_index in 0..animation.length {
                let rect = animation
                    .base_tile
                    .checked_add(frame_index)
                    .and_then(|tile| tile_rect(tile, columns, tile_width, tile_height))
                    .ok_or_else(|| {
                        log::warn!(
                            "animation '{}' frame {} lies outside the tile grid",
                            animation.name,
                            frame_index
                        );
                        Error::missing(MetadataSection::Tileset)
                    })?;
                frames.push(Frame::new(rect, animation.frame_duration_at(frame_index)));
            }
            tags.push(FrameTag::new(animation.name.clone(), first, frames.len() - 1));
        }

        let mut layout = SheetLayout::new(canvas.width, canvas.height);
        layout.source_size = SizeI::new(tile_width, tile_height);

        log::debug!(
            "parsed PyxelEdit document {:?}: {} frames, {} animations",
            document.name,
            frames.len(),
            tags.len()
        );
        Ok(Self {
            layout,
            frames,
            tags,
        })
    }
}

/// Pixel rectangle of tile `tile` in a grid `columns` tiles wide; `None` when it leaves `i32`.
fn tile_rect(tile: usize, columns: usize, tile_width: i32, tile_height: i32) -> Option<RectI> {
    let column = i32::try_from(tile % columns).ok()?;
    let row = i32::try_from(tile / columns).ok()?;
    Some(RectI::new(
        column.checked_mul(tile_width)?,
        row.checked_mul(tile_height)?,
        tile_width,
        tile_height,
    ))
}

/// Largest canvas, in RGBA bytes, that is recomposited.
pub const MAX_CANVAS_BYTES: u64 = 1 << 30;

/// Composites visible layers back to front (highest index first) over a transparent canvas.
pub fn composite_layers(canvas: &Canvas, entries: &ArchiveEntries) -> Result<RgbaImage, Error> {
    let bytes = u64::from(canvas.width)
        .checked_mul(u64::from(canvas.height))
        .and_then(|pixels| pixels.checked_mul(4));
    if !bytes.is_some_and(|bytes| bytes <= MAX_CANVAS_BYTES) {
        log::warn!(
            "canvas {}x{} is too large to composite",
            canvas.width,
            canvas.height
        );
        return Err(Error::missing(MetadataSection::Canvas));
    }
    let mut image = RgbaImage::new(canvas.width, canvas.height);
    for (&index, layer) in canvas.layers.iter().rev() {
        if layer.hidden {
            continue;
        }
        let entry = layer_entry_name(index);
        let bytes = entries
            .get(&entry)
            .ok_or_else(|| Error::missing(MetadataSection::ArchiveEntry(entry.clone())))?;
        let layer_image = decode_layer(&entry, bytes, canvas)?;
        if layer.blend_mode != "normal" {
            log::warn!(
                "layer '{}' uses blend mode '{}'; compositing as normal",
                layer.name,
                layer.blend_mode
            );
        }
        blend_layer(&mut image, &layer_image, layer.alpha as f32 / 255.0);
    }
    Ok(image)
}

/// Blends `layer` onto `base` over their overlapping area.
pub fn blend_layer(base: &mut RgbaImage, layer: &RgbaImage, opacity: f32) {
    let width = base.width().min(layer.width());
    let height = base.height().min(layer.height());
    for y in 0..height {
        for x in 0..width {
            let top = *layer.get_pixel(x, y);
            let bottom = base.get_pixel_mut(x, y);
            *bottom = blend_pixel(*bottom, top, opacity);
        }
    }
}

/// Color moves toward `top` by its effective alpha; coverage moves toward fully opaque.
pub fn blend_pixel(base: Rgba<u8>, top: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let t = (unit(top[3]) * opacity).clamp(0.0, 1.0);
    let lerp = |a: f32, b: f32| a + (b - a) * t;
    let channel = |i: usize| to_byte(lerp(unit(base[i]), unit(top[i])));
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        to_byte(lerp(unit(base[3]), 1.0)),
    ])
}

fn unit(v: u8) -> f32 {
    f32::from(v) / 255.0
}

fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Width and height from a PNG's IHDR chunk, without decoding.
pub fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    Some((
        BigEndian::read_u32(&bytes[16..20]),
        BigEndian::read_u32(&bytes[20..24]),
    ))
}

fn decode_layer(entry: &str, bytes: &[u8], canvas: &Canvas) -> Result<RgbaImage, Error> {
    let (width, height) = png_dimensions(bytes).ok_or_else(|| Error::LayerImage {
        entry: entry.to_string(),
        message: "not a PNG image".to_string(),
    })?;
    if (width, height) != (canvas.width, canvas.height) {
        log::warn!(
            "{entry} is {width}x{height} but the canvas is {}x{}",
            canvas.width,
            canvas.height
        );
    }
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(|e| {
        Error::LayerImage {
            entry: entry.to_string(),
            message: e.to_string(),
        }
    })?;
    Ok(image.to_rgba8())
}
