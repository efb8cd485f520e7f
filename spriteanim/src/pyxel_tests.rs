use crate::pyxel::{
    DOC_DATA_ENTRY, PyxelDocument, blend_layer, blend_pixel, layer_entry_name, png_dimensions,
};
use crate::{
    ArchiveEntries, Error, ImportConfig, ImportInput, ImportJob, ImporterRegistry, MetadataSection,
    NamingScheme, ParsedSheet, PyxelImporter, RectI, SheetImporter, SizeI, import_sheet,
};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

const DOC_JSON: &str = r#"
{
  "name": "slime",
  "version": "0.4.8",
  "tileset": { "tileWidth": 8, "tileHeight": 8, "tilesWide": 2, "fixedWidth": true, "numTiles": 4 },
  "canvas": {
    "width": 16, "height": 16, "tileWidth": 8, "tileHeight": 8, "numLayers": 3,
    "layers": {
      "0": { "name": "top", "alpha": 128, "hidden": false, "blendMode": "normal",
             "tileRefs": { "0": { "index": 0, "rot": 0, "flipX": false }, "3": { "index": 2, "rot": 1, "flipX": true } } },
      "1": { "name": "base", "alpha": 255, "hidden": false, "blendMode": "normal", "tileRefs": {} },
      "2": { "name": "sketch", "alpha": 255, "hidden": true, "blendMode": "multiply", "tileRefs": {} }
    }
  },
  "animations": {
    "0": { "name": "idle", "baseTile": 0, "length": 2, "frameDurationMultipliers": [100, 150], "frameDuration": 100 },
    "1": { "name": "blink", "baseTile": 3, "length": 1, "frameDurationMultipliers": [], "frameDuration": 200 },
    "2": { "name": "unused", "baseTile": 0, "length": 0, "frameDurationMultipliers": [], "frameDuration": 100 }
  }
}
"#;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).expect("encode png");
    bytes.into_inner()
}

fn archive() -> ArchiveEntries {
    let mut entries = ArchiveEntries::new();
    entries.insert(DOC_DATA_ENTRY.to_string(), DOC_JSON.as_bytes().to_vec());
    entries.insert(layer_entry_name(0), png(16, 16, BLUE));
    entries.insert(layer_entry_name(1), png(16, 16, RED));
    entries
}

#[test]
fn document_parses_layers_and_tile_refs() {
    let document = PyxelDocument::from_json_str(DOC_JSON).expect("parse");
    let canvas = document.canvas.as_ref().expect("canvas");

    assert_eq!(document.name.as_deref(), Some("slime"));
    assert_eq!(canvas.layers.len(), 3);
    assert_eq!(canvas.layers[&0].alpha, 128);
    assert!(canvas.layers[&2].hidden);
    let tile = canvas.layers[&0].tile_refs[&3];
    assert_eq!((tile.index, tile.rot, tile.flip_x), (2, 1, true));
    assert_eq!(document.animations[&1].frame_duration_at(0), 200);
}

#[test]
fn frames_follow_the_tile_grid() {
    let document = PyxelDocument::from_json_str(DOC_JSON).expect("parse");
    let sheet = ParsedSheet::from_pyxel_document(&document).expect("sheet");

    assert_eq!(sheet.layout.width, 16);
    assert_eq!(sheet.layout.source_size, SizeI::new(8, 8));
    let rects = sheet.frames.iter().map(|f| f.rect).collect::<Vec<_>>();
    assert_eq!(
        rects,
        vec![
            RectI::new(0, 0, 8, 8),
            RectI::new(8, 0, 8, 8),
            RectI::new(8, 8, 8, 8),
        ]
    );
    let durations = sheet.frames.iter().map(|f| f.duration).collect::<Vec<_>>();
    assert_eq!(durations, vec![100, 150, 200]);

    let tags = sheet
        .tags
        .iter()
        .map(|t| (t.name.as_str(), t.first, t.last))
        .collect::<Vec<_>>();
    assert_eq!(tags, vec![("idle", 0, 1), ("blink", 2, 2)]);
}

#[test]
fn duration_multipliers_are_percentages() {
    let document = PyxelDocument::from_json_str(
        r#"{ "animations": { "0": { "name": "a", "baseTile": 0, "length": 3,
             "frameDurationMultipliers": [33, 250], "frameDuration": 100 } } }"#,
    )
    .expect("parse");
    let animation = &document.animations[&0];
    assert_eq!(animation.frame_duration_at(0), 33);
    assert_eq!(animation.frame_duration_at(1), 250);
    assert_eq!(animation.frame_duration_at(2), 100);
}

#[test]
fn visible_layers_are_composited_back_to_front() {
    let sheet = ParsedSheet::from_pyxel_archive(&archive()).expect("archive");
    let texture = sheet.layout.texture.as_ref().expect("texture");

    assert_eq!((texture.width, texture.height), (16, 16));
    assert_eq!(texture.rgba.len(), 16 * 16 * 4);
    // Blue at layer alpha 128 over opaque red.
    assert_eq!(&texture.rgba[..4], &[127, 0, 128, 255]);
    assert_eq!(&texture.rgba[texture.rgba.len() - 4..], &[127, 0, 128, 255]);
}

#[test]
fn blend_interpolates_color_and_alpha() {
    let half_blue = Rgba([0, 0, 255, 128]);
    assert_eq!(blend_pixel(Rgba(RED), half_blue, 1.0), Rgba([127, 0, 128, 255]));
    assert_eq!(blend_pixel(Rgba(RED), Rgba(BLUE), 0.5), Rgba([128, 0, 128, 255]));
    assert_eq!(blend_pixel(Rgba([0, 0, 0, 0]), Rgba(RED), 1.0), Rgba(RED));
    assert_eq!(blend_pixel(Rgba(RED), Rgba([0, 255, 0, 0]), 1.0), Rgba(RED));
}

#[test]
fn smaller_layer_only_covers_its_own_area() {
    let mut base = RgbaImage::from_pixel(4, 4, Rgba(RED));
    let layer = RgbaImage::from_pixel(2, 2, Rgba(BLUE));
    blend_layer(&mut base, &layer, 1.0);

    assert_eq!(*base.get_pixel(1, 1), Rgba(BLUE));
    assert_eq!(*base.get_pixel(2, 2), Rgba(RED));
}

#[test]
fn png_header_probe_reads_dimensions() {
    assert_eq!(png_dimensions(&png(3, 5, RED)), Some((3, 5)));
    assert_eq!(png_dimensions(b"GIF89a not a png at all"), None);
    assert_eq!(png_dimensions(&[]), None);
}

#[test]
fn missing_entries_are_reported() {
    let mut entries = archive();
    entries.remove(&layer_entry_name(1));
    let err = ParsedSheet::from_pyxel_archive(&entries).expect_err("missing layer");
    assert!(matches!(
        err,
        Error::MalformedMetadata {
            section: MetadataSection::ArchiveEntry(ref name)
        } if name == "layer1.png"
    ));

    let err = ParsedSheet::from_pyxel_archive(&ArchiveEntries::new()).expect_err("missing doc");
    assert!(matches!(
        err,
        Error::MalformedMetadata {
            section: MetadataSection::ArchiveEntry(ref name)
        } if name == "docData.json"
    ));
}

#[test]
fn corrupt_layer_image_is_reported() {
    let mut entries = archive();
    entries.insert(layer_entry_name(0), b"not an image".to_vec());
    let err = ParsedSheet::from_pyxel_archive(&entries).expect_err("corrupt");
    assert!(matches!(err, Error::LayerImage { ref entry, .. } if entry == "layer0.png"));
}

#[test]
fn broken_tileset_or_canvas_is_malformed() {
    let cases = [
        (r#"{ "canvas": { "width": 16, "height": 16 } }"#, MetadataSection::Tileset),
        (r#"{ "tileset": { "tileWidth": 8, "tileHeight": 8 } }"#, MetadataSection::Canvas),
        (
            r#"{ "tileset": { "tileWidth": 0, "tileHeight": 8 }, "canvas": { "width": 16, "height": 16 } }"#,
            MetadataSection::Tileset,
        ),
        (
            r#"{ "tileset": { "tileWidth": 32, "tileHeight": 8 }, "canvas": { "width": 16, "height": 16 } }"#,
            MetadataSection::Tileset,
        ),
    ];
    for (json, expected) in cases {
        let document = PyxelDocument::from_json_str(json).expect("parse");
        match ParsedSheet::from_pyxel_document(&document) {
            Err(Error::MalformedMetadata { section }) => assert_eq!(section, expected, "{json}"),
            other => panic!("unexpected result {other:?} for {json}"),
        }
    }
}

#[test]
fn tiles_past_the_coordinate_range_are_malformed() {
    let cases = [
        r#"{ "tileset": { "tileWidth": 8, "tileHeight": 8 }, "canvas": { "width": 16, "height": 16 },
             "animations": { "0": { "name": "far", "baseTile": 1000000000, "length": 1 } } }"#,
        r#"{ "tileset": { "tileWidth": 8, "tileHeight": 8 }, "canvas": { "width": 16, "height": 16 },
             "animations": { "0": { "name": "wrap", "baseTile": 4294967295, "length": 2 } } }"#,
        r#"{ "tileset": { "tileWidth": 4294967295, "tileHeight": 8 },
             "canvas": { "width": 4294967295, "height": 16 } }"#,
    ];
    for json in cases {
        let document = PyxelDocument::from_json_str(json).expect("parse");
        match ParsedSheet::from_pyxel_document(&document) {
            Err(Error::MalformedMetadata { section }) => {
                assert_eq!(section, MetadataSection::Tileset, "{json}")
            }
            other => panic!("unexpected result {other:?} for {json}"),
        }
    }
}

#[test]
fn oversized_canvas_is_rejected_before_compositing() {
    let json = r#"{ "tileset": { "tileWidth": 8, "tileHeight": 8 },
                    "canvas": { "width": 4294967295, "height": 4294967295, "layers": {} } }"#;
    let mut entries = ArchiveEntries::new();
    entries.insert(DOC_DATA_ENTRY.to_string(), json.as_bytes().to_vec());

    let err = ParsedSheet::from_pyxel_archive(&entries).expect_err("oversized canvas");
    assert!(matches!(
        err,
        Error::MalformedMetadata {
            section: MetadataSection::Canvas
        }
    ));
}

#[test]
fn importer_requires_archive_input() {
    let err = PyxelImporter
        .import(ImportInput::Json("{}"))
        .expect_err("json input");
    assert!(matches!(err, Error::UnexpectedInput { expected: "archive" }));
}

#[test]
fn builtin_registry_imports_pyxel_end_to_end() {
    let registry = ImporterRegistry::with_builtin_importers();
    let entries = archive();
    let config = ImportConfig {
        naming_scheme: NamingScheme::FileAnimIndexOne,
        ..ImportConfig::default()
    };

    let outcome = import_sheet(
        &registry,
        &ImportJob::new("Art/slime.pyxel"),
        ImportInput::Archive(&entries),
        &config,
    )
    .expect("import");
    let sheet = outcome.sheet();

    let names = sheet.frames.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["slime_idle_01", "slime_idle_02", "slime_blink_01"]);
    assert!(sheet.layout.texture.is_some());
    assert_eq!(sheet.max_texture_size(), 16);
}
