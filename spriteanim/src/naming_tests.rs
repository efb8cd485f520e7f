use crate::naming::{apply_naming_scheme, ensure_unique_names, prune_unnamed};
use crate::{
    Frame, FrameTag, ImportConfig, NamingScheme, ParsedSheet, RectI, SheetLayout, TimedSheet,
};
use std::collections::HashSet;

fn timed(frame_count: usize, tags: &[(&str, usize, usize)]) -> TimedSheet {
    ParsedSheet {
        layout: SheetLayout::new(128, 16),
        frames: (0..frame_count)
            .map(|i| Frame::new(RectI::new(i as i32 * 16, 0, 16, 16), 100))
            .collect(),
        tags: tags
            .iter()
            .map(|&(name, first, last)| FrameTag::new(name, first, last))
            .collect(),
    }
    .reconstruct()
    .bind_frames()
}

fn names(frames: &[Frame]) -> Vec<&str> {
    frames.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn classic_names_every_frame_by_sheet_index() {
    let mut sheet = timed(3, &[("idle", 0, 1)]);
    apply_naming_scheme("hero", NamingScheme::Classic, &mut sheet.frames, &sheet.animations);
    assert_eq!(names(&sheet.frames), vec!["hero 00", "hero 01", "hero 02"]);
}

#[test]
fn per_animation_schemes_format_names() {
    let cases = [
        (NamingScheme::FileAnimIndexZero, ["hero_run_00", "hero_run_01"]),
        (NamingScheme::FileAnimIndexOne, ["hero_run_01", "hero_run_02"]),
        (NamingScheme::AnimIndexZero, ["run_00", "run_01"]),
        (NamingScheme::AnimIndexOne, ["run_01", "run_02"]),
        (NamingScheme::FileAtAnimIndexZero, ["hero@run_00", "hero@run_01"]),
        (NamingScheme::FileAtAnimIndexOne, ["hero@run_01", "hero@run_02"]),
    ];
    for (scheme, expected) in cases {
        let mut sheet = timed(3, &[("run", 1, 2)]);
        apply_naming_scheme("hero", scheme, &mut sheet.frames, &sheet.animations);
        assert_eq!(names(&sheet.frames), vec!["", expected[0], expected[1]], "{scheme:?}");
    }
}

#[test]
fn category_frames_are_not_named_by_the_category() {
    let mut sheet = timed(6, &[("body", 0, 5), ("wave", 0, 1), ("nod", 4, 5)]);
    apply_naming_scheme("npc", NamingScheme::AnimIndexZero, &mut sheet.frames, &sheet.animations);
    assert_eq!(
        names(&sheet.frames),
        vec!["body_wave_00", "body_wave_01", "", "", "body_nod_00", "body_nod_01"]
    );
}

#[test]
fn duplicate_names_get_numeric_suffixes() {
    let mut frames = ["a", "a", "", "a", "a_1"]
        .iter()
        .map(|name| Frame {
            name: name.to_string(),
            ..Frame::default()
        })
        .collect::<Vec<_>>();
    ensure_unique_names(&mut frames);
    assert_eq!(names(&frames), vec!["a", "a_1", "", "a_2", "a_1_1"]);
}

#[test]
fn pruning_keeps_remaining_ranges_contiguous() {
    let mut frames = ["x", "", "y", "", "", "z"]
        .iter()
        .map(|name| Frame {
            name: name.to_string(),
            ..Frame::default()
        })
        .collect::<Vec<_>>();
    let remap = prune_unnamed(&mut frames);

    assert_eq!(names(&frames), vec!["x", "y", "z"]);
    assert_eq!(remap.range(&(0..3)), 0..2);
    assert_eq!(remap.range(&(2..3)), 1..2);
    assert_eq!(remap.range(&(3..5)), 2..2);
    assert_eq!(remap.range(&(0..6)), 0..3);
}

#[test]
fn finalized_names_are_unique_and_non_empty_for_every_scheme() {
    let tags = [
        ("walk", 0, 3),
        ("idle", 0, 1),
        ("run", 4, 7),
        ("idle", 4, 5),
        ("idle", 8, 9),
        ("idle", 10, 11),
    ];
    for scheme in NamingScheme::ALL {
        let config = ImportConfig {
            naming_scheme: scheme,
            ..ImportConfig::default()
        };
        let sheet = timed(13, &tags).finalize("hero", &config).expect("finalize");

        let mut seen = HashSet::new();
        for frame in &sheet.frames {
            assert!(!frame.name.is_empty(), "{scheme:?}");
            assert!(seen.insert(frame.name.clone()), "{scheme:?}: {}", frame.name);
        }
        for animation in sheet.clip_animations() {
            assert_eq!(
                sheet.animation_frames(animation).len(),
                animation.key_times.len() - 1,
                "{scheme:?}: {}",
                animation.name
            );
        }
    }
}

#[test]
fn pruned_frames_shift_animation_ranges() {
    let config = ImportConfig {
        naming_scheme: NamingScheme::AnimIndexOne,
        ..ImportConfig::default()
    };
    let sheet = timed(6, &[("idle", 1, 2), ("run", 4, 5)])
        .finalize("hero", &config)
        .expect("finalize");

    assert_eq!(names(&sheet.frames), vec!["idle_01", "idle_02", "run_01", "run_02"]);
    let run = sheet.animation("run").expect("run");
    assert_eq!(run.frames, 2..4);
    assert_eq!(sheet.frames[run.frames.start].rect.x, 64);
}
