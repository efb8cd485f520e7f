//! Frame naming and pruning of frames that no sprite will be cut for.

use crate::{Frame, NamingScheme, TimedAnimation};
use std::collections::HashSet;
use std::ops::Range;

/// Names frames in place. Classic names every frame by its sheet index; the other schemes only
/// name frames claimed by a non-category animation and leave the rest empty.
pub fn apply_naming_scheme(
    sheet_name: &str,
    scheme: NamingScheme,
    frames: &mut [Frame],
    animations: &[TimedAnimation],
) {
    let Some(first_index) = scheme.first_index() else {
        for (index, frame) in frames.iter_mut().enumerate() {
            frame.name = format!("{sheet_name} {index:02}");
        }
        return;
    };

    for timed in animations.iter().filter(|t| !t.animation.is_category) {
        let animation_name = &timed.animation.name;
        for (offset, frame) in frames[timed.frames.clone()].iter_mut().enumerate() {
            let index = first_index + offset;
            frame.name = match scheme.file_separator() {
                Some(separator) => format!("{sheet_name}{separator}{animation_name}_{index:02}"),
                None => format!("{animation_name}_{index:02}"),
            };
        }
    }
}

/// Suffixes repeated names (`_1`, `_2`, ...) so every named frame is unique in its sheet.
pub fn ensure_unique_names(frames: &mut [Frame]) {
    let mut seen = HashSet::<String>::new();
    for frame in frames.iter_mut().filter(|f| !f.name.is_empty()) {
        if seen.insert(frame.name.clone()) {
            continue;
        }
        let base = std::mem::take(&mut frame.name);
        let mut suffix = 1usize;
        let unique = loop {
            let candidate = format!("{base}_{suffix}");
            if !seen.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        log::warn!("duplicate frame name '{base}' renamed to '{unique}'");
        seen.insert(unique.clone());
        frame.name = unique;
    }
}

/// Drops unnamed frames and returns a mapping that translates old frame ranges to the
/// surviving list. Survivors of a contiguous range stay contiguous.
pub fn prune_unnamed(frames: &mut Vec<Frame>) -> FrameRemap {
    let mut kept_before = Vec::with_capacity(frames.len() + 1);
    let mut kept = 0usize;
    for frame in frames.iter() {
        kept_before.push(kept);
        if !frame.name.is_empty() {
            kept += 1;
        }
    }
    kept_before.push(kept);

    let before = frames.len();
    frames.retain(|f| !f.name.is_empty());
    if frames.len() != before {
        log::debug!("pruned {} unnamed frames", before - frames.len());
    }
    FrameRemap { kept_before }
}

#[derive(Clone, Debug)]
pub struct FrameRemap {
    kept_before: Vec<usize>,
}

impl FrameRemap {
    pub fn range(&self, old: &Range<usize>) -> Range<usize> {
        self.kept_before[old.start]..self.kept_before[old.end]
    }
}
