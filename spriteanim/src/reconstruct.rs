//! Rebuilds the animation hierarchy from the exporter's flat tag list.

use crate::{Frame, FrameTag, ParsedSheet, SheetLayout};

/// An animation tag after category detection and name disambiguation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Animation {
    pub name: String,
    /// Inclusive source frame range; only meaningful against the parser's frame list.
    pub first: usize,
    pub last: usize,
    /// Another tag's range lies inside this one. Categories never become clips.
    pub is_category: bool,
}

impl Animation {
    pub fn from_tag(tag: &FrameTag) -> Self {
        Self {
            name: tag.name.clone(),
            first: tag.first,
            last: tag.last,
            is_category: false,
        }
    }

    /// `last - first + 1`, or zero for an inverted range.
    pub fn frame_count(&self) -> usize {
        self.last.saturating_add(1).saturating_sub(self.first)
    }

    /// Non-strict containment: an identical range counts as contained.
    pub fn is_within(&self, other: &Animation) -> bool {
        self.first >= other.first && self.last <= other.last
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReconstructedSheet {
    pub layout: SheetLayout,
    pub frames: Vec<Frame>,
    pub animations: Vec<Animation>,
}

impl ReconstructedSheet {
    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }
}

impl ParsedSheet {
    pub fn reconstruct(self) -> ReconstructedSheet {
        let animations = reconstruct_animations(&self.tags);
        log::debug!(
            "reconstructed {} animations ({} categories) over {} frames",
            animations.len(),
            animations.iter().filter(|a| a.is_category).count(),
            self.frames.len()
        );
        ReconstructedSheet {
            layout: self.layout,
            frames: self.frames,
            animations,
        }
    }
}

pub fn reconstruct_animations(tags: &[FrameTag]) -> Vec<Animation> {
    let mut animations: Vec<Animation> = Vec::with_capacity(tags.len());

    // A tag can only turn an earlier tag into a category, never a later one.
    for tag in tags {
        let animation = Animation::from_tag(tag);
        for existing in animations.iter_mut().rev() {
            if animation.is_within(existing) {
                existing.is_category = true;
            }
        }
        animations.push(animation);
    }

    for index in 0..animations.len() {
        if animations[index].is_category {
            continue;
        }
        for other in (0..animations.len()).rev() {
            let other_name = animations[other].name.clone();
            if same_name_ignoring_case(&animations[index].name, &other_name) {
                continue;
            }
            if animations[index].is_within(&animations[other]) {
                let renamed = format!("{other_name}_{}", animations[index].name);
                animations[index].name = renamed;
            }
        }
    }

    animations
}

fn same_name_ignoring_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
