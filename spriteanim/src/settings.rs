//! State carried over from earlier imports, and the name rules that decide looping.

use crate::{Error, SpriteAlignment, TargetObjectType, Vec2};
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whole-word name patterns for animations that play once.
#[derive(Clone, Debug, Default)]
pub struct LoopRules {
    non_looping: Option<Regex>,
}

impl LoopRules {
    /// Each fragment is wrapped in `\b` anchors and all are OR-ed into one case-sensitive regex.
    /// Empty fragments are ignored; no fragments means every animation loops.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, Error> {
        let alternatives = patterns
            .iter()
            .map(AsRef::as_ref)
            .filter(|p| !p.is_empty())
            .map(|p| format!(r"\b{p}\b"))
            .collect::<Vec<_>>();
        if alternatives.is_empty() {
            return Ok(Self::default());
        }
        let regex = Regex::new(&alternatives.join("|")).map_err(|e| Error::InvalidLoopPattern {
            message: e.to_string(),
        })?;
        Ok(Self {
            non_looping: Some(regex),
        })
    }

    pub fn is_looping(&self, animation_name: &str) -> bool {
        self.non_looping
            .as_ref()
            .is_none_or(|regex| !regex.is_match(animation_name))
    }
}

/// Pivot a user assigned to one sprite by hand.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpritePivot {
    pub alignment: SpriteAlignment,
    pub pivot: Vec2,
}

/// Texture import configuration found on the previously generated sheet image.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct TextureImportSettings {
    pub pixels_per_unit: f32,
    /// Keyed by sprite name.
    pub sprite_pivots: HashMap<String, SpritePivot>,
}

/// Snapshot of host-side state from an earlier import. Read, never computed, by the pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct PreviousImportSettings {
    pub texture: Option<TextureImportSettings>,
    /// Target type of each clip asset that already exists, keyed by its asset path.
    pub clip_targets: HashMap<PathBuf, TargetObjectType>,
}

impl PreviousImportSettings {
    pub fn has_texture_settings(&self) -> bool {
        self.texture.is_some()
    }

    pub fn clip_target(&self, clip_path: &Path) -> Option<TargetObjectType> {
        self.clip_targets.get(clip_path).copied()
    }

    pub fn record_clip_target(&mut self, clip_path: impl Into<PathBuf>, target: TargetObjectType) {
        self.clip_targets.insert(clip_path.into(), target);
    }

    pub fn sprite_pivot(&self, sprite_name: &str) -> Option<SpritePivot> {
        self.texture
            .as_ref()
            .and_then(|t| t.sprite_pivots.get(sprite_name))
            .copied()
    }
}
