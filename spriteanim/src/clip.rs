//! Engine-agnostic description of the animation clips a host should author.

use crate::{AnimationSheet, ImportConfig, SheetAnimation, SpriteId, TargetObjectType};
use std::path::{Path, PathBuf};

/// Sample rate hosts use for new clips unless they say otherwise.
pub const DEFAULT_CLIP_FRAME_RATE: f32 = 60.0;

/// `{dir}/{master}@{animation}.anim`
pub fn clip_asset_path(dir: &Path, master_name: &str, animation_name: &str) -> PathBuf {
    dir.join(format!("{master_name}@{animation_name}.anim"))
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClipKeyframe {
    pub time: f32,
    /// Index into [`AnimationSheet::frames`].
    pub frame: usize,
    pub sprite: Option<SpriteId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClipPlan {
    pub animation: String,
    pub path: PathBuf,
    pub looping: bool,
    pub target: TargetObjectType,
    /// One keyframe per frame plus a final one repeating the last frame.
    pub keyframes: Vec<ClipKeyframe>,
}

impl AnimationSheet {
    /// One plan per non-category animation. A clip that already exists keeps the target type
    /// recorded for it, so hand-edited bindings survive a re-import.
    pub fn clip_plans(
        &self,
        clips_dir: &Path,
        master_name: &str,
        config: &ImportConfig,
        frame_rate: f32,
    ) -> Vec<ClipPlan> {
        self.clip_animations()
            .map(|animation| {
                let path = clip_asset_path(clips_dir, master_name, &animation.name);
                let target = match self
                    .previous_import_settings
                    .as_ref()
                    .and_then(|p| p.clip_target(&path))
                {
                    Some(existing) => {
                        log::debug!(
                            "clip {} keeps its existing target {existing:?}",
                            path.display()
                        );
                        existing
                    }
                    None => config.target_object_type,
                };
                ClipPlan {
                    animation: animation.name.clone(),
                    looping: animation.is_looping,
                    target,
                    keyframes: self.clip_keyframes(animation, frame_rate),
                    path,
                }
            })
            .collect()
    }

    fn clip_keyframes(&self, animation: &SheetAnimation, frame_rate: f32) -> Vec<ClipKeyframe> {
        let mut keyframes = animation
            .frames
            .clone()
            .enumerate()
            .map(|(offset, frame)| ClipKeyframe {
                time: animation.key_times.time(offset).unwrap_or(0.0),
                frame,
                sprite: self.frames[frame].sprite,
            })
            .collect::<Vec<_>>();

        if let Some(last) = keyframes.last().copied() {
            keyframes.push(ClipKeyframe {
                time: animation.key_times.last_keyframe_time(frame_rate),
                ..last
            });
        }
        keyframes
    }
}
