use crate::naming::{apply_naming_scheme, ensure_unique_names, prune_unnamed};
use crate::{
    Error, Frame, ImportConfig, KeyframeTimes, LoopRules, PreviousImportSettings, SheetLayout,
    SpriteId, TimedSheet,
};
use std::ops::Range;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct SheetAnimation {
    pub name: String,
    pub is_category: bool,
    pub is_looping: bool,
    /// Range into [`AnimationSheet::frames`]. Categories may have lost frames to pruning.
    pub frames: Range<usize>,
    pub key_times: KeyframeTimes,
}

impl SheetAnimation {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Final import result: named frames, animations ready for clip authoring, sheet metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationSheet {
    pub name: String,
    pub asset_directory: PathBuf,
    pub layout: SheetLayout,
    pub frames: Vec<Frame>,
    pub animations: Vec<SheetAnimation>,
    pub previous_import_settings: Option<PreviousImportSettings>,
}

impl TimedSheet {
    /// Names and prunes frames and derives loop flags.
    pub fn finalize(
        self,
        sheet_name: &str,
        config: &ImportConfig,
    ) -> Result<AnimationSheet, Error> {
        let loop_rules = LoopRules::new(&config.non_looping_animations)?;
        let TimedSheet {
            layout,
            mut frames,
            animations,
        } = self;

        apply_naming_scheme(sheet_name, config.naming_scheme, &mut frames, &animations);
        ensure_unique_names(&mut frames);
        let remap = prune_unnamed(&mut frames);

        let animations = animations
            .into_iter()
            .map(|timed| {
                let is_category = timed.animation.is_category;
                SheetAnimation {
                    is_looping: is_category || loop_rules.is_looping(&timed.animation.name),
                    frames: remap.range(&timed.frames),
                    name: timed.animation.name,
                    is_category,
                    key_times: timed.key_times,
                }
            })
            .collect::<Vec<_>>();

        log::debug!(
            "finalized sheet '{sheet_name}': {} frames, {} animations",
            frames.len(),
            animations.len()
        );
        Ok(AnimationSheet {
            name: sheet_name.to_string(),
            asset_directory: PathBuf::new(),
            layout,
            frames,
            animations,
            previous_import_settings: None,
        })
    }
}

impl AnimationSheet {
    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn has_previous_texture_settings(&self) -> bool {
        self.previous_import_settings
            .as_ref()
            .is_some_and(PreviousImportSettings::has_texture_settings)
    }

    pub fn max_texture_size(&self) -> u32 {
        self.layout.max_texture_size()
    }

    /// Animations that get a clip.
    pub fn clip_animations(&self) -> impl Iterator<Item = &SheetAnimation> {
        self.animations.iter().filter(|a| !a.is_category)
    }

    pub fn animation_frames(&self, animation: &SheetAnimation) -> &[Frame] {
        &self.frames[animation.frames.clone()]
    }

    pub fn frame_by_name(&self, name: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.name == name)
    }

    pub fn animation(&self, name: &str) -> Option<&SheetAnimation> {
        self.clip_animations().find(|a| a.name == name)
    }

    /// Exact match first, otherwise the longest animation name contained in `name`, so a
    /// request for `idleAlt` falls back to `idle`.
    pub fn animation_or_similar(&self, name: &str) -> Option<&SheetAnimation> {
        self.animation(name).or_else(|| {
            self.clip_animations()
                .filter(|a| name.contains(a.name.as_str()))
                .max_by_key(|a| a.name.len())
        })
    }

    /// Binds host-created sprites to frames by name; order of `sprites` does not matter.
    pub fn apply_created_sprites<S: AsRef<str>>(&mut self, sprites: &[(S, SpriteId)]) {
        for (name, sprite) in sprites {
            let name = name.as_ref();
            match self.frames.iter_mut().find(|f| f.name == name) {
                Some(frame) => frame.sprite = Some(*sprite),
                None => log::debug!("created sprite '{name}' has no matching frame"),
            }
        }
    }
}
