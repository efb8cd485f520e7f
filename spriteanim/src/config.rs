use crate::Vec2;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How frames are named before they are cut into sprites.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NamingScheme {
    /// `file 00`, `file 01`, ... for every frame of the sheet.
    #[default]
    Classic,
    FileAnimIndexZero,
    FileAnimIndexOne,
    AnimIndexZero,
    AnimIndexOne,
    FileAtAnimIndexZero,
    FileAtAnimIndexOne,
}

impl NamingScheme {
    pub const ALL: [Self; 7] = [
        Self::Classic,
        Self::FileAnimIndexZero,
        Self::FileAnimIndexOne,
        Self::AnimIndexZero,
        Self::AnimIndexOne,
        Self::FileAtAnimIndexZero,
        Self::FileAtAnimIndexOne,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Classic => "file 00, file 01, ...",
            Self::FileAnimIndexZero => "file_anim_00, file_anim_01, ...",
            Self::FileAnimIndexOne => "file_anim_01, file_anim_02, ...",
            Self::AnimIndexZero => "anim_00, anim_01, ...",
            Self::AnimIndexOne => "anim_01, anim_02, ...",
            Self::FileAtAnimIndexZero => "file@anim_00, file@anim_01, ...",
            Self::FileAtAnimIndexOne => "file@anim_01, file@anim_02, ...",
        }
    }

    /// First animation-local index, or `None` for [`NamingScheme::Classic`].
    pub(crate) fn first_index(self) -> Option<usize> {
        match self {
            Self::Classic => None,
            Self::FileAnimIndexZero | Self::AnimIndexZero | Self::FileAtAnimIndexZero => Some(0),
            Self::FileAnimIndexOne | Self::AnimIndexOne | Self::FileAtAnimIndexOne => Some(1),
        }
    }

    /// Separator placed between the sheet name and the animation name, if the sheet name is used.
    pub(crate) fn file_separator(self) -> Option<char> {
        match self {
            Self::FileAnimIndexZero | Self::FileAnimIndexOne => Some('_'),
            Self::FileAtAnimIndexZero | Self::FileAtAnimIndexOne => Some('@'),
            Self::Classic | Self::AnimIndexZero | Self::AnimIndexOne => None,
        }
    }
}

/// Which component an authored clip animates.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TargetObjectType {
    #[default]
    Sprite,
    Image,
    Both,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpriteAlignment {
    Center,
    TopLeft,
    TopCenter,
    TopRight,
    LeftCenter,
    RightCenter,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
    Custom,
}

impl SpriteAlignment {
    /// Bottom-left based anchor for the fixed alignments; `None` for [`SpriteAlignment::Custom`].
    pub fn normalized_pivot(self) -> Option<Vec2> {
        let (x, y) = match self {
            Self::Center => (0.5, 0.5),
            Self::TopLeft => (0.0, 1.0),
            Self::TopCenter => (0.5, 1.0),
            Self::TopRight => (1.0, 1.0),
            Self::LeftCenter => (0.0, 0.5),
            Self::RightCenter => (1.0, 0.5),
            Self::BottomLeft => (0.0, 0.0),
            Self::BottomCenter => (0.5, 0.0),
            Self::BottomRight => (1.0, 0.0),
            Self::Custom => return None,
        };
        Some(Vec2::new(x, y))
    }
}

/// Where generated assets go, relative to the imported file's directory.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssetTargetLocation {
    SameDirectory,
    SubDirectory(String),
    GlobalDirectory(PathBuf),
}

impl AssetTargetLocation {
    pub fn target_directory(&self, asset_directory: &Path) -> PathBuf {
        match self {
            Self::SameDirectory => asset_directory.to_path_buf(),
            Self::SubDirectory(name) => asset_directory.join(name),
            Self::GlobalDirectory(path) => path.clone(),
        }
    }
}

/// Per-job import options. Read-only for the whole pipeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ImportConfig {
    pub naming_scheme: NamingScheme,
    /// Regex fragments matched as whole words against animation names.
    pub non_looping_animations: Vec<String>,
    pub target_object_type: TargetObjectType,
    pub sprite_alignment: SpriteAlignment,
    pub sprite_alignment_custom: Vec2,
    pub pixels_per_unit: f32,
    pub sprites_location: AssetTargetLocation,
    pub animations_location: AssetTargetLocation,
    pub controllers_location: AssetTargetLocation,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            naming_scheme: NamingScheme::default(),
            non_looping_animations: vec!["death".to_string()],
            target_object_type: TargetObjectType::default(),
            sprite_alignment: SpriteAlignment::default(),
            sprite_alignment_custom: Vec2::ZERO,
            pixels_per_unit: 100.0,
            sprites_location: AssetTargetLocation::SubDirectory("Sprites".to_string()),
            animations_location: AssetTargetLocation::SubDirectory("Animations".to_string()),
            controllers_location: AssetTargetLocation::SameDirectory,
        }
    }
}

impl ImportConfig {
    #[cfg(feature = "serde")]
    pub fn from_json_str(input: &str) -> Result<Self, crate::Error> {
        serde_json::from_str(input).map_err(|e| crate::Error::JsonParse {
            message: e.to_string(),
        })
    }

    #[cfg(feature = "serde")]
    pub fn to_json_string(&self) -> Result<String, crate::Error> {
        serde_json::to_string_pretty(self).map_err(|e| crate::Error::JsonParse {
            message: e.to_string(),
        })
    }

    /// Returns `false` when the name is empty or already listed.
    pub fn add_non_looping_animation(&mut self, name: &str) -> bool {
        if name.is_empty() || self.non_looping_animations.iter().any(|n| n == name) {
            return false;
        }
        self.non_looping_animations.push(name.to_string());
        true
    }

    pub fn remove_non_looping_animation(&mut self, index: usize) -> Option<String> {
        (index < self.non_looping_animations.len())
            .then(|| self.non_looping_animations.remove(index))
    }
}
