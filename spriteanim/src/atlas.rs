use crate::{AnimationSheet, ImportConfig, RectI, SpriteAlignment, Vec2};

/// Layout of the sprites a host should cut from the sheet image.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteAtlas {
    pub max_texture_size: u32,
    pub pixels_per_unit: f32,
    /// No earlier texture settings exist, so the host should apply its defaults
    /// (single-sprite-per-region, point filtering, no mipmaps, uncompressed).
    pub apply_default_texture_settings: bool,
    pub regions: Vec<SpriteRegion>,
}

impl SpriteAtlas {
    pub fn region(&self, name: &str) -> Option<&SpriteRegion> {
        self.regions.iter().find(|r| r.name == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteRegion {
    pub name: String,
    pub rect: RectI,
    pub alignment: SpriteAlignment,
    /// Normalized, bottom-left based.
    pub pivot: Vec2,
}

impl AnimationSheet {
    /// One region per surviving frame. The sheet pivot wins over the configured alignment, and a
    /// pivot set by hand on an earlier import wins over both.
    pub fn sprite_atlas(&self, config: &ImportConfig) -> SpriteAtlas {
        let (alignment, pivot) = match self.layout.custom_pivot {
            Some(pivot) => (SpriteAlignment::Custom, pivot),
            None => (
                config.sprite_alignment,
                config
                    .sprite_alignment
                    .normalized_pivot()
                    .unwrap_or(config.sprite_alignment_custom),
            ),
        };

        let previous = self.previous_import_settings.as_ref();
        let regions = self
            .frames
            .iter()
            .map(|frame| {
                let mut region = SpriteRegion {
                    name: frame.name.clone(),
                    rect: frame.rect,
                    alignment,
                    pivot,
                };
                if let Some(kept) = previous.and_then(|p| p.sprite_pivot(&frame.name)) {
                    region.alignment = kept.alignment;
                    region.pivot = kept.pivot;
                }
                region
            })
            .collect();

        let pixels_per_unit = previous
            .and_then(|p| p.texture.as_ref())
            .map_or(config.pixels_per_unit, |t| t.pixels_per_unit);

        SpriteAtlas {
            max_texture_size: self.max_texture_size(),
            pixels_per_unit,
            apply_default_texture_settings: !self.has_previous_texture_settings(),
            regions,
        }
    }
}
