use crate::geometry::normalized_pivot;
use crate::{PointI, RectI, SizeI, Vec2};

/// Opaque handle to a sprite produced by the host after slicing the sheet image.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SpriteId(pub u64);

/// One rectangular region of the sheet image shown for `duration` milliseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub rect: RectI,
    pub duration: u32,
    /// Empty until the naming stage runs.
    pub name: String,
    pub sprite: Option<SpriteId>,
}

impl Frame {
    pub fn new(rect: RectI, duration: u32) -> Self {
        Self {
            rect,
            duration,
            name: String::new(),
            sprite: None,
        }
    }
}

/// A named, inclusive index range over the flat frame list, as written by the exporter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrameTag {
    pub name: String,
    pub first: usize,
    pub last: usize,
}

impl FrameTag {
    pub fn new(name: impl Into<String>, first: usize, last: usize) -> Self {
        Self {
            name: name.into(),
            first,
            last,
        }
    }
}

/// Named rectangle with an optional pivot, defined once per sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    name: String,
    bounds: RectI,
    pivot: Option<PointI>,
    source_size: SizeI,
    normalized_pivot: Option<Vec2>,
}

impl Slice {
    pub fn new(name: impl Into<String>, source_size: SizeI) -> Self {
        Self {
            name: name.into(),
            bounds: RectI::default(),
            pivot: None,
            source_size,
            normalized_pivot: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> RectI {
        self.bounds
    }

    pub fn pivot(&self) -> Option<PointI> {
        self.pivot
    }

    pub fn source_size(&self) -> SizeI {
        self.source_size
    }

    /// `None` until a pivot has been set.
    pub fn normalized_pivot(&self) -> Option<Vec2> {
        self.normalized_pivot
    }

    pub fn set_bounds(&mut self, bounds: RectI) {
        self.bounds = bounds;
        self.update_normalized_pivot();
    }

    pub fn set_pivot(&mut self, pivot: PointI) {
        self.pivot = Some(pivot);
        self.update_normalized_pivot();
    }

    fn update_normalized_pivot(&mut self) {
        self.normalized_pivot = self
            .pivot
            .map(|pivot| normalized_pivot(self.bounds, pivot, self.source_size));
    }
}

/// RGBA8 image recomposed by an importer (row-major, top-left origin).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Sheet-level data that every pipeline stage carries through unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SheetLayout {
    pub width: u32,
    pub height: u32,
    /// Untrimmed size of a single source frame.
    pub source_size: SizeI,
    pub slices: Vec<Slice>,
    /// Pivot of the first slice that defines one.
    pub custom_pivot: Option<Vec2>,
    pub texture: Option<Texture>,
}

impl SheetLayout {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn max_texture_size(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn uses_custom_pivot(&self) -> bool {
        self.custom_pivot.is_some()
    }

    /// Records a slice; only the first slice with a pivot sets the sheet pivot.
    pub fn push_slice(&mut self, slice: Slice) {
        if self.custom_pivot.is_none() {
            self.custom_pivot = slice.normalized_pivot();
        }
        self.slices.push(slice);
    }
}

/// Raw importer output: frames in export order plus the flat tag list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedSheet {
    pub layout: SheetLayout,
    pub frames: Vec<Frame>,
    pub tags: Vec<FrameTag>,
}

impl ParsedSheet {
    pub fn has_animations(&self) -> bool {
        !self.tags.is_empty()
    }
}
