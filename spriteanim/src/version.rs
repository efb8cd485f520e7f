//! Oldest exporter versions whose metadata layout is understood.

/// Oldest Aseprite release that writes `frameTags` and array-style `frames`.
pub const ASEPRITE_MIN_VERSION: (u32, u32, u32) = (1, 1, 1);

#[cfg_attr(not(feature = "aseprite"), allow(dead_code))]
pub(crate) fn aseprite_version_hint() -> String {
    let (major, minor, patch) = ASEPRITE_MIN_VERSION;
    format!("please export with Aseprite {major}.{minor}.{patch} or newer")
}
