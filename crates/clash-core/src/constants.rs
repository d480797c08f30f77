//! Fixed display names and separators used when composing group names.

/// Separator between a parent group name and a subgroup name.
pub const SUBGROUP_SEPARATOR: &str = "_";

/// Separator between both sides of a `LastUnique` pair name.
pub const PAIR_SEPARATOR: &str = " vs ";

// --- Fallback names for unresolved keys ---
pub const NO_LEVEL: &str = "No Level";
pub const NO_GRID_INTERSECTION: &str = "No Grid intersection";
pub const EMPTY_CLASH: &str = "Empty clash";
pub const UNSPECIFIED: &str = "Unspecified";
pub const UNKNOWN_FILE: &str = "Unknown File";
pub const NO_LAYER: &str = "No Layer";
pub const UNKNOWN_FIRST: &str = "Unknown1";
pub const UNKNOWN_SECOND: &str = "Unknown2";

// --- Placeholders for resolved keys with an empty display name ---
pub const UNNAMED_LEVEL: &str = "Unnamed Level";
pub const UNNAMED_GRID_INTERSECTION: &str = "Unnamed Grid Intersection";
pub const UNNAMED_PARENT: &str = "Unnamed Parent";
pub const UNNAMED_MODEL: &str = "Unnamed Model";
pub const UNNAMED_ELEMENT: &str = "Unnamed Element";

/// Substring (case-insensitive) identifying a layer property.
pub const LAYER_PROPERTY_NEEDLE: &str = "layer";
