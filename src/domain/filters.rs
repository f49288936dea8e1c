//! Image filter presets.
//!
//! Filters are CSS `filter` expressions applied over an image at display time.
//! The table is closed: an unknown name always resolves to the identity
//! expression so a stale or mistyped preset never breaks rendering.

use serde::Serialize;

/// Identity expression returned for `Normal` and for every unknown name.
pub const IDENTITY_CSS: &str = "none";

/// Preset applied when an image has no explicit filter.
pub const DEFAULT_FILTER: &str = "Normal";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterPreset {
    pub name: &'static str,
    pub css: &'static str,
    pub description: &'static str,
}

const CATALOG: [FilterPreset; 12] = [
    FilterPreset {
        name: "Normal",
        css: IDENTITY_CSS,
        description: "Original image",
    },
    FilterPreset {
        name: "Grayscale",
        css: "grayscale(100%)",
        description: "Black and white",
    },
    FilterPreset {
        name: "Sepia",
        css: "sepia(100%)",
        description: "Vintage brown tone",
    },
    FilterPreset {
        name: "Vintage",
        css: "sepia(50%) contrast(1.2) brightness(1.1)",
        description: "Retro look",
    },
    FilterPreset {
        name: "Bright",
        css: "brightness(1.3) contrast(1.1)",
        description: "Enhanced brightness",
    },
    FilterPreset {
        name: "Contrast",
        css: "contrast(1.4) brightness(1.1)",
        description: "High contrast",
    },
    FilterPreset {
        name: "Saturate",
        css: "saturate(1.8) contrast(1.1)",
        description: "Vivid colors",
    },
    FilterPreset {
        name: "Cool",
        css: "hue-rotate(180deg) saturate(1.2)",
        description: "Cool blue tones",
    },
    FilterPreset {
        name: "Warm",
        css: "hue-rotate(25deg) saturate(1.3) brightness(1.1)",
        description: "Warm golden tones",
    },
    FilterPreset {
        name: "Dramatic",
        css: "contrast(1.5) brightness(0.9) saturate(1.2)",
        description: "Bold and dramatic",
    },
    FilterPreset {
        name: "Soft",
        css: "blur(0.5px) brightness(1.1) contrast(0.9)",
        description: "Soft and dreamy",
    },
    FilterPreset {
        name: "Fade",
        css: "contrast(0.8) brightness(1.2) saturate(0.8)",
        description: "Faded film look",
    },
];

/// All presets in display order.
pub fn catalog() -> &'static [FilterPreset] {
    &CATALOG
}

pub fn find(name: &str) -> Option<&'static FilterPreset> {
    CATALOG.iter().find(|preset| preset.name == name)
}

/// Map a preset name to its CSS expression. Names are matched exactly.
pub fn resolve_css(name: &str) -> &'static str {
    find(name).map_or(IDENTITY_CSS, |preset| preset.css)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_resolve_to_documented_css() {
        let expected = [
            ("Normal", "none"),
            ("Grayscale", "grayscale(100%)"),
            ("Sepia", "sepia(100%)"),
            ("Vintage", "sepia(50%) contrast(1.2) brightness(1.1)"),
            ("Bright", "brightness(1.3) contrast(1.1)"),
            ("Contrast", "contrast(1.4) brightness(1.1)"),
            ("Saturate", "saturate(1.8) contrast(1.1)"),
            ("Cool", "hue-rotate(180deg) saturate(1.2)"),
            ("Warm", "hue-rotate(25deg) saturate(1.3) brightness(1.1)"),
            ("Dramatic", "contrast(1.5) brightness(0.9) saturate(1.2)"),
            ("Soft", "blur(0.5px) brightness(1.1) contrast(0.9)"),
            ("Fade", "contrast(0.8) brightness(1.2) saturate(0.8)"),
        ];

        assert_eq!(catalog().len(), expected.len());
        for (preset, (name, css)) in catalog().iter().zip(expected) {
            assert_eq!(preset.name, name);
            assert_eq!(resolve_css(name), css);
        }
    }

    #[test]
    fn unknown_names_resolve_to_identity() {
        for name in ["", "grayscale", "SEPIA", "Blur", " Normal", "Warm "] {
            assert_eq!(resolve_css(name), IDENTITY_CSS, "name `{name}`");
        }
    }

    #[test]
    fn resolve_is_idempotent() {
        for name in ["Vintage", "nope", ""] {
            assert_eq!(resolve_css(name), resolve_css(name));
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = catalog().iter().map(|preset| preset.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog().len());
    }
}
