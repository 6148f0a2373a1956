//! # Eligibility Filters
//!
//! Decides, independently, whether a face renders and whether it
//! collides.
//!
//! | Check | Level | Source |
//! |-------|-------|--------|
//! | visual | face | `visual_ignore` material patterns |
//! | physics | entity | `non_solid_classes`, prefixes, `func_brush` solidity |
//! | physics | face | `physics_ignore` material patterns |
//!
//! Displacement faces pass both material checks. Entity exclusion still
//! applies to them.

use brushwork_vmf::{Entity, Side};

use crate::config::BuildConfig;

/// Lower case with `/` separators, trimmed.
#[must_use]
pub fn normalize_material(raw: &str) -> String {
    raw.trim().replace('\\', "/").to_ascii_lowercase()
}

/// One material pattern: exact, or prefix with a trailing `*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialPattern {
    text: String,
    prefix: bool,
}

impl MaterialPattern {
    /// Compiles a pattern.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let normalized = normalize_material(pattern);
        match normalized.strip_suffix('*') {
            Some(stem) => Self {
                text: stem.to_string(),
                prefix: true,
            },
            None => Self {
                text: normalized,
                prefix: false,
            },
        }
    }

    /// Tests an already normalized material name.
    #[must_use]
    pub fn matches(&self, normalized: &str) -> bool {
        if self.prefix {
            normalized.starts_with(&self.text)
        } else {
            normalized == self.text
        }
    }
}

/// A set of material patterns.
#[derive(Clone, Debug, Default)]
pub struct MaterialFilter {
    patterns: Vec<MaterialPattern>,
}

impl MaterialFilter {
    /// Compiles every pattern in `patterns`.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| MaterialPattern::new(p.as_ref()))
                .collect(),
        }
    }

    /// True if `material` matches any pattern.
    #[must_use]
    pub fn is_ignored(&self, material: &str) -> bool {
        let normalized = normalize_material(material);
        self.patterns.iter().any(|p| p.matches(&normalized))
    }
}

/// Entity-level physics exclusion.
#[derive(Clone, Debug, Default)]
pub struct EntityFilter {
    classes: Vec<String>,
    prefixes: Vec<String>,
}

impl EntityFilter {
    /// Classname that honours the `Solidity` key.
    const FUNC_BRUSH: &'static str = "func_brush";
    /// `Solidity` value meaning "never solid".
    const NEVER_SOLID: &'static str = "1";

    /// Creates a filter from exact classnames and classname prefixes.
    pub fn new<I, S>(classes: I, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lower = |s: S| s.as_ref().to_ascii_lowercase();
        Self {
            classes: classes.into_iter().map(lower).collect(),
            prefixes: prefixes.into_iter().map(lower).collect(),
        }
    }

    /// True if this entity's brushes must not collide.
    #[must_use]
    pub fn is_non_solid(&self, entity: &Entity) -> bool {
        let class = entity.classname.to_ascii_lowercase();
        if self.classes.iter().any(|c| *c == class) {
            return true;
        }
        if self.prefixes.iter().any(|p| class.starts_with(p.as_str())) {
            return true;
        }
        class == Self::FUNC_BRUSH
            && entity.property("solidity").map(str::trim) == Some(Self::NEVER_SOLID)
    }
}

/// All three checks together.
#[derive(Clone, Debug, Default)]
pub struct SurfaceFilters {
    visual: MaterialFilter,
    physics: MaterialFilter,
    entities: EntityFilter,
}

impl SurfaceFilters {
    /// Builds the filters a config describes.
    #[must_use]
    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            visual: MaterialFilter::new(&config.visual_ignore),
            physics: MaterialFilter::new(&config.physics_ignore),
            entities: EntityFilter::new(&config.non_solid_classes, &config.non_solid_class_prefixes),
        }
    }

    /// The face may render.
    #[must_use]
    pub fn is_visual(&self, side: &Side) -> bool {
        side.displacement || !self.visual.is_ignored(&side.material)
    }

    /// The face may collide, given its owner already may.
    #[must_use]
    pub fn is_physical(&self, side: &Side) -> bool {
        side.displacement || !self.physics.is_ignored(&side.material)
    }

    /// Brushes of this owner may collide (`None` is the world).
    #[must_use]
    pub fn is_solid_owner(&self, owner: Option<&Entity>) -> bool {
        owner.map_or(true, |e| !self.entities.is_non_solid(e))
    }
}
