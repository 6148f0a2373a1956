//! # Placeholder Materials
//!
//! Map materials reference textures this pipeline never loads. Each raw
//! material string is mapped to a coarse semantic class by keyword and
//! given a deterministic placeholder look, so a level is readable
//! without its texture set.
//!
//! ## Caching
//!
//! `MaterialCache` memoises placeholders by normalized material name.
//! It has no eviction: the key space is the set of materials across all
//! maps loaded, and placeholders do not depend on the map. The cache is
//! an ordinary value. A `WorldBuilder` owns one, or several builders
//! share one through `Arc`.

use std::collections::HashMap;
use std::hash::Hasher;
use std::sync::Arc;

use parking_lot::RwLock;
use siphasher::sip::SipHasher13;

use crate::filter::normalize_material;

/// Coarse surface class guessed from a material name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemanticMaterial {
    /// Concrete, cement, plaster.
    Concrete,
    /// Metal, steel.
    Metal,
    /// Wood, planks.
    Wood,
    /// Glass, windows.
    Glass,
    /// Brick.
    Brick,
    /// Tile, ceramic.
    Tile,
    /// Grass, foliage.
    Grass,
    /// Dirt, mud, sand.
    Dirt,
    /// Water, liquids.
    Water,
    /// Developer measurement textures.
    Dev,
    /// Nothing matched.
    Generic,
}

/// Keyword table, most specific first.
const KEYWORDS: [(&str, SemanticMaterial); 20] = [
    ("concrete", SemanticMaterial::Concrete),
    ("cement", SemanticMaterial::Concrete),
    ("plaster", SemanticMaterial::Concrete),
    ("metal", SemanticMaterial::Metal),
    ("steel", SemanticMaterial::Metal),
    ("wood", SemanticMaterial::Wood),
    ("plank", SemanticMaterial::Wood),
    ("glass", SemanticMaterial::Glass),
    ("window", SemanticMaterial::Glass),
    ("brick", SemanticMaterial::Brick),
    ("tile", SemanticMaterial::Tile),
    ("ceramic", SemanticMaterial::Tile),
    ("grass", SemanticMaterial::Grass),
    ("foliage", SemanticMaterial::Grass),
    ("dirt", SemanticMaterial::Dirt),
    ("mud", SemanticMaterial::Dirt),
    ("sand", SemanticMaterial::Dirt),
    ("water", SemanticMaterial::Water),
    ("liquid", SemanticMaterial::Water),
    ("dev", SemanticMaterial::Dev),
];

impl SemanticMaterial {
    /// Classifies a raw material string.
    ///
    /// The file name is searched before the directory, so
    /// `DEV/CONCRETE` is concrete and `DEV/DEV_MEASUREWALL01A` is dev.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let normalized = normalize_material(raw);
        let file_name = normalized.rsplit('/').next().unwrap_or(&normalized);

        [file_name, normalized.as_str()]
            .iter()
            .find_map(|haystack| {
                KEYWORDS
                    .iter()
                    .find(|(keyword, _)| haystack.contains(keyword))
                    .map(|&(_, class)| class)
            })
            .unwrap_or(Self::Generic)
    }

    /// Lower case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Concrete => "concrete",
            Self::Metal => "metal",
            Self::Wood => "wood",
            Self::Glass => "glass",
            Self::Brick => "brick",
            Self::Tile => "tile",
            Self::Grass => "grass",
            Self::Dirt => "dirt",
            Self::Water => "water",
            Self::Dev => "dev",
            Self::Generic => "generic",
        }
    }

    /// Base colour (RGB), roughness and metallic.
    #[must_use]
    pub const fn surface(self) -> ([f32; 3], f32, f32) {
        match self {
            Self::Concrete => ([0.55, 0.55, 0.52], 0.9, 0.0),
            Self::Metal => ([0.56, 0.57, 0.58], 0.35, 1.0),
            Self::Wood => ([0.52, 0.37, 0.22], 0.7, 0.0),
            Self::Glass => ([0.70, 0.82, 0.88], 0.05, 0.0),
            Self::Brick => ([0.58, 0.27, 0.20], 0.85, 0.0),
            Self::Tile => ([0.80, 0.80, 0.76], 0.3, 0.0),
            Self::Grass => ([0.30, 0.50, 0.20], 0.95, 0.0),
            Self::Dirt => ([0.45, 0.34, 0.24], 1.0, 0.0),
            Self::Water => ([0.15, 0.35, 0.50], 0.02, 0.0),
            Self::Dev => ([0.85, 0.55, 0.15], 0.6, 0.0),
            Self::Generic => ([0.60, 0.60, 0.60], 0.8, 0.0),
        }
    }
}

/// A generated stand-in for a real material.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceholderMaterial {
    /// Normalized material name.
    pub name: String,
    /// Semantic class the look was derived from.
    pub semantic: SemanticMaterial,
    /// Base colour, RGBA.
    pub base_color: [f32; 4],
    /// Roughness, 0 to 1.
    pub roughness: f32,
    /// Metallic, 0 to 1.
    pub metallic: f32,
}

impl PlaceholderMaterial {
    /// Largest per-channel shift away from the class colour.
    const TINT: f32 = 0.08;

    /// Builds the placeholder for a normalized name.
    ///
    /// The class colour is shifted per channel by a stable hash of the
    /// name, so different materials of one class stay distinguishable
    /// and the same name always looks the same.
    #[must_use]
    pub fn generate(name: &str, semantic: SemanticMaterial) -> Self {
        let mut hasher = SipHasher13::new_with_keys(0, 0);
        hasher.write(name.as_bytes());
        let hash = hasher.finish();

        let ([r, g, b], roughness, metallic) = semantic.surface();
        let shift = |channel: f32, byte: u32| {
            let unit = f32::from(((hash >> (byte * 8)) & 0xFF) as u8) / 255.0;
            (channel + (unit * 2.0 - 1.0) * Self::TINT).clamp(0.0, 1.0)
        };

        Self {
            name: name.to_string(),
            semantic,
            base_color: [shift(r, 0), shift(g, 1), shift(b, 2), 1.0],
            roughness,
            metallic,
        }
    }
}

/// Maps raw material strings to render materials.
pub trait MaterialResolver: Send + Sync {
    /// Resolves a raw material string as written in the map.
    fn resolve(&self, raw: &str) -> Arc<PlaceholderMaterial>;
}

/// Memoising keyword resolver.
#[derive(Debug, Default)]
pub struct MaterialCache {
    entries: RwLock<HashMap<String, Arc<PlaceholderMaterial>>>,
}

impl MaterialCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached placeholder for a raw name, without generating one.
    #[must_use]
    pub fn get(&self, raw: &str) -> Option<Arc<PlaceholderMaterial>> {
        self.entries.read().get(&normalize_material(raw)).cloned()
    }

    /// Number of cached placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every cached placeholder.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl MaterialResolver for MaterialCache {
    fn resolve(&self, raw: &str) -> Arc<PlaceholderMaterial> {
        let key = normalize_material(raw);
        if let Some(hit) = self.entries.read().get(&key) {
            return Arc::clone(hit);
        }

        let mut entries = self.entries.write();
        let entry = entries.entry(key).or_insert_with_key(|name| {
            let semantic = SemanticMaterial::classify(name);
            tracing::debug!("placeholder for {name}: {}", semantic.name());
            Arc::new(PlaceholderMaterial::generate(name, semantic))
        });
        Arc::clone(entry)
    }
}
