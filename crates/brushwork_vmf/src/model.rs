//! # Typed Map Model
//!
//! The shape of a map after the generic tree has been interpreted:
//!
//! ```text
//! Map
//! ├── World (worldspawn properties + solids)
//! └── Entity* (classname, origin, kind, properties, solids*)
//!                                               └── Solid (sides*)
//!                                                     └── Side (plane, material, axes)
//! ```
//!
//! The model is built once per load and is read-only afterwards.

use std::collections::BTreeMap;

use brushwork_shared::{Plane, Vec3};

/// One texture projection axis: `u = (pos · direction + offset) / scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureAxis {
    /// Projection direction in map space.
    pub direction: Vec3,
    /// Offset in texels.
    pub offset: f64,
    /// Map units per texel. Never zero.
    pub scale: f64,
}

impl TextureAxis {
    /// Projects a map-space position onto this axis.
    #[inline]
    #[must_use]
    pub fn project(&self, position: Vec3) -> f64 {
        (position.dot(self.direction) + self.offset) / self.scale
    }
}

/// One bounding face of a solid.
#[derive(Clone, Debug, PartialEq)]
pub struct Side {
    /// Editor id, if present and numeric.
    pub id: Option<u32>,
    /// The three points the plane was defined by, in file order.
    pub points: [Vec3; 3],
    /// Outward-facing plane.
    pub plane: Plane,
    /// Raw material path as written (e.g. `DEV/CONCRETE`).
    pub material: String,
    /// Horizontal texture axis, `None` if missing or malformed.
    pub u_axis: Option<TextureAxis>,
    /// Vertical texture axis, `None` if missing or malformed.
    pub v_axis: Option<TextureAxis>,
    /// The side carries a displacement (deformed terrain).
    pub displacement: bool,
}

/// A convex volume bounded by its sides' planes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solid {
    /// Editor id, if present and numeric.
    pub id: Option<u32>,
    /// Bounding sides in file order.
    pub sides: Vec<Side>,
}

impl Solid {
    /// Fewer than four planes cannot bound a finite volume.
    pub const MIN_SIDES: usize = 4;

    /// True if the side count alone rules out a closed volume.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.sides.len() < Self::MIN_SIDES
    }
}

/// The closed set of entity archetypes the pipeline cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// `info_player_*`: a place players appear.
    SpawnPoint,
    /// `trigger_*`: invisible, non-colliding volume.
    Trigger,
    /// Any other entity made of brushes (`func_detail`, `func_wall`, ...).
    BrushVolume,
    /// A point entity with no geometry.
    Point,
}

impl EntityKind {
    /// Classifies an entity from its classname and whether it owns solids.
    #[must_use]
    pub fn classify(classname: &str, has_solids: bool) -> Self {
        let lower = classname.to_ascii_lowercase();
        if lower.starts_with("info_player_") {
            Self::SpawnPoint
        } else if lower.starts_with("trigger_") {
            Self::Trigger
        } else if has_solids || lower.starts_with("func_") {
            Self::BrushVolume
        } else {
            Self::Point
        }
    }
}

/// A map entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Editor id, if present and numeric.
    pub id: Option<u32>,
    /// Class tag (`info_player_start`, `func_detail`, ...).
    pub classname: String,
    /// Archetype derived from the classname.
    pub kind: EntityKind,
    /// `origin`, if present and well formed.
    pub origin: Option<Vec3>,
    /// `angles` as (pitch, yaw, roll) degrees, if present and well formed.
    pub angles: Option<Vec3>,
    /// Every other key, lowercased, in sorted order.
    pub properties: BTreeMap<String, String>,
    /// Brush geometry owned by this entity.
    pub solids: Vec<Solid>,
}

impl Entity {
    /// Looks up a property by (case-insensitive) key.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// The `world` block: worldspawn properties and the static brushes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct World {
    /// Editor id, if present and numeric.
    pub id: Option<u32>,
    /// Usually `worldspawn`.
    pub classname: String,
    /// Worldspawn keys (`skyname`, `mapversion`, ...), lowercased.
    pub properties: BTreeMap<String, String>,
    /// World brushes.
    pub solids: Vec<Solid>,
}

/// A whole map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Map {
    /// `versioninfo.mapversion`, if present.
    pub version: Option<u32>,
    /// The world block; `None` if the file has none.
    pub world: Option<World>,
    /// Entities in file order.
    pub entities: Vec<Entity>,
}

impl Map {
    /// Every solid in the map with the entity that owns it (`None` = world).
    pub fn solids(&self) -> impl Iterator<Item = (Option<&Entity>, &Solid)> {
        let world = self
            .world
            .iter()
            .flat_map(|w| w.solids.iter().map(|s| (None, s)));
        let entities = self
            .entities
            .iter()
            .flat_map(|e| e.solids.iter().map(move |s| (Some(e), s)));
        world.chain(entities)
    }

    /// Total number of solids, world and entity owned.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.world.as_ref().map_or(0, |w| w.solids.len())
            + self.entities.iter().map(|e| e.solids.len()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_classification() {
        assert_eq!(EntityKind::classify("info_player_start", false), EntityKind::SpawnPoint);
        assert_eq!(EntityKind::classify("Info_Player_Terrorist", false), EntityKind::SpawnPoint);
        assert_eq!(EntityKind::classify("trigger_multiple", true), EntityKind::Trigger);
        assert_eq!(EntityKind::classify("func_detail", true), EntityKind::BrushVolume);
        assert_eq!(EntityKind::classify("prop_static", false), EntityKind::Point);
    }

    #[test]
    fn test_texture_axis_projection() {
        let axis = TextureAxis {
            direction: Vec3::X,
            offset: 8.0,
            scale: 0.5,
        };
        // (24 + 8) / 0.5
        assert_eq!(axis.project(Vec3::new(24.0, 99.0, -1.0)), 64.0);
    }
}
