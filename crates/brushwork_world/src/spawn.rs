//! Spawn point extraction.

use brushwork_geometry::CoordinateTransform;
use brushwork_shared::Vec3;
use brushwork_vmf::{EntityKind, Map};

/// A place players appear, in output space.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnPoint {
    /// Entity class (`info_player_start`, `info_player_terrorist`, ...).
    pub classname: String,
    /// Position (Y-up, scaled).
    pub position: Vec3,
    /// Facing in degrees about the up axis, as authored.
    pub yaw: f64,
}

/// Every spawn entity with an origin, in file order.
///
/// Spawn entities without a usable origin are skipped with a warning.
#[must_use]
pub fn extract_spawn_points(map: &Map, transform: &CoordinateTransform) -> Vec<SpawnPoint> {
    map.entities
        .iter()
        .filter(|e| e.kind == EntityKind::SpawnPoint)
        .filter_map(|e| {
            let Some(origin) = e.origin else {
                tracing::warn!("{} {:?} has no origin, skipped", e.classname, e.id);
                return None;
            };
            Some(SpawnPoint {
                classname: e.classname.clone(),
                position: transform.point(origin),
                yaw: e.angles.map_or(0.0, |a| a.y),
            })
        })
        .collect()
}
