//! # Load Summary
//!
//! Plain text description of a `BuiltWorld`, as printed by
//! `map_inspect`.

use std::fmt;

use brushwork_world::BuiltWorld;

/// Borrowing display adapter for a built world.
#[derive(Clone, Copy, Debug)]
pub struct Summary<'a> {
    world: &'a BuiltWorld,
    max_diagnostics: usize,
}

impl<'a> Summary<'a> {
    /// Diagnostics listed before the rest are elided.
    pub const DEFAULT_MAX_DIAGNOSTICS: usize = 10;

    /// Summary of `world`.
    #[must_use]
    pub const fn new(world: &'a BuiltWorld) -> Self {
        Self {
            world,
            max_diagnostics: Self::DEFAULT_MAX_DIAGNOSTICS,
        }
    }

    /// Lists at most `max` diagnostics.
    #[must_use]
    pub const fn with_max_diagnostics(mut self, max: usize) -> Self {
        self.max_diagnostics = max;
        self
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let world = self.world;
        writeln!(f, "{}", world.stats)?;

        writeln!(f, "visual meshes: {}", world.visual_meshes.len())?;
        for mesh in &world.visual_meshes {
            writeln!(
                f,
                "  {} {:<40} {:>6} tris {:>6} verts  [{}]",
                mesh.chunk,
                mesh.material,
                mesh.triangle_count(),
                mesh.vertices.len(),
                mesh.placeholder.semantic.name()
            )?;
        }

        writeln!(f, "collision meshes: {}", world.collision_meshes.len())?;
        for mesh in &world.collision_meshes {
            writeln!(
                f,
                "  {} {:>6} tris {:>6} positions",
                mesh.chunk,
                mesh.triangle_count(),
                mesh.positions.len()
            )?;
        }

        writeln!(f, "spawn points: {}", world.spawn_points.len())?;
        for spawn in &world.spawn_points {
            let p = spawn.position;
            writeln!(
                f,
                "  {} at ({:.1}, {:.1}, {:.1}) yaw {:.0}",
                spawn.classname, p.x, p.y, p.z, spawn.yaw
            )?;
        }

        write!(f, "diagnostics: {}", world.diagnostics.len())?;
        for diagnostic in world.diagnostics.iter().take(self.max_diagnostics) {
            write!(f, "\n  {diagnostic}")?;
        }
        let hidden = world.diagnostics.len().saturating_sub(self.max_diagnostics);
        if hidden > 0 {
            write!(f, "\n  ... and {hidden} more")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brushwork_world::{BuildConfig, WorldBuilder};

    const MAP: &str = r#"
world
{
    "classname" "worldspawn"
    solid
    {
        side { "plane" "(0 64 64) (64 64 64) (64 0 64)" "material" "DEV/CONCRETE" }
        side { "plane" "(0 0 0) (64 0 0) (64 64 0)" "material" "DEV/CONCRETE" }
        side { "plane" "(0 64 64) (0 0 64) (0 0 0)" "material" "DEV/CONCRETE" }
        side { "plane" "(64 64 0) (64 0 0) (64 0 64)" "material" "DEV/CONCRETE" }
        side { "plane" "(64 64 64) (0 64 64) (0 64 0)" "material" "DEV/CONCRETE" }
        side { "plane" "(64 0 0) (0 0 0) (0 0 64)" "material" "DEV/CONCRETE" }
    }
}
entity
{
    "classname" "info_player_start"
    "origin" "32 32 0"
    "angles" "0 90 0"
}
entity
{
    "classname" "info_target"
    "origin" "1 2"
}
entity
{
    "classname" "info_target"
    "origin" "nope"
}
"#;

    fn world() -> BuiltWorld {
        WorldBuilder::new(BuildConfig::default())
            .unwrap()
            .load_str(MAP)
            .unwrap()
    }

    #[test]
    fn test_summary_lists_every_section() {
        let world = world();
        let text = Summary::new(&world).to_string();

        assert!(text.contains("visual meshes: 1"));
        assert!(text.contains("dev/concrete"));
        assert!(text.contains("[concrete]"));
        assert!(text.contains("collision meshes: 1"));
        assert!(text.contains("spawn points: 1"));
        assert!(text.contains("info_player_start at (32.0, 0.0, -32.0) yaw 90"));
        assert!(text.contains("diagnostics: 2"));
    }

    #[test]
    fn test_diagnostics_are_elided() {
        let world = world();
        let text = Summary::new(&world).with_max_diagnostics(1).to_string();
        assert!(text.ends_with("... and 1 more"));
    }
}
