//! # World Build Tests
//!
//! Whole maps through `WorldBuilder`, from map text to merged meshes.
//! Boxes are generated in the editor's own plane winding.

use std::collections::HashSet;
use std::sync::Arc;

use brushwork_shared::Vec3;
use brushwork_world::{
    BuildConfig, ChunkCoord, LoadError, MaterialCache, MaterialResolver, WorldBuilder,
};

const CONCRETE: &str = "DEV/CONCRETE";

/// Sides of an axis-aligned box: top, bottom, west, east, north, south.
fn box_sides(min: [f64; 3], max: [f64; 3], materials: [&str; 6], displaced_top: bool) -> String {
    let [x0, y0, z0] = min;
    let [x1, y1, z1] = max;
    let planes = [
        format!("({x0} {y1} {z1}) ({x1} {y1} {z1}) ({x1} {y0} {z1})"),
        format!("({x0} {y0} {z0}) ({x1} {y0} {z0}) ({x1} {y1} {z0})"),
        format!("({x0} {y1} {z1}) ({x0} {y0} {z1}) ({x0} {y0} {z0})"),
        format!("({x1} {y1} {z0}) ({x1} {y0} {z0}) ({x1} {y0} {z1})"),
        format!("({x1} {y1} {z1}) ({x0} {y1} {z1}) ({x0} {y1} {z0})"),
        format!("({x1} {y0} {z0}) ({x0} {y0} {z0}) ({x0} {y0} {z1})"),
    ];
    let axes = [
        ("[1 0 0 0] 0.25", "[0 -1 0 0] 0.25"),
        ("[1 0 0 0] 0.25", "[0 -1 0 0] 0.25"),
        ("[0 1 0 0] 0.25", "[0 0 -1 0] 0.25"),
        ("[0 1 0 0] 0.25", "[0 0 -1 0] 0.25"),
        ("[1 0 0 0] 0.25", "[0 0 -1 0] 0.25"),
        ("[1 0 0 0] 0.25", "[0 0 -1 0] 0.25"),
    ];

    let mut out = String::new();
    for (i, plane) in planes.iter().enumerate() {
        let (u, v) = axes[i];
        let disp = if i == 0 && displaced_top {
            "\t\t\tdispinfo\n\t\t\t{\n\t\t\t\t\"power\" \"2\"\n\t\t\t}\n"
        } else {
            ""
        };
        out.push_str(&format!(
            "\t\tside\n\t\t{{\n\t\t\t\"plane\" \"{plane}\"\n\t\t\t\"material\" \"{}\"\n\t\t\t\"uaxis\" \"{u}\"\n\t\t\t\"vaxis\" \"{v}\"\n{disp}\t\t}}\n",
            materials[i]
        ));
    }
    out
}

fn solid(min: [f64; 3], max: [f64; 3], materials: [&str; 6]) -> String {
    format!("\tsolid\n\t{{\n{}\t}}\n", box_sides(min, max, materials, false))
}

fn uniform(min: [f64; 3], max: [f64; 3], material: &str) -> String {
    solid(min, max, [material; 6])
}

fn world(solids: &[String]) -> String {
    format!(
        "world\n{{\n\t\"classname\" \"worldspawn\"\n{}}}\n",
        solids.concat()
    )
}

fn entity(classname: &str, keys: &[(&str, &str)], solids: &[String]) -> String {
    let mut out = format!("entity\n{{\n\t\"classname\" \"{classname}\"\n");
    for (k, v) in keys {
        out.push_str(&format!("\t\"{k}\" \"{v}\"\n"));
    }
    out.push_str(&solids.concat());
    out.push_str("}\n");
    out
}

fn builder() -> WorldBuilder {
    WorldBuilder::new(BuildConfig::default()).unwrap()
}

fn bits(p: [f32; 3]) -> [u32; 3] {
    p.map(|c| if c == 0.0 { 0 } else { c.to_bits() })
}

/// The chunk holding the 0..64 box in output space.
const CUBE_CHUNK: ChunkCoord = ChunkCoord::new(0, 0, -1);

#[test]
fn test_cube_with_spawn_end_to_end() {
    let source = format!(
        "{}{}",
        world(&[uniform([0.0; 3], [64.0; 3], CONCRETE)]),
        entity("info_player_start", &[("origin", "32 32 0"), ("angles", "0 0 0")], &[])
    );
    let world = builder().load_str(&source).unwrap();
    assert!(world.diagnostics.is_empty(), "{:?}", world.diagnostics);

    // One visual bucket: 8 corners, 12 triangles
    assert_eq!(world.visual_meshes.len(), 1);
    let visual = world.visual_mesh(CUBE_CHUNK, CONCRETE).expect("cube bucket");
    assert_eq!(visual.material, "dev/concrete");
    // Flat shading: each corner is split per face normal
    assert_eq!(visual.vertices.len(), 24);
    assert_eq!(visual.unique_positions(), 8);
    assert_eq!(visual.triangle_count(), 12);

    // One collision chunk with the same 12 triangles
    assert_eq!(world.collision_meshes.len(), 1);
    let collision = world.collision_mesh(CUBE_CHUNK).expect("cube collision");
    assert_eq!(collision.triangle_count(), 12);
    assert_eq!(collision.positions.len(), 8);

    // World-space corners after Z-up to Y-up
    let expected: HashSet<[u32; 3]> = [0.0f32, 64.0]
        .iter()
        .flat_map(|&x| {
            [0.0f32, 64.0]
                .iter()
                .flat_map(move |&y| [0.0f32, -64.0].iter().map(move |&z| bits([x, y, z])))
        })
        .collect();
    let actual: HashSet<[u32; 3]> = collision.positions.iter().map(|&p| bits(p)).collect();
    assert_eq!(actual, expected);

    // One spawn point at the transformed origin
    assert_eq!(world.spawn_points.len(), 1);
    assert_eq!(world.spawn_points[0].position, Vec3::new(32.0, 0.0, -32.0));

    let stats = world.stats;
    assert_eq!(stats.solids_seen, 1);
    assert_eq!(stats.solids_built, 1);
    assert_eq!(stats.fragments, 6);
    assert_eq!(stats.visual_triangles, 12);
    assert_eq!(stats.physics_triangles, 12);
    assert!(stats.is_complete());
}

#[test]
fn test_visual_triangles_face_outward() {
    let world = builder()
        .load_str(&world(&[uniform([0.0; 3], [64.0; 3], CONCRETE)]))
        .unwrap();
    let mesh = &world.visual_meshes[0];
    let center = Vec3::new(32.0, 32.0, -32.0);

    for tri in mesh.indices.chunks(3) {
        let corner = |i: u32| {
            let p = mesh.vertices[i as usize].position;
            Vec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
        };
        let (a, b, c) = (corner(tri[0]), corner(tri[1]), corner(tri[2]));
        let normal = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(normal.dot(centroid - center) > 0.0);
    }
}

#[test]
fn test_merged_triangles_are_the_sum_of_solids() {
    let solids = [
        uniform([0.0, 0.0, 0.0], [64.0, 64.0, 64.0], CONCRETE),
        uniform([128.0, 0.0, 0.0], [192.0, 64.0, 32.0], CONCRETE),
        uniform([256.0, 128.0, 0.0], [320.0, 256.0, 128.0], CONCRETE),
    ];
    let world = builder().load_str(&world(&solids)).unwrap();

    assert_eq!(world.visual_meshes.len(), 1);
    assert_eq!(world.visual_meshes[0].triangle_count(), 36);
    assert_eq!(world.collision_meshes.len(), 1);
    assert_eq!(world.collision_meshes[0].triangle_count(), 36);
}

#[test]
fn test_visual_and_physics_filters_are_independent() {
    let nodraw_top = solid(
        [0.0; 3],
        [64.0; 3],
        ["TOOLS/TOOLSNODRAW", CONCRETE, CONCRETE, CONCRETE, CONCRETE, CONCRETE],
    );
    let world = builder().load_str(&world(&[nodraw_top])).unwrap();

    // Nodraw collides but never renders
    assert_eq!(world.stats.visual_triangles, 10);
    assert_eq!(world.stats.physics_triangles, 12);
    assert!(world
        .visual_meshes
        .iter()
        .all(|m| m.material != "tools/toolsnodraw"));
}

#[test]
fn test_physics_only_filter() {
    let config = BuildConfig::from_toml_str(
        r#"
visual_ignore = []
physics_ignore = ["glass/*"]
"#,
    )
    .unwrap();
    let pane = uniform([0.0; 3], [64.0, 4.0, 64.0], "GLASS/GLASSWINDOW001A");
    let world = WorldBuilder::new(config).unwrap().load_str(&world(&[pane])).unwrap();

    assert_eq!(world.stats.visual_triangles, 12);
    assert_eq!(world.stats.physics_triangles, 0);
    assert!(world.collision_meshes.is_empty());
}

#[test]
fn test_tool_brushes_produce_nothing() {
    let source = world(&[
        uniform([0.0; 3], [64.0; 3], "TOOLS/TOOLSTRIGGER"),
        uniform([128.0, 0.0, 0.0], [192.0, 64.0, 64.0], "TOOLS/TOOLSHINT"),
    ]);
    let world = builder().load_str(&source).unwrap();

    assert_eq!(world.stats.solids_built, 2);
    assert!(world.visual_meshes.is_empty());
    assert!(world.collision_meshes.is_empty());
}

#[test]
fn test_entity_level_physics_exclusion() {
    let brush = |x: f64| uniform([x, 0.0, 0.0], [x + 32.0, 32.0, 32.0], CONCRETE);
    let source = format!(
        "{}{}{}{}{}",
        world(&[]),
        entity("func_detail", &[], &[brush(0.0)]),
        entity("func_illusionary", &[], &[brush(64.0)]),
        entity("func_brush", &[("Solidity", "1")], &[brush(128.0)]),
        entity("trigger_multiple", &[], &[brush(192.0)]),
    );
    let world = builder().load_str(&source).unwrap();

    // All four render; only func_detail collides
    assert_eq!(world.stats.solids_seen, 4);
    assert_eq!(world.stats.solids_non_solid, 3);
    assert_eq!(world.stats.visual_triangles, 48);
    assert_eq!(world.stats.physics_triangles, 12);
}

#[test]
fn test_displacement_renders_despite_material() {
    let sides = box_sides(
        [0.0; 3],
        [64.0; 3],
        ["TOOLS/TOOLSNODRAW", CONCRETE, CONCRETE, CONCRETE, CONCRETE, CONCRETE],
        true,
    );
    let source = world(&[format!("\tsolid\n\t{{\n{sides}\t}}\n")]);
    let world = builder().load_str(&source).unwrap();

    assert_eq!(world.stats.visual_triangles, 12);
    assert!(world
        .visual_meshes
        .iter()
        .any(|m| m.material == "tools/toolsnodraw" && m.triangle_count() == 2));
}

#[test]
fn test_degenerate_solid_does_not_stop_siblings() {
    let mut sides = box_sides([0.0; 3], [64.0; 3], [CONCRETE; 6], false);
    // Keep only the first three sides
    let fourth = sides.match_indices("\t\tside\n").nth(3).unwrap().0;
    sides.truncate(fourth);
    let three_sided = format!("\tsolid\n\t{{\n{sides}\t}}\n");

    let source = world(&[three_sided, uniform([128.0, 0.0, 0.0], [192.0, 64.0, 64.0], CONCRETE)]);
    let world = builder().load_str(&source).unwrap();

    assert_eq!(world.stats.solids_seen, 2);
    assert_eq!(world.stats.solids_degenerate, 1);
    assert_eq!(world.stats.solids_built, 1);
    assert_eq!(world.stats.visual_triangles, 12);
    assert!(!world.stats.is_complete());
}

#[test]
fn test_corrupt_plane_leaves_no_phantom_face() {
    let cube = uniform([0.0; 3], [64.0; 3], CONCRETE);
    let damaged = cube.replacen("(0 64 64) (64 64 64) (64 0 64)", "garbage", 1);
    assert_ne!(damaged, cube);

    let world = builder().load_str(&world(&[damaged])).unwrap();

    // The top side is dropped by the mapper and the rest never close
    assert_eq!(world.diagnostics.len(), 1);
    assert_eq!(world.stats.solids_degenerate, 1);
    assert_eq!(world.stats.solids_built, 0);
    assert_eq!(world.stats.visual_triangles, 0);
    assert_eq!(world.stats.physics_triangles, 0);
    assert!(world.visual_meshes.is_empty());
    assert!(world.collision_meshes.is_empty());
}

#[test]
fn test_face_limit_rejects_solid() {
    let config = BuildConfig {
        max_faces_per_solid: 5,
        ..BuildConfig::default()
    };
    let world = WorldBuilder::new(config)
        .unwrap()
        .load_str(&world(&[uniform([0.0; 3], [64.0; 3], CONCRETE)]))
        .unwrap();

    assert_eq!(world.stats.solids_rejected, 1);
    assert!(world.visual_meshes.is_empty());
}

#[test]
fn test_distant_solids_land_in_separate_chunks() {
    let source = world(&[
        uniform([1024.0, 0.0, 0.0], [1088.0, 64.0, 64.0], CONCRETE),
        uniform([-600.0, 0.0, 0.0], [-536.0, 64.0, 64.0], CONCRETE),
    ]);
    let world = builder().load_str(&source).unwrap();

    let chunks: Vec<ChunkCoord> = world.visual_meshes.iter().map(|m| m.chunk).collect();
    assert_eq!(chunks, vec![ChunkCoord::new(-2, 0, -1), ChunkCoord::new(2, 0, -1)]);
    let physics: Vec<ChunkCoord> = world.collision_meshes.iter().map(|m| m.chunk).collect();
    assert_eq!(physics, chunks);
}

#[test]
fn test_unit_scale_applies_everywhere() {
    let config = BuildConfig {
        unit_scale: 0.5,
        ..BuildConfig::default()
    };
    let source = format!(
        "{}{}",
        world(&[uniform([0.0; 3], [64.0; 3], CONCRETE)]),
        entity("info_player_start", &[("origin", "32 32 0")], &[])
    );
    let world = WorldBuilder::new(config).unwrap().load_str(&source).unwrap();

    let collision = &world.collision_meshes[0];
    assert!((collision.bounds.size().x - 32.0).abs() < 1e-9);
    assert_eq!(world.spawn_points[0].position, Vec3::new(16.0, 0.0, -16.0));
}

#[test]
fn test_unwelded_collision() {
    let config = BuildConfig {
        weld_collision_vertices: false,
        ..BuildConfig::default()
    };
    let world = WorldBuilder::new(config)
        .unwrap()
        .load_str(&world(&[uniform([0.0; 3], [64.0; 3], CONCRETE)]))
        .unwrap();

    let collision = &world.collision_meshes[0];
    assert_eq!(collision.triangle_count(), 12);
    assert_eq!(collision.positions.len(), 36);
}

#[test]
fn test_strict_mode_rejects_damaged_text() {
    let mut source = world(&[uniform([0.0; 3], [64.0; 3], CONCRETE)]);
    source.truncate(source.len() - 2);

    // Lenient: partial tree, diagnostics attached
    let lenient = builder().load_str(&source).unwrap();
    assert!(!lenient.diagnostics.is_empty());
    assert_eq!(lenient.stats.visual_triangles, 12);

    let strict = WorldBuilder::new(BuildConfig {
        strict: true,
        ..BuildConfig::default()
    })
    .unwrap();
    let err = strict.load_str(&source).unwrap_err();
    assert!(matches!(err, LoadError::Malformed { count: 1, .. }), "{err}");
}

#[test]
fn test_missing_world_fails_the_load() {
    let source = entity("info_player_start", &[("origin", "0 0 0")], &[]);
    assert!(matches!(builder().load_str(&source), Err(LoadError::MissingWorld)));
}

#[test]
fn test_unreadable_file_fails_the_load() {
    let err = builder().load_file("/nonexistent/map.vmf").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn test_material_cache_is_shared_across_loads() {
    let cache = Arc::new(MaterialCache::new());
    let first = WorldBuilder::with_materials(BuildConfig::default(), cache.clone()).unwrap();
    let second = WorldBuilder::with_materials(BuildConfig::default(), cache.clone()).unwrap();

    let a = first
        .load_str(&world(&[uniform([0.0; 3], [64.0; 3], CONCRETE)]))
        .unwrap();
    let b = second
        .load_str(&world(&[uniform([0.0; 3], [64.0; 3], "dev/concrete")]))
        .unwrap();

    assert_eq!(cache.len(), 1);
    assert!(Arc::ptr_eq(&a.visual_meshes[0].placeholder, &b.visual_meshes[0].placeholder));
    assert!(Arc::ptr_eq(&a.visual_meshes[0].placeholder, &cache.resolve(CONCRETE)));
}

#[test]
fn test_output_order_is_deterministic() {
    let solids: Vec<String> = (0..6)
        .map(|i| {
            let x = f64::from(i) * 300.0 - 900.0;
            let material = if i % 2 == 0 { CONCRETE } else { "METAL/METALWALL001A" };
            uniform([x, 0.0, 0.0], [x + 64.0, 64.0, 64.0], material)
        })
        .collect();
    let source = world(&solids);

    let first = builder().load_str(&source).unwrap();
    let second = builder().load_str(&source).unwrap();

    let keys = |w: &brushwork_world::BuiltWorld| {
        w.visual_meshes
            .iter()
            .map(|m| (m.chunk, m.material.clone(), m.vertices.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&first), keys(&second));

    let mut sorted = keys(&first);
    sorted.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));
    assert_eq!(keys(&first), sorted);
}
