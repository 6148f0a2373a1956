//! # OBJ Export
//!
//! Writes merged visual meshes as one Wavefront OBJ document, one group
//! per (chunk, material) bucket. Positions, normals and UVs are written
//! as stored, in Y-up output space. No `.mtl` file is produced; `usemtl`
//! carries the normalized material name.

use std::io::{self, Write};

use brushwork_world::VisualMesh;

/// Writes `meshes` to `out` as OBJ text.
///
/// Face indices are global across the document, so meshes appear in
/// the order given and their vertex blocks follow each other.
///
/// # Errors
///
/// Any error of the underlying writer.
pub fn write_obj<W: Write>(meshes: &[VisualMesh], mut out: W) -> io::Result<()> {
    writeln!(out, "# brushwork OBJ export")?;
    writeln!(out, "# {} meshes", meshes.len())?;

    // OBJ indices are 1-based
    let mut base = 1usize;
    for mesh in meshes {
        let chunk = mesh.chunk;
        writeln!(
            out,
            "g chunk_{}_{}_{}_{}",
            chunk.x,
            chunk.y,
            chunk.z,
            mesh.material.replace('/', "_")
        )?;
        writeln!(out, "usemtl {}", mesh.material)?;

        for vertex in &mesh.vertices {
            let [x, y, z] = vertex.position;
            writeln!(out, "v {x} {y} {z}")?;
        }
        for vertex in &mesh.vertices {
            let [u, v] = vertex.uv;
            writeln!(out, "vt {u} {v}")?;
        }
        for vertex in &mesh.vertices {
            let [x, y, z] = vertex.normal;
            writeln!(out, "vn {x} {y} {z}")?;
        }

        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| base + i as usize);
            writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        }

        base += mesh.vertices.len();
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brushwork_world::{BuildConfig, WorldBuilder};

    const TWO_MATERIAL_CUBE: &str = r#"
world
{
    "classname" "worldspawn"
    solid
    {
        side { "plane" "(0 64 64) (64 64 64) (64 0 64)" "material" "METAL/METALFLOOR001A" }
        side { "plane" "(0 0 0) (64 0 0) (64 64 0)" "material" "DEV/CONCRETE" }
        side { "plane" "(0 64 64) (0 0 64) (0 0 0)" "material" "DEV/CONCRETE" }
        side { "plane" "(64 64 0) (64 0 0) (64 0 64)" "material" "DEV/CONCRETE" }
        side { "plane" "(64 64 64) (0 64 64) (0 64 0)" "material" "DEV/CONCRETE" }
        side { "plane" "(64 0 0) (0 0 0) (0 0 64)" "material" "DEV/CONCRETE" }
    }
}
"#;

    fn export(source: &str) -> String {
        let world = WorldBuilder::new(BuildConfig::default())
            .unwrap()
            .load_str(source)
            .unwrap();
        let mut out = Vec::new();
        write_obj(&world.visual_meshes, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn lines<'a>(text: &'a str, tag: &str) -> Vec<&'a str> {
        text.lines().filter(|l| l.split(' ').next() == Some(tag)).collect()
    }

    #[test]
    fn test_counts_match_meshes() {
        let text = export(TWO_MATERIAL_CUBE);

        assert_eq!(lines(&text, "g").len(), 2);
        assert_eq!(lines(&text, "v").len(), 24);
        assert_eq!(lines(&text, "vt").len(), 24);
        assert_eq!(lines(&text, "vn").len(), 24);
        assert_eq!(lines(&text, "f").len(), 12);
        assert!(text.contains("usemtl dev/concrete"));
        assert!(text.contains("g chunk_0_0_-1_metal_metalfloor001a"));
    }

    #[test]
    fn test_face_indices_are_global_and_in_range() {
        let text = export(TWO_MATERIAL_CUBE);
        let vertex_count = lines(&text, "v").len();

        let indices: Vec<usize> = lines(&text, "f")
            .iter()
            .flat_map(|l| l.split(' ').skip(1))
            .map(|corner| corner.split('/').next().unwrap().parse().unwrap())
            .collect();

        assert!(indices.iter().all(|&i| (1..=vertex_count).contains(&i)));
        // The second group starts past the first group's vertices
        assert!(indices.iter().any(|&i| i > 4));
        assert!(indices.contains(&1));
        assert!(indices.contains(&vertex_count));
    }

    #[test]
    fn test_empty_world_writes_header_only() {
        let mut out = Vec::new();
        write_obj(&[], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
