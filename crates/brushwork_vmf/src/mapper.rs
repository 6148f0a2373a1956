//! # Semantic Mapper
//!
//! Walks the generic tree and builds the typed `Map`.
//!
//! Failure policy: a bad value degrades only the thing that owns it.
//! - bad or collinear `plane`: the side is dropped (its solid may then
//!   be too small to build, which the geometry stage reports)
//! - bad `uaxis`/`vaxis`: the axis becomes `None` (planar UV fallback)
//! - bad `origin`/`angles`: the field becomes `None`
//! - bad `id`: the id becomes `None`
//!
//! Each of these leaves a `Diagnostic`.

use std::collections::BTreeMap;

use brushwork_shared::Plane;

use crate::error::{Diagnostic, ParseError, Parsed};
use crate::model::{Entity, EntityKind, Map, Side, Solid, TextureAxis, World};
use crate::primitives::{parse_plane_points, parse_texture_axis, parse_vec3};
use crate::tree::Block;

/// Keys the mapper consumes itself; everything else becomes a property.
const RESERVED_ENTITY_KEYS: [&str; 4] = ["id", "classname", "origin", "angles"];

/// Builds a `Map` from a parsed tree.
#[must_use]
pub fn map_document(root: &Block) -> Parsed<Map> {
    let mut mapper = Mapper::default();

    let version = root
        .block("versioninfo")
        .and_then(|info| mapper.integer(info, "mapversion"));

    let world = match root.blocks("world").next() {
        Some((block, _)) => Some(mapper.world(block)),
        None => {
            mapper.report(1, ParseError::MissingWorld);
            None
        }
    };

    let entities = root
        .blocks("entity")
        .map(|(block, line)| mapper.entity(block, line))
        .collect();

    let map = Map {
        version,
        world,
        entities,
    };

    tracing::debug!(
        "mapped {} solids, {} entities, {} diagnostics",
        map.solid_count(),
        map.entities.len(),
        mapper.diagnostics.len()
    );

    Parsed {
        value: map,
        diagnostics: mapper.diagnostics,
    }
}

/// Collects diagnostics while walking the tree.
#[derive(Default)]
struct Mapper {
    diagnostics: Vec<Diagnostic>,
}

impl Mapper {
    fn report(&mut self, line: usize, error: ParseError) {
        tracing::warn!("line {line}: {error}");
        self.diagnostics.push(Diagnostic::new(line, error));
    }

    fn integer(&mut self, block: &Block, key: &str) -> Option<u32> {
        let (raw, line) = block.text_with_line(key)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.report(
                    line,
                    ParseError::InvalidInteger {
                        key: key.to_string(),
                        value: raw.to_string(),
                    },
                );
                None
            }
        }
    }

    fn world(&mut self, block: &Block) -> World {
        World {
            id: self.integer(block, "id"),
            classname: block.text("classname").unwrap_or("worldspawn").to_string(),
            properties: properties(block),
            solids: self.solids(block),
        }
    }

    fn entity(&mut self, block: &Block, line: usize) -> Entity {
        let classname = block.text("classname").unwrap_or_default().to_string();
        let solids = self.solids(block);
        let kind = EntityKind::classify(&classname, !solids.is_empty());

        let origin = self.vector(block, "origin");
        let angles = self.vector(block, "angles");

        if classname.is_empty() {
            tracing::debug!("entity on line {line} has no classname");
        }

        Entity {
            id: self.integer(block, "id"),
            classname,
            kind,
            origin,
            angles,
            properties: properties(block),
            solids,
        }
    }

    fn vector(&mut self, block: &Block, key: &str) -> Option<brushwork_shared::Vec3> {
        let (raw, line) = block.text_with_line(key)?;
        parse_vec3(key, raw)
            .map_err(|err| self.report(line, err))
            .ok()
    }

    fn solids(&mut self, block: &Block) -> Vec<Solid> {
        block
            .blocks("solid")
            .map(|(solid, _)| Solid {
                id: self.integer(solid, "id"),
                sides: solid
                    .blocks("side")
                    .filter_map(|(side, line)| self.side(side, line))
                    .collect(),
            })
            .collect()
    }

    fn side(&mut self, block: &Block, line: usize) -> Option<Side> {
        let Some((raw_plane, plane_line)) = block.text_with_line("plane") else {
            self.report(
                line,
                ParseError::InvalidPlane {
                    value: String::new(),
                },
            );
            return None;
        };

        let points = match parse_plane_points(raw_plane) {
            Ok(points) => points,
            Err(err) => {
                self.report(plane_line, err);
                return None;
            }
        };

        let Some(plane) = Plane::from_points(points[0], points[1], points[2]) else {
            self.report(
                plane_line,
                ParseError::DegeneratePlane {
                    value: raw_plane.to_string(),
                },
            );
            return None;
        };

        Some(Side {
            id: self.integer(block, "id"),
            points,
            plane,
            material: block.text("material").unwrap_or_default().trim().to_string(),
            u_axis: self.axis(block, "uaxis"),
            v_axis: self.axis(block, "vaxis"),
            displacement: block.block("dispinfo").is_some(),
        })
    }

    fn axis(&mut self, block: &Block, key: &str) -> Option<TextureAxis> {
        let (raw, line) = block.text_with_line(key)?;
        parse_texture_axis(raw)
            .map_err(|err| self.report(line, err))
            .ok()
    }
}

/// Every text pair not consumed by the mapper, keys lowercased.
fn properties(block: &Block) -> BTreeMap<String, String> {
    block
        .texts()
        .filter(|(key, _)| {
            !RESERVED_ENTITY_KEYS
                .iter()
                .any(|reserved| key.eq_ignore_ascii_case(reserved))
        })
        .map(|(key, value)| (key.to_ascii_lowercase(), value.to_string()))
        .collect()
}
