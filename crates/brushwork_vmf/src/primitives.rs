//! String encodings of geometric values.
//!
//! - plane: `(x1 y1 z1) (x2 y2 z2) (x3 y3 z3)`
//! - texture axis: `[x y z offset] scale`
//! - origin / angles: `x y z`

use brushwork_shared::Vec3;

use crate::error::ParseError;
use crate::model::TextureAxis;

/// Parses the three points of a `plane` value.
///
/// # Errors
///
/// `InvalidPlane` unless the value is exactly three parenthesised triples
/// of finite numbers.
pub fn parse_plane_points(value: &str) -> Result<[Vec3; 3], ParseError> {
    let invalid = || ParseError::InvalidPlane {
        value: value.to_string(),
    };

    let mut points = [Vec3::ZERO; 3];
    let mut rest = value.trim();
    for point in &mut points {
        let inner = rest.strip_prefix('(').ok_or_else(invalid)?;
        let close = inner.find(')').ok_or_else(invalid)?;
        *point = parse_numbers::<3>(&inner[..close])
            .map(Vec3::from_array)
            .ok_or_else(invalid)?;
        rest = inner[close + 1..].trim_start();
    }

    if rest.is_empty() {
        Ok(points)
    } else {
        Err(invalid())
    }
}

/// Parses a `uaxis` / `vaxis` value.
///
/// # Errors
///
/// `InvalidTextureAxis` if the bracketed part is not four numbers, the
/// trailing scale is missing, or the scale is zero.
pub fn parse_texture_axis(value: &str) -> Result<TextureAxis, ParseError> {
    let invalid = || ParseError::InvalidTextureAxis {
        value: value.to_string(),
    };

    let inner = value.trim().strip_prefix('[').ok_or_else(invalid)?;
    let close = inner.find(']').ok_or_else(invalid)?;
    let [x, y, z, offset] = parse_numbers::<4>(&inner[..close]).ok_or_else(invalid)?;
    let [scale] = parse_numbers::<1>(&inner[close + 1..]).ok_or_else(invalid)?;

    if scale.abs() < f64::EPSILON {
        return Err(invalid());
    }

    Ok(TextureAxis {
        direction: Vec3::new(x, y, z),
        offset,
        scale,
    })
}

/// Parses a space-separated `x y z` value (origin, angles).
///
/// # Errors
///
/// `InvalidVector` unless the value is exactly three finite numbers.
pub fn parse_vec3(key: &str, value: &str) -> Result<Vec3, ParseError> {
    parse_numbers::<3>(value)
        .map(Vec3::from_array)
        .ok_or_else(|| ParseError::InvalidVector {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// Parses exactly `N` whitespace-separated finite numbers.
fn parse_numbers<const N: usize>(text: &str) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    let mut parts = text.split_whitespace();
    for slot in &mut out {
        let n: f64 = parts.next()?.parse().ok()?;
        if !n.is_finite() {
            return None;
        }
        *slot = n;
    }
    parts.next().is_none().then_some(out)
}
