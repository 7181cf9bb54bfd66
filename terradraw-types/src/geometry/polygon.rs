#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TerraDrawError;

use super::{Coord, LineString};

/// A polygon made of one exterior ring and zero or more interior (hole)
/// rings, following OGC Simple Features semantics.
///
/// Rings are expected to be closed (first coordinate equals last). Use
/// [`Polygon::new`] to construct one from an open or closed ring -- it
/// closes the ring for you if the caller forgot, mirroring how most GeoJSON
/// producers behave in practice.
///
/// `Polygon` only enforces the *structural* invariants that don't require a
/// geometry-kernel algorithm (closure, minimum vertex count). Self-intersection
/// is a kernel-level check (`terradraw::geometry::self_intersects`) applied by
/// the feature store on every create/update, not by this type.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    exterior: LineString,
    interiors: Vec<LineString>,
}

impl Polygon {
    pub fn new(mut exterior: LineString, mut interiors: Vec<LineString>) -> Self {
        close_ring(&mut exterior);
        for interior in &mut interiors {
            close_ring(interior);
        }
        Polygon {
            exterior,
            interiors,
        }
    }

    pub fn exterior(&self) -> &LineString {
        &self.exterior
    }

    pub fn exterior_mut(&mut self) -> &mut LineString {
        &mut self.exterior
    }

    pub fn interiors(&self) -> &[LineString] {
        &self.interiors
    }

    pub fn interiors_mut(&mut self) -> &mut Vec<LineString> {
        &mut self.interiors
    }

    /// Checks ring closure and minimum-vertex-count invariants for the
    /// exterior and every interior ring.
    pub fn validate(&self) -> Result<(), TerraDrawError> {
        validate_ring(&self.exterior)?;
        for interior in &self.interiors {
            validate_ring(interior)?;
        }
        Ok(())
    }
}

fn close_ring(ring: &mut LineString) {
    let coords = ring.coords_mut();
    match (coords.first().copied(), coords.last().copied()) {
        (Some(first), Some(last)) if first != last => coords.push(first),
        _ => {}
    }
}

fn validate_ring(ring: &LineString) -> Result<(), TerraDrawError> {
    let coords = ring.coords();
    let (Some(first), Some(last)) = (coords.first(), coords.last()) else {
        return Err(TerraDrawError::DegenerateRing(coords.len()));
    };
    if first != last {
        return Err(TerraDrawError::UnclosedRing);
    }
    // distinct vertices = len - 1 (the closing coordinate repeats the first)
    let distinct = coords.len().saturating_sub(1);
    if distinct < 3 {
        return Err(TerraDrawError::DegenerateRing(distinct));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> LineString {
        LineString::new(coords.iter().map(|&(x, y)| Coord::new(x, y)).collect())
    }

    #[test]
    fn auto_closes_open_ring() {
        let p = Polygon::new(
            ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]),
            vec![],
        );
        assert_eq!(p.exterior().len(), 5);
        assert_eq!(p.exterior().coords()[4], Coord::new(0.0, 0.0));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_triangle_collapse() {
        let p = Polygon::new(ring(&[(0.0, 0.0), (0.0, 1.0)]), vec![]);
        assert!(p.validate().is_err());
    }
}
