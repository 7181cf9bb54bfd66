#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TerraDrawError;

use super::{LineString, MultiPolygon, Point, Polygon};

/// The geometry carried by a [`Feature`](crate::Feature).
///
/// Every draw mode produces exactly one of these variants; `MultiPolygon` is
/// reachable today only through the select mode's (future) boolean-op
/// helpers, not through any draw mode directly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    pub fn validate(&self) -> Result<(), TerraDrawError> {
        match self {
            Geometry::Point(_) => Ok(()),
            Geometry::LineString(ls) => ls.validate(),
            Geometry::Polygon(p) => p.validate(),
            Geometry::MultiPolygon(mp) => mp.validate(),
        }
    }

    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Geometry::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_line_string(&self) -> Option<&LineString> {
        match self {
            Geometry::LineString(ls) => Some(ls),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Geometry::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut Polygon> {
        match self {
            Geometry::Polygon(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Point> for Geometry {
    fn from(p: Point) -> Self {
        Geometry::Point(p)
    }
}

impl From<LineString> for Geometry {
    fn from(ls: LineString) -> Self {
        Geometry::LineString(ls)
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Geometry::Polygon(p)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(mp: MultiPolygon) -> Self {
        Geometry::MultiPolygon(mp)
    }
}
