//! Geometry primitives for detection post-processing.
//!
//! Two coordinate spaces are in play:
//! - **Pixel space**: detector output, origin top-left, units of pixels.
//! - **Normalized space**: `x, y ∈ [0, 1]`, pixel coordinates divided by the
//!   frame dimensions. The perimeter polygon is configured in this space so
//!   the same zone definition works across capture resolutions.

use anyhow::{anyhow, Result};

/// A point in either coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box in pixel space: `(x1, y1)` top-left,
/// `(x2, y2)` bottom-right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Midpoint of the box, in the same coordinate space as the box.
    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Closed-interval containment: points on the box edge count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// `[x1, y1, x2, y2]`, the wire shape of `person_bbox` in event records.
    pub fn to_array(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// Maps a pixel-space point into normalized frame coordinates.
///
/// Frame dimensions must be positive; zero dimensions are a configuration
/// error and rejected here rather than producing NaN/inf downstream.
pub fn to_normalized(p: Point, frame_w: u32, frame_h: u32) -> Result<Point> {
    if frame_w == 0 || frame_h == 0 {
        return Err(anyhow!(
            "invalid frame dimensions {}x{} (must be positive)",
            frame_w,
            frame_h
        ));
    }
    Ok(Point::new(p.x / frame_w as f32, p.y / frame_h as f32))
}

/// Restricted-zone polygon in normalized coordinates.
///
/// The vertex list must describe a simple (non-self-intersecting) polygon;
/// that property is a documented precondition, not validated here. A
/// self-intersecting input yields whatever the even-odd rule yields.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Builds a polygon from ≥3 vertices, each within `[0, 1]` on both axes.
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(anyhow!(
                "perimeter polygon needs at least 3 vertices, got {}",
                vertices.len()
            ));
        }
        for v in &vertices {
            if !(0.0..=1.0).contains(&v.x) || !(0.0..=1.0).contains(&v.y) {
                return Err(anyhow!(
                    "polygon vertex ({}, {}) outside normalized range [0, 1]",
                    v.x,
                    v.y
                ));
            }
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Even-odd ray-cast containment test.
    ///
    /// Boundary semantics: a point exactly on an edge is not guaranteed to
    /// test inside (strict containment, matching the reference zone test).
    /// The answer for any given point is deterministic: repeated calls with
    /// identical inputs always agree.
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for i in 0..self.vertices.len() {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
