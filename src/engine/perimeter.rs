//! Restricted-perimeter containment.

use anyhow::{anyhow, Result};

use crate::geometry::{to_normalized, BBox, Polygon};

/// The configured restricted zone plus the frame geometry needed to map
/// pixel-space detections into the zone's normalized coordinates.
///
/// The containment reference point is the person's bounding-box **center**,
/// not a foot point: a person leaning across the zone edge is classified by
/// where their box midpoint lands. That matches the reference behavior; a
/// stricter footprint test would use the bottom-center instead.
pub struct PerimeterZone {
    polygon: Polygon,
    frame_w: u32,
    frame_h: u32,
}

impl PerimeterZone {
    /// Frame dimensions are configuration; zero dimensions fail here, at
    /// construction, rather than mid-loop.
    pub fn new(polygon: Polygon, frame_w: u32, frame_h: u32) -> Result<Self> {
        if frame_w == 0 || frame_h == 0 {
            return Err(anyhow!(
                "invalid frame dimensions {}x{} (must be positive)",
                frame_w,
                frame_h
            ));
        }
        Ok(Self {
            polygon,
            frame_w,
            frame_h,
        })
    }

    /// Whether the person's bbox center lies inside the restricted zone.
    pub fn contains_person(&self, bbox: &BBox) -> Result<bool> {
        let center = to_normalized(bbox.center(), self.frame_w, self.frame_h)?;
        Ok(self.polygon.contains(center))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
