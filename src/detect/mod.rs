//! Detection types and the detector backend seam.
//!
//! The object-detection model is an opaque oracle to this crate: it receives
//! a frame and returns pixel-space boxes with confidence scores and class
//! ids. Everything downstream (filtering, association, classification) is
//! pure post-processing and lives here or in `engine`.

mod filter;
mod stub;

pub use filter::{ClassMap, ClassifiedDetections};
pub use stub::StubDetector;

use anyhow::Result;

use crate::geometry::BBox;
use crate::ingest::Frame;

/// One object-recognition result for a frame. Cycle-scoped and immutable.
#[derive(Clone, Copy, Debug)]
pub struct Detection {
    /// Bounding box in pixel coordinates (xyxy).
    pub bbox: BBox,
    /// Confidence score in `[0, 1]`.
    pub score: f32,
    /// Model class id; meaning comes from the configured class map.
    pub class_id: i64,
}

/// Raw per-frame detector output. An empty batch is a valid result.
#[derive(Clone, Debug, Default)]
pub struct DetectionBatch {
    pub detections: Vec<Detection>,
}

impl DetectionBatch {
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

/// Detector backend trait.
///
/// Implementations wrap whatever inference runtime the deployment uses.
/// This crate never trains, evaluates, or touches model internals; it only
/// consumes the batch.
pub trait Detector: Send {
    /// Backend identifier, for logs.
    fn name(&self) -> &'static str;

    /// Run inference on one frame.
    fn infer(&mut self, frame: &Frame) -> Result<DetectionBatch>;

    /// Optional warm-up hook.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}
