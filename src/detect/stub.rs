//! Stub detector backend for tests and bench deployments without a model.

use anyhow::Result;

use crate::detect::{DetectionBatch, Detector};
use crate::ingest::Frame;

/// Replays a canned batch on every frame. Defaults to an empty batch.
pub struct StubDetector {
    batch: DetectionBatch,
}

impl StubDetector {
    pub fn new() -> Self {
        Self {
            batch: DetectionBatch::default(),
        }
    }

    /// Replaces the canned batch returned by `infer`.
    pub fn with_batch(mut self, batch: DetectionBatch) -> Self {
        self.batch = batch;
        self
    }
}

impl Default for StubDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for StubDetector {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn infer(&mut self, _frame: &Frame) -> Result<DetectionBatch> {
        Ok(self.batch.clone())
    }
}
