//! Frame acquisition seam.
//!
//! Real capture (V4L2, RTSP, vendor SDKs) lives outside this crate; the
//! engine only needs a stream of fixed-size frames. `stub://` sources
//! produce synthetic frames so the daemon and tests run without hardware.
//!
//! A failed capture is a transient condition: the daemon's policy is to log
//! a warning, back off briefly, and retry. It is never fatal.

use anyhow::{anyhow, Result};

/// One captured frame, already resized to the configured dimensions.
/// Cycle-scoped; the engine never retains a frame across cycles.
pub struct Frame {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Camera source configuration.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    /// Capture source identifier ("0" for the default webcam, a device
    /// path, or `stub://name` for the synthetic source). Also stamped on
    /// every event as the camera field.
    pub source: String,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            source: "0".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Frame source trait. One implementation per capture backend.
pub trait FrameSource: Send {
    /// Capture the next frame. `Err` means this cycle's frame was missed;
    /// the caller retries after a short backoff.
    fn next_frame(&mut self) -> Result<Frame>;

    /// Release the underlying capture handle. Called once on shutdown.
    fn release(&mut self) {}
}

/// Builds a frame source for the configured camera.
///
/// Only synthetic `stub://` sources are built in; anything else must be
/// provided by the embedding deployment. Failing here is an unrecoverable
/// startup error by design.
pub fn open_source(config: &CameraConfig) -> Result<Box<dyn FrameSource>> {
    if config.source.starts_with("stub://") {
        Ok(Box::new(SyntheticSource::new(config.clone())))
    } else {
        Err(anyhow!(
            "no capture backend for source {:?} (only stub:// is built in)",
            config.source
        ))
    }
}

/// Synthetic source: emits flat gray frames at the configured size.
pub struct SyntheticSource {
    config: CameraConfig,
    frames_captured: u64,
}

impl SyntheticSource {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            frames_captured: 0,
        }
    }

    pub fn frames_captured(&self) -> u64 {
        self.frames_captured
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<Frame> {
        self.frames_captured += 1;
        let len = (self.config.width * self.config.height * 3) as usize;
        Ok(Frame {
            pixels: vec![0x80; len],
            width: self.config.width,
            height: self.config.height,
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
