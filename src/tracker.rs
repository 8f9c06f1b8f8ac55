//! The capture loop: frame in, gesture state out.
//!
//! Each tick acquires a frame, mirrors it for selfie view, runs the
//! landmark source, classifies the gesture, normalizes the index
//! fingertip position, and publishes one [`GestureState`] to the hub.
//! A failed frame read skips the tick silently and retries immediately.

use std::time::Duration;

use anyhow::Result;
use image::{ImageBuffer, Rgb};

use crate::gesture;
use crate::hub::StateHub;
use crate::landmarker::LandmarkSource;
use crate::types::{GestureState, HandObservation};

/// Frame acquisition seam; implemented by the camera and by test fakes.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>>;
}

pub struct Tracker<F, L> {
    frames: F,
    landmarks: L,
    hub: StateHub,
    mirror: bool,
    interval: Duration,
}

impl<F: FrameSource, L: LandmarkSource> Tracker<F, L> {
    pub fn new(frames: F, landmarks: L, hub: StateHub, mirror: bool, interval: Duration) -> Self {
        Self {
            frames,
            landmarks,
            hub,
            mirror,
            interval,
        }
    }

    /// One capture/classify/publish cycle. Returns the published state,
    /// or `None` when the frame read failed and the tick was skipped.
    pub fn tick(&mut self) -> Result<Option<GestureState>> {
        let mut frame = match self.frames.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!("frame read failed, skipping tick: {e:#}");
                return Ok(None);
            }
        };

        if self.mirror {
            image::imageops::flip_horizontal_in_place(&mut frame);
        }

        let (width, height) = frame.dimensions();
        let state = match self.landmarks.detect(&frame)? {
            Some(obs) => {
                log::trace!("hand present (score {:.2})", obs.score);
                observed_state(&obs, width, height)
            }
            None => GestureState::empty(),
        };

        self.hub.publish(&state)?;
        Ok(Some(state))
    }

    /// Run until the process exits. A skipped tick retries immediately;
    /// a published tick sleeps the publish interval to bound CPU usage.
    pub fn run(mut self) {
        loop {
            match self.tick() {
                Ok(Some(_)) => std::thread::sleep(self.interval),
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("tracker tick failed: {e:#}");
                    std::thread::sleep(self.interval);
                }
            }
        }
    }
}

/// The state record for a frame with a detected hand: gesture label plus
/// the index fingertip normalized to [0,1] of the frame dimensions.
///
/// The fingertip goes through pixel space (truncating) and back, so the
/// published value is the position of the pixel the tip landed on; this
/// leaves room for future pixel-space processing.
fn observed_state(obs: &HandObservation, width: u32, height: u32) -> GestureState {
    let tip = obs.index_tip();
    let px = (tip.x * width as f32) as u32;
    let py = (tip.y * height as f32) as u32;

    GestureState {
        x: Some(px as f32 / width as f32),
        y: Some(py as f32 / height as f32),
        gesture: gesture::classify(obs),
    }
}
