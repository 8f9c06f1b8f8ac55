//! ONNX hand landmark inference.
//!
//! Runs a MediaPipe-style hand landmark model over the full frame and
//! yields zero or one [`HandObservation`] per frame. Only the first
//! (highest-scoring) hand is considered; the system tracks one hand.

use anyhow::{Context, Result};
use image::{imageops::FilterType, ImageBuffer, Rgb};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;

use crate::config::DetectionConfig;
use crate::types::{HandObservation, Landmark};

/// Model input edge length (square RGB input).
const INPUT_SIZE: u32 = 224;

/// Anything that can turn a frame into at most one hand observation.
/// Seam for injecting scripted observations in tests.
pub trait LandmarkSource {
    fn detect(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<HandObservation>>;
}

/// Confidence gate for the presence score. A fresh hand must clear the
/// detection threshold; once a hand was accepted, subsequent frames only
/// need the tracking threshold until the hand is lost again.
struct ScoreGate {
    min_detection: f32,
    min_tracking: f32,
    tracking: bool,
}

impl ScoreGate {
    fn new(min_detection: f32, min_tracking: f32) -> Self {
        Self {
            min_detection,
            min_tracking,
            tracking: false,
        }
    }

    fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Accept or reject one frame's score, updating the tracking state.
    fn accept(&mut self, score: f32) -> bool {
        let threshold = if self.tracking {
            self.min_tracking
        } else {
            self.min_detection
        };
        self.tracking = score >= threshold;
        self.tracking
    }

    /// Forget the tracked hand (e.g. on malformed model output).
    fn drop_hand(&mut self) {
        self.tracking = false;
    }
}

pub struct HandLandmarker {
    session: Session,
    gate: ScoreGate,
}

impl HandLandmarker {
    pub fn new(config: &DetectionConfig) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .with_execution_providers([
                ort::execution_providers::CPUExecutionProvider::default().build(),
            ])?
            .commit_from_file(&config.model_path)
            .with_context(|| format!("Failed to load hand model from {}", config.model_path))?;

        Ok(Self {
            session,
            gate: ScoreGate::new(
                config.min_detection_confidence,
                config.min_tracking_confidence,
            ),
        })
    }
}

impl LandmarkSource for HandLandmarker {
    fn detect(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<HandObservation>> {
        // Preprocess: square resize, NHWC, pixels scaled to 0..1
        let resized = image::imageops::resize(frame, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);
        let mut input_data = Vec::with_capacity((INPUT_SIZE * INPUT_SIZE * 3) as usize);
        for y in 0..INPUT_SIZE {
            for x in 0..INPUT_SIZE {
                let pixel = resized.get_pixel(x, y);
                input_data.push(pixel[0] as f32 / 255.0);
                input_data.push(pixel[1] as f32 / 255.0);
                input_data.push(pixel[2] as f32 / 255.0);
            }
        }

        let shape = vec![1_i64, INPUT_SIZE as i64, INPUT_SIZE as i64, 3];
        let input = Tensor::from_array((shape, input_data))?;
        let outputs = self.session.run(ort::inputs![input])?;

        // Output 0: 63 floats (x, y, z per landmark, in input pixel units).
        // Output 1: hand presence score.
        let (_landmark_shape, landmark_data) = outputs[0].try_extract_tensor::<f32>()?;
        let (_score_shape, score_data) = outputs[1].try_extract_tensor::<f32>()?;

        let score = score_data.first().copied().unwrap_or(0.0);
        let was_tracking = self.gate.is_tracking();
        if landmark_data.len() < 63 || !self.gate.accept(score) {
            self.gate.drop_hand();
            if was_tracking {
                log::debug!("hand lost (score {:.2})", score);
            }
            return Ok(None);
        }

        let mut landmarks = [Landmark::default(); 21];
        for (i, lm) in landmarks.iter_mut().enumerate() {
            *lm = Landmark {
                x: landmark_data[i * 3] / INPUT_SIZE as f32,
                y: landmark_data[i * 3 + 1] / INPUT_SIZE as f32,
                z: landmark_data[i * 3 + 2] / INPUT_SIZE as f32,
            };
        }

        Ok(Some(HandObservation { landmarks, score }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_hand_needs_the_detection_threshold() {
        let mut gate = ScoreGate::new(0.5, 0.3);
        // Above tracking but below detection: no hand yet, rejected.
        assert!(!gate.accept(0.4));
        assert!(gate.accept(0.6));
    }

    #[test]
    fn tracked_hand_only_needs_the_tracking_threshold() {
        let mut gate = ScoreGate::new(0.5, 0.3);
        assert!(gate.accept(0.6));
        // Same 0.4 score that a fresh hand would fail on now passes.
        assert!(gate.accept(0.4));
        assert!(gate.is_tracking());
    }

    #[test]
    fn losing_the_hand_resets_to_the_detection_threshold() {
        let mut gate = ScoreGate::new(0.5, 0.3);
        assert!(gate.accept(0.6));
        // Below both thresholds: hand lost.
        assert!(!gate.accept(0.2));
        assert!(!gate.is_tracking());
        // Back to requiring the detection threshold.
        assert!(!gate.accept(0.4));
        assert!(gate.accept(0.6));
    }

    #[test]
    fn dropping_the_hand_clears_tracking() {
        let mut gate = ScoreGate::new(0.5, 0.3);
        assert!(gate.accept(0.6));
        gate.drop_hand();
        assert!(!gate.accept(0.4));
    }
}
