use serde::Serialize;

/// Hand landmark indices (MediaPipe hand landmark model convention).
/// See: https://google.github.io/mediapipe/solutions/hands.html
#[allow(dead_code)]
pub mod landmark_ids {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// A single hand landmark in normalized image coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Landmark {
    /// 0.0 to 1.0, fraction of frame width
    pub x: f32,
    /// 0.0 to 1.0, fraction of frame height
    pub y: f32,
    /// Relative depth; not used by the gesture classifiers
    #[allow(dead_code)]
    pub z: f32,
}

/// One detected hand: all 21 landmarks plus the model's presence score.
/// At most one of these exists per processed frame.
#[derive(Debug, Clone)]
pub struct HandObservation {
    pub landmarks: [Landmark; 21],
    pub score: f32,
}

impl HandObservation {
    pub fn landmark(&self, id: usize) -> Landmark {
        self.landmarks[id]
    }

    pub fn index_tip(&self) -> Landmark {
        self.landmarks[landmark_ids::INDEX_FINGER_TIP]
    }
}

/// Per-frame gesture label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    None,
    Draw,
    Erase,
}

/// The record published once per loop iteration.
///
/// `x`/`y` are `None` exactly when no hand was observed; `gesture` is
/// `Draw` or `Erase` only when a hand was observed this iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestureState {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub gesture: Gesture,
}

impl GestureState {
    /// The record for a frame with no detected hand.
    pub fn empty() -> Self {
        Self {
            x: None,
            y: None,
            gesture: Gesture::None,
        }
    }
}
