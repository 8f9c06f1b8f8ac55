//! Geometric gesture classifiers over a single hand observation.
//!
//! All predicates compare y coordinates only (image space, smaller y is
//! higher in the frame). Each frame is classified independently; there is
//! no smoothing or hysteresis across frames.

use crate::types::{landmark_ids::*, Gesture, HandObservation};

/// How far (fraction of frame height) the index tip must rise above its
/// MCP to count as extended.
const INDEX_EXTENDED_MARGIN: f32 = 0.05;

/// Margin used both for "other finger curled" and "index above other tips".
const CURL_MARGIN: f32 = 0.02;

/// Tip/MCP pairs for the four tracked fingers (thumb is ignored).
const FINGERS: [(usize, usize); 4] = [
    (INDEX_FINGER_TIP, INDEX_FINGER_MCP),
    (MIDDLE_FINGER_TIP, MIDDLE_FINGER_MCP),
    (RING_FINGER_TIP, RING_FINGER_MCP),
    (PINKY_TIP, PINKY_MCP),
];

/// Index finger extended, the other three curled, and the index tip
/// clearly above the other tips. Maps to the `draw` gesture.
pub fn is_pointing(obs: &HandObservation) -> bool {
    let index_tip = obs.landmark(INDEX_FINGER_TIP);
    let index_mcp = obs.landmark(INDEX_FINGER_MCP);

    // Middle, ring, pinky.
    let others = &FINGERS[1..];

    let index_extended = index_tip.y < index_mcp.y - INDEX_EXTENDED_MARGIN;

    let others_fully_curled = others
        .iter()
        .all(|&(tip, mcp)| obs.landmark(tip).y > obs.landmark(mcp).y + CURL_MARGIN);

    let index_above_others = others
        .iter()
        .all(|&(tip, _)| index_tip.y < obs.landmark(tip).y - CURL_MARGIN);

    index_extended && others_fully_curled && index_above_others
}

/// All four tracked fingertips above their MCPs. Maps to the `erase` gesture.
pub fn is_palm_open(obs: &HandObservation) -> bool {
    let open = FINGERS
        .iter()
        .filter(|&&(tip, mcp)| obs.landmark(tip).y < obs.landmark(mcp).y)
        .count();
    open >= 4
}

/// All four tracked fingertips below their MCPs.
///
/// Available as a classifier but not consulted by [`classify`]; the label
/// policy never produced a gesture from it (possibly an unwired "rest"
/// state in the original design).
#[allow(dead_code)]
pub fn is_fist(obs: &HandObservation) -> bool {
    let curled = FINGERS
        .iter()
        .filter(|&&(tip, mcp)| obs.landmark(tip).y > obs.landmark(mcp).y)
        .count();
    curled >= 4
}

/// Label selection, first match wins: open palm erases, pointing draws.
pub fn classify(obs: &HandObservation) -> Gesture {
    if is_palm_open(obs) {
        Gesture::Erase
    } else if is_pointing(obs) {
        Gesture::Draw
    } else {
        Gesture::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Landmark;

    /// Neutral hand: every landmark at the same height, so no finger
    /// counts as open, curled, or pointing.
    fn neutral() -> HandObservation {
        HandObservation {
            landmarks: [Landmark { x: 0.5, y: 0.5, z: 0.0 }; 21],
            score: 1.0,
        }
    }

    fn set_y(obs: &mut HandObservation, id: usize, y: f32) {
        obs.landmarks[id].y = y;
    }

    /// Canonical pointing pose: index tip well above its MCP, the other
    /// three tips below their MCPs by more than the curl margin.
    fn pointing() -> HandObservation {
        let mut obs = neutral();
        set_y(&mut obs, INDEX_FINGER_MCP, 0.60);
        set_y(&mut obs, INDEX_FINGER_TIP, 0.30);
        for (tip, mcp) in [
            (MIDDLE_FINGER_TIP, MIDDLE_FINGER_MCP),
            (RING_FINGER_TIP, RING_FINGER_MCP),
            (PINKY_TIP, PINKY_MCP),
        ] {
            set_y(&mut obs, mcp, 0.55);
            set_y(&mut obs, tip, 0.62);
        }
        obs
    }

    /// All four tracked tips above their MCPs.
    fn open_palm() -> HandObservation {
        let mut obs = neutral();
        for (tip, mcp) in FINGERS {
            set_y(&mut obs, mcp, 0.60);
            set_y(&mut obs, tip, 0.30);
        }
        obs
    }

    #[test]
    fn pointing_pose_is_pointing() {
        assert!(is_pointing(&pointing()));
    }

    #[test]
    fn neutral_hand_matches_nothing() {
        let obs = neutral();
        assert!(!is_pointing(&obs));
        assert!(!is_palm_open(&obs));
        assert!(!is_fist(&obs));
        assert_eq!(classify(&obs), Gesture::None);
    }

    #[test]
    fn pointing_requires_index_extension_margin() {
        // Exactly at the 0.05 margin: tip.y == mcp.y - 0.05 is not strictly
        // below, so the pose must not count as pointing.
        let mut obs = pointing();
        set_y(&mut obs, INDEX_FINGER_TIP, 0.60 - 0.05);
        assert!(!is_pointing(&obs));

        // Just inside the margin.
        set_y(&mut obs, INDEX_FINGER_TIP, 0.60 - 0.05 - 1e-4);
        assert!(is_pointing(&obs));
    }

    #[test]
    fn pointing_requires_others_curled_margin() {
        // Middle tip only 0.02 below its MCP: boundary, not curled enough.
        let mut obs = pointing();
        set_y(&mut obs, MIDDLE_FINGER_TIP, 0.55 + 0.02);
        assert!(!is_pointing(&obs));

        set_y(&mut obs, MIDDLE_FINGER_TIP, 0.55 + 0.02 + 1e-4);
        assert!(is_pointing(&obs));
    }

    #[test]
    fn pointing_requires_index_above_other_tips() {
        // Bring the ring tip down to within the 0.02 separation of the
        // index tip while keeping it curled relative to its own MCP.
        let mut obs = pointing();
        set_y(&mut obs, RING_FINGER_MCP, 0.29);
        set_y(&mut obs, RING_FINGER_TIP, 0.315);
        assert!(!is_pointing(&obs));
    }

    #[test]
    fn open_palm_is_erase() {
        let obs = open_palm();
        assert!(is_palm_open(&obs));
        assert_eq!(classify(&obs), Gesture::Erase);
    }

    #[test]
    fn palm_needs_all_four_fingers() {
        let mut obs = open_palm();
        // Pinky exactly level with its MCP does not count as open.
        set_y(&mut obs, PINKY_TIP, 0.60);
        assert!(!is_palm_open(&obs));
    }

    #[test]
    fn fist_is_all_four_curled() {
        let mut obs = neutral();
        for (tip, mcp) in FINGERS {
            set_y(&mut obs, mcp, 0.50);
            set_y(&mut obs, tip, 0.70);
        }
        assert!(is_fist(&obs));
        // Fist is never consulted for the label.
        assert_eq!(classify(&obs), Gesture::None);
    }

    #[test]
    fn erase_wins_over_draw() {
        // Index open and pointing-shaped, plus the other three tips barely
        // above their MCPs: palm-open (no margin) and pointing would both
        // like to claim this frame if the margins allowed it. Priority says
        // an open palm always erases.
        let mut obs = pointing();
        for (tip, mcp) in [
            (MIDDLE_FINGER_TIP, MIDDLE_FINGER_MCP),
            (RING_FINGER_TIP, RING_FINGER_MCP),
            (PINKY_TIP, PINKY_MCP),
        ] {
            let mcp_y = obs.landmark(mcp).y;
            set_y(&mut obs, tip, mcp_y - 1e-4);
        }
        assert!(is_palm_open(&obs));
        assert_eq!(classify(&obs), Gesture::Erase);
    }
}
