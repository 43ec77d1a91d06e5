//! Gesture classification from a single frame of landmarks.
//!
//! No memory across frames and no hysteresis: a verdict may flip from one
//! frame to the next under jitter, and consumers have to live with that.
//! Pinch and flat-hand are not exclusive here; the drawing engine decides
//! which one wins.

use crate::config::GestureConfig;
use crate::landmarks::LandmarkFrame;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureVerdict {
    pub pinch: bool,
    pub flat_hand: bool,
}

#[derive(Clone, Debug)]
pub struct GestureClassifier {
    pinch_threshold: f32,
    thumb_extension_threshold: f32,
}

impl GestureClassifier {
    /// Thresholds in `config` are calibrated at `config.reference_width`
    /// and scaled linearly to `frame_width`.
    pub fn new(config: &GestureConfig, frame_width: usize) -> Self {
        let scale = frame_width as f32 / config.reference_width.max(1) as f32;
        Self {
            pinch_threshold: config.pinch_threshold * scale,
            thumb_extension_threshold: config.thumb_extension_threshold * scale,
        }
    }

    pub fn pinch_threshold(&self) -> f32 {
        self.pinch_threshold
    }

    pub fn thumb_extension_threshold(&self) -> f32 {
        self.thumb_extension_threshold
    }

    pub fn classify(&self, landmarks: Option<&LandmarkFrame>) -> GestureVerdict {
        let Some(hand) = landmarks else {
            return GestureVerdict::default();
        };
        GestureVerdict { pinch: self.is_pinch(hand), flat_hand: self.is_flat_hand(hand) }
    }

    fn is_pinch(&self, hand: &LandmarkFrame) -> bool {
        hand.thumb_tip().distance(hand.index_tip()) < self.pinch_threshold
    }

    /// All four fingertips above their PIP joints (image y grows downwards)
    /// and the thumb spread away from its MCP joint.
    fn is_flat_hand(&self, hand: &LandmarkFrame) -> bool {
        let fingers_extended = hand.finger_joints().iter().all(|(tip, pip)| tip.y < pip.y);
        let thumb_extended =
            hand.thumb_tip().distance(hand.thumb_mcp()) > self.thumb_extension_threshold;
        fingers_extended && thumb_extended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::*;
    use crate::types::Point;

    fn hand(joints: &[(usize, (i32, i32))]) -> LandmarkFrame {
        let mut frame = LandmarkFrame::new([Point::ORIGIN; LANDMARK_COUNT]);
        for &(j, p) in joints {
            frame.set(j, p.into());
        }
        frame
    }

    fn flat_hand() -> LandmarkFrame {
        hand(&[
            (INDEX_TIP, (100, 100)), (INDEX_PIP, (100, 200)),
            (MIDDLE_TIP, (150, 100)), (MIDDLE_PIP, (150, 200)),
            (RING_TIP, (200, 100)), (RING_PIP, (200, 200)),
            (PINKY_TIP, (250, 100)), (PINKY_PIP, (250, 200)),
            (THUMB_TIP, (50, 150)), (THUMB_MCP, (100, 250)),
        ])
    }

    fn pinching_hand() -> LandmarkFrame {
        hand(&[
            (INDEX_TIP, (100, 100)), (INDEX_PIP, (100, 200)),
            (MIDDLE_TIP, (150, 250)), (MIDDLE_PIP, (150, 200)),
            (RING_TIP, (200, 250)), (RING_PIP, (200, 200)),
            (PINKY_TIP, (250, 250)), (PINKY_PIP, (250, 200)),
            (THUMB_TIP, (105, 105)), (THUMB_MCP, (100, 250)),
        ])
    }

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(&GestureConfig::default(), 640)
    }

    #[test]
    fn no_hand_is_neutral() {
        assert_eq!(classifier().classify(None), GestureVerdict { pinch: false, flat_hand: false });
    }

    #[test]
    fn detects_flat_hand() {
        let v = classifier().classify(Some(&flat_hand()));
        assert!(v.flat_hand);
        assert!(!v.pinch);
    }

    #[test]
    fn detects_pinch() {
        let v = classifier().classify(Some(&pinching_hand()));
        assert!(v.pinch);
        assert!(!v.flat_hand);
    }

    #[test]
    fn pinch_ignores_other_joints() {
        let mut h = flat_hand();
        h.set(THUMB_TIP, Point::new(110, 110));
        let v = classifier().classify(Some(&h));
        // Both tests hold at once; arbitration is not done here.
        assert!(v.pinch);
        assert!(v.flat_hand);
    }

    #[test]
    fn pinch_threshold_is_strict() {
        let c = classifier();
        let mut h = pinching_hand();
        h.set(THUMB_TIP, Point::new(100, 123)); // 23 px
        assert!(c.classify(Some(&h)).pinch);
        h.set(THUMB_TIP, Point::new(100, 124)); // 24 px > 23.5
        assert!(!c.classify(Some(&h)).pinch);
    }

    #[test]
    fn one_curled_finger_breaks_flat_hand() {
        let mut h = flat_hand();
        h.set(RING_TIP, Point::new(200, 200)); // level with the pip, not above
        assert!(!classifier().classify(Some(&h)).flat_hand);
    }

    #[test]
    fn tucked_thumb_breaks_flat_hand() {
        let mut h = flat_hand();
        h.set(THUMB_TIP, Point::new(100, 225)); // 25 px from mcp
        assert!(!classifier().classify(Some(&h)).flat_hand);
    }

    #[test]
    fn thresholds_scale_with_frame_width() {
        let c = GestureClassifier::new(&GestureConfig::default(), 1280);
        assert_eq!(c.pinch_threshold(), 47.0);
        assert_eq!(c.thumb_extension_threshold(), 60.0);

        let mut h = pinching_hand();
        h.set(THUMB_TIP, Point::new(100, 140)); // 40 px: a pinch only at 1280
        assert!(c.classify(Some(&h)).pinch);
        assert!(!classifier().classify(Some(&h)).pinch);
    }
}
