//! Mouse-driven stand-in for the landmark detector.
//!
//! Real landmarks come from an external hand-tracking model. Without one, the
//! driver builds a synthetic hand whose index fingertip follows the mouse:
//! left button pinches, right button opens the hand flat. The rest of the
//! pipeline cannot tell the difference.

use crate::landmarks::*;
use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandPose {
    /// Index finger pointing, others curled, thumb away.
    Open,
    /// Thumb tip touching the index tip.
    Pinch,
    /// All fingers up, thumb spread.
    Flat,
}

impl HandPose {
    /// Right button wins over left, like flat-hand wins over pinch.
    pub fn from_buttons(left: bool, right: bool) -> Self {
        match (left, right) {
            (_, true) => HandPose::Flat,
            (true, false) => HandPose::Pinch,
            (false, false) => HandPose::Open,
        }
    }
}

pub struct SimulatedHand;

impl SimulatedHand {
    /// Offsets are generous enough that each pose classifies as intended for
    /// frames up to four times the reference width.
    pub fn landmarks(index_tip: Point, pose: HandPose) -> LandmarkFrame {
        let at = |dx: i32, dy: i32| Point::new(index_tip.x + dx, index_tip.y + dy);
        // Fingertips sit 40 px above their PIP joints when extended, 30 px below when curled.
        let finger = |dx: i32, extended: bool| {
            let pip = at(dx, 40);
            let tip = if extended { at(dx, 0) } else { at(dx, 70) };
            (pip, tip)
        };
        let flat = pose == HandPose::Flat;

        let mut pts = [Point::ORIGIN; LANDMARK_COUNT];
        pts[WRIST] = at(30, 220);

        pts[THUMB_CMC] = at(-20, 190);
        pts[THUMB_MCP] = at(-40, 160);
        pts[THUMB_IP] = at(-90, 120);
        pts[THUMB_TIP] = match pose {
            HandPose::Pinch => at(3, 3),
            HandPose::Open | HandPose::Flat => at(-150, 80),
        };

        for (mcp, pip, dip, tip, dx, extended) in [
            (INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP, 0, true),
            (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP, 25, flat),
            (RING_MCP, RING_PIP, RING_DIP, RING_TIP, 50, flat),
            (PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP, 75, flat),
        ] {
            let (p, t) = finger(dx, extended);
            pts[mcp] = at(dx, 90);
            pts[pip] = p;
            pts[dip] = Point::new(p.x, (p.y + t.y) / 2);
            pts[tip] = t;
        }
        pts[INDEX_TIP] = index_tip;

        LandmarkFrame::new(pts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GestureConfig;
    use crate::gesture::{GestureClassifier, GestureVerdict};

    fn verdict(pose: HandPose, width: usize) -> GestureVerdict {
        let hand = SimulatedHand::landmarks(Point::new(300, 300), pose);
        GestureClassifier::new(&GestureConfig::default(), width).classify(Some(&hand))
    }

    #[test]
    fn poses_classify_as_intended() {
        for width in [320, 640, 1080, 2560] {
            assert_eq!(verdict(HandPose::Open, width), GestureVerdict { pinch: false, flat_hand: false }, "{width}");
            assert_eq!(verdict(HandPose::Pinch, width), GestureVerdict { pinch: true, flat_hand: false }, "{width}");
            assert_eq!(verdict(HandPose::Flat, width), GestureVerdict { pinch: false, flat_hand: true }, "{width}");
        }
    }

    #[test]
    fn index_tip_follows_pointer() {
        let hand = SimulatedHand::landmarks(Point::new(12, 34), HandPose::Pinch);
        assert_eq!(hand.index_tip(), Point::new(12, 34));
    }

    #[test]
    fn right_button_takes_priority() {
        assert_eq!(HandPose::from_buttons(true, true), HandPose::Flat);
        assert_eq!(HandPose::from_buttons(true, false), HandPose::Pinch);
        assert_eq!(HandPose::from_buttons(false, false), HandPose::Open);
    }
}
