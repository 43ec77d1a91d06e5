//! One frame of hand landmarks in pixel space.
//!
//! The detector itself is an external collaborator; it hands over either
//! nothing or the 21 joints of one hand (MediaPipe hand-landmarker order).

use crate::types::Point;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LandmarkFrame {
    points: [Point; LANDMARK_COUNT],
}

impl LandmarkFrame {
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// None when the detector delivered a short list; that counts as "no hand".
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let points: [Point; LANDMARK_COUNT] = points.get(..LANDMARK_COUNT)?.try_into().ok()?;
        Some(Self { points })
    }

    pub fn set(&mut self, joint: usize, p: Point) {
        self.points[joint] = p;
    }

    pub fn thumb_mcp(&self) -> Point { self.points[THUMB_MCP] }
    pub fn thumb_tip(&self) -> Point { self.points[THUMB_TIP] }
    pub fn index_pip(&self) -> Point { self.points[INDEX_PIP] }
    pub fn index_tip(&self) -> Point { self.points[INDEX_TIP] }
    pub fn middle_pip(&self) -> Point { self.points[MIDDLE_PIP] }
    pub fn middle_tip(&self) -> Point { self.points[MIDDLE_TIP] }
    pub fn ring_pip(&self) -> Point { self.points[RING_PIP] }
    pub fn ring_tip(&self) -> Point { self.points[RING_TIP] }
    pub fn pinky_pip(&self) -> Point { self.points[PINKY_PIP] }
    pub fn pinky_tip(&self) -> Point { self.points[PINKY_TIP] }

    /// (tip, pip) pairs for the four long fingers.
    pub fn finger_joints(&self) -> [(Point, Point); 4] {
        [
            (self.index_tip(), self.index_pip()),
            (self.middle_tip(), self.middle_pip()),
            (self.ring_tip(), self.ring_pip()),
            (self.pinky_tip(), self.pinky_pip()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_list_is_no_hand() {
        let pts = vec![Point::ORIGIN; 20];
        assert!(LandmarkFrame::from_points(&pts).is_none());
    }

    #[test]
    fn extra_points_are_ignored() {
        let pts: Vec<Point> = (0..25).map(|i| Point::new(i, i * 2)).collect();
        let frame = LandmarkFrame::from_points(&pts).unwrap();
        assert_eq!(frame.index_tip(), Point::new(8, 16));
        assert_eq!(frame.pinky_tip(), Point::new(20, 40));
    }
}
