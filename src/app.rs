//! One frame through the whole core, in fixed order:
//! classify → dashboard → drawing engine → cursor → dashboard render → composite.

use crate::compositor::composite_in_place;
use crate::config::{Config, HandLossPolicy};
use crate::dashboard::Dashboard;
use crate::draw::{draw_circle, fill_circle};
use crate::engine::DrawingEngine;
use crate::error::Error;
use crate::gesture::GestureClassifier;
use crate::landmarks::LandmarkFrame;
use crate::state::{GestureFlags, InteractionState};
use crate::types::{Color, FrameBuffer, Point};

/// Pointer handed to the engine on frames without a hand.
pub const NO_HAND_POINTER: Point = Point::ORIGIN;

const CURSOR_OUTLINE: i32 = 2;

pub struct Whiteboard {
    width: usize,
    height: usize,
    classifier: GestureClassifier,
    dashboard: Dashboard,
    engine: DrawingEngine,
    state: InteractionState,
    hand_loss: HandLossPolicy,
    show_cursor: bool,
}

impl Whiteboard {
    /// Validates the configuration once; nothing is re-checked per frame.
    pub fn new(config: &Config, width: usize, height: usize) -> Result<Self, Error> {
        config.validate()?;
        let dashboard = Dashboard::new(width, height, &config.dashboard)?;
        let classifier = GestureClassifier::new(&config.gestures, width);
        log::info!(
            "Whiteboard {}x{}: pinch < {:.1}px, thumb spread > {:.1}px, {} buttons",
            width,
            height,
            classifier.pinch_threshold(),
            classifier.thumb_extension_threshold(),
            dashboard.buttons().len()
        );
        Ok(Self {
            width,
            height,
            classifier,
            dashboard,
            engine: DrawingEngine::new(width, height, config.drawing.smoothing_window),
            state: InteractionState::new(&config.tools),
            hand_loss: config.drawing.hand_loss,
            show_cursor: config.drawing.show_cursor,
        })
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn engine(&self) -> &DrawingEngine {
        &self.engine
    }

    pub fn clear_canvas(&mut self) {
        self.engine.clear();
    }

    /// Run one frame and return the composed output.
    pub fn process(&mut self, live: &FrameBuffer, hand: Option<&LandmarkFrame>) -> Result<FrameBuffer, Error> {
        let mut frame = live.clone();
        self.update(&mut frame, hand);
        self.dashboard.render(&mut frame, &self.state.tools);
        composite_in_place(&mut frame, self.engine.canvas(), self.engine.preview())?;
        Ok(frame)
    }

    fn update(&mut self, frame: &mut FrameBuffer, hand: Option<&LandmarkFrame>) {
        self.state.gestures = GestureFlags::from(self.classifier.classify(hand));

        let Some(hand) = hand else {
            if self.hand_loss == HandLossPolicy::Discard {
                self.engine.abandon();
            }
            self.engine.step(&self.state, NO_HAND_POINTER, false);
            return;
        };

        let pointer = hand.index_tip();
        let consumed =
            self.dashboard.handle(pointer, self.state.gestures.pinch_active, &mut self.state.tools);
        self.engine.step(&self.state, pointer, consumed);

        if self.show_cursor && !consumed {
            self.draw_cursor(frame, pointer);
        }
    }

    /// Pen-sized dot in the pen color, eraser-sized white ring while erasing;
    /// filled while pinching.
    fn draw_cursor(&self, frame: &mut FrameBuffer, at: Point) {
        let tools = &self.state.tools;
        let gestures = self.state.gestures;
        let (color, radius) = if gestures.flat_hand {
            (Color::WHITE, tools.eraser_size)
        } else {
            (tools.pen_color, tools.pen_size)
        };
        if gestures.pinch_active {
            fill_circle(frame, at, radius as i32, color.pack());
        } else {
            draw_circle(frame, at, radius as i32, CURSOR_OUTLINE, color.pack());
        }
    }
}
