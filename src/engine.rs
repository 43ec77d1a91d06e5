//! The drawing state machine.
//!
//! Every frame, in priority order:
//! 1. flat hand erases on the persistent canvas and drops any open stroke;
//! 2. no pinch (or a pinch the dashboard took) closes the stroke, committing a
//!    pending shape on a plain release;
//! 3. otherwise the pointer is smoothed and either inks the persistent canvas
//!    (freehand) or previews the shape on the preview canvas.
//!
//! The preview canvas is cleared on every call, so it only ever holds the
//! current frame's shape.

use std::collections::VecDeque;

use crate::draw::{draw_circle, draw_rect, draw_thick_line, fill_circle};
use crate::state::{InteractionState, ShapeType, Tool};
use crate::types::{Color, FrameBuffer, Point};

/// Fixed-capacity FIFO of raw pointer positions; the oldest is evicted first.
#[derive(Clone, Debug)]
pub struct SmoothingWindow {
    points: VecDeque<Point>,
    capacity: usize,
}

impl SmoothingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { points: VecDeque::with_capacity(capacity), capacity }
    }

    /// Add a point and return the per-axis mean of the window, truncated.
    pub fn push(&mut self, p: Point) -> Point {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(p);
        self.mean()
    }

    fn mean(&self) -> Point {
        let n = self.points.len().max(1) as i64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0i64, 0i64), |(sx, sy), p| (sx + p.x as i64, sy + p.y as i64));
        Point::new((sx / n) as i32, (sy / n) as i32)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One open pinch gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrokeSession {
    pub start_point: Point,
    pub prev_point: Point,
}

impl StrokeSession {
    fn open(at: Point) -> Self {
        Self { start_point: at, prev_point: at }
    }
}

pub struct DrawingEngine {
    canvas: FrameBuffer,
    preview: FrameBuffer,
    smoothing: SmoothingWindow,
    stroke: Option<StrokeSession>,
}

impl DrawingEngine {
    pub fn new(width: usize, height: usize, smoothing_window: usize) -> Self {
        Self {
            canvas: FrameBuffer::blank(width, height),
            preview: FrameBuffer::blank(width, height),
            smoothing: SmoothingWindow::new(smoothing_window),
            stroke: None,
        }
    }

    /// Advance one frame. Must be called every frame, hand or no hand.
    pub fn step(&mut self, state: &InteractionState, pointer: Point, dashboard_consumed: bool) {
        self.preview.clear();
        let tools = &state.tools;

        if state.gestures.flat_hand {
            fill_circle(&mut self.canvas, pointer, tools.eraser_size as i32, Color::BLANK.pack());
            self.smoothing.clear();
            self.stroke = None;
            return;
        }

        if dashboard_consumed || !state.gestures.pinch_active {
            self.smoothing.clear();
            if let Some(stroke) = self.stroke.take() {
                if !dashboard_consumed {
                    self.commit(state, stroke.start_point, pointer);
                }
            }
            return;
        }

        let current = self.smoothing.push(pointer);
        let stroke = self.stroke.get_or_insert(StrokeSession::open(current));
        let color = tools.pen_color.pack();
        let width = tools.pen_size as i32;

        match (tools.tool, tools.shape_type) {
            (Tool::Pen, ShapeType::Freehand) => {
                draw_thick_line(&mut self.canvas, stroke.prev_point, current, width, color);
                stroke.prev_point = current;
            }
            (Tool::Pen, shape) => {
                draw_shape(&mut self.preview, shape, stroke.start_point, current, width, color);
            }
        }
    }

    /// Make the pending shape permanent. Freehand ink is already on the canvas.
    fn commit(&mut self, state: &InteractionState, start: Point, end: Point) {
        let tools = &state.tools;
        if tools.shape_type == ShapeType::Freehand {
            return;
        }
        log::debug!("Committing {:?} from {:?} to {:?}", tools.shape_type, start, end);
        draw_shape(
            &mut self.canvas,
            tools.shape_type,
            start,
            end,
            tools.pen_size as i32,
            tools.pen_color.pack(),
        );
    }

    /// Drop the open stroke without committing it.
    pub fn abandon(&mut self) {
        if let Some(stroke) = self.stroke.take() {
            log::debug!("Abandoning stroke started at {:?}", stroke.start_point);
        }
        self.smoothing.clear();
        self.preview.clear();
    }

    /// Wipe all committed ink.
    pub fn clear(&mut self) {
        self.abandon();
        self.canvas.clear();
    }

    pub fn canvas(&self) -> &FrameBuffer {
        &self.canvas
    }

    pub fn preview(&self) -> &FrameBuffer {
        &self.preview
    }

    pub fn stroke(&self) -> Option<&StrokeSession> {
        self.stroke.as_ref()
    }

    pub fn smoothing(&self) -> &SmoothingWindow {
        &self.smoothing
    }
}

/// Line, rectangle (opposite corners) or circle (centered on `start`, through
/// `end`). Freehand has no shape geometry.
fn draw_shape(target: &mut FrameBuffer, shape: ShapeType, start: Point, end: Point, width: i32, color: u32) {
    match shape {
        ShapeType::Freehand => {}
        ShapeType::Line => draw_thick_line(target, start, end, width, color),
        ShapeType::Rectangle => draw_rect(target, start, end, width, color),
        ShapeType::Circle => {
            let radius = start.distance(end) as i32;
            draw_circle(target, start, radius, width, color);
        }
    }
}
