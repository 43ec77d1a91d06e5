//! Tool-selection band across the top of the frame.
//!
//! The band is split into equal-width cells, one per configured button. A pinch
//! anywhere inside the band belongs to the dashboard, hit or miss, so ink
//! never lands on the buttons.

use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;
use crate::draw::{draw_rect, draw_text_5x7, fill_rect, text_width_5x7};
use crate::error::ConfigError;
use crate::state::{ShapeType, ToolSettings};
use crate::types::{Color, FrameBuffer, Point};

const BAND_COLOR: Color = Color::DARK_GRAY;
const NEUTRAL_COLOR: Color = Color::GRAY;
const HIGHLIGHT_COLOR: Color = Color::WHITE;
const BORDER_COLOR: Color = Color::BLACK;
const TEXT_COLOR: Color = Color::BLACK;
const BORDER_WIDTH: i32 = 2;

/// What pressing a button sets. One category per button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Color(Color),
    PenSize(u32),
    Shape(ShapeType),
    EraserSize(u32),
}

impl ButtonAction {
    /// True when the tool settings already hold this button's value.
    pub fn is_active(&self, tools: &ToolSettings) -> bool {
        match *self {
            ButtonAction::Color(c) => tools.pen_color == c,
            ButtonAction::PenSize(s) => tools.pen_size == s,
            ButtonAction::Shape(s) => tools.shape_type == s,
            ButtonAction::EraserSize(s) => tools.eraser_size == s,
        }
    }

    pub fn apply(&self, tools: &mut ToolSettings) {
        match *self {
            ButtonAction::Color(c) => tools.pen_color = c,
            ButtonAction::PenSize(s) => tools.pen_size = s,
            ButtonAction::Shape(s) => tools.shape_type = s,
            ButtonAction::EraserSize(s) => tools.eraser_size = s,
        }
    }

    fn label_color(&self) -> Color {
        match *self {
            ButtonAction::Color(c) => c,
            _ => TEXT_COLOR,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSpec {
    pub label: String,
    pub action: ButtonAction,
}

/// Inclusive pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Cell {
    fn contains(&self, p: Point) -> bool {
        self.x1 <= p.x && p.x <= self.x2 && self.y1 <= p.y && p.y <= self.y2
    }
}

#[derive(Clone, Debug)]
pub struct Button {
    pub spec: ButtonSpec,
    pub cell: Cell,
}

#[derive(Clone, Debug)]
pub struct Dashboard {
    width: i32,
    height: i32,
    buttons: Vec<Button>,
}

impl Dashboard {
    pub fn new(frame_width: usize, frame_height: usize, config: &DashboardConfig) -> Result<Self, ConfigError> {
        let count = config.buttons.len();
        if count == 0 {
            return Err(ConfigError::EmptyLayout);
        }
        if config.height == 0 {
            return Err(ConfigError::NotPositive("dashboard.height"));
        }
        if config.height as usize > frame_height {
            return Err(ConfigError::BandTooTall { height: config.height, frame_height });
        }
        let button_width = (frame_width / count) as i32;
        if button_width == 0 {
            return Err(ConfigError::TooNarrow { width: frame_width, buttons: count });
        }
        let height = config.height as i32;
        let buttons = config
            .buttons
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let i = i as i32;
                Button {
                    spec: spec.clone(),
                    cell: Cell { x1: i * button_width, y1: 0, x2: (i + 1) * button_width, y2: height },
                }
            })
            .collect();
        Ok(Self { width: frame_width as i32, height, buttons })
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Returns true when the event belongs to the dashboard and must not
    /// reach the drawing engine.
    pub fn handle(&self, pointer: Point, pinch_active: bool, tools: &mut ToolSettings) -> bool {
        if !pinch_active || pointer.y > self.height {
            return false;
        }
        if let Some(button) = self.buttons.iter().find(|b| b.cell.contains(pointer)) {
            if !button.spec.action.is_active(tools) {
                log::debug!("Dashboard: selected {:?} ({:?})", button.spec.label, button.spec.action);
            }
            button.spec.action.apply(tools);
        }
        true
    }

    pub fn render(&self, frame: &mut FrameBuffer, tools: &ToolSettings) {
        fill_rect(frame, 0, 0, self.width, self.height, BAND_COLOR.pack());

        for Button { spec, cell } in &self.buttons {
            let bg = if spec.action.is_active(tools) { HIGHLIGHT_COLOR } else { NEUTRAL_COLOR };
            fill_rect(frame, cell.x1, cell.y1, cell.x2, cell.y2, bg.pack());
            draw_rect(
                frame,
                Point::new(cell.x1, cell.y1),
                Point::new(cell.x2, cell.y2),
                BORDER_WIDTH,
                BORDER_COLOR.pack(),
            );

            let tx = cell.x1 + (cell.x2 - cell.x1 - text_width_5x7(&spec.label)) / 2;
            let ty = cell.y1 + (cell.y2 - cell.y1 - 7) / 2;
            draw_text_5x7(frame, tx, ty, &spec.label, spec.action.label_color().pack());
        }
    }
}
