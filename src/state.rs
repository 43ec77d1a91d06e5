//! The interaction record threaded through every frame.
//!
//! The dashboard owns [`ToolSettings`]; the per-frame gesture update owns
//! [`GestureFlags`]. The drawing engine only reads both.

use serde::{Deserialize, Serialize};

use crate::config::ToolDefaults;
use crate::gesture::GestureVerdict;
use crate::types::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Pen,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    #[default]
    Freehand,
    Line,
    Circle,
    Rectangle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolSettings {
    pub tool: Tool,
    pub pen_size: u32,
    pub pen_color: Color,
    pub eraser_size: u32,
    pub shape_type: ShapeType,
}

impl From<&ToolDefaults> for ToolSettings {
    fn from(d: &ToolDefaults) -> Self {
        Self {
            tool: d.tool,
            pen_size: d.pen_size,
            pen_color: d.pen_color,
            eraser_size: d.eraser_size,
            shape_type: d.shape_type,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureFlags {
    pub pinch_active: bool,
    pub flat_hand: bool,
}

impl From<GestureVerdict> for GestureFlags {
    fn from(v: GestureVerdict) -> Self {
        Self { pinch_active: v.pinch, flat_hand: v.flat_hand }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionState {
    pub tools: ToolSettings,
    pub gestures: GestureFlags,
}

impl InteractionState {
    pub fn new(defaults: &ToolDefaults) -> Self {
        Self { tools: defaults.into(), gestures: GestureFlags::default() }
    }
}
