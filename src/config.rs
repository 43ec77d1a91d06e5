//! Tunables for the whole pipeline.
//!
//! Everything has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! { "gestures": { "pinch_threshold": 28.0 }, "tools": { "pen_size": 10 } }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dashboard::{ButtonAction, ButtonSpec};
use crate::error::{ConfigError, Error};
use crate::state::{ShapeType, Tool};
use crate::types::Color;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub video: VideoConfig,
    pub gestures: GestureConfig,
    pub drawing: DrawingConfig,
    pub tools: ToolDefaults,
    pub dashboard: DashboardConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub camera_index: u32,
    pub request_width: u32,
    pub request_height: u32,
    /// Frames wider than this are downscaled, keeping aspect ratio.
    pub max_width: u32,
    /// Mirror horizontally so moving right moves the ink right.
    pub mirror: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self { camera_index: 0, request_width: 640, request_height: 480, max_width: 1080, mirror: true }
    }
}

/// Distances are in pixels at `reference_width`; the classifier rescales them
/// to the working frame width.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub pinch_threshold: f32,
    pub thumb_extension_threshold: f32,
    pub reference_width: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { pinch_threshold: 23.5, thumb_extension_threshold: 30.0, reference_width: 640 }
    }
}

/// What happens to an open stroke when the hand disappears.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandLossPolicy {
    /// Drop the pending shape.
    #[default]
    Discard,
    /// Release at the sentinel pointer (0,0), committing the shape there.
    CommitAtOrigin,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    pub smoothing_window: usize,
    pub hand_loss: HandLossPolicy,
    pub show_cursor: bool,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self { smoothing_window: 2, hand_loss: HandLossPolicy::default(), show_cursor: true }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolDefaults {
    pub tool: Tool,
    pub pen_size: u32,
    pub pen_color: Color,
    pub eraser_size: u32,
    pub shape_type: ShapeType,
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            pen_size: 5,
            pen_color: Color::BLUE,
            eraser_size: 30,
            shape_type: ShapeType::Freehand,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub height: u32,
    pub buttons: Vec<ButtonSpec>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { height: 75, buttons: default_buttons() }
    }
}

fn default_buttons() -> Vec<ButtonSpec> {
    [
        ("Red", ButtonAction::Color(Color::RED)),
        ("Green", ButtonAction::Color(Color::GREEN)),
        ("Blue", ButtonAction::Color(Color::BLUE)),
        ("Yellow", ButtonAction::Color(Color::YELLOW)),
        ("Pen S", ButtonAction::PenSize(2)),
        ("Pen M", ButtonAction::PenSize(5)),
        ("Pen L", ButtonAction::PenSize(10)),
        ("Free", ButtonAction::Shape(ShapeType::Freehand)),
        ("Line", ButtonAction::Shape(ShapeType::Line)),
        ("Circ", ButtonAction::Shape(ShapeType::Circle)),
        ("Rect", ButtonAction::Shape(ShapeType::Rectangle)),
        ("Eraser S", ButtonAction::EraserSize(20)),
        ("Eraser M", ButtonAction::EraserSize(40)),
        ("Eraser L", ButtonAction::EraserSize(60)),
    ]
    .into_iter()
    .map(|(label, action)| ButtonSpec { label: label.to_string(), action })
    .collect()
}

impl Config {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .map_err(|source| Error::ConfigRead { path: path.to_path_buf(), source })?;
        let config: Config = serde_json::from_str(&text)
            .map_err(|source| Error::ConfigParse { path: path.to_path_buf(), source })?;
        config.validate()?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Frame-independent checks. Frame-dependent ones (band vs. frame size)
    /// happen when the dashboard is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive_f32 = [
            ("gestures.pinch_threshold", self.gestures.pinch_threshold),
            ("gestures.thumb_extension_threshold", self.gestures.thumb_extension_threshold),
        ];
        for (name, v) in positive_f32 {
            if !(v > 0.0) {
                return Err(ConfigError::NotPositive(name));
            }
        }
        let positive = [
            ("gestures.reference_width", self.gestures.reference_width as usize),
            ("video.max_width", self.video.max_width as usize),
            ("drawing.smoothing_window", self.drawing.smoothing_window),
            ("tools.pen_size", self.tools.pen_size as usize),
            ("tools.eraser_size", self.tools.eraser_size as usize),
            ("dashboard.height", self.dashboard.height as usize),
        ];
        for (name, v) in positive {
            if v == 0 {
                return Err(ConfigError::NotPositive(name));
            }
        }
        if self.dashboard.buttons.is_empty() {
            return Err(ConfigError::EmptyLayout);
        }
        for b in &self.dashboard.buttons {
            if matches!(b.action, ButtonAction::PenSize(0) | ButtonAction::EraserSize(0)) {
                return Err(ConfigError::ZeroButtonSize { label: b.label.clone() });
            }
        }
        Ok(())
    }
}
