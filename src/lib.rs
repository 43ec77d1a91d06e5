//! Gesture-driven whiteboard over a live camera feed.
//!
//! A hand-landmark stream drives drawing: pinch to draw, open the hand flat
//! to erase, pinch inside the top band to pick tools. [`app::Whiteboard`] runs
//! one frame through the classifier, dashboard, drawing engine and compositor.

pub mod app;
pub mod camera;
pub mod compositor;
pub mod config;
pub mod dashboard;
pub mod draw;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod hand;
pub mod landmarks;
pub mod state;
pub mod types;
