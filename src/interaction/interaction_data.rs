//! Interaction data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in interaction_operations.rs

use crate::constants::interaction::DOLLY_FRACTION;
use cgmath::{Matrix4, Point3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Raw pointer input in viewport pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { button: PointerButton, x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Release { button: PointerButton },
    /// Positive delta scrolls away from the user (zoom in)
    Wheel { delta: f32 },
}

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Orbiting,
    Panning,
}

/// Camera state captured when a drag starts. Every move is derived from
/// this snapshot, not from the previous move.
#[derive(Debug, Clone, Copy)]
pub struct DragSnapshot {
    pub press_x: f32,
    pub press_y: f32,
    pub phi: f32,
    pub theta: f32,
    pub center: Point3<f32>,

    /// Camera rotation at press time (camera axes as world-space columns)
    pub rotation: Matrix4<f32>,
}

#[derive(Debug, Clone)]
pub struct InteractionState {
    pub mode: InteractionMode,
    pub snapshot: Option<DragSnapshot>,

    /// Fraction of the bounding diagonal moved per wheel notch
    pub dolly_fraction: f32,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            snapshot: None,
            dolly_fraction: DOLLY_FRACTION,
        }
    }
}
