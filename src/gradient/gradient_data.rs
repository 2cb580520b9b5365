//! Gradient data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in gradient_operations.rs

/// One turning point of a linear color gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Fractional position in [0, 1]
    pub position: f32,

    pub r: u8,
    pub g: u8,
    pub b: u8,

    /// Alpha, already normalized to [0, 1]
    pub a: f32,
}

/// Ordered color stops. Positions are expected to be non-decreasing;
/// nothing here sorts them.
pub type ColorGradient = Vec<ColorStop>;
