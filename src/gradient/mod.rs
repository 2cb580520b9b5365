/// Gradient Module - Data-Oriented Programming (DOP) style
///
/// - gradient_data.rs: color stops, no behavior
/// - gradient_operations.rs: interpolation and gradient construction

pub mod gradient_data;
pub mod gradient_operations;

pub use gradient_data::{ColorGradient, ColorStop};

pub use gradient_operations::{
    create_color_stop, default_terrain_gradient, interpolate, randomized_gradient, stop_color,
};
