/// Interaction Module - Data-Oriented Programming (DOP) style
///
/// - interaction_data.rs: pointer events and drag state
/// - interaction_operations.rs: the Idle / Orbiting / Panning state machine

pub mod interaction_data;
pub mod interaction_operations;

pub use interaction_data::{
    DragSnapshot, InteractionMode, InteractionState, PointerButton, PointerEvent, Viewport,
};

pub use interaction_operations::{
    create_interaction_state, handle_pointer_event, handle_pointer_move, handle_pointer_press,
    handle_pointer_release, handle_wheel, pan_scale,
};
