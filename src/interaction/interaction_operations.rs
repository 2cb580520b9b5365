//! Interaction operations
//!
//! Translates pointer and wheel input into orbit camera updates. The button
//! that starts a drag decides the mode until release: left orbits, right
//! pans. Each function reports whether the camera or projection changed so
//! the caller can invalidate the view-projection matrix.

use super::interaction_data::{
    DragSnapshot, InteractionMode, InteractionState, PointerButton, PointerEvent, Viewport,
};
use crate::camera::{self, OrbitCameraData};
use crate::mesh::BoundingStats;
use crate::projection::{self, ProjectionState, ProjectionType};
use cgmath::{Point3, Transform, Vector3};
use std::f32::consts::PI;

pub fn create_interaction_state(dolly_fraction: f32) -> InteractionState {
    InteractionState {
        dolly_fraction,
        ..Default::default()
    }
}

/// World distance covered by dragging across the whole viewport while panning
pub fn pan_scale(stats: &BoundingStats) -> f32 {
    stats.bbox_diagonal / 2.0
}

/// Dispatch one pointer event. Events are dropped while no mesh is bound
/// (`stats` is `None`).
pub fn handle_pointer_event(
    state: &mut InteractionState,
    camera: &mut OrbitCameraData,
    projection: &mut ProjectionState,
    stats: Option<&BoundingStats>,
    viewport: Viewport,
    event: PointerEvent,
) -> bool {
    let Some(stats) = stats else {
        return false;
    };

    match event {
        PointerEvent::Press { button, x, y } => handle_pointer_press(state, camera, button, x, y),
        PointerEvent::Move { x, y } => handle_pointer_move(state, camera, stats, viewport, x, y),
        PointerEvent::Release { button } => handle_pointer_release(state, button),
        PointerEvent::Wheel { delta } => handle_wheel(state, camera, projection, stats, delta),
    }
}

/// Start a drag and snapshot the camera
pub fn handle_pointer_press(
    state: &mut InteractionState,
    camera: &OrbitCameraData,
    button: PointerButton,
    x: f32,
    y: f32,
) -> bool {
    if state.mode != InteractionMode::Idle {
        return false;
    }

    let mode = match button {
        PointerButton::Left => InteractionMode::Orbiting,
        PointerButton::Right => InteractionMode::Panning,
        PointerButton::Middle => return false,
    };

    state.mode = mode;
    state.snapshot = Some(DragSnapshot {
        press_x: x,
        press_y: y,
        phi: camera.phi,
        theta: camera.theta,
        center: camera.center,
        rotation: camera::build_rotation_matrix(camera),
    });

    log::trace!("[handle_pointer_press] {:?} at ({}, {})", mode, x, y);
    false
}

/// Re-derive the camera from the press snapshot and the total drag offset
pub fn handle_pointer_move(
    state: &mut InteractionState,
    camera: &mut OrbitCameraData,
    stats: &BoundingStats,
    viewport: Viewport,
    x: f32,
    y: f32,
) -> bool {
    let Some(snapshot) = state.snapshot else {
        return false;
    };
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return false;
    }

    let dx = (x - snapshot.press_x) / viewport.width;
    let dy = (y - snapshot.press_y) / viewport.height;

    match state.mode {
        InteractionMode::Idle => false,
        InteractionMode::Orbiting => {
            let orbited = camera::set_phi(camera, snapshot.phi - dx * PI);
            *camera = camera::set_theta(&orbited, snapshot.theta - dy * PI);
            true
        }
        InteractionMode::Panning => {
            let scale = pan_scale(stats);
            let plane_delta = Vector3::new(-dx * scale, dy * scale, 0.0);
            // Camera plane to world: inverse of the view rotation
            let world_delta = snapshot.rotation.transform_vector(plane_delta);
            *camera = camera::set_center(
                camera,
                Point3::new(
                    snapshot.center.x + world_delta.x,
                    snapshot.center.y + world_delta.y,
                    snapshot.center.z + world_delta.z,
                ),
            );
            true
        }
    }
}

pub fn handle_pointer_release(state: &mut InteractionState, button: PointerButton) -> bool {
    if state.mode != InteractionMode::Idle {
        log::trace!("[handle_pointer_release] {:?} released, back to idle", button);
    }
    state.mode = InteractionMode::Idle;
    state.snapshot = None;
    false
}

/// Perspective: dolly along the view direction. Orthographic: zoom.
pub fn handle_wheel(
    state: &mut InteractionState,
    camera: &mut OrbitCameraData,
    projection: &mut ProjectionState,
    stats: &BoundingStats,
    delta: f32,
) -> bool {
    if delta == 0.0 || delta.is_nan() {
        return false;
    }
    let direction = delta.signum();

    match projection.projection_type {
        ProjectionType::Perspective => {
            let step = stats.bbox_diagonal * state.dolly_fraction;
            *camera = camera::move_orbit(camera, 0.0, 0.0, -direction * step);
        }
        ProjectionType::Orthographic => {
            projection::adjust_ortho_zoom(projection, -direction);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::create_orbit_camera;
    use crate::constants::camera::{DEFAULT_POLAR_SAFE_ZONE, RESET_PHI};
    use crate::projection::set_projection_type;

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn stats() -> BoundingStats {
        crate::mesh::compute_bounding_stats(0.0, 30.0, 40, 40, 1.0)
    }

    fn camera() -> OrbitCameraData {
        create_orbit_camera(
            Point3::new(0.0, 0.0, 0.0),
            RESET_PHI,
            1.0,
            100.0,
            DEFAULT_POLAR_SAFE_ZONE,
        )
    }

    fn dispatch(
        state: &mut InteractionState,
        camera: &mut OrbitCameraData,
        projection: &mut ProjectionState,
        event: PointerEvent,
    ) -> bool {
        let s = stats();
        handle_pointer_event(state, camera, projection, Some(&s), VIEWPORT, event)
    }

    #[test]
    fn test_events_ignored_without_mesh() {
        let mut state = InteractionState::default();
        let mut cam = camera();
        let mut projection = ProjectionState::default();
        let before = cam;

        let press = PointerEvent::Press {
            button: PointerButton::Left,
            x: 0.0,
            y: 0.0,
        };
        handle_pointer_event(&mut state, &mut cam, &mut projection, None, VIEWPORT, press);
        let wheel = PointerEvent::Wheel { delta: 1.0 };
        assert!(!handle_pointer_event(&mut state, &mut cam, &mut projection, None, VIEWPORT, wheel));

        assert_eq!(state.mode, InteractionMode::Idle);
        assert_eq!(cam, before);
    }

    #[test]
    fn test_orbit_drag_is_absolute() {
        let mut state = InteractionState::default();
        let mut cam = camera();
        let mut projection = ProjectionState::default();
        let start = cam;

        dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Press {
            button: PointerButton::Left,
            x: 100.0,
            y: 100.0,
        });
        assert_eq!(state.mode, InteractionMode::Orbiting);

        let drag = PointerEvent::Move { x: 500.0, y: 160.0 };
        assert!(dispatch(&mut state, &mut cam, &mut projection, drag));
        let expected_phi = start.phi - 0.5 * PI;
        let expected_theta = start.theta - 0.1 * PI;
        assert!((cam.phi - expected_phi).abs() < 1e-5);
        assert!((cam.theta - expected_theta).abs() < 1e-5);

        // Same pointer position again gives the same camera, not a double step
        dispatch(&mut state, &mut cam, &mut projection, drag);
        assert!((cam.phi - expected_phi).abs() < 1e-5);
        assert_eq!(cam.radius, start.radius);
        assert_eq!(cam.center, start.center);
    }

    #[test]
    fn test_orbit_theta_stays_clamped() {
        let mut state = InteractionState::default();
        let mut cam = camera();
        let mut projection = ProjectionState::default();

        dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Press {
            button: PointerButton::Left,
            x: 0.0,
            y: 0.0,
        });
        dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Move { x: 0.0, y: 6000.0 });
        assert_eq!(cam.theta, DEFAULT_POLAR_SAFE_ZONE);
    }

    #[test]
    fn test_pan_moves_center_in_view_plane() {
        let mut state = InteractionState::default();
        let mut cam = camera();
        let mut projection = ProjectionState::default();
        let start = cam;

        dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Press {
            button: PointerButton::Right,
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(state.mode, InteractionMode::Panning);

        // Full-width drag to the right. Looking north, camera right is +X.
        dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Move { x: 800.0, y: 0.0 });
        let scale = pan_scale(&stats());
        assert!((cam.center.x - (start.center.x - scale)).abs() < 1e-3);
        assert!((cam.center.y - start.center.y).abs() < 1e-3);
        assert!((cam.center.z - start.center.z).abs() < 1e-3);
        assert_eq!(cam.phi, start.phi);
        assert_eq!(cam.radius, start.radius);
    }

    #[test]
    fn test_vertical_pan_stays_in_view_plane() {
        let mut state = InteractionState::default();
        let theta = std::f32::consts::FRAC_PI_4;
        let mut cam = create_orbit_camera(
            Point3::new(0.0, 0.0, 0.0),
            RESET_PHI,
            theta,
            100.0,
            DEFAULT_POLAR_SAFE_ZONE,
        );
        let mut projection = ProjectionState::default();
        let start = cam;

        dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Press {
            button: PointerButton::Right,
            x: 0.0,
            y: 0.0,
        });
        // Full-height drag downward
        dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Move { x: 0.0, y: 600.0 });

        let delta = cam.center - start.center;
        let back = camera::build_rotation_matrix(&start).z.truncate();
        assert!(cgmath::dot(delta, back).abs() < 1e-3);

        let scale = pan_scale(&stats());
        assert!(delta.x.abs() < 1e-3);
        assert!((delta.y - scale * theta.cos()).abs() < 1e-3);
        assert!((delta.z - scale * theta.sin()).abs() < 1e-3);
        assert_eq!(cam.radius, start.radius);
    }

    #[test]
    fn test_release_returns_to_idle() {
        let mut state = InteractionState::default();
        let mut cam = camera();
        let mut projection = ProjectionState::default();

        dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Press {
            button: PointerButton::Right,
            x: 0.0,
            y: 0.0,
        });
        dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Release {
            button: PointerButton::Right,
        });
        assert_eq!(state.mode, InteractionMode::Idle);
        assert!(state.snapshot.is_none());

        let before = cam;
        assert!(!dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Move { x: 50.0, y: 50.0 }));
        assert_eq!(cam, before);
    }

    #[test]
    fn test_middle_button_ignored() {
        let mut state = InteractionState::default();
        let mut cam = camera();
        let mut projection = ProjectionState::default();
        dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Press {
            button: PointerButton::Middle,
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(state.mode, InteractionMode::Idle);
    }

    #[test]
    fn test_wheel_dollies_in_perspective() {
        let mut state = InteractionState::default();
        let mut cam = camera();
        let mut projection = ProjectionState::default();

        assert!(dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Wheel { delta: 120.0 }));
        let step = stats().bbox_diagonal * 0.05;
        assert!((cam.radius - (100.0 - step)).abs() < 1e-3);

        dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Wheel { delta: -3.0 });
        assert!((cam.radius - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_wheel_zooms_in_orthographic() {
        let mut state = InteractionState::default();
        let mut cam = camera();
        let mut projection = ProjectionState::default();
        set_projection_type(&mut projection, ProjectionType::Orthographic);
        let before = cam;

        dispatch(&mut state, &mut cam, &mut projection, PointerEvent::Wheel { delta: 1.0 });
        assert!((projection.ortho_zoom - 0.95).abs() < 1e-6);
        assert!(projection.dirty);
        assert_eq!(cam, before);
    }
}
