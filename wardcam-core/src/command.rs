use crate::error::{Axis, PtzError};
use crate::position::{Boundary, CameraPosition, FULL_RANGE};
use crate::precision::Precision;
use serde::{Deserialize, Serialize};

/// Directional actions a staff member can request from the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PtzAction {
    Up,
    Down,
    Left,
    Right,
    ZoomIn,
    ZoomOut,
}

/// Relative displacement actually dispatched to the middleware.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveDelta {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

/// Outcome of planning a move: the clamped delta plus the position the
/// camera will be at once the middleware applies it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovePlan {
    pub delta: MoveDelta,
    pub target: CameraPosition,
}

/// Turn a directional action into a clamped relative displacement.
///
/// The raw step is `BASE_STEP / precision` on the action's axis. The
/// prospective coordinate is clamped to the device's `[0,1]` space; if
/// a boundary is active and the prospective pan/tilt coordinate falls
/// outside it, the command is rejected before any network traffic.
/// Zoom is not boundary-restricted.
pub fn plan_move(
    action: PtzAction,
    position: CameraPosition,
    precision: Precision,
    boundary: Option<&Boundary>,
) -> Result<MovePlan, PtzError> {
    let step = precision.step();
    let (dx, dy, dzoom) = match action {
        PtzAction::Up => (0.0, step, 0.0),
        PtzAction::Down => (0.0, -step, 0.0),
        PtzAction::Left => (-step, 0.0, 0.0),
        PtzAction::Right => (step, 0.0, 0.0),
        PtzAction::ZoomIn => (0.0, 0.0, step),
        PtzAction::ZoomOut => (0.0, 0.0, -step),
    };
    let prospective = CameraPosition {
        x: position.x + dx,
        y: position.y + dy,
        zoom: position.zoom + dzoom,
    };
    if let Some(boundary) = boundary {
        check_axis(Axis::Pan, prospective.x, boundary.x.min, boundary.x.max)?;
        check_axis(Axis::Tilt, prospective.y, boundary.y.min, boundary.y.max)?;
    }
    let target = CameraPosition {
        x: FULL_RANGE.clamp(prospective.x),
        y: FULL_RANGE.clamp(prospective.y),
        zoom: FULL_RANGE.clamp(prospective.zoom),
    };
    let delta = MoveDelta {
        x: target.x - position.x,
        y: target.y - position.y,
        zoom: target.zoom - position.zoom,
    };
    Ok(MovePlan { delta, target })
}

fn check_axis(axis: Axis, value: f32, min: f32, max: f32) -> Result<(), PtzError> {
    if value < min || value > max {
        return Err(PtzError::Boundary {
            axis,
            value,
            min,
            max,
        });
    }
    Ok(())
}
