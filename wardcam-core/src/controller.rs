use crate::command::{self, MovePlan, PtzAction};
use crate::error::PtzError;
use crate::position::{BoundaryPreset, CameraPosition, FULL_RANGE};
use crate::precision::Precision;
use crate::transport::{CameraStatus, MoveAck};

/// Lifecycle of the PTZ session as seen by the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Moving,
    Offline,
    Error,
}

/// A planned move waiting for middleware acknowledgment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingMove {
    pub seq: u64,
    pub plan: MovePlan,
}

/// Single owner of the camera position belief. Commands are planned
/// here, dispatched by the worker, and reconciled against the
/// middleware's sequence-tagged acknowledgments so late responses from
/// overlapping commands cannot roll the position backwards.
#[derive(Debug)]
pub struct PtzController {
    position: CameraPosition,
    boundary: Option<BoundaryPreset>,
    precision: Precision,
    state: ControllerState,
    next_seq: u64,
    applied_seq: u64,
}

impl PtzController {
    pub fn new(initial: CameraPosition, boundary: Option<BoundaryPreset>) -> Self {
        Self {
            position: initial,
            boundary,
            precision: Precision::default(),
            state: ControllerState::Idle,
            next_seq: 1,
            applied_seq: 0,
        }
    }

    /// A session that never reached the middleware.
    pub fn offline() -> Self {
        let mut controller = Self::new(CameraPosition::default(), None);
        controller.state = ControllerState::Offline;
        controller
    }

    pub fn position(&self) -> CameraPosition {
        self.position
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn boundary(&self) -> Option<&BoundaryPreset> {
        self.boundary.as_ref()
    }

    pub fn cycle_precision(&mut self) -> Precision {
        self.precision = self.precision.cycle();
        self.precision
    }

    /// Plan a directional move. On success the position is updated
    /// optimistically and the returned token must be carried on the
    /// wire; a boundary violation leaves all state untouched.
    pub fn plan(&mut self, action: PtzAction) -> Result<PendingMove, PtzError> {
        let boundary = self.boundary.as_ref().map(|preset| &preset.range);
        let plan = command::plan_move(action, self.position, self.precision, boundary)?;
        Ok(self.accept(plan))
    }

    /// Plan an absolute move to a stored preset position. Presets are
    /// staff-curated per bed and bypass the boundary check.
    pub fn plan_absolute(&mut self, target: CameraPosition) -> PendingMove {
        let target = CameraPosition {
            x: FULL_RANGE.clamp(target.x),
            y: FULL_RANGE.clamp(target.y),
            zoom: FULL_RANGE.clamp(target.zoom),
        };
        let delta = crate::command::MoveDelta {
            x: target.x - self.position.x,
            y: target.y - self.position.y,
            zoom: target.zoom - self.position.zoom,
        };
        self.accept(MovePlan { delta, target })
    }

    fn accept(&mut self, plan: MovePlan) -> PendingMove {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.position = plan.target;
        self.state = ControllerState::Moving;
        PendingMove { seq, plan }
    }

    /// Reconcile a move acknowledgment. Returns false when the ack is
    /// stale (an overlapping newer command already landed) and was
    /// discarded.
    pub fn apply_ack(&mut self, ack: MoveAck) -> bool {
        if ack.seq < self.applied_seq {
            log::debug!(
                "discarding stale ack seq={} (applied seq={})",
                ack.seq,
                self.applied_seq
            );
            return false;
        }
        self.applied_seq = ack.seq;
        self.position = ack.position;
        self.state = ControllerState::Idle;
        true
    }

    /// Reconcile a polled status report, same staleness rule as acks.
    pub fn apply_status(&mut self, status: CameraStatus) -> bool {
        self.apply_ack(MoveAck {
            seq: status.seq,
            position: status.position,
        })
    }

    /// A dispatched command failed in transit. The optimistic position
    /// is kept; the next successful status poll overwrites it.
    pub fn fail(&mut self, seq: u64) {
        if seq >= self.applied_seq {
            self.state = ControllerState::Error;
        }
    }

    pub fn mark_offline(&mut self) {
        self.state = ControllerState::Offline;
    }
}
