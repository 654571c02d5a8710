use crate::command::PtzAction;
use crate::controller::PtzController;
use crate::error::PtzError;
use crate::transport::{CameraTransport, MoveAck};

/// Plan and dispatch one directional move. A boundary violation aborts
/// before the transport is touched; otherwise exactly one
/// `relative_move` call goes out with the clamped delta.
pub async fn dispatch_move<T: CameraTransport>(
    controller: &mut PtzController,
    transport: &T,
    action: PtzAction,
) -> Result<MoveAck, PtzError> {
    let pending = controller.plan(action)?;
    match transport.relative_move(pending.seq, pending.plan.delta).await {
        Ok(ack) => {
            controller.apply_ack(ack);
            Ok(ack)
        }
        Err(err) => {
            controller.fail(pending.seq);
            Err(err.into())
        }
    }
}

/// Follow-up status poll reconciling the local belief with the device.
pub async fn poll_status<T: CameraTransport>(
    controller: &mut PtzController,
    transport: &T,
) -> Result<bool, PtzError> {
    let status = transport.status().await?;
    Ok(controller.apply_status(status))
}

#[cfg(test)]
mod tests {
    use crate::command::MoveDelta;
    use crate::error::TransportError;
    use crate::position::CameraPosition;
    use crate::presets::Preset;
    use crate::transport::{CameraStatus, CameraTransport, MoveAck};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        moves: Mutex<Vec<(u64, MoveDelta)>>,
        fail_moves: bool,
    }

    #[async_trait]
    impl CameraTransport for RecordingTransport {
        async fn relative_move(
            &self,
            seq: u64,
            delta: MoveDelta,
        ) -> Result<MoveAck, TransportError> {
            self.moves.lock().unwrap().push((seq, delta));
            if self.fail_moves {
                return Err(TransportError::Request("device unreachable".into()));
            }
            Ok(MoveAck {
                seq,
                position: CameraPosition::new(delta.x, delta.y, delta.zoom),
            })
        }

        async fn absolute_move(
            &self,
            seq: u64,
            position: CameraPosition,
        ) -> Result<MoveAck, TransportError> {
            Ok(MoveAck { seq, position })
        }

        async fn status(&self) -> Result<CameraStatus, TransportError> {
            Ok(CameraStatus {
                seq: 0,
                position: CameraPosition::default(),
            })
        }

        async fn presets(&self) -> Result<Vec<Preset>, TransportError> {
            Ok(Vec::new())
        }

        async fn store_preset(&self, preset: &Preset) -> Result<Preset, TransportError> {
            Ok(preset.clone())
        }
    }

    mod success {
        use super::RecordingTransport;
        use crate::command::PtzAction;
        use crate::controller::PtzController;
        use crate::dispatch::dispatch_move;
        use crate::position::CameraPosition;

        #[tokio::test]
        async fn in_range_move_hits_transport_exactly_once() {
            let transport = RecordingTransport::default();
            let mut controller = PtzController::new(CameraPosition::default(), None);
            dispatch_move(&mut controller, &transport, PtzAction::Right)
                .await
                .unwrap();
            let moves = transport.moves.lock().unwrap();
            assert_eq!(moves.len(), 1);
            let (seq, delta) = moves[0];
            assert_eq!(seq, 1);
            assert!((delta.x - 0.1).abs() < f32::EPSILON);
            assert_eq!(delta.y, 0.0);
        }

        #[tokio::test]
        async fn clamped_delta_is_what_goes_on_the_wire() {
            let transport = RecordingTransport::default();
            let mut controller =
                PtzController::new(CameraPosition::new(0.95, 0.0, 0.0), None);
            dispatch_move(&mut controller, &transport, PtzAction::Right)
                .await
                .unwrap();
            let moves = transport.moves.lock().unwrap();
            assert!((moves[0].1.x - 0.05).abs() < 1e-6);
        }
    }

    mod failure {
        use super::RecordingTransport;
        use crate::command::PtzAction;
        use crate::controller::{ControllerState, PtzController};
        use crate::dispatch::dispatch_move;
        use crate::error::PtzError;
        use crate::position::{Boundary, BoundaryPreset, CameraPosition};

        #[tokio::test]
        async fn boundary_violation_never_reaches_transport() {
            let transport = RecordingTransport::default();
            let boundary = BoundaryPreset::new(1, Boundary::new(0.0, 0.05, 0.0, 1.0));
            let mut controller =
                PtzController::new(CameraPosition::default(), Some(boundary));
            let err = dispatch_move(&mut controller, &transport, PtzAction::Right)
                .await
                .unwrap_err();
            assert!(matches!(err, PtzError::Boundary { .. }));
            assert!(transport.moves.lock().unwrap().is_empty());
            assert_eq!(controller.position(), CameraPosition::default());
        }

        #[tokio::test]
        async fn transport_failure_parks_controller_in_error() {
            let transport = RecordingTransport {
                fail_moves: true,
                ..Default::default()
            };
            let mut controller = PtzController::new(CameraPosition::default(), None);
            let err = dispatch_move(&mut controller, &transport, PtzAction::Left)
                .await
                .unwrap_err();
            assert!(matches!(err, PtzError::Transport(_)));
            assert_eq!(controller.state(), ControllerState::Error);
        }
    }
}
