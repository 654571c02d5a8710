use std::time::Duration;

/// Delay before the single automatic retry of the mount attempt.
pub const MOUNT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Video transport flavor: MSE over WebSocket everywhere except
/// iOS-style clients, which get HLS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamKind {
    Mse,
    Hls,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamState {
    Offline,
    Loading { retried: bool },
    Playing,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamEvent {
    Mount,
    Ready,
    Failed,
    Reset,
    Stop,
}

/// What the glue layer should do after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamAction {
    Connect,
    ConnectAfterDelay(Duration),
    Disconnect,
}

/// Lifecycle of one live-feed tile. Mount gets exactly one automatic
/// retry after a fixed delay; every later failure lands in `Offline`
/// until staff press reset.
#[derive(Debug)]
pub struct StreamSession {
    kind: StreamKind,
    state: StreamState,
}

impl StreamSession {
    pub fn new(kind: StreamKind) -> Self {
        Self {
            kind,
            state: StreamState::Offline,
        }
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn apply(&mut self, event: StreamEvent) -> Option<StreamAction> {
        let (state, action) = match (self.state, event) {
            (StreamState::Offline, StreamEvent::Mount)
            | (StreamState::Offline, StreamEvent::Reset)
            | (StreamState::Stopped, StreamEvent::Reset)
            | (StreamState::Playing, StreamEvent::Reset) => (
                StreamState::Loading { retried: false },
                Some(StreamAction::Connect),
            ),
            (StreamState::Loading { retried: false }, StreamEvent::Failed) => (
                StreamState::Loading { retried: true },
                Some(StreamAction::ConnectAfterDelay(MOUNT_RETRY_DELAY)),
            ),
            (StreamState::Loading { retried: true }, StreamEvent::Failed) => {
                (StreamState::Offline, None)
            }
            (StreamState::Loading { .. }, StreamEvent::Ready) => (StreamState::Playing, None),
            (StreamState::Loading { retried }, StreamEvent::Reset) => (
                StreamState::Loading { retried },
                Some(StreamAction::Connect),
            ),
            (StreamState::Playing, StreamEvent::Failed) => (StreamState::Offline, None),
            (_, StreamEvent::Stop) => (StreamState::Stopped, Some(StreamAction::Disconnect)),
            (state, event) => {
                log::debug!("ignoring stream event {event:?} in state {state:?}");
                (state, None)
            }
        };
        self.state = state;
        action
    }
}

#[cfg(test)]
mod tests {
    mod success {
        use crate::stream::{
            StreamAction, StreamEvent, StreamKind, StreamSession, StreamState, MOUNT_RETRY_DELAY,
        };

        #[test]
        fn mount_connects_and_plays() {
            let mut session = StreamSession::new(StreamKind::Mse);
            assert_eq!(session.kind(), StreamKind::Mse);
            assert_eq!(session.apply(StreamEvent::Mount), Some(StreamAction::Connect));
            assert_eq!(session.state(), StreamState::Loading { retried: false });
            assert_eq!(session.apply(StreamEvent::Ready), None);
            assert_eq!(session.state(), StreamState::Playing);
        }

        #[test]
        fn mount_failure_retries_once_then_goes_offline() {
            let mut session = StreamSession::new(StreamKind::Hls);
            session.apply(StreamEvent::Mount);
            assert_eq!(
                session.apply(StreamEvent::Failed),
                Some(StreamAction::ConnectAfterDelay(MOUNT_RETRY_DELAY))
            );
            assert_eq!(session.state(), StreamState::Loading { retried: true });
            assert_eq!(session.apply(StreamEvent::Failed), None);
            assert_eq!(session.state(), StreamState::Offline);
        }

        #[test]
        fn reset_restarts_from_stopped() {
            let mut session = StreamSession::new(StreamKind::Mse);
            session.apply(StreamEvent::Mount);
            session.apply(StreamEvent::Ready);
            assert_eq!(
                session.apply(StreamEvent::Stop),
                Some(StreamAction::Disconnect)
            );
            assert_eq!(session.state(), StreamState::Stopped);
            assert_eq!(session.apply(StreamEvent::Reset), Some(StreamAction::Connect));
            assert_eq!(session.state(), StreamState::Loading { retried: false });
        }

        #[test]
        fn playing_failure_goes_offline_without_reconnect() {
            let mut session = StreamSession::new(StreamKind::Mse);
            session.apply(StreamEvent::Mount);
            session.apply(StreamEvent::Ready);
            assert_eq!(session.apply(StreamEvent::Failed), None);
            assert_eq!(session.state(), StreamState::Offline);
        }

        #[test]
        fn ready_in_idle_states_is_ignored() {
            let mut session = StreamSession::new(StreamKind::Mse);
            assert_eq!(session.apply(StreamEvent::Ready), None);
            assert_eq!(session.state(), StreamState::Offline);
        }
    }
}
