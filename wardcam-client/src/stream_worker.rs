use crate::config::Target;
use crate::http_client;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use wardcam_core::stream::{StreamAction, StreamEvent, StreamSession, StreamState};

#[derive(Clone, Copy, Debug)]
pub enum StreamCommand {
    Reset,
    Stop,
}

/// Live-feed lifecycle glue. The thread owns the state machine and
/// probes the middleware's stream endpoint; playback itself happens in
/// the middleware, we only track whether the feed is serviceable.
pub struct Monitor {
    tx: Sender<StreamCommand>,
    state_rx: Receiver<StreamState>,
    err_rx: Receiver<String>,
}

impl Monitor {
    pub fn new(target: Target) -> Self {
        let (tx, rx) = mpsc::channel();
        let (state_tx, state_rx) = mpsc::channel();
        let (err_tx, err_rx) = mpsc::channel();
        thread::spawn(move || run_monitor(target, rx, state_tx, err_tx));
        Self {
            tx,
            state_rx,
            err_rx,
        }
    }

    pub fn send(&self, command: StreamCommand) {
        let _ = self.tx.send(command);
    }

    pub fn try_recv_state(&self) -> Option<StreamState> {
        self.state_rx.try_recv().ok()
    }

    pub fn try_recv_error(&self) -> Option<String> {
        self.err_rx.try_recv().ok()
    }
}

fn run_monitor(
    target: Target,
    rx: Receiver<StreamCommand>,
    state_tx: Sender<StreamState>,
    err_tx: Sender<String>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = err_tx.send(format!("tokio runtime init failed: {err}"));
            return;
        }
    };
    let client = match http_client::build(&target) {
        Ok(client) => client,
        Err(err) => {
            let _ = err_tx.send(err.to_string());
            return;
        }
    };
    let mut session = StreamSession::new(target.stream_kind());
    log::info!("stream url ({:?}): {}", session.kind(), target.stream_url());

    let mut action = session.apply(StreamEvent::Mount);
    drive(&runtime, &client, &target, &mut session, action, &err_tx);
    let _ = state_tx.send(session.state());

    for command in rx {
        action = match command {
            StreamCommand::Reset => session.apply(StreamEvent::Reset),
            StreamCommand::Stop => session.apply(StreamEvent::Stop),
        };
        drive(&runtime, &client, &target, &mut session, action, &err_tx);
        let _ = state_tx.send(session.state());
    }
}

/// Run connect attempts until the machine settles.
fn drive(
    runtime: &tokio::runtime::Runtime,
    client: &reqwest::Client,
    target: &Target,
    session: &mut StreamSession,
    mut action: Option<StreamAction>,
    err_tx: &Sender<String>,
) {
    while let Some(next) = action {
        match next {
            StreamAction::Connect => {}
            StreamAction::ConnectAfterDelay(delay) => thread::sleep(delay),
            StreamAction::Disconnect => break,
        }
        let event = match probe(runtime, client, target) {
            Ok(()) => StreamEvent::Ready,
            Err(err) => {
                let _ = err_tx.send(format!("stream probe failed: {err}"));
                StreamEvent::Failed
            }
        };
        action = session.apply(event);
    }
}

fn probe(
    runtime: &tokio::runtime::Runtime,
    client: &reqwest::Client,
    target: &Target,
) -> Result<(), String> {
    let url = target.stream_probe_url();
    let response = runtime
        .block_on(client.get(&url).send())
        .map_err(|err| err.to_string())?;
    let status = response.status();
    if status.as_u16() >= 400 {
        return Err(format!("HTTP {status} from {url}"));
    }
    Ok(())
}
