use crate::config::Target;
use crate::http_client;
use crate::middleware::MiddlewareTransport;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use wardcam_core::command::PtzAction;
use wardcam_core::controller::{ControllerState, PtzController};
use wardcam_core::dispatch;
use wardcam_core::error::PtzError;
use wardcam_core::position::CameraPosition;
use wardcam_core::presets::PresetManager;
use wardcam_core::transport::CameraTransport;

#[derive(Clone, Copy, Debug)]
pub enum Command {
    Move(PtzAction),
    CyclePrecision,
    RefreshPresets,
    GotoPreset(usize),
    UpdateCurrentPreset,
    Poll,
}

/// Snapshot of the worker's belief, pushed to the panel after every
/// command.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub state: ControllerState,
    pub position: CameraPosition,
    pub precision: u8,
    pub current_preset: Option<String>,
    pub preset_names: Vec<String>,
}

/// Front-end handle. The worker thread owns the tokio runtime, the
/// transport, and the controller; this side only queues commands and
/// drains notifications.
pub struct Controller {
    tx: Sender<Command>,
    err_rx: Receiver<String>,
    snap_rx: Receiver<Snapshot>,
}

impl Controller {
    pub fn new(target: Target) -> Self {
        let (tx, rx) = mpsc::channel();
        let (err_tx, err_rx) = mpsc::channel();
        let (snap_tx, snap_rx) = mpsc::channel();
        thread::spawn(move || run_worker(target, rx, err_tx, snap_tx));
        Self {
            tx,
            err_rx,
            snap_rx,
        }
    }

    pub fn send(&self, command: Command) {
        let _ = self.tx.send(command);
    }

    pub fn try_recv_error(&self) -> Option<String> {
        self.err_rx.try_recv().ok()
    }

    pub fn try_recv_snapshot(&self) -> Option<Snapshot> {
        self.snap_rx.try_recv().ok()
    }
}

fn run_worker(
    target: Target,
    rx: Receiver<Command>,
    err_tx: Sender<String>,
    snap_tx: Sender<Snapshot>,
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
    let boundary = target.boundary();
    if let Some(boundary) = &boundary {
        log::info!("movement restricted by boundary preset {}", boundary.id);
    }
    let transport = MiddlewareTransport::new(client, target);

    // The device is the source of truth; seed our belief from it.
    let mut controller = match runtime.block_on(transport.status()) {
        Ok(status) => {
            log::info!("camera online at {:?}", status.position);
            PtzController::new(status.position, boundary)
        }
        Err(err) => {
            let _ = err_tx.send(format!("camera unreachable: {err}"));
            PtzController::offline()
        }
    };
    let mut presets = PresetManager::new();
    if let Err(err) = runtime.block_on(presets.refresh(&transport)) {
        let _ = err_tx.send(format!("preset list failed: {err}"));
    }
    let _ = snap_tx.send(snapshot(&controller, &presets));

    for command in rx {
        let result = handle(&runtime, &transport, &mut controller, &mut presets, command);
        if let Err(err) = result {
            let _ = err_tx.send(err.to_string());
        }
        let _ = snap_tx.send(snapshot(&controller, &presets));
    }
}

fn handle(
    runtime: &tokio::runtime::Runtime,
    transport: &MiddlewareTransport,
    controller: &mut PtzController,
    presets: &mut PresetManager,
    command: Command,
) -> Result<(), PtzError> {
    match command {
        Command::Move(action) => {
            runtime.block_on(dispatch::dispatch_move(controller, transport, action))?;
            // follow-up poll; stale reports are discarded by token
            runtime.block_on(dispatch::poll_status(controller, transport))?;
            Ok(())
        }
        Command::CyclePrecision => {
            let precision = controller.cycle_precision();
            log::info!("precision factor now {}", precision.factor());
            Ok(())
        }
        Command::RefreshPresets => {
            runtime.block_on(presets.refresh(transport))?;
            log::info!("{} presets for this bed", presets.presets().len());
            Ok(())
        }
        Command::GotoPreset(index) => {
            let id = presets
                .by_index(index)
                .map(|preset| preset.id)
                .ok_or(PtzError::Validation {
                    what: "preset slot",
                    detail: format!("no preset at slot {}", index + 1),
                })?;
            runtime.block_on(presets.goto(transport, id, controller))
        }
        Command::UpdateCurrentPreset => {
            let id = presets
                .current()
                .map(|preset| preset.id)
                .ok_or(PtzError::Validation {
                    what: "preset",
                    detail: "no preset recalled yet".to_string(),
                })?;
            let stored = runtime.block_on(presets.update(transport, id))?;
            log::info!(
                "preset '{}' updated to {:?} (version {})",
                stored.meta.preset_name,
                stored.meta.position,
                stored.version
            );
            Ok(())
        }
        Command::Poll => {
            runtime.block_on(dispatch::poll_status(controller, transport))?;
            Ok(())
        }
    }
}

fn snapshot(controller: &PtzController, presets: &PresetManager) -> Snapshot {
    Snapshot {
        state: controller.state(),
        position: controller.position(),
        precision: controller.precision().factor(),
        current_preset: presets
            .current()
            .map(|preset| preset.meta.preset_name.clone()),
        preset_names: presets
            .presets()
            .iter()
            .map(|preset| preset.meta.preset_name.clone())
            .collect(),
    }
}
