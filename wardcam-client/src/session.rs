use crate::config::Target;
use crate::input::{self, SessionCommand};
use crate::stream_worker::Monitor;
use crate::worker::Controller;
use anyhow::Result;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

const DRAIN_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(target: Target) -> Result<()> {
    let controller = Controller::new(target.clone());
    let stream = Monitor::new(target);
    let (tx, rx) = mpsc::channel();
    input::spawn_input_loop(tx);
    println!("PTZ control: arrows to move, [/] zoom, p precision, 1-9 recall preset");
    println!("             u update preset, l list presets, r reset feed, s stop feed");
    println!("             q/esc/ctrl+c to quit");

    loop {
        match rx.recv_timeout(DRAIN_INTERVAL) {
            Ok(SessionCommand::Ptz(command)) => controller.send(command),
            Ok(SessionCommand::Stream(command)) => stream.send(command),
            Ok(SessionCommand::Quit) => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        while let Some(err) = controller.try_recv_error() {
            log::warn!("PTZ: {err}");
        }
        while let Some(snapshot) = controller.try_recv_snapshot() {
            let preset = snapshot.current_preset.as_deref().unwrap_or("-");
            log::info!(
                "{:?} x={:.3} y={:.3} zoom={:.3} precision={} preset={}",
                snapshot.state,
                snapshot.position.x,
                snapshot.position.y,
                snapshot.position.zoom,
                snapshot.precision,
                preset
            );
            if !snapshot.preset_names.is_empty() {
                log::info!("presets: {}", format_preset_slots(&snapshot.preset_names));
            }
        }
        while let Some(state) = stream.try_recv_state() {
            log::info!("stream: {state:?}");
        }
        while let Some(err) = stream.try_recv_error() {
            log::warn!("stream: {err}");
        }
    }
    Ok(())
}

/// Digit keys recall presets by slot; show the mapping.
fn format_preset_slots(names: &[String]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| format!("{}={}", index + 1, name))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    mod success {
        use crate::session::format_preset_slots;

        #[test]
        fn slots_are_numbered_from_one_in_server_order() {
            let names = vec!["bed head".to_string(), "door".to_string()];
            assert_eq!(format_preset_slots(&names), "1=bed head 2=door");
        }
    }
}

