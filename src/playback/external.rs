//! External player backend (mpv).
//!
//! Each play spawns one player process for the stream; pause kills it, since
//! a live stream cannot resume where it left off anyway. On unix the
//! player's JSON IPC socket is used for buffering events and live volume
//! changes.

use super::{MediaBackend, MediaEvent, MediaEventSender};
use crate::radio::error::{RadioError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
#[cfg(unix)]
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
#[cfg(unix)]
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// A running player process
struct Session {
    stop: oneshot::Sender<()>,
    commands: mpsc::UnboundedSender<String>,
}

pub struct ExternalPlayer {
    command: String,
    stream_url: String,
    volume: f32,
    events: MediaEventSender,
    session: Option<Session>,
}

impl ExternalPlayer {
    pub fn new(command: &str, stream_url: &str, events: MediaEventSender) -> Self {
        Self {
            command: command.to_string(),
            stream_url: stream_url.to_string(),
            volume: 0.0,
            events,
            session: None,
        }
    }

    fn ipc_path() -> PathBuf {
        std::env::temp_dir().join(format!("airwave-mpv-{}.sock", std::process::id()))
    }

    fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.stop.is_closed())
    }
}

impl MediaBackend for ExternalPlayer {
    fn play(&mut self) -> Result<()> {
        if self.is_active() {
            return Ok(());
        }

        let ipc_path = Self::ipc_path();
        let _ = std::fs::remove_file(&ipc_path);

        let child = Command::new(&self.command)
            .arg("--no-video")
            .arg("--no-terminal")
            .arg("--really-quiet")
            .arg(format!("--volume={}", volume_percent(self.volume)))
            .arg(format!("--input-ipc-server={}", ipc_path.display()))
            .arg(&self.stream_url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RadioError::Playback(format!("failed to launch {}: {}", self.command, e)))?;

        info!(player = %self.command, url = %self.stream_url, "Player started");
        // Loading starts once the process runs
        let _ = self.events.send(MediaEvent::LoadStart);

        let (stop_tx, stop_rx) = oneshot::channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_session(
            child,
            self.command.clone(),
            ipc_path,
            cmd_rx,
            stop_rx,
            self.events.clone(),
        ));

        self.session = Some(Session {
            stop: stop_tx,
            commands: cmd_tx,
        });
        let _ = self.events.send(MediaEvent::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        match self.session.take() {
            Some(session) => {
                // Session already gone means the player exited on its own
                if session.stop.send(()).is_err() {
                    let _ = self.events.send(MediaEvent::Pause);
                }
            }
            None => {
                let _ = self.events.send(MediaEvent::Pause);
            }
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(session) = &self.session {
            let _ = session.commands.send(ipc_command(&[
                Value::from("set_property"),
                Value::from("volume"),
                Value::from(volume_percent(self.volume)),
            ]));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mpv"
    }

    fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            let _ = session.stop.send(());
        }
    }
}

fn volume_percent(volume: f32) -> u32 {
    (volume.clamp(0.0, 1.0) * 100.0).round() as u32
}

fn ipc_command(args: &[Value]) -> String {
    let mut line = serde_json::json!({ "command": args }).to_string();
    line.push('\n');
    line
}

/// Map one line of mpv's IPC output to a media event.
pub fn map_ipc_event(line: &str) -> Option<MediaEvent> {
    let value: Value = serde_json::from_str(line).ok()?;
    match value.get("event")?.as_str()? {
        "start-file" => Some(MediaEvent::LoadStart),
        "file-loaded" => Some(MediaEvent::CanPlay),
        "playback-restart" => Some(MediaEvent::Playing),
        "property-change" if value.get("name")?.as_str()? == "paused-for-cache" => {
            match value.get("data")?.as_bool()? {
                true => Some(MediaEvent::Waiting),
                false => Some(MediaEvent::Playing),
            }
        }
        _ => None,
    }
}

/// Player IPC connection. Inert when the socket never shows up.
#[cfg(unix)]
struct Ipc {
    reader: Option<Lines<BufReader<OwnedReadHalf>>>,
    writer: Option<OwnedWriteHalf>,
}

#[cfg(unix)]
impl Ipc {
    /// The player creates the socket shortly after start; retry for ~2s.
    async fn connect(path: &Path) -> Self {
        for _ in 0..20 {
            if let Ok(stream) = tokio::net::UnixStream::connect(path).await {
                let (read, write) = stream.into_split();
                return Self {
                    reader: Some(BufReader::new(read).lines()),
                    writer: Some(write),
                };
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        Self {
            reader: None,
            writer: None,
        }
    }

    fn is_connected(&self) -> bool {
        self.reader.is_some()
    }

    async fn send(&mut self, line: &str) {
        if let Some(writer) = self.writer.as_mut() {
            if writer.write_all(line.as_bytes()).await.is_err() {
                self.writer = None;
            }
        }
    }

    /// Next line from the player; pends forever once the socket closes.
    async fn next_line(&mut self) -> String {
        if let Some(reader) = self.reader.as_mut() {
            match reader.next_line().await {
                Ok(Some(line)) => return line,
                _ => self.reader = None,
            }
        }
        std::future::pending().await
    }
}

#[cfg(not(unix))]
struct Ipc;

#[cfg(not(unix))]
impl Ipc {
    async fn connect(_path: &Path) -> Self {
        Self
    }

    fn is_connected(&self) -> bool {
        false
    }

    async fn send(&mut self, _line: &str) {}

    async fn next_line(&mut self) -> String {
        std::future::pending().await
    }
}

async fn run_session(
    mut child: Child,
    command: String,
    ipc_path: PathBuf,
    mut commands: mpsc::UnboundedReceiver<String>,
    mut stop: oneshot::Receiver<()>,
    events: MediaEventSender,
) {
    let mut ipc = Ipc::connect(&ipc_path).await;
    if ipc.is_connected() {
        ipc.send(&ipc_command(&[
            Value::from("observe_property"),
            Value::from(1),
            Value::from("paused-for-cache"),
        ]))
        .await;
    } else {
        debug!("Player IPC unavailable, assuming playback started");
        let _ = events.send(MediaEvent::Playing);
    }

    loop {
        tokio::select! {
            _ = &mut stop => {
                let _ = child.kill().await;
                let _ = events.send(MediaEvent::Pause);
                break;
            }
            status = child.wait() => {
                match status {
                    Ok(status) if status.success() => {
                        info!(player = %command, "Player exited");
                        let _ = events.send(MediaEvent::Pause);
                    }
                    Ok(status) => {
                        warn!(player = %command, %status, "Player failed");
                        let _ = events.send(MediaEvent::Error(format!("{} exited with {}", command, status)));
                    }
                    Err(e) => {
                        let _ = events.send(MediaEvent::Error(e.to_string()));
                    }
                }
                break;
            }
            Some(line) = commands.recv() => ipc.send(&line).await,
            line = ipc.next_line() => {
                if let Some(event) = map_ipc_event(&line) {
                    let _ = events.send(event);
                }
            }
        }
    }

    let _ = std::fs::remove_file(&ipc_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_ipc_events() {
        assert_eq!(map_ipc_event(r#"{"event":"start-file"}"#), Some(MediaEvent::LoadStart));
        assert_eq!(map_ipc_event(r#"{"event":"file-loaded"}"#), Some(MediaEvent::CanPlay));
        assert_eq!(map_ipc_event(r#"{"event":"playback-restart"}"#), Some(MediaEvent::Playing));
        assert_eq!(
            map_ipc_event(
                r#"{"event":"property-change","id":1,"name":"paused-for-cache","data":true}"#
            ),
            Some(MediaEvent::Waiting)
        );
        assert_eq!(
            map_ipc_event(
                r#"{"event":"property-change","id":1,"name":"paused-for-cache","data":false}"#
            ),
            Some(MediaEvent::Playing)
        );
    }

    #[test]
    fn ignores_unrelated_lines() {
        assert_eq!(map_ipc_event(r#"{"data":null,"error":"success"}"#), None);
        assert_eq!(map_ipc_event(r#"{"event":"audio-reconfig"}"#), None);
        assert_eq!(map_ipc_event("not json"), None);
    }

    #[test]
    fn volume_command_format() {
        let line = ipc_command(&[
            Value::from("set_property"),
            Value::from("volume"),
            Value::from(volume_percent(0.3)),
        ]);
        assert_eq!(line, "{\"command\":[\"set_property\",\"volume\",30]}\n");
    }

    #[tokio::test]
    async fn missing_binary_is_a_playback_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut player = ExternalPlayer::new("airwave-no-such-player", "http://localhost/stream", tx);

        let result = player.play();
        assert!(matches!(result, Err(RadioError::Playback(_))));
        assert!(rx.try_recv().is_err());
        assert!(!player.is_active());
    }
}
