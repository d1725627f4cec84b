//! In-process playback: rodio decodes the HTTP stream on its own thread.

use super::{MediaBackend, MediaEvent, MediaEventSender};
use crate::radio::error::{RadioError, Result};
use rodio::{Decoder, OutputStream, Sink};
use std::io::{Read, Seek, SeekFrom};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{info, warn};

enum Command {
    SetVolume(f32),
    Stop,
}

/// Forward-only reader over the live stream.
///
/// The decoder wants `Read + Seek + Sync`; a radio stream only ever moves
/// forward, so the only seeks answered are the ones that stay in place.
struct StreamReader {
    inner: Mutex<Box<dyn Read + Send>>,
    pos: u64,
}

impl StreamReader {
    fn new(inner: impl Read + Send + 'static) -> Self {
        Self {
            inner: Mutex::new(Box::new(inner)),
            pos: 0,
        }
    }
}

impl Read for StreamReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let inner = self
            .inner
            .get_mut()
            .map_err(|_| std::io::Error::other("stream reader poisoned"))?;
        let n = inner.read(buf)?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for StreamReader {
    fn seek(&mut self, target: SeekFrom) -> std::io::Result<u64> {
        match target {
            SeekFrom::Current(0) => Ok(self.pos),
            SeekFrom::Start(offset) if offset == self.pos => Ok(self.pos),
            _ => Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "live stream is not seekable",
            )),
        }
    }
}

pub struct NativePlayer {
    stream_url: String,
    volume: f32,
    events: MediaEventSender,
    commands: Option<mpsc::Sender<Command>>,
    decoder: Option<JoinHandle<()>>,
}

impl NativePlayer {
    pub fn new(stream_url: &str, events: MediaEventSender) -> Self {
        Self {
            stream_url: stream_url.to_string(),
            volume: 0.0,
            events,
            commands: None,
            decoder: None,
        }
    }

    /// A decoder thread that failed or hit the end of the stream is gone
    fn is_active(&self) -> bool {
        self.decoder.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl MediaBackend for NativePlayer {
    fn play(&mut self) -> Result<()> {
        if self.is_active() {
            return Ok(());
        }

        let (tx, rx) = mpsc::channel();
        let url = self.stream_url.clone();
        let volume = self.volume;
        let events = self.events.clone();
        let decoder = thread::Builder::new()
            .name("airwave-audio".into())
            .spawn(move || {
                if let Err(e) = run_decoder(&url, volume, rx, &events) {
                    warn!(error = %e, "Native playback failed");
                    let _ = events.send(MediaEvent::Error(e.to_string()));
                }
            })
            .map_err(|e| RadioError::Playback(format!("failed to start audio thread: {}", e)))?;

        info!(url = %self.stream_url, "Native playback started");
        self.commands = Some(tx);
        self.decoder = Some(decoder);
        let _ = self.events.send(MediaEvent::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let running = self.is_active();
        self.decoder = None;
        let commands = self.commands.take();
        // The decoder answers Stop with Pause
        let stopped = running && commands.is_some_and(|tx| tx.send(Command::Stop).is_ok());
        if !stopped {
            let _ = self.events.send(MediaEvent::Pause);
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(tx) = &self.commands {
            if tx.send(Command::SetVolume(self.volume)).is_err() {
                // Decoder thread ended on its own
                self.commands = None;
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "native"
    }
}

fn run_decoder(
    url: &str,
    volume: f32,
    commands: mpsc::Receiver<Command>,
    events: &MediaEventSender,
) -> Result<()> {
    let _ = events.send(MediaEvent::LoadStart);

    let response = reqwest::blocking::Client::builder()
        .build()?
        .get(url)
        .send()?;
    if !response.status().is_success() {
        return Err(RadioError::Status(response.status().as_u16()));
    }

    let (_stream, handle) = OutputStream::try_default()
        .map_err(|e| RadioError::Playback(format!("no audio output: {}", e)))?;
    let sink = Sink::try_new(&handle).map_err(|e| RadioError::Playback(e.to_string()))?;
    let source = Decoder::new(StreamReader::new(response))
        .map_err(|e| RadioError::Playback(format!("cannot decode stream: {}", e)))?;

    sink.set_volume(volume);
    sink.append(source);
    let _ = events.send(MediaEvent::CanPlay);
    let _ = events.send(MediaEvent::Playing);

    loop {
        match commands.recv_timeout(Duration::from_millis(250)) {
            Ok(Command::SetVolume(v)) => sink.set_volume(v),
            Ok(Command::Stop) | Err(RecvTimeoutError::Disconnected) => {
                sink.stop();
                let _ = events.send(MediaEvent::Pause);
                return Ok(());
            }
            Err(RecvTimeoutError::Timeout) => {
                if sink.empty() {
                    return Err(RadioError::Playback("stream ended".into()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Events up to and including the decoder's failure
    fn until_error(rx: &mut tokio::sync::mpsc::UnboundedReceiver<MediaEvent>) -> Vec<MediaEvent> {
        let mut seen = Vec::new();
        while let Some(event) = rx.blocking_recv() {
            let done = matches!(event, MediaEvent::Error(_));
            seen.push(event);
            if done {
                break;
            }
        }
        seen
    }

    #[test]
    fn restarts_after_decoder_failure() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        // Nothing listens on the discard port
        let mut player = NativePlayer::new("http://127.0.0.1:9/radio.mp3", tx);

        player.play().unwrap();
        let first = until_error(&mut rx);
        assert!(first.contains(&MediaEvent::Play));
        assert!(first.contains(&MediaEvent::LoadStart));

        for _ in 0..200 {
            if !player.is_active() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert!(!player.is_active());

        player.play().unwrap();
        let second = until_error(&mut rx);
        assert!(second.contains(&MediaEvent::Play));
        assert!(matches!(second.last(), Some(MediaEvent::Error(_))));
    }

    #[test]
    fn reader_tracks_position_and_refuses_real_seeks() {
        let mut reader = StreamReader::new(Cursor::new(vec![1u8, 2, 3, 4]));
        let mut buf = [0u8; 3];
        assert_eq!(reader.read(&mut buf).unwrap(), 3);

        assert_eq!(reader.seek(SeekFrom::Current(0)).unwrap(), 3);
        assert_eq!(reader.seek(SeekFrom::Start(3)).unwrap(), 3);
        assert!(reader.seek(SeekFrom::Start(0)).is_err());
        assert!(reader.seek(SeekFrom::End(0)).is_err());
    }
}
