use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use image::GrayImage;
use tracing::{debug, info, warn};

use crate::camera::{CameraBackend, MediaStream, StreamRequest, TrackCapabilities, TrackConstraint};
use crate::error::{Result, ScanError};
use crate::model::CameraConstraints;

use super::{DecodeEvent, FrameDecoder};

/// Preview frame ids increase across all subscriptions; 0 means "none seen".
static NEXT_FRAME_ID: AtomicU64 = AtomicU64::new(1);

type Preview = Arc<Mutex<Option<(u64, GrayImage)>>>;

/// Handle to a running decode stream.
///
/// The stream is opened under the given constraints and frames are decoded
/// on a dedicated thread. Cancelling (or dropping) the handle joins that
/// thread, stops the camera tracks and drops the event channel: once
/// `cancel` returns no further events can be observed.
pub struct DecodeSubscription {
    stream: Arc<Mutex<MediaStream>>,
    latest: Preview,
    events: Option<mpsc::Receiver<DecodeEvent>>,
    stop_tx: Option<mpsc::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl DecodeSubscription {
    pub fn start(
        camera: &dyn CameraBackend,
        constraints: &CameraConstraints,
        decoder: Box<dyn FrameDecoder>,
        interval: Duration,
    ) -> Result<Self> {
        let stream = camera.open_stream(&StreamRequest::Constraints(constraints.clone()))?;
        let stream = Arc::new(Mutex::new(stream));
        let latest = Arc::new(Mutex::new(None));
        let (event_tx, event_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel();

        let worker = {
            let stream = Arc::clone(&stream);
            let latest = Arc::clone(&latest);
            std::thread::Builder::new()
                .name("scanner-decode".into())
                .spawn(move || decode_loop(stream, latest, decoder, event_tx, stop_rx, interval))?
        };

        info!(facing = %constraints.facing_mode, "decode stream started");
        Ok(Self {
            stream,
            latest,
            events: Some(event_rx),
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        })
    }

    /// Drain events delivered since the last call.
    pub fn try_events(&self) -> Vec<DecodeEvent> {
        match &self.events {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.worker.is_some()
    }

    pub fn track_capabilities(&self) -> Option<TrackCapabilities> {
        lock(&self.stream).video_track().map(|t| t.capabilities())
    }

    pub fn apply_constraint(&self, constraint: &TrackConstraint) -> Result<()> {
        let mut stream = lock(&self.stream);
        let track = stream.video_track_mut().ok_or(ScanError::StreamClosed)?;
        track.apply(constraint)
    }

    pub fn set_torch(&self, on: bool) -> Result<()> {
        self.apply_constraint(&TrackConstraint::Torch(on))
    }

    /// Last frame pulled from the camera, for preview.
    pub fn latest_frame(&self) -> Option<GrayImage> {
        lock(&self.latest).as_ref().map(|(_, frame)| frame.clone())
    }

    /// Last frame and its id, only if it is newer than `seen`.
    pub fn latest_frame_since(&self, seen: u64) -> Option<(u64, GrayImage)> {
        lock(&self.latest)
            .as_ref()
            .filter(|(id, _)| *id > seen)
            .cloned()
    }

    /// Stop decoding and release the camera. Idempotent.
    pub fn cancel(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        self.stop_tx.take();
        if worker.join().is_err() {
            warn!("decode worker panicked");
        }
        lock(&self.stream).stop_all();
        self.events.take();
        debug!("decode stream released");
    }
}

impl Drop for DecodeSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn decode_loop(
    stream: Arc<Mutex<MediaStream>>,
    latest: Preview,
    mut decoder: Box<dyn FrameDecoder>,
    tx: mpsc::Sender<DecodeEvent>,
    stop_rx: mpsc::Receiver<()>,
    interval: Duration,
) {
    loop {
        let grabbed = {
            let mut stream = lock(&stream);
            match stream.video_track_mut() {
                Some(track) => track.grab_frame(),
                None => Err(ScanError::StreamClosed),
            }
        };

        let event = match grabbed {
            Ok(Some(frame)) => {
                let event = match decoder.decode(&frame) {
                    Ok(Some(decoded)) => Some(DecodeEvent::Decoded(decoded)),
                    Ok(None) => None,
                    Err(e) => Some(DecodeEvent::Error(e.to_string())),
                };
                let id = NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed);
                *lock(&latest) = Some((id, frame));
                event
            }
            Ok(None) => None,
            Err(ScanError::StreamClosed) => {
                let _ = tx.send(DecodeEvent::Error(ScanError::StreamClosed.to_string()));
                break;
            }
            Err(e) => Some(DecodeEvent::Error(e.to_string())),
        };

        if let Some(event) = event {
            if tx.send(event).is_err() {
                break;
            }
        }

        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
