use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    thread,
    time::Duration,
};

use arc_swap::ArcSwapOption;
use flume::Sender;
use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use crate::{
    audio::{
        commands::TrackRef,
        config::AudioConfig,
        error::AudioError,
        traits::PlaybackEngine,
        util::{construct_sink, setup_device_config},
    },
    event::events::{EngineEvent, EngineState, Event},
    task::TaskId,
};

/// Plays local media files through the default output device.
pub struct RodioEngine {
    _stream: OutputStream,
    sink: Arc<Sink>,
    media_dir: PathBuf,
    event_tx: Sender<Event>,

    loaded: Arc<ArcSwapOption<TrackRef>>,
    generation: Arc<AtomicU64>,
    is_playing: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
}

impl RodioEngine {
    pub fn new(config: &AudioConfig, event_tx: Sender<Event>) -> Result<Self, AudioError> {
        let (device, stream_config, sample_format) = setup_device_config()?;
        let (stream, sink) = construct_sink(device, &stream_config, sample_format)?;
        sink.set_volume(f32::from(config.volume.min(100)) / 100.0);

        let engine = Self {
            _stream: stream,
            sink: Arc::new(sink),
            media_dir: config.media_dir.clone(),
            event_tx,
            loaded: Arc::new(ArcSwapOption::empty()),
            generation: Arc::new(AtomicU64::new(0)),
            is_playing: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(AtomicBool::new(false)),
        };
        engine.start_monitor();
        Ok(engine)
    }

    fn start_monitor(&self) {
        let sink = self.sink.clone();
        let loaded = self.loaded.clone();
        let playing = self.is_playing.clone();
        let shutdown = self.shutdown.clone();
        let event_tx = self.event_tx.clone();

        thread::spawn(move || {
            while !shutdown.load(Ordering::Relaxed) {
                if playing.load(Ordering::Relaxed) && sink.empty() {
                    playing.store(false, Ordering::Relaxed);
                    if let Some(track) = loaded.load_full() {
                        let _ = event_tx.send(state_event(&track.id, EngineState::Ended));
                    }
                }

                thread::sleep(Duration::from_millis(1000 / 8));
            }
        });
    }

    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(Event::Engine(event));
    }
}

impl PlaybackEngine for RodioEngine {
    fn load(&mut self, track: &TrackRef) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.loaded.store(Some(Arc::new(track.clone())));
    }

    fn prepare(&mut self) {
        let Some(track) = self.loaded.load_full() else {
            return;
        };
        self.emit(EngineEvent::StateChanged {
            track_id: track.id.clone(),
            state: EngineState::Buffering,
        });

        let Some(media) = track.media.as_ref() else {
            self.emit(EngineEvent::Error {
                track_id: track.id.clone(),
                message: AudioError::MediaNotFound(track.title.clone()).to_string(),
            });
            return;
        };

        let path = self.media_dir.join(media.as_str());
        let generation = self.generation.load(Ordering::SeqCst);
        let playback_generation = self.generation.clone();
        let sink = self.sink.clone();
        let event_tx = self.event_tx.clone();

        tokio::task::spawn_blocking(move || {
            let decoder = match open_decoder(&path) {
                Ok(decoder) => decoder,
                Err(e) => {
                    warn!(track_id = %track.id, error = %e, "failed to open media");
                    let _ = event_tx.send(Event::Engine(EngineEvent::Error {
                        track_id: track.id.clone(),
                        message: e.to_string(),
                    }));
                    return;
                }
            };

            if playback_generation.load(Ordering::SeqCst) != generation {
                debug!(track_id = %track.id, "decode superseded");
                return;
            }

            sink.pause();
            sink.append(decoder);
            let _ = event_tx.send(state_event(&track.id, EngineState::Ready));
        });
    }

    fn play(&mut self) {
        let Some(track) = self.loaded.load_full() else {
            return;
        };
        self.sink.play();
        self.is_playing.store(true, Ordering::Relaxed);
        self.emit(EngineEvent::PlayingChanged {
            track_id: track.id.clone(),
            is_playing: true,
        });
    }

    fn pause(&mut self) {
        self.sink.pause();
        self.is_playing.store(false, Ordering::Relaxed);
        if let Some(track) = self.loaded.load_full() {
            self.emit(EngineEvent::PlayingChanged {
                track_id: track.id.clone(),
                is_playing: false,
            });
        }
    }

    fn stop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.is_playing.store(false, Ordering::Relaxed);
        self.sink.stop();
        if let Some(track) = self.loaded.load_full() {
            self.emit(EngineEvent::StateChanged {
                track_id: track.id.clone(),
                state: EngineState::Idle,
            });
        }
    }

    fn clear_media_items(&mut self) {
        self.loaded.store(None);
    }

    fn release(&mut self) {
        self.stop();
        self.clear_media_items();
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, AudioError> {
    let file = File::open(path)
        .map_err(|e| AudioError::MediaNotFound(format!("{}: {e}", path.display())))?;
    let byte_len = file.metadata().map(|m| m.len()).unwrap_or(0);
    let hint = path.extension().and_then(|e| e.to_str()).unwrap_or("mp3");

    Decoder::builder()
        .with_data(BufReader::new(file))
        .with_hint(hint)
        .with_byte_len(byte_len)
        .with_gapless(true)
        .build()
        .map_err(|e| AudioError::DecodingError(e.to_string()))
}

fn state_event(track_id: &TaskId, state: EngineState) -> Event {
    Event::Engine(EngineEvent::StateChanged {
        track_id: track_id.clone(),
        state,
    })
}
