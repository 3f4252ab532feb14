use std::time::Duration;

use flume::Sender;
use tokio::time::Instant;
use tracing::debug;

use crate::{
    audio::{commands::TrackRef, config::AudioConfig, traits::PlaybackEngine},
    event::events::{EngineEvent, EngineState, Event},
    util::task::TaskManager,
};

const READY_TIMER: &str = "ready";
const END_TIMER: &str = "ended";

/// Engine without an output device. Tracks "play" for a fixed length on
/// timers, which is enough to drive the coordinator end to end.
pub struct SilentEngine {
    event_tx: Sender<Event>,
    ready_delay: Duration,
    track_length: Duration,

    loaded: Option<TrackRef>,
    remaining: Duration,
    started: Option<Instant>,
    timers: TaskManager,
}

impl SilentEngine {
    pub fn new(config: &AudioConfig, event_tx: Sender<Event>) -> Self {
        Self {
            event_tx,
            ready_delay: config.ready_delay,
            track_length: config.silent_track_length,
            loaded: None,
            remaining: Duration::ZERO,
            started: None,
            timers: TaskManager::new(),
        }
    }

    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(Event::Engine(event));
    }

    fn schedule(&mut self, key: &str, delay: Duration, event: EngineEvent) {
        let tx = self.event_tx.clone();
        self.timers.spawn(
            key,
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(Event::Engine(event));
            }),
        );
    }
}

impl PlaybackEngine for SilentEngine {
    fn load(&mut self, track: &TrackRef) {
        debug!(track_id = %track.id, "silent engine load");
        self.timers.abort_all();
        self.started = None;
        self.remaining = self.track_length;
        self.loaded = Some(track.clone());
    }

    fn prepare(&mut self) {
        let Some(track) = self.loaded.clone() else {
            return;
        };
        self.emit(EngineEvent::StateChanged {
            track_id: track.id.clone(),
            state: EngineState::Buffering,
        });

        if track.media.is_none() {
            self.emit(EngineEvent::Error {
                track_id: track.id,
                message: "track has no media".to_string(),
            });
            return;
        }

        let delay = self.ready_delay;
        self.schedule(
            READY_TIMER,
            delay,
            EngineEvent::StateChanged {
                track_id: track.id,
                state: EngineState::Ready,
            },
        );
    }

    fn play(&mut self) {
        let Some(track) = self.loaded.clone() else {
            return;
        };
        if self.started.is_some() {
            return;
        }

        self.started = Some(Instant::now());
        let remaining = self.remaining;
        self.schedule(
            END_TIMER,
            remaining,
            EngineEvent::StateChanged {
                track_id: track.id.clone(),
                state: EngineState::Ended,
            },
        );
        self.emit(EngineEvent::PlayingChanged {
            track_id: track.id,
            is_playing: true,
        });
    }

    fn pause(&mut self) {
        let Some(started) = self.started.take() else {
            return;
        };
        self.timers.abort(END_TIMER);
        self.remaining = self.remaining.saturating_sub(started.elapsed());

        if let Some(track) = &self.loaded {
            self.emit(EngineEvent::PlayingChanged {
                track_id: track.id.clone(),
                is_playing: false,
            });
        }
    }

    fn stop(&mut self) {
        self.timers.abort_all();
        self.started = None;
        self.remaining = self.track_length;

        if let Some(track) = &self.loaded {
            self.emit(EngineEvent::StateChanged {
                track_id: track.id.clone(),
                state: EngineState::Idle,
            });
        }
    }

    fn clear_media_items(&mut self) {
        self.loaded = None;
    }

    fn release(&mut self) {
        self.timers.abort_all();
        self.loaded = None;
    }
}
