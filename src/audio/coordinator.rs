use tracing::{debug, info, warn};

use crate::{
    audio::{
        commands::{EngineCommand, TrackRef},
        queue::{Step, neighbor},
        state::{PlaybackState, PlayerPhase},
        traits::PlaybackEngine,
    },
    event::events::{EngineEvent, EngineState},
    task::{GenerationTask, TaskId, TaskSnapshot},
};

/// Mediates between user actions and the playback engine.
///
/// Every engine event is matched against the current track id before it may
/// touch the state; events for any other track are dropped. Starting a new
/// load replaces the current id, which is what invalidates a pending load.
pub struct PlaybackCoordinator {
    engine: Box<dyn PlaybackEngine>,
    state: PlaybackState,
    close_token: u64,
    closing: bool,
}

impl PlaybackCoordinator {
    pub fn new(engine: Box<dyn PlaybackEngine>) -> Self {
        Self {
            engine,
            state: PlaybackState::default(),
            close_token: 0,
            closing: false,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> PlayerPhase {
        self.state.phase()
    }

    /// Starts loading a completed task. Unfinished tasks are ignored.
    pub fn play_track(&mut self, task: &GenerationTask) {
        if !task.is_completed() {
            debug!(
                task_id = %task.id,
                progress = task.progress,
                "ignoring play of unfinished task"
            );
            return;
        }

        if self.state.is_current(&task.id) && self.state.is_player_visible {
            if self.phase() == PlayerPhase::Paused {
                self.resume();
            }
            return;
        }

        self.closing = false;
        self.load(task);
    }

    pub fn toggle_play_pause(&mut self) {
        match self.phase() {
            PlayerPhase::Playing => self.pause(),
            PlayerPhase::Paused => self.resume(),
            PlayerPhase::Idle | PlayerPhase::Loading => {}
        }
    }

    pub fn pause(&mut self) {
        if self.phase() != PlayerPhase::Playing {
            return;
        }
        self.engine.execute(EngineCommand::Pause);
        self.state.is_playing = false;
        info!(track_id = ?self.state.current_track_id, "paused");
    }

    pub fn resume(&mut self) {
        if self.phase() != PlayerPhase::Paused {
            return;
        }
        self.engine.execute(EngineCommand::Play);
        self.state.is_playing = true;
        info!(track_id = ?self.state.current_track_id, "resumed");
    }

    pub fn next(&mut self, tasks: &TaskSnapshot) {
        self.step(tasks, Step::Next);
    }

    pub fn previous(&mut self, tasks: &TaskSnapshot) {
        self.step(tasks, Step::Previous);
    }

    /// Hides the player at once. The caller schedules
    /// [`settle_close`](Self::settle_close) with the returned token after the
    /// fade-out grace period. Until then the engine may finish loading or
    /// reach the end of the track, but nothing new starts playing.
    pub fn close(&mut self) -> Option<u64> {
        self.state.current_track_id.as_ref()?;

        self.state.is_player_visible = false;
        self.closing = true;
        self.close_token += 1;
        info!(token = self.close_token, "closing player");
        Some(self.close_token)
    }

    /// Finishes a close unless the user started another track in the meantime.
    pub fn settle_close(&mut self, token: u64) {
        if token != self.close_token || !self.closing {
            debug!(token, current = self.close_token, "close superseded");
            return;
        }
        self.stop();
    }

    /// Stops the engine and drops the current track.
    pub fn stop(&mut self) {
        self.engine.execute(EngineCommand::Stop);
        self.engine.execute(EngineCommand::ClearMediaItems);
        self.state.reset();
        self.closing = false;
    }

    pub fn release(&mut self) {
        self.stop();
        self.engine.execute(EngineCommand::Release);
    }

    pub fn on_engine_event(&mut self, event: EngineEvent, tasks: &TaskSnapshot) {
        if !self.state.is_current(event.track_id()) {
            debug!(
                track_id = %event.track_id(),
                current = ?self.state.current_track_id,
                "dropping stale engine event"
            );
            return;
        }

        match event {
            EngineEvent::StateChanged { state, .. } => self.on_state_changed(state, tasks),
            EngineEvent::PlayingChanged { is_playing, .. } => {
                if !self.state.is_loading {
                    self.state.is_playing = is_playing;
                }
            }
            EngineEvent::Error { track_id, message } => {
                warn!(track_id = %track_id, error = %message, "playback failed");
                self.stop();
            }
        }
    }

    fn on_state_changed(&mut self, state: EngineState, tasks: &TaskSnapshot) {
        match state {
            EngineState::Idle => {
                if !self.state.is_loading {
                    debug!("engine went idle");
                    self.state.reset();
                }
            }
            EngineState::Buffering => {
                self.state.is_loading = true;
            }
            EngineState::Ready if self.closing => {
                self.state.is_loading = false;
            }
            EngineState::Ready => {
                if self.state.is_loading {
                    self.state.is_loading = false;
                    self.state.is_playing = true;
                    self.engine.execute(EngineCommand::Play);
                    info!(track_id = ?self.state.current_track_id, "playing");
                }
            }
            EngineState::Ended if self.closing => {
                debug!("track ended while closing");
                self.stop();
            }
            EngineState::Ended => {
                let current = self.state.current_track_id.clone();
                match neighbor(tasks, current.as_ref(), Step::Next).cloned() {
                    Some(next) => self.load(&next),
                    None => self.stop(),
                }
            }
        }
    }

    fn step(&mut self, tasks: &TaskSnapshot, step: Step) {
        let Some(current) = self.state.current_track_id.clone() else {
            return;
        };
        if let Some(target) = neighbor(tasks, Some(&current), step).cloned() {
            self.closing = false;
            self.load(&target);
        }
    }

    fn load(&mut self, task: &GenerationTask) {
        info!(task_id = %task.id, title = task.title.as_str(), "loading track");
        self.state.begin_loading(task.id.clone());

        self.engine.execute(EngineCommand::Stop);
        self.engine.execute(EngineCommand::ClearMediaItems);
        self.engine.execute(EngineCommand::Load(TrackRef {
            id: task.id.clone(),
            title: task.title.clone(),
            media: task.audio.clone(),
        }));
        self.engine.execute(EngineCommand::Prepare);
    }

    pub fn current_track_id(&self) -> Option<&TaskId> {
        self.state.current_track_id.as_ref()
    }
}
