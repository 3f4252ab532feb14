use flume::Sender;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    audio::{
        config::{AudioConfig, EngineKind},
        coordinator::PlaybackCoordinator,
        engine::RodioEngine,
        silent::SilentEngine,
        state::PlaybackState,
        traits::PlaybackEngine,
    },
    config::AppConfig,
    event::events::Event,
    task::{
        GenerationTask, MediaRef, TaskId, TaskSnapshot, TaskStore, simulator::ProgressSimulator,
        source::TaskDataSource,
    },
    util::task::TaskManager,
};

const CLOSE_TIMER: &str = "close";
const GENERATED_AUDIO: &str = "sample3.mp3";
const GENERATED_IMAGE: &str = "property_1_finish.png";

/// Owns the task store and the playback coordinator.
///
/// All mutation goes through [`handle_event`](Self::handle_event), which the
/// owner loop calls for every message on the shared channel. Simulators,
/// engines and timers only ever send messages.
pub struct AppContext {
    pub event_tx: Sender<Event>,
    store: TaskStore,
    player: PlaybackCoordinator,
    config: AppConfig,
    simulators: TaskManager,
    timers: TaskManager,
}

impl AppContext {
    pub async fn new(
        config: AppConfig,
        source: &dyn TaskDataSource,
        engine: Box<dyn PlaybackEngine>,
        event_tx: Sender<Event>,
    ) -> Self {
        let store = TaskStore::new(source.get_tasks().await);
        if store.is_empty() {
            warn!("task source returned no tasks");
        } else {
            info!(tasks = store.len(), "task store loaded");
        }

        Self {
            event_tx,
            store,
            player: PlaybackCoordinator::new(engine),
            config,
            simulators: TaskManager::new(),
            timers: TaskManager::new(),
        }
    }

    pub fn tasks(&self) -> TaskSnapshot {
        self.store.get_tasks()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn playback(&self) -> &PlaybackState {
        self.player.state()
    }

    pub fn current_track(&self) -> Option<&GenerationTask> {
        self.player
            .current_track_id()
            .and_then(|id| self.store.get(id))
    }

    pub fn handle_event(&mut self, evt: Event) {
        match evt {
            Event::CreateTask(prompt) => {
                self.create_task(&prompt);
            }
            Event::PlayTask(id) => self.play_task(&id),
            Event::SkipTask(id) => self.skip_task(&id),
            Event::RemoveTask(id) => self.remove_task(&id),
            Event::TogglePlayPause => self.player.toggle_play_pause(),
            Event::Next => self.player.next(&self.store.get_tasks()),
            Event::Previous => self.player.previous(&self.store.get_tasks()),
            Event::ClosePlayer => self.close_player(),
            Event::TaskProgress(update) => {
                if let Err(e) =
                    self.store
                        .apply_progress(&update.task_id, update.progress, update.queue_count)
                {
                    debug!(error = %e, "dropping progress update");
                }
            }
            Event::Engine(event) => {
                let tasks = self.store.get_tasks();
                self.player.on_engine_event(event, &tasks);
            }
            Event::CloseSettled(token) => self.player.settle_close(token),
        }
    }

    /// Adds a task for the prompt and starts its simulated generation.
    /// Blank prompts are ignored.
    pub fn create_task(&mut self, prompt: &str) -> Option<TaskId> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return None;
        }

        let generation = &self.config.generation;
        let queue_count = rand::rng().random_range(generation.queue_range.clone());
        let task = GenerationTask::from_prompt(
            prompt,
            generation.title_words,
            queue_count,
            MediaRef::new(GENERATED_AUDIO),
            MediaRef::new(GENERATED_IMAGE),
        );
        let id = task.id.clone();

        if let Err(e) = self.store.add_task(task) {
            debug!(error = %e, "task not added");
            return None;
        }
        info!(task_id = %id, queue_count, "task created");

        let handle = ProgressSimulator::new(
            id.clone(),
            queue_count,
            generation.tick,
            self.store.subscribe(),
            self.event_tx.clone(),
        )
        .spawn();
        self.simulators.spawn(id.as_str(), handle);

        Some(id)
    }

    pub fn play_task(&mut self, id: &TaskId) {
        match self.store.get(id).cloned() {
            Some(task) => self.player.play_track(&task),
            None => debug!(task_id = %id, "play requested for unknown task"),
        }
    }

    pub fn skip_task(&mut self, id: &TaskId) {
        match self.store.skip_task(id) {
            Ok(()) => info!(task_id = %id, "task skipped"),
            Err(e) => debug!(error = %e, "skip ignored"),
        }
    }

    pub fn remove_task(&mut self, id: &TaskId) {
        self.simulators.abort(id.as_str());
        match self.store.remove_task(id) {
            Ok(task) => {
                info!(task_id = %task.id, "task removed");
                if self.player.current_track_id() == Some(id) {
                    self.player.stop();
                }
            }
            Err(e) => debug!(error = %e, "remove ignored"),
        }
    }

    pub fn close_player(&mut self) {
        let Some(token) = self.player.close() else {
            return;
        };

        let grace = self.config.audio.close_grace;
        let tx = self.event_tx.clone();
        self.timers.spawn(
            CLOSE_TIMER,
            tokio::spawn(async move {
                tokio::time::sleep(grace).await;
                let _ = tx.send(Event::CloseSettled(token));
            }),
        );
    }

    pub fn shutdown(&mut self) {
        self.simulators.abort_all();
        self.timers.abort_all();
        self.player.release();
        info!("playback released");
    }
}

/// Opens the configured engine, falling back to the silent one when no
/// output device is available.
pub fn create_engine(config: &AudioConfig, event_tx: Sender<Event>) -> Box<dyn PlaybackEngine> {
    match config.engine {
        EngineKind::Rodio => match RodioEngine::new(config, event_tx.clone()) {
            Ok(engine) => Box::new(engine),
            Err(e) => {
                warn!(error = %e, "audio output unavailable, using silent engine");
                Box::new(SilentEngine::new(config, event_tx))
            }
        },
        EngineKind::Silent => Box::new(SilentEngine::new(config, event_tx)),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        audio::{commands::EngineCommand, coordinator::tests::RecordingEngine, state::PlayerPhase},
        event::events::{EngineEvent, EngineState},
        task::source::LocalTaskSource,
    };

    async fn context() -> (AppContext, RecordingEngine, flume::Receiver<Event>) {
        let (tx, rx) = flume::unbounded();
        let engine = RecordingEngine::default();
        let mut config = AppConfig::default();
        config.generation.tick = Duration::from_millis(10);
        let ctx = AppContext::new(config, &LocalTaskSource, Box::new(engine.clone()), tx).await;
        (ctx, engine, rx)
    }

    #[tokio::test]
    async fn seeds_from_source() {
        let (ctx, _, _) = context().await;
        assert_eq!(ctx.tasks().len(), 5);
        assert!(ctx.current_track().is_none());
    }

    #[tokio::test]
    async fn blank_prompt_is_ignored() {
        let (mut ctx, _, _) = context().await;
        assert!(ctx.create_task("   ").is_none());
        assert_eq!(ctx.tasks().len(), 5);
    }

    #[tokio::test]
    async fn created_task_starts_pending() {
        let (mut ctx, _, _) = context().await;
        let id = ctx.create_task("Create a funky house beat now").unwrap();

        let task = ctx.store().get(&id).unwrap().clone();
        assert_eq!(task.title, "Create a funky house");
        assert_eq!(task.description, "Create a funky house beat now");
        assert_eq!(task.progress, 0);
        let queue = task.queue_count.unwrap();
        assert!((15_000..25_000).contains(&queue));
        assert_eq!(ctx.tasks().back().map(|t| t.id.clone()), Some(id));
    }

    #[tokio::test(start_paused = true)]
    async fn remove_cancels_generation() {
        let (mut ctx, _, rx) = context().await;
        let id = ctx.create_task("slow jazz").unwrap();

        ctx.handle_event(Event::RemoveTask(id.clone()));
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(ctx.store().get(&id).is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn removing_current_track_stops_playback() {
        let (mut ctx, engine, _) = context().await;
        let id = TaskId::new("2");
        ctx.handle_event(Event::PlayTask(id.clone()));
        engine.take();

        ctx.handle_event(Event::RemoveTask(id));

        assert_eq!(ctx.playback(), &PlaybackState::default());
        assert_eq!(
            engine.take(),
            vec![EngineCommand::Stop, EngineCommand::ClearMediaItems]
        );
    }

    #[tokio::test]
    async fn progress_for_unknown_task_is_dropped() {
        let (mut ctx, _, _) = context().await;
        let before = ctx.tasks();
        ctx.handle_event(Event::TaskProgress(crate::event::events::ProgressUpdate {
            task_id: TaskId::new("missing"),
            progress: 10,
            queue_count: 1,
        }));
        assert_eq!(ctx.tasks(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn close_settles_after_grace() {
        let (mut ctx, _, rx) = context().await;
        ctx.handle_event(Event::PlayTask(TaskId::new("1")));
        ctx.handle_event(Event::Engine(EngineEvent::StateChanged {
            track_id: TaskId::new("1"),
            state: EngineState::Ready,
        }));
        assert_eq!(ctx.player.phase(), PlayerPhase::Playing);

        let start = tokio::time::Instant::now();
        ctx.handle_event(Event::ClosePlayer);
        assert!(!ctx.playback().is_player_visible);
        assert!(ctx.playback().current_track_id.is_some());

        let evt = rx.recv_async().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
        ctx.handle_event(evt);
        assert_eq!(ctx.playback(), &PlaybackState::default());
    }

    #[tokio::test]
    async fn shutdown_releases_engine() {
        let (mut ctx, engine, _) = context().await;
        ctx.shutdown();
        assert_eq!(engine.take().last(), Some(&EngineCommand::Release));
    }
}
