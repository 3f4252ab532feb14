#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use flume::Receiver;
use musicgpt::{
    audio::silent::SilentEngine,
    config::AppConfig,
    context::AppContext,
    event::events::Event,
    task::{GenerationTask, MediaRef, TaskId, source::TaskDataSource},
};

pub struct FixedSource(pub Vec<GenerationTask>);

#[async_trait]
impl TaskDataSource for FixedSource {
    async fn get_tasks(&self) -> Vec<GenerationTask> {
        self.0.clone()
    }
}

pub fn task(id: &str, progress: u8) -> GenerationTask {
    GenerationTask {
        id: TaskId::new(id),
        title: format!("Track {id}"),
        description: format!("Track {id} description"),
        progress,
        queue_count: (progress < 100).then_some(1_000),
        audio: Some(MediaRef::new("sample1.mp3")),
        image: MediaRef::new("random_1.png"),
    }
}

pub fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.generation.tick = Duration::from_millis(10);
    config.audio.close_grace = Duration::from_millis(500);
    config.audio.ready_delay = Duration::from_millis(250);
    config.audio.silent_track_length = Duration::from_secs(30);
    config
}

/// Context over the given tasks, playing through the silent engine.
pub async fn context_with(
    tasks: Vec<GenerationTask>,
    config: AppConfig,
) -> (AppContext, Receiver<Event>) {
    let (tx, rx) = flume::unbounded();
    let engine = SilentEngine::new(&config.audio, tx.clone());
    let ctx = AppContext::new(config, &FixedSource(tasks), Box::new(engine), tx).await;
    (ctx, rx)
}

pub async fn context(tasks: Vec<GenerationTask>) -> (AppContext, Receiver<Event>) {
    context_with(tasks, fast_config()).await
}

/// Feeds channel messages back into the context until `done` holds.
pub async fn pump_until<F>(ctx: &mut AppContext, rx: &Receiver<Event>, done: F)
where
    F: Fn(&AppContext) -> bool,
{
    while !done(ctx) {
        let evt = rx.recv_async().await.expect("channel closed");
        ctx.handle_event(evt);
    }
}

/// Feeds channel messages back into the context up to and including the
/// close-grace timer.
pub async fn pump_until_settled(ctx: &mut AppContext, rx: &Receiver<Event>) {
    loop {
        let evt = rx.recv_async().await.expect("channel closed");
        let settled = matches!(evt, Event::CloseSettled(_));
        ctx.handle_event(evt);
        if settled {
            return;
        }
    }
}
