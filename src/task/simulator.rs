use std::{ops::Range, time::Duration};

use flume::Sender;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info};

use crate::event::events::{Event, ProgressUpdate};

use super::{
    model::{MAX_PROGRESS, TaskId},
    store::TaskSnapshot,
};

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub tick: Duration,
    pub queue_range: Range<u32>,
    pub title_words: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            queue_range: 15_000..25_000,
            title_words: 4,
        }
    }
}

/// Estimated users ahead at a given progress step.
pub fn queue_count_at(initial: u32, progress: u8) -> u32 {
    if progress == 0 {
        return initial;
    }
    let remaining = u64::from(MAX_PROGRESS.saturating_sub(progress));
    (u64::from(initial) * remaining / u64::from(MAX_PROGRESS)) as u32
}

/// Drives one task from 0 to 100, one step per tick.
///
/// Steps are sent to the owner loop rather than written directly. Before each
/// step the latest store snapshot is checked: the loop stops if the task is
/// gone or was advanced past this counter (a skip).
pub struct ProgressSimulator {
    task_id: TaskId,
    initial_queue: u32,
    tick: Duration,
    tasks: watch::Receiver<TaskSnapshot>,
    event_tx: Sender<Event>,
}

impl ProgressSimulator {
    pub fn new(
        task_id: TaskId,
        initial_queue: u32,
        tick: Duration,
        tasks: watch::Receiver<TaskSnapshot>,
        event_tx: Sender<Event>,
    ) -> Self {
        Self {
            task_id,
            initial_queue,
            tick,
            tasks,
            event_tx,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(self) {
        info!(task_id = %self.task_id, queue = self.initial_queue, "generation started");

        for progress in 0..=MAX_PROGRESS {
            tokio::time::sleep(self.tick).await;

            let stored = self
                .tasks
                .borrow()
                .iter()
                .find(|t| t.id == self.task_id)
                .map(|t| t.progress);

            match stored {
                None => {
                    debug!(task_id = %self.task_id, "task gone, stopping generation");
                    return;
                }
                Some(stored) if stored > progress => {
                    debug!(task_id = %self.task_id, progress, stored, "task advanced externally");
                    return;
                }
                Some(_) => {}
            }

            let update = ProgressUpdate {
                task_id: self.task_id.clone(),
                progress,
                queue_count: queue_count_at(self.initial_queue, progress),
            };
            if self.event_tx.send(Event::TaskProgress(update)).is_err() {
                return;
            }
        }

        info!(task_id = %self.task_id, "generation finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{
        model::{GenerationTask, MediaRef},
        store::TaskStore,
    };

    #[test]
    fn queue_count_formula() {
        assert_eq!(queue_count_at(20_000, 0), 20_000);
        assert_eq!(queue_count_at(20_000, 1), 19_800);
        assert_eq!(queue_count_at(20_000, 50), 10_000);
        assert_eq!(queue_count_at(20_000, 100), 0);
    }

    #[test]
    fn queue_count_truncates() {
        // 15_001 * 29 / 100 = 4350.29
        assert_eq!(queue_count_at(15_001, 71), 4_350);
        assert_eq!(queue_count_at(7, 50), 3);
        assert_eq!(queue_count_at(1, 1), 0);
    }

    #[test]
    fn zero_queue_stays_zero() {
        for progress in 0..=100 {
            assert_eq!(queue_count_at(0, progress), 0);
        }
    }

    #[test]
    fn queue_count_never_increases() {
        for initial in [0, 1, 99, 15_000, 24_999, u32::MAX] {
            let mut last = queue_count_at(initial, 0);
            for progress in 1..=100 {
                let next = queue_count_at(initial, progress);
                assert!(next <= last);
                assert_eq!(
                    u64::from(next),
                    u64::from(initial) * u64::from(100 - progress) / 100
                );
                last = next;
            }
        }
    }

    fn pending(id: &str) -> GenerationTask {
        GenerationTask {
            id: TaskId::new(id),
            title: "funky".to_string(),
            description: "funky house".to_string(),
            progress: 0,
            queue_count: Some(500),
            audio: Some(MediaRef::new("sample3.mp3")),
            image: MediaRef::new("property_1_finish.png"),
        }
    }

    /// Applies every step the simulator emits, like the owner loop does.
    async fn drain(store: &mut TaskStore, rx: &flume::Receiver<Event>) -> Vec<ProgressUpdate> {
        let mut seen = Vec::new();
        while let Ok(Event::TaskProgress(update)) = rx.recv_async().await {
            let _ = store.apply_progress(&update.task_id, update.progress, update.queue_count);
            seen.push(update);
        }
        seen
    }

    #[tokio::test(start_paused = true)]
    async fn runs_one_hundred_and_one_steps() {
        let mut store = TaskStore::new(vec![pending("a")]);
        let (tx, rx) = flume::unbounded();
        ProgressSimulator::new(
            TaskId::new("a"),
            500,
            Duration::from_millis(100),
            store.subscribe(),
            tx,
        )
        .spawn();

        let steps = drain(&mut store, &rx).await;

        assert_eq!(steps.len(), 101);
        assert_eq!(steps[0].progress, 0);
        assert_eq!(steps[0].queue_count, 500);
        assert_eq!(steps[100].progress, 100);
        assert_eq!(steps[100].queue_count, 0);

        let task = store.get(&TaskId::new("a")).unwrap();
        assert!(task.is_completed());
        assert_eq!(task.queue_count, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn skip_stops_the_loop() {
        let mut store = TaskStore::new(vec![pending("a")]);
        let (tx, rx) = flume::unbounded();
        ProgressSimulator::new(
            TaskId::new("a"),
            500,
            Duration::from_millis(100),
            store.subscribe(),
            tx,
        )
        .spawn();

        for _ in 0..10 {
            if let Ok(Event::TaskProgress(u)) = rx.recv_async().await {
                store.apply_progress(&u.task_id, u.progress, u.queue_count).unwrap();
            }
        }
        store.skip_task(&TaskId::new("a")).unwrap();

        let rest = drain(&mut store, &rx).await;
        assert!(rest.len() <= 1);

        let task = store.get(&TaskId::new("a")).unwrap();
        assert_eq!(task.progress, 100);
        assert_eq!(task.queue_count, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn removal_stops_the_loop() {
        let mut store = TaskStore::new(vec![pending("a")]);
        let (tx, rx) = flume::unbounded();
        let handle = ProgressSimulator::new(
            TaskId::new("a"),
            500,
            Duration::from_millis(100),
            store.subscribe(),
            tx,
        )
        .spawn();

        store.remove_task(&TaskId::new("a")).unwrap();
        handle.await.unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_simulators_are_independent() {
        let mut store = TaskStore::new(vec![pending("a"), pending("b")]);
        let (tx, rx) = flume::unbounded();
        for (id, queue) in [("a", 1_000), ("b", 20_000)] {
            ProgressSimulator::new(
                TaskId::new(id),
                queue,
                Duration::from_millis(100),
                store.subscribe(),
                tx.clone(),
            )
            .spawn();
        }
        drop(tx);

        let steps = drain(&mut store, &rx).await;
        assert_eq!(steps.len(), 202);

        for step in steps.iter().filter(|s| s.task_id == TaskId::new("b")) {
            assert_eq!(step.queue_count, queue_count_at(20_000, step.progress));
        }
        assert!(store.get_tasks().iter().all(GenerationTask::is_completed));
    }
}
