use std::collections::HashMap;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::{
    error::TaskError,
    model::{GenerationTask, MAX_PROGRESS, TaskId},
};

/// Immutable view of the task list. Clones share structure with the store.
pub type TaskSnapshot = im::Vector<GenerationTask>;

/// Canonical, insertion-ordered task collection.
///
/// Every mutation replaces the published snapshot, so subscribers always see
/// the latest list and late subscribers start from it.
pub struct TaskStore {
    tasks: TaskSnapshot,
    index: HashMap<TaskId, usize>,
    publisher: watch::Sender<TaskSnapshot>,
}

impl TaskStore {
    pub fn new(seed: Vec<GenerationTask>) -> Self {
        let (publisher, _) = watch::channel(TaskSnapshot::new());
        let mut store = Self {
            tasks: TaskSnapshot::new(),
            index: HashMap::new(),
            publisher,
        };

        for task in seed {
            if let Err(e) = store.insert(task) {
                warn!(error = %e, "skipping seed task");
            }
        }
        store.publish();
        store
    }

    pub fn get_tasks(&self) -> TaskSnapshot {
        self.tasks.clone()
    }

    pub fn get(&self, id: &TaskId) -> Option<&GenerationTask> {
        self.index.get(id).and_then(|&i| self.tasks.get(i))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<TaskSnapshot> {
        self.publisher.subscribe()
    }

    /// Appends a task. Ids are unique; a duplicate leaves the store untouched.
    pub fn add_task(&mut self, task: GenerationTask) -> Result<(), TaskError> {
        self.insert(task)?;
        self.publish();
        Ok(())
    }

    /// Replaces the entry with the same id.
    pub fn update_task(&mut self, task: GenerationTask) -> Result<(), TaskError> {
        let i = self.position(&task.id)?;
        self.tasks.set(i, task);
        self.publish();
        Ok(())
    }

    /// Writes a simulator step. Progress never moves backwards: a step below
    /// the stored progress is dropped and `Ok(false)` is returned.
    pub fn apply_progress(
        &mut self,
        id: &TaskId,
        progress: u8,
        queue_count: u32,
    ) -> Result<bool, TaskError> {
        let i = self.position(id)?;
        let current = &self.tasks[i];
        if progress < current.progress {
            debug!(task_id = %id, progress, stored = current.progress, "progress behind store");
            return Ok(false);
        }

        let mut task = current.clone();
        task.progress = progress.min(MAX_PROGRESS);
        task.queue_count = Some(queue_count);
        self.tasks.set(i, task);
        self.publish();
        Ok(true)
    }

    pub fn skip_task(&mut self, id: &TaskId) -> Result<(), TaskError> {
        let i = self.position(id)?;
        let mut task = self.tasks[i].clone();
        task.progress = MAX_PROGRESS;
        task.queue_count = Some(0);
        self.tasks.set(i, task);
        self.publish();
        Ok(())
    }

    pub fn remove_task(&mut self, id: &TaskId) -> Result<GenerationTask, TaskError> {
        let i = self.position(id)?;
        let task = self.tasks.remove(i);
        self.reindex();
        self.publish();
        Ok(task)
    }

    fn insert(&mut self, task: GenerationTask) -> Result<(), TaskError> {
        if self.index.contains_key(&task.id) {
            return Err(TaskError::DuplicateId(task.id));
        }
        self.index.insert(task.id.clone(), self.tasks.len());
        self.tasks.push_back(task);
        Ok(())
    }

    fn position(&self, id: &TaskId) -> Result<usize, TaskError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| TaskError::NotFound(id.clone()))
    }

    fn reindex(&mut self) {
        self.index = self
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();
    }

    fn publish(&self) {
        self.publisher.send_replace(self.tasks.clone());
    }
}
