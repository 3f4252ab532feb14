use async_trait::async_trait;

use super::model::{GenerationTask, MAX_PROGRESS, MediaRef, TaskId};

#[async_trait]
pub trait TaskDataSource: Send + Sync {
    async fn get_tasks(&self) -> Vec<GenerationTask>;
}

/// Built-in sample feed.
#[derive(Debug, Default, Clone)]
pub struct LocalTaskSource;

impl LocalTaskSource {
    fn sample(
        id: &str,
        title: &str,
        description: &str,
        audio: &str,
        image: &str,
    ) -> GenerationTask {
        GenerationTask {
            id: TaskId::new(id),
            title: title.to_string(),
            description: description.to_string(),
            progress: MAX_PROGRESS,
            queue_count: None,
            audio: Some(MediaRef::new(audio)),
            image: MediaRef::new(image),
        }
    }
}

#[async_trait]
impl TaskDataSource for LocalTaskSource {
    async fn get_tasks(&self) -> Vec<GenerationTask> {
        vec![
            Self::sample(
                "1",
                "Create a funky house",
                "Create a funky house song with upbeat rhythm",
                "sample1.mp3",
                "random_1.png",
            ),
            Self::sample(
                "2",
                "Lo-fi hip hop",
                "Lo-fi hip hop beats for studying and relaxation",
                "sample2.mp3",
                "random_2.png",
            ),
            Self::sample(
                "3",
                "Classical piano composition",
                "Classical piano composition in the style of Chopin",
                "sample1.mp3",
                "random_3.png",
            ),
            Self::sample(
                "4",
                "Electronic dance music",
                "Electronic dance music with heavy bass drops",
                "sample2.mp3",
                "random_1.png",
            ),
            Self::sample(
                "5",
                "Ambient space sounds",
                "Ambient space sounds for meditation and focus",
                "sample1.mp3",
                "random_2.png",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_feed_is_complete_and_unique() {
        let tasks = LocalTaskSource.get_tasks().await;

        assert_eq!(tasks.len(), 5);
        assert!(tasks.iter().all(GenerationTask::is_completed));

        let mut ids: Vec<_> = tasks.iter().map(|t| t.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), tasks.len());
    }
}
