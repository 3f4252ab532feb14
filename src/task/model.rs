use std::fmt;

use uuid::Uuid;

pub const MAX_PROGRESS: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to a media asset. Engines and renderers resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRef(String);

impl MediaRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTask {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub progress: u8,
    pub queue_count: Option<u32>,
    pub audio: Option<MediaRef>,
    pub image: MediaRef,
}

/// Coarse progress bucket used to pick the progress glyph on a task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Started,
    Quarter,
    Half,
    ThreeQuarters,
    Almost,
    Finished,
}

impl GenerationTask {
    pub fn from_prompt(
        prompt: &str,
        title_words: usize,
        queue_count: u32,
        audio: MediaRef,
        image: MediaRef,
    ) -> Self {
        Self {
            id: TaskId::generate(),
            title: title_from_prompt(prompt, title_words),
            description: prompt.to_string(),
            progress: 0,
            queue_count: Some(queue_count),
            audio: Some(audio),
            image,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.progress == MAX_PROGRESS
    }

    pub fn is_in_progress(&self) -> bool {
        self.progress > 0 && self.progress < MAX_PROGRESS
    }

    pub fn stage(&self) -> Stage {
        match self.progress {
            0..=24 => Stage::Started,
            25..=49 => Stage::Quarter,
            50..=74 => Stage::Half,
            75..=89 => Stage::ThreeQuarters,
            90..=99 => Stage::Almost,
            _ => Stage::Finished,
        }
    }

    /// Second line of the task card.
    pub fn status_line(&self) -> String {
        match self.progress {
            0..=26 => "Starting AI audio engine...".to_string(),
            27..=99 => {
                let queue = self.queue_count.unwrap_or(0);
                format!("{}.{}K users in queue", queue / 1000, (queue % 1000) / 100)
            }
            _ => self.description.clone(),
        }
    }
}

/// First `words` whitespace-separated words of the prompt.
pub fn title_from_prompt(prompt: &str, words: usize) -> String {
    prompt
        .split_whitespace()
        .take(words)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_at(progress: u8, queue_count: Option<u32>) -> GenerationTask {
        GenerationTask {
            id: TaskId::new("t"),
            title: "Lo-fi hip hop".to_string(),
            description: "Lo-fi hip hop beats for studying".to_string(),
            progress,
            queue_count,
            audio: None,
            image: MediaRef::new("random_1.png"),
        }
    }

    #[test]
    fn title_takes_leading_words() {
        assert_eq!(
            title_from_prompt("Create a funky house beat now", 4),
            "Create a funky house"
        );
        assert_eq!(
            title_from_prompt("Create a funky house beat now", 3),
            "Create a funky"
        );
    }

    #[test]
    fn title_collapses_repeated_whitespace() {
        assert_eq!(title_from_prompt("  deep   house\tgroove ", 4), "deep house groove");
        assert_eq!(title_from_prompt("   ", 4), "");
    }

    #[test]
    fn completion_flags() {
        assert!(!task_at(0, None).is_in_progress());
        assert!(!task_at(0, None).is_completed());
        assert!(task_at(1, Some(10)).is_in_progress());
        assert!(task_at(99, Some(1)).is_in_progress());
        assert!(task_at(100, None).is_completed());
        assert!(!task_at(100, None).is_in_progress());
    }

    #[test]
    fn stage_buckets() {
        assert_eq!(task_at(0, None).stage(), Stage::Started);
        assert_eq!(task_at(24, None).stage(), Stage::Started);
        assert_eq!(task_at(25, None).stage(), Stage::Quarter);
        assert_eq!(task_at(74, None).stage(), Stage::Half);
        assert_eq!(task_at(89, None).stage(), Stage::ThreeQuarters);
        assert_eq!(task_at(99, None).stage(), Stage::Almost);
        assert_eq!(task_at(100, None).stage(), Stage::Finished);
    }

    #[test]
    fn status_line_follows_progress() {
        assert_eq!(task_at(10, Some(20_000)).status_line(), "Starting AI audio engine...");
        assert_eq!(task_at(40, Some(15_380)).status_line(), "15.3K users in queue");
        assert_eq!(task_at(99, None).status_line(), "0.0K users in queue");
        assert_eq!(
            task_at(100, Some(0)).status_line(),
            "Lo-fi hip hop beats for studying"
        );
    }
}
