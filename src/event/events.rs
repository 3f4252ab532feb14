use crate::task::TaskId;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Commands
    CreateTask(String),
    PlayTask(TaskId),
    SkipTask(TaskId),
    RemoveTask(TaskId),
    TogglePlayPause,
    Next,
    Previous,
    ClosePlayer,

    // Events
    TaskProgress(ProgressUpdate),
    Engine(EngineEvent),
    CloseSettled(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub task_id: TaskId,
    pub progress: u8,
    pub queue_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Buffering,
    Ready,
    Ended,
}

/// Playback engine notification, tagged with the track it was raised for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    StateChanged { track_id: TaskId, state: EngineState },
    PlayingChanged { track_id: TaskId, is_playing: bool },
    Error { track_id: TaskId, message: String },
}

impl EngineEvent {
    pub fn track_id(&self) -> &TaskId {
        match self {
            Self::StateChanged { track_id, .. }
            | Self::PlayingChanged { track_id, .. }
            | Self::Error { track_id, .. } => track_id,
        }
    }
}
