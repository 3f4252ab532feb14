use crate::task::{MediaRef, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRef {
    pub id: TaskId,
    pub title: String,
    pub media: Option<MediaRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Load(TrackRef),
    Prepare,
    Play,
    Pause,
    Stop,
    ClearMediaItems,
    Release,
}
