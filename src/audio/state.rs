use crate::task::TaskId;

/// What the coordinator believes should be happening. The engine is the
/// source of truth for physical playback; this only mirrors it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub current_track_id: Option<TaskId>,
    pub is_playing: bool,
    pub is_loading: bool,
    pub is_player_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    Idle,
    Loading,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn phase(&self) -> PlayerPhase {
        match self.current_track_id {
            None => PlayerPhase::Idle,
            Some(_) if self.is_loading => PlayerPhase::Loading,
            Some(_) if self.is_playing => PlayerPhase::Playing,
            Some(_) => PlayerPhase::Paused,
        }
    }

    pub fn is_current(&self, id: &TaskId) -> bool {
        self.current_track_id.as_ref() == Some(id)
    }

    /// Loading a new track. Any expectation tied to the previous id is
    /// invalidated by replacing it.
    pub(crate) fn begin_loading(&mut self, id: TaskId) {
        self.current_track_id = Some(id);
        self.is_playing = false;
        self.is_loading = true;
        self.is_player_visible = true;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
