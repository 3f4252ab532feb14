use crate::task::{GenerationTask, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

/// Playable tracks in feed order.
pub fn completed_tracks<'a, I>(tasks: I) -> Vec<&'a GenerationTask>
where
    I: IntoIterator<Item = &'a GenerationTask>,
{
    tasks.into_iter().filter(|t| t.is_completed()).collect()
}

/// Neighbour of `current` among completed tracks, wrapping at both ends.
///
/// An unknown or absent `current` behaves as index -1: `Next` yields the
/// first track and `Previous` the last.
pub fn neighbor<'a, I>(tasks: I, current: Option<&TaskId>, step: Step) -> Option<&'a GenerationTask>
where
    I: IntoIterator<Item = &'a GenerationTask>,
{
    let playable = completed_tracks(tasks);
    let len = playable.len();
    if len == 0 {
        return None;
    }

    let index = current.and_then(|id| playable.iter().position(|t| &t.id == id));
    let target = match (step, index) {
        (Step::Next, Some(i)) => (i + 1) % len,
        (Step::Next, None) => 0,
        (Step::Previous, Some(i)) if i > 0 => i - 1,
        (Step::Previous, _) => len - 1,
    };
    playable.get(target).copied()
}
