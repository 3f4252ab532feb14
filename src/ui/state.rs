#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Home,
    Discover,
    Reels,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Discover, Tab::Reels, Tab::Profile];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "AI",
            Tab::Discover => "Discover",
            Tab::Reels => "Reels",
            Tab::Profile => "Profile",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tab: Tab,
    pub selected: usize,
    /// Prompt being typed; `Some` while the create input is open.
    pub prompt: Option<String>,
    pub should_quit: bool,
}

impl UiState {
    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keeps the selection inside a list that may have shrunk.
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_cycle() {
        assert_eq!(Tab::Home.next(), Tab::Discover);
        assert_eq!(Tab::Profile.next(), Tab::Home);
        assert_eq!(Tab::Reels.index(), 2);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = UiState::default();
        state.select_previous();
        assert_eq!(state.selected, 0);

        for _ in 0..10 {
            state.select_next(3);
        }
        assert_eq!(state.selected, 2);

        state.clamp_selection(1);
        assert_eq!(state.selected, 0);
        state.select_next(0);
        assert_eq!(state.selected, 0);
    }
}
