use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Tabs, Widget},
};

use crate::{ui::state::Tab, util::colors};

pub struct NavBar {
    selected: Tab,
}

impl NavBar {
    pub fn new(selected: Tab) -> Self {
        Self { selected }
    }
}

impl Widget for NavBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let titles = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| format!("{} {}", i + 1, tab.title()));

        Tabs::new(titles)
            .select(self.selected.index())
            .style(Style::default().fg(colors::MUTED))
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("  ")
            .render(area, buf);
    }
}
