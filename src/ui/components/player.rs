use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::{
    audio::state::PlayerPhase,
    ui::components::{feed::fit, spinner::Spinner},
    util::colors,
};

pub struct PlayerWidget<'a> {
    title: &'a str,
    phase: PlayerPhase,
}

impl<'a> PlayerWidget<'a> {
    pub fn new(title: &'a str, phase: PlayerPhase) -> Self {
        Self { title, phase }
    }
}

impl Widget for PlayerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::SECONDARY));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(30),
            ])
            .split(inner);

        match self.phase {
            PlayerPhase::Loading => Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .render(chunks[0], buf),
            PlayerPhase::Playing => Line::from(" ▶".fg(colors::PRIMARY)).render(chunks[0], buf),
            PlayerPhase::Paused | PlayerPhase::Idle => {
                Line::from(" ⏸".fg(colors::MUTED)).render(chunks[0], buf)
            }
        }

        Line::from(Span::styled(
            fit(self.title, chunks[1].width as usize),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .render(chunks[1], buf);

        Line::from("space ⏯  p ⏮  n ⏭  x close".fg(colors::MUTED))
            .right_aligned()
            .render(chunks[2], buf);
    }
}
