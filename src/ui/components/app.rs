use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    ui::{
        app::App,
        components::{feed::TaskFeed, navbar::NavBar, player::PlayerWidget},
        state::Tab,
    },
    util::colors,
};

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let playback = self.ctx.playback();
        let player_height = if playback.is_player_visible { 3 } else { 0 };
        let prompt_height = if self.state.prompt.is_some() { 3 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(prompt_height),
                Constraint::Length(player_height),
                Constraint::Length(1),
            ])
            .split(area);

        let content = Block::new()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title_top("MusicGPT".fg(colors::PRIMARY).add_modifier(Modifier::BOLD))
            .title_alignment(Alignment::Center);
        let content_area = content.inner(chunks[0]);
        content.render(chunks[0], buf);

        match self.state.tab {
            Tab::Home => {
                let tasks = self.ctx.tasks();
                TaskFeed::new(
                    &tasks,
                    self.state.selected,
                    playback.current_track_id.as_ref(),
                    playback.is_playing,
                )
                .render(content_area, buf);
            }
            tab => {
                Paragraph::new(vec![
                    Line::from(Span::styled(
                        format!("{} Coming Soon", tab.title()),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from("This feature is under development".fg(colors::MUTED)),
                ])
                .alignment(Alignment::Center)
                .render(content_area, buf);
            }
        }

        if let Some(prompt) = &self.state.prompt {
            let block = Block::new()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(colors::PRIMARY))
                .title_top("Describe your song");
            Paragraph::new(format!("{prompt}▏"))
                .block(block)
                .render(chunks[1], buf);
        }

        if playback.is_player_visible {
            let title = self
                .ctx
                .current_track()
                .map(|t| t.title.as_str())
                .unwrap_or("Unknown");
            PlayerWidget::new(title, playback.phase()).render(chunks[2], buf);
        }

        NavBar::new(self.state.tab).render(chunks[3], buf);
    }
}
