use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    task::{GenerationTask, Stage, TaskId, TaskSnapshot},
    util::colors,
};

pub struct TaskFeed<'a> {
    tasks: &'a TaskSnapshot,
    selected: usize,
    current: Option<&'a TaskId>,
    is_playing: bool,
}

impl<'a> TaskFeed<'a> {
    pub fn new(
        tasks: &'a TaskSnapshot,
        selected: usize,
        current: Option<&'a TaskId>,
        is_playing: bool,
    ) -> Self {
        Self {
            tasks,
            selected,
            current,
            is_playing,
        }
    }

    fn item(&self, task: &GenerationTask, width: usize) -> ListItem<'static> {
        let is_current = self.current == Some(&task.id);
        let marker = match (is_current, self.is_playing) {
            (true, true) => "♪ ",
            (true, false) => "‖ ",
            _ => "  ",
        };
        let percent = if task.is_completed() {
            String::new()
        } else {
            format!(" {:>3}%", task.progress)
        };

        let title_width = width.saturating_sub(marker.width() + 2 + percent.width());
        let title_style = if is_current {
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let header = Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{} ", stage_glyph(task.stage())), colors::SECONDARY),
            Span::styled(fit(&task.title, title_width), title_style),
            Span::styled(percent, colors::MUTED),
        ]);

        let status = fit(&task.status_line(), width.saturating_sub(4));
        let mut detail = vec![Span::raw("    "), Span::styled(status, colors::MUTED)];
        if (27..100).contains(&task.progress) {
            detail.push(Span::raw(" "));
            detail.push("skip".fg(colors::MUTED).underlined());
        }

        ListItem::new(vec![header, Line::from(detail)])
    }
}

impl Widget for TaskFeed<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.tasks.is_empty() {
            Line::from("No tracks yet. Press c to create one.")
                .fg(colors::MUTED)
                .render(area, buf);
            return;
        }

        let width = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self.tasks.iter().map(|t| self.item(t, width)).collect();
        let list = List::new(items)
            .highlight_style(Style::default().bg(colors::NEUTRAL))
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

fn stage_glyph(stage: Stage) -> &'static str {
    match stage {
        Stage::Started => "○",
        Stage::Quarter => "◔",
        Stage::Half => "◑",
        Stage::ThreeQuarters | Stage::Almost => "◕",
        Stage::Finished => "●",
    }
}

/// Cuts `text` to `width` terminal columns, marking the cut with an ellipsis.
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
