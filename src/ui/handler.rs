use tracing::debug;

use crate::{
    event::events::Event,
    ui::{
        app::App,
        input::InputHandler,
        message::AppMessage,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    /// Waits for one terminal event, then applies every queued app event.
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await
            && Self::handle_event(app, evt, tui)?
        {
            should_render = true;
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            app.ctx.handle_event(evt);
            should_render = true;
        }
        app.state.clamp_selection(app.ctx.tasks().len());

        Ok(should_render)
    }

    pub fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => {}
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => {
                if let Some(msg) = InputHandler::handle_key(key, &app.state) {
                    Self::handle_message(app, msg);
                }
            }
            TerminalEvent::Paste(text) => {
                if let Some(prompt) = app.state.prompt.as_mut() {
                    prompt.push_str(&text);
                }
            }
            TerminalEvent::Tick => {
                return Ok(app.has_focus);
            }
            TerminalEvent::Resize(..) => {}
        }

        Ok(true)
    }

    pub fn handle_message(app: &mut App, msg: AppMessage) {
        debug!(?msg, "ui message");
        let selected = app
            .ctx
            .tasks()
            .get(app.state.selected)
            .map(|t| t.id.clone());

        match msg {
            AppMessage::Quit => app.state.should_quit = true,
            AppMessage::TogglePlayPause => app.ctx.handle_event(Event::TogglePlayPause),
            AppMessage::NextTrack => app.ctx.handle_event(Event::Next),
            AppMessage::PreviousTrack => app.ctx.handle_event(Event::Previous),
            AppMessage::ClosePlayer => app.ctx.handle_event(Event::ClosePlayer),

            AppMessage::SelectNext => app.state.select_next(app.ctx.tasks().len()),
            AppMessage::SelectPrevious => app.state.select_previous(),
            AppMessage::PlaySelected => {
                if let Some(id) = selected {
                    app.ctx.handle_event(Event::PlayTask(id));
                }
            }
            AppMessage::SkipSelected => {
                if let Some(id) = selected {
                    app.ctx.handle_event(Event::SkipTask(id));
                }
            }
            AppMessage::RemoveSelected => {
                if let Some(id) = selected {
                    app.ctx.handle_event(Event::RemoveTask(id));
                    app.state.clamp_selection(app.ctx.tasks().len());
                }
            }

            AppMessage::SwitchTab(tab) => app.state.tab = tab,
            AppMessage::NextTab => app.state.tab = app.state.tab.next(),

            AppMessage::OpenPrompt => app.state.prompt = Some(String::new()),
            AppMessage::PromptInput(c) => {
                if let Some(prompt) = app.state.prompt.as_mut() {
                    prompt.push(c);
                }
            }
            AppMessage::PromptBackspace => {
                if let Some(prompt) = app.state.prompt.as_mut() {
                    prompt.pop();
                }
            }
            AppMessage::SubmitPrompt => {
                if let Some(prompt) = app.state.prompt.take()
                    && let Some(id) = app.ctx.create_task(&prompt)
                    && let Some(index) = app.ctx.tasks().iter().position(|t| t.id == id)
                {
                    app.state.selected = index;
                }
            }
            AppMessage::CancelPrompt => app.state.prompt = None,
        }
    }
}
