use flume::Receiver;
use ratatui::Frame;

use crate::{
    config::AppConfig,
    context::{AppContext, create_engine},
    event::events::Event,
    task::source::LocalTaskSource,
};

use super::{
    handler::EventHandler,
    state::UiState,
    tui::{self, TerminalEvent},
};

pub struct App {
    pub ctx: AppContext,
    pub event_rx: Receiver<Event>,
    pub state: UiState,
    pub has_focus: bool,
}

impl App {
    pub async fn new(config: AppConfig) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let engine = create_engine(&config.audio, event_tx.clone());
        let ctx = AppContext::new(config, &LocalTaskSource, engine, event_tx).await;

        Ok(Self::with_context(ctx, event_rx))
    }

    pub fn with_context(ctx: AppContext, event_rx: Receiver<Event>) -> Self {
        Self {
            ctx,
            event_rx,
            state: UiState::default(),
            has_focus: true,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui)?;
        while !self.state.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.ctx.shutdown();
        tui.exit()?;
        Ok(())
    }

    fn ui(&self, frame: &mut Frame) {
        if self.has_focus {
            frame.render_widget(self, frame.area());
        }
    }
}
