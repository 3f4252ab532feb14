use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::{
    message::AppMessage,
    state::{Tab, UiState},
};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent, state: &UiState) -> Option<AppMessage> {
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            return Some(AppMessage::Quit);
        }

        if state.prompt.is_some() {
            return match key.code {
                KeyCode::Enter => Some(AppMessage::SubmitPrompt),
                KeyCode::Esc => Some(AppMessage::CancelPrompt),
                KeyCode::Backspace => Some(AppMessage::PromptBackspace),
                KeyCode::Char(c) => Some(AppMessage::PromptInput(c)),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('q') => Some(AppMessage::Quit),
            KeyCode::Char(' ') => Some(AppMessage::TogglePlayPause),
            KeyCode::Char('n') => Some(AppMessage::NextTrack),
            KeyCode::Char('p') => Some(AppMessage::PreviousTrack),
            KeyCode::Char('x') => Some(AppMessage::ClosePlayer),
            KeyCode::Char('1') => Some(AppMessage::SwitchTab(Tab::Home)),
            KeyCode::Char('2') => Some(AppMessage::SwitchTab(Tab::Discover)),
            KeyCode::Char('3') => Some(AppMessage::SwitchTab(Tab::Reels)),
            KeyCode::Char('4') => Some(AppMessage::SwitchTab(Tab::Profile)),
            KeyCode::Tab => Some(AppMessage::NextTab),
            _ if state.tab == Tab::Home => Self::handle_feed_key(key.code),
            _ => None,
        }
    }

    fn handle_feed_key(code: KeyCode) -> Option<AppMessage> {
        match code {
            KeyCode::Down | KeyCode::Char('j') => Some(AppMessage::SelectNext),
            KeyCode::Up | KeyCode::Char('k') => Some(AppMessage::SelectPrevious),
            KeyCode::Enter => Some(AppMessage::PlaySelected),
            KeyCode::Char('s') => Some(AppMessage::SkipSelected),
            KeyCode::Char('d') => Some(AppMessage::RemoveSelected),
            KeyCode::Char('c') => Some(AppMessage::OpenPrompt),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn feed_keys_only_on_home() {
        let mut state = UiState::default();
        assert_eq!(
            InputHandler::handle_key(press(KeyCode::Enter), &state),
            Some(AppMessage::PlaySelected)
        );

        state.tab = Tab::Reels;
        assert_eq!(InputHandler::handle_key(press(KeyCode::Enter), &state), None);
        assert_eq!(
            InputHandler::handle_key(press(KeyCode::Char(' ')), &state),
            Some(AppMessage::TogglePlayPause)
        );
    }

    #[test]
    fn prompt_captures_text_keys() {
        let state = UiState {
            prompt: Some(String::new()),
            ..UiState::default()
        };

        assert_eq!(
            InputHandler::handle_key(press(KeyCode::Char('q')), &state),
            Some(AppMessage::PromptInput('q'))
        );
        assert_eq!(
            InputHandler::handle_key(press(KeyCode::Enter), &state),
            Some(AppMessage::SubmitPrompt)
        );
        assert_eq!(
            InputHandler::handle_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &state
            ),
            Some(AppMessage::Quit)
        );
    }
}
