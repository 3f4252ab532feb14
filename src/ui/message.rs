use super::state::Tab;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    // User Input
    Quit,
    TogglePlayPause,
    NextTrack,
    PreviousTrack,
    ClosePlayer,

    // Feed
    SelectNext,
    SelectPrevious,
    PlaySelected,
    SkipSelected,
    RemoveSelected,

    // Navigation
    SwitchTab(Tab),
    NextTab,

    // Prompt
    OpenPrompt,
    PromptInput(char),
    PromptBackspace,
    SubmitPrompt,
    CancelPrompt,
}
