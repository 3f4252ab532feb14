use tracing::error;

use crate::ui::tui::Tui;

/// Leaves the alternate screen before the default hook prints, and keeps a
/// copy of the panic in the log file.
pub fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = Tui::restore() {
            error!(error = %e, "failed to restore terminal");
        }
        error!(panic = %panic_info, "application panicked");
        hook(panic_info);
    }));
}
