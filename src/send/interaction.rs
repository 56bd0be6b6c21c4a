use crate::error::{AnnounceError, Result};
use crate::ui;

/// Whether this build can write to the system clipboard
pub const CLIPBOARD_SUPPORTED: bool = cfg!(feature = "clipboard");

/// Operator-facing side effects available to delivery actions.
pub trait Interaction {
    /// Ask the operator for a line of input.
    ///
    /// Returns [`AnnounceError::Cancelled`] at end of input.
    fn prompt(&mut self, message: &str) -> Result<String>;

    /// Open `url` in the operator's browser.
    fn open_browser(&mut self, url: &str) -> Result<()>;

    /// Put `text` on the system clipboard.
    fn copy_to_clipboard(&mut self, text: &str) -> Result<()>;

    /// Show a message to the operator.
    fn show(&mut self, message: &str);
}

/// Terminal, browser and clipboard of the machine running the tool
#[derive(Default)]
pub struct SystemInteraction {
    // Kept alive for the whole run: on X11 the owning process serves the
    // clipboard contents.
    #[cfg(feature = "clipboard")]
    clipboard: Option<arboard::Clipboard>,
}

impl SystemInteraction {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Interaction for SystemInteraction {
    fn prompt(&mut self, message: &str) -> Result<String> {
        ui::prompt_line(message)?.ok_or(AnnounceError::Cancelled)
    }

    fn open_browser(&mut self, url: &str) -> Result<()> {
        tracing::debug!(len = url.len(), "opening browser");
        webbrowser::open(url)
            .map_err(|e| AnnounceError::action(format!("cannot open a browser: {}", e)))
    }

    #[cfg(feature = "clipboard")]
    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| {
                AnnounceError::action(format!("cannot access the clipboard: {}", e))
            })?,
        };
        self.clipboard
            .insert(clipboard)
            .set_text(text)
            .map_err(|e| AnnounceError::action(format!("cannot write to the clipboard: {}", e)))
    }

    #[cfg(not(feature = "clipboard"))]
    fn copy_to_clipboard(&mut self, _text: &str) -> Result<()> {
        Err(AnnounceError::action(
            "clipboard support is not available in this build",
        ))
    }

    fn show(&mut self, message: &str) {
        println!("{}", message);
    }
}
