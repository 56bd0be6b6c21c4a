use crate::error::{AnnounceError, Result};
use crate::send::Interaction;
use std::collections::VecDeque;

/// Something a delivery action did through [`Interaction`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionEvent {
    Prompt(String),
    OpenBrowser(String),
    Clipboard(String),
    Show(String),
}

/// Scripted interaction for tests: canned prompt answers, recorded side effects
#[derive(Default)]
pub struct MockInteraction {
    answers: VecDeque<Option<String>>,
    fail_browser: bool,
    events: Vec<InteractionEvent>,
}

impl MockInteraction {
    /// Create a mock with no scripted answers; prompts behave as end of input
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next prompt
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answers.push_back(Some(answer.into()));
        self
    }

    /// Queue an end of input for the next prompt
    pub fn with_end_of_input(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    /// Make every browser launch fail
    pub fn with_browser_failure(mut self) -> Self {
        self.fail_browser = true;
        self
    }

    pub fn events(&self) -> &[InteractionEvent] {
        &self.events
    }

    /// Last text copied to the clipboard
    pub fn clipboard(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            InteractionEvent::Clipboard(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Last URL opened in the browser
    pub fn opened_url(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            InteractionEvent::OpenBrowser(url) => Some(url.as_str()),
            _ => None,
        })
    }

    /// Everything shown to the operator, joined by newlines
    pub fn shown(&self) -> String {
        self.events
            .iter()
            .filter_map(|e| match e {
                InteractionEvent::Show(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Interaction for MockInteraction {
    fn prompt(&mut self, message: &str) -> Result<String> {
        self.events.push(InteractionEvent::Prompt(message.to_string()));
        self.answers
            .pop_front()
            .flatten()
            .ok_or(AnnounceError::Cancelled)
    }

    fn open_browser(&mut self, url: &str) -> Result<()> {
        if self.fail_browser {
            return Err(AnnounceError::action("no browser available"));
        }
        self.events.push(InteractionEvent::OpenBrowser(url.to_string()));
        Ok(())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        self.events.push(InteractionEvent::Clipboard(text.to_string()));
        Ok(())
    }

    fn show(&mut self, message: &str) {
        self.events.push(InteractionEvent::Show(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_are_consumed_in_order() {
        let mut mock = MockInteraction::new().with_answer("one").with_end_of_input();
        assert_eq!(mock.prompt("first? ").unwrap(), "one");
        assert!(mock.prompt("second? ").unwrap_err().is_cancelled());
        assert!(mock.prompt("third? ").unwrap_err().is_cancelled());
        assert_eq!(mock.events().len(), 3);
    }

    #[test]
    fn test_records_side_effects() {
        let mut mock = MockInteraction::new();
        mock.open_browser("https://example.test").unwrap();
        mock.copy_to_clipboard("hello").unwrap();
        mock.show("done");
        assert_eq!(mock.opened_url(), Some("https://example.test"));
        assert_eq!(mock.clipboard(), Some("hello"));
        assert_eq!(mock.shown(), "done");
    }
}
