//! Masked API key entry.
//!
//! A dedicated rustyline editor whose highlighter renders every typed
//! character as `*`. It has no history, so the key never lands anywhere but
//! the returned string.

use std::borrow::Cow;

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

/// Replaces the visible line with one `*` per character.
pub struct KeyMaskHelper;

impl Helper for KeyMaskHelper {}

impl Completer for KeyMaskHelper {
    type Candidate = String;
}

impl Hinter for KeyMaskHelper {
    type Hint = String;
}

impl Validator for KeyMaskHelper {}

impl Highlighter for KeyMaskHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(mask(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

fn mask(line: &str) -> String {
    "*".repeat(line.chars().count())
}

/// Read one API key with masked echo. Returns `None` on Ctrl-C, Ctrl-D or
/// a terminal error.
pub fn read_masked(prompt: &str) -> Option<String> {
    let mut editor: Editor<KeyMaskHelper, DefaultHistory> = Editor::new().ok()?;
    editor.set_helper(Some(KeyMaskHelper));
    editor.readline(prompt).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_hides_every_character() {
        let shown = KeyMaskHelper.highlight("sk-ant-secret", 3);
        assert_eq!(shown, "*************");
        assert!(!shown.contains("secret"));
    }

    #[test]
    fn highlight_counts_chars_not_bytes() {
        assert_eq!(KeyMaskHelper.highlight("ké", 0), "**");
        assert_eq!(KeyMaskHelper.highlight("", 0), "");
    }

    #[test]
    fn redraws_on_every_keystroke() {
        assert!(KeyMaskHelper.highlight_char("a", 1, CmdKind::Other));
    }
}
