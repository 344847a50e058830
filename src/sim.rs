//! Transcript inspection helpers, intended for tests, `trace` output, and
//! debugging.

use crate::model::{Action, Modifier, NamedKey};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptStats {
    pub actions: usize,
    pub key_events: usize,
    pub pastes: usize,
    pub total_wait_ms: u64,
}

pub fn stats(actions: &[Action]) -> ScriptStats {
    let mut out = ScriptStats {
        actions: actions.len(),
        ..Default::default()
    };

    for a in actions {
        match a {
            Action::Wait { ms } => {
                out.total_wait_ms = out.total_wait_ms.saturating_add(*ms);
            }
            Action::Key { .. } => out.key_events += 1,
            Action::Chord {
                modifier: Modifier::Ctrl,
                key: 'v',
            } => out.pastes += 1,
            _ => {}
        }
    }

    out
}

/// Reconstruct the text a transcript leaves in the target application.
///
/// Models an editor with an end-of-buffer cursor: typed text appends, a paste
/// chord appends the last clipboard write, Backspace removes one character.
/// `Char` key presses are treated as literal keystrokes, so transcripts that
/// drive an IME candidate window (the Zhuyin path) are out of scope here;
/// assert on raw actions for those.
pub fn rendered_text(actions: &[Action]) -> String {
    let mut out = String::new();
    let mut clipboard = String::new();

    for a in actions {
        match a {
            Action::Text { text } => out.push_str(text),
            Action::SetClipboard { text } => clipboard = text.clone(),
            Action::Chord {
                modifier: Modifier::Ctrl,
                key: 'v',
            } => out.push_str(&clipboard),
            Action::Chord { .. } => {}
            Action::Key { key } => match key {
                NamedKey::Enter => out.push('\n'),
                NamedKey::Space => out.push(' '),
                NamedKey::Backspace => {
                    out.pop();
                }
                NamedKey::Char(c) => out.push(*c),
            },
            Action::Wait { .. } => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paste_appends_last_clipboard_write() {
        let actions = vec![
            Action::Text {
                text: "ab".to_string(),
            },
            Action::SetClipboard {
                text: "好".to_string(),
            },
            Action::Chord {
                modifier: Modifier::Ctrl,
                key: 'v',
            },
            Action::Key {
                key: NamedKey::Backspace,
            },
        ];
        assert_eq!(rendered_text(&actions), "ab");

        let stats = stats(&actions);
        assert_eq!(stats.pastes, 1);
        assert_eq!(stats.key_events, 1);
    }
}
