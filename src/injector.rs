//! Collaborator contracts the engine drives: keystroke injection and the
//! clipboard. The system-backed implementations live in [`crate::system`];
//! the recording implementations here back dry runs and tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;

use crate::model::{Action, Modifier, NamedKey};

/// Keystroke injection into whichever application holds focus.
///
/// All calls are synchronous. Failures come back as `Err`, and the engine
/// picks the fallback; implementations never fall back on their own.
pub trait Injector {
    fn type_text(&mut self, text: &str) -> Result<()>;
    fn press_key(&mut self, key: NamedKey) -> Result<()>;
    fn press_chord(&mut self, modifier: Modifier, key: char) -> Result<()>;
    /// Pacing wait. System implementations sleep; recorders log the duration.
    fn wait(&mut self, duration: Duration);
}

/// Clipboard writes. Pasting is the injector's paste chord.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Shared action log for a dry run. Injector and clipboard handles append to
/// the same transcript so ordering between clipboard writes and paste chords
/// is preserved.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    actions: Arc<Mutex<Vec<Action>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn injector(&self) -> RecordingInjector {
        RecordingInjector {
            actions: Arc::clone(&self.actions),
        }
    }

    pub fn clipboard(&self) -> RecordingClipboard {
        RecordingClipboard {
            actions: Arc::clone(&self.actions),
        }
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().expect("transcript lock poisoned").clone()
    }
}

#[derive(Debug, Clone)]
pub struct RecordingInjector {
    actions: Arc<Mutex<Vec<Action>>>,
}

impl RecordingInjector {
    fn push(&self, action: Action) {
        self.actions
            .lock()
            .expect("transcript lock poisoned")
            .push(action);
    }
}

impl Injector for RecordingInjector {
    fn type_text(&mut self, text: &str) -> Result<()> {
        self.push(Action::Text {
            text: text.to_string(),
        });
        Ok(())
    }

    fn press_key(&mut self, key: NamedKey) -> Result<()> {
        self.push(Action::Key { key });
        Ok(())
    }

    fn press_chord(&mut self, modifier: Modifier, key: char) -> Result<()> {
        self.push(Action::Chord { modifier, key });
        Ok(())
    }

    fn wait(&mut self, duration: Duration) {
        self.push(Action::Wait {
            ms: duration.as_millis() as u64,
        });
    }
}

#[derive(Debug, Clone)]
pub struct RecordingClipboard {
    actions: Arc<Mutex<Vec<Action>>>,
}

impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.actions
            .lock()
            .expect("transcript lock poisoned")
            .push(Action::SetClipboard {
                text: text.to_string(),
            });
        Ok(())
    }
}
