use serde::{Deserialize, Serialize};

/// A named key press, as the engine requests it from the injector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedKey {
    Enter,
    Backspace,
    Space,
    Char(char),
}

/// Modifier half of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Ctrl,
}

/// One injection action, as recorded by a dry run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Text { text: String },
    Key { key: NamedKey },
    Chord { modifier: Modifier, key: char },
    SetClipboard { text: String },
    Wait { ms: u64 },
}

/// A full dry-run transcript, serializable for inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub version: u32,
    pub actions: Vec<Action>,
}

impl Script {
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            version: 1,
            actions,
        }
    }
}
