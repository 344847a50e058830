//! System-backed injection: enigo for keystrokes, arboard for the clipboard.

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use enigo::{Direction, Enigo, Key, Keyboard, Settings};

use crate::injector::{Clipboard, Injector};
use crate::model::{Modifier, NamedKey};

pub struct SystemInjector {
    enigo: Enigo,
}

impl SystemInjector {
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|err| anyhow!("failed to initialize keystroke injection: {err}"))?;
        Ok(Self { enigo })
    }

    fn key_for(key: NamedKey) -> Key {
        match key {
            NamedKey::Enter => Key::Return,
            NamedKey::Backspace => Key::Backspace,
            NamedKey::Space => Key::Space,
            NamedKey::Char(c) => Key::Unicode(c),
        }
    }
}

impl Injector for SystemInjector {
    fn type_text(&mut self, text: &str) -> Result<()> {
        self.enigo
            .text(text)
            .map_err(|err| anyhow!("text injection failed: {err}"))
    }

    fn press_key(&mut self, key: NamedKey) -> Result<()> {
        self.enigo
            .key(Self::key_for(key), Direction::Click)
            .map_err(|err| anyhow!("key injection failed: {err}"))
    }

    fn press_chord(&mut self, modifier: Modifier, key: char) -> Result<()> {
        let modifier_key = match modifier {
            Modifier::Ctrl => Key::Control,
        };
        self.enigo
            .key(modifier_key, Direction::Press)
            .map_err(|err| anyhow!("modifier press failed: {err}"))?;
        let pressed = self
            .enigo
            .key(Key::Unicode(key), Direction::Click)
            .map_err(|err| anyhow!("chord key failed: {err}"));
        // Release the modifier even if the chord key failed.
        let released = self
            .enigo
            .key(modifier_key, Direction::Release)
            .map_err(|err| anyhow!("modifier release failed: {err}"));
        pressed.and(released)
    }

    fn wait(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

pub struct SystemClipboard {
    clipboard: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard =
            arboard::Clipboard::new().context("failed to open the system clipboard")?;
        Ok(Self { clipboard })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard
            .set_text(text.to_string())
            .context("clipboard write failed")
    }
}

/// IO factory for [`crate::controller::Controller::start`]. Called inside the
/// worker thread; enigo handles are not `Send`.
pub fn open_io() -> Result<(SystemInjector, SystemClipboard)> {
    Ok((SystemInjector::new()?, SystemClipboard::new()?))
}
