//! Segmentation and the dispatch loop: walks the input text, routes each
//! typing unit to direct emission, a simulated Zhuyin key sequence, or a
//! clipboard paste, and injects human-cadence pauses and optional typos.

use std::time::Duration;

use anyhow::{ensure, Context, Result};
use rand::Rng;

use crate::charset::{
    fullwidth_equivalent, is_clause_punctuation, is_fullwidth_punctuation, is_ideograph,
    is_sentence_terminator, requires_paste,
};
use crate::config::{InputMethod, Mode, TypistConfig};
use crate::controller::CancelToken;
use crate::delay::{char_delay, sentence_pause, word_pause, DelayClass};
use crate::injector::{Clipboard, Injector};
use crate::mistakes::{misspellings, substitute_char};
use crate::model::{Modifier, NamedKey};
use crate::zhuyin::{spelling_to_keys, PhoneticTable};

/// Spacing between simulated Bopomofo key presses.
const ZHUYIN_KEY_DELAY: Duration = Duration::from_millis(50);
/// Time for the IME candidate window to appear before confirming.
const CANDIDATE_WINDOW_DELAY: Duration = Duration::from_millis(300);
/// Pause after a corrective Backspace before retyping.
const POST_BACKSPACE_DELAY: Duration = Duration::from_millis(100);
/// Per-key spacing when backspacing over a misspelled word.
const WORD_BACKSPACE_DELAY: Duration = Duration::from_millis(50);
/// Chance of converting ASCII punctuation to its full-width form mid-flow.
const FULLWIDTH_CONVERT_RATE: f64 = 0.3;

/// One typing unit produced by word-mode segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit<'a> {
    Word(&'a str),
    Whitespace(&'a str),
}

impl Unit<'_> {
    pub fn text(&self) -> &str {
        match self {
            Unit::Word(s) | Unit::Whitespace(s) => s,
        }
    }
}

/// Split text into alternating maximal non-whitespace and whitespace runs.
/// Concatenating the units in order reproduces the input exactly.
pub fn segment(text: &str) -> Vec<Unit<'_>> {
    let mut units = Vec::new();
    let mut rest = text;

    while let Some(first) = rest.chars().next() {
        let in_whitespace = first.is_whitespace();
        let end = rest
            .find(|c: char| c.is_whitespace() != in_whitespace)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        units.push(if in_whitespace {
            Unit::Whitespace(run)
        } else {
            Unit::Word(run)
        });
        rest = tail;
    }

    units
}

/// Cooperative flow signal threaded through every unit boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Cancelled,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed { uncorrected: usize },
    Cancelled,
}

fn validate_config(cfg: &TypistConfig) -> Result<()> {
    let m = &cfg.mistakes;
    ensure!(
        (0.0..=1.0).contains(&m.error_rate),
        "error rate must be a fraction between 0.0 and 1.0"
    );
    ensure!(
        (0.0..=1.0).contains(&m.correction_rate),
        "correction rate must be a fraction between 0.0 and 1.0"
    );
    ensure!(
        (0.0..=1.0).contains(&m.pause_rate),
        "pause rate must be a fraction between 0.0 and 1.0"
    );
    Ok(())
}

/// The typing engine for one run. Drives an [`Injector`] and a [`Clipboard`]
/// and polls the cancel token between units and between candidate keys.
pub struct Typist<'a, I, C, R> {
    injector: &'a mut I,
    clipboard: &'a mut C,
    cfg: TypistConfig,
    cancel: CancelToken,
    rng: &'a mut R,
    table: PhoneticTable,
    uncorrected: usize,
}

impl<'a, I: Injector, C: Clipboard, R: Rng> Typist<'a, I, C, R> {
    pub fn new(
        injector: &'a mut I,
        clipboard: &'a mut C,
        cfg: TypistConfig,
        cancel: CancelToken,
        rng: &'a mut R,
    ) -> Self {
        Self {
            injector,
            clipboard,
            cfg,
            cancel,
            rng,
            table: PhoneticTable::new(),
            uncorrected: 0,
        }
    }

    pub fn run(&mut self, text: &str) -> Result<Outcome> {
        validate_config(&self.cfg)?;

        let step = match self.cfg.mode {
            Mode::Word => self.run_word_mode(text)?,
            Mode::Character => self.run_character_mode(text)?,
        };

        Ok(match step {
            Step::Continue => Outcome::Completed {
                uncorrected: self.uncorrected,
            },
            Step::Cancelled => Outcome::Cancelled,
        })
    }

    fn run_word_mode(&mut self, text: &str) -> Result<Step> {
        for unit in segment(text) {
            if self.cancel.is_cancelled() {
                return Ok(Step::Cancelled);
            }

            match unit {
                Unit::Whitespace(_) => {
                    // A whitespace run of any length collapses to one space.
                    self.injector.press_key(NamedKey::Space)?;
                    self.word_boundary_pause();
                }
                Unit::Word(word) => {
                    if self.type_word(word)? == Step::Cancelled {
                        return Ok(Step::Cancelled);
                    }

                    if let Some(last) = word.chars().next_back() {
                        if !is_clause_punctuation(last) {
                            self.injector.press_key(NamedKey::Space)?;
                        }
                        self.word_boundary_pause();
                        if is_sentence_terminator(last) {
                            self.sentence_boundary_pause();
                        }
                    }
                }
            }
        }

        Ok(Step::Continue)
    }

    fn run_character_mode(&mut self, text: &str) -> Result<Step> {
        for c in text.chars() {
            if self.cancel.is_cancelled() {
                return Ok(Step::Cancelled);
            }

            match c {
                '\n' => {
                    self.injector.press_key(NamedKey::Enter)?;
                    self.sentence_boundary_pause();
                }
                ' ' => {
                    self.injector.press_key(NamedKey::Space)?;
                    self.word_boundary_pause();
                }
                _ => {
                    if self.type_char(c)? == Step::Cancelled {
                        return Ok(Step::Cancelled);
                    }
                    if is_sentence_terminator(c) {
                        self.sentence_boundary_pause();
                    }
                }
            }
        }

        Ok(Step::Continue)
    }

    fn type_word(&mut self, word: &str) -> Result<Step> {
        let m = self.cfg.mistakes;
        if m.enabled && word.is_ascii() {
            let variants = misspellings(&word.to_ascii_lowercase());
            if !variants.is_empty() && self.rng.gen_bool(m.error_rate) {
                return self.type_misspelled_word(word, variants);
            }
        }

        for c in word.chars() {
            if self.cancel.is_cancelled() {
                return Ok(Step::Cancelled);
            }
            if self.type_char(c)? == Step::Cancelled {
                return Ok(Step::Cancelled);
            }
        }
        Ok(Step::Continue)
    }

    fn type_misspelled_word(&mut self, word: &str, variants: &[&str]) -> Result<Step> {
        let m = self.cfg.mistakes;
        let wrong = variants[self.rng.gen_range(0..variants.len())];

        self.injector.type_text(wrong)?;
        let per_char = char_delay(
            &self.cfg.speed,
            DelayClass::English,
            self.cfg.speed_variation,
            self.rng,
        );
        self.injector
            .wait(per_char * wrong.chars().count() as u32);

        if m.correction_enabled && self.rng.gen_bool(m.correction_rate) {
            for _ in 0..wrong.chars().count() {
                if self.cancel.is_cancelled() {
                    return Ok(Step::Cancelled);
                }
                self.injector.press_key(NamedKey::Backspace)?;
                self.injector.wait(WORD_BACKSPACE_DELAY);
            }
            for c in word.chars() {
                if self.cancel.is_cancelled() {
                    return Ok(Step::Cancelled);
                }
                if self.type_char(c)? == Step::Cancelled {
                    return Ok(Step::Cancelled);
                }
            }
        } else {
            self.uncorrected += 1;
        }

        Ok(Step::Continue)
    }

    /// Per-character unit: maybe pause to "think", maybe type the wrong
    /// character first, otherwise inject straight through.
    fn type_char(&mut self, c: char) -> Result<Step> {
        let m = self.cfg.mistakes;

        if m.enabled {
            if m.thinking_pauses && requires_paste(c) && self.rng.gen_bool(m.pause_rate) {
                // An inverted range clamps the lower bound down.
                let lo = m.pause_min.min(m.pause_max).as_secs_f64();
                let hi = m.pause_max.as_secs_f64();
                let secs = self.rng.gen_range(lo..=hi);
                self.injector.wait(Duration::from_secs_f64(secs));
            }

            if self.rng.gen_bool(m.error_rate) {
                if let Some(wrong) = substitute_char(c, self.rng) {
                    if wrong != c {
                        return self.type_wrong_then_maybe_fix(c, wrong);
                    }
                }
            }
        }

        self.plain_char(c)
    }

    fn type_wrong_then_maybe_fix(&mut self, correct: char, wrong: char) -> Result<Step> {
        self.emit_substitute(wrong)?;
        self.char_pause(class_of(wrong));

        let m = self.cfg.mistakes;
        if m.correction_enabled && self.rng.gen_bool(m.correction_rate) {
            // Notice the slip, go back, retype.
            let secs = self.rng.gen_range(0.2..=1.5);
            self.injector.wait(Duration::from_secs_f64(secs));
            self.injector.press_key(NamedKey::Backspace)?;
            self.injector.wait(POST_BACKSPACE_DELAY);

            if self.inject_final(correct)? == Step::Cancelled {
                return Ok(Step::Cancelled);
            }
            self.char_pause(class_of(correct));
        } else {
            self.uncorrected += 1;
        }

        Ok(Step::Continue)
    }

    /// Wrong characters bypass the input method: an ideograph slip lands via
    /// the clipboard, a Latin slip via direct emission.
    fn emit_substitute(&mut self, wrong: char) -> Result<()> {
        if requires_paste(wrong) {
            self.paste_char(wrong)
        } else {
            self.injector.type_text(&wrong.to_string())
        }
    }

    /// Inject the intended character, honoring the configured input method
    /// for ideographs.
    fn inject_final(&mut self, c: char) -> Result<Step> {
        if is_ideograph(c) {
            return self.inject_ideograph(c);
        }
        if requires_paste(c) {
            self.paste_char(c)?;
            return Ok(Step::Continue);
        }
        self.injector.type_text(&c.to_string())?;
        Ok(Step::Continue)
    }

    fn plain_char(&mut self, c: char) -> Result<Step> {
        if is_ideograph(c) {
            if self.inject_ideograph(c)? == Step::Cancelled {
                return Ok(Step::Cancelled);
            }
            self.char_pause(DelayClass::Ideograph);
            return Ok(Step::Continue);
        }

        if requires_paste(c) {
            self.paste_char(c)?;
            self.char_pause(DelayClass::Punctuation);
            return Ok(Step::Continue);
        }

        if self.cfg.mistakes.enabled {
            if let Some(fw) = fullwidth_equivalent(c) {
                if self.rng.gen_bool(FULLWIDTH_CONVERT_RATE) {
                    if self.rng.gen_bool(0.5) {
                        // Type the ASCII form, then mimic the IME swapping it
                        // for the full-width one.
                        self.injector.type_text(&c.to_string())?;
                        self.char_pause(DelayClass::Punctuation);
                        self.injector.press_key(NamedKey::Backspace)?;
                        self.injector.wait(POST_BACKSPACE_DELAY);
                        self.paste_char(fw)?;
                    } else {
                        self.paste_char(fw)?;
                    }
                    self.char_pause(DelayClass::Punctuation);
                    return Ok(Step::Continue);
                }
            }
        }

        self.injector.type_text(&c.to_string())?;
        self.char_pause(class_of(c));
        Ok(Step::Continue)
    }

    /// CJK routing per the selected input method. Every failure path falls
    /// back to a clipboard paste; only a failed paste propagates.
    fn inject_ideograph(&mut self, c: char) -> Result<Step> {
        match self.cfg.method {
            InputMethod::Direct => {
                if self.injector.type_text(&c.to_string()).is_err() {
                    self.paste_char(c)
                        .context("clipboard fallback after direct emission failed")?;
                }
                Ok(Step::Continue)
            }
            InputMethod::CopyPaste => {
                self.paste_char(c)?;
                Ok(Step::Continue)
            }
            InputMethod::Zhuyin => self.inject_via_zhuyin(c),
        }
    }

    fn inject_via_zhuyin(&mut self, c: char) -> Result<Step> {
        let Some(spelling) = self.table.spelling_for(c) else {
            self.paste_char(c)?;
            return Ok(Step::Continue);
        };

        let keys = spelling_to_keys(spelling);
        if keys.is_empty() {
            self.paste_char(c)?;
            return Ok(Step::Continue);
        }

        match self.press_candidate_keys(&keys) {
            Ok(step) => Ok(step),
            Err(_) => {
                self.paste_char(c)
                    .context("clipboard fallback after Zhuyin key sequence failed")?;
                Ok(Step::Continue)
            }
        }
    }

    fn press_candidate_keys(&mut self, keys: &[char]) -> Result<Step> {
        for &key in keys {
            if self.cancel.is_cancelled() {
                return Ok(Step::Cancelled);
            }
            self.injector.press_key(NamedKey::Char(key))?;
            self.injector.wait(ZHUYIN_KEY_DELAY);
        }

        // Give the candidate window time to appear, then take the first
        // candidate.
        self.injector.wait(CANDIDATE_WINDOW_DELAY);
        self.injector.press_key(NamedKey::Space)?;
        Ok(Step::Continue)
    }

    fn paste_char(&mut self, c: char) -> Result<()> {
        self.clipboard.set_text(&c.to_string())?;
        self.injector.press_chord(Modifier::Ctrl, 'v')
    }

    fn char_pause(&mut self, class: DelayClass) {
        let d = char_delay(&self.cfg.speed, class, self.cfg.speed_variation, self.rng);
        self.injector.wait(d);
    }

    fn word_boundary_pause(&mut self) {
        let d = word_pause(&self.cfg.speed, self.cfg.speed_variation, self.rng);
        self.injector.wait(d);
    }

    fn sentence_boundary_pause(&mut self) {
        let d = sentence_pause(&self.cfg.speed, self.cfg.speed_variation, self.rng);
        self.injector.wait(d);
    }
}

fn class_of(c: char) -> DelayClass {
    if is_ideograph(c) {
        DelayClass::Ideograph
    } else if c.is_ascii_punctuation() || is_fullwidth_punctuation(c) {
        DelayClass::Punctuation
    } else {
        DelayClass::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segmentation_reconstructs_input() {
        let samples = [
            "",
            "hello",
            "  leading and trailing  ",
            "Hello, 你好! 我是一個學生。\n\nNext paragraph.",
            "tabs\tand\nnewlines mixed   runs",
        ];
        for text in samples {
            let joined: String = segment(text).iter().map(|u| u.text()).collect();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn segmentation_alternates_run_kinds() {
        let units = segment("one  two\nthree");
        assert_eq!(
            units,
            vec![
                Unit::Word("one"),
                Unit::Whitespace("  "),
                Unit::Word("two"),
                Unit::Whitespace("\n"),
                Unit::Word("three"),
            ]
        );
    }
}
