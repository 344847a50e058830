use std::time::Duration;

use anyhow::Result;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use zhutype::config::{InputMethod, MistakeOptions, Mode, SpeedProfile, TypistConfig};
use zhutype::controller::CancelToken;
use zhutype::engine::{Outcome, Typist};
use zhutype::injector::{Injector, RecordingInjector, Transcript};
use zhutype::model::{Action, Modifier, NamedKey};
use zhutype::sim;

/// Records like the plain recorder, but cancels the shared token after a
/// fixed number of `type_text` calls, as a stop request landing mid-run would.
struct CancelAfterTexts {
    inner: RecordingInjector,
    cancel: CancelToken,
    remaining: usize,
}

impl Injector for CancelAfterTexts {
    fn type_text(&mut self, text: &str) -> Result<()> {
        self.inner.type_text(text)?;
        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.cancel.cancel();
            }
        }
        Ok(())
    }

    fn press_key(&mut self, key: NamedKey) -> Result<()> {
        self.inner.press_key(key)
    }

    fn press_chord(&mut self, modifier: Modifier, key: char) -> Result<()> {
        self.inner.press_chord(modifier, key)
    }

    fn wait(&mut self, duration: Duration) {
        self.inner.wait(duration);
    }
}

fn run_engine(text: &str, cfg: TypistConfig, seed: u64) -> (Outcome, Vec<Action>) {
    run_engine_with_cancel(text, cfg, seed, CancelToken::new())
}

fn run_engine_with_cancel(
    text: &str,
    cfg: TypistConfig,
    seed: u64,
    cancel: CancelToken,
) -> (Outcome, Vec<Action>) {
    let transcript = Transcript::new();
    let mut injector = transcript.injector();
    let mut clipboard = transcript.clipboard();
    let mut rng = StdRng::seed_from_u64(seed);

    let outcome = Typist::new(&mut injector, &mut clipboard, cfg, cancel, &mut rng)
        .run(text)
        .expect("engine run should succeed");
    (outcome, transcript.actions())
}

fn base_config(mode: Mode, method: InputMethod) -> TypistConfig {
    TypistConfig {
        mode,
        method,
        speed: SpeedProfile::very_fast(),
        speed_variation: false,
        mistakes: MistakeOptions {
            enabled: false,
            ..Default::default()
        },
    }
}

#[test]
fn character_mode_without_mistakes_reproduces_input() {
    let text = "Hello, 你好!\nBye. 我 ok";
    let cfg = base_config(Mode::Character, InputMethod::CopyPaste);

    let (outcome, actions) = run_engine(text, cfg, 7);

    assert_eq!(outcome, Outcome::Completed { uncorrected: 0 });
    assert_eq!(sim::rendered_text(&actions), text);
}

#[test]
fn word_mode_spaces_words_but_not_clause_punctuation() {
    // "Hi" gets a trailing space plus the whitespace run's own space; words
    // ending in clause punctuation get no extra space of their own.
    let cfg = base_config(Mode::Word, InputMethod::CopyPaste);

    let (_, actions) = run_engine("Hi there. 你好!", cfg, 7);

    assert_eq!(sim::rendered_text(&actions), "Hi  there. 你好!");
}

#[test]
fn word_mode_collapses_whitespace_runs() {
    let cfg = base_config(Mode::Word, InputMethod::Direct);

    let (_, actions) = run_engine("a\n\n  b", cfg, 7);

    assert_eq!(sim::rendered_text(&actions), "a  b ");
}

#[test]
fn forced_errors_with_forced_correction_end_correct() {
    let mut cfg = base_config(Mode::Character, InputMethod::Direct);
    cfg.mistakes = MistakeOptions {
        enabled: true,
        error_rate: 1.0,
        correction_enabled: true,
        correction_rate: 1.0,
        ..Default::default()
    };

    let text = "the 的";
    let (outcome, actions) = run_engine(text, cfg, 42);

    assert_eq!(outcome, Outcome::Completed { uncorrected: 0 });
    assert_eq!(sim::rendered_text(&actions), text);

    let backspaces = actions
        .iter()
        .filter(|a| {
            matches!(
                a,
                Action::Key {
                    key: NamedKey::Backspace
                }
            )
        })
        .count();
    assert!(
        backspaces >= 4,
        "every character should have been typed wrong and fixed, saw {backspaces} backspaces"
    );
}

#[test]
fn forced_errors_without_correction_leave_typos() {
    let mut cfg = base_config(Mode::Character, InputMethod::Direct);
    cfg.mistakes = MistakeOptions {
        enabled: true,
        error_rate: 1.0,
        correction_enabled: false,
        ..Default::default()
    };

    let (outcome, actions) = run_engine("aaaa", cfg, 3);

    assert_eq!(outcome, Outcome::Completed { uncorrected: 4 });

    let rendered = sim::rendered_text(&actions);
    assert_eq!(rendered.chars().count(), 4);
    assert!(
        !rendered.contains('a'),
        "every 'a' should have become a different vowel, got {rendered:?}"
    );
}

#[test]
fn misspelled_word_is_backspaced_and_retyped() {
    let mut cfg = base_config(Mode::Word, InputMethod::Direct);
    cfg.mistakes = MistakeOptions {
        enabled: true,
        error_rate: 1.0,
        correction_enabled: true,
        correction_rate: 1.0,
        ..Default::default()
    };

    let (outcome, actions) = run_engine("the", cfg, 11);

    assert_eq!(outcome, Outcome::Completed { uncorrected: 0 });
    assert_eq!(sim::rendered_text(&actions), "the ");

    let wrong_word = actions.iter().any(|a| {
        matches!(a, Action::Text { text } if text.len() == 3 && text != "the")
    });
    assert!(wrong_word, "expected the whole misspelled word to be typed first");
}

#[test]
fn zhuyin_path_presses_layout_keys() {
    let cfg = base_config(Mode::Character, InputMethod::Zhuyin);

    let (_, actions) = run_engine("好", cfg, 7);

    let keys: Vec<NamedKey> = actions
        .iter()
        .filter_map(|a| match a {
            Action::Key { key } => Some(*key),
            _ => None,
        })
        .collect();
    assert_eq!(
        keys,
        vec![
            NamedKey::Char('4'),
            NamedKey::Char('o'),
            NamedKey::Space,
        ]
    );
    assert_eq!(sim::stats(&actions).pastes, 0);
}

#[test]
fn zhuyin_without_spelling_falls_back_to_paste() {
    let cfg = base_config(Mode::Character, InputMethod::Zhuyin);

    let (_, actions) = run_engine("嘸", cfg, 7);

    assert_eq!(sim::stats(&actions).pastes, 1);
    assert!(actions
        .iter()
        .any(|a| matches!(a, Action::SetClipboard { text } if text == "嘸")));
    assert_eq!(sim::rendered_text(&actions), "嘸");
}

#[test]
fn mistakes_enabled_with_zero_error_rate_reproduces_input() {
    let mut cfg = base_config(Mode::Character, InputMethod::CopyPaste);
    cfg.mistakes = MistakeOptions {
        enabled: true,
        error_rate: 0.0,
        correction_enabled: true,
        correction_rate: 1.0,
        ..Default::default()
    };

    // No ASCII punctuation, so the full-width conversion quirk cannot fire
    // either; the output must be the input verbatim.
    let text = "hello 你好 world";
    let (outcome, actions) = run_engine(text, cfg, 5);

    assert_eq!(outcome, Outcome::Completed { uncorrected: 0 });
    assert_eq!(sim::rendered_text(&actions), text);
}

#[test]
fn mid_run_cancellation_stops_at_the_next_character() {
    let cfg = base_config(Mode::Character, InputMethod::Direct);
    let cancel = CancelToken::new();
    let transcript = Transcript::new();
    let mut injector = CancelAfterTexts {
        inner: transcript.injector(),
        cancel: cancel.clone(),
        remaining: 3,
    };
    let mut clipboard = transcript.clipboard();
    let mut rng = StdRng::seed_from_u64(7);

    let outcome = Typist::new(&mut injector, &mut clipboard, cfg, cancel, &mut rng)
        .run("abcdef")
        .expect("engine run should succeed");

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(
        sim::rendered_text(&transcript.actions()),
        "abc",
        "nothing past the character in flight may be typed after a stop"
    );
}

#[test]
fn pre_cancelled_token_types_nothing() {
    let cfg = base_config(Mode::Word, InputMethod::Direct);
    let cancel = CancelToken::new();
    cancel.cancel();

    let (outcome, actions) = run_engine_with_cancel("never typed", cfg, 7, cancel);

    assert_eq!(outcome, Outcome::Cancelled);
    assert!(actions.is_empty());
}
