//! Engine configuration: speed profiles, mode and input-method selection,
//! and the human-error simulation options.

use std::time::Duration;

/// How the input text is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Alternate word/whitespace runs, with spacing and sentence pauses.
    Word,
    /// One code point at a time.
    Character,
}

/// How ideographs reach the foreground application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMethod {
    /// Native character emission, clipboard paste on failure.
    Direct,
    /// Simulated Bopomofo key sequence plus candidate confirmation.
    Zhuyin,
    /// Clipboard paste for every ideograph.
    CopyPaste,
}

/// The four pacing durations that define a typing speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedProfile {
    pub char_delay_min: Duration,
    pub char_delay_max: Duration,
    pub word_delay: Duration,
    pub sentence_delay: Duration,
}

impl SpeedProfile {
    const fn from_millis(char_min: u64, char_max: u64, word: u64, sentence: u64) -> Self {
        Self {
            char_delay_min: Duration::from_millis(char_min),
            char_delay_max: Duration::from_millis(char_max),
            word_delay: Duration::from_millis(word),
            sentence_delay: Duration::from_millis(sentence),
        }
    }

    pub const fn very_slow() -> Self {
        Self::from_millis(100, 300, 500, 1200)
    }

    pub const fn slow() -> Self {
        Self::from_millis(80, 200, 400, 1000)
    }

    pub const fn medium() -> Self {
        Self::from_millis(50, 150, 300, 800)
    }

    pub const fn fast() -> Self {
        Self::from_millis(30, 100, 200, 500)
    }

    pub const fn very_fast() -> Self {
        Self::from_millis(10, 50, 100, 300)
    }
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self::medium()
    }
}

/// Synthetic-typo options. Rates are fractions in 0.0..=1.0.
#[derive(Debug, Clone, Copy)]
pub struct MistakeOptions {
    pub enabled: bool,
    pub error_rate: f64,
    pub correction_enabled: bool,
    pub correction_rate: f64,
    pub thinking_pauses: bool,
    pub pause_rate: f64,
    pub pause_min: Duration,
    pub pause_max: Duration,
}

impl Default for MistakeOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            error_rate: 0.05,
            correction_enabled: true,
            correction_rate: 0.8,
            thinking_pauses: false,
            pause_rate: 0.1,
            pause_min: DEFAULT_PAUSE_MIN,
            pause_max: DEFAULT_PAUSE_MAX,
        }
    }
}

/// Full engine configuration for one run.
#[derive(Debug, Clone, Copy)]
pub struct TypistConfig {
    pub mode: Mode,
    pub method: InputMethod,
    pub speed: SpeedProfile,
    pub speed_variation: bool,
    pub mistakes: MistakeOptions,
}

impl Default for TypistConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Word,
            method: InputMethod::Direct,
            speed: SpeedProfile::default(),
            speed_variation: false,
            mistakes: MistakeOptions::default(),
        }
    }
}

pub const DEFAULT_PAUSE_MIN: Duration = Duration::from_millis(500);
pub const DEFAULT_PAUSE_MAX: Duration = Duration::from_millis(2000);

/// Parse a percentage (0-100) into a fraction. Bad input never aborts a run:
/// non-numeric values fall back to 0 (feature disabled), out-of-range values
/// are clamped.
pub fn parse_rate(raw: &str) -> f64 {
    raw.trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map(|pct| (pct / 100.0).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

/// Parse a pause bound in seconds, substituting `default` for anything that
/// is not a non-negative number.
pub fn parse_pause_secs(raw: &str, default: Duration) -> Duration {
    match raw.trim().parse::<f64>() {
        Ok(secs) if secs >= 0.0 && secs.is_finite() => Duration::from_secs_f64(secs),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_parsing_is_lenient() {
        assert_eq!(parse_rate("25"), 0.25);
        assert_eq!(parse_rate(" 25% "), 0.25);
        assert_eq!(parse_rate("150"), 1.0);
        assert_eq!(parse_rate("-3"), 0.0);
        assert_eq!(parse_rate("lots"), 0.0);
        assert_eq!(parse_rate(""), 0.0);
    }

    #[test]
    fn pause_parsing_substitutes_default() {
        assert_eq!(parse_pause_secs("1.5", DEFAULT_PAUSE_MIN).as_millis(), 1500);
        assert_eq!(parse_pause_secs("abc", DEFAULT_PAUSE_MIN), DEFAULT_PAUSE_MIN);
        assert_eq!(parse_pause_secs("-1", DEFAULT_PAUSE_MAX), DEFAULT_PAUSE_MAX);
    }

    #[test]
    fn presets_are_ordered_fast_to_slow() {
        let presets = [
            SpeedProfile::very_fast(),
            SpeedProfile::fast(),
            SpeedProfile::medium(),
            SpeedProfile::slow(),
            SpeedProfile::very_slow(),
        ];
        for pair in presets.windows(2) {
            assert!(pair[0].char_delay_max <= pair[1].char_delay_max);
            assert!(pair[0].sentence_delay <= pair[1].sentence_delay);
        }
    }
}
