//! Character classification for mixed English/Traditional-Chinese text.

/// CJK Unified Ideographs block (U+4E00..=U+9FFF).
pub fn is_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Clause and sentence punctuation after which no space is typed in word mode.
/// Covers ASCII and the full-width CJK equivalents.
pub fn is_clause_punctuation(c: char) -> bool {
    ".,!?;:，。！？；：".contains(c)
}

/// Sentence terminators that trigger the inter-sentence pause.
pub fn is_sentence_terminator(c: char) -> bool {
    ".!?。！？".contains(c)
}

/// Full-width CJK punctuation. Not reachable through plain keystrokes on a
/// Latin layout, so these go through the clipboard like ideographs do.
pub fn is_fullwidth_punctuation(c: char) -> bool {
    "，。！？；：、「」『』（）…—".contains(c)
}

/// Characters injected via clipboard paste rather than native emission.
pub fn requires_paste(c: char) -> bool {
    is_ideograph(c) || is_fullwidth_punctuation(c)
}

/// Full-width equivalent for ASCII punctuation, where a Chinese IME would
/// normally substitute one.
pub fn fullwidth_equivalent(c: char) -> Option<char> {
    match c {
        ',' => Some('，'),
        '.' => Some('。'),
        '!' => Some('！'),
        '?' => Some('？'),
        ';' => Some('；'),
        ':' => Some('：'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideograph_block_bounds() {
        assert!(is_ideograph('一'));
        assert!(is_ideograph('\u{4e00}'));
        assert!(is_ideograph('\u{9fff}'));
        assert!(!is_ideograph('\u{4dff}'));
        assert!(!is_ideograph('a'));
        assert!(!is_ideograph('。'));
    }

    #[test]
    fn fullwidth_punctuation_requires_paste() {
        for c in "，。！？；：".chars() {
            assert!(requires_paste(c), "{c} should be pasted");
        }
        assert!(!requires_paste('.'));
        assert!(!requires_paste('a'));
    }

    #[test]
    fn fullwidth_equivalents_are_punctuation() {
        for c in ",.!?;:".chars() {
            let fw = fullwidth_equivalent(c).unwrap();
            assert!(is_fullwidth_punctuation(fw));
        }
        assert_eq!(fullwidth_equivalent('a'), None);
    }
}
