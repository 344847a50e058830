//! Static confusion tables for synthetic typos: homophones and look-alike
//! ideographs for Chinese, whole-word misspellings for English.

use rand::Rng;

use crate::charset::is_ideograph;
use crate::keyboard::latin_substitute;

/// Ideographs a typist confuses by sound (same or near-same pronunciation).
const HOMOPHONES: &[(char, &[char])] = &[
    ('的', &['得', '地']),
    ('得', &['的', '地']),
    ('在', &['再']),
    ('再', &['在']),
    ('他', &['她', '它']),
    ('她', &['他', '它']),
    ('做', &['作']),
    ('作', &['做']),
    ('是', &['事', '市']),
    ('以', &['已']),
    ('已', &['以']),
    ('和', &['合']),
    ('有', &['又']),
    ('要', &['藥']),
    ('會', &['繪']),
    ('想', &['響']),
    ('那', &['哪']),
    ('哪', &['那']),
];

/// Ideographs a typist confuses by shape.
const SIMILAR_SHAPES: &[(char, &[char])] = &[
    ('己', &['已', '巳']),
    ('人', &['入']),
    ('入', &['人']),
    ('土', &['士']),
    ('士', &['土']),
    ('未', &['末']),
    ('末', &['未']),
    ('日', &['曰', '目']),
    ('目', &['日']),
    ('天', &['夫']),
    ('夫', &['天']),
    ('大', &['太', '犬']),
    ('太', &['大']),
    ('王', &['玉']),
    ('我', &['找']),
    ('找', &['我']),
];

/// Common English misspellings, keyed by the lowercased correct word.
const MISSPELLINGS: &[(&str, &[&str])] = &[
    ("the", &["teh", "hte"]),
    ("and", &["adn", "nad"]),
    ("with", &["wiht", "wtih"]),
    ("about", &["abuot"]),
    ("would", &["woudl"]),
    ("which", &["wich", "whihc"]),
    ("their", &["thier"]),
    ("because", &["becuase", "becasue"]),
    ("receive", &["recieve"]),
    ("believe", &["beleive"]),
    ("friend", &["freind"]),
    ("really", &["realy"]),
    ("separate", &["seperate"]),
    ("definitely", &["definately"]),
];

pub fn homophones(c: char) -> &'static [char] {
    HOMOPHONES
        .iter()
        .find(|(key, _)| *key == c)
        .map(|(_, alts)| *alts)
        .unwrap_or(&[])
}

pub fn similar_shapes(c: char) -> &'static [char] {
    SIMILAR_SHAPES
        .iter()
        .find(|(key, _)| *key == c)
        .map(|(_, alts)| *alts)
        .unwrap_or(&[])
}

pub fn misspellings(word_lower: &str) -> &'static [&'static str] {
    MISSPELLINGS
        .iter()
        .find(|(key, _)| *key == word_lower)
        .map(|(_, variants)| *variants)
        .unwrap_or(&[])
}

fn random_confusable(rng: &mut impl Rng) -> char {
    let pool_len = HOMOPHONES.len() + SIMILAR_SHAPES.len();
    let idx = rng.gen_range(0..pool_len);
    if idx < HOMOPHONES.len() {
        HOMOPHONES[idx].0
    } else {
        SIMILAR_SHAPES[idx - HOMOPHONES.len()].0
    }
}

/// Pick a wrong ideograph for `c`: a homophone first, a look-alike second,
/// and otherwise a 30% chance of grabbing an unrelated character from the
/// confusion pool. `None` means no plausible slip exists.
pub fn ideograph_substitute(c: char, rng: &mut impl Rng) -> Option<char> {
    let alts = homophones(c);
    if !alts.is_empty() {
        return Some(alts[rng.gen_range(0..alts.len())]);
    }

    let alts = similar_shapes(c);
    if !alts.is_empty() {
        return Some(alts[rng.gen_range(0..alts.len())]);
    }

    if rng.gen_bool(0.3) {
        let pick = random_confusable(rng);
        if pick != c {
            return Some(pick);
        }
    }
    None
}

/// A wrong character for `c`, routed by script: ideographs through the
/// confusion tables, Latin letters through the keyboard slip rules.
pub fn substitute_char(c: char, rng: &mut impl Rng) -> Option<char> {
    if is_ideograph(c) {
        ideograph_substitute(c, rng)
    } else if c.is_ascii_alphabetic() {
        latin_substitute(c, rng)
    } else {
        None
    }
}
