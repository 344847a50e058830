//! Latin-letter slip rules: which wrong key a human plausibly hits instead of
//! the intended one on a US-QWERTY board.

use rand::Rng;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Letters sit on this string in row order; a slip lands on the left or right
/// neighbor, clamped at the ends.
const LINEAR_LAYOUT: &str = "qwertyuiopasdfghjklzxcvbnm";

fn top_row_neighbors(c: char) -> Option<&'static [char]> {
    let neighbors: &[char] = match c {
        'q' => &['w'],
        'w' => &['q', 'e'],
        'e' => &['w', 'r'],
        'r' => &['e', 't'],
        't' => &['r', 'y'],
        'y' => &['t', 'u'],
        'u' => &['y', 'i'],
        'i' => &['u', 'o'],
        'o' => &['i', 'p'],
        'p' => &['o'],
        _ => return None,
    };
    Some(neighbors)
}

fn linear_neighbor(c: char, rng: &mut impl Rng) -> Option<char> {
    let chars: Vec<char> = LINEAR_LAYOUT.chars().collect();
    let idx = chars.iter().position(|&k| k == c)?;

    let go_left = rng.gen_bool(0.5);
    let neighbor = if go_left {
        idx.checked_sub(1).unwrap_or(idx + 1)
    } else if idx + 1 < chars.len() {
        idx + 1
    } else {
        idx - 1
    };
    Some(chars[neighbor])
}

/// A plausible mistyped letter for `c`, or `None` when no slip rule applies.
///
/// Vowels swap with a different vowel, top-row letters use the fixed
/// adjacency table, everything else slides to a neighbor on the linear
/// layout. Case is preserved.
pub fn latin_substitute(c: char, rng: &mut impl Rng) -> Option<char> {
    let (base, make_upper) = if c.is_ascii_uppercase() {
        (c.to_ascii_lowercase(), true)
    } else {
        (c, false)
    };

    let chosen = if VOWELS.contains(&base) {
        let mut pick = base;
        while pick == base {
            pick = VOWELS[rng.gen_range(0..VOWELS.len())];
        }
        pick
    } else if let Some(neighbors) = top_row_neighbors(base) {
        neighbors[rng.gen_range(0..neighbors.len())]
    } else {
        linear_neighbor(base, rng)?
    };

    Some(if make_upper {
        chosen.to_ascii_uppercase()
    } else {
        chosen
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn vowels_become_different_vowels() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let sub = latin_substitute('e', &mut rng).unwrap();
            assert!(VOWELS.contains(&sub));
            assert_ne!(sub, 'e');
        }
    }

    #[test]
    fn top_row_uses_adjacency_table() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let sub = latin_substitute('t', &mut rng).unwrap();
            assert!(sub == 'r' || sub == 'y');
        }
    }

    #[test]
    fn case_is_preserved() {
        let mut rng = StdRng::seed_from_u64(7);
        let sub = latin_substitute('M', &mut rng).unwrap();
        assert!(sub.is_ascii_uppercase());
    }

    #[test]
    fn non_letters_have_no_rule() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(latin_substitute('7', &mut rng), None);
        assert_eq!(latin_substitute('.', &mut rng), None);
    }

    #[test]
    fn linear_layout_ends_are_clamped() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            // 'm' is the last key on the linear layout; only 'n' is reachable.
            assert_eq!(latin_substitute('m', &mut rng), Some('n'));
        }
    }
}
