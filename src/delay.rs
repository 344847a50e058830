//! The pacing model: every pause the engine takes between injections is a
//! uniform draw from the active speed profile, optionally stretched by
//! per-class and global variation factors to avoid a mechanical rhythm.

use std::time::Duration;

use rand::Rng;

use crate::config::SpeedProfile;

/// Lower bound for any sampled delay.
pub const MIN_DELAY: Duration = Duration::from_millis(10);

/// What kind of character the delay follows. Ideographs take longest (an IME
/// round trip), punctuation sits between, plain English is fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayClass {
    Ideograph,
    English,
    Punctuation,
}

fn uniform_secs(min: Duration, max: Duration, rng: &mut impl Rng) -> f64 {
    let lo = min.as_secs_f64();
    let hi = max.as_secs_f64().max(lo);
    rng.gen_range(lo..=hi)
}

/// Inter-character delay for one injected character.
pub fn char_delay(
    profile: &SpeedProfile,
    class: DelayClass,
    speed_variation: bool,
    rng: &mut impl Rng,
) -> Duration {
    let mut secs = uniform_secs(profile.char_delay_min, profile.char_delay_max, rng);

    if speed_variation {
        secs *= match class {
            DelayClass::Ideograph => rng.gen_range(1.5..=2.5),
            DelayClass::English => rng.gen_range(0.8..=1.2),
            DelayClass::Punctuation => rng.gen_range(1.0..=1.5),
        };
        secs *= rng.gen_range(0.5..=2.0);

        // Occasional fatigue pause.
        if rng.gen_bool(0.05) {
            secs += rng.gen_range(0.3..=1.0);
        }
    }

    Duration::from_secs_f64(secs).max(MIN_DELAY)
}

/// Pause after a word boundary, with its own jitter when variation is on.
pub fn word_pause(profile: &SpeedProfile, speed_variation: bool, rng: &mut impl Rng) -> Duration {
    let mut secs = profile.word_delay.as_secs_f64();
    if speed_variation {
        secs *= rng.gen_range(0.8..=1.3);
    }
    Duration::from_secs_f64(secs).max(MIN_DELAY)
}

/// Pause after a sentence terminator, with its own jitter when variation is on.
pub fn sentence_pause(
    profile: &SpeedProfile,
    speed_variation: bool,
    rng: &mut impl Rng,
) -> Duration {
    let mut secs = profile.sentence_delay.as_secs_f64();
    if speed_variation {
        secs *= rng.gen_range(0.9..=1.6);
    }
    Duration::from_secs_f64(secs).max(MIN_DELAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn char_delay_never_drops_below_floor() {
        let mut rng = StdRng::seed_from_u64(9);
        let profiles = [
            SpeedProfile::very_fast(),
            SpeedProfile::medium(),
            SpeedProfile::very_slow(),
        ];
        let classes = [
            DelayClass::Ideograph,
            DelayClass::English,
            DelayClass::Punctuation,
        ];

        for profile in &profiles {
            for &class in &classes {
                for _ in 0..200 {
                    assert!(char_delay(profile, class, true, &mut rng) >= MIN_DELAY);
                }
            }
        }
    }

    #[test]
    fn char_delay_without_variation_stays_in_profile_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let profile = SpeedProfile::slow();
        for _ in 0..200 {
            let d = char_delay(&profile, DelayClass::English, false, &mut rng);
            assert!(d >= profile.char_delay_min);
            assert!(d <= profile.char_delay_max);
        }
    }

    #[test]
    fn boundary_pauses_without_variation_match_profile() {
        let mut rng = StdRng::seed_from_u64(2);
        let profile = SpeedProfile::medium();
        assert_eq!(word_pause(&profile, false, &mut rng), profile.word_delay);
        assert_eq!(
            sentence_pause(&profile, false, &mut rng),
            profile.sentence_delay
        );
    }
}
