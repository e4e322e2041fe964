mod common;

use common::*;
use fastrand::Rng;
use proptest::prelude::*;
use spellsphere::difficulty::Difficulty;
use spellsphere::geometry::{PresentationMode, SpawnRegion};
use spellsphere::letters::{letter_value, word_score};
use spellsphere::pool::placement::generate_positions;
use spellsphere::round::{Phase, RoundEvent};

prop_compose! {
    fn arb_region()(
        spread in 0.2f32..1.0,
        forward in 0.5f32..2.0,
        jitter in 0.1f32..0.6,
        head_locked in any::<bool>(),
    ) -> SpawnRegion {
        let mode = if head_locked {
            PresentationMode::HeadLocked
        } else {
            PresentationMode::Anchored
        };
        SpawnRegion::for_mode(mode, spread, forward, jitter)
    }
}

proptest! {
    #[test]
    fn prop_double_tap_restores_selection(
        taps in prop::collection::vec(0usize..15, 0..30),
        extra in 0usize..15,
    ) {
        let mut round = started("ABCDEFGHIJKLMNO", Difficulty::Easy);
        let ids = pool_ids(&round);

        for i in taps {
            round.tap(ids[i]);
        }
        let selection = round.selection().to_vec();
        let candidate = round.candidate().to_string();

        round.tap(ids[extra]);
        round.tap(ids[extra]);

        prop_assert_eq!(round.selection(), selection.as_slice());
        prop_assert_eq!(round.candidate(), candidate.as_str());
        prop_assert_eq!(round.candidate().chars().count(), round.selection().len());
    }

    #[test]
    fn prop_countdown_is_monotone(deltas in prop::collection::vec(-5.0f64..20.0, 1..60)) {
        let mut round = started("CAT", Difficulty::Hard);
        let mut last = round.time_remaining();
        let mut completions = 0;

        for d in deltas {
            if round.tick(d).is_some() {
                completions += 1;
            }
            let now = round.time_remaining();
            prop_assert!(now <= last);
            prop_assert!(now >= 0.0);
            last = now;
        }

        prop_assert!(completions <= 1);
        prop_assert_eq!(completions == 1, round.phase() == Phase::Complete);
        let completed_events = round
            .drain_events()
            .iter()
            .filter(|e| matches!(e, RoundEvent::Completed(_)))
            .count();
        prop_assert_eq!(completed_events, completions);
    }

    #[test]
    fn prop_unforced_positions_are_separated(
        region in arb_region(),
        count in 1usize..20,
        seed in any::<u64>(),
    ) {
        let mut rng = Rng::with_seed(seed);
        let min = 0.24;
        let sampled = generate_positions(&mut rng, count, &[], &region, min, 500);

        prop_assert_eq!(sampled.items.len(), count);
        for p in &sampled.items {
            prop_assert!(region.contains(p));
        }
        if sampled.forced == 0 {
            for (i, a) in sampled.items.iter().enumerate() {
                for b in &sampled.items[i + 1..] {
                    prop_assert!(a.distance(b) > min);
                }
            }
        }
    }

    #[test]
    fn prop_score_is_sum_of_letter_values(word in "[a-zA-Z]{0,12}") {
        let expected: u32 = word.chars().map(letter_value).sum();
        prop_assert_eq!(word_score(&word), expected);
        prop_assert_eq!(word_score(&word.to_lowercase()), word_score(&word.to_uppercase()));
    }
}
