use rand::Rng;
use rand::seq::SliceRandom;

/// Returns a uniformly random permutation of `items` using the thread RNG.
///
/// The input slice is left untouched.
#[must_use]
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::rng())
}

/// Shuffles a copy of `items` with `rng`.
#[must_use]
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sorted<T: Ord + Clone>(items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        out.sort();
        out
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let input = vec!["a", "b", "c", "d", "b"];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let out = shuffle_with(&input, &mut rng);
            assert_eq!(sorted(&out), sorted(&input));
        }
    }

    #[test]
    fn seeded_shuffle_matches_slice_shuffle() {
        let input: Vec<u32> = (0..10).collect();
        let mut expected = input.clone();
        expected.shuffle(&mut StdRng::seed_from_u64(19));
        assert_eq!(shuffle_with(&input, &mut StdRng::seed_from_u64(19)), expected);
    }

    #[test]
    fn shuffle_leaves_input_unmodified() {
        let input = vec![1, 2, 3, 4];
        let _ = shuffle(&input);
        assert_eq!(input, vec![1, 2, 3, 4]);
    }

    #[test]
    fn shuffle_handles_empty_and_single() {
        let empty: Vec<u8> = Vec::new();
        assert!(shuffle(&empty).is_empty());
        assert_eq!(shuffle(&[9]), vec![9]);
    }

    #[test]
    fn shuffle_does_not_degenerate_to_identity() {
        let input: Vec<u32> = (0..4).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let runs = 2_000;
        let identity = (0..runs)
            .filter(|_| shuffle_with(&input, &mut rng) == input)
            .count();
        // 1/24 expected; allow generous slack.
        assert!(identity < runs / 10, "identity permutation in {identity} of {runs} runs");
    }

    #[test]
    fn every_position_is_reachable() {
        let input = vec!['w', 'x', 'y', 'z'];
        let mut rng = StdRng::seed_from_u64(3);
        let mut first_seen = std::collections::HashSet::new();
        for _ in 0..500 {
            first_seen.insert(shuffle_with(&input, &mut rng)[0]);
        }
        assert_eq!(first_seen.len(), input.len());
    }
}
