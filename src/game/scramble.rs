use rand::Rng;

use super::GameError;

/// Pick two distinct indices into a list of `len` words.
///
/// The second index is resampled until it differs from the first.
pub fn pick_two_indices(len: usize, rng: &mut impl Rng) -> Result<(usize, usize), GameError> {
    if len < 2 {
        return Err(GameError::NotEnoughWords { available: len });
    }

    let first = rng.random_range(0..len);
    let mut second = rng.random_range(0..len);
    while second == first {
        second = rng.random_range(0..len);
    }

    Ok((first, second))
}

/// Interleave the characters of two words.
///
/// While both words have characters left a fair coin picks which one
/// contributes next; the leftover tail of the other word follows. Each word's
/// characters keep their relative order.
pub fn merge_shuffle(word1: &str, word2: &str, rng: &mut impl Rng) -> String {
    let mut first = word1.chars().peekable();
    let mut second = word2.chars().peekable();
    let mut scrambled = String::with_capacity(word1.len() + word2.len());

    while first.peek().is_some() && second.peek().is_some() {
        let next = if rng.random_bool(0.5) {
            first.next()
        } else {
            second.next()
        };
        scrambled.extend(next);
    }
    scrambled.extend(first);
    scrambled.extend(second);

    scrambled
}

/// Whether `word` can be read from `sequence` left to right, skipping characters
pub fn is_subsequence(word: &str, sequence: &str) -> bool {
    let mut remaining = sequence.chars();
    word.chars().all(|c| remaining.any(|s| s == c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn sorted_chars(s: &str) -> Vec<char> {
        let mut chars: Vec<char> = s.chars().collect();
        chars.sort_unstable();
        chars
    }

    #[test]
    fn test_pick_two_indices_needs_two_words() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            pick_two_indices(0, &mut rng),
            Err(GameError::NotEnoughWords { available: 0 })
        );
        assert_eq!(
            pick_two_indices(1, &mut rng),
            Err(GameError::NotEnoughWords { available: 1 })
        );
    }

    #[test]
    fn test_pick_two_indices_from_two_words() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let (a, b) = pick_two_indices(2, &mut rng).unwrap();
            assert!(a < 2 && b < 2);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_merge_shuffle_example() {
        let mut rng = StdRng::seed_from_u64(42);
        let scrambled = merge_shuffle("about", "tiger", &mut rng);

        assert_eq!(scrambled.chars().count(), 10);
        assert!(is_subsequence("about", &scrambled));
        assert!(is_subsequence("tiger", &scrambled));
    }

    #[test]
    fn test_merge_shuffle_same_seed_same_result() {
        let a = merge_shuffle("lemon", "tiger", &mut StdRng::seed_from_u64(9));
        let b = merge_shuffle("lemon", "tiger", &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_merge_shuffle_varies_between_seeds() {
        let outcomes: std::collections::HashSet<String> = (0..50)
            .map(|seed| merge_shuffle("about", "tiger", &mut StdRng::seed_from_u64(seed)))
            .collect();
        assert!(outcomes.len() > 1, "Scrambles should not all be identical");
    }

    #[test]
    fn test_merge_shuffle_with_empty_word() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(merge_shuffle("", "tiger", &mut rng), "tiger");
        assert_eq!(merge_shuffle("about", "", &mut rng), "about");
    }

    #[test]
    fn test_is_subsequence() {
        assert!(is_subsequence("about", "atibgoeurt"));
        assert!(is_subsequence("tiger", "atibgoeurt"));
        assert!(!is_subsequence("tiger", "regit"));
        assert!(is_subsequence("", "abc"));
    }

    proptest! {
        #[test]
        fn prop_indices_always_distinct(len in 2usize..500, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let (a, b) = pick_two_indices(len, &mut rng).unwrap();
            prop_assert!(a < len);
            prop_assert!(b < len);
            prop_assert_ne!(a, b);
        }

        #[test]
        fn prop_scramble_is_a_merge_of_both_words(
            word1 in "[a-z]{5}",
            word2 in "[a-z]{5}",
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let scrambled = merge_shuffle(&word1, &word2, &mut rng);

            prop_assert_eq!(sorted_chars(&scrambled), sorted_chars(&format!("{word1}{word2}")));
            prop_assert!(is_subsequence(&word1, &scrambled));
            prop_assert!(is_subsequence(&word2, &scrambled));
        }
    }
}
