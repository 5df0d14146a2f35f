use rand::{seq::SliceRandom, Rng};

use super::Language;

/// Unbiased in-place Fisher-Yates shuffle.
///
/// Walks from the last position down to the second, swapping each slot with a
/// uniformly chosen slot at or before it, so every permutation of the input is
/// equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Produces the word list for a fresh session.
pub trait WordSource {
    fn generate(&mut self) -> Vec<String>;
}

/// Every word of a list, reshuffled on each call.
#[derive(Debug, Clone)]
pub struct ShuffledSource<R: Rng> {
    words: Vec<String>,
    rng: R,
}

impl<R: Rng> ShuffledSource<R> {
    pub fn new(words: Vec<String>, rng: R) -> Self {
        Self { words, rng }
    }

    pub fn from_language(language: &Language, rng: R) -> Self {
        Self::new(language.words.clone(), rng)
    }
}

impl<R: Rng> WordSource for ShuffledSource<R> {
    fn generate(&mut self) -> Vec<String> {
        let mut words = self.words.clone();
        shuffle(&mut words, &mut self.rng);
        words
    }
}

/// Hands back the same list every time; useful when the order must be known.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSource {
    words: Vec<String>,
}

impl FixedSource {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl WordSource for FixedSource {
    fn generate(&mut self) -> Vec<String> {
        self.words.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn sorted(mut words: Vec<String>) -> Vec<String> {
        words.sort();
        words
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let original: Vec<String> = ["a", "b", "b", "c", "d", "e", "e", "e"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        for _ in 0..50 {
            let mut words = original.clone();
            shuffle(&mut words, &mut rng);
            assert_eq!(sorted(words), sorted(original.clone()));
        }
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(1);

        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![42];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        // 3 items have 6 permutations; 6000 draws should land near 1000 each.
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();

        for _ in 0..6000 {
            let mut items = vec![1u8, 2, 3];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 6);
        for (perm, count) in counts {
            assert!((800..1200).contains(&count), "{perm:?} drawn {count} times");
        }
    }

    #[test]
    fn test_shuffled_source_reshuffles_each_call() {
        let words: Vec<String> = (0..20).map(|i| format!("w{i}")).collect();
        let mut source = ShuffledSource::new(words.clone(), StdRng::seed_from_u64(3));

        let first = source.generate();
        let second = source.generate();

        assert_ne!(first, second);
        assert_eq!(sorted(first), sorted(words.clone()));
        assert_eq!(sorted(second), sorted(words));
    }

    #[test]
    fn test_fixed_source_keeps_order() {
        let mut source = FixedSource::new(["the", "quick", "brown"]);

        assert_eq!(source.generate(), vec!["the", "quick", "brown"]);
        assert_eq!(source.generate(), vec!["the", "quick", "brown"]);
    }
}
