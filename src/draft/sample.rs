use crate::random::RandomSource;

/// Draw up to `min(n, items.len())` elements uniformly at random without
/// replacement. Return order is selection order; the input is never mutated.
/// Works on a shrinking copy, which is quadratic but fine at pack scale.
pub fn sample<T: Clone>(rng: &mut dyn RandomSource, items: &[T], n: usize) -> Vec<T> {
    let mut working: Vec<T> = items.to_vec();
    let mut picked = Vec::with_capacity(n.min(working.len()));

    for _ in 0..n {
        if working.is_empty() {
            break;
        }
        let idx = rng.pick_index(working.len());
        picked.push(working.remove(idx));
    }

    picked
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::sample;
    use crate::random::{test::ScriptedSource, ThreadSource};

    #[test]
    fn test_sample_counts() {
        let items: Vec<u32> = (0..10).collect();
        let rng = &mut ThreadSource;

        assert!(sample(rng, &items, 0).is_empty());
        assert!(sample::<u32>(rng, &[], 5).is_empty());
        assert_eq!(sample(rng, &items, 4).len(), 4);
        // Oversampling returns everything, never errors.
        assert_eq!(sample(rng, &items, 100).len(), 10);
    }

    #[test]
    fn test_sample_without_replacement() {
        let items: Vec<u32> = (0..15).collect();
        let rng = &mut ThreadSource;

        for _ in 0..100 {
            let picked = sample(rng, &items, 10);
            let distinct: HashSet<u32> = picked.iter().copied().collect();
            assert_eq!(distinct.len(), picked.len());
        }
    }

    #[test]
    fn test_sample_leaves_input_untouched() {
        let items: Vec<u32> = (0..10).collect();
        let before = items.clone();
        sample(&mut ThreadSource, &items, 10);
        assert_eq!(items, before);
    }

    #[test]
    fn test_sample_selection_order() {
        // A constant-zero stream always removes the front of the working
        // copy, so selection order is input order.
        let items = vec!["a", "b", "c", "d"];
        let mut rng = ScriptedSource::constant(0.0);
        assert_eq!(sample(&mut rng, &items, 3), vec!["a", "b", "c"]);

        // A near-one stream always takes the current tail.
        let mut rng = ScriptedSource::constant(0.999_999);
        assert_eq!(sample(&mut rng, &items, 3), vec!["d", "c", "b"]);
    }
}
