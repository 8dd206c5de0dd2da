//! Count normaliser: adjusts a generator's raw point count to exactly N.
//!
//! Uses a per-show seeded PRNG so that point order (and hence the eventual
//! drone assignment) is reproducible for a given `seed`, resolving the
//! source's use of unseeded randomness (see SPEC_FULL.md section 9).

use crate::math::Point3;
use rand::seq::index::sample;
use rand::Rng;

/// Adjusts `raw` to contain exactly `n` points.
///
/// - If `raw.len() == n`, returned unchanged.
/// - If `raw.len() > n`, selects `n` points without replacement (seeded).
/// - If `raw.len() < n`, keeps all of `raw` and appends `n - raw.len()` points
///   drawn with replacement from `raw` (seeded), as the spec requires.
pub fn normalize_to_n(raw: &[Point3], n: usize, rng: &mut impl Rng) -> Vec<Point3> {
    use std::cmp::Ordering;
    match raw.len().cmp(&n) {
        Ordering::Equal => raw.to_vec(),
        Ordering::Greater => {
            let indices = sample(rng, raw.len(), n);
            indices.iter().map(|i| raw[i]).collect()
        }
        Ordering::Less => {
            let mut out = raw.to_vec();
            for _ in 0..(n - raw.len()) {
                let idx = rng.gen_range(0..raw.len());
                out.push(raw[idx]);
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use rand::SeedableRng;

    #[test]
    fn no_op_when_count_matches() {
        let raw = vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let out = normalize_to_n(&raw, 2, &mut rng);
        assert_eq!(out, raw);
    }

    #[test]
    fn downsamples_to_n() {
        let raw: Vec<Point3> = (0..10).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let out = normalize_to_n(&raw, 4, &mut rng);
        assert_eq!(out.len(), 4);
        // All selected points must have come from the raw set.
        for p in &out {
            assert!(raw.contains(p));
        }
    }

    #[test]
    fn upsamples_to_n_by_duplication() {
        let raw = vec![Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let out = normalize_to_n(&raw, 5, &mut rng);
        assert_eq!(out.len(), 5);
        assert_eq!(&out[0..2], &raw[..]);
    }

    #[test]
    fn seeded_result_is_deterministic() {
        let raw: Vec<Point3> = (0..20).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let mut rng1 = ChaCha8Rng::seed_from_u64(99);
        let mut rng2 = ChaCha8Rng::seed_from_u64(99);
        let out1 = normalize_to_n(&raw, 6, &mut rng1);
        let out2 = normalize_to_n(&raw, 6, &mut rng2);
        assert_eq!(out1, out2);
    }
}
