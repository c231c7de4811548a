use rand::seq::index;
use rand::Rng;

use crate::states::Bit;

/// QBER above this fraction is treated as evidence of eavesdropping (or a
/// hopelessly noisy channel).
pub const QBER_THRESHOLD: f64 = 0.11;

/// Outcome of the public error-rate estimate.
///
/// `remaining_alice` / `remaining_bob` are the sifted keys with the sampled
/// positions removed: once a bit has been announced on the classical channel
/// it cannot be part of the secret key.
#[derive(Debug, Clone)]
pub struct QberEstimate {
    pub qber: Option<f64>,
    pub qber_exceeded: bool,
    pub sample_count: usize,
    pub remaining_alice: Vec<Bit>,
    pub remaining_bob: Vec<Bit>,
}

/// Sample `round(sample_size% * len)` random sifted positions, publicly
/// compare them, and estimate the error rate. `qber` is `None` when the
/// sample is empty.
pub fn estimate<R: Rng>(
    sifted_alice: &[Bit],
    sifted_bob: &[Bit],
    sample_size: u32,
    rng: &mut R,
) -> QberEstimate {
    debug_assert_eq!(sifted_alice.len(), sifted_bob.len());
    let len = sifted_alice.len();
    let sample_count = ((sample_size as f64 / 100.0) * len as f64).round() as usize;

    let mut sampled = vec![false; len];
    let mut mismatches = 0;
    for i in index::sample(rng, len, sample_count) {
        sampled[i] = true;
        if sifted_alice[i] != sifted_bob[i] {
            mismatches += 1;
        }
    }

    let qber = if sample_count > 0 {
        Some(mismatches as f64 / sample_count as f64)
    } else {
        None
    };
    let qber_exceeded = qber.map_or(false, |q| q > QBER_THRESHOLD);

    let mut remaining_alice = Vec::with_capacity(len - sample_count);
    let mut remaining_bob = Vec::with_capacity(len - sample_count);
    for i in 0..len {
        if !sampled[i] {
            remaining_alice.push(sifted_alice[i]);
            remaining_bob.push(sifted_bob[i]);
        }
    }

    QberEstimate {
        qber,
        qber_exceeded,
        sample_count,
        remaining_alice,
        remaining_bob,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    fn bits(pattern: &[u8]) -> Vec<Bit> {
        pattern
            .iter()
            .map(|&b| if b == 0 { Bit::Zero } else { Bit::One })
            .collect()
    }

    #[test]
    fn test_identical_keys_have_zero_qber() {
        let alice = bits(&[0, 1, 1, 0, 1, 0, 0, 1]);
        let est = estimate(&alice, &alice, 100, &mut thread_rng());
        assert_eq!(est.qber, Some(0.0));
        assert!(!est.qber_exceeded);
        assert_eq!(est.sample_count, 8);
        assert!(est.remaining_alice.is_empty());
    }

    #[test]
    fn test_full_sample_counts_every_mismatch() {
        let alice = bits(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let mut bob = alice.clone();
        bob[2] = bob[2].flip();
        bob[7] = bob[7].flip();
        let est = estimate(&alice, &bob, 100, &mut thread_rng());
        assert_eq!(est.qber, Some(0.2));
        assert!(est.qber_exceeded);
    }

    #[test]
    fn test_threshold_is_strictly_greater_than() {
        // 11 mismatches over a full sample of 100 is exactly the threshold,
        // which must NOT count as exceeded.
        let alice = bits(&[0; 100]);
        let mut bob = alice.clone();
        for i in 0..11 {
            bob[i] = bob[i].flip();
        }
        let est = estimate(&alice, &bob, 100, &mut thread_rng());
        assert_eq!(est.qber, Some(0.11));
        assert!(!est.qber_exceeded);

        bob[11] = bob[11].flip();
        let est = estimate(&alice, &bob, 100, &mut thread_rng());
        assert_eq!(est.qber, Some(0.12));
        assert!(est.qber_exceeded);
    }

    #[test]
    fn test_empty_sample_yields_no_qber() {
        let alice = bits(&[0, 1, 0, 1]);
        let est = estimate(&alice, &alice, 0, &mut thread_rng());
        assert_eq!(est.qber, None);
        assert!(!est.qber_exceeded);
        assert_eq!(est.sample_count, 0);
        assert_eq!(est.remaining_alice.len(), 4);
    }

    #[test]
    fn test_sample_count_rounding() {
        let alice = bits(&[0; 30]);
        // 25% of 30 = 7.5, rounds to 8.
        let est = estimate(&alice, &alice, 25, &mut thread_rng());
        assert_eq!(est.sample_count, 8);
        assert_eq!(est.remaining_alice.len(), 22);
    }

    #[test]
    fn test_sampled_positions_are_consumed() {
        let alice = bits(&[0, 1, 0, 1, 0, 1, 0, 1, 0, 1]);
        let bob = bits(&[1, 0, 1, 0, 1, 0, 1, 0, 1, 0]);
        let est = estimate(&alice, &bob, 40, &mut thread_rng());
        assert_eq!(est.sample_count, 4);
        assert_eq!(est.remaining_alice.len(), 6);
        assert_eq!(est.remaining_bob.len(), 6);
        // Order is preserved, so the remaining keys stay bitwise opposite.
        for (a, b) in est.remaining_alice.iter().zip(&est.remaining_bob) {
            assert_eq!(a.flip(), *b);
        }
    }
}
