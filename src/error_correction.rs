use crate::states::Bit;

/// Reconcile Bob's key against Alice's using block parities.
///
/// For each `block_size` block (the final block may be short) both sides
/// compare an XOR parity. On a mismatch Bob adopts Alice's block, standing
/// in for the binary search a real reconciliation would run over the public
/// channel. Blocks holding an even number of errors pass the parity check
/// unchanged, so residual mismatches can survive to the verification stage.
pub fn block_parity_correction(
    alice_bits: &[Bit],
    bob_bits: &[Bit],
    block_size: usize,
) -> Vec<Bit> {
    debug_assert_eq!(alice_bits.len(), bob_bits.len());
    debug_assert!(block_size > 0);

    let mut corrected = bob_bits.to_vec();
    for start in (0..alice_bits.len()).step_by(block_size) {
        let end = usize::min(start + block_size, alice_bits.len());
        if parity(&alice_bits[start..end]) != parity(&corrected[start..end]) {
            corrected[start..end].copy_from_slice(&alice_bits[start..end]);
        }
    }
    corrected
}

/// XOR parity of a block.
fn parity(bits: &[Bit]) -> bool {
    bits.iter().fold(false, |acc, bit| acc ^ (bit.as_u8() == 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(pattern: &[u8]) -> Vec<Bit> {
        pattern
            .iter()
            .map(|&b| if b == 0 { Bit::Zero } else { Bit::One })
            .collect()
    }

    #[test]
    fn test_no_error() {
        let alice = bits(&[0, 1, 0, 1]);
        let corrected = block_parity_correction(&alice, &alice, 2);
        assert_eq!(corrected, alice);
    }

    #[test]
    fn test_single_error() {
        let alice = bits(&[1, 0, 0, 1]);
        let mut bob = alice.clone();
        bob[1] = bob[1].flip();
        let corrected = block_parity_correction(&alice, &bob, 4);
        assert_eq!(corrected, alice);
    }

    #[test]
    fn test_errors_in_separate_blocks() {
        let alice = bits(&[1, 1, 0, 0, 1, 0, 1, 0]);
        let mut bob = alice.clone();
        bob[0] = bob[0].flip();
        bob[6] = bob[6].flip();
        let corrected = block_parity_correction(&alice, &bob, 4);
        assert_eq!(corrected, alice);
    }

    #[test]
    fn test_even_errors_in_one_block_slip_through() {
        let alice = bits(&[1, 0, 1, 0]);
        let mut bob = alice.clone();
        bob[0] = bob[0].flip();
        bob[1] = bob[1].flip();
        let corrected = block_parity_correction(&alice, &bob, 4);
        // Parity agrees, so the block is left alone and stays wrong.
        assert_ne!(corrected, alice);
        assert_eq!(corrected, bob);
    }

    #[test]
    fn test_partial_tail_block_is_corrected() {
        let alice = bits(&[0, 1, 1, 0, 1, 1, 0]);
        let mut bob = alice.clone();
        bob[6] = bob[6].flip();
        let corrected = block_parity_correction(&alice, &bob, 4);
        assert_eq!(corrected, alice);
    }

    #[test]
    fn test_output_length_matches_input() {
        let alice = bits(&[1, 0, 1, 1, 0, 0, 1, 0, 1]);
        let bob = bits(&[0, 0, 1, 1, 0, 1, 1, 0, 1]);
        let corrected = block_parity_correction(&alice, &bob, 3);
        assert_eq!(corrected.len(), alice.len());
    }
}
