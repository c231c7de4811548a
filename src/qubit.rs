use rand::Rng;
use serde::Serialize;

use crate::states::{encode, Basis, Bit, Polarization};

/// Alice's side of one photon: a random bit, a random basis, and the
/// polarization that encodes them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PreparedQubit {
    pub id: usize,
    pub bit: Bit,
    pub basis: Basis,
    pub polarization: Polarization,
}

/// The full record of one transmitted photon, assembled as it passes
/// through preparation, the channel, and Bob's measurement. Immutable once
/// the measurement is in.
#[derive(Debug, Clone, Serialize)]
pub struct Qubit {
    pub id: usize,
    pub alice_bit: Bit,
    pub alice_basis: Basis,
    pub alice_polarization: Polarization,
    pub eve_basis: Option<Basis>,
    pub eve_polarization: Option<Polarization>,
    pub eve_bit: Option<Bit>,
    pub bob_basis: Basis,
    pub bob_measurement: Bit,
}

impl Qubit {
    /// Whether Alice and Bob happened to pick the same basis. Derived from
    /// the two basis fields rather than stored.
    pub fn basis_match(&self) -> bool {
        self.alice_basis == self.bob_basis
    }
}

/// Generate Alice's random qubit sequence.
pub fn generate_qubits<R: Rng>(n: usize, rng: &mut R) -> Vec<PreparedQubit> {
    (0..n)
        .map(|id| {
            let bit = Bit::random(rng);
            let basis = Basis::random(rng);
            PreparedQubit {
                id,
                bit,
                basis,
                polarization: encode(basis, bit),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn test_generated_sequence_length_and_ids() {
        let mut rng = thread_rng();
        for n in [1, 2, 17, 100] {
            let qubits = generate_qubits(n, &mut rng);
            assert_eq!(qubits.len(), n);
            for (i, q) in qubits.iter().enumerate() {
                assert_eq!(q.id, i);
            }
        }
    }

    #[test]
    fn test_polarization_consistent_with_bit_and_basis() {
        let mut rng = thread_rng();
        for q in generate_qubits(500, &mut rng) {
            assert_eq!(q.polarization, encode(q.basis, q.bit));
            assert_eq!(q.polarization.basis(), q.basis);
        }
    }
}
