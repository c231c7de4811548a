use serde::Serialize;

use crate::qubit::Qubit;
use crate::states::Bit;

/// The two sifted keys. Equal length by construction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiftedKeys {
    pub alice: Vec<Bit>,
    pub bob: Vec<Bit>,
}

/// Keep only the positions where Alice and Bob chose the same basis,
/// preserving transmission order. Roughly half the qubits survive.
pub fn sift(qubits: &[Qubit]) -> SiftedKeys {
    let mut keys = SiftedKeys::default();
    for qubit in qubits {
        if qubit.basis_match() {
            keys.alice.push(qubit.alice_bit);
            keys.bob.push(qubit.bob_measurement);
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::{encode, Basis};

    fn qubit(id: usize, alice_basis: Basis, bob_basis: Basis, bit: Bit) -> Qubit {
        Qubit {
            id,
            alice_bit: bit,
            alice_basis,
            alice_polarization: encode(alice_basis, bit),
            eve_basis: None,
            eve_polarization: None,
            eve_bit: None,
            bob_basis,
            bob_measurement: bit,
        }
    }

    #[test]
    fn test_sift_keeps_only_matching_bases() {
        let qubits = vec![
            qubit(0, Basis::Rectilinear, Basis::Rectilinear, Bit::One),
            qubit(1, Basis::Rectilinear, Basis::Diagonal, Bit::Zero),
            qubit(2, Basis::Diagonal, Basis::Diagonal, Bit::Zero),
            qubit(3, Basis::Diagonal, Basis::Rectilinear, Bit::One),
        ];
        let keys = sift(&qubits);
        assert_eq!(keys.alice, vec![Bit::One, Bit::Zero]);
        assert_eq!(keys.bob, vec![Bit::One, Bit::Zero]);
    }

    #[test]
    fn test_sifted_keys_always_equal_length() {
        let qubits = vec![
            qubit(0, Basis::Diagonal, Basis::Rectilinear, Bit::One),
            qubit(1, Basis::Rectilinear, Basis::Diagonal, Bit::Zero),
        ];
        let keys = sift(&qubits);
        assert_eq!(keys.alice.len(), keys.bob.len());
        assert!(keys.alice.is_empty());
    }
}
