use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A classical key bit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn from_bool(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Bit::from_bool(rng.gen())
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// One of the two conjugate measurement bases of the protocol.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Basis {
    Rectilinear,
    Diagonal,
}

impl Basis {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.gen_range(0..2) {
            0 => Basis::Rectilinear,
            _ => Basis::Diagonal,
        }
    }
}

/// The four photon polarization states used on the wire.
///
/// Rectilinear basis: `H` encodes 0, `V` encodes 1.
/// Diagonal basis: `D45` encodes 0, `D135` encodes 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarization {
    H,
    V,
    D45,
    D135,
}

impl Polarization {
    /// The basis this polarization was prepared in.
    pub fn basis(self) -> Basis {
        match self {
            Polarization::H | Polarization::V => Basis::Rectilinear,
            Polarization::D45 | Polarization::D135 => Basis::Diagonal,
        }
    }
}

/// Encode a bit into the polarization for the chosen basis.
pub fn encode(basis: Basis, bit: Bit) -> Polarization {
    match (basis, bit) {
        (Basis::Rectilinear, Bit::Zero) => Polarization::H,
        (Basis::Rectilinear, Bit::One) => Polarization::V,
        (Basis::Diagonal, Bit::Zero) => Polarization::D45,
        (Basis::Diagonal, Bit::One) => Polarization::D135,
    }
}

/// Measure an incoming polarization in the given basis.
///
/// A matching basis recovers the encoded bit exactly. A mismatched basis
/// collapses the state, so the outcome is a fresh uniform draw per call.
pub fn measure<R: Rng>(polarization: Polarization, basis: Basis, rng: &mut R) -> Bit {
    match (polarization, basis) {
        (Polarization::H, Basis::Rectilinear) => Bit::Zero,
        (Polarization::V, Basis::Rectilinear) => Bit::One,
        (Polarization::D45, Basis::Diagonal) => Bit::Zero,
        (Polarization::D135, Basis::Diagonal) => Bit::One,
        _ => Bit::random(rng),
    }
}

/// A receiver (Bob, or Eve on the wire) picks a random basis and measures.
pub fn receive<R: Rng>(polarization: Polarization, rng: &mut R) -> (Basis, Bit) {
    let basis = Basis::random(rng);
    let bit = measure(polarization, basis, rng);
    (basis, bit)
}
