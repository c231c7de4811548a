use rand::Rng;

use crate::states::{encode, receive, Basis, Bit, Polarization};

/// What Eve did to one intercepted photon: the basis she measured in, the
/// bit she obtained, and the polarization she re-prepared and forwarded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Interception {
    pub basis: Basis,
    pub bit: Bit,
    pub polarization: Polarization,
}

/// Send one polarization through the channel.
///
/// Without Eve the photon passes through untouched. With Eve this is the
/// intercept-resend attack: she measures in a random basis (a wrong basis
/// collapses the state to a coin flip) and forwards a fresh photon prepared
/// from her own result. Bob then measures whatever she re-emitted, which is
/// the sole error-injection mechanism of the simulation.
pub fn transmit<R: Rng>(
    polarization: Polarization,
    eve_enabled: bool,
    rng: &mut R,
) -> (Polarization, Option<Interception>) {
    if !eve_enabled {
        return (polarization, None);
    }
    let (basis, bit) = receive(polarization, rng);
    let resent = encode(basis, bit);
    (resent, Some(Interception { basis, bit, polarization: resent }))
}
