use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::channel::transmit;
use crate::error_correction::block_parity_correction;
use crate::errors::SimError;
use crate::privacy_amplification::{amplify, verify_authentication};
use crate::qber;
use crate::qubit::{generate_qubits, Qubit};
use crate::sifting::sift;
use crate::states::{receive, Bit};

/// Widest digest the amplification stage hands out (one SHA-256 block).
pub const MAX_FINAL_KEY_LENGTH: usize = 256;

/// The classical messages whose authenticity the secure-mode check covers.
const CLASSICAL_TRANSCRIPT: &[u8] = b"basis announcements + parity exchange";

/// Caller-supplied configuration for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Number of qubits Alice transmits.
    pub n: usize,
    /// Percentage of the sifted key sacrificed to the QBER estimate.
    pub sample_size: u32,
    /// Block length for parity reconciliation.
    pub block_size: usize,
    /// Length of the final digest string, in bits.
    pub final_key_length: usize,
    /// Whether Eve runs the intercept-resend attack on every qubit.
    pub eve_enabled: bool,
    /// Whether a QBER above threshold aborts the session.
    pub secure_mode: bool,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            n: 800,
            sample_size: 20,
            block_size: 32,
            final_key_length: 128,
            eve_enabled: false,
            secure_mode: false,
        }
    }
}

impl SimulationParameters {
    /// Reject parameters no stage can work with. Consumers typically impose
    /// narrower ranges on top of this.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.n == 0 {
            return Err(SimError::InvalidParameter {
                name: "n",
                value: self.n,
                constraint: "at least one qubit must be transmitted",
            });
        }
        if self.sample_size > 100 {
            return Err(SimError::InvalidParameter {
                name: "sample_size",
                value: self.sample_size as usize,
                constraint: "is a percentage and cannot exceed 100",
            });
        }
        if self.block_size == 0 {
            return Err(SimError::InvalidParameter {
                name: "block_size",
                value: self.block_size,
                constraint: "parity blocks must hold at least one bit",
            });
        }
        if self.final_key_length == 0 || self.final_key_length > MAX_FINAL_KEY_LENGTH {
            return Err(SimError::InvalidParameter {
                name: "final_key_length",
                value: self.final_key_length,
                constraint: "must be between 1 and 256 bits",
            });
        }
        Ok(())
    }
}

/// Everything one run produced. Read-only once returned; an aborted run
/// carries `None` in every field downstream of the QBER stage.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub qubits: Vec<Qubit>,
    pub alice_key: Vec<Bit>,
    pub bob_key: Vec<Bit>,
    pub eve_key: Option<Vec<Bit>>,
    pub sifted_alice_key: Vec<Bit>,
    pub sifted_bob_key: Vec<Bit>,
    pub qber: Option<f64>,
    pub qber_exceeded: bool,
    pub error_corrected_alice_key: Option<Vec<Bit>>,
    pub error_corrected_bob_key: Option<Vec<Bit>>,
    pub final_alice_key: Option<String>,
    pub final_bob_key: Option<String>,
    pub keys_match: bool,
}

/// Run the full protocol with the ambient thread RNG.
pub fn run_simulation(params: &SimulationParameters) -> Result<SimulationResult, SimError> {
    run_simulation_with_rng(params, &mut rand::thread_rng())
}

/// Run the full protocol from a fixed seed, for reproducible runs and tests.
pub fn run_simulation_seeded(
    params: &SimulationParameters,
    seed: u64,
) -> Result<SimulationResult, SimError> {
    run_simulation_with_rng(params, &mut ChaCha20Rng::seed_from_u64(seed))
}

/// Run the full protocol against a caller-supplied random source.
///
/// Stages execute in strict sequence: preparation, channel (with optional
/// interception), measurement, sifting, QBER estimation, then, unless the
/// secure-mode policy aborts, reconciliation and privacy amplification.
pub fn run_simulation_with_rng<R: Rng>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<SimulationResult, SimError> {
    params.validate()?;

    let mut qubits = Vec::with_capacity(params.n);
    for prepared in generate_qubits(params.n, rng) {
        let (arriving, interception) = transmit(prepared.polarization, params.eve_enabled, rng);
        let (bob_basis, bob_measurement) = receive(arriving, rng);
        qubits.push(Qubit {
            id: prepared.id,
            alice_bit: prepared.bit,
            alice_basis: prepared.basis,
            alice_polarization: prepared.polarization,
            eve_basis: interception.map(|i| i.basis),
            eve_polarization: interception.map(|i| i.polarization),
            eve_bit: interception.map(|i| i.bit),
            bob_basis,
            bob_measurement,
        });
    }

    let alice_key: Vec<Bit> = qubits.iter().map(|q| q.alice_bit).collect();
    let bob_key: Vec<Bit> = qubits.iter().map(|q| q.bob_measurement).collect();
    let eve_key: Option<Vec<Bit>> = qubits.iter().map(|q| q.eve_bit).collect();

    let sifted = sift(&qubits);
    log::debug!("sifted {} of {} transmitted qubits", sifted.alice.len(), params.n);

    let estimate = qber::estimate(&sifted.alice, &sifted.bob, params.sample_size, rng);
    log::debug!(
        "qber {:?} over {} sampled bits, exceeded: {}",
        estimate.qber,
        estimate.sample_count,
        estimate.qber_exceeded
    );

    if params.secure_mode && estimate.qber_exceeded {
        log::info!("aborting session: qber above threshold in secure mode");
        return Ok(SimulationResult {
            qubits,
            alice_key,
            bob_key,
            eve_key,
            sifted_alice_key: sifted.alice,
            sifted_bob_key: sifted.bob,
            qber: estimate.qber,
            qber_exceeded: true,
            error_corrected_alice_key: None,
            error_corrected_bob_key: None,
            final_alice_key: None,
            final_bob_key: None,
            keys_match: false,
        });
    }

    if params.final_key_length > estimate.remaining_alice.len() {
        log::warn!(
            "final key length {} exceeds the {} reconciled bits, so the digest expands the key instead of compressing it",
            params.final_key_length,
            estimate.remaining_alice.len()
        );
    }

    let corrected_bob = block_parity_correction(
        &estimate.remaining_alice,
        &estimate.remaining_bob,
        params.block_size,
    );
    let final_alice = amplify(&estimate.remaining_alice, params.final_key_length);
    let final_bob = amplify(&corrected_bob, params.final_key_length);
    let keys_match = final_alice == final_bob;
    log::debug!(
        "reconciled {} bits, final keys match: {}",
        corrected_bob.len(),
        keys_match
    );

    Ok(SimulationResult {
        qubits,
        alice_key,
        bob_key,
        eve_key,
        sifted_alice_key: sifted.alice,
        sifted_bob_key: sifted.bob,
        qber: estimate.qber,
        qber_exceeded: estimate.qber_exceeded,
        error_corrected_alice_key: Some(estimate.remaining_alice),
        error_corrected_bob_key: Some(corrected_bob),
        final_alice_key: Some(final_alice),
        final_bob_key: Some(final_bob),
        keys_match,
    })
}

/// Secure-mode verdict on the authenticity of the classical messages.
///
/// `None` when secure mode is off (nothing was authenticated), otherwise
/// the keyed-digest check over the session transcript, which fails for an
/// aborted session.
pub fn verification_status(secure_mode: bool, qber_exceeded: bool) -> Option<bool> {
    if !secure_mode {
        return None;
    }
    Some(verify_authentication(CLASSICAL_TRANSCRIPT, qber_exceeded))
}
