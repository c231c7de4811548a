use ring::digest::{Context, SHA256};
use ring::hmac;

use crate::states::Bit;

/// Shared secret both parties use to authenticate their classical messages.
/// A demonstration value, not a real credential.
pub const AUTH_SECRET: &[u8] = b"super-secret-shared-key-for-hmac-authentication";

/// Compress a reconciled key into a digest string of exactly
/// `final_key_length` '0'/'1' characters.
///
/// The key bits are packed into bytes and fed through SHA-256; the digest
/// is re-hashed in a chain until enough output bits exist, then truncated.
/// Applied identically by both parties, so equal inputs give equal strings
/// and any residual error shows up as a mismatch.
pub fn amplify(key: &[Bit], final_key_length: usize) -> String {
    let seed = bits_to_bytes(key);
    let mut block = hash_chunk(&seed);
    let mut out = String::with_capacity(final_key_length);
    loop {
        for byte in &block {
            for shift in (0..8).rev() {
                if out.len() == final_key_length {
                    return out;
                }
                out.push(if (byte >> shift) & 1 == 1 { '1' } else { '0' });
            }
        }
        block = hash_chunk(&block);
    }
}

/// Authenticate the classical transcript with a keyed digest.
///
/// Both simulated parties derive the tag from the same shared secret, so
/// verification succeeds whenever the session ran to completion. An aborted
/// session (QBER over threshold in secure mode) never exchanged the final
/// messages, so its authentication is reported as failed.
pub fn verify_authentication(transcript: &[u8], qber_exceeded: bool) -> bool {
    if qber_exceeded {
        return false;
    }
    let key = hmac::Key::new(hmac::HMAC_SHA256, AUTH_SECRET);
    let tag = hmac::sign(&key, transcript);
    hmac::verify(&key, transcript, tag.as_ref()).is_ok()
}

fn hash_chunk(chunk: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(chunk);
    context.finish().as_ref().to_vec()
}

fn bits_to_bytes(bits: &[Bit]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, bit)| acc | (bit.as_u8() << i))
        })
        .collect()
}
