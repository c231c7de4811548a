use aes::Aes256;
use aes_gcm::aead::Aead;
use aes_gcm::KeyInit;
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use bb84_sim::prelude::*;

fn main() {
    env_logger::init();

    // Distill a shared key over the quantum channel first.
    let params = SimulationParameters {
        n: 512,
        secure_mode: true,
        ..SimulationParameters::default()
    };
    let result = run_simulation(&params).expect("parameters are valid");
    let final_key = match result.final_alice_key {
        Some(key) if result.keys_match => key,
        _ => {
            println!("No shared key was distilled, nothing to encrypt with.");
            return;
        }
    };

    // Stretch the digest string into a 256-bit AES key.
    let quantum_key_bytes = digest_string_to_bytes(&final_key);
    let mut hasher = Sha256::new();
    hasher.update(&quantum_key_bytes);
    let stretched_key_bytes = hasher.finalize().to_vec();
    let aes_key = Key::<Aes256>::from_slice(&stretched_key_bytes);

    let mut nonce = [0u8; 12];
    OsRng.fill_bytes(&mut nonce);
    let nonce = Nonce::from_slice(&nonce);

    let cipher = Aes256Gcm::new(aes_key);

    let message = b"Your secret message";
    let encrypted_message = cipher
        .encrypt(nonce, message.as_ref())
        .expect("encryption failure");
    let decrypted_message = cipher
        .decrypt(nonce, encrypted_message.as_ref())
        .expect("decryption failure");

    assert_eq!(message, &decrypted_message[..]);
    println!("Success! The message was encrypted and decrypted with the distilled quantum key.");
}

fn digest_string_to_bytes(digest: &str) -> Vec<u8> {
    let mut bytes = vec![0u8; (digest.len() + 7) / 8];
    for (index, ch) in digest.chars().enumerate() {
        if ch == '1' {
            bytes[index / 8] |= 1 << (7 - index % 8);
        }
    }
    bytes
}
