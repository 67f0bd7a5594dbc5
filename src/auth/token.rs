// src/auth/token.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const TOKEN_BYTES: usize = 32;

/// Fresh URL-safe token for magic links and session cookies.
pub fn new_token() -> String {
    token_from_rng(&mut OsRng)
}

/// Base64 URL-safe, no padding: 32 bytes -> 43 chars, fine in query strings
/// and cookie values without escaping.
pub fn token_from_rng<R: RngCore>(rng: &mut R) -> String {
    let mut buf = [0u8; TOKEN_BYTES];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

/// SHA-256 of a token. Only this ever reaches the database.
pub fn hash_token(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}
