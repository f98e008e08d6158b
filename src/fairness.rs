//! Commit/reveal helpers for live match rounds.
//!
//! A round is committed as `sha256("{MOVE}:{SALT}")` in lowercase hex and later
//! revealed with the move and salt in the clear.

use anyhow::{bail, Result};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::strategy::Move;

/// Accepted salt length, inclusive.
pub const SALT_MIN_LEN: usize = 16;
pub const SALT_MAX_LEN: usize = 64;

/// Hash committed before the reveal phase.
pub fn commit_hash(mv: Move, salt: &str) -> String {
    let digest = Sha256::digest(format!("{}:{}", mv.as_str(), salt).as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// 16 random bytes as 32 lowercase hex characters.
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// The server rejects salts outside 16-64 printable, non-space ASCII chars.
pub fn validate_salt(salt: &str) -> Result<()> {
    if salt.len() < SALT_MIN_LEN || salt.len() > SALT_MAX_LEN {
        bail!(
            "salt must be {}-{} characters, got {}",
            SALT_MIN_LEN,
            SALT_MAX_LEN,
            salt.len()
        );
    }
    if !salt.bytes().all(|b| (0x21..=0x7e).contains(&b)) {
        bail!("salt must be printable ASCII without whitespace");
    }
    Ok(())
}
