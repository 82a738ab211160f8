//! Commitment and Nonce for the commit-reveal scheme.

use crate::arena::PlayerId;
use crate::moves::Move;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Nonce for the commitment scheme.
///
/// Serializes as its 64-character hex form, the same shape the HTTP
/// boundary accepts.
#[derive(Clone)]
pub struct Nonce([u8; 32]);

impl Nonce {
    /// Create a new random nonce
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for Nonce {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Serialize for Nonce {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        hex::encode(self.0).serialize(s)
    }
}

impl<'de> Deserialize<'de> for Nonce {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(d)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Commitment = H(player || move code || nonce)
///
/// Binding the player identity into the hash stops a commitment from
/// being replayed by a different caller. The byte layout here is the
/// wire contract for whatever off-system tool produces commitments:
/// the 16 player UUID bytes, then the single move code byte, then the
/// 32 nonce bytes, hashed with SHA-256. Any deviation is rejected at
/// reveal exactly like a forged move. Serializes as 64 hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveCommitment([u8; 32]);

impl MoveCommitment {
    /// Create a commitment binding a player identity to a move
    pub fn new(player: &PlayerId, mv: Move, nonce: &Nonce) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(player.as_bytes());
        hasher.update([mv.code()]);
        hasher.update(nonce.as_bytes());
        let result = hasher.finalize();
        Self(result.into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verify that the given player, move and nonce produce this commitment
    pub fn verify(&self, player: &PlayerId, mv: Move, nonce: &Nonce) -> bool {
        *self == Self::new(player, mv, nonce)
    }
}

impl FromStr for MoveCommitment {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for MoveCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveCommitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for MoveCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Serialize for MoveCommitment {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        hex::encode(self.0).serialize(s)
    }
}

impl<'de> Deserialize<'de> for MoveCommitment {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(d)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}
