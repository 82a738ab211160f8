//! Cryptographic primitives for the arena.
//!
//! This module provides the commit-reveal scheme: a creator commits to a
//! move before an opponent joins, and reveals it afterwards against the
//! original commitment.

mod commitment;

pub use commitment::{MoveCommitment, Nonce};
